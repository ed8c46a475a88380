use std::path::PathBuf;

use anyhow::Result;
use serde_json::Value;
use tracing::{error, info};

pub mod csv_exporter;
pub mod json_exporter;
pub mod xml_exporter;

use crate::config::ExportConfig;
use crate::error::ScrapeError;
use crate::record::ProfileRecord;
use crate::utils::sanitize_filename;

/// Default XML tag pair for profile record exports
pub const XML_ROOT_TAG: &str = "users";
pub const XML_ITEM_TAG: &str = "user";

/// Export format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Xml,
}

impl std::str::FromStr for ExportFormat {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "xml" => Ok(ExportFormat::Xml),
            other => Err(ScrapeError::UnsupportedFormat { format: other.to_string() }),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Xml => write!(f, "xml"),
        }
    }
}

/// Export manager for handling the supported output formats
pub struct ExportManager {
    config: ExportConfig,
}

impl ExportManager {
    /// Create a new export manager, ensuring the output directory exists
    pub fn new(config: &ExportConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.output_directory)?;
        Ok(Self { config: config.clone() })
    }

    /// Write records as a JSON array and return the written path
    pub fn export_json(&self, records: &[ProfileRecord], filename: &str) -> Result<PathBuf> {
        let rows = to_rows(records)?;
        let path = self.resolve_path(filename);
        json_exporter::export_json(&rows, &path)?;
        info!("JSON export completed: {} records -> {}", records.len(), path.display());
        Ok(path)
    }

    /// Write records as flattened CSV and return the written path
    pub fn export_csv(&self, records: &[ProfileRecord], filename: &str) -> Result<PathBuf> {
        let rows = to_rows(records)?;
        let path = self.resolve_path(filename);
        csv_exporter::export_csv(&rows, &path)?;
        info!("CSV export completed: {} records -> {}", records.len(), path.display());
        Ok(path)
    }

    /// Write records as nested XML and return the written path
    pub fn export_xml(
        &self,
        records: &[ProfileRecord],
        filename: &str,
        root_tag: &str,
        item_tag: &str,
    ) -> Result<PathBuf> {
        let rows = to_rows(records)?;
        let path = self.resolve_path(filename);
        xml_exporter::export_xml(&rows, &path, root_tag, item_tag)?;
        info!("XML export completed: {} records -> {}", records.len(), path.display());
        Ok(path)
    }

    /// Write records once per requested format using a shared base name
    pub fn export_all(
        &self,
        records: &[ProfileRecord],
        base_name: &str,
        formats: &[ExportFormat],
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for format in formats {
            let filename = format!("{base_name}.{format}");
            let result = match format {
                ExportFormat::Json => self.export_json(records, &filename),
                ExportFormat::Csv => self.export_csv(records, &filename),
                ExportFormat::Xml => {
                    self.export_xml(records, &filename, XML_ROOT_TAG, XML_ITEM_TAG)
                }
            };
            match result {
                Ok(path) => written.push(path),
                Err(e) => {
                    error!("Failed to export to {}: {}", format, e);
                    return Err(e);
                }
            }
        }
        Ok(written)
    }

    fn resolve_path(&self, filename: &str) -> PathBuf {
        self.config.output_directory.join(sanitize_filename(filename))
    }
}

fn to_rows(records: &[ProfileRecord]) -> Result<Vec<Value>> {
    records
        .iter()
        .map(|record| serde_json::to_value(record).map_err(Into::into))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{EntryKind, RecordSource, UserDataEntry};
    use chrono::Utc;
    use std::str::FromStr;

    fn sample_record(name: &str, url: &str) -> ProfileRecord {
        ProfileRecord {
            name: Some(name.to_string()),
            profile_image: Some("https://example.com/profile.jpg".to_string()),
            cover_image: None,
            images: vec!["https://example.com/a.jpg".to_string()],
            user_id: Some("12345".to_string()),
            profile_url: Some(url.to_string()),
            user_data: vec![UserDataEntry::new(EntryKind::Work, "Works at Example Corp")],
            fetched_at: Utc::now(),
            source: RecordSource::ProfileUrl,
        }
    }

    fn manager(dir: &std::path::Path) -> ExportManager {
        let config = ExportConfig { output_directory: dir.to_path_buf() };
        ExportManager::new(&config).unwrap()
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(ExportFormat::from_str("json").unwrap(), ExportFormat::Json);
        assert_eq!(ExportFormat::from_str(" CSV ").unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_str("xml").unwrap(), ExportFormat::Xml);
        assert!(ExportFormat::from_str("xlsx").is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![
            sample_record("Jane Doe", "https://www.facebook.com/jane"),
            sample_record("John Roe", "https://www.facebook.com/john"),
        ];

        let path = manager(dir.path()).export_json(&records, "users.json").unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let read_back: Vec<ProfileRecord> = serde_json::from_str(&contents).unwrap();

        assert_eq!(read_back, records);
    }

    #[test]
    fn test_csv_contains_preferred_header_order() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![sample_record("Jane Doe", "https://www.facebook.com/jane")];

        let path = manager(dir.path()).export_csv(&records, "users.csv").unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let header = contents.lines().next().unwrap();

        assert_eq!(
            header,
            "name,profileUrl,userId,profileImage,coverImage,images,userData,_fetchedAt,_source"
        );
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn test_export_all_writes_each_requested_format() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![sample_record("Jane Doe", "https://www.facebook.com/jane")];

        let written = manager(dir.path())
            .export_all(
                &records,
                "facebook_users_test",
                &[ExportFormat::Json, ExportFormat::Csv, ExportFormat::Xml],
            )
            .unwrap();

        assert_eq!(written.len(), 3);
        for path in &written {
            assert!(path.exists());
        }
        assert!(written[0].to_string_lossy().ends_with("facebook_users_test.json"));
        assert!(written[2].to_string_lossy().ends_with("facebook_users_test.xml"));
    }

    #[test]
    fn test_empty_record_set_writes_all_formats() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = manager(dir.path());

        let json_path = mgr.export_json(&[], "empty.json").unwrap();
        assert_eq!(std::fs::read_to_string(&json_path).unwrap(), "[]");

        let csv_path = mgr.export_csv(&[], "empty.csv").unwrap();
        let csv_contents = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(csv_contents.lines().count(), 1);

        let xml_path = mgr.export_xml(&[], "empty.xml", "users", "user").unwrap();
        assert!(std::fs::read_to_string(&xml_path).unwrap().contains("<users>"));
    }

    #[test]
    fn test_output_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports").join("run1");
        let config = ExportConfig { output_directory: nested.clone() };

        ExportManager::new(&config).unwrap();
        assert!(nested.is_dir());
    }
}
