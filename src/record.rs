use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::parser::ParsedProfile;

/// Maximum number of gallery images kept per record
pub const MAX_GALLERY_IMAGES: usize = 25;

/// Maximum number of work/education entries kept per record
pub const MAX_USER_DATA_ENTRIES: usize = 20;

/// Ingestion path that produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordSource {
    #[serde(rename = "profileUrl")]
    ProfileUrl,
    #[serde(rename = "nameSearch")]
    NameSearch,
    #[serde(rename = "embeddedHtml")]
    EmbeddedHtml,
}

impl std::fmt::Display for RecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordSource::ProfileUrl => write!(f, "profileUrl"),
            RecordSource::NameSearch => write!(f, "nameSearch"),
            RecordSource::EmbeddedHtml => write!(f, "embeddedHtml"),
        }
    }
}

/// Classification of a profile detail entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Work,
    Education,
}

/// A single work/education entry extracted from a profile page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDataEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub text: String,
    pub icon: Option<String>,
}

impl UserDataEntry {
    pub fn new(kind: EntryKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into(), icon: None }
    }
}

/// Normalized profile record, the canonical output unit.
///
/// Field names match the wire schema exactly; optional fields serialize
/// as `null` rather than being omitted, so downstream consumers see a
/// consistent key set on every record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub name: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub images: Vec<String>,
    pub user_id: Option<String>,
    pub profile_url: Option<String>,
    pub user_data: Vec<UserDataEntry>,
    #[serde(rename = "_fetchedAt")]
    pub fetched_at: DateTime<Utc>,
    #[serde(rename = "_source")]
    pub source: RecordSource,
}

impl ProfileRecord {
    /// Normalize a parsed profile into a record, stamping provenance.
    ///
    /// The fetch timestamp is assigned here, once; records are never
    /// mutated afterwards.
    pub fn from_parsed(parsed: ParsedProfile, source: RecordSource) -> Self {
        Self {
            name: parsed.name,
            profile_image: parsed.profile_image,
            cover_image: parsed.cover_image,
            images: parsed.images,
            user_id: parsed.user_id,
            profile_url: parsed.profile_url,
            user_data: parsed.user_data,
            fetched_at: Utc::now(),
            source,
        }
    }

    /// Identity key for deduplication: the canonical profile URL when
    /// present, else a synthetic key derived from the user id.
    pub fn identity_key(&self) -> String {
        match &self.profile_url {
            Some(url) => url.clone(),
            None => format!("id:{}", self.user_id.as_deref().unwrap_or("none")),
        }
    }
}

/// Drop duplicate records, keeping the first occurrence in processing order.
pub fn dedup_records(records: Vec<ProfileRecord>) -> Vec<ProfileRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.identity_key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(profile_url: Option<&str>, user_id: Option<&str>, name: &str) -> ProfileRecord {
        ProfileRecord {
            name: Some(name.to_string()),
            profile_image: None,
            cover_image: None,
            images: Vec::new(),
            user_id: user_id.map(|s| s.to_string()),
            profile_url: profile_url.map(|s| s.to_string()),
            user_data: Vec::new(),
            fetched_at: Utc::now(),
            source: RecordSource::ProfileUrl,
        }
    }

    #[test]
    fn dedup_keeps_first_record_for_same_profile_url() {
        let records = vec![
            record_with(Some("https://www.facebook.com/zuck"), None, "First"),
            record_with(Some("https://www.facebook.com/zuck"), None, "Second"),
            record_with(Some("https://www.facebook.com/moskov"), None, "Third"),
        ];

        let deduped = dedup_records(records);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].name.as_deref(), Some("First"));
        assert_eq!(deduped[1].name.as_deref(), Some("Third"));
    }

    #[test]
    fn dedup_falls_back_to_user_id_key() {
        let records = vec![
            record_with(None, Some("12345"), "A"),
            record_with(None, Some("12345"), "B"),
            record_with(None, Some("67890"), "C"),
        ];

        let deduped = dedup_records(records);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].user_id.as_deref(), Some("12345"));
    }

    #[test]
    fn records_without_identity_collapse_together() {
        let records = vec![record_with(None, None, "A"), record_with(None, None, "B")];
        assert_eq!(dedup_records(records).len(), 1);
    }

    #[test]
    fn absent_fields_serialize_as_null_with_exact_keys() {
        let record = record_with(None, None, "Jane Doe");
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();

        for key in [
            "name",
            "profileImage",
            "coverImage",
            "images",
            "userId",
            "profileUrl",
            "userData",
            "_fetchedAt",
            "_source",
        ] {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert!(object["profileImage"].is_null());
        assert!(object["userId"].is_null());
        assert_eq!(object["_source"], "profileUrl");
    }

    #[test]
    fn user_data_entry_serializes_type_tag() {
        let entry = UserDataEntry::new(EntryKind::Work, "Works at Example Corp");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "work");
        assert!(value["icon"].is_null());
    }
}
