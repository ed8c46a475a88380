use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ScrapeError, ScrapeResult};

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Run settings loaded from a JSON settings file.
///
/// Unknown fields are ignored and missing fields fall back to defaults,
/// so a minimal `{"scrollsAmount": 2}` file is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Page count used by the online matcher (one "scroll" per page)
    pub scrolls_amount: usize,
    pub request_timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scrolls_amount: 1,
            request_timeout_seconds: 15,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ScrapeResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ScrapeError::InvalidSettings {
            path: path.display().to_string(),
        })?;
        let settings: Settings =
            serde_json::from_str(&content).map_err(|_| ScrapeError::InvalidSettings {
                path: path.display().to_string(),
            })?;

        settings.validate()?;
        info!("Settings loaded from {}", path.display());
        Ok(settings)
    }

    /// Validate settings values
    pub fn validate(&self) -> ScrapeResult<()> {
        if self.request_timeout_seconds == 0 {
            return Err(ScrapeError::configuration("requestTimeoutSeconds must be > 0"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ScrapeError::configuration("userAgent must not be empty"));
        }
        Ok(())
    }
}

/// An inline HTML document to parse without fetching
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedHtmlJob {
    pub html: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_per_name_limit() -> usize {
    3
}

/// Jobs descriptor loaded from the inputs JSON file.
///
/// All three job lists are optional; an empty descriptor is a valid
/// (if pointless) run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobInputs {
    pub profile_urls: Vec<String>,
    pub names: Vec<String>,
    pub per_name_limit: usize,
    pub embedded_html_profiles: Vec<EmbeddedHtmlJob>,
}

impl Default for JobInputs {
    fn default() -> Self {
        Self {
            profile_urls: Vec::new(),
            names: Vec::new(),
            per_name_limit: default_per_name_limit(),
            embedded_html_profiles: Vec::new(),
        }
    }
}

impl JobInputs {
    /// Load job inputs from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ScrapeResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ScrapeError::InvalidInputs {
            path: path.display().to_string(),
        })?;
        let inputs: JobInputs =
            serde_json::from_str(&content).map_err(|_| ScrapeError::InvalidInputs {
                path: path.display().to_string(),
            })?;

        info!(
            "Inputs loaded from {}: {} urls, {} names, {} embedded documents",
            path.display(),
            inputs.profile_urls.len(),
            inputs.names.len(),
            inputs.embedded_html_profiles.len()
        );
        Ok(inputs)
    }

    pub fn job_count(&self) -> usize {
        self.profile_urls.len() + self.names.len() + self.embedded_html_profiles.len()
    }
}

/// Fetch configuration handed to the parser
#[derive(Debug, Clone)]
pub struct ScrapingConfig {
    pub online: bool,
    pub request_timeout_seconds: u64,
    pub user_agent: String,
}

impl ScrapingConfig {
    pub fn from_settings(settings: &Settings, online: bool) -> Self {
        Self {
            online,
            request_timeout_seconds: settings.request_timeout_seconds,
            user_agent: settings.user_agent.clone(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub output_directory: PathBuf,
}
