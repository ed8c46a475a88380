use thiserror::Error;

/// Error types for the scraper core
#[derive(Error, Debug)]
pub enum ScrapeError {
    // Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid settings file: {path}")]
    InvalidSettings { path: String },

    #[error("Invalid inputs file: {path}")]
    InvalidInputs { path: String },

    // Network errors
    #[error("Fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("HTTP request failed: {url} - {status}")]
    HttpStatus { url: String, status: u16 },

    // Export errors
    #[error("Export error: {message}")]
    Export { message: String },

    #[error("File write failed: {path}")]
    FileWrite { path: String },

    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },
}

impl ScrapeError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create a fetch error
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch { url: url.into(), message: message.into() }
    }

    /// Create an export error
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export { message: message.into() }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Configuration { .. } | Self::InvalidSettings { .. } | Self::InvalidInputs { .. } => {
                "configuration"
            }
            Self::Fetch { .. } | Self::HttpStatus { .. } => "network",
            Self::Export { .. } | Self::FileWrite { .. } | Self::UnsupportedFormat { .. } => "export",
        }
    }
}

/// Result type alias for scraper operations
pub type ScrapeResult<T> = std::result::Result<T, ScrapeError>;
