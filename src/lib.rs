//! fbscrape - public Facebook profile scraping with multi-format export
//!
//! This library provides the core functionality for fbscrape:
//! - Heuristic extraction of normalized profile records from public
//!   profile HTML (fetched or supplied inline)
//! - Deterministic, offline-safe name-to-candidate-URL matching
//! - Sequential job orchestration with per-job failure isolation
//! - Export of deduplicated record sets to JSON, CSV, and XML

pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod logging;
pub mod matcher;
pub mod parser;
pub mod record;
pub mod utils;

// Re-export main types for convenience
pub use crate::config::{JobInputs, Settings};
pub use crate::core::ScrapeSession;
pub use crate::error::{ScrapeError, ScrapeResult};
pub use crate::export::{ExportFormat, ExportManager};
pub use crate::matcher::{Candidate, ProfileMatcher};
pub use crate::parser::{ParsedProfile, ProfileParser};
pub use crate::record::{ProfileRecord, RecordSource};
