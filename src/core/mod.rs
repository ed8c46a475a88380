use tracing::{error, info, warn};

use crate::config::{JobInputs, ScrapingConfig, Settings};
use crate::error::ScrapeResult;
use crate::matcher::ProfileMatcher;
use crate::parser::ProfileParser;
use crate::record::{dedup_records, ProfileRecord, RecordSource};

/// One scraping run: owns the parser and matcher and processes a jobs
/// descriptor strictly sequentially.
///
/// Per-job failures are logged and skipped; they never abort the run.
pub struct ScrapeSession {
    parser: ProfileParser,
    matcher: ProfileMatcher,
}

impl ScrapeSession {
    /// Build a session from settings and the online/offline switch
    pub fn new(settings: &Settings, online: bool) -> ScrapeResult<Self> {
        let scraping = ScrapingConfig::from_settings(settings, online);
        Ok(Self {
            parser: ProfileParser::new(&scraping)?,
            matcher: ProfileMatcher::new(online, settings.scrolls_amount),
        })
    }

    /// Process every job and return the deduplicated record sequence.
    ///
    /// Jobs run in input order: direct profile URLs, then name searches,
    /// then embedded HTML documents. Duplicate profiles keep their first
    /// occurrence.
    pub fn run(&self, inputs: &JobInputs) -> Vec<ProfileRecord> {
        let mut results: Vec<ProfileRecord> = Vec::new();

        for url in &inputs.profile_urls {
            match self.parser.parse_profile_from_url(url) {
                Ok(parsed) => {
                    info!("Parsed profile: {}", parsed.name.as_deref().unwrap_or(url));
                    results.push(ProfileRecord::from_parsed(parsed, RecordSource::ProfileUrl));
                }
                Err(e) => {
                    error!("Failed parsing profile URL {}: {} ({})", url, e, e.category());
                }
            }
        }

        for name in &inputs.names {
            let candidates = self.matcher.search_profiles_by_name(name, inputs.per_name_limit);
            info!("Found {} candidates for '{}'", candidates.len(), name);
            for candidate in candidates {
                match self.parser.parse_profile_from_url(&candidate.profile_url) {
                    Ok(parsed) => {
                        results.push(ProfileRecord::from_parsed(parsed, RecordSource::NameSearch));
                    }
                    Err(e) => {
                        warn!("Candidate parse failed for {}: {}", candidate.profile_url, e);
                    }
                }
            }
        }

        for document in &inputs.embedded_html_profiles {
            let parsed = self
                .parser
                .parse_profile_html(&document.html, document.base_url.as_deref());
            info!(
                "Parsed embedded HTML for baseUrl={}",
                document.base_url.as_deref().unwrap_or("-")
            );
            results.push(ProfileRecord::from_parsed(parsed, RecordSource::EmbeddedHtml));
        }

        if results.is_empty() {
            warn!("No results produced. Check inputs or enable online mode for live fetches.");
        }

        let total = results.len();
        let deduped = dedup_records(results);
        if deduped.len() < total {
            info!("Deduplication removed {} duplicate records", total - deduped.len());
        }
        deduped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmbeddedHtmlJob;

    fn offline_session() -> ScrapeSession {
        ScrapeSession::new(&Settings::default(), false).unwrap()
    }

    #[test]
    fn run_processes_all_job_kinds_in_order() {
        let inputs = JobInputs {
            profile_urls: vec!["https://www.facebook.com/ada.lovelace".to_string()],
            names: vec!["Grace Hopper".to_string()],
            per_name_limit: 2,
            embedded_html_profiles: vec![EmbeddedHtmlJob {
                html: r#"<meta property="og:title" content="Jane Doe"/>
                         <meta property="og:url" content="https://www.facebook.com/jane.doe"/>"#
                    .to_string(),
                base_url: None,
            }],
        };

        let records = offline_session().run(&inputs);
        // 1 direct + 2 candidates + 1 embedded, all distinct profiles
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].source, RecordSource::ProfileUrl);
        assert_eq!(records[1].source, RecordSource::NameSearch);
        assert_eq!(records[3].source, RecordSource::EmbeddedHtml);
        assert_eq!(records[3].name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn run_dedups_across_job_kinds() {
        // The direct URL and the first offline candidate for the same
        // name resolve to the same profile URL.
        let inputs = JobInputs {
            profile_urls: vec!["https://www.facebook.com/grace.hopper".to_string()],
            names: vec!["Grace Hopper".to_string()],
            per_name_limit: 1,
            embedded_html_profiles: Vec::new(),
        };

        let records = offline_session().run(&inputs);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source, RecordSource::ProfileUrl);
    }

    #[test]
    fn empty_inputs_yield_empty_run() {
        let records = offline_session().run(&JobInputs::default());
        assert!(records.is_empty());
    }

    #[test]
    fn empty_names_are_skipped() {
        let inputs = JobInputs {
            profile_urls: Vec::new(),
            names: vec!["   ".to_string()],
            per_name_limit: 3,
            embedded_html_profiles: Vec::new(),
        };
        assert!(offline_session().run(&inputs).is_empty());
    }
}
