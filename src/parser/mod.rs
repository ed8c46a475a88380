use scraper::Html;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::config::ScrapingConfig;
use crate::error::{ScrapeError, ScrapeResult};
use crate::record::{EntryKind, UserDataEntry};
use crate::utils::fnv1a_64;

pub mod heuristics;
pub mod http_client;

use http_client::HttpClient;

const PLACEHOLDER_IMAGE_BASE: &str = "https://placehold.co/600x400/png";
const FALLBACK_NAME: &str = "Facebook User";

/// Raw parse result before normalization.
///
/// Carries the content fields only; provenance (`_fetchedAt`, `_source`)
/// is stamped by `ProfileRecord::from_parsed`. Absent fields are `None`
/// or empty, never omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedProfile {
    pub name: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub images: Vec<String>,
    pub user_id: Option<String>,
    pub profile_url: Option<String>,
    pub user_data: Vec<UserDataEntry>,
}

/// Parses public profile HTML into a normalized record.
///
/// Supports parsing from a URL (online mode fetches, offline mode
/// synthesizes deterministically) and parsing from an HTML string
/// (offline-safe, used by embedded-document jobs and tests).
pub struct ProfileParser {
    online: bool,
    http: Option<HttpClient>,
}

impl ProfileParser {
    /// Build a parser for the given fetch configuration.
    ///
    /// The HTTP client is only constructed in online mode; failure to
    /// build it surfaces as a configuration error.
    pub fn new(config: &ScrapingConfig) -> ScrapeResult<Self> {
        let http = if config.online {
            Some(HttpClient::new(config)?)
        } else {
            None
        };
        Ok(Self { online: config.online, http })
    }

    /// Parse a profile addressed by URL.
    ///
    /// Offline mode never touches the network and cannot fail; online
    /// mode fetches the page and parses the body.
    pub fn parse_profile_from_url(&self, url: &str) -> ScrapeResult<ParsedProfile> {
        if !self.online {
            info!("Offline mode: synthesizing profile for {}", url);
            return Ok(self.synthesize_offline(url));
        }

        let http = self.http.as_ref().ok_or_else(|| {
            ScrapeError::configuration("online mode requested but no HTTP client is available")
        })?;
        let html = http.get_text(url)?;
        Ok(self.parse_profile_html(&html, Some(url)))
    }

    /// Parse a profile from an HTML document.
    ///
    /// Every heuristic fails soft, so this never errors: fields without a
    /// match come back absent.
    pub fn parse_profile_html(&self, html: &str, base_url: Option<&str>) -> ParsedProfile {
        let document = Html::parse_document(html);

        let profile = ParsedProfile {
            name: heuristics::extract_name(&document),
            profile_image: heuristics::extract_profile_image(&document),
            cover_image: heuristics::extract_cover_image(&document),
            images: heuristics::extract_gallery(&document),
            user_id: heuristics::extract_user_id(base_url, html),
            profile_url: heuristics::extract_profile_url(&document, base_url),
            user_data: heuristics::extract_user_data(&document),
        };

        debug!(
            "Parsed document: name={:?}, {} images, {} detail entries",
            profile.name,
            profile.images.len(),
            profile.user_data.len()
        );
        profile
    }

    /// Deterministic, offline-safe profile derived from the URL shape.
    ///
    /// Identical input always yields identical output, which keeps runs
    /// reproducible without network access.
    fn synthesize_offline(&self, url: &str) -> ParsedProfile {
        let last_segment = Url::parse(url)
            .ok()
            .and_then(|parsed| {
                parsed
                    .path_segments()
                    .and_then(|segments| segments.filter(|s| !s.is_empty()).last().map(str::to_string))
            })
            .unwrap_or_else(|| "profile.php".to_string());

        let name_guess = if last_segment.is_empty() || last_segment == "profile.php" {
            FALLBACK_NAME.to_string()
        } else {
            title_case(&last_segment.replace('.', " ").replace('-', " "))
        };

        let user_id = heuristics::user_id_from_url(url)
            .unwrap_or_else(|| (fnv1a_64(url) % 10_000_000).to_string());

        ParsedProfile {
            name: Some(name_guess.clone()),
            profile_image: Some(format!("{PLACEHOLDER_IMAGE_BASE}?text={name_guess} Profile")),
            cover_image: Some(format!("{PLACEHOLDER_IMAGE_BASE}?text={name_guess} Cover")),
            images: (1..=5)
                .map(|i| format!("{PLACEHOLDER_IMAGE_BASE}?text={name_guess} {i}"))
                .collect(),
            user_id: Some(user_id),
            profile_url: Some(url.to_string()),
            user_data: vec![
                UserDataEntry::new(
                    EntryKind::Work,
                    format!("Works at Example Corp ({name_guess})"),
                ),
                UserDataEntry::new(
                    EntryKind::Education,
                    "Studied Computer Science at Example University",
                ),
            ],
        }
    }
}

/// Capitalize the first letter of each whitespace-separated word
fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
