use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::utils::fnv1a_64;

pub mod paginator;

use paginator::Paginator;

static NON_ALNUM_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]+").unwrap());

/// A candidate profile URL for a searched name.
///
/// Candidates are consumed immediately by the parser and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub name: String,
    pub profile_url: String,
}

/// Turns a human name into candidate public profile URLs.
///
/// Offline mode generates deterministic, realistic profile URLs. Online
/// mode drives the paginator over a stubbed per-page fetch; it is kept
/// offline-safe on purpose, since genuine search-engine integration is
/// out of scope.
pub struct ProfileMatcher {
    online: bool,
    scrolls_amount: usize,
}

impl ProfileMatcher {
    pub fn new(online: bool, scrolls_amount: usize) -> Self {
        Self {
            online,
            scrolls_amount: scrolls_amount.max(1),
        }
    }

    /// Return at most `limit` candidates for a name, in deterministic order.
    ///
    /// An empty or whitespace-only name yields no candidates.
    pub fn search_profiles_by_name(&self, name: &str, limit: usize) -> Vec<Candidate> {
        let name = name.trim();
        if name.is_empty() {
            return Vec::new();
        }
        info!("ProfileMatcher searching for: {} (limit={})", name, limit);

        if !self.online {
            let slug = slugify(name);
            let mut candidates = vec![
                Candidate {
                    name: name.to_string(),
                    profile_url: format!("https://www.facebook.com/{slug}"),
                },
                Candidate {
                    name: name.to_string(),
                    profile_url: format!("https://www.facebook.com/{slug}.official"),
                },
                Candidate {
                    name: name.to_string(),
                    profile_url: format!(
                        "https://www.facebook.com/profile.php?id={}",
                        stable_id(name)
                    ),
                },
            ];
            candidates.truncate(limit);
            return candidates;
        }

        // Online stub: accumulate page variations, unique by URL, first
        // seen wins, until the limit is reached or pages run out.
        let mut paginator = Paginator::new(|page| online_fetch_stub(name, page));
        let pages = paginator.collect_pages(self.scrolls_amount);

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        'pages: for page in pages {
            for url in page {
                if seen.insert(url.clone()) {
                    candidates.push(Candidate {
                        name: name.to_string(),
                        profile_url: url,
                    });
                    if candidates.len() >= limit {
                        break 'pages;
                    }
                }
            }
        }
        debug!("Collected {} unique candidate urls for '{}'", candidates.len(), name);
        candidates
    }
}

/// Lower-case the name and collapse every run of non-alphanumeric
/// characters to a single dot, facebook-username style.
fn slugify(name: &str) -> String {
    let slug = NON_ALNUM_RUN.replace_all(name.trim(), ".").to_lowercase();
    let slug = slug.trim_matches('.');
    if slug.is_empty() {
        "user".to_string()
    } else {
        slug.to_string()
    }
}

/// Stable numeric id for a name, reduced to a plausible profile-id range
fn stable_id(name: &str) -> u64 {
    fnv1a_64(&format!("fb::{name}")) % 100_000_000
}

/// Deterministic per-page URL variations used by the online stub
fn online_fetch_stub(name: &str, page: usize) -> Vec<String> {
    let base = slugify(name);
    vec![
        format!("https://www.facebook.com/{base}"),
        format!("https://www.facebook.com/{base}.{page}"),
        format!(
            "https://www.facebook.com/profile.php?id={}",
            stable_id(name) + page as u64
        ),
    ]
}
