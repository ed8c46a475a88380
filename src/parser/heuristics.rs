//! Per-field extraction heuristics for public profile documents.
//!
//! Each field is resolved by an ordered chain of independent extractors;
//! the first one to produce a value wins and the rest are skipped. Every
//! extractor fails soft: no match means an absent field, never an error.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::record::{EntryKind, UserDataEntry, MAX_GALLERY_IMAGES, MAX_USER_DATA_ENTRIES};

const OG_TITLE_KEYS: &[&str] = &["og:title"];
const OG_IMAGE_KEYS: &[&str] = &["og:image", "og:image:url"];
const OG_URL_KEYS: &[&str] = &["og:url", "al:ios:url", "al:android:url"];

const WORK_KEYWORDS: &[&str] = &["works at", "worked at", "founder", "ceo"];
const EDUCATION_KEYWORDS: &[&str] =
    &["studied", "education", "university", "college", "high school"];

static META_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("meta").unwrap());
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static H1_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());
static DETAIL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("li, div, span").unwrap());

/// Cover photo selectors seen on public profile pages, in priority order
static COVER_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        "image.cover",
        "img.cover",
        "[data-imgperflogname='profileCoverPhoto'] img",
        "img[alt*='cover']",
    ]
    .iter()
    .map(|pattern| Selector::parse(pattern).unwrap())
    .collect()
});

// "entity_id":"4" and entity_id:'4' quoting styles seen in inline script JSON
static ENTITY_ID_QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""entity_id"\s*:\s*"(\d+)""#).unwrap());
static ENTITY_ID_LOOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"entity_id["']\s*:\s*["'](\d+)["']"#).unwrap());

/// First non-empty content of a meta tag whose `property` or `name`
/// attribute matches one of `keys`, in key order.
fn first_meta(document: &Html, keys: &[&str]) -> Option<String> {
    for key in keys {
        for meta in document.select(&META_SELECTOR) {
            let element = meta.value();
            let matches =
                element.attr("property") == Some(*key) || element.attr("name") == Some(*key);
            if !matches {
                continue;
            }
            if let Some(content) = element.attr("content") {
                let content = content.trim();
                if !content.is_empty() {
                    return Some(content.to_string());
                }
            }
        }
    }
    None
}

fn name_from_og_title(document: &Html) -> Option<String> {
    first_meta(document, OG_TITLE_KEYS)
}

fn name_from_title_tag(document: &Html) -> Option<String> {
    let title = document.select(&TITLE_SELECTOR).next()?;
    let text = title.text().collect::<String>().trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn name_from_first_heading(document: &Html) -> Option<String> {
    let heading = document.select(&H1_SELECTOR).next()?;
    let text = element_text(heading);
    (!text.is_empty()).then_some(text)
}

/// Display name: og:title, else the document title, else the first h1
pub fn extract_name(document: &Html) -> Option<String> {
    let extractors: &[fn(&Html) -> Option<String>] =
        &[name_from_og_title, name_from_title_tag, name_from_first_heading];
    extractors.iter().find_map(|extract| extract(document))
}

/// Profile image from the open-graph image tags
pub fn extract_profile_image(document: &Html) -> Option<String> {
    first_meta(document, OG_IMAGE_KEYS)
}

/// Cover image: first element matching a known cover selector that
/// carries a non-empty `src`
pub fn extract_cover_image(document: &Html) -> Option<String> {
    for selector in COVER_SELECTORS.iter() {
        for element in document.select(selector) {
            if let Some(src) = element.value().attr("src") {
                if !src.is_empty() {
                    return Some(src.to_string());
                }
            }
        }
    }
    None
}

/// Image gallery: every `<img src>` except sprites and animated icons,
/// deduplicated in first-seen order, capped.
pub fn extract_gallery(document: &Html) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut images = Vec::new();

    for img in document.select(&IMG_SELECTOR) {
        let Some(src) = img.value().attr("src") else {
            continue;
        };
        if src.is_empty() || src.contains(".gif") || src.contains("sprite") {
            continue;
        }
        if seen.insert(src.to_string()) {
            images.push(src.to_string());
            if images.len() >= MAX_GALLERY_IMAGES {
                break;
            }
        }
    }

    images
}

fn user_id_from_query(base_url: &str) -> Option<String> {
    let parsed = Url::parse(base_url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
        .filter(|value| is_digits(value))
}

fn user_id_from_path(base_url: &str) -> Option<String> {
    let parsed = Url::parse(base_url).ok()?;
    let last = parsed.path_segments()?.filter(|segment| !segment.is_empty()).last()?;
    is_digits(last).then(|| last.to_string())
}

fn user_id_from_entity_id(raw_html: &str) -> Option<String> {
    ENTITY_ID_QUOTED
        .captures(raw_html)
        .or_else(|| ENTITY_ID_LOOSE.captures(raw_html))
        .map(|captures| captures[1].to_string())
}

/// User id: numeric `id` query parameter, else an all-digits final path
/// segment, else an `entity_id` fragment in the raw document text.
pub fn extract_user_id(base_url: Option<&str>, raw_html: &str) -> Option<String> {
    base_url
        .and_then(user_id_from_query)
        .or_else(|| base_url.and_then(user_id_from_path))
        .or_else(|| user_id_from_entity_id(raw_html))
}

/// User id derived from the URL shape only (offline synthesis path)
pub fn user_id_from_url(url: &str) -> Option<String> {
    user_id_from_query(url).or_else(|| user_id_from_path(url))
}

/// Canonical profile URL: open-graph / app-link URL tags, else the
/// originally supplied base URL
pub fn extract_profile_url(document: &Html, base_url: Option<&str>) -> Option<String> {
    first_meta(document, OG_URL_KEYS).or_else(|| base_url.map(str::to_string))
}

/// Work and education entries: scan list, block, and inline text elements
/// for known keywords, tagging each hit. Work keywords win when a text
/// fragment matches both sets. Stops once the cap is reached.
pub fn extract_user_data(document: &Html) -> Vec<UserDataEntry> {
    let mut entries = Vec::new();

    for element in document.select(&DETAIL_SELECTOR) {
        let text = element_text(element);
        if text.is_empty() {
            continue;
        }

        let lowered = text.to_lowercase();
        let is_work = WORK_KEYWORDS.iter().any(|keyword| lowered.contains(keyword));
        let is_education = EDUCATION_KEYWORDS.iter().any(|keyword| lowered.contains(keyword));

        if is_work || is_education {
            let kind = if is_work { EntryKind::Work } else { EntryKind::Education };
            entries.push(UserDataEntry::new(kind, text));
        }
        if entries.len() >= MAX_USER_DATA_ENTRIES {
            break;
        }
    }

    entries
}

fn element_text(element: scraper::ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}
