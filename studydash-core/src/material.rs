//! Bookmarked study resources.

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Icon shown when a material's URL has no resolvable host.
pub const PLACEHOLDER_ICON: &str = "/placeholder.svg?height=32&width=32";

/// A bookmarked study link, persisted under
/// [`MATERIALS_KEY`](crate::codec::MATERIALS_KEY).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyMaterial {
    /// Stable identifier. Seed entries use fixed names, added ones UUID text.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Absolute URL.
    pub url: String,
    /// Optional one-line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display position; dense `0..n-1` across the collection.
    #[serde(default)]
    pub order: usize,
}

impl StudyMaterial {
    /// Builds a new material with a fresh identifier.
    #[must_use]
    pub fn new(title: String, url: String, description: Option<String>, order: usize) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            title,
            url,
            description,
            order,
        }
    }

    /// Returns `true` for the built-in entries that cannot be deleted.
    #[must_use]
    pub fn is_seed(&self) -> bool {
        is_seed_id(&self.id)
    }
}

const SEEDS: [(&str, &str, &str, &str); 4] = [
    (
        "youtube",
        "YouTube",
        "https://youtube.com",
        "Educational videos and tutorials",
    ),
    (
        "chatgpt",
        "ChatGPT",
        "https://chat.openai.com",
        "AI assistant for learning",
    ),
    (
        "docs",
        "Google Docs",
        "https://docs.google.com",
        "Document creation and collaboration",
    ),
    (
        "scholar",
        "Google Scholar",
        "https://scholar.google.com",
        "Academic papers and research",
    ),
];

/// The four built-in materials, in their initial order.
#[must_use]
pub fn default_materials() -> Vec<StudyMaterial> {
    SEEDS
        .iter()
        .enumerate()
        .map(|(order, (id, title, url, description))| StudyMaterial {
            id: (*id).to_string(),
            title: (*title).to_string(),
            url: (*url).to_string(),
            description: Some((*description).to_string()),
            order,
        })
        .collect()
}

/// Returns `true` if `id` names one of the built-in materials.
#[must_use]
pub fn is_seed_id(id: &str) -> bool {
    SEEDS.iter().any(|(seed, ..)| *seed == id)
}

/// Prefixes `https://` unless the input already starts with `http`.
#[must_use]
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Derives the favicon lookup URL for a material's link.
///
/// Falls back to [`PLACEHOLDER_ICON`] when the URL does not parse or has
/// no host.
#[must_use]
pub fn favicon_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .map_or_else(
            || PLACEHOLDER_ICON.to_string(),
            |host| format!("https://www.google.com/s2/favicons?domain={host}&sz=32"),
        )
}

/// Returns the host portion of a URL, if any.
#[must_use]
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url).ok()?.host_str().map(str::to_owned)
}
