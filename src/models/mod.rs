use serde::{Deserialize, Serialize};

pub mod dialogue;
pub mod openai;
pub mod tmdb;

pub use dialogue::DialogueMemory;

/// Who produced a turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One utterance in a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Catalog metadata for one extracted title
///
/// The record itself is always present. Missing data is expressed through
/// `None` fields so "not found" renders the same way as a lookup failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetadataRecord {
    pub queried_title: String,
    pub canonical_title: Option<String>,
    pub poster_url: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub rating: Option<f64>,
    pub catalog_id: Option<u64>,
}

impl MetadataRecord {
    /// Record carrying only the queried title
    pub fn placeholder(queried_title: impl Into<String>) -> Self {
        Self {
            queried_title: queried_title.into(),
            canonical_title: None,
            poster_url: None,
            overview: None,
            release_date: None,
            rating: None,
            catalog_id: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.canonical_title.is_none()
            && self.poster_url.is_none()
            && self.overview.is_none()
            && self.release_date.is_none()
            && self.rating.is_none()
            && self.catalog_id.is_none()
    }
}

/// Model reply plus the records derived from it, in extraction order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedResponse {
    pub raw_text: String,
    pub records: Vec<MetadataRecord>,
}

/// Catalog entry as returned by a metadata provider, before record assembly
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub rating: Option<f64>,
}
