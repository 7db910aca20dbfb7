use serde::{Deserialize, Serialize};

/// Characters of analysis text shown on a history card.
pub const DEFAULT_EXCERPT_CHARS: usize = 120;

/// Appended to every excerpt, including ones that were not cut short.
pub const TRUNCATION_MARKER: &str = "...";

/// Root under which the service publishes uploaded images.
pub const DEFAULT_STATIC_PREFIX: &str = "/static/";

/// One past analysis as listed by the service.
///
/// Created server-side by an analysis, read in bulk, deleted by id. The
/// client never edits one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub date: String,
    pub image_path: String,
    pub analysis: String,
}

impl HistoryRecord {
    /// Image URL path: the static prefix and the record's relative path
    /// joined by exactly one slash.
    pub fn image_src(&self, static_prefix: &str) -> String {
        format!(
            "{}/{}",
            static_prefix.trim_end_matches('/'),
            self.image_path.trim_start_matches('/')
        )
    }

    /// First `limit` characters of the analysis followed by [`TRUNCATION_MARKER`].
    pub fn excerpt(&self, limit: usize) -> String {
        let mut excerpt: String = self.analysis.chars().take(limit).collect();
        excerpt.push_str(TRUNCATION_MARKER);
        excerpt
    }
}

/// Everything a history card displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryCard {
    pub id: i64,
    pub image_src: String,
    pub date: String,
    pub excerpt: String,
}

impl HistoryCard {
    pub fn new(record: &HistoryRecord, static_prefix: &str, excerpt_chars: usize) -> Self {
        Self {
            id: record.id,
            image_src: record.image_src(static_prefix),
            date: record.date.clone(),
            excerpt: record.excerpt(excerpt_chars),
        }
    }
}
