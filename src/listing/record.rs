use serde::{Deserialize, Serialize};

pub const UNKNOWN: &str = "Unknown";
pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_PAGES: &str = "Unknown Pages";

/// CSV column order; matches the field order of [`PaperRecord`].
pub const COLUMNS: [&str; 4] = ["title", "authors", "link", "pages"];

/// One listing entry. Field order is the serialized column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub title: String,
    pub authors: String,
    pub link: String,
    pub pages: String,
}

impl PaperRecord {
    pub fn new(
        title: impl Into<String>,
        authors: impl Into<String>,
        link: impl Into<String>,
        pages: impl Into<String>,
    ) -> Self {
        PaperRecord { title: title.into(), authors: authors.into(), link: link.into(), pages: pages.into() }
    }
}
