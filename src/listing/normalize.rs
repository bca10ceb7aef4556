use crate::listing::record::{PaperRecord, UNKNOWN, UNKNOWN_PAGES, UNKNOWN_TITLE};

/// Single sentinel policy for both extraction strategies. Idempotent.
pub fn normalize(record: PaperRecord) -> PaperRecord {
    PaperRecord {
        title: or_sentinel(collapse_whitespace(&record.title), &[UNKNOWN], UNKNOWN_TITLE),
        authors: or_sentinel(collapse_whitespace(&record.authors), &[], UNKNOWN),
        link: or_sentinel(record.link.trim().to_string(), &[], UNKNOWN),
        pages: or_sentinel(collapse_whitespace(&record.pages), &[UNKNOWN], UNKNOWN_PAGES),
    }
}

fn or_sentinel(value: String, aliases: &[&str], sentinel: &str) -> String {
    if value.is_empty() || aliases.contains(&value.as_str()) { sentinel.to_string() } else { value }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
