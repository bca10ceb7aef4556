use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use super::{pages_from_comment, resolve_link};
use crate::error::ParseError;
use crate::listing::record::PaperRecord;

// One entry of the listing rendered to markdown:
//
//   [1] [arXiv:2501.00001](https://arxiv.org/abs/2501.00001) [pdf](...) [other](...)
//   Title: Learning to Plan
//   Authors: [Alice Smith](...), [Bob Jones](...)     <- optional, label optional
//   Comments: 14 pages, 3 figures                     <- optional
//
// Blank lines may separate the lines of an entry.
// Five named groups: id, link, title, authors, comments.
const ENTRY: &str = concat!(
    r"^[ \t]*\[\d+\][ \t]*\[arXiv:(?P<id>[^\]\s]+)\]\((?P<link>[^)\s]+)\)[^\n]*",
    r"\n(?:[ \t]*\n)*[ \t]*Title:[ \t]*(?P<title>[^\n]*)",
    r"(?:\n(?:[ \t]*\n)*[ \t]*(?P<authors>(?:Authors?:|\[)[^\n]*))?",
    r"(?:\n(?:[ \t]*\n)*[ \t]*Comments:(?P<comments>[^\n]*))?",
);

const HEADER: &str = r"(?m)^[ \t]*\[\d+\][ \t]*\[arXiv:";

const ENTRY_MARKER: &str = "[arXiv:";

fn entry_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ENTRY).expect("entry pattern compiles"))
}

fn header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(HEADER).expect("header pattern compiles"))
}

fn bracketed_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]").expect("bracket pattern compiles"))
}

// Each block runs from one entry header to the next, so an entry can never
// borrow lines from its neighbour.
fn entry_blocks(text: &str) -> Vec<&str> {
    let starts: Vec<usize> = header_re().find_iter(text).map(|m| m.start()).collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .collect()
}

/// Missing pieces come back as `""`; the normalizer owns the sentinels.
pub fn extract(text: &str, base: &Url) -> Result<Vec<PaperRecord>, ParseError> {
    if !text.contains(ENTRY_MARKER) {
        return Err(ParseError::NotAListing("no arXiv entry marker"));
    }

    let records = entry_blocks(text)
        .into_iter()
        .filter_map(|block| entry_re().captures(block))
        .map(|caps| {
            let raw_link = caps["link"].trim();
            let link = resolve_link(base, raw_link).unwrap_or_else(|| raw_link.to_string());

            let title = caps["title"].trim();

            let authors = caps
                .name("authors")
                .map(|block| {
                    bracketed_re()
                        .captures_iter(block.as_str())
                        .map(|a| a[1].trim().to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();

            let pages = caps
                .name("comments")
                .and_then(|m| pages_from_comment(m.as_str()))
                .unwrap_or_default();

            PaperRecord::new(title, authors, link, pages)
        })
        .collect();
    Ok(records)
}
