use url::Url;

use crate::error::ParseError;
use crate::listing::record::PaperRecord;

mod patterned;
mod structured;

pub use patterned::extract as extract_patterned;
pub use structured::extract as extract_structured;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// dt/dd pairs of the HTML listing
    #[default]
    #[value(name = "structured")] Structured,
    /// regex over the listing rendered as markdown text
    #[value(name = "patterned")] Patterned,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Structured => "structured",
            Strategy::Patterned => "patterned",
        }
    }
}

pub fn extract(strategy: Strategy, content: &str, base: &Url) -> Result<Vec<PaperRecord>, ParseError> {
    match strategy {
        Strategy::Structured => extract_structured(content, base),
        Strategy::Patterned => extract_patterned(content, base),
    }
}

/// Resolves `href` against the site origin of `base`. Blank hrefs count as missing.
pub(crate) fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base.join("/").and_then(|origin| origin.join(href)).ok().map(String::from)
}

/// `"Comments: 14 pages, 3 figures"` -> `"14 pages"`.
pub(crate) fn pages_from_comment(text: &str) -> Option<String> {
    let (before, _) = text.split_once("pages")?;
    let count = before.split_whitespace().last()?;
    Some(format!("{} pages", count))
}
