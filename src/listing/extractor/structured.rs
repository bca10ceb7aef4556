use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::{pages_from_comment, resolve_link};
use crate::error::ParseError;
use crate::listing::record::{PaperRecord, UNKNOWN};

pub fn extract(html: &str, base: &Url) -> Result<Vec<PaperRecord>, ParseError> {
    let doc = Html::parse_document(html);

    if doc.select(&selector("dl")?).next().is_none() {
        return Err(ParseError::NotAListing("no <dl> element"));
    }

    let abstract_link = selector("a[title=\"Abstract\"]")?;
    let title = selector("div.list-title.mathjax")?;
    let authors = selector("div.list-authors")?;
    let anchor = selector("a")?;
    let comments = selector("div.list-comments")?;

    // zip stops at the shorter of the two lists
    let records = doc
        .select(&selector("dt")?)
        .zip(doc.select(&selector("dd")?))
        .map(|(dt, dd)| PaperRecord {
            link: extract_link(dt, &abstract_link, base),
            title: extract_title(dd, &title),
            authors: extract_authors(dd, &authors, &anchor),
            pages: extract_pages(dd, &comments),
        })
        .collect();
    Ok(records)
}

fn selector(s: &'static str) -> Result<Selector, ParseError> {
    Selector::parse(s).map_err(|_| ParseError::Selector(s))
}

fn extract_link(dt: ElementRef<'_>, sel: &Selector, base: &Url) -> String {
    dt.select(sel)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| resolve_link(base, href))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn extract_title(dd: ElementRef<'_>, sel: &Selector) -> String {
    let Some(node) = dd.select(sel).next() else { return UNKNOWN.to_string() };
    let text = node.text().collect::<String>();
    let text = text.trim();
    text.strip_prefix("Title:").unwrap_or(text).trim().to_string()
}

// A present-but-empty container yields "", the normalizer maps it to the sentinel.
fn extract_authors(dd: ElementRef<'_>, container: &Selector, anchor: &Selector) -> String {
    let Some(node) = dd.select(container).next() else { return UNKNOWN.to_string() };
    node.select(anchor)
        .map(|a| a.text().collect::<String>().trim().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn extract_pages(dd: ElementRef<'_>, sel: &Selector) -> String {
    let Some(node) = dd.select(sel).next() else { return UNKNOWN.to_string() };
    let text = node.text().collect::<String>();
    pages_from_comment(&text).unwrap_or_else(|| UNKNOWN.to_string())
}
