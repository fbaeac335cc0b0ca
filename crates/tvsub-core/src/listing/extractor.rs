//! Listing-page extraction.
//!
//! Turns a tracker search-result page into an ordered, deduplicated list of
//! [`CandidateRecord`]s. Extraction is best-effort: an empty page or one that
//! fails to parse yields no records rather than an error, and a row missing
//! its description, download link or size still produces a partial record.

use std::collections::HashSet;

use crate::domain::CandidateRecord;
use crate::ports::{DocumentParser, DocumentQuery, NodePattern};

use super::site::TrackerSite;

/// Path-and-query marker of a torrent detail link.
const DETAIL_MARKER: &str = "details.php?id=";

/// Unit tokens that identify the size cell.
const SIZE_UNITS: [&str; 3] = ["GB", "MB", "KB"];

// `#outer > div > table tr`
const OUTER: NodePattern = NodePattern::id("outer");
const CONTAINER_DIV: NodePattern = NodePattern::tag("div");
const LISTING_TABLE: NodePattern = NodePattern::tag("table");
const ROW: NodePattern = NodePattern::tag("tr");

const DETAIL_LINK: NodePattern = NodePattern::tag("a").with_attr_containing("href", "details.php?id");
const SMALL_DESCR: NodePattern = NodePattern::class("torrent-smalldescr");
const TITLED_SPAN: NodePattern = NodePattern::tag("span").with_attr("title");
const DOWNLOAD_LINK: NodePattern = NodePattern::tag("a").with_attr_containing("href", "download.php");
const CELL: NodePattern = NodePattern::tag("td");

/// Object-safe extraction capability.
///
/// Lets services hold an extractor without naming the document parser type.
pub trait CandidateExtractor: Send + Sync {
    /// Extract candidate records from a listing document.
    fn extract(&self, document: &str) -> Vec<CandidateRecord>;
}

/// Listing extractor over an injected document parser.
#[derive(Debug, Clone)]
pub struct ListingExtractor<P> {
    parser: P,
    site: TrackerSite,
}

impl<P: DocumentParser> ListingExtractor<P> {
    /// Create an extractor. `site` is used to make download links absolute.
    pub const fn new(parser: P, site: TrackerSite) -> Self {
        Self { parser, site }
    }

    /// Extract candidate records from `document`.
    ///
    /// Records appear in row order; a torrent id seen in an earlier row is
    /// ignored in later rows.
    pub fn extract(&self, document: &str) -> Vec<CandidateRecord> {
        if document.trim().is_empty() {
            return Vec::new();
        }

        let parsed = match self.parser.parse(document) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(error = %e, "Listing document did not parse");
                return Vec::new();
            }
        };

        self.extract_from(&parsed)
    }

    fn extract_from<D: DocumentQuery>(&self, doc: &D) -> Vec<CandidateRecord> {
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for row in listing_rows(doc) {
            let Some(id) = detail_id(doc, row) else {
                continue;
            };
            if !seen.insert(id.clone()) {
                continue;
            }

            records.push(CandidateRecord {
                id,
                description: row_description(doc, row),
                download_link: row_download_link(doc, row)
                    .map(|href| self.site.absolutize(href))
                    .unwrap_or_default(),
                size_label: row_size_label(doc, row).unwrap_or_default(),
            });
        }

        records
    }
}

impl<P: DocumentParser> CandidateExtractor for ListingExtractor<P> {
    fn extract(&self, document: &str) -> Vec<CandidateRecord> {
        Self::extract(self, document)
    }
}

/// Extract the torrent id from a detail link.
///
/// Takes the text after `details.php?id=` up to the next `&`, trimmed.
/// Returns `None` when the marker is absent or the id is empty.
///
/// ```
/// use tvsub_core::parse_detail_id;
///
/// assert_eq!(parse_detail_id("details.php?id=577692&hit=1").as_deref(), Some("577692"));
/// assert_eq!(parse_detail_id("details.php?id=&hit=1"), None);
/// ```
pub fn parse_detail_id(href: &str) -> Option<String> {
    let (_, rest) = href.split_once(DETAIL_MARKER)?;
    let id = rest.split('&').next().unwrap_or_default().trim();
    (!id.is_empty()).then(|| id.to_string())
}

/// Rows of the listing table, scoped to `#outer > div > table` so that
/// similar-looking links elsewhere on the page (user profiles) are ignored.
fn listing_rows<D: DocumentQuery>(doc: &D) -> Vec<D::Node<'_>> {
    let mut scopes = doc.descendants(doc.root(), &OUTER);
    for pattern in [&CONTAINER_DIV, &LISTING_TABLE] {
        scopes = scopes
            .into_iter()
            .flat_map(|scope| doc.children(scope, pattern))
            .collect();
    }
    scopes
        .into_iter()
        .flat_map(|table| doc.descendants(table, &ROW))
        .collect()
}

fn detail_id<'a, D: DocumentQuery>(doc: &'a D, row: D::Node<'a>) -> Option<String> {
    let link = doc.descendants(row, &DETAIL_LINK).into_iter().next()?;
    doc.attr(link, "href").and_then(parse_detail_id)
}

/// Longest non-empty `title` among the row's labelled spans, by UTF-8 byte
/// length. On equal length the first one wins.
fn row_description<'a, D: DocumentQuery>(doc: &'a D, row: D::Node<'a>) -> String {
    let mut best = "";
    let mut best_len = 0;
    for block in doc.descendants(row, &SMALL_DESCR) {
        for span in doc.descendants(block, &TITLED_SPAN) {
            let Some(title) = doc.attr(span, "title") else {
                continue;
            };
            let len = title.len();
            if len > best_len {
                best = title;
                best_len = len;
            }
        }
    }
    best.to_string()
}

fn row_download_link<'a, D: DocumentQuery>(doc: &'a D, row: D::Node<'a>) -> Option<&'a str> {
    doc.descendants(row, &DOWNLOAD_LINK)
        .into_iter()
        .filter_map(|link| doc.attr(link, "href"))
        .find(|href| !href.trim().is_empty())
}

fn row_size_label<'a, D: DocumentQuery>(doc: &'a D, row: D::Node<'a>) -> Option<String> {
    doc.descendants(row, &CELL)
        .into_iter()
        .map(|cell| doc.text(cell))
        .find(|text| SIZE_UNITS.iter().any(|unit| text.contains(unit)))
        .map(|text| normalize_size_label(&text))
}

/// Trim the size text and collapse line breaks into single spaces.
fn normalize_size_label(raw: &str) -> String {
    let flattened = raw
        .replace("<br />", "\n")
        .replace("<br/>", "\n")
        .replace("<br>", "\n");
    flattened
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
