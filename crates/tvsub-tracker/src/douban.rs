//! Douban catalog client: subject titles and title suggestions.

use std::cmp::Ordering;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, REFERER};
use scraper::{Html, Selector};
use serde::Deserialize;
use tvsub_core::CatalogHit;
use url::Url;

use crate::config::DoubanClientConfig;
use crate::error::{ClientBuildError, TrackerError, TrackerResult};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_JSON: &str = "application/json, text/javascript, */*";
const ACCEPT_LANGUAGE_ZH: &str = "zh-CN,zh;q=0.9,en;q=0.8";

/// Client for the Douban movie site.
///
/// Implements [`tvsub_core::CatalogPort`].
#[derive(Debug, Clone)]
pub struct DoubanClient {
    http: reqwest::Client,
    base_url: String,
}

impl DoubanClient {
    /// Create a client with the given configuration.
    pub fn new(config: &DoubanClientConfig) -> Result<Self, ClientBuildError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the subject page and extract its title.
    pub(crate) async fn subject_title(&self, catalog_id: &str) -> TrackerResult<Option<String>> {
        let url = format!("{}/subject/{catalog_id}/", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, ACCEPT_HTML)
            .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_ZH)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(TrackerError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        Ok(parse_subject_title(&body))
    }

    /// Query the suggestion endpoint.
    pub(crate) async fn suggest(&self, name: &str) -> TrackerResult<Vec<CatalogHit>> {
        let mut url = Url::parse(&format!("{}/j/subject_suggest", self.base_url))?;
        url.query_pairs_mut().append_pair("q", name);

        let response = self
            .http
            .get(url.as_str())
            .header(ACCEPT, ACCEPT_JSON)
            .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_ZH)
            .header(REFERER, format!("{}/", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(TrackerError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(bytes = body.len(), "Douban suggestion response");
        parse_suggestions(&body)
    }
}

/// Title from a subject page: the first non-empty `h1 span`, then the
/// `v:itemreviewed` property, then the `<title>` without its site suffix.
pub(crate) fn parse_subject_title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);

    let first_text = |css: &str| -> Option<String> {
        let selector = Selector::parse(css).ok()?;
        doc.select(&selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .find(|text| !text.is_empty())
    };

    if let Some(title) = first_text("h1 span") {
        return Some(title);
    }
    if let Some(title) = first_text(r#"[property="v:itemreviewed"]"#) {
        return Some(title);
    }

    let page_title = first_text("title")?;
    if !page_title.contains("豆瓣") {
        return None;
    }
    let title = page_title.replace("(豆瓣)", "");
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

#[derive(Debug, Deserialize)]
struct Suggestion {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    img: String,
    #[serde(default)]
    year: String,
    #[serde(default)]
    episode: String,
    #[serde(default, rename = "type")]
    kind: String,
}

/// Parse the suggestion JSON array, keeping movie entries with an id and a
/// title, newest id first.
pub(crate) fn parse_suggestions(body: &str) -> TrackerResult<Vec<CatalogHit>> {
    let body = body.trim();
    if !body.starts_with('[') {
        let preview: String = body.chars().take(200).collect();
        return Err(TrackerError::InvalidResponse {
            message: format!("expected a JSON array, got: {preview}"),
        });
    }

    let suggestions: Vec<Suggestion> = serde_json::from_str(body)?;
    let mut hits: Vec<CatalogHit> = suggestions
        .into_iter()
        .filter(|s| s.kind == "movie" && !s.id.is_empty() && !s.title.is_empty())
        .map(|s| CatalogHit {
            id: s.id,
            title: s.title,
            img: s.img,
            year: s.year,
            episode: s.episode,
        })
        .collect();

    hits.sort_by(|a, b| compare_ids_desc(&a.id, &b.id));
    Ok(hits)
}

/// Numeric ids descending, before non-numeric ids (descending
/// lexicographically).
fn compare_ids_desc(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => y.cmp(&x),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => b.cmp(a),
    }
}
