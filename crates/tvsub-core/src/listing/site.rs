//! URL construction for the tracker site.
//!
//! All builders here are pure: the same inputs always produce byte-identical
//! output.

use crate::domain::QualityTier;

/// Origin used when the configuration does not override it.
pub const DEFAULT_SITE_ORIGIN: &str = "https://springsunday.net";

/// Fixed query parameters that follow the quality flag.
const SEARCH_FILTERS: &str = "team9=1&incldead=0&spstate=0&pick=0&inclbookmarked=0";

/// The tracker site, identified by its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerSite {
    origin: String,
}

impl Default for TrackerSite {
    fn default() -> Self {
        Self::new(DEFAULT_SITE_ORIGIN)
    }
}

impl TrackerSite {
    /// Create a site from its origin. A trailing slash is ignored.
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    /// The origin without a trailing slash.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Search URL for a catalog id at the given quality tier.
    ///
    /// The catalog id is inserted verbatim; callers validate it is non-blank.
    pub fn search_url(&self, catalog_id: &str, tier: QualityTier) -> String {
        format!(
            "{}/torrents.php?{}&{SEARCH_FILTERS}&search={catalog_id}&search_area=5&search_mode=0",
            self.origin,
            quality_flag(tier),
        )
    }

    /// Legacy download URL built from a torrent id and passkey.
    pub fn download_url(&self, torrent_id: &str, passkey: &str) -> String {
        format!(
            "{}/download.php?id={torrent_id}&passkey={passkey}&https=1",
            self.origin
        )
    }

    /// Make a listing `href` absolute. Hrefs that already carry a scheme are
    /// returned unchanged.
    pub fn absolutize(&self, href: &str) -> String {
        let href = href.trim();
        if href.starts_with("http://") || href.starts_with("https://") {
            return href.to_string();
        }
        format!("{}/{}", self.origin, href.trim_start_matches('/'))
    }
}

/// Site filter flag for a quality tier.
const fn quality_flag(tier: QualityTier) -> &'static str {
    match tier {
        QualityTier::High => "standard1=1",
        QualityTier::Standard => "standard2=1",
    }
}
