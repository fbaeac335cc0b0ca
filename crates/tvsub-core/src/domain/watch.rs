//! Watch-list entry and quality tier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Coarse resolution preference mapped to a site filter flag.
///
/// Persisted as the integer code used by the watch-list file: `0` for the
/// high tier (2160p) and `1` for the standard tier (1080p). Any other code
/// reads back as [`QualityTier::Standard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum QualityTier {
    /// 2160p releases.
    High,
    /// 1080p releases.
    #[default]
    Standard,
}

impl QualityTier {
    /// Integer code stored in the watch-list file.
    pub const fn code(self) -> i64 {
        match self {
            Self::High => 0,
            Self::Standard => 1,
        }
    }

    /// Short resolution label for display.
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "2160p",
            Self::Standard => "1080p",
        }
    }
}

impl From<i64> for QualityTier {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::High,
            // 1 and every unknown code
            _ => Self::Standard,
        }
    }
}

impl From<QualityTier> for i64 {
    fn from(tier: QualityTier) -> Self {
        tier.code()
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QualityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "2160p" | "4k" | "0" => Ok(Self::High),
            "standard" | "1080p" | "1" => Ok(Self::Standard),
            other => Err(format!(
                "unknown quality tier '{other}' (expected high/2160p or standard/1080p)"
            )),
        }
    }
}

/// A single subscription on the watch-list.
///
/// Identity for duplicate detection is `(catalog_id, quality_tier)`; the
/// `id` field is a stable handle used to trigger one subscription on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchEntry {
    /// Subscription id (assigned on add when empty).
    #[serde(default)]
    pub id: String,
    /// External catalog (Douban) identifier used as the search term.
    #[serde(rename = "douban_id")]
    pub catalog_id: String,
    /// Human-readable title, back-filled from the catalog when empty.
    #[serde(rename = "name", default)]
    pub display_name: String,
    /// Resolution preference.
    #[serde(rename = "resolution", default)]
    pub quality_tier: QualityTier,
}

impl WatchEntry {
    /// Create an entry with no id and no display name.
    pub fn new(catalog_id: impl Into<String>, quality_tier: QualityTier) -> Self {
        Self {
            id: String::new(),
            catalog_id: catalog_id.into(),
            display_name: String::new(),
            quality_tier,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Set the subscription id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Whether two entries describe the same subscription.
    pub fn same_identity(&self, catalog_id: &str, quality_tier: QualityTier) -> bool {
        self.catalog_id == catalog_id && self.quality_tier == quality_tier
    }

    /// Label used in logs and listings: the display name, or the catalog id.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.catalog_id
        } else {
            &self.display_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_code() {
        assert_eq!(QualityTier::from(0), QualityTier::High);
        assert_eq!(QualityTier::from(1), QualityTier::Standard);
        assert_eq!(QualityTier::from(999), QualityTier::Standard);
        assert_eq!(QualityTier::from(-1), QualityTier::Standard);
    }

    #[test]
    fn test_tier_from_str() {
        assert_eq!("high".parse::<QualityTier>(), Ok(QualityTier::High));
        assert_eq!("2160P".parse::<QualityTier>(), Ok(QualityTier::High));
        assert_eq!("1080p".parse::<QualityTier>(), Ok(QualityTier::Standard));
        assert!("720p".parse::<QualityTier>().is_err());
    }

    #[test]
    fn test_entry_json_round_trip_uses_file_keys() {
        let entry = WatchEntry::new("36391902", QualityTier::High)
            .with_id("abc")
            .with_display_name("Some Show");

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["douban_id"], "36391902");
        assert_eq!(json["name"], "Some Show");
        assert_eq!(json["resolution"], 0);
        assert_eq!(json["id"], "abc");

        let back: WatchEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_entry_unknown_resolution_reads_as_standard() {
        let entry: WatchEntry =
            serde_json::from_str(r#"{"douban_id":"1","resolution":7}"#).unwrap();
        assert_eq!(entry.quality_tier, QualityTier::Standard);
        assert!(entry.id.is_empty());
        assert!(entry.display_name.is_empty());
    }

    #[test]
    fn test_label_falls_back_to_catalog_id() {
        let entry = WatchEntry::new("42", QualityTier::Standard);
        assert_eq!(entry.label(), "42");
        assert_eq!(entry.with_display_name("Show").label(), "Show");
    }
}
