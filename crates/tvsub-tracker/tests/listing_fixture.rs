//! Listing extraction against a captured search-result page.

use tvsub_core::{CandidateRecord, TrackerSite};
use tvsub_tracker::html_listing_extractor;

const LISTING: &str = include_str!("fixtures/listing.html");

#[test]
fn extracts_rows_inside_listing_table() {
    let records = html_listing_extractor(TrackerSite::default()).extract(LISTING);

    assert_eq!(
        records,
        vec![
            CandidateRecord::new("577692")
                .with_description("漫长的季节 全12集 | 导演: 辛爽 | 主演: 范伟 秦昊 陈明昊")
                .with_download_link("https://springsunday.net/download.php?id=577692&https=1")
                .with_size_label("45.3 GB"),
            CandidateRecord::new("577693").with_size_label("3.8 GB"),
        ]
    );
}

#[test]
fn ignores_links_outside_listing_table() {
    let records = html_listing_extractor(TrackerSite::default()).extract(LISTING);
    assert!(records.iter().all(|r| r.id != "999999" && r.id != "87654"));
}

#[test]
fn download_links_follow_site_origin() {
    let records = html_listing_extractor(TrackerSite::new("https://mirror.example/")).extract(LISTING);
    assert_eq!(
        records[0].download_link,
        "https://mirror.example/download.php?id=577692&https=1"
    );
}

#[test]
fn empty_and_unstructured_documents_yield_nothing() {
    let extractor = html_listing_extractor(TrackerSite::default());
    assert!(extractor.extract("").is_empty());
    assert!(extractor.extract(" \n\t ").is_empty());
    assert!(extractor.extract("<html><body><p>登录</p></body></html>").is_empty());
    assert!(extractor.extract("<<<not html").is_empty());
}

#[test]
fn multiple_detail_links_in_one_row_use_the_first() {
    let html = r#"<html><body><div id="outer"><div><table><tr>
        <td><a href="details.php?id=123456&hit=1">a</a></td>
        <td><a href="details.php?id=789012&hit=1">b</a></td>
    </tr><tr>
        <td><a href="details.php?id=789012&hit=1">b again</a></td>
    </tr></table></div></div></body></html>"#;

    let records = html_listing_extractor(TrackerSite::default()).extract(html);
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["123456", "789012"]);
}
