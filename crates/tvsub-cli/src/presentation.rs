//! Table formatting for CLI output.

use tvsub_core::{
    AcquisitionOutcome, CandidateRecord, CatalogHit, EntryOutcome, RunSummary, WatchEntry,
};

/// Truncate to `max_chars` characters, adding "..." if needed.
///
/// ```rust
/// use tvsub_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// assert_eq!(truncate_string("漫长的季节 全12集", 5), "漫长...");
/// ```
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Print the watch-list.
pub fn print_watchlist(entries: &[WatchEntry]) {
    if entries.is_empty() {
        println!("No subscriptions.");
        println!("Use 'tvsub watch add <douban-id>' to add one.");
        return;
    }

    println!("{:<38} {:<12} {:<6} NAME", "ID", "DOUBAN ID", "TIER");
    print_separator(90);
    for entry in entries {
        println!(
            "{:<38} {:<12} {:<6} {}",
            entry.id,
            entry.catalog_id,
            entry.quality_tier.label(),
            truncate_string(&entry.display_name, 30)
        );
    }
}

/// Print search candidates.
pub fn print_candidates(candidates: &[CandidateRecord]) {
    if candidates.is_empty() {
        println!("No torrents found.");
        return;
    }

    println!("{:<10} {:<10} DESCRIPTION", "ID", "SIZE");
    print_separator(90);
    for candidate in candidates {
        println!(
            "{:<10} {:<10} {}",
            candidate.id,
            candidate.size_label,
            truncate_string(&candidate.description, 60)
        );
    }
}

/// Print catalog search hits.
pub fn print_catalog_hits(hits: &[CatalogHit]) {
    if hits.is_empty() {
        println!("No titles found.");
        return;
    }

    println!("{:<12} {:<6} {:<12} TITLE", "DOUBAN ID", "YEAR", "EPISODES");
    print_separator(70);
    for hit in hits {
        println!(
            "{:<12} {:<6} {:<12} {}",
            hit.id, hit.year, hit.episode, hit.title
        );
    }
}

/// Print one acquisition outcome.
pub fn print_outcome(torrent_id: &str, outcome: &AcquisitionOutcome) {
    match outcome {
        AcquisitionOutcome::Succeeded(handle) if handle.duplicate => {
            println!("{torrent_id}: already in Transmission as '{}'", handle.name);
        }
        AcquisitionOutcome::Succeeded(handle) => {
            println!("{torrent_id}: added '{}'", handle.name);
        }
        AcquisitionOutcome::Skipped => println!("{torrent_id}: already downloaded, skipped"),
        AcquisitionOutcome::Failed(e) => println!("{torrent_id}: failed: {e}"),
    }
}

/// Print the per-entry result of a run.
pub fn print_run_summary(summary: &RunSummary) {
    for report in &summary.entries {
        let label = report.entry.label();
        match &report.outcome {
            EntryOutcome::DiscoveryFailed(e) => println!("{label}: search failed: {e}"),
            EntryOutcome::NothingFound => println!("{label}: nothing found"),
            EntryOutcome::Processed(batch) => println!(
                "{label}: {} added, {} skipped, {} failed",
                batch.succeeded(),
                batch.skipped(),
                batch.failed()
            ),
        }
    }
    println!(
        "Done: {} added, {} skipped, {} entries with failures",
        summary.succeeded(),
        summary.skipped(),
        summary.entries_with_failures()
    );
}

/// Mask a secret for display, keeping a short prefix.
pub fn mask_secret(secret: &str) -> String {
    let secret = secret.trim();
    if secret.is_empty() {
        return "(not set)".to_string();
    }
    let prefix: String = secret.chars().take(4).collect();
    format!("{prefix}****")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate_string("abc", 3), "abc");
        assert_eq!(truncate_string("abcd", 3), "...");
        assert_eq!(truncate_string("漫长的季节", 5), "漫长的季节");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(""), "(not set)");
        assert_eq!(mask_secret("c_secure_uid=1"), "c_se****");
    }
}
