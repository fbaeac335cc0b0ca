//! Local artifact paths.

use std::path::{Path, PathBuf};

/// Directory for downloaded torrent files when the configuration does not
/// override it.
pub const DEFAULT_ARTIFACT_DIR: &str = "torrents";

/// Extension of a stored artifact.
const ARTIFACT_EXTENSION: &str = "torrent";

/// Local path for a candidate's artifact: `{dir}/{id}.torrent`.
///
/// Returns `None` when `id` cannot be used as a file name (empty, or
/// containing a path separator or `..`).
///
/// ```
/// use std::path::Path;
/// use tvsub_core::artifact_path;
///
/// assert_eq!(
///     artifact_path(Path::new("torrents"), "577692"),
///     Some(Path::new("torrents").join("577692.torrent"))
/// );
/// assert_eq!(artifact_path(Path::new("torrents"), "../etc"), None);
/// ```
pub fn artifact_path(dir: &Path, id: &str) -> Option<PathBuf> {
    let id = id.trim();
    if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
        return None;
    }
    Some(dir.join(format!("{id}.{ARTIFACT_EXTENSION}")))
}
