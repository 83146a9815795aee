//! Platform path helpers: data directory, home directory and tilde expansion.

use std::path::PathBuf;

const APPLICATION: &str = "placemarks";

/// Returns the directory placemarks keeps its config document and logs in.
///
/// Uses the platform data directory (`~/.local/share/placemarks` on Linux,
/// `~/Library/Application Support/placemarks` on macOS). Falls back to a
/// `.placemarks` directory in the working directory when no home directory can
/// be determined.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APPLICATION).map_or_else(
        || PathBuf::from(".placemarks"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

/// Returns the current user's home directory as a string, if known.
#[must_use]
pub fn home_dir() -> Option<String> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_string_lossy().into_owned())
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and tildes naming another user (`~bob`),
/// are returned unchanged.
///
/// # Examples
///
/// ```
/// use placemarks::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// assert_eq!(expand_tilde("~bob/notes"), "~bob/notes");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let rest = if path == "~" {
        ""
    } else if let Some(rest) = path.strip_prefix("~/") {
        rest
    } else {
        return path.to_string();
    };

    match home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => format!("{}/{}", home.trim_end_matches('/'), rest),
        None => path.to_string(),
    }
}
