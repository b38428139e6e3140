//! Path utilities for the Zellij sandbox, where the host filesystem is mounted
//! under `/host`.

use std::path::PathBuf;

/// Returns the BookScope data directory, `/host/.local/share/zellij/bookscope`.
///
/// `/host` points to the cwd of the last focused terminal, or to the folder
/// Zellij was started from, so this usually resolves to
/// `~/.local/share/zellij/bookscope`. The log file lives here.
///
/// # Examples
///
/// ```
/// use bookscope::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str(), Some("/host/.local/share/zellij/bookscope"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("bookscope")
}

/// Expands a leading `~` to `/host`, so `theme_file "~/themes/x.toml"` works
/// from inside the sandbox.
///
/// # Examples
///
/// ```
/// use bookscope::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/nord.toml"), "/host/themes/nord.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
