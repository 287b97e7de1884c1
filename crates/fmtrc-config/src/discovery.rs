//! Locating the settings file.
//!
//! The formatter looks for its settings in the invocation directory and then
//! in each ancestor until the filesystem root. Within a directory the
//! candidate names are tried in [`CANDIDATES`] order; the nearest directory
//! always wins.

use std::env;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, trace};

/// File names recognised as formatter settings, in precedence order.
pub const CANDIDATES: &[&str] = &[
    ".cmake-format.py",
    ".cmake-format",
    "cmake-format.py",
    ".cmake-format.json",
    "cmake-format.json",
];

/// Search `start` and its ancestors for a settings file.
///
/// A relative `start` is resolved against the working directory first, so
/// `"."` searches every real parent. Returns the first match, or `None` once
/// the root has been checked.
///
/// # Example
///
/// ```no_run
/// use fmtrc_config::discover;
///
/// if let Some(path) = discover(".") {
///     println!("using {}", path.display());
/// }
/// ```
pub fn discover<P: AsRef<Path>>(start: P) -> Option<PathBuf> {
    let start = absolute(start.as_ref());

    for dir in start.ancestors() {
        trace!(dir = %dir.display(), "searching for formatter settings");
        if let Some(found) = find_in(dir) {
            debug!(path = %found.display(), "discovered formatter settings");
            return Some(found);
        }
    }

    debug!(start = %start.display(), "no formatter settings found");
    None
}

// Join onto the working directory and fold away `.` and `..` lexically.
fn absolute(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Check a single directory for a settings file.
pub fn find_in(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}
