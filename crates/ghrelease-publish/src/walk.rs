use std::path::{Component, Path, PathBuf};

use ghrelease_core::Error;
use walkdir::WalkDir;

/// A regular file found under the workspace root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    /// Path below the root, `/`-separated.
    pub relative: String,
}

/// Lazily walks `root`, yielding every non-directory entry in per-directory
/// file name order.
pub fn walk_files(root: &Path) -> impl Iterator<Item = Result<Candidate, Error>> + '_ {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(root).to_path_buf();
                    return Some(Err(Error::Walk {
                        path,
                        source: err.into(),
                    }));
                }
            };
            if entry.file_type().is_dir() {
                return None;
            }
            let relative = relative_path(root, entry.path());
            Some(Ok(Candidate {
                path: entry.into_path(),
                relative,
            }))
        })
}

pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
