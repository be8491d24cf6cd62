//! Sass source watcher.
//!
//! Watches the styles base directory recursively and reports changes to
//! files matching the configured glob (relative to the project root).
//! Hidden files and editor temp files are ignored.

use crate::error::{CliError, Result};
use glob::Pattern;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Modified(PathBuf),
    Created(PathBuf),
    Removed(PathBuf),
}

impl FileChange {
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }
}

/// Watcher for the stylesheet tree.
///
/// Dropping it stops the watch and closes the change channel.
pub struct SassWatcher {
    _watcher: RecommendedWatcher,
}

/// Decides which paths trigger a rebuild
#[derive(Debug, Clone)]
struct ChangeFilter {
    root: PathBuf,
    pattern: Pattern,
}

impl ChangeFilter {
    fn matches(&self, path: &Path) -> bool {
        let Ok(rel_path) = path.strip_prefix(&self.root) else {
            return false;
        };

        let ignored = rel_path
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .any(is_ignored_name);
        if ignored {
            return false;
        }

        self.pattern.matches_path(rel_path)
    }
}

fn is_ignored_name(name: &str) -> bool {
    (name.starts_with('.') && name != "." && name != "..")
        || name.ends_with('~')
        || name.ends_with(".swp")
        || name.ends_with(".tmp")
}

impl SassWatcher {
    /// Watch `dir` (recursively) for changes to files under `root` that
    /// match `pattern`.
    ///
    /// # Errors
    ///
    /// Returns error if `dir` doesn't exist, the pattern is invalid, or the
    /// watcher cannot be created.
    pub fn new(
        root: &Path,
        dir: &Path,
        pattern: &str,
        debounce: Duration,
    ) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        if !dir.is_dir() {
            return Err(CliError::FileNotFound(dir.to_path_buf()));
        }

        // notify reports resolved paths on some platforms
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        let dir = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());

        let filter = ChangeFilter {
            root,
            pattern: Pattern::new(pattern).map_err(|e| {
                CliError::InvalidArgument(format!("Invalid watch pattern '{}': {}", pattern, e.msg))
            })?,
        };

        let (tx, rx) = mpsc::channel(64);
        let mut last_event: Option<(PathBuf, Instant)> = None;

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("Style watch error: {}", e);
                    return;
                }
            };

            let change: fn(PathBuf) -> FileChange = match event.kind {
                EventKind::Create(_) => FileChange::Created,
                EventKind::Modify(_) => FileChange::Modified,
                EventKind::Remove(_) => FileChange::Removed,
                _ => return,
            };

            for path in event.paths {
                if !filter.matches(&path) {
                    continue;
                }

                // Same file within the debounce window
                let now = Instant::now();
                let repeated = last_event.as_ref().is_some_and(|(last_path, last_time)| {
                    *last_path == path && now.duration_since(*last_time) < debounce
                });
                if repeated {
                    continue;
                }
                last_event = Some((path.clone(), now));

                let change = change(path);

                // A full queue already guarantees a rerun
                let _ = tx.try_send(change);
            }
        })?;

        watcher.watch(&dir, RecursiveMode::Recursive)?;
        tracing::debug!(dir = %dir.display(), pattern, "watching styles");

        Ok((Self { _watcher: watcher }, rx))
    }
}
