//! Watching the files of the most recent bundle
//!
//! Parent directories are watched non-recursively and events are filtered
//! against the current module set, so editors that save by rename are still
//! picked up.

use crate::error::Result;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::RwLock;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// One or more watched modules changed on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleUpdate {
    pub changed: Vec<PathBuf>,
}

pub(crate) struct DependencyWatcher {
    watcher: RecommendedWatcher,
    files: Arc<RwLock<FxHashSet<PathBuf>>>,
    dirs: FxHashSet<PathBuf>,
}

impl DependencyWatcher {
    /// Must be called from within a tokio runtime.
    pub(crate) fn new(debounce: Duration) -> Result<(Self, mpsc::Receiver<BundleUpdate>)> {
        let files: Arc<RwLock<FxHashSet<PathBuf>>> = Arc::default();
        let (raw_tx, raw_rx) = mpsc::unbounded_channel::<PathBuf>();
        let (update_tx, update_rx) = mpsc::channel(16);

        let watched = Arc::clone(&files);
        let watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if !is_content_change(&event.kind) {
                    return;
                }
                let watched = watched.read();
                for path in event.paths {
                    if watched.contains(&path) {
                        let _ = raw_tx.send(path);
                    }
                }
            }
            Err(e) => tracing::warn!("Dependency watch error: {}", e),
        })?;

        tokio::spawn(coalesce_changes(raw_rx, update_tx, debounce));

        Ok((
            Self {
                watcher,
                files,
                dirs: FxHashSet::default(),
            },
            update_rx,
        ))
    }

    /// Replace the watched module set with `modules`.
    pub(crate) fn sync(&mut self, modules: &FxHashSet<PathBuf>) {
        let wanted_dirs: FxHashSet<PathBuf> = modules
            .iter()
            .filter_map(|path| path.parent().map(Path::to_path_buf))
            .collect();

        for dir in self.dirs.difference(&wanted_dirs) {
            if let Err(e) = self.watcher.unwatch(dir) {
                tracing::debug!(dir = %dir.display(), "unwatch failed: {}", e);
            }
        }

        let mut watching = FxHashSet::default();
        for dir in wanted_dirs {
            if self.dirs.contains(&dir) {
                watching.insert(dir);
                continue;
            }
            match self.watcher.watch(&dir, RecursiveMode::NonRecursive) {
                Ok(()) => {
                    watching.insert(dir);
                }
                Err(e) => tracing::warn!(dir = %dir.display(), "Cannot watch directory: {}", e),
            }
        }
        self.dirs = watching;

        *self.files.write() = modules.clone();
        tracing::debug!(
            files = modules.len(),
            dirs = self.dirs.len(),
            "dependency watch updated"
        );
    }

    pub(crate) fn files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self.files.read().iter().cloned().collect();
        files.sort();
        files
    }
}

fn is_content_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

/// Group raw change events into updates separated by `quiet` of silence.
async fn coalesce_changes(
    mut raw: mpsc::UnboundedReceiver<PathBuf>,
    updates: mpsc::Sender<BundleUpdate>,
    quiet: Duration,
) {
    while let Some(first) = raw.recv().await {
        let mut changed = vec![first];

        loop {
            match tokio::time::timeout(quiet, raw.recv()).await {
                Ok(Some(path)) => {
                    if !changed.contains(&path) {
                        changed.push(path);
                    }
                }
                Ok(None) => break,
                Err(_) => break,
            }
        }

        if updates.send(BundleUpdate { changed }).await.is_err() {
            break;
        }
    }
}
