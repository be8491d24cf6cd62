//! Long-lived bundler for one entry

use crate::bundle::{ScriptBundle, bundle_entry};
use crate::error::Result;
use crate::options::{BundleMode, ScriptOptions};
use crate::plugin::PresetTransformPlugin;
use crate::transform::PresetTransform;
use crate::watch::{BundleUpdate, DependencyWatcher};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Bundles one entry and, in [`BundleMode::Watch`], tracks its dependency graph.
///
/// Each successful [`bundle`](Self::bundle) replaces the watched module set.
/// A failed bundle keeps the previous set, adds the entry and every module
/// rolldown reached during the failed pass, so fixing the broken file
/// triggers the next update.
pub struct BundlerHandle {
    options: ScriptOptions,
    plugin: PresetTransformPlugin,
    watcher: Option<DependencyWatcher>,
    updates: Option<mpsc::Receiver<BundleUpdate>>,
    bundles: u64,
}

impl BundlerHandle {
    /// Create a handle. Watch mode must be set up inside a tokio runtime.
    pub fn new(options: ScriptOptions, mode: BundleMode) -> Result<Self> {
        let transform = Arc::new(PresetTransform::new(&options.presets)?);
        let plugin = PresetTransformPlugin::new(transform);

        let (watcher, updates) = match mode {
            BundleMode::Once => (None, None),
            BundleMode::Watch => {
                let (watcher, updates) = DependencyWatcher::new(options.debounce)?;
                (Some(watcher), Some(updates))
            }
        };

        Ok(Self {
            options,
            plugin,
            watcher,
            updates,
            bundles: 0,
        })
    }

    /// Run one bundle pass.
    pub async fn bundle(&mut self) -> Result<ScriptBundle> {
        let start = Instant::now();
        let result = bundle_entry(&self.options, &self.plugin).await;

        if let Some(watcher) = self.watcher.as_mut() {
            match &result {
                Ok(bundle) => watcher.sync(&bundle.modules),
                Err(_) => {
                    let mut modules = rustc_hash::FxHashSet::default();
                    modules.extend(watcher.files());
                    modules.extend(self.plugin.seen_modules());
                    modules.insert(self.options.entry_path());
                    watcher.sync(&modules);
                }
            }
        }

        self.bundles += 1;
        tracing::debug!(
            entry = %self.options.entry.display(),
            bundle = self.bundles,
            ok = result.is_ok(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "bundle finished"
        );

        result
    }

    /// Take the update stream. Returns `None` in [`BundleMode::Once`] or
    /// when it was already taken.
    pub fn subscribe(&mut self) -> Option<mpsc::Receiver<BundleUpdate>> {
        self.updates.take()
    }

    /// Files currently watched, sorted. Empty when not watching.
    pub fn watched_files(&self) -> Vec<PathBuf> {
        self.watcher
            .as_ref()
            .map(DependencyWatcher::files)
            .unwrap_or_default()
    }
}
