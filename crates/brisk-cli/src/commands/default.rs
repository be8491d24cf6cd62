//! `brisk default`: build everything, start the proxy, then watch.
//!
//! Startup runs scripts once, styles once and the proxy, in that order.
//! Afterwards each pipeline is driven by a single loop that pulls triggers
//! from a channel, so runs of one pipeline never overlap. Changes that land
//! mid-run fold into a single rerun.

use crate::cli::{Cli, ServeArgs};
use crate::commands::browser_sync::{start_proxy, wait_for_shutdown};
use crate::commands::{Project, present};
use crate::dev::{FileChange, NoReload, ReloadSink, SassWatcher};
use crate::error::{CliError, Result, ResultExt};
use crate::pipeline::{PipelineDef, runner, scripts, styles};
use crate::ui;
use brisk_scripts::{BundleMode, BundleUpdate, BundlerHandle};
use brisk_styles::StyleOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

pub async fn execute(args: &Cli, serve: &ServeArgs) -> Result<()> {
    let project = Project::load(args, Some(serve))?;
    let root = &project.root;
    let config = &project.config;

    let styles_def = PipelineDef::styles(config, root);
    let scripts_def = PipelineDef::scripts(config, root);
    let style_options = config.style_options(root)?;
    let script_options = config.script_options(root)?;

    ui::info("Starting 'scripts'...");
    let (_once, outcome) =
        scripts::build(&scripts_def, script_options.clone(), BundleMode::Once).await?;
    present(&outcome, &NoReload);

    ui::info("Starting 'styles'...");
    let outcome = styles::run(&styles_def, &style_options).await;
    present(&outcome, &NoReload);

    let mut proxy = start_proxy(&project).await?;

    let (_sass_watcher, changes) = SassWatcher::new(
        root,
        &root.join(&config.styles.base),
        &config.styles.watch,
        Duration::from_millis(config.styles.debounce),
    )
    .with_hint("Create the Sass directory or set styles.base in brisk.toml")?;
    let styles_task = tokio::spawn(watch_styles(
        styles_def,
        style_options,
        changes,
        proxy.state.clone(),
    ));

    let (mut handle, outcome) =
        scripts::build(&scripts_def, script_options, BundleMode::Watch).await?;
    present(&outcome, &*proxy.state);
    tracing::debug!(files = handle.watched_files().len(), "watching script graph");
    let updates = handle
        .subscribe()
        .ok_or_else(|| CliError::Custom("Script watcher did not start".to_string()))?;

    ui::info(&format!(
        "Watching {} and the script graph. Press Ctrl+C to stop",
        config.styles.watch
    ));

    // The bundler stays on this task; only the styles loop is spawned
    let sink = proxy.state.clone();
    let result = tokio::select! {
        result = wait_for_shutdown(&mut proxy) => result,
        () = watch_scripts(&scripts_def, &mut handle, updates, &*sink) => {
            Err(CliError::Custom("Script watcher stopped".to_string()))
        }
    };

    styles_task.abort();
    proxy.task.abort();
    result
}

/// Rebuild styles for every batch of Sass changes until the channel closes.
pub async fn watch_styles(
    def: PipelineDef,
    options: StyleOptions,
    mut changes: mpsc::Receiver<FileChange>,
    sink: Arc<dyn ReloadSink>,
) {
    while let Some(batch) = runner::next_batch(&mut changes).await {
        for change in &batch {
            tracing::debug!(path = %change.path().display(), "style source changed");
        }
        ui::info("Starting 'styles'...");
        let outcome = styles::run(&def, &options).await;
        present(&outcome, &*sink);
    }
}

/// Rebundle for every batch of dependency updates until the stream ends.
pub async fn watch_scripts(
    def: &PipelineDef,
    handle: &mut BundlerHandle,
    mut updates: mpsc::Receiver<BundleUpdate>,
    sink: &dyn ReloadSink,
) {
    while let Some(batch) = runner::next_batch(&mut updates).await {
        let changed = batch.iter().map(|update| update.changed.len()).sum::<usize>();
        tracing::info!(changed, "Rebundle...");
        ui::info("Rebundle...");

        let outcome = scripts::rebundle(def, handle).await;
        present(&outcome, sink);
    }
}
