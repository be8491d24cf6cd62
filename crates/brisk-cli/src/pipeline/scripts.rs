//! main.js → app.js (inline source map) → app.min.js

use crate::error::Result;
use crate::pipeline::{BuildReport, PipelineDef, PipelineOutcome, write_artifact};
use brisk_scripts::{BundleMode, BundlerHandle, ScriptOptions};
use std::time::Instant;

/// Create a bundler for `def` and run the first bundle.
///
/// In [`BundleMode::Watch`] the returned handle carries the update stream;
/// feed each update back into [`rebundle`].
pub async fn build(
    def: &PipelineDef,
    options: ScriptOptions,
    mode: BundleMode,
) -> Result<(BundlerHandle, PipelineOutcome)> {
    let mut handle = BundlerHandle::new(options, mode)?;
    let outcome = rebundle(def, &mut handle).await;
    Ok((handle, outcome))
}

/// Bundle again with an existing handle and write both artifacts.
pub async fn rebundle(def: &PipelineDef, handle: &mut BundlerHandle) -> PipelineOutcome {
    let start = Instant::now();

    let bundle = match handle.bundle().await {
        Ok(bundle) => bundle,
        Err(e) => return def.failed(e.to_string()),
    };

    let full = match write_artifact(&def.output, bundle.to_file_contents().as_bytes()).await {
        Ok(artifact) => artifact,
        Err(e) => return def.failed(format!("Failed to write {}: {e}", def.output.display())),
    };

    let code = bundle.code;
    let minified = match tokio::task::spawn_blocking(move || brisk_scripts::minify_js(&code)).await
    {
        Ok(Ok(minified)) => minified,
        Ok(Err(e)) => return def.failed(e.to_string()),
        Err(e) => return def.failed(format!("Script minifier crashed: {e}")),
    };

    let min = match write_artifact(&def.minified, minified.as_bytes()).await {
        Ok(artifact) => artifact,
        Err(e) => return def.failed(format!("Failed to write {}: {e}", def.minified.display())),
    };

    PipelineOutcome::Built(BuildReport {
        pipeline: def.pipeline,
        artifacts: vec![full, min],
        duration: start.elapsed(),
    })
}
