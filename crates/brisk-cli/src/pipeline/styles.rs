//! Sass → style.css → style.min.css

use crate::pipeline::{BuildReport, PipelineDef, PipelineOutcome, write_artifact};
use brisk_styles::StyleOptions;
use std::time::Instant;

/// Compile, prefix and write the full stylesheet, then minify and write the
/// minified one. Stops at the first failure.
pub async fn run(def: &PipelineDef, options: &StyleOptions) -> PipelineOutcome {
    let start = Instant::now();

    let entry = def.entry.clone();
    let compile_options = options.clone();
    let compiled =
        match tokio::task::spawn_blocking(move || brisk_styles::compile(&entry, &compile_options))
            .await
        {
            Ok(Ok(compiled)) => compiled,
            Ok(Err(e)) => return def.failed(e.to_string()),
            Err(e) => return def.failed(format!("Style compiler crashed: {e}")),
        };

    let full = match write_artifact(&def.output, compiled.to_file_contents().as_bytes()).await {
        Ok(artifact) => artifact,
        Err(e) => return def.failed(format!("Failed to write {}: {e}", def.output.display())),
    };

    let css = compiled.css;
    let minify_options = options.clone();
    let minified =
        match tokio::task::spawn_blocking(move || brisk_styles::minify(&css, &minify_options)).await
        {
            Ok(Ok(minified)) => minified,
            Ok(Err(e)) => return def.failed(e.to_string()),
            Err(e) => return def.failed(format!("Style minifier crashed: {e}")),
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
