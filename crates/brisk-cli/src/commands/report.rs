use crate::dev::{ReloadEvent, ReloadSink};
use crate::pipeline::{BuildReport, CompileFailure, Pipeline, PipelineOutcome};
use crate::ui;

/// Show an outcome in the terminal and forward it to the browsers.
///
/// Exactly one reload event is sent per outcome: stylesheets are injected,
/// scripts reload the page, failures become a toast.
pub fn present(outcome: &PipelineOutcome, sink: &dyn ReloadSink) {
    match outcome {
        PipelineOutcome::Built(report) => report_success(report, sink),
        PipelineOutcome::Failed(failure) => report_failure(failure, sink),
    }
}

fn report_success(report: &BuildReport, sink: &dyn ReloadSink) {
    let sizes: Vec<(String, u64)> = report
        .file_names()
        .into_iter()
        .zip(report.artifacts.iter().map(|a| a.size))
        .collect();

    ui::print_artifacts(&sizes);
    ui::success(&format!(
        "Finished '{}' after {}",
        report.pipeline,
        ui::format_duration(report.duration)
    ));
    tracing::info!(
        pipeline = %report.pipeline,
        duration_ms = report.duration.as_millis() as u64,
        "pipeline finished"
    );

    sink.send(reload_event(report));
}

/// Notify the user about a compile error. The watch keeps running.
pub fn report_failure(failure: &CompileFailure, sink: &dyn ReloadSink) {
    ui::error(&format!("{}: {}", failure.title, failure.message));
    tracing::error!(pipeline = %failure.pipeline, "{}", failure.message);

    sink.send(ReloadEvent::Notify {
        title: failure.title.to_string(),
        message: failure.message.clone(),
    });
}

fn reload_event(report: &BuildReport) -> ReloadEvent {
    match report.pipeline {
        Pipeline::Styles => ReloadEvent::Inject {
            files: report.file_names(),
        },
        Pipeline::Scripts => ReloadEvent::Reload,
    }
}
