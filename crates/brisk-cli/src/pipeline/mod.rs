//! Build pipelines and their outcomes.
//!
//! A pipeline run never returns an error for a compile problem. It returns
//! [`PipelineOutcome::Failed`] with the compiler message, and the caller
//! decides how to present it. Artifacts from the last good run stay on disk.

pub mod artifacts;
pub mod runner;
pub mod scripts;
pub mod styles;

use crate::config::BriskConfig;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use artifacts::{Artifact, write_artifact};

/// Title used for every compile failure notification
pub const COMPILE_ERROR_TITLE: &str = "Compile Error";

pub const STYLE_FILE: &str = "style.css";
pub const STYLE_MIN_FILE: &str = "style.min.css";
pub const SCRIPT_FILE: &str = "app.js";
pub const SCRIPT_MIN_FILE: &str = "app.min.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    Styles,
    Scripts,
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pipeline::Styles => write!(f, "styles"),
            Pipeline::Scripts => write!(f, "scripts"),
        }
    }
}

/// Where a pipeline reads from and writes to (absolute paths)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineDef {
    pub pipeline: Pipeline,
    pub entry: PathBuf,
    pub output: PathBuf,
    pub minified: PathBuf,
}

impl PipelineDef {
    pub fn styles(config: &BriskConfig, root: &Path) -> Self {
        Self {
            pipeline: Pipeline::Styles,
            entry: root.join(&config.styles.entry),
            output: root.join(&config.styles.output).join(STYLE_FILE),
            minified: root.join(&config.styles.dist).join(STYLE_MIN_FILE),
        }
    }

    pub fn scripts(config: &BriskConfig, root: &Path) -> Self {
        Self {
            pipeline: Pipeline::Scripts,
            entry: root.join(&config.scripts.entry),
            output: root.join(&config.scripts.output).join(SCRIPT_FILE),
            minified: root.join(&config.scripts.dist).join(SCRIPT_MIN_FILE),
        }
    }

    pub(crate) fn failed(&self, message: impl Into<String>) -> PipelineOutcome {
        PipelineOutcome::Failed(CompileFailure {
            pipeline: self.pipeline,
            title: COMPILE_ERROR_TITLE,
            message: message.into(),
        })
    }
}

/// Artifacts written by a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub pipeline: Pipeline,
    pub artifacts: Vec<Artifact>,
    pub duration: Duration,
}

impl BuildReport {
    /// File names of the written artifacts
    pub fn file_names(&self) -> Vec<String> {
        self.artifacts
            .iter()
            .filter_map(|a| a.path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect()
    }
}

/// A compile error caught inside a pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileFailure {
    pub pipeline: Pipeline,
    pub title: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Built(BuildReport),
    Failed(CompileFailure),
}

impl PipelineOutcome {
    pub fn is_built(&self) -> bool {
        matches!(self, PipelineOutcome::Built(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = BriskConfig::default();
        let root = Path::new("/site");

        let styles = PipelineDef::styles(&config, root);
        assert_eq!(styles.entry, PathBuf::from("/site/assets/sass/main.scss"));
        assert_eq!(styles.output, PathBuf::from("/site/assets/build/css/style.css"));
        assert_eq!(
            styles.minified,
            PathBuf::from("/site/assets/build/css/dist/style.min.css")
        );

        let scripts = PipelineDef::scripts(&config, root);
        assert_eq!(scripts.entry, PathBuf::from("/site/assets/js/main.js"));
        assert_eq!(scripts.output, PathBuf::from("/site/assets/build/js/app.js"));
        assert_eq!(
            scripts.minified,
            PathBuf::from("/site/assets/build/js/dist/app.min.js")
        );
    }

    #[test]
    fn test_failed_outcome_uses_compile_error_title() {
        let def = PipelineDef::styles(&BriskConfig::default(), Path::new("/site"));
        match def.failed("Undefined variable") {
            PipelineOutcome::Failed(failure) => {
                assert_eq!(failure.title, "Compile Error");
                assert_eq!(failure.message, "Undefined variable");
                assert_eq!(failure.pipeline, Pipeline::Styles);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_report_file_names() {
        let report = BuildReport {
            pipeline: Pipeline::Styles,
            artifacts: vec![
                Artifact {
                    path: PathBuf::from("/a/style.css"),
                    size: 10,
                },
                Artifact {
                    path: PathBuf::from("/a/dist/style.min.css"),
                    size: 5,
                },
            ],
            duration: Duration::from_millis(3),
        };
        assert_eq!(report.file_names(), vec!["style.css", "style.min.css"]);
    }
}
