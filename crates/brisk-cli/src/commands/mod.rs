//! Task implementations.
//!
//! Each task loads the project configuration, runs its pipelines and hands
//! every [`PipelineOutcome`](crate::pipeline::PipelineOutcome) to
//! [`present`], which is the only place outcomes turn into terminal output
//! and browser events.

mod browser_sync;
mod default;
mod report;
mod scripts;
mod styles;

pub use browser_sync::execute as browser_sync_execute;
pub use default::{execute as default_execute, watch_scripts, watch_styles};
pub use report::{present, report_failure};
pub use scripts::execute as scripts_execute;
pub use styles::execute as styles_execute;

use crate::cli::{Cli, ServeArgs};
use crate::config::BriskConfig;
use crate::error::{CliError, Result, ResultExt};
use crate::pipeline::PipelineOutcome;
use std::path::PathBuf;

/// Project root and its resolved configuration
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: BriskConfig,
}

impl Project {
    /// Resolve the project root from `--cwd` and load its configuration.
    pub fn load(args: &Cli, serve: Option<&ServeArgs>) -> Result<Self> {
        let current = std::env::current_dir().context("Cannot determine the working directory")?;
        let root = match &args.cwd {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => current.join(dir),
            None => current,
        };

        let root = root.canonicalize().with_path(&root)?;
        if !root.is_dir() {
            return Err(CliError::InvalidArgument(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let config = BriskConfig::load(&root, args.config.as_deref(), serve)?;
        config.validate()?;
        tracing::debug!(root = %root.display(), ?config, "configuration loaded");

        Ok(Self { root, config })
    }
}

/// Turn a failed one-shot run into a non-zero exit.
fn finish(task: &str, outcome: &PipelineOutcome) -> Result<()> {
    if outcome.is_built() {
        Ok(())
    } else {
        Err(CliError::TaskFailed {
            task: task.to_string(),
        })
    }
}
