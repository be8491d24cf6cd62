//! `brisk styles`

use crate::cli::Cli;
use crate::commands::{Project, finish, present};
use crate::dev::NoReload;
use crate::error::Result;
use crate::pipeline::{PipelineDef, styles};

/// Compile the Sass entry once.
pub async fn execute(args: &Cli) -> Result<()> {
    let project = Project::load(args, None)?;
    let def = PipelineDef::styles(&project.config, &project.root);
    let options = project.config.style_options(&project.root)?;

    crate::ui::info(&format!("Starting 'styles' ({})", def.entry.display()));
    let outcome = styles::run(&def, &options).await;
    present(&outcome, &NoReload);

    finish("styles", &outcome)
}
