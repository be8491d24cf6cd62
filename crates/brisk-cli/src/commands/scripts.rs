//! `brisk scripts`

use crate::cli::Cli;
use crate::commands::{Project, finish, present};
use crate::dev::NoReload;
use crate::error::Result;
use crate::pipeline::{PipelineDef, scripts};
use brisk_scripts::BundleMode;

/// Bundle the script entry once.
pub async fn execute(args: &Cli) -> Result<()> {
    let project = Project::load(args, None)?;
    let def = PipelineDef::scripts(&project.config, &project.root);
    let options = project.config.script_options(&project.root)?;

    crate::ui::info(&format!("Starting 'scripts' ({})", def.entry.display()));
    let (_handle, outcome) = scripts::build(&def, options, BundleMode::Once).await?;
    present(&outcome, &NoReload);

    finish("scripts", &outcome)
}
