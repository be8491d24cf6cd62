//! brisk CLI entry point.
//!
//! Parses arguments, initialises logging and dispatches to the requested task.

use clap::Parser;
use brisk_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let task = args.task();
    let result = match task {
        cli::Command::Scripts => commands::scripts_execute(&args).await,
        cli::Command::Styles => commands::styles_execute(&args).await,
        cli::Command::BrowserSync(ref serve) => commands::browser_sync_execute(&args, serve).await,
        cli::Command::Default(ref serve) => commands::default_execute(&args, serve).await,
    };

    result.map_err(error::cli_error_to_miette)
}
