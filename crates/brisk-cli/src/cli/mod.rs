//! Command-line interface definition for brisk.
//!
//! # Tasks
//!
//! - `brisk scripts` - Bundle the script entry once
//! - `brisk styles` - Compile the Sass entry once
//! - `brisk browser-sync` - Start the live-reload proxy
//! - `brisk default` - Build everything, start the proxy and watch (also the
//!   task that runs when no subcommand is given)


use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// brisk - Sass, scripts and a live-reload proxy
#[derive(Parser, Debug)]
#[command(
    name = "brisk",
    version,
    about = "Sass, scripts and a live-reload proxy for theme development",
    long_about = "brisk compiles assets/sass into style.css and style.min.css, bundles\n\
                  assets/js/main.js into app.js and app.min.js, and proxies the local site\n\
                  so browsers reload after every successful rebuild."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project root (defaults to the current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Config file (defaults to brisk.toml in the project root)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Task to run (defaults to `default`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The task to run, falling back to `default`.
    pub fn task(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Default(ServeArgs::default()))
    }
}

/// Available tasks
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Bundle the script entry into app.js and app.min.js
    Scripts,

    /// Compile the Sass entry into style.css and style.min.css
    Styles,

    /// Start the live-reload proxy in front of the development site
    #[command(name = "browser-sync")]
    BrowserSync(ServeArgs),

    /// Build scripts and styles, start the proxy, then watch for changes
    Default(ServeArgs),
}

impl Command {
    /// Task name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Command::Scripts => "scripts",
            Command::Styles => "styles",
            Command::BrowserSync(_) => "browser-sync",
            Command::Default(_) => "default",
        }
    }
}

/// Proxy server overrides
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ServeArgs {
    /// Port for the proxy (the next free port is used when taken)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Upstream development site to proxy (e.g. `mysite.dev` or `http://localhost:8080`)
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Browser application to open (e.g. "google chrome", "firefox")
    #[arg(long)]
    pub browser: Option<String>,

    /// Do not open a browser
    #[arg(long)]
    pub no_open: bool,
}
