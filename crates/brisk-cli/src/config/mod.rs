//! Configuration system with multi-source loading.
//!
//! Priority: CLI flags > `BRISK_*` environment > `brisk.toml` > defaults.
//! Every path is relative to the project root.
//!
//! A `brisk.toml` spelling out the defaults:
//!
//! ```toml
//! [styles]
//! base = "assets/sass"
//! entry = "assets/sass/main.scss"
//! output = "assets/build/css"
//! dist = "assets/build/css/dist"
//! watch = "assets/sass/**/*"
//! browsers = ["last 2 versions"]
//! compatibility = "ie10"
//! sourcemap = true
//! debounce = 100
//!
//! [scripts]
//! entry = "assets/js/main.js"
//! output = "assets/build/js"
//! dist = "assets/build/js/dist"
//! presets = ["es2015", "react"]
//! sourcemap = true
//! debounce = 100
//!
//! [server]
//! proxy = "jupe-by-jackie.dev"
//! browser = "google chrome"
//! port = 3000
//! host = "127.0.0.1"
//! open = true
//! ```

mod conversions;
mod defaults;
mod loading;
mod tests;
mod validation;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use defaults::*;

/// Configuration file name looked up in the project root
pub const CONFIG_FILE: &str = "brisk.toml";

/// Full brisk configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BriskConfig {
    pub styles: StylesConfig,
    pub scripts: ScriptsConfig,
    pub server: ServerConfig,
}

/// `[styles]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StylesConfig {
    /// Sass root directory (also a load path)
    pub base: PathBuf,

    /// Sass entry file
    pub entry: PathBuf,

    /// Directory for style.css
    pub output: PathBuf,

    /// Directory for style.min.css
    pub dist: PathBuf,

    /// Glob of files that trigger a styles rebuild
    pub watch: String,

    /// Browserslist queries for vendor prefixes
    pub browsers: Vec<String>,

    /// Minifier compatibility floor (`ie10`, `ie9`, `*`)
    pub compatibility: String,

    /// Inline a source map into style.css
    pub sourcemap: bool,

    /// Window (ms) in which repeated events for one Sass file count once
    pub debounce: u64,
}

/// `[scripts]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptsConfig {
    /// Script entry module
    pub entry: PathBuf,

    /// Directory for app.js
    pub output: PathBuf,

    /// Directory for app.min.js
    pub dist: PathBuf,

    /// Presets applied to first-party modules
    pub presets: Vec<String>,

    /// Inline a source map into app.js
    pub sourcemap: bool,

    /// Quiet period (ms) before a burst of changes triggers one rebundle
    pub debounce: u64,
}

/// `[server]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Upstream development site
    pub proxy: String,

    /// Browser application to open; empty means the system default
    pub browser: String,

    /// Preferred proxy port
    pub port: u16,

    /// Address the proxy binds to
    pub host: String,

    /// Open a browser once the proxy is up
    pub open: bool,
}
