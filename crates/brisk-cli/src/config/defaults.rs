use super::{ScriptsConfig, ServerConfig, StylesConfig};
use std::path::PathBuf;

pub const DEFAULT_PROXY: &str = "jupe-by-jackie.dev";
pub const DEFAULT_BROWSER: &str = "google chrome";
pub const DEFAULT_PORT: u16 = 3000;

impl Default for StylesConfig {
    fn default() -> Self {
        Self {
            base: PathBuf::from("assets/sass"),
            entry: PathBuf::from("assets/sass/main.scss"),
            output: PathBuf::from("assets/build/css"),
            dist: PathBuf::from("assets/build/css/dist"),
            watch: "assets/sass/**/*".to_string(),
            browsers: vec!["last 2 versions".to_string()],
            compatibility: "ie10".to_string(),
            sourcemap: true,
            debounce: 100,
        }
    }
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            entry: PathBuf::from("assets/js/main.js"),
            output: PathBuf::from("assets/build/js"),
            dist: PathBuf::from("assets/build/js/dist"),
            presets: vec!["es2015".to_string(), "react".to_string()],
            sourcemap: true,
            debounce: 100,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            proxy: DEFAULT_PROXY.to_string(),
            browser: DEFAULT_BROWSER.to_string(),
            port: DEFAULT_PORT,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}
