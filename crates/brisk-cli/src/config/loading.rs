use crate::cli::ServeArgs;
use crate::config::{BriskConfig, CONFIG_FILE};
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

const ENV_SECTIONS: [&str; 3] = ["styles_", "scripts_", "server_"];

/// Flag values that override the `[server]` section
#[derive(Debug, Default, Serialize)]
struct FlagOverrides {
    server: ServerOverrides,
}

#[derive(Debug, Default, Serialize)]
struct ServerOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    browser: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    open: Option<bool>,
}

impl From<&ServeArgs> for FlagOverrides {
    fn from(args: &ServeArgs) -> Self {
        Self {
            server: ServerOverrides {
                proxy: args.proxy.clone(),
                browser: args.browser.clone(),
                port: args.port,
                open: args.no_open.then_some(false),
            },
        }
    }
}

impl BriskConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI flags > environment variables > config file > defaults
    pub fn load(root: &Path, config_path: Option<&Path>, serve: Option<&ServeArgs>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(BriskConfig::default()));

        if let Some(path) = Self::config_file(root, config_path)? {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Toml::file(path));
        }

        // BRISK_SERVER_PORT=4000 → server.port
        figment = figment.merge(
            Env::prefixed("BRISK_")
                .filter(|key| {
                    let key = key.as_str().to_ascii_lowercase();
                    ENV_SECTIONS.iter().any(|section| key.starts_with(section))
                })
                .split("_"),
        );

        if let Some(args) = serve {
            figment = figment.merge(Serialized::defaults(FlagOverrides::from(args)));
        }

        figment.extract().map_err(|e| {
            let field = if e.path.is_empty() {
                "configuration".to_string()
            } else {
                e.path.join(".")
            };
            ConfigError::InvalidValue {
                field,
                value: e.to_string(),
                hint: format!("Check {} syntax and field types", CONFIG_FILE),
            }
            .into()
        })
    }

    fn config_file(root: &Path, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        match explicit {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    root.join(path)
                };
                if path.is_file() {
                    Ok(Some(path))
                } else {
                    Err(ConfigError::NotFound(path).into())
                }
            }
            None => {
                let default_path = root.join(CONFIG_FILE);
                Ok(default_path.is_file().then_some(default_path))
            }
        }
    }
}
