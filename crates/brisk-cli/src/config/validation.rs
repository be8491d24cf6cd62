use crate::config::BriskConfig;
use crate::error::{CliError, ConfigError, Result};
use brisk_scripts::TransformPreset;
use brisk_styles::CompatFloor;

impl BriskConfig {
    /// Validate configuration values that serde alone cannot check.
    pub fn validate(&self) -> Result<()> {
        for (field, path) in [
            ("styles.entry", &self.styles.entry),
            ("scripts.entry", &self.scripts.entry),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::MissingField {
                    field: field.to_string(),
                    hint: "Point it at the entry file relative to the project root".to_string(),
                }
                .into());
            }
        }

        if self.styles.browsers.iter().all(|query| query.trim().is_empty()) {
            return Err(ConfigError::MissingField {
                field: "styles.browsers".to_string(),
                hint: "Add a browserslist query, e.g. browsers = [\"last 2 versions\"]"
                    .to_string(),
            }
            .into());
        }

        self.compat_floor()?;
        self.presets()?;

        if let Err(e) = glob::Pattern::new(&self.styles.watch) {
            return Err(ConfigError::InvalidValue {
                field: "styles.watch".to_string(),
                value: self.styles.watch.clone(),
                hint: format!("Not a valid glob pattern: {}", e.msg),
            }
            .into());
        }

        if self.server.proxy.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "server.proxy".to_string(),
                hint: "Set the development site to proxy, e.g. proxy = \"mysite.dev\"".to_string(),
            }
            .into());
        }

        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                value: "0".to_string(),
                hint: "Use a port between 1 and 65535".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Parsed `styles.compatibility`
    pub fn compat_floor(&self) -> Result<CompatFloor> {
        self.styles.compatibility.parse().map_err(|_| {
            ConfigError::InvalidValue {
                field: "styles.compatibility".to_string(),
                value: self.styles.compatibility.clone(),
                hint: "Use an IE floor such as 'ie10' or '*' for no floor".to_string(),
            }
            .into()
        })
    }

    /// Parsed `scripts.presets`
    pub fn presets(&self) -> Result<Vec<TransformPreset>> {
        self.scripts
            .presets
            .iter()
            .map(|name| {
                name.parse::<TransformPreset>().map_err(|_| {
                    CliError::from(ConfigError::InvalidValue {
                        field: "scripts.presets".to_string(),
                        value: name.clone(),
                        hint: "Supported presets are 'es2015' and 'react'".to_string(),
                    })
                })
            })
            .collect()
    }
}
