//! Miette diagnostic conversion for CLI errors.

use crate::error::{CliError, ConfigError};
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::Server(msg) => miette::miette!(
            help = "Is another process using the port? Try --port",
            "Proxy server error: {}",
            msg
        ),
        CliError::TaskFailed { task } => miette::miette!(
            help = "See the compile error above",
            "Task '{}' failed",
            task
        ),
        _ => miette::miette!("{}", err),
    }
}

fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::InvalidValue { field, value, hint } => miette::miette!(
            help = hint,
            "Invalid value for '{}': {}",
            field,
            value
        ),
        ConfigError::MissingField { field, hint } => {
            miette::miette!(help = hint, "Missing required field: {}", field)
        }
        other => miette::miette!("Configuration error: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_moves_hint_to_help() {
        let report = cli_error_to_miette(CliError::Config(ConfigError::InvalidValue {
            field: "server.port".to_string(),
            value: "0".to_string(),
            hint: "Use a port between 1 and 65535".to_string(),
        }));
        assert_eq!(report.to_string(), "Invalid value for 'server.port': 0");
        let help = report.help().map(|h| h.to_string());
        assert_eq!(help.as_deref(), Some("Use a port between 1 and 65535"));
    }

    #[test]
    fn test_generic_error_keeps_message() {
        let report = cli_error_to_miette(CliError::Custom("boom".to_string()));
        assert_eq!(report.to_string(), "boom");
    }
}
