//! Error types for script bundling

use std::path::PathBuf;
use std::sync::LazyLock;
use thiserror::Error;

/// Result type for script operations
pub type Result<T> = std::result::Result<T, ScriptError>;

/// Errors produced while bundling, transforming or minifying scripts
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The entry module does not exist
    #[error("Script entry not found: {}", .0.display())]
    EntryNotFound(PathBuf),

    /// A preset name was not recognised
    #[error("Unknown preset '{0}' (expected 'es2015' or 'react')")]
    UnknownPreset(String),

    /// Preset options could not be built
    #[error("Invalid preset configuration: {0}")]
    Preset(String),

    /// A module failed to parse or transform
    #[error("{}: {message}", file.display())]
    Transform { file: PathBuf, message: String },

    /// Rolldown reported one or more build diagnostics
    #[error("{0}")]
    Bundle(String),

    /// The bundle contained no entry chunk
    #[error("Bundler produced no output chunk")]
    EmptyOutput,

    /// The minifier could not parse the bundle
    #[error("Failed to minify bundle: {0}")]
    Minify(String),

    /// Dependency watching could not be set up
    #[error("Failed to watch dependencies: {0}")]
    Watch(#[from] notify::Error),
}

static MESSAGE_FIELD: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r#"message: "((?:[^"\\]|\\.)*)""#).expect("valid message regex")
});

impl ScriptError {
    /// Create a bundle error from a Rolldown error.
    ///
    /// Rolldown diagnostics only expose a stable `Debug` form, so the
    /// `message` fields are pulled out of it, then any `Caused by:` chain of a
    /// wrapped plugin error. Falls back to the text without its backtrace.
    pub fn from_rolldown_batch(error: &dyn std::fmt::Debug) -> Self {
        let raw = format!("{error:?}");
        let text = without_backtrace(&raw);

        let mut messages: Vec<String> = MESSAGE_FIELD
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| unescape(m.as_str()))
            .filter(|m| !m.is_empty())
            .collect();
        if messages.is_empty() {
            messages = error_causes(text);
        }

        if messages.is_empty() {
            ScriptError::Bundle(text.trim().to_string())
        } else {
            ScriptError::Bundle(messages.join("\n"))
        }
    }
}

fn without_backtrace(text: &str) -> &str {
    text.find("Stack backtrace:").map_or(text, |pos| &text[..pos])
}

/// Messages following `Caused by:`, either on the same line or the next one.
fn error_causes(text: &str) -> Vec<String> {
    let mut causes: Vec<String> = Vec::new();
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        let Some(pos) = line.find("Caused by:") else {
            continue;
        };
        let rest = line[pos + "Caused by:".len()..].trim();
        let cause = if rest.is_empty() {
            lines.next().map(str::trim).unwrap_or_default()
        } else {
            rest
        };

        let cause = clean_cause(cause);
        if !cause.is_empty() && !causes.iter().any(|c| c == cause) {
            causes.push(cause.to_string());
        }
    }

    causes
}

/// "0: a.js: Unexpected token, severity: Error }])" → "a.js: Unexpected token"
fn clean_cause(cause: &str) -> &str {
    let cause = cause.find(", severity:").map_or(cause, |pos| &cause[..pos]);
    let cause = match cause.split_once(": ") {
        Some((index, rest)) if !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()) => {
            rest
        }
        _ => cause,
    };
    cause.trim_end_matches(['}', ']', ')', ',', ' ']).trim()
}

fn unescape(s: &str) -> String {
    s.replace("\\n", "\n")
        .replace("\\\"", "\"")
        .replace("\\'", "'")
        .replace("\\\\", "\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    #[allow(dead_code)]
    struct FakeDiagnostic {
        kind: &'static str,
        message: &'static str,
    }

    #[test]
    fn test_from_rolldown_batch_extracts_messages() {
        let diagnostics = vec![
            FakeDiagnostic {
                kind: "UnresolvedImport",
                message: "Could not resolve './missing'",
            },
            FakeDiagnostic {
                kind: "Parse",
                message: "Unexpected token \"}\"",
            },
        ];

        let err = ScriptError::from_rolldown_batch(&diagnostics);
        assert_eq!(
            err.to_string(),
            "Could not resolve './missing'\nUnexpected token \"}\""
        );
    }

    #[test]
    fn test_from_rolldown_batch_falls_back_to_debug() {
        let err = ScriptError::from_rolldown_batch(&"opaque failure");
        assert_eq!(err.to_string(), "\"opaque failure\"");
    }

    #[test]
    fn test_from_rolldown_batch_reads_plugin_cause_chain() {
        let raw = "BatchedBuildDiagnostic([BuildDiagnostic { inner: PluginError { \
                   plugin: CausedPlugin { name: \"brisk:presets\" }, error: transform failed\n\n\
                   Caused by:\n    /site/assets/js/extra.js: Unexpected token\n\n\
                   Stack backtrace:\n   0: anyhow::error::object_drop\n   1: rolldown::module_loader \
                   }, severity: Error }])";

        let err = ScriptError::from_rolldown_batch(&Raw(raw));
        assert_eq!(err.to_string(), "/site/assets/js/extra.js: Unexpected token");
    }

    #[test]
    fn test_clean_cause() {
        assert_eq!(clean_cause("0: a.js: Unexpected token"), "a.js: Unexpected token");
        assert_eq!(
            clean_cause("a.js: Unexpected token }, severity: Error }])"),
            "a.js: Unexpected token"
        );
    }

    /// Debug prints the text unquoted, like an embedded anyhow error
    struct Raw(&'static str);

    impl std::fmt::Debug for Raw {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.0)
        }
    }

    #[test]
    fn test_transform_error_names_file() {
        let err = ScriptError::Transform {
            file: PathBuf::from("assets/js/main.js"),
            message: "Unexpected token".to_string(),
        };
        assert_eq!(err.to_string(), "assets/js/main.js: Unexpected token");
    }
}
