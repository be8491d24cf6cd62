//! Script bundling configuration types

use crate::error::ScriptError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Source transform applied to every first-party module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformPreset {
    /// Lower modern syntax to the es2015 target
    Es2015,
    /// Compile JSX with the classic `React.createElement` runtime
    React,
}

impl FromStr for TransformPreset {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es2015" | "es6" => Ok(TransformPreset::Es2015),
            "react" => Ok(TransformPreset::React),
            _ => Err(ScriptError::UnknownPreset(s.to_string())),
        }
    }
}

impl fmt::Display for TransformPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformPreset::Es2015 => write!(f, "es2015"),
            TransformPreset::React => write!(f, "react"),
        }
    }
}

/// Whether a [`BundlerHandle`](crate::BundlerHandle) keeps watching after the first bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleMode {
    Once,
    Watch,
}

/// Options for bundling one browser entry
#[derive(Debug, Clone)]
pub struct ScriptOptions {
    /// Entry module (relative paths resolve against `cwd`)
    pub entry: PathBuf,

    /// Project root used for module resolution
    pub cwd: PathBuf,

    /// Presets applied to first-party modules
    pub presets: Vec<TransformPreset>,

    /// Produce a source map for the full bundle
    pub source_map: bool,

    /// Quiet period before a batch of file changes becomes one update
    pub debounce: Duration,
}

impl ScriptOptions {
    /// Options with the default presets (`es2015`, `react`) and source maps on
    pub fn new(entry: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            entry: entry.into(),
            cwd: cwd.into(),
            presets: vec![TransformPreset::Es2015, TransformPreset::React],
            source_map: true,
            debounce: Duration::from_millis(100),
        }
    }

    pub fn with_presets(mut self, presets: Vec<TransformPreset>) -> Self {
        self.presets = presets;
        self
    }

    pub fn with_source_maps(mut self, enabled: bool) -> Self {
        self.source_map = enabled;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Absolute path of the entry module
    pub fn entry_path(&self) -> PathBuf {
        if self.entry.is_absolute() {
            self.entry.clone()
        } else {
            self.cwd.join(&self.entry)
        }
    }

    pub(crate) fn has_preset(&self, preset: TransformPreset) -> bool {
        self.presets.contains(&preset)
    }

    pub(crate) fn cwd(&self) -> &Path {
        &self.cwd
    }
}
