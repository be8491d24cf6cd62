//! Stylesheet processing configuration types

use crate::compat::CompatFloor;
use std::path::PathBuf;

/// Configuration options for stylesheet processing
#[derive(Debug, Clone)]
pub struct StyleOptions {
    /// Browserslist queries used for vendor prefixing
    ///
    /// Defaults to `["last 2 versions"]`. An empty list disables prefixing.
    pub browsers: Vec<String>,

    /// Oldest browser the minified output must stay compatible with
    pub compatibility: CompatFloor,

    /// Embed an inline source map in the full (non-minified) artifact
    pub source_map: bool,

    /// Extra directories searched by `@import` / `@use`
    pub load_paths: Vec<PathBuf>,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            browsers: vec!["last 2 versions".to_string()],
            compatibility: CompatFloor::Ie(10),
            source_map: false,
            load_paths: Vec::new(),
        }
    }
}

impl StyleOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set browser targets
    pub fn with_browsers(mut self, browsers: Vec<String>) -> Self {
        self.browsers = browsers;
        self
    }

    /// Set the compatibility floor for minified output
    pub fn with_compatibility(mut self, floor: CompatFloor) -> Self {
        self.compatibility = floor;
        self
    }

    /// Enable source maps
    pub fn with_source_maps(mut self, enabled: bool) -> Self {
        self.source_map = enabled;
        self
    }

    /// Add a Sass load path
    pub fn load_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.load_paths.push(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = StyleOptions::default();
        assert_eq!(opts.browsers, vec!["last 2 versions".to_string()]);
        assert_eq!(opts.compatibility, CompatFloor::Ie(10));
        assert!(!opts.source_map);
        assert!(opts.load_paths.is_empty());
    }

    #[test]
    fn test_builder_pattern() {
        let opts = StyleOptions::new()
            .with_browsers(vec!["chrome >= 90".to_string()])
            .with_compatibility(CompatFloor::Any)
            .with_source_maps(true)
            .load_path("vendor/sass");

        assert_eq!(opts.browsers.len(), 1);
        assert_eq!(opts.compatibility, CompatFloor::Any);
        assert!(opts.source_map);
        assert_eq!(opts.load_paths, vec![PathBuf::from("vendor/sass")]);
    }
}
