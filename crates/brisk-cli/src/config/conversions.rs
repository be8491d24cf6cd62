use crate::config::BriskConfig;
use crate::error::Result;
use brisk_scripts::ScriptOptions;
use brisk_styles::StyleOptions;
use std::path::Path;
use std::time::Duration;

impl BriskConfig {
    /// Stylesheet options with paths resolved against `root`.
    pub fn style_options(&self, root: &Path) -> Result<StyleOptions> {
        Ok(StyleOptions::new()
            .with_browsers(self.styles.browsers.clone())
            .with_compatibility(self.compat_floor()?)
            .with_source_maps(self.styles.sourcemap)
            .load_path(root.join(&self.styles.base)))
    }

    /// Script options with paths resolved against `root`.
    pub fn script_options(&self, root: &Path) -> Result<ScriptOptions> {
        Ok(ScriptOptions::new(&self.scripts.entry, root)
            .with_presets(self.presets()?)
            .with_source_maps(self.scripts.sourcemap)
            .with_debounce(Duration::from_millis(self.scripts.debounce)))
    }
}
