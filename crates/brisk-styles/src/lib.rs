//! Stylesheet processing for brisk
//!
//! Turns a Sass entry file into two artifacts:
//!
//! ```text
//! main.scss → grass → lightningcss (prefix for targets) → style.css (+ inline map)
//!                                        └→ lightningcss (minify, compat floor) → style.min.css
//! ```
//!
//! Compilation and minification are separate calls so callers can write the
//! full artifact before the minified one is produced.
//!
//! ## Example
//!
//! ```rust,no_run
//! use brisk_styles::{StyleOptions, compile, minify};
//! use std::path::Path;
//!
//! # fn main() -> brisk_styles::Result<()> {
//! let options = StyleOptions::new().with_browsers(vec!["last 2 versions".to_string()]);
//! let compiled = compile(Path::new("assets/sass/main.scss"), &options)?;
//! let minified = minify(&compiled.css, &options)?;
//! # Ok(())
//! # }
//! ```

mod compat;
mod error;
mod minify;
mod options;
mod prefix;
mod sass;
mod source_map;

pub use compat::CompatFloor;
pub use error::{CssStage, Result, StyleError};
pub use options::StyleOptions;
pub use prefix::CompiledStyles;
pub use source_map::inline_source_map;

use lightningcss::targets::Targets;
use std::path::Path;

/// Compile a Sass entry and add the vendor prefixes required by
/// `options.browsers`.
pub fn compile(entry: &Path, options: &StyleOptions) -> Result<CompiledStyles> {
    let css = sass::compile_sass(entry, &options.load_paths)?;
    let targets = Targets {
        browsers: compat::browsers_for(&options.browsers)?,
        ..Targets::default()
    };

    let filename = entry.to_string_lossy();
    let map_source = source_map::compiled_source_name(entry);
    let compiled = prefix::autoprefix(
        &css,
        &filename,
        targets,
        options.source_map.then_some(map_source.as_str()),
    )?;

    tracing::debug!(
        entry = %entry.display(),
        sass_bytes = css.len(),
        css_bytes = compiled.css.len(),
        "compiled stylesheet"
    );

    Ok(compiled)
}

/// Minify already-prefixed CSS.
///
/// The browser query is lowered to the compatibility floor so prefixes added
/// by [`compile`] survive minification.
pub fn minify(css: &str, options: &StyleOptions) -> Result<String> {
    let browsers = compat::browsers_for(&options.browsers)?;
    let targets = Targets {
        browsers: options.compatibility.apply(browsers),
        ..Targets::default()
    };
    minify::minify_css(css, "style.css", targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_entry(dir: &TempDir, source: &str) -> std::path::PathBuf {
        let entry = dir.path().join("main.scss");
        fs::write(&entry, source).unwrap();
        entry
    }

    #[test]
    fn test_compile_prefixes_for_old_browsers() {
        let dir = TempDir::new().unwrap();
        let entry = write_entry(&dir, "$layout: flex;\n.box { display: $layout; }\n");
        let options = StyleOptions::new().with_browsers(vec!["safari 6".to_string()]);

        let compiled = compile(&entry, &options).unwrap();
        assert!(compiled.css.contains(".box"));
        assert!(compiled.css.contains("-webkit-"));
    }

    #[test]
    fn test_prefixes_survive_minification() {
        let dir = TempDir::new().unwrap();
        let entry = write_entry(&dir, ".box {\n  display: flex;\n}\n");
        let options = StyleOptions::new().with_browsers(vec!["safari 6".to_string()]);

        let compiled = compile(&entry, &options).unwrap();
        let minified = minify(&compiled.css, &options).unwrap();

        assert!(minified.contains("-webkit-"));
        assert!(minified.len() < compiled.css.len());
        assert!(!minified.contains('\n'));
    }

    #[test]
    fn test_compile_embeds_source_map() {
        let dir = TempDir::new().unwrap();
        let entry = write_entry(&dir, "a { color: red; }\n");
        let options = StyleOptions::new().with_source_maps(true);

        let compiled = compile(&entry, &options).unwrap();
        assert!(compiled.source_map.is_some());
        assert!(compiled.to_file_contents().contains("sourceMappingURL=data:application/json"));
    }

    #[test]
    fn test_compile_reports_sass_errors() {
        let dir = TempDir::new().unwrap();
        let entry = write_entry(&dir, ".box { color: $missing; }\n");

        let err = compile(&entry, &StyleOptions::new()).unwrap_err();
        assert!(matches!(err, StyleError::Sass { .. }));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_minify_rejects_bad_query() {
        let options = StyleOptions::new().with_browsers(vec!["not a real browser 99".to_string()]);
        let err = minify("a { color: red }", &options).unwrap_err();
        assert!(matches!(err, StyleError::Targets { .. }));
    }
}
