//! Vendor prefixing pass
//!
//! ```text
//! compiled CSS → parse → handlers add prefixes for targets → print (expanded)
//! ```

use crate::error::{CssStage, Result, StyleError};
use crate::source_map;
use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, StyleSheet};
use lightningcss::targets::Targets;

/// Prefixed, human-readable CSS plus an optional source map (JSON).
#[derive(Debug, Clone)]
pub struct CompiledStyles {
    pub css: String,
    pub source_map: Option<String>,
}

impl CompiledStyles {
    /// Contents of the full artifact, with the map inlined when present.
    pub fn to_file_contents(&self) -> String {
        match &self.source_map {
            Some(map) => source_map::inline_source_map(&self.css, map),
            None => self.css.clone(),
        }
    }
}

/// Prefix `css` for `targets`. With `map_source`, also build a source map
/// whose single source carries that name.
pub(crate) fn autoprefix(
    css: &str,
    filename: &str,
    targets: Targets,
    map_source: Option<&str>,
) -> Result<CompiledStyles> {
    let mut stylesheet = StyleSheet::parse(
        css,
        ParserOptions {
            filename: filename.to_string(),
            ..Default::default()
        },
    )
    .map_err(|e| StyleError::css(filename, CssStage::Parse, e))?;

    stylesheet
        .minify(MinifyOptions {
            targets,
            ..Default::default()
        })
        .map_err(|e| StyleError::css(filename, CssStage::Transform, e))?;

    let mut map = map_source
        .map(|name| source_map::new_map(name, css))
        .transpose()?;

    let result = stylesheet
        .to_css(PrinterOptions {
            minify: false,
            source_map: map.as_mut(),
            targets,
            ..Default::default()
        })
        .map_err(|e| StyleError::css(filename, CssStage::Print, e))?;

    let source_map = map.map(|mut map| source_map::to_json(&mut map)).transpose()?;

    Ok(CompiledStyles {
        css: result.code,
        source_map,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_css_passes_through() {
        let out = autoprefix("body { color: red; }", "test.css", Targets::default(), None).unwrap();
        assert!(out.css.contains("color"));
        assert!(out.source_map.is_none());
        assert_eq!(out.to_file_contents(), out.css);
    }

    #[test]
    fn test_late_import_is_a_parse_error() {
        let err = autoprefix(
            "a { color: red; }\n@import 'late.css';\n",
            "broken.css",
            Targets::default(),
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StyleError::Css {
                stage: CssStage::Parse,
                ..
            }
        ));
    }

    #[test]
    fn test_source_map_is_json() {
        let out = autoprefix(
            "a { color: red; }",
            "main.scss",
            Targets::default(),
            Some("main.css"),
        )
        .unwrap();
        let map = out.source_map.unwrap();
        assert!(map.contains("\"mappings\""));
        assert!(map.contains("main.css"));
        assert!(!map.contains("main.scss"));
    }
}
