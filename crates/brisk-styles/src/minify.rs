use crate::error::{CssStage, Result, StyleError};
use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, StyleSheet};
use lightningcss::targets::Targets;

/// Minify CSS for the given targets.
pub(crate) fn minify_css(css: &str, filename: &str, targets: Targets) -> Result<String> {
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

    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            targets,
            ..Default::default()
        })
        .map_err(|e| StyleError::css(filename, CssStage::Print, e))?;

    Ok(result.code)
}
