use crate::error::{Result, StyleError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use parcel_sourcemap::SourceMap;
use std::path::Path;

/// Map whose single source is the CSS grass produced, not the Sass files.
pub(crate) fn new_map(source_name: &str, source: &str) -> Result<SourceMap> {
    let mut map = SourceMap::new("/");
    let index = map.add_source(source_name);
    map.set_source_content(index as usize, source)
        .map_err(|e| StyleError::SourceMap(format!("{e:?}")))?;
    Ok(map)
}

/// "assets/sass/main.scss" → "main.css"
pub(crate) fn compiled_source_name(entry: &Path) -> String {
    let stem = entry
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    format!("{stem}.css")
}

pub(crate) fn to_json(map: &mut SourceMap) -> Result<String> {
    map.to_json(None).map_err(|e| StyleError::SourceMap(format!("{e:?}")))
}

/// Append `map` to `css` as a base64 `sourceMappingURL` comment.
pub fn inline_source_map(css: &str, map: &str) -> String {
    let mut out = String::with_capacity(css.len() + map.len() * 4 / 3 + 80);
    out.push_str(css);
    if !css.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("/*# sourceMappingURL=data:application/json;charset=utf-8;base64,");
    out.push_str(&STANDARD.encode(map));
    out.push_str(" */\n");
    out
}
