use crate::error::{Result, StyleError};
use std::path::{Path, PathBuf};

/// Compile a Sass/SCSS entry with expanded output.
pub(crate) fn compile_sass(entry: &Path, load_paths: &[PathBuf]) -> Result<String> {
    if !entry.is_file() {
        return Err(StyleError::EntryNotFound(entry.to_path_buf()));
    }

    let mut options = grass::Options::default().style(grass::OutputStyle::Expanded);
    for path in load_paths {
        options = options.load_path(path);
    }

    grass::from_path(entry, &options).map_err(|e| StyleError::Sass {
        file: entry.to_path_buf(),
        message: e.to_string(),
    })
}
