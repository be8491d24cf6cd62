//! Single rolldown pass over the entry

use crate::error::{Result, ScriptError};
use crate::options::ScriptOptions;
use crate::plugin::PresetTransformPlugin;
use rolldown::{BundlerBuilder, BundlerOptions, InputItem, OutputFormat, Platform, SourceMapType};
use rolldown_common::Output;
use rolldown_plugin::__inner::SharedPluginable;
use rustc_hash::FxHashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Output of one bundle pass
#[derive(Debug, Clone)]
pub struct ScriptBundle {
    /// Bundled IIFE without any source map comment
    pub code: String,

    /// Data URL of the source map, when enabled
    pub source_map_url: Option<String>,

    /// On-disk modules that went into this bundle
    pub modules: FxHashSet<PathBuf>,
}

impl ScriptBundle {
    /// Contents of the full artifact, with the source map inlined when present.
    pub fn to_file_contents(&self) -> String {
        match &self.source_map_url {
            Some(url) => {
                let mut out = String::with_capacity(self.code.len() + url.len() + 32);
                out.push_str(&self.code);
                if !self.code.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str("//# sourceMappingURL=");
                out.push_str(url);
                out.push('\n');
                out
            }
            None => self.code.clone(),
        }
    }
}

pub(crate) async fn bundle_entry(
    options: &ScriptOptions,
    plugin: &PresetTransformPlugin,
) -> Result<ScriptBundle> {
    plugin.begin_pass();
    let entry = options.entry_path();
    if !entry.is_file() {
        return Err(ScriptError::EntryNotFound(entry));
    }

    let bundler_options = BundlerOptions {
        input: Some(vec![InputItem {
            name: Some("app".to_string()),
            import: entry.to_string_lossy().into_owned(),
        }]),
        cwd: Some(options.cwd().to_path_buf()),
        format: Some(OutputFormat::Iife),
        platform: Some(Platform::Browser),
        sourcemap: options.source_map.then_some(SourceMapType::Hidden),
        ..Default::default()
    };

    let plugins: Vec<SharedPluginable> = vec![Arc::new(plugin.clone())];

    let mut bundler = BundlerBuilder::default()
        .with_options(bundler_options)
        .with_plugins(plugins)
        .build()
        .map_err(|e| ScriptError::from_rolldown_batch(&e))?;

    // A failed transform is reported as the preset error itself, not as
    // rolldown's wrapped plugin diagnostic.
    let output = bundler.generate().await.map_err(|e| {
        plugin
            .take_failure()
            .unwrap_or_else(|| ScriptError::from_rolldown_batch(&e))
    })?;

    let chunk = output
        .assets
        .iter()
        .find_map(|item| match item {
            Output::Chunk(chunk) => Some(chunk),
            Output::Asset(_) => None,
        })
        .ok_or(ScriptError::EmptyOutput)?;

    let mut modules: FxHashSet<PathBuf> = chunk
        .module_ids
        .iter()
        .map(|id| id.to_string())
        .filter(|id| !id.starts_with('\0'))
        .map(PathBuf::from)
        .filter(|path| path.is_file())
        .collect();
    modules.insert(entry);

    Ok(ScriptBundle {
        code: chunk.code.clone(),
        source_map_url: chunk.map.as_ref().map(|map| map.to_data_url()),
        modules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_contents_without_map() {
        let bundle = ScriptBundle {
            code: "(function(){})();\n".to_string(),
            source_map_url: None,
            modules: FxHashSet::default(),
        };
        assert_eq!(bundle.to_file_contents(), "(function(){})();\n");
    }

    #[test]
    fn test_file_contents_appends_map_comment() {
        let bundle = ScriptBundle {
            code: "(function(){})();".to_string(),
            source_map_url: Some("data:application/json;base64,e30=".to_string()),
            modules: FxHashSet::default(),
        };
        assert_eq!(
            bundle.to_file_contents(),
            "(function(){})();\n//# sourceMappingURL=data:application/json;base64,e30=\n"
        );
    }
}
