//! Preset transforms for first-party modules

use crate::error::{Result, ScriptError};
use crate::options::TransformPreset;
use oxc_allocator::Allocator;
use oxc_codegen::Codegen;
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;
use oxc_transformer::{JsxOptions, JsxRuntime, TransformOptions, Transformer};
use std::fmt;
use std::path::Path;

/// Compiled set of presets, ready to apply to module sources.
pub struct PresetTransform {
    presets: Vec<TransformPreset>,
    options: TransformOptions,
}

impl PresetTransform {
    pub fn new(presets: &[TransformPreset]) -> Result<Self> {
        let mut options = if presets.contains(&TransformPreset::Es2015) {
            TransformOptions::from_target("es2015").map_err(|e| ScriptError::Preset(e.to_string()))?
        } else {
            TransformOptions::default()
        };

        if presets.contains(&TransformPreset::React) {
            options.jsx = JsxOptions {
                runtime: JsxRuntime::Classic,
                ..JsxOptions::default()
            };
        }

        Ok(Self {
            presets: presets.to_vec(),
            options,
        })
    }

    /// True when no preset is configured and sources pass through untouched.
    pub fn is_passthrough(&self) -> bool {
        self.presets.is_empty()
    }

    /// Transform one module. JSX is only accepted with the `react` preset.
    pub fn apply(&self, path: &Path, source: &str) -> Result<String> {
        let allocator = Allocator::default();
        let jsx = self.presets.contains(&TransformPreset::React);
        let source_type = SourceType::from_path(path)
            .unwrap_or_default()
            .with_jsx(jsx);

        let parsed = Parser::new(&allocator, source, source_type).parse();
        if let Some(error) = parsed.errors.first() {
            return Err(ScriptError::Transform {
                file: path.to_path_buf(),
                message: error.to_string(),
            });
        }

        let mut program = parsed.program;
        let scoping = SemanticBuilder::new()
            .build(&program)
            .semantic
            .into_scoping();

        let transformed = Transformer::new(&allocator, path, &self.options)
            .build_with_scoping(scoping, &mut program);
        if let Some(error) = transformed.errors.first() {
            return Err(ScriptError::Transform {
                file: path.to_path_buf(),
                message: error.to_string(),
            });
        }

        Ok(Codegen::new().build(&program).code)
    }
}

impl fmt::Debug for PresetTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresetTransform")
            .field("presets", &self.presets)
            .finish()
    }
}
