//! Rolldown plugin running the preset transforms

use crate::error::ScriptError;
use crate::transform::PresetTransform;
use parking_lot::Mutex;
use rolldown_common::ModuleType;
use rolldown_plugin::{
    HookTransformArgs, HookTransformOutput, HookTransformReturn, HookUsage, Plugin,
    SharedTransformPluginContext,
};
use rustc_hash::FxHashSet;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Applies [`PresetTransform`] to first-party JavaScript before rolldown
/// parses it, so JSX is accepted in plain `.js` files.
///
/// Modules under `node_modules` and virtual modules are left alone.
///
/// Clones share one pass record: every module id rolldown hands to the hook
/// and the first transform failure, reset by [`begin_pass`](Self::begin_pass).
#[derive(Debug, Clone)]
pub struct PresetTransformPlugin {
    transform: Arc<PresetTransform>,
    pass: Arc<Mutex<PassRecord>>,
}

#[derive(Debug, Default)]
struct PassRecord {
    modules: FxHashSet<PathBuf>,
    failure: Option<(PathBuf, String)>,
}

impl PresetTransformPlugin {
    pub fn new(transform: Arc<PresetTransform>) -> Self {
        Self {
            transform,
            pass: Arc::default(),
        }
    }

    pub(crate) fn begin_pass(&self) {
        let mut pass = self.pass.lock();
        pass.modules.clear();
        pass.failure = None;
    }

    /// On-disk modules seen since the last [`begin_pass`](Self::begin_pass),
    /// including ones that failed to transform.
    pub(crate) fn seen_modules(&self) -> FxHashSet<PathBuf> {
        self.pass
            .lock()
            .modules
            .iter()
            .filter(|path| path.is_file())
            .cloned()
            .collect()
    }

    /// First transform failure of the current pass.
    pub(crate) fn take_failure(&self) -> Option<ScriptError> {
        self.pass
            .lock()
            .failure
            .take()
            .map(|(file, message)| ScriptError::Transform { file, message })
    }

    fn record(&self, module_id: &str) {
        if !module_id.starts_with('\0') {
            self.pass.lock().modules.insert(PathBuf::from(module_id));
        }
    }

    fn record_failure(&self, error: &ScriptError) {
        if let ScriptError::Transform { file, message } = error {
            let mut pass = self.pass.lock();
            if pass.failure.is_none() {
                pass.failure = Some((file.clone(), message.clone()));
            }
        }
    }

    fn should_transform(id: &str, module_type: &ModuleType) -> bool {
        if id.starts_with('\0') || id.contains("/node_modules/") || id.contains("\\node_modules\\") {
            return false;
        }
        matches!(module_type, ModuleType::Js | ModuleType::Jsx)
    }
}

impl Plugin for PresetTransformPlugin {
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed("brisk:presets")
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::Transform
    }

    fn transform(
        &self,
        _ctx: SharedTransformPluginContext,
        args: &HookTransformArgs<'_>,
    ) -> impl std::future::Future<Output = HookTransformReturn> + Send {
        let module_id = args.id.to_string();
        let code = args.code.to_string();
        let module_type = args.module_type.clone();
        let plugin = self.clone();
        plugin.record(&module_id);

        async move {
            if plugin.transform.is_passthrough()
                || !Self::should_transform(&module_id, &module_type)
            {
                return Ok(None);
            }

            let output = plugin
                .transform
                .apply(Path::new(&module_id), &code)
                .inspect_err(|e| plugin.record_failure(e))?;
            tracing::trace!(module = %module_id, "applied presets");

            Ok(Some(HookTransformOutput {
                code: Some(output),
                map: None,
                side_effects: None,
                module_type: Some(ModuleType::Js),
            }))
        }
    }
}
