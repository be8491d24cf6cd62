//! Script bundling for brisk
//!
//! Bundles a browser entry with rolldown, runs every first-party module
//! through the configured presets (`es2015`, `react`) before rolldown parses
//! it, and keeps an optional watch over the dependency graph.
//!
//! ```text
//! entry → rolldown ─┬─ PresetTransformPlugin (oxc: JSX + syntax lowering)
//!                   └─ IIFE chunk + source map → ScriptBundle
//!                                                  └→ minify_js → app.min.js
//! ```
//!
//! In watch mode the [`BundlerHandle`] re-subscribes to the module set of the
//! latest successful bundle and emits a [`BundleUpdate`] whenever one of those
//! files changes.

mod bundle;
mod error;
mod handle;
mod minify;
mod options;
mod plugin;
mod transform;
mod watch;

pub use bundle::ScriptBundle;
pub use error::{Result, ScriptError};
pub use handle::BundlerHandle;
pub use minify::minify_js;
pub use options::{BundleMode, ScriptOptions, TransformPreset};
pub use plugin::PresetTransformPlugin;
pub use transform::PresetTransform;
pub use watch::BundleUpdate;
