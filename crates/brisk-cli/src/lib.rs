//! brisk - theme asset pipeline with a live-reload proxy.
//!
//! Compiles `assets/sass` into `style.css` / `style.min.css`, bundles
//! `assets/js/main.js` into `app.js` / `app.min.js`, and fronts the local
//! development site with a proxy that reloads (or hot-swaps CSS in) every
//! connected browser after a successful rebuild.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line definition (`scripts`, `styles`, `browser-sync`, `default`)
//! - [`config`] - Layered configuration (defaults, `brisk.toml`, `BRISK_*`, flags)
//! - [`pipeline`] - Styles and scripts pipelines returning typed outcomes
//! - [`dev`] - Reload proxy server, browser events and the Sass watcher
//! - [`commands`] - Task orchestration and outcome reporting
//! - [`error`] - Error types with actionable messages
//! - [`logger`] / [`ui`] - Structured logging and terminal output

pub mod cli;
pub mod commands;
pub mod config;
pub mod dev;
pub mod error;
pub mod logger;
pub mod pipeline;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ResultExt};
