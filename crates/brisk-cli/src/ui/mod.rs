//! Terminal output: status lines, sizes and durations.

mod format;
mod messages;

pub use format::{format_duration, format_size, print_artifacts};
pub use messages::{error, info, success, warning};

use crate::logger::should_use_colors;

/// Initialize color support from `--no-color` and the environment.
pub fn init_colors(no_color: bool) {
    owo_colors::set_override(!no_color && should_use_colors());
}
