//! Status message functions for terminal output.

use owo_colors::{OwoColorize, Stream::Stderr, Style};

/// Print a success message to stderr.
pub fn success(message: &str) {
    let glyph = Style::new().green().bold();
    eprintln!("{} {}", "✓".if_supports_color(Stderr, |t| t.style(glyph)), message);
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    let glyph = Style::new().blue().bold();
    eprintln!("{} {}", "ℹ".if_supports_color(Stderr, |t| t.style(glyph)), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    let glyph = Style::new().yellow().bold();
    eprintln!(
        "{} {}",
        "⚠".if_supports_color(Stderr, |t| t.style(glyph)),
        message.if_supports_color(Stderr, |t| t.yellow())
    );
}

/// Print an error message to stderr.
///
/// Multi-line messages (compiler output) are indented under the first line.
pub fn error(message: &str) {
    let glyph = Style::new().red().bold();
    let mut lines = message.lines();
    let first = lines.next().unwrap_or_default();
    eprintln!(
        "{} {}",
        "✗".if_supports_color(Stderr, |t| t.style(glyph)),
        first.if_supports_color(Stderr, |t| t.red())
    );
    for line in lines {
        eprintln!("  {}", line.if_supports_color(Stderr, |t| t.red()));
    }
}
