//! Opening the proxy in a browser.

use crate::ui;
use std::process::Command;

/// Commands to try, most specific first.
///
/// A named browser comes first (`open -a` on macOS, the executable name on
/// Linux, `start` on Windows); the system default is the fallback.
fn launch_commands(url: &str, browser: Option<&str>) -> Vec<Command> {
    let mut commands = Vec::new();

    if cfg!(target_os = "macos") {
        if let Some(app) = browser {
            let mut cmd = Command::new("open");
            cmd.args(["-a", app, url]);
            commands.push(cmd);
        }
        let mut cmd = Command::new("open");
        cmd.arg(url);
        commands.push(cmd);
    } else if cfg!(target_os = "windows") {
        if let Some(app) = browser {
            let exe = windows_executable(app);
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", exe.as_str(), url]);
            commands.push(cmd);
        }
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        commands.push(cmd);
    } else {
        if let Some(app) = browser {
            let mut cmd = Command::new(linux_executable(app));
            cmd.arg(url);
            commands.push(cmd);
        }
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        commands.push(cmd);
    }

    commands
}

/// "google chrome" → "google-chrome"
fn linux_executable(app: &str) -> String {
    app.trim().to_lowercase().replace(' ', "-")
}

/// "google chrome" → "chrome"
fn windows_executable(app: &str) -> String {
    let app = app.trim().to_lowercase();
    match app.as_str() {
        "google chrome" | "google-chrome" => "chrome".to_string(),
        "microsoft edge" => "msedge".to_string(),
        _ => app,
    }
}

/// Open `url`, preferring `browser` when given.
///
/// Failure to launch anything is reported as a warning; the proxy keeps
/// running either way.
pub fn open_browser(url: &str, browser: Option<&str>) {
    for mut cmd in launch_commands(url, browser) {
        match cmd.spawn() {
            Ok(_) => {
                ui::info(&format!("Opened browser at {}", url));
                return;
            }
            Err(e) => {
                tracing::debug!(program = ?cmd.get_program(), "browser launch failed: {}", e);
            }
        }
    }

    ui::warning(&format!("Failed to open a browser, visit {} manually", url));
}
