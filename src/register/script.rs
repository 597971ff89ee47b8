//! Batch script export.
//!
//! The script announces and installs each match in turn, then pauses so the
//! window stays open. Lines end in CRLF for `cmd.exe`.

use chrono::{DateTime, Local};
use std::fs;
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::{AdoptError, Result};
use crate::matcher::Match;
use crate::ui::UserInterface;

const CRLF: &str = "\r\n";

/// Escape text for an `echo` line.
///
/// `%` is doubled; the other `cmd.exe` metacharacters take a `^` prefix.
pub fn escape_batch(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '%' => out.push_str("%%"),
            '^' | '&' | '|' | '<' | '>' | '(' | ')' => {
                out.push('^');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Render the registration script for `matches`.
pub fn render_script(
    matches: &[Match],
    settings: &Settings,
    generated_at: DateTime<Local>,
) -> String {
    let mut lines = vec![
        "@echo off".to_string(),
        format!(
            "REM Generated by choco-adopt {}",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        ),
        "echo Registering unmanaged apps with Chocolatey...".to_string(),
        "echo.".to_string(),
    ];

    for m in matches {
        lines.push(format!("echo Registering: {}", escape_batch(&m.app_name)));
        lines.push(settings.install_command_line(&m.package_id));
        lines.push("echo.".to_string());
    }

    lines.push("echo.".to_string());
    lines.push("echo Registration complete!".to_string());
    lines.push("pause".to_string());

    let mut script = lines.join(CRLF);
    script.push_str(CRLF);
    script
}

/// Write the script to `settings.script_path` and tell the operator.
///
/// # Errors
///
/// Returns `ScriptWrite` if the file cannot be written.
pub fn export_script(
    matches: &[Match],
    settings: &Settings,
    ui: &mut dyn UserInterface,
) -> Result<PathBuf> {
    let path = settings.script_path.clone();
    let script = render_script(matches, settings, Local::now());

    fs::write(&path, script).map_err(|source| AdoptError::ScriptWrite {
        path: path.clone(),
        source,
    })?;
    tracing::info!(
        "Wrote {} install commands to {}",
        matches.len(),
        path.display()
    );

    ui.success(&format!("Batch file saved: {}", path.display()));
    ui.show_hint("Run this file as Administrator to register all apps");
    Ok(path)
}
