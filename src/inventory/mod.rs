//! Inventory readers.
//!
//! Each reader runs one external query through a
//! [`CommandRunner`](crate::shell::CommandRunner), parses the output with a
//! best-effort parser, and returns the inventory keyed by
//! [normalized name](crate::normalize::normalize_name). The upstream output
//! formats are not a stable contract, so parsers skip what they do not
//! recognise instead of failing.
//!
//! - [`winget`] - WinGet's tabular `list` output
//! - [`registry`] - Uninstall registry records via PowerShell JSON
//! - [`choco`] - Chocolatey's pipe-delimited `--limit-output` format

pub mod choco;
pub mod registry;
pub mod winget;

pub use choco::{parse_choco_list, parse_package_line, read_choco_inventory, ChocoInventory};
pub use registry::{
    parse_installed_programs, read_installed_programs, retain_relevant, InstalledProgram,
};
pub use winget::{parse_winget_list, read_winget_inventory, WingetEntry, WingetInventory};

use crate::shell::CommandResult;

/// Best available explanation of a failed command.
pub(crate) fn failure_detail(result: &CommandResult) -> String {
    let stderr = result.stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = result.stdout.trim();
    if !stdout.is_empty() {
        return stdout.to_string();
    }
    match result.exit_code {
        Some(code) => format!("exited with code {}", code),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn failure_detail_prefers_stderr() {
        let result = CommandResult::failure(Some(1), "out", " err \n", Duration::ZERO);
        assert_eq!(failure_detail(&result), "err");
    }

    #[test]
    fn failure_detail_falls_back_to_stdout() {
        let result = CommandResult::failure(Some(1), "out", "", Duration::ZERO);
        assert_eq!(failure_detail(&result), "out");
    }

    #[test]
    fn failure_detail_falls_back_to_exit_code() {
        let result = CommandResult::failure(Some(5), "", "", Duration::ZERO);
        assert_eq!(failure_detail(&result), "exited with code 5");

        let result = CommandResult::failure(None, "", "", Duration::ZERO);
        assert_eq!(failure_detail(&result), "terminated by signal");
    }
}
