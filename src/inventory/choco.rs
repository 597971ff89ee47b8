//! Chocolatey inventory.
//!
//! With `--limit-output` Chocolatey prints one `id|version` line per
//! package, for both `list` and `search`.

use std::collections::HashSet;

use crate::config::Settings;
use crate::error::{AdoptError, Result};
use crate::normalize::normalize_name;
use crate::shell::CommandRunner;

use super::failure_detail;

/// Normalized names of the packages Chocolatey already manages.
pub type ChocoInventory = HashSet<String>;

/// Split an `id|version[|...]` line into id and version.
///
/// Lines with fewer than two fields are not package lines.
pub fn parse_package_line(line: &str) -> Option<(&str, &str)> {
    let mut fields = line.split('|');
    let id = fields.next()?;
    let version = fields.next()?;
    Some((id, version))
}

/// Parse `choco list --limit-output` output.
pub fn parse_choco_list(output: &str) -> ChocoInventory {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_package_line)
        .map(|(id, _)| normalize_name(id))
        .filter(|normalized| !normalized.is_empty())
        .collect()
}

/// Run `choco list` and parse the result.
pub fn read_choco_inventory(
    runner: &dyn CommandRunner,
    settings: &Settings,
) -> Result<ChocoInventory> {
    let result = runner.run(&settings.choco, &["list", "--limit-output"]);

    if !result.success {
        return Err(AdoptError::stage(
            "Chocolatey inventory",
            failure_detail(&result),
        ));
    }

    let inventory = parse_choco_list(&result.stdout);
    tracing::debug!("Parsed {} Chocolatey packages", inventory.len());
    Ok(inventory)
}
