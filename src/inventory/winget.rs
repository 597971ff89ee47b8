//! WinGet inventory.
//!
//! `winget list` prints a table:
//!
//! ```text
//! Name                 Id                    Version   Source
//! ----------------------------------------------------------
//! Mozilla Firefox      Mozilla.Firefox       118.0.1   winget
//! ```
//!
//! Rows are split on whitespace and the last three tokens are taken as the
//! Id, Version and Source columns. Names made of several words therefore
//! parse correctly only when those three columns are present and contain no
//! spaces themselves. A row of exactly three tokens leaves no name and is
//! dropped. This is a known limitation of the column heuristic.

use std::collections::HashMap;

use crate::config::Settings;
use crate::error::{AdoptError, Result};
use crate::normalize::normalize_name;
use crate::shell::CommandRunner;

use super::failure_detail;

/// A package WinGet reports as installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WingetEntry {
    /// Name as parsed from the row.
    pub name: String,
    /// The trimmed source row.
    pub line: String,
}

/// WinGet packages keyed by normalized name.
pub type WingetInventory = HashMap<String, WingetEntry>;

/// Trailing columns after the name: Id, Version, Source.
const TRAILING_COLUMNS: usize = 3;

/// Parse `winget list` output.
///
/// Everything up to and including the dashed separator is header. Any later
/// line containing `---` is skipped as well.
pub fn parse_winget_list(output: &str) -> WingetInventory {
    let mut inventory = WingetInventory::new();
    let mut data_started = false;

    for line in output.lines() {
        if line.contains("---") {
            data_started = true;
            continue;
        }
        if !data_started || line.trim().is_empty() {
            continue;
        }

        let Some(name) = row_name(line) else {
            continue;
        };

        let normalized = normalize_name(&name);
        if normalized.is_empty() {
            continue;
        }

        inventory.insert(
            normalized,
            WingetEntry {
                name,
                line: line.trim().to_string(),
            },
        );
    }

    inventory
}

/// Name column of a data row, if the row has one.
fn row_name(line: &str) -> Option<String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.len() {
        0 | 1 => None,
        2 => Some(tokens[0].to_string()),
        n => {
            let name = tokens[..n - TRAILING_COLUMNS].join(" ");
            (!name.is_empty()).then_some(name)
        }
    }
}

/// Run `winget list` and parse the result.
pub fn read_winget_inventory(
    runner: &dyn CommandRunner,
    settings: &Settings,
) -> Result<WingetInventory> {
    let result = runner.run(&settings.winget, &["list", "--accept-source-agreements"]);

    if !result.success {
        return Err(AdoptError::stage(
            "WinGet inventory",
            failure_detail(&result),
        ));
    }

    let inventory = parse_winget_list(&result.stdout);
    tracing::debug!("Parsed {} WinGet packages", inventory.len());
    Ok(inventory)
}
