//! Reconciliation of the three inventories.

use crate::inventory::{ChocoInventory, InstalledProgram, WingetInventory};
use crate::normalize::normalize_name;

/// Value used when the registry has no version or publisher.
pub const UNKNOWN: &str = "Unknown";

/// An installed program neither package manager tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmanagedApp {
    pub name: String,
    pub version: String,
    pub publisher: String,
    pub normalized: String,
}

/// Installed programs whose normalized name is in neither inventory.
///
/// Entries without a display name are skipped. The result keeps the order
/// of `programs`; an empty result means everything is already managed.
pub fn find_unmanaged(
    winget: &WingetInventory,
    programs: &[InstalledProgram],
    choco: &ChocoInventory,
) -> Vec<UnmanagedApp> {
    programs
        .iter()
        .filter(|program| !program.name().is_empty())
        .filter_map(|program| {
            let normalized = normalize_name(program.name());
            let managed = !normalized.is_empty()
                && (winget.contains_key(&normalized) || choco.contains(&normalized));
            if managed {
                return None;
            }

            Some(UnmanagedApp {
                name: program.name().to_string(),
                version: program
                    .display_version
                    .clone()
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                publisher: program
                    .publisher
                    .clone()
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                normalized,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::WingetEntry;

    fn winget_with(keys: &[&str]) -> WingetInventory {
        keys.iter()
            .map(|k| {
                (
                    k.to_string(),
                    WingetEntry {
                        name: k.to_string(),
                        line: k.to_string(),
                    },
                )
            })
            .collect()
    }

    fn choco_with(keys: &[&str]) -> ChocoInventory {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn managed_by_winget_is_skipped() {
        let programs = vec![
            InstalledProgram::named("Foo 1.0"),
            InstalledProgram::named("Bar"),
        ];

        let unmanaged = find_unmanaged(&winget_with(&["foo"]), &programs, &choco_with(&[]));

        assert_eq!(
            unmanaged,
            [UnmanagedApp {
                name: "Bar".to_string(),
                version: "Unknown".to_string(),
                publisher: "Unknown".to_string(),
                normalized: "bar".to_string(),
            }]
        );
    }

    #[test]
    fn managed_by_choco_is_skipped() {
        let programs = vec![
            InstalledProgram::named("VLC media player"),
            InstalledProgram::named("Acme Tool"),
        ];

        let unmanaged = find_unmanaged(
            &winget_with(&[]),
            &programs,
            &choco_with(&["vlcmediaplayer"]),
        );

        assert_eq!(unmanaged.len(), 1);
        assert_eq!(unmanaged[0].name, "Acme Tool");
    }

    #[test]
    fn version_and_publisher_are_carried() {
        let programs = vec![InstalledProgram {
            display_name: Some("Acme Tool".to_string()),
            display_version: Some("2.1".to_string()),
            publisher: Some("Acme".to_string()),
        }];

        let unmanaged = find_unmanaged(&winget_with(&[]), &programs, &choco_with(&[]));

        assert_eq!(unmanaged[0].version, "2.1");
        assert_eq!(unmanaged[0].publisher, "Acme");
        assert_eq!(unmanaged[0].normalized, "acmetool");
    }

    #[test]
    fn order_is_preserved() {
        let programs = vec![
            InstalledProgram::named("Zeta"),
            InstalledProgram::named("Alpha"),
            InstalledProgram::named("Mid"),
        ];

        let names: Vec<_> = find_unmanaged(&winget_with(&[]), &programs, &choco_with(&[]))
            .into_iter()
            .map(|a| a.name)
            .collect();

        assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn unnamed_entries_are_skipped() {
        let programs = vec![InstalledProgram::default(), InstalledProgram::named("")];
        assert!(find_unmanaged(&winget_with(&[""]), &programs, &choco_with(&[])).is_empty());
    }

    #[test]
    fn symbol_only_names_are_never_joined() {
        let programs = vec![InstalledProgram::named("---")];
        let unmanaged = find_unmanaged(&winget_with(&[""]), &programs, &choco_with(&[""]));
        assert_eq!(unmanaged.len(), 1);
        assert_eq!(unmanaged[0].normalized, "");
    }

    #[test]
    fn everything_managed_yields_empty() {
        let programs = vec![InstalledProgram::named("Git"), InstalledProgram::named("7-Zip")];
        let unmanaged = find_unmanaged(&winget_with(&["git"]), &programs, &choco_with(&["7zip"]));
        assert!(unmanaged.is_empty());
    }
}
