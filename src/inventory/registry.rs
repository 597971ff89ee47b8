//! Installed programs from the Windows uninstall registry.
//!
//! PowerShell reads the machine-wide, WOW6432Node and per-user `Uninstall`
//! keys and prints the entries that have a display name as compressed JSON.
//! `ConvertTo-Json` emits a bare object when exactly one entry survives and
//! an array otherwise; both shapes are accepted.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Deserializer};

use crate::config::Settings;
use crate::error::{AdoptError, Result};
use crate::shell::CommandRunner;

use super::failure_detail;

const STAGE: &str = "Installed program scan";

/// PowerShell query over the uninstall registry keys.
pub const UNINSTALL_QUERY: &str = r#"
$UninstallKeys = @(
    "HKLM:\Software\Microsoft\Windows\CurrentVersion\Uninstall\*",
    "HKLM:\Software\WOW6432Node\Microsoft\Windows\CurrentVersion\Uninstall\*",
    "HKCU:\Software\Microsoft\Windows\CurrentVersion\Uninstall\*"
)

Get-ItemProperty $UninstallKeys -ErrorAction SilentlyContinue |
    Where-Object { $_.DisplayName } |
    Select-Object DisplayName, DisplayVersion, Publisher |
    ConvertTo-Json -Compress
"#;

/// Arguments passed to PowerShell for the registry query.
pub fn query_args() -> [&'static str; 4] {
    ["-NoProfile", "-NonInteractive", "-Command", UNINSTALL_QUERY]
}

/// One uninstall registry entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InstalledProgram {
    #[serde(rename = "DisplayName", default, deserialize_with = "lenient_string")]
    pub display_name: Option<String>,

    #[serde(rename = "DisplayVersion", default, deserialize_with = "lenient_string")]
    pub display_version: Option<String>,

    #[serde(rename = "Publisher", default, deserialize_with = "lenient_string")]
    pub publisher: Option<String>,
}

impl InstalledProgram {
    /// Build a record from a display name alone.
    pub fn named(name: &str) -> Self {
        Self {
            display_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    /// Display name, or `""` when the entry has none.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or("")
    }
}

/// Registry values are usually strings, but numbers and booleans show up in
/// the wild. Anything scalar is kept as text; null becomes `None`.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<InstalledProgram>),
    One(InstalledProgram),
}

/// Parse the query's JSON, accepting a single object or an array.
pub fn parse_installed_programs(json: &str) -> serde_json::Result<Vec<InstalledProgram>> {
    let json = json.trim().trim_start_matches('\u{feff}');
    Ok(match serde_json::from_str(json)? {
        OneOrMany::Many(programs) => programs,
        OneOrMany::One(program) => vec![program],
    })
}

/// Compile the exclusion pattern the way PowerShell's `-notmatch` applies it.
pub fn exclusion_filter(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| AdoptError::ConfigValidationError {
            message: format!("'exclude_pattern' is not a valid pattern: {}", e),
        })
}

/// Drop entries without a display name and entries the filter matches.
pub fn retain_relevant(programs: Vec<InstalledProgram>, exclude: &Regex) -> Vec<InstalledProgram> {
    programs
        .into_iter()
        .filter(|p| !p.name().is_empty() && !exclude.is_match(p.name()))
        .collect()
}

/// Query the uninstall registry and return the relevant entries in query
/// order.
///
/// An empty JSON array is a valid, empty inventory. Empty output is not:
/// PowerShell always prints something for a successful query, so silence
/// points at a permission or profile problem.
pub fn read_installed_programs(
    runner: &dyn CommandRunner,
    settings: &Settings,
) -> Result<Vec<InstalledProgram>> {
    let result = runner.run(&settings.powershell, &query_args());

    if !result.success {
        return Err(AdoptError::stage(STAGE, failure_detail(&result)));
    }

    if result.stdout.trim().is_empty() {
        return Err(AdoptError::stage(
            STAGE,
            "no installed programs found; this might indicate a permission issue",
        ));
    }

    let programs = parse_installed_programs(&result.stdout).map_err(|e| {
        AdoptError::stage(STAGE, format!("could not parse installed programs: {}", e))
    })?;

    let exclude = exclusion_filter(&settings.exclude_pattern)?;
    let total = programs.len();
    let programs = retain_relevant(programs, &exclude);
    tracing::debug!(
        "Kept {} of {} uninstall entries after filtering",
        programs.len(),
        total
    );

    Ok(programs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EXCLUDE_PATTERN;
    use crate::shell::{display_command, MockRunner};

    fn query_line(settings: &Settings) -> String {
        display_command(&settings.powershell, &query_args())
    }

    #[test]
    fn parses_array() {
        let json = r#"[{"DisplayName":"Acme Tool","DisplayVersion":"2.1","Publisher":"Acme"},
                       {"DisplayName":"Bar","DisplayVersion":null,"Publisher":null}]"#;
        let programs = parse_installed_programs(json).unwrap();
        assert_eq!(programs.len(), 2);
        assert_eq!(programs[0].display_version.as_deref(), Some("2.1"));
        assert_eq!(programs[1].publisher, None);
    }

    #[test]
    fn parses_single_object() {
        let json = r#"{"DisplayName":"Acme Tool","DisplayVersion":"2.1","Publisher":"Acme"}"#;
        let programs = parse_installed_programs(json).unwrap();
        assert_eq!(programs.len(), 1);
        assert_eq!(programs[0].name(), "Acme Tool");
    }

    #[test]
    fn parses_empty_array() {
        assert!(parse_installed_programs("[]").unwrap().is_empty());
    }

    #[test]
    fn missing_fields_and_numbers_are_tolerated() {
        let json = r#"[{"DisplayName":"Tool","DisplayVersion":3}]"#;
        let programs = parse_installed_programs(json).unwrap();
        assert_eq!(programs[0].display_version.as_deref(), Some("3"));
        assert_eq!(programs[0].publisher, None);
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let json = "\u{feff}{\"DisplayName\":\"Tool\"}\r\n";
        assert_eq!(parse_installed_programs(json).unwrap().len(), 1);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_installed_programs("Get-ItemProperty : denied").is_err());
    }

    #[test]
    fn platform_entries_are_excluded_case_insensitively() {
        let exclude = exclusion_filter(DEFAULT_EXCLUDE_PATTERN).unwrap();
        let programs = vec![
            InstalledProgram::named("Microsoft Edge"),
            InstalledProgram::named("windows sdk"),
            InstalledProgram::named("KB5034441"),
            InstalledProgram::named("Security Update for Foo"),
            InstalledProgram::named("Acme Tool"),
            InstalledProgram::named("Visual Studio Code (Microsoft)"),
            InstalledProgram::default(),
        ];

        let kept: Vec<_> = retain_relevant(programs, &exclude)
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(kept, ["Acme Tool", "Visual Studio Code (Microsoft)"]);
    }

    #[test]
    fn read_filters_and_keeps_order() {
        let settings = Settings::default();
        let runner = MockRunner::new();
        runner.ok(
            &query_line(&settings),
            r#"[{"DisplayName":"Zeta"},{"DisplayName":"Windows Terminal"},{"DisplayName":"Alpha"}]"#,
        );

        let programs = read_installed_programs(&runner, &settings).unwrap();
        let names: Vec<_> = programs.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["Zeta", "Alpha"]);
    }

    #[test]
    fn read_fails_on_empty_output() {
        let settings = Settings::default();
        let runner = MockRunner::new();
        runner.ok(&query_line(&settings), "  \n");

        let err = read_installed_programs(&runner, &settings).unwrap_err();
        assert!(err.to_string().contains("no installed programs found"));
    }

    #[test]
    fn read_fails_on_unparseable_output() {
        let settings = Settings::default();
        let runner = MockRunner::new();
        runner.ok(&query_line(&settings), "not json");

        let err = read_installed_programs(&runner, &settings).unwrap_err();
        assert!(err.to_string().contains("could not parse"));
    }

    #[test]
    fn read_fails_on_non_zero_exit() {
        let settings = Settings::default();
        let runner = MockRunner::new();
        runner.fail(&query_line(&settings), 1, "execution policy");

        let err = read_installed_programs(&runner, &settings).unwrap_err();
        assert!(matches!(err, AdoptError::StageFailed { .. }));
        assert!(err.to_string().contains("execution policy"));
    }
}
