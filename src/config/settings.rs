//! Settings schema.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default exclusion pattern for OS, update and security-patch entries.
pub const DEFAULT_EXCLUDE_PATTERN: &str = r"^(Microsoft|Windows|Update|Hotfix|KB[0-9]|Security)";

/// Default name of the exported registration script.
pub const DEFAULT_SCRIPT_NAME: &str = "register_unmanaged_apps.bat";

/// Tool settings.
///
/// Every field has a default, so an empty file (or no file at all) gives
/// the stock behavior.
///
/// ```yaml
/// choco: C:\ProgramData\chocolatey\bin\choco.exe
/// install_delay_ms: 1000
/// exclude_pattern: "^(Microsoft|Windows|Update|Hotfix|KB[0-9]|Security|NVIDIA)"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// WinGet executable.
    pub winget: String,

    /// Chocolatey executable.
    pub choco: String,

    /// PowerShell executable used for the uninstall registry query.
    pub powershell: String,

    /// Installed programs whose display name matches this pattern are
    /// ignored. Matching is case-insensitive.
    pub exclude_pattern: String,

    /// Flags appended to `choco install <id>`.
    pub install_args: Vec<String>,

    /// Pause between consecutive installs, in milliseconds.
    pub install_delay_ms: u64,

    /// Report matcher progress every this many apps.
    pub progress_every: usize,

    /// Where the exported batch script is written.
    pub script_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            winget: "winget".to_string(),
            choco: "choco".to_string(),
            powershell: "powershell".to_string(),
            exclude_pattern: DEFAULT_EXCLUDE_PATTERN.to_string(),
            install_args: vec!["-y".to_string(), "-n".to_string(), "--force".to_string()],
            install_delay_ms: 500,
            progress_every: 5,
            script_path: PathBuf::from(DEFAULT_SCRIPT_NAME),
        }
    }
}

impl Settings {
    /// Pause between consecutive installs.
    pub fn install_delay(&self) -> Duration {
        Duration::from_millis(self.install_delay_ms)
    }

    /// Arguments for `choco install` of one package.
    pub fn install_command_args<'a>(&'a self, package_id: &'a str) -> Vec<&'a str> {
        let mut args = vec!["install", package_id];
        args.extend(self.install_args.iter().map(String::as_str));
        args
    }

    /// Render the settings in effect as YAML, in the file format.
    pub fn to_yaml(&self) -> crate::Result<String> {
        Ok(serde_yaml::to_string(self).map_err(anyhow::Error::from)?)
    }

    /// The install command line an operator can paste to retry by hand.
    pub fn install_command_line(&self, package_id: &str) -> String {
        crate::shell::display_command(&self.choco, &self.install_command_args(package_id))
    }
}
