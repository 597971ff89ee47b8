//! Settings file loading and validation.

use crate::config::settings::Settings;
use crate::error::{AdoptError, Result};
use crate::inventory::registry::exclusion_filter;
use std::fs;
use std::path::Path;

/// Load settings from an optional file.
///
/// Without a path the defaults are returned unchanged.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
/// Returns `ConfigValidationError` if a value is unusable.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let settings = match path {
        Some(path) => load_settings_file(path)?,
        None => Settings::default(),
    };

    validate_settings(&settings)?;
    Ok(settings)
}

/// Load a single settings file.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(AdoptError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    tracing::debug!("Loading settings from {}", path.display());

    // An empty document deserializes to unit, not to a map.
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    serde_yaml::from_str(&content).map_err(|e| AdoptError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Check settings values that serde cannot.
pub fn validate_settings(settings: &Settings) -> Result<()> {
    for (key, value) in [
        ("winget", &settings.winget),
        ("choco", &settings.choco),
        ("powershell", &settings.powershell),
    ] {
        if value.trim().is_empty() {
            return Err(AdoptError::ConfigValidationError {
                message: format!("'{}' must not be empty", key),
            });
        }
    }

    if settings.progress_every == 0 {
        return Err(AdoptError::ConfigValidationError {
            message: "'progress_every' must be at least 1".to_string(),
        });
    }

    exclusion_filter(&settings.exclude_pattern)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn no_path_gives_defaults() {
        let settings = load_settings(None).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn missing_file_is_config_not_found() {
        let temp = TempDir::new().unwrap();
        let result = load_settings(Some(&temp.path().join("nope.yml")));
        assert!(matches!(result, Err(AdoptError::ConfigNotFound { .. })));
    }

    #[test]
    fn empty_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("adopt.yml");
        fs::write(&path, "\n").unwrap();
        assert_eq!(load_settings(Some(&path)).unwrap(), Settings::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("adopt.yml");
        fs::write(&path, "choco: C:\\tools\\choco.exe\ninstall_delay_ms: 0\n").unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings.choco, "C:\\tools\\choco.exe");
        assert_eq!(settings.install_delay_ms, 0);
        assert_eq!(settings.winget, "winget");
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("adopt.yml");
        fs::write(&path, "install_delay_ms: [not a number\n").unwrap();

        let result = load_settings(Some(&path));
        assert!(matches!(result, Err(AdoptError::ConfigParseError { .. })));
    }

    #[test]
    fn bad_pattern_is_validation_error() {
        let settings = Settings {
            exclude_pattern: "^(Microsoft".to_string(),
            ..Default::default()
        };
        let err = validate_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("exclude_pattern"));
    }

    #[test]
    fn zero_progress_interval_is_validation_error() {
        let settings = Settings {
            progress_every: 0,
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(AdoptError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn blank_tool_name_is_validation_error() {
        let settings = Settings {
            choco: "  ".to_string(),
            ..Default::default()
        };
        let err = validate_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("choco"));
    }
}
