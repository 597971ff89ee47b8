//! Settings loading.
//!
//! choco-adopt runs with built-in defaults. An optional YAML file, passed
//! with `--config` or `CHOCO_ADOPT_CONFIG`, can point at different
//! executables, change the install flags or pacing, and widen the
//! exclusion pattern.
//!
//! - [`settings`] - The [`Settings`] schema and its defaults
//! - [`loader`] - File loading and validation

pub mod loader;
pub mod settings;

pub use loader::{load_settings, load_settings_file, validate_settings};
pub use settings::{Settings, DEFAULT_EXCLUDE_PATTERN, DEFAULT_SCRIPT_NAME};
