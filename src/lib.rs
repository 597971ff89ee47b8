//! choco-adopt - bring unmanaged Windows programs under Chocolatey.
//!
//! The tool reconciles three inventories: packages WinGet tracks, packages
//! Chocolatey tracks, and every program in the uninstall registry. Programs
//! neither manager knows about are matched against the Chocolatey
//! repository and can be installed in place with `choco install -n --force`.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument parsing
//! - [`config`] - Settings loading and validation
//! - [`error`] - Error types and result aliases
//! - [`inventory`] - WinGet, registry and Chocolatey inventory readers
//! - [`normalize`] - The name key all inventories are joined on
//! - [`reconcile`] - Finding unmanaged programs
//! - [`matcher`] - Repository search
//! - [`register`] - Presenting matches, installs and script export
//! - [`pipeline`] - Stage orchestration
//! - [`prerequisites`] - Tool and elevation checks
//! - [`shell`] - External command execution
//! - [`ui`] - Prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use choco_adopt::inventory::{InstalledProgram, WingetInventory};
//! use choco_adopt::reconcile::find_unmanaged;
//!
//! let winget = WingetInventory::new();
//! let choco = ["git".to_string()].into_iter().collect();
//! let programs = vec![InstalledProgram::named("Git"), InstalledProgram::named("Acme Tool")];
//!
//! let unmanaged = find_unmanaged(&winget, &programs, &choco);
//! assert_eq!(unmanaged.len(), 1);
//! assert_eq!(unmanaged[0].name, "Acme Tool");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod inventory;
pub mod matcher;
pub mod normalize;
pub mod pipeline;
pub mod prerequisites;
pub mod reconcile;
pub mod register;
pub mod shell;
pub mod ui;

pub use error::{AdoptError, Result};
