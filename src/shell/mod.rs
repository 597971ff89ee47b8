//! External command execution and platform probes.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{decode_lossy, display_command, CommandResult, CommandRunner, SystemRunner};
pub use mock::MockRunner;
pub use platform::{is_ci, is_elevated};
