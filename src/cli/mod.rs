//! Command-line interface for choco-adopt.
//!
//! Argument parsing uses clap's derive macros; see [`args`].

pub mod args;

pub use args::Cli;
