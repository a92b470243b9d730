//! CLI argument parsing and command dispatch

pub mod args;
pub mod batch;
pub mod check;
pub mod common;
pub mod eval;
pub mod init;
pub mod list;
pub mod logging;

// Re-export types for convenient access
pub use args::{Cli, ColorChoice, Command, OutputFormat};
