//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

pub mod download;
pub mod remix;
