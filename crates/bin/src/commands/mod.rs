//! Subcommand implementations for the vellum binary.

pub mod serve;
pub mod useradd;
