//! CLI subcommand implementations.

pub mod analyze;
pub mod chart;
pub mod compare;
pub mod init;
pub mod validate;
