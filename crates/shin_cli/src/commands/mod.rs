//! Subcommand implementations

pub mod check;
pub mod compare;
pub mod devig;
