//! CLI module - command implementations behind `rtg`

pub mod commands;
