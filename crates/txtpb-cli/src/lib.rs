//! CLI library components for the text-format validator.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
