//! Library components of the `bom` command-line tool.

pub mod config;
pub mod logging;
pub mod render;
