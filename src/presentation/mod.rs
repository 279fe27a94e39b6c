//! Presentation layer with command dispatch and terminal output.

/// Command dispatch.
pub mod commands;
/// Entity rendering.
pub mod render;
/// Column-aligned text tables.
pub mod table;

pub use commands::{Backend, CommandRunner};
