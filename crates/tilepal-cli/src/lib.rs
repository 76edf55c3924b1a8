//! tilepal CLI library.
//!
//! This crate provides the core functionality for the tilepal CLI,
//! including config loading, console logging, and the palette commands.

pub mod commands;
pub mod console;
pub mod input;
