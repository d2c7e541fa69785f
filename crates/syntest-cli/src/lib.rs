//! Library surface of the syntest CLI.
//!
//! The binary in `main.rs` only parses flags; command bodies live here so
//! they can be unit tested.

pub mod commands;
pub mod grammar;
