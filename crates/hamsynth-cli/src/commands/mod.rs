//! CLI command implementations.

pub mod common;
pub mod groups;
pub mod search;
pub mod synth;
pub mod verify;
pub mod version;
