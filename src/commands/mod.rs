//! Command implementations for the deadlock-translator CLI

pub mod completions;
pub mod download;
pub mod helpers;
pub mod install;
pub mod patch;
pub mod resolve;
pub mod update;
pub mod version;

pub use helpers::Context;
