//! Shared utilities for ape, a productive environment.
//!
//! This crate provides cross-cutting concerns used by all other ape crates:
//! the unified error type, filesystem helpers, process spawning, and
//! terminal status lines.

pub mod errors;
pub mod fs;
pub mod process;
pub mod progress;
