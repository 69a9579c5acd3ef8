//! Core types for ape, a productive environment for feature-oriented
//! product lines.
//!
//! This crate knows the on-disk layout of an ape root (containers holding
//! products), reads and writes product equations, loads the feature model
//! files (feature order constraints, FeatureIDE `model.xml`, product specs)
//! and validates equations against them.
//!
//! This crate is intentionally free of terminal output.

/// Printed before shell snippets that the user is expected to source.
pub const SOURCE_HEADER: &str = "#please execute the following in your shell:\n";

pub mod config;
pub mod container;
pub mod equation;
pub mod featuremodel;
pub mod validators;
