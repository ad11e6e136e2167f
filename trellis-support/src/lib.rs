//! # Trellis Support
//!
//! Shared utilities for the trellis crates.
//!
//! This crate provides text rendering for diagnostics: dependency chains,
//! shortened type names and "did you mean?" suggestions.

pub mod rendering;
