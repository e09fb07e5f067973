//! Common types and utilities shared by the typerel crates.
//!
//! - String interning for type names and generic parameter names (`Atom`, `Interner`)
//! - Centralized limits for hierarchy walks, matching and instantiation

// String interning for type and parameter names
pub mod interner;
pub use interner::{Atom, Interner};

// Centralized limits and thresholds
pub mod limits;
