// SPDX-License-Identifier: MIT OR Apache-2.0
//! Core types, error handling, and foundational types for lookup
//!
//! This crate provides the foundational types shared across the lookup workspace:
//!
//! - [`error`] - Error types and Result alias
//! - [`path`] - Dotted path parsing utilities
//! - [`tag`] - The discriminant of a lookup value

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]

/// Error types for lookup operations
pub mod error;
/// Dotted path parsing utilities
pub mod path;
/// Value discriminants
pub mod tag;

// Re-exports for convenience
pub use error::{LookupError, Result};
pub use path::{ParsedPath, PathComponent, Segments, parse_index, split};
pub use tag::Tag;
