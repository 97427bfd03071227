//! Common types and utilities shared across pagetree.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants and capacity formulas
//! - Error types
//! - Identifiers (RefId)
//! - Key ordering traits

pub mod config;
pub mod error;
mod ordering;
mod ref_id;

pub use error::{Error, Result};
pub use ordering::{Ascending, Descending, KeyOrder};
pub use ref_id::RefId;
