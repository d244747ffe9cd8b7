//! # Segstore Testkit
//!
//! Test utilities for segstore.
//!
//! This crate provides:
//! - Test fixtures and per-backend store helpers
//! - Property-based test generators using proptest
//! - A model-checking harness for store operations
//! - Fuzz testing harnesses
//! - Concurrent stress testing utilities
//! - Shared intersection query vectors
//!
//! ## Usage
//!
//! ```rust
//! use segstore_testkit::prelude::*;
//! use segstore_core::SegmentStore;
//!
//! for_each_backend(|backend| {
//!     let store = sample_store(backend);
//!     assert_eq!(store.intersecting(6).len(), 4);
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod fuzz;
pub mod generators;
pub mod integration;
pub mod stress;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::fuzz::*;
    pub use crate::generators::*;
    pub use crate::integration::*;
    pub use crate::stress::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use fuzz::*;
pub use generators::*;
pub use integration::*;
pub use stress::*;
pub use vectors::*;
