//! Shared test utilities for the folder-mirror workspace.
//!
//! This crate provides standardised source/replica fixtures so each crate's
//! test suite does not rebuild them by hand. It is a dev-dependency only and
//! is never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTrees`] builder for a source and a replica directory
//! - [`snapshot`]: [`TreeSnapshot`] for comparing whole trees

pub mod snapshot;
pub mod tree;

pub use snapshot::{Entry, TreeSnapshot};
pub use tree::TestTrees;
