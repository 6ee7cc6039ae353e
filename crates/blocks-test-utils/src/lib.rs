//! Shared test utilities for the block-hooks workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`tree`] - block tree builders and structural assertions
//! - [`markup`] - minimal delimiter parser for round-trip tests
//! - [`strategy`] - proptest strategies for arbitrary block trees
//! - [`metadata`] - [`MetadataDir`] builder for block type metadata on disk

pub mod markup;
pub mod metadata;
pub mod strategy;
pub mod tree;

pub use metadata::MetadataDir;
