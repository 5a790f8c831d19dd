//! tonegrid Integration Test Infrastructure
//!
//! This crate provides end-to-end tests for the sequencer flows that span
//! both library crates:
//!
//! - Model properties: conversion round trips, gap filling, sanitization
//! - Sequencer flows: typing, committing, resizing, teardown
//! - Drag behavior under both polyphony settings
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tonegrid-tests
//!
//! # Property tests only
//! cargo test -p tonegrid-tests --test proptest_model
//! ```

pub mod fixtures;
pub mod harness;

// Re-export commonly used items
pub use fixtures::{GridLocator, RecordingRenderer, RenderLog};
pub use harness::SequencerHarness;
