//! # Mocks
//!
//! Mock implementations of external capabilities.

/// Mock simulation engine.
pub mod engine;
