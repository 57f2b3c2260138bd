//! Common types used throughout the catalog.
//!
//! This module provides the building blocks shared by profiles, the catalog, and the
//! engine layer. It includes:
//! 1. **Units:** Exact byte-size and frequency quantities written in simulator notation.
//! 2. **Error Handling:** The catalog error taxonomy and the engine's opaque error type.

/// Error types for lookup, validation, and engine construction.
pub mod error;

/// Quantity types (`ByteSize`, `Frequency`).
pub mod units;

pub use error::{EngineError, InvalidReason, ProfileError};
pub use units::{ByteSize, Frequency, UnitParseError};
