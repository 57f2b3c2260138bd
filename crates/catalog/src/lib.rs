//! RISC-V microarchitecture profile catalog.
//!
//! This crate describes CPU designs as declarative parameter records and hands them to an
//! external cycle-level simulation engine. It provides:
//! 1. **Profiles:** Immutable records of clock, pipeline shape, functional units, branch
//!    predictor, cache hierarchy, and DRAM for one CPU design.
//! 2. **Catalog:** The six built-in profiles (Ariane, BOOM, BlackParrot, Rocket, Shakti-C,
//!    XiangShan) with lookup, validation, and registration of user profiles.
//! 3. **Engine:** The narrow capability through which a profile is applied to a simulator,
//!    plus a recording engine used for dry runs.
//! 4. **Configuration:** System-wide settings applied alongside every profile.

/// Common types (quantity units and error types).
pub mod common;
/// Apply-time system configuration (defaults, memory mode, workload).
pub mod config;
/// Profile catalog (built-in profiles, lookup, registration).
pub mod catalog;
/// Simulation engine capability, profile application, and the recording engine.
pub mod engine;
/// Profile data model and validation.
pub mod profile;

/// The profile catalog; use `ProfileCatalog::builtin()` for the six shipped designs.
pub use crate::catalog::ProfileCatalog;
/// Error returned by every catalog operation.
pub use crate::common::error::{EngineError, InvalidReason, ProfileError};
/// Apply-time configuration; `SystemConfig::default()` matches the shipped scripts.
pub use crate::config::SystemConfig;
/// Engine capability and the handles it returns.
pub use crate::engine::{AppliedSystem, Engine, RecordingEngine};
/// A single CPU design.
pub use crate::profile::Profile;
