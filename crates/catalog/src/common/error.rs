//! Catalog and engine error definitions.
//!
//! This module defines every failure the catalog can surface. It provides:
//! 1. **Lookup failures:** Unknown or duplicate profile names.
//! 2. **Validation failures:** A typed reason naming the first violated profile invariant.
//! 3. **Engine failures:** The external engine's own error, carried through unchanged.
//! 4. **Input failures:** Unreadable or malformed profile and configuration files.
//!
//! None of these are retried: each one is a typo, a malformed profile, or a topology
//! error that the caller reports before exiting.

use std::path::PathBuf;

use thiserror::Error;

use crate::engine::ComponentHandle;
use crate::profile::{CacheName, FuKind, PipelineKind};

/// Errors raised by the external simulation engine.
///
/// The catalog never inspects these; it only propagates them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A component was instantiated with a required port left unconnected.
    #[error("unconnected port `{port}` on component {component}")]
    UnconnectedPort {
        /// Kind and handle of the offending component (e.g. `L2Cache#7`).
        component: String,
        /// Name of the port.
        port: String,
    },
    /// An operation referenced a handle the engine never issued.
    #[error("unknown component handle {0}")]
    UnknownComponent(ComponentHandle),
    /// Any other refusal by the engine.
    #[error("{0}")]
    Rejected(String),
}

/// The first invariant a profile violates.
///
/// The `Display` text names the serialized field at fault so a user editing a profile file
/// can find it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidReason {
    /// `clockHz` is zero.
    #[error("clockHz must be positive")]
    ZeroClock,
    /// `stageBuffers` given for an out-of-order core.
    #[error("stageBuffers present on out-of-order profile")]
    StageBuffersOnOutOfOrder,
    /// `stageBuffers` missing for an in-order core.
    #[error("stageBuffers missing on {0} profile")]
    MissingStageBuffers(PipelineKind),
    /// Wrong number of inter-stage latches.
    #[error("stageBuffers has {found} entries, expected {expected}")]
    StageBufferCount {
        /// Entries supplied.
        found: usize,
        /// Entries required.
        expected: usize,
    },
    /// One latch has zero depth.
    #[error("stageBuffers[{index}] ({latch}) must be positive")]
    ZeroStageBuffer {
        /// Position in `stageBuffers`.
        index: usize,
        /// Name of the latch at that position.
        latch: &'static str,
    },
    /// An out-of-order section given for an in-order core.
    #[error("{field} present on in-order profile")]
    OutOfOrderFieldOnInOrder {
        /// Serialized field name.
        field: &'static str,
    },
    /// A required out-of-order section is missing.
    #[error("{field} missing on out-of-order profile")]
    MissingOutOfOrderField {
        /// Serialized field name.
        field: &'static str,
    },
    /// A width, window size, register count, or buffer size is zero.
    #[error("{field} must be positive")]
    ZeroParameter {
        /// Dotted path of the field (e.g. `widths.commit`).
        field: &'static str,
    },
    /// The functional-unit pool is empty.
    #[error("functionalUnits empty")]
    EmptyFunctionalUnits,
    /// A functional unit has zero replication.
    #[error("functionalUnits: {0} has zero count")]
    ZeroUnitCount(FuKind),
    /// A functional unit has zero latency.
    #[error("functionalUnits: {0} has zero latency")]
    ZeroUnitLatency(FuKind),
    /// A functional unit the pipeline style cannot host.
    #[error("functionalUnits: {kind} not supported by {pipeline} pipeline")]
    UnsupportedUnit {
        /// The offending unit kind.
        kind: FuKind,
        /// The profile's pipeline kind.
        pipeline: PipelineKind,
    },
    /// No caches at all.
    #[error("cacheHierarchy empty")]
    EmptyCacheHierarchy,
    /// The same cache appears twice.
    #[error("cacheHierarchy has more than one {0}")]
    DuplicateCache(CacheName),
    /// A cache listed after a cache further from the CPU.
    #[error("cacheHierarchy lists {inner} after {outer}")]
    CacheOrder {
        /// The cache that should come first.
        inner: CacheName,
        /// The cache listed before it.
        outer: CacheName,
    },
    /// A tier between the CPU and the outermost cache is absent.
    #[error("cacheHierarchy skips L{0}")]
    MissingCacheTier(u8),
    /// A cache has zero size.
    #[error("cacheHierarchy: {0} has zero size")]
    ZeroCacheSize(CacheName),
    /// An outer cache is not strictly larger than an inner one.
    #[error(
        "cacheHierarchy sizes non-increasing: {outer} ({outer_size} bytes) is not larger than {inner} ({inner_size} bytes)"
    )]
    NonIncreasingCacheSize {
        /// Cache closer to the CPU.
        inner: CacheName,
        /// Its size in bytes.
        inner_size: u64,
        /// Cache further from the CPU.
        outer: CacheName,
        /// Its size in bytes.
        outer_size: u64,
    },
    /// `memoryRangeBytes` is zero.
    #[error("memoryRangeBytes must be positive")]
    ZeroMemoryRange,
}

/// Error type for every catalog operation.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// No profile is registered under the requested name.
    #[error("profile not found: `{0}`")]
    ProfileNotFound(String),
    /// The profile violates an invariant.
    #[error("invalid profile `{profile}`: {reason}")]
    InvalidProfile {
        /// Name of the rejected profile.
        profile: String,
        /// The first violated invariant.
        reason: InvalidReason,
    },
    /// The engine refused an operation; surfaced unchanged.
    #[error(transparent)]
    EngineConstruction(#[from] EngineError),
    /// A profile with the same name is already registered.
    #[error("duplicate profile: `{0}`")]
    DuplicateProfile(String),
    /// A profile or configuration document is malformed.
    #[error("failed to parse: {0}")]
    Parse(#[from] serde_json::Error),
    /// A profile or configuration file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ProfileError {
    /// Returns the validation reason if this is an `InvalidProfile` error.
    pub const fn invalid_reason(&self) -> Option<&InvalidReason> {
        match self {
            Self::InvalidProfile { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
