//! Microarchitecture profile data model.
//!
//! A [`Profile`] is the declarative description of one CPU design: clock, pipeline style,
//! per-pipeline sizing, functional units, branch predictor, cache hierarchy, and DRAM.
//! This module provides:
//! 1. **Records:** The profile itself and its nested sections.
//! 2. **Serialization:** JSON with camelCase field names, quantities as strings
//!    (`"32kB"`, `"2GHz"`), so user profiles can be edited by hand.
//! 3. **Validation:** See [`validate`]; a profile is only applied after it validates.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::ProfileError;
use crate::common::units::{ByteSize, Frequency};

/// Cache hierarchy entries and their placement.
pub mod cache;
/// Functional-unit inventory.
pub mod fu;
/// Pipeline sizing sections (stage latches, widths, windows, registers).
pub mod pipeline;
/// Invariant checks and the validated core model.
pub mod validate;

pub use cache::{CacheLevel, CacheName, Placement};
pub use fu::{FuKind, FunctionalUnit};
pub use pipeline::{FrontendBuffers, PhysicalRegs, STAGE_LATCHES, WindowSizes, Widths};
pub use validate::CoreModel;

/// Pipeline organisation of the CPU core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipelineKind {
    /// Scalar in-order pipeline with latched stages.
    InOrderSingleIssue,
    /// Two-wide in-order pipeline with latched stages.
    InOrderDualIssue,
    /// Superscalar out-of-order core with rename, issue queue, and reorder buffer.
    OutOfOrderSuperscalar,
}

impl PipelineKind {
    /// Returns `true` for both in-order variants.
    pub const fn is_in_order(self) -> bool {
        matches!(self, Self::InOrderSingleIssue | Self::InOrderDualIssue)
    }

    /// Engine component kind that models this pipeline.
    pub const fn cpu_component(self) -> &'static str {
        if self.is_in_order() { "MinorCPU" } else { "O3CPU" }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InOrderSingleIssue => "in-order single-issue",
            Self::InOrderDualIssue => "in-order dual-issue",
            Self::OutOfOrderSuperscalar => "out-of-order",
        })
    }
}

/// Branch direction predictor family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BranchPredictorKind {
    /// Per-branch local history table.
    LocalHistory,
    /// Tournament of local and global predictors with a chooser.
    TournamentHybrid,
}

impl BranchPredictorKind {
    /// Engine component kind for this predictor.
    pub const fn component(self) -> &'static str {
        match self {
            Self::LocalHistory => "LocalBP",
            Self::TournamentHybrid => "TournamentBP",
        }
    }
}

/// DRAM device model behind the memory controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DramKind {
    /// DDR3-1600, 8 devices of x8.
    #[serde(rename = "DDR3_1600_8x8")]
    Ddr3,
    /// DDR4-2400, 8 devices of x8.
    #[default]
    #[serde(rename = "DDR4_2400_8x8")]
    Ddr4,
    /// LPDDR3-1600, 1 device of x32.
    #[serde(rename = "LPDDR3_1600_1x32")]
    Lpddr3,
}

impl DramKind {
    /// Engine component kind for this DRAM model.
    pub const fn component(self) -> &'static str {
        match self {
            Self::Ddr3 => "DDR3_1600_8x8",
            Self::Ddr4 => "DDR4_2400_8x8",
            Self::Lpddr3 => "LPDDR3_1600_1x32",
        }
    }
}

/// One named CPU design.
///
/// In-order profiles carry `stage_buffers`; out-of-order profiles carry `widths`,
/// `window_sizes`, `physical_regs`, and optionally `frontend`. Which sections are present
/// must agree with `pipeline_kind`; [`Profile::validate`] enforces this.
///
/// # Examples
///
/// ```
/// use uarch_catalog::profile::{PipelineKind, Profile};
///
/// let json = r#"{
///     "name": "Tiny",
///     "clockHz": "100MHz",
///     "pipelineKind": "InOrderSingleIssue",
///     "stageBuffers": [1, 1, 1, 1, 1],
///     "functionalUnits": [
///         { "kind": "IntALU", "latency": 1, "count": 1 },
///         { "kind": "CombinedMemoryUnit", "latency": 1, "count": 1 }
///     ],
///     "branchPredictorKind": "LocalHistory",
///     "cacheHierarchy": [
///         { "name": "L1I", "sizeBytes": "8kB" },
///         { "name": "L1D", "sizeBytes": "8kB" }
///     ],
///     "memoryRangeBytes": "256MB",
///     "dramKind": "DDR4_2400_8x8"
/// }"#;
///
/// let profile = Profile::from_json(json).unwrap();
/// assert_eq!(profile.pipeline_kind, PipelineKind::InOrderSingleIssue);
/// assert!(profile.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Profile {
    /// Unique catalog key (e.g. `"BOOM"`).
    pub name: String,
    /// Core clock.
    #[serde(rename = "clockHz")]
    pub clock: Frequency,
    /// Pipeline organisation.
    pub pipeline_kind: PipelineKind,
    /// Inter-stage latch depths, in-order only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_buffers: Option<Vec<u32>>,
    /// Per-stage superscalar widths, out-of-order only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widths: Option<Widths>,
    /// Instruction window sizes, out-of-order only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_sizes: Option<WindowSizes>,
    /// Physical register file sizes, out-of-order only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_regs: Option<PhysicalRegs>,
    /// Fetch buffer sizing, out-of-order only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend: Option<FrontendBuffers>,
    /// Execution resources.
    pub functional_units: Vec<FunctionalUnit>,
    /// Branch predictor family.
    #[serde(rename = "branchPredictorKind")]
    pub branch_predictor: BranchPredictorKind,
    /// Caches, innermost first.
    pub cache_hierarchy: Vec<CacheLevel>,
    /// Size of the system memory range.
    #[serde(rename = "memoryRangeBytes")]
    pub memory_range: ByteSize,
    /// DRAM model.
    #[serde(rename = "dramKind")]
    pub dram: DramKind,
}

impl Profile {
    /// Parses one profile from JSON. The result is not yet validated.
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the profile as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Looks up a cache by name.
    pub fn cache(&self, name: CacheName) -> Option<&CacheLevel> {
        self.cache_hierarchy.iter().find(|c| c.name == name)
    }

    /// Total number of functional units of `kind`, summed over all pool entries.
    pub fn unit_count(&self, kind: FuKind) -> u32 {
        self.functional_units
            .iter()
            .filter(|u| u.kind == kind)
            .map(|u| u.count)
            .sum()
    }
}

/// Parses a JSON document holding one profile or an array of profiles.
///
/// A document starting with `[` is read as a list; anything else as a single profile.
pub fn profiles_from_json(json: &str) -> Result<Vec<Profile>, ProfileError> {
    if json.trim_start().starts_with('[') {
        Ok(serde_json::from_str(json)?)
    } else {
        Ok(vec![serde_json::from_str(json)?])
    }
}

/// Reads profiles from a JSON file. The profiles are not validated.
pub fn load_profiles(path: &Path) -> Result<Vec<Profile>, ProfileError> {
    let text = fs::read_to_string(path).map_err(|source| ProfileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    profiles_from_json(&text)
}
