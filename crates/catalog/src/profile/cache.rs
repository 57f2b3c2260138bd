//! Cache hierarchy entries.
//!
//! Caches are listed innermost first. The L1 instruction and data caches share tier 1 and
//! hang off the CPU's ports; every further tier sits behind an inter-level crossbar, and the
//! outermost tier drains into the system crossbar in front of the memory controller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::units::ByteSize;

/// Identity of a cache in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CacheName {
    /// Level-1 instruction cache.
    L1I,
    /// Level-1 data cache.
    L1D,
    /// Unified level-2 cache.
    L2,
    /// Unified level-3 cache.
    L3,
}

/// Where a cache's CPU-side port attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Private to the core; the CPU side connects to a CPU port.
    CpuPort(&'static str),
    /// Shared; the CPU side connects to the crossbar of the tier inside it.
    BehindBus,
}

impl CacheName {
    /// Distance from the core: 1 for L1I/L1D, 2 for L2, 3 for L3.
    pub const fn tier(self) -> u8 {
        match self {
            Self::L1I | Self::L1D => 1,
            Self::L2 => 2,
            Self::L3 => 3,
        }
    }

    /// Attachment point of the cache's CPU side.
    pub const fn placement(self) -> Placement {
        match self {
            Self::L1I => Placement::CpuPort("icache_port"),
            Self::L1D => Placement::CpuPort("dcache_port"),
            Self::L2 | Self::L3 => Placement::BehindBus,
        }
    }

    /// Engine component kind for this cache.
    pub const fn component(self) -> &'static str {
        match self {
            Self::L1I => "L1ICache",
            Self::L1D => "L1DCache",
            Self::L2 => "L2Cache",
            Self::L3 => "L3Cache",
        }
    }
}

impl fmt::Display for CacheName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::L1I => "L1I",
            Self::L1D => "L1D",
            Self::L2 => "L2",
            Self::L3 => "L3",
        })
    }
}

/// A single cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheLevel {
    /// Which cache this is.
    pub name: CacheName,
    /// Capacity.
    #[serde(rename = "sizeBytes")]
    pub size: ByteSize,
}

impl CacheLevel {
    /// Creates a cache entry.
    pub const fn new(name: CacheName, size: ByteSize) -> Self {
        Self { name, size }
    }

    /// Shorthand for [`CacheName::tier`].
    pub const fn tier(&self) -> u8 {
        self.name.tier()
    }
}

/// Groups a validated hierarchy by tier, innermost first.
///
/// Relies on the hierarchy being ordered by tier, which validation guarantees.
pub fn tiers(levels: &[CacheLevel]) -> Vec<&[CacheLevel]> {
    levels.chunk_by(|a, b| a.tier() == b.tier()).collect()
}
