//! Functional-unit inventory.
//!
//! The pool is a multiset of `(kind, latency, count)` entries; the same kind may appear more
//! than once with different latencies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of execution resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuKind {
    /// Integer add/logic/shift/branch.
    #[serde(rename = "IntALU")]
    IntAlu,
    /// Integer multiply and divide.
    IntMultDiv,
    /// Floating-point add/compare/convert.
    #[serde(rename = "FloatALU")]
    FloatAlu,
    /// Floating-point multiply, divide, and square root.
    FloatMultDiv,
    /// Load port.
    MemoryReadPort,
    /// Store port.
    MemoryWritePort,
    /// Single unit handling both loads and stores (in-order pipelines).
    CombinedMemoryUnit,
}

impl FuKind {
    /// Engine component kind for this unit inside an out-of-order pool.
    pub const fn o3_component(self) -> &'static str {
        match self {
            Self::IntAlu => "IntALU",
            Self::IntMultDiv => "IntMultDiv",
            Self::FloatAlu => "FP_ALU",
            Self::FloatMultDiv => "FP_MultDiv",
            Self::MemoryReadPort => "ReadPort",
            Self::MemoryWritePort => "WritePort",
            Self::CombinedMemoryUnit => "MemFU",
        }
    }

    /// Engine component kind for this unit inside an in-order pool.
    ///
    /// The in-order model has one floating-point unit type serving both FP classes.
    pub const fn minor_component(self) -> &'static str {
        match self {
            Self::IntAlu => "MinorIntALU",
            Self::IntMultDiv => "MinorIntMultDiv",
            Self::FloatAlu | Self::FloatMultDiv => "MinorFloatFU",
            Self::MemoryReadPort | Self::MemoryWritePort | Self::CombinedMemoryUnit => {
                "MinorMemFU"
            }
        }
    }
}

impl fmt::Display for FuKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::IntAlu => "IntALU",
            Self::IntMultDiv => "IntMultDiv",
            Self::FloatAlu => "FloatALU",
            Self::FloatMultDiv => "FloatMultDiv",
            Self::MemoryReadPort => "MemoryReadPort",
            Self::MemoryWritePort => "MemoryWritePort",
            Self::CombinedMemoryUnit => "CombinedMemoryUnit",
        })
    }
}

/// One entry of the functional-unit pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionalUnit {
    /// Unit category.
    pub kind: FuKind,
    /// Operation latency in cycles.
    pub latency: u32,
    /// Number of identical units.
    pub count: u32,
}

impl FunctionalUnit {
    /// Creates a pool entry.
    pub const fn new(kind: FuKind, latency: u32, count: u32) -> Self {
        Self {
            kind,
            latency,
            count,
        }
    }
}
