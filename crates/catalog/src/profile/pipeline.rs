//! Pipeline sizing sections.
//!
//! In-order cores are described by the depth of each inter-stage latch. Out-of-order cores
//! are described by per-stage widths, instruction window sizes, and physical register counts.

use serde::{Deserialize, Serialize};

/// Inter-stage latches of the in-order pipeline, in `stageBuffers` order.
pub const STAGE_LATCHES: [&str; 5] = [
    "fetch1ToFetch2",
    "fetch2ToDecode",
    "decodeToExecute",
    "executeToMemory",
    "memoryToWriteback",
];

/// Instructions per cycle each out-of-order stage can handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Widths {
    /// Fetch width.
    pub fetch: u32,
    /// Decode width.
    pub decode: u32,
    /// Rename width.
    pub rename: u32,
    /// Dispatch width.
    pub dispatch: u32,
    /// Issue width.
    pub issue: u32,
    /// Writeback width.
    pub writeback: u32,
    /// Commit width.
    pub commit: u32,
    /// Execute width; the engine derives it from the issue width when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execute: Option<u32>,
}

impl Widths {
    /// Required widths with their dotted field path.
    pub const fn fields(&self) -> [(&'static str, u32); 7] {
        [
            ("widths.fetch", self.fetch),
            ("widths.decode", self.decode),
            ("widths.rename", self.rename),
            ("widths.dispatch", self.dispatch),
            ("widths.issue", self.issue),
            ("widths.writeback", self.writeback),
            ("widths.commit", self.commit),
        ]
    }
}

/// Out-of-order instruction window capacities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WindowSizes {
    /// Reorder buffer entries.
    pub reorder_buffer_entries: u32,
    /// Issue queue entries.
    pub issue_queue_entries: u32,
    /// Load queue entries.
    pub load_queue_entries: u32,
    /// Store queue entries.
    pub store_queue_entries: u32,
}

impl WindowSizes {
    /// All window sizes with their dotted field path.
    pub const fn fields(&self) -> [(&'static str, u32); 4] {
        [
            ("windowSizes.reorderBufferEntries", self.reorder_buffer_entries),
            ("windowSizes.issueQueueEntries", self.issue_queue_entries),
            ("windowSizes.loadQueueEntries", self.load_queue_entries),
            ("windowSizes.storeQueueEntries", self.store_queue_entries),
        ]
    }
}

/// Physical register file sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PhysicalRegs {
    /// Integer physical registers.
    pub integer: u32,
    /// Floating-point physical registers.
    pub floating_point: u32,
    /// Vector physical registers, if the design renames vector state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<u32>,
}

/// Fetch-side buffering of an out-of-order front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FrontendBuffers {
    /// Fetch buffer size in bytes.
    pub fetch_buffer_bytes: u32,
    /// Fetch queue entries (micro-ops).
    pub fetch_queue_entries: u32,
}
