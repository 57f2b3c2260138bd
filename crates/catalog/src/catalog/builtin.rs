//! Built-in profiles.
//!
//! Parameter values are the ones the shipped system scripts were tuned with. They are
//! representative of each design, not authoritative descriptions of the silicon.

use crate::common::units::{ByteSize, Frequency};
use crate::profile::{
    BranchPredictorKind, CacheLevel, CacheName, DramKind, FrontendBuffers, FuKind,
    FunctionalUnit, PhysicalRegs, PipelineKind, Profile, WindowSizes, Widths,
};

/// Memory range shared by every shipped design except XiangShan.
const DEFAULT_MEMORY: ByteSize = ByteSize::gib(2);

/// All built-in profiles, in registration order.
pub(super) fn all() -> Vec<Profile> {
    vec![ariane(), boom(), black_parrot(), rocket(), shakti_c(), xiangshan()]
}

/// Function units of the scalar in-order cores (Ariane, Rocket, Shakti-C).
fn scalar_in_order_units() -> Vec<FunctionalUnit> {
    vec![
        FunctionalUnit::new(FuKind::IntAlu, 1, 1),
        FunctionalUnit::new(FuKind::IntMultDiv, 3, 1),
        FunctionalUnit::new(FuKind::CombinedMemoryUnit, 1, 1),
        FunctionalUnit::new(FuKind::FloatAlu, 6, 1),
    ]
}

fn caches(l1: ByteSize, outer: &[(CacheName, ByteSize)]) -> Vec<CacheLevel> {
    let mut levels = vec![
        CacheLevel::new(CacheName::L1I, l1),
        CacheLevel::new(CacheName::L1D, l1),
    ];
    levels.extend(outer.iter().map(|&(name, size)| CacheLevel::new(name, size)));
    levels
}

/// A scalar five-latch in-order core with unit-depth latches.
fn scalar_in_order(name: &str, clock: Frequency, l1: ByteSize) -> Profile {
    Profile {
        name: name.to_string(),
        clock,
        pipeline_kind: PipelineKind::InOrderSingleIssue,
        stage_buffers: Some(vec![1; 5]),
        widths: None,
        window_sizes: None,
        physical_regs: None,
        frontend: None,
        functional_units: scalar_in_order_units(),
        branch_predictor: BranchPredictorKind::LocalHistory,
        cache_hierarchy: caches(l1, &[(CacheName::L2, ByteSize::kib(512))]),
        memory_range: DEFAULT_MEMORY,
        dram: DramKind::Ddr4,
    }
}

/// CVA6 (Ariane): six-stage single-issue application core.
pub fn ariane() -> Profile {
    scalar_in_order("Ariane", Frequency::from_hz(1_500_000_000), ByteSize::kib(32))
}

/// Berkeley Out-of-Order Machine, medium configuration.
pub fn boom() -> Profile {
    Profile {
        name: "BOOM".to_string(),
        clock: Frequency::ghz(2),
        pipeline_kind: PipelineKind::OutOfOrderSuperscalar,
        stage_buffers: None,
        widths: Some(Widths {
            fetch: 8,
            decode: 2,
            rename: 2,
            dispatch: 2,
            issue: 4,
            writeback: 4,
            commit: 2,
            execute: Some(4),
        }),
        window_sizes: Some(WindowSizes {
            reorder_buffer_entries: 80,
            issue_queue_entries: 40,
            load_queue_entries: 24,
            store_queue_entries: 24,
        }),
        physical_regs: Some(PhysicalRegs {
            integer: 100,
            floating_point: 96,
            vector: Some(96),
        }),
        frontend: Some(FrontendBuffers {
            fetch_buffer_bytes: 32,
            fetch_queue_entries: 16,
        }),
        functional_units: vec![
            FunctionalUnit::new(FuKind::IntAlu, 1, 1),
            FunctionalUnit::new(FuKind::IntMultDiv, 3, 1),
            FunctionalUnit::new(FuKind::FloatAlu, 2, 1),
            FunctionalUnit::new(FuKind::FloatMultDiv, 4, 1),
            FunctionalUnit::new(FuKind::MemoryReadPort, 1, 1),
            FunctionalUnit::new(FuKind::MemoryWritePort, 1, 1),
        ],
        branch_predictor: BranchPredictorKind::TournamentHybrid,
        cache_hierarchy: caches(ByteSize::kib(32), &[(CacheName::L2, ByteSize::mib(1))]),
        memory_range: DEFAULT_MEMORY,
        dram: DramKind::Ddr4,
    }
}

/// BlackParrot: dual-issue in-order multicore tile, modelled as one core.
pub fn black_parrot() -> Profile {
    Profile {
        name: "BlackParrot".to_string(),
        clock: Frequency::mhz(500),
        pipeline_kind: PipelineKind::InOrderDualIssue,
        stage_buffers: Some(vec![1, 1, 2, 1, 1]),
        widths: None,
        window_sizes: None,
        physical_regs: None,
        frontend: None,
        functional_units: vec![
            FunctionalUnit::new(FuKind::IntAlu, 1, 2),
            FunctionalUnit::new(FuKind::IntMultDiv, 3, 1),
            FunctionalUnit::new(FuKind::CombinedMemoryUnit, 1, 1),
            FunctionalUnit::new(FuKind::FloatAlu, 6, 1),
        ],
        branch_predictor: BranchPredictorKind::LocalHistory,
        cache_hierarchy: caches(ByteSize::kib(32), &[(CacheName::L2, ByteSize::kib(512))]),
        memory_range: DEFAULT_MEMORY,
        dram: DramKind::Ddr4,
    }
}

/// Rocket: five-stage single-issue in-order core.
pub fn rocket() -> Profile {
    scalar_in_order("Rocket", Frequency::ghz(1), ByteSize::kib(16))
}

/// Shakti C-class: five-stage in-order core.
pub fn shakti_c() -> Profile {
    scalar_in_order("Shakti-C", Frequency::ghz(1), ByteSize::kib(16))
}

/// XiangShan (Nanhu): wide out-of-order core with a three-level hierarchy.
pub fn xiangshan() -> Profile {
    Profile {
        name: "XiangShan".to_string(),
        clock: Frequency::ghz(2),
        pipeline_kind: PipelineKind::OutOfOrderSuperscalar,
        stage_buffers: None,
        widths: Some(Widths {
            fetch: 8,
            decode: 6,
            rename: 6,
            dispatch: 6,
            issue: 6,
            writeback: 6,
            commit: 6,
            execute: None,
        }),
        window_sizes: Some(WindowSizes {
            reorder_buffer_entries: 256,
            issue_queue_entries: 128,
            load_queue_entries: 72,
            store_queue_entries: 72,
        }),
        physical_regs: Some(PhysicalRegs {
            integer: 160,
            floating_point: 160,
            vector: None,
        }),
        frontend: None,
        functional_units: vec![
            FunctionalUnit::new(FuKind::IntAlu, 1, 6),
            FunctionalUnit::new(FuKind::IntMultDiv, 3, 2),
            FunctionalUnit::new(FuKind::FloatAlu, 2, 2),
            FunctionalUnit::new(FuKind::MemoryReadPort, 1, 2),
            FunctionalUnit::new(FuKind::MemoryWritePort, 1, 1),
        ],
        branch_predictor: BranchPredictorKind::TournamentHybrid,
        cache_hierarchy: caches(
            ByteSize::kib(64),
            &[
                (CacheName::L2, ByteSize::mib(1)),
                (CacheName::L3, ByteSize::mib(8)),
            ],
        ),
        memory_range: ByteSize::gib(4),
        dram: DramKind::Ddr4,
    }
}
