//! # Validation Tests
//!
//! Tests that every built-in profile validates and that each invariant violation is
//! reported with a reason naming the offending field.

use rstest::rstest;
use uarch_catalog::common::{ByteSize, Frequency};
use uarch_catalog::profile::{
    CacheName, CoreModel, FrontendBuffers, FuKind, FunctionalUnit, PhysicalRegs, PipelineKind,
    WindowSizes,
};
use uarch_catalog::{InvalidReason, Profile, ProfileCatalog, ProfileError};

use crate::common::builder::ProfileBuilder;

/// Validates `profile` and returns the reason it was rejected.
fn rejection(profile: &Profile) -> InvalidReason {
    match profile.validate() {
        Err(ProfileError::InvalidProfile { profile: name, reason }) => {
            assert_eq!(name, profile.name);
            reason
        }
        other => panic!("expected InvalidProfile, got {other:?}"),
    }
}

// ══════════════════════════════════════════════════════════
// Built-in profiles
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("Ariane")]
#[case("BOOM")]
#[case("BlackParrot")]
#[case("Rocket")]
#[case("Shakti-C")]
#[case("XiangShan")]
fn test_builtin_profile_validates(#[case] name: &str) {
    let catalog = ProfileCatalog::builtin();
    let profile = catalog.get_profile(name).unwrap();
    assert!(catalog.validate(profile).is_ok());
}

#[rstest]
#[case("Ariane")]
#[case("BlackParrot")]
#[case("Rocket")]
#[case("Shakti-C")]
fn test_builtin_in_order_shape(#[case] name: &str) {
    let profile = ProfileCatalog::builtin().get_profile(name).unwrap();
    assert!(profile.pipeline_kind.is_in_order());
    assert_eq!(profile.stage_buffers.as_ref().map(Vec::len), Some(5));
    assert!(profile.widths.is_none());
    assert!(profile.window_sizes.is_none());
    assert!(profile.physical_regs.is_none());
}

#[rstest]
#[case("BOOM")]
#[case("XiangShan")]
fn test_builtin_out_of_order_shape(#[case] name: &str) {
    let profile = ProfileCatalog::builtin().get_profile(name).unwrap();
    assert!(profile.stage_buffers.is_none());
    let widths = profile.widths.unwrap();
    assert!(widths.fields().iter().all(|&(_, w)| w > 0));
    assert!(!profile.functional_units.is_empty());
}

#[rstest]
#[case("Ariane")]
#[case("BOOM")]
#[case("BlackParrot")]
#[case("Rocket")]
#[case("Shakti-C")]
#[case("XiangShan")]
fn test_builtin_cache_sizes_increase_outward(#[case] name: &str) {
    let profile = ProfileCatalog::builtin().get_profile(name).unwrap();
    let levels = &profile.cache_hierarchy;
    for outer in levels {
        for inner in levels.iter().filter(|l| l.tier() < outer.tier()) {
            assert!(
                outer.size > inner.size,
                "{name}: {} not larger than {}",
                outer.name,
                inner.name
            );
        }
    }
}

#[test]
fn test_core_model_matches_pipeline_kind() {
    let catalog = ProfileCatalog::builtin();
    let rocket = catalog.get_profile("Rocket").unwrap();
    assert!(matches!(
        rocket.core_model().unwrap(),
        CoreModel::InOrder {
            kind: PipelineKind::InOrderSingleIssue,
            stage_buffers: [1, 1, 1, 1, 1],
        }
    ));
    let boom = catalog.get_profile("BOOM").unwrap();
    match boom.core_model().unwrap() {
        CoreModel::OutOfOrder { widths, frontend, .. } => {
            assert_eq!(widths.fetch, 8);
            assert_eq!(frontend.map(|f| f.fetch_queue_entries), Some(16));
        }
        CoreModel::InOrder { .. } => panic!("BOOM is out-of-order"),
    }
}

// ══════════════════════════════════════════════════════════
// Clock and memory
// ══════════════════════════════════════════════════════════

#[test]
fn test_zero_clock_rejected() {
    let profile = ProfileBuilder::in_order().clock(Frequency::from_hz(0)).build();
    assert_eq!(rejection(&profile), InvalidReason::ZeroClock);
}

#[test]
fn test_zero_memory_range_rejected() {
    let profile = ProfileBuilder::in_order()
        .memory_range(ByteSize::new(0))
        .build();
    assert_eq!(rejection(&profile), InvalidReason::ZeroMemoryRange);
}

#[test]
fn test_clock_checked_before_everything_else() {
    let profile = ProfileBuilder::in_order()
        .clock(Frequency::from_hz(0))
        .units(Vec::new())
        .memory_range(ByteSize::new(0))
        .build();
    assert_eq!(rejection(&profile), InvalidReason::ZeroClock);
}

// ══════════════════════════════════════════════════════════
// Pipeline sections
// ══════════════════════════════════════════════════════════

#[test]
fn test_stage_buffers_on_out_of_order_rejected() {
    let profile = ProfileBuilder::out_of_order()
        .stage_buffers(Some(vec![1; 5]))
        .build();
    let reason = rejection(&profile);
    assert_eq!(reason, InvalidReason::StageBuffersOnOutOfOrder);
    assert_eq!(
        reason.to_string(),
        "stageBuffers present on out-of-order profile"
    );
}

#[test]
fn test_missing_stage_buffers_rejected() {
    let profile = ProfileBuilder::in_order().stage_buffers(None).build();
    let reason = rejection(&profile);
    assert_eq!(
        reason,
        InvalidReason::MissingStageBuffers(PipelineKind::InOrderSingleIssue)
    );
    assert!(reason.to_string().contains("stageBuffers"));
}

#[rstest]
#[case(vec![1, 1, 1, 1])]
#[case(vec![1, 1, 1, 1, 1, 1])]
#[case(Vec::new())]
fn test_stage_buffer_count_must_be_five(#[case] buffers: Vec<u32>) {
    let found = buffers.len();
    let profile = ProfileBuilder::in_order()
        .stage_buffers(Some(buffers))
        .build();
    assert_eq!(
        rejection(&profile),
        InvalidReason::StageBufferCount { found, expected: 5 }
    );
}

#[test]
fn test_zero_stage_buffer_names_latch() {
    let profile = ProfileBuilder::in_order()
        .stage_buffers(Some(vec![1, 1, 0, 1, 1]))
        .build();
    let reason = rejection(&profile);
    assert_eq!(
        reason,
        InvalidReason::ZeroStageBuffer {
            index: 2,
            latch: "decodeToExecute"
        }
    );
    assert!(reason.to_string().contains("stageBuffers[2]"));
}

#[test]
fn test_out_of_order_section_on_in_order_rejected() {
    let profile = ProfileBuilder::in_order()
        .with(|p| {
            p.window_sizes = Some(WindowSizes {
                reorder_buffer_entries: 8,
                issue_queue_entries: 8,
                load_queue_entries: 8,
                store_queue_entries: 8,
            });
        })
        .build();
    let reason = rejection(&profile);
    assert_eq!(
        reason,
        InvalidReason::OutOfOrderFieldOnInOrder {
            field: "windowSizes"
        }
    );
    assert_eq!(reason.to_string(), "windowSizes present on in-order profile");
}

#[test]
fn test_frontend_on_in_order_rejected() {
    let profile = ProfileBuilder::in_order()
        .with(|p| {
            p.frontend = Some(FrontendBuffers {
                fetch_buffer_bytes: 16,
                fetch_queue_entries: 8,
            });
        })
        .build();
    assert_eq!(
        rejection(&profile),
        InvalidReason::OutOfOrderFieldOnInOrder { field: "frontend" }
    );
}

#[rstest]
#[case("widths")]
#[case("windowSizes")]
#[case("physicalRegs")]
fn test_missing_out_of_order_section_rejected(#[case] field: &'static str) {
    let profile = ProfileBuilder::out_of_order()
        .with(|p| match field {
            "widths" => p.widths = None,
            "windowSizes" => p.window_sizes = None,
            _ => p.physical_regs = None,
        })
        .build();
    assert_eq!(
        rejection(&profile),
        InvalidReason::MissingOutOfOrderField { field }
    );
}

#[test]
fn test_zero_width_names_field() {
    let profile = ProfileBuilder::out_of_order()
        .with(|p| {
            if let Some(w) = p.widths.as_mut() {
                w.commit = 0;
            }
        })
        .build();
    let reason = rejection(&profile);
    assert_eq!(
        reason,
        InvalidReason::ZeroParameter {
            field: "widths.commit"
        }
    );
    assert_eq!(reason.to_string(), "widths.commit must be positive");
}

#[test]
fn test_zero_optional_sizes_rejected() {
    let profile = ProfileBuilder::out_of_order()
        .with(|p| {
            p.physical_regs = Some(PhysicalRegs {
                integer: 64,
                floating_point: 64,
                vector: Some(0),
            });
        })
        .build();
    assert_eq!(
        rejection(&profile),
        InvalidReason::ZeroParameter {
            field: "physicalRegs.vector"
        }
    );

    let profile = ProfileBuilder::out_of_order()
        .with(|p| {
            if let Some(w) = p.widths.as_mut() {
                w.execute = Some(0);
            }
        })
        .build();
    assert_eq!(
        rejection(&profile),
        InvalidReason::ZeroParameter {
            field: "widths.execute"
        }
    );
}

#[test]
fn test_reorder_buffer_smaller_than_issue_queue_allowed() {
    let profile = ProfileBuilder::out_of_order()
        .with(|p| {
            if let Some(w) = p.window_sizes.as_mut() {
                w.reorder_buffer_entries = 4;
                w.issue_queue_entries = 64;
            }
        })
        .build();
    assert!(profile.validate().is_ok());
}

// ══════════════════════════════════════════════════════════
// Functional units
// ══════════════════════════════════════════════════════════

#[test]
fn test_empty_functional_units_rejected() {
    let profile = ProfileBuilder::out_of_order().units(Vec::new()).build();
    let reason = rejection(&profile);
    assert_eq!(reason, InvalidReason::EmptyFunctionalUnits);
    assert_eq!(reason.to_string(), "functionalUnits empty");
}

#[test]
fn test_zero_unit_count_and_latency_rejected() {
    let profile = ProfileBuilder::in_order()
        .units(vec![
            FunctionalUnit::new(FuKind::IntAlu, 1, 0),
            FunctionalUnit::new(FuKind::CombinedMemoryUnit, 1, 1),
        ])
        .build();
    assert_eq!(
        rejection(&profile),
        InvalidReason::ZeroUnitCount(FuKind::IntAlu)
    );

    let profile = ProfileBuilder::in_order()
        .units(vec![
            FunctionalUnit::new(FuKind::IntAlu, 1, 1),
            FunctionalUnit::new(FuKind::CombinedMemoryUnit, 0, 1),
        ])
        .build();
    assert_eq!(
        rejection(&profile),
        InvalidReason::ZeroUnitLatency(FuKind::CombinedMemoryUnit)
    );
}

#[test]
fn test_separate_memory_ports_rejected_on_in_order() {
    let profile = ProfileBuilder::in_order()
        .units(vec![
            FunctionalUnit::new(FuKind::IntAlu, 1, 1),
            FunctionalUnit::new(FuKind::MemoryReadPort, 1, 1),
        ])
        .build();
    assert_eq!(
        rejection(&profile),
        InvalidReason::UnsupportedUnit {
            kind: FuKind::MemoryReadPort,
            pipeline: PipelineKind::InOrderSingleIssue,
        }
    );
}

#[test]
fn test_combined_memory_unit_rejected_on_out_of_order() {
    let profile = ProfileBuilder::out_of_order()
        .units(vec![
            FunctionalUnit::new(FuKind::IntAlu, 1, 1),
            FunctionalUnit::new(FuKind::CombinedMemoryUnit, 1, 1),
        ])
        .build();
    assert!(matches!(
        rejection(&profile),
        InvalidReason::UnsupportedUnit {
            kind: FuKind::CombinedMemoryUnit,
            ..
        }
    ));
}

// ══════════════════════════════════════════════════════════
// Cache hierarchy
// ══════════════════════════════════════════════════════════

#[test]
fn test_empty_cache_hierarchy_rejected() {
    let profile = ProfileBuilder::in_order().caches(&[]).build();
    assert_eq!(rejection(&profile), InvalidReason::EmptyCacheHierarchy);
}

#[test]
fn test_duplicate_cache_rejected() {
    let profile = ProfileBuilder::in_order()
        .caches(&[(CacheName::L1D, 8), (CacheName::L1D, 8)])
        .build();
    assert_eq!(
        rejection(&profile),
        InvalidReason::DuplicateCache(CacheName::L1D)
    );
}

#[test]
fn test_cache_order_rejected() {
    let profile = ProfileBuilder::in_order()
        .caches(&[(CacheName::L1I, 8), (CacheName::L2, 64), (CacheName::L1D, 8)])
        .build();
    assert_eq!(
        rejection(&profile),
        InvalidReason::CacheOrder {
            inner: CacheName::L1D,
            outer: CacheName::L2,
        }
    );
}

#[test]
fn test_skipped_tier_rejected() {
    let profile = ProfileBuilder::in_order()
        .caches(&[(CacheName::L1I, 8), (CacheName::L1D, 8), (CacheName::L3, 1024)])
        .build();
    assert_eq!(rejection(&profile), InvalidReason::MissingCacheTier(2));

    let profile = ProfileBuilder::in_order()
        .caches(&[(CacheName::L2, 64)])
        .build();
    assert_eq!(rejection(&profile), InvalidReason::MissingCacheTier(1));
}

#[test]
fn test_zero_cache_size_rejected() {
    let profile = ProfileBuilder::in_order()
        .caches(&[(CacheName::L1I, 8), (CacheName::L1D, 0)])
        .build();
    assert_eq!(
        rejection(&profile),
        InvalidReason::ZeroCacheSize(CacheName::L1D)
    );
}

#[rstest]
#[case(&[(CacheName::L1I, 64), (CacheName::L1D, 8), (CacheName::L2, 64)])]
#[case(&[(CacheName::L1I, 8), (CacheName::L1D, 8), (CacheName::L2, 4)])]
#[case(&[(CacheName::L1D, 8), (CacheName::L2, 64), (CacheName::L3, 64)])]
fn test_non_increasing_cache_sizes_rejected(#[case] levels: &[(CacheName, u64)]) {
    let profile = ProfileBuilder::in_order().caches(levels).build();
    let reason = rejection(&profile);
    assert!(matches!(reason, InvalidReason::NonIncreasingCacheSize { .. }));
    assert!(
        reason
            .to_string()
            .starts_with("cacheHierarchy sizes non-increasing")
    );
}

#[test]
fn test_single_l1_hierarchy_allowed() {
    let profile = ProfileBuilder::in_order()
        .caches(&[(CacheName::L1D, 8)])
        .build();
    assert!(profile.validate().is_ok());
}

#[test]
fn test_mismatched_l1_sizes_allowed() {
    let profile = ProfileBuilder::in_order()
        .caches(&[(CacheName::L1I, 16), (CacheName::L1D, 32), (CacheName::L2, 64)])
        .build();
    assert!(profile.validate().is_ok());
}
