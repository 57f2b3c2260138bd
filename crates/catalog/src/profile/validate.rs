//! Profile invariant checks.
//!
//! Validation runs the checks below in order and stops at the first failure:
//! 1. **Clock:** non-zero.
//! 2. **Pipeline sections:** present iff they match `pipelineKind`; every size positive.
//! 3. **Functional units:** non-empty, positive counts and latencies, memory units the
//!    pipeline style can host.
//! 4. **Caches:** one of each name at most, innermost first, no skipped tier, sizes strictly
//!    growing outward.
//! 5. **Memory range:** non-zero.
//!
//! A successful check yields a [`CoreModel`], the sum-type view of the core that the engine
//! layer consumes.

use crate::common::error::{InvalidReason, ProfileError};
use crate::profile::cache::{CacheLevel, CacheName};
use crate::profile::fu::{FuKind, FunctionalUnit};
use crate::profile::pipeline::{
    FrontendBuffers, PhysicalRegs, STAGE_LATCHES, WindowSizes, Widths,
};
use crate::profile::{PipelineKind, Profile};

/// Validated view of a profile's core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreModel<'a> {
    /// Latched in-order pipeline.
    InOrder {
        /// Single- or dual-issue.
        kind: PipelineKind,
        /// Latch depths, in [`STAGE_LATCHES`] order.
        stage_buffers: [u32; STAGE_LATCHES.len()],
    },
    /// Out-of-order superscalar core.
    OutOfOrder {
        /// Per-stage widths.
        widths: &'a Widths,
        /// Window capacities.
        windows: &'a WindowSizes,
        /// Physical register counts.
        regs: &'a PhysicalRegs,
        /// Optional fetch buffering.
        frontend: Option<&'a FrontendBuffers>,
    },
}

impl Profile {
    /// Checks every invariant and reports the first one violated.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidProfile`] naming the failed check.
    pub fn validate(&self) -> Result<(), ProfileError> {
        self.core_model().map(|_| ())
    }

    /// Validates the profile and returns its core as a [`CoreModel`].
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidProfile`] naming the failed check.
    pub fn core_model(&self) -> Result<CoreModel<'_>, ProfileError> {
        self.check().map_err(|reason| ProfileError::InvalidProfile {
            profile: self.name.clone(),
            reason,
        })
    }

    fn check(&self) -> Result<CoreModel<'_>, InvalidReason> {
        if self.clock.hz() == 0 {
            return Err(InvalidReason::ZeroClock);
        }
        let core = self.check_pipeline()?;
        check_functional_units(self.pipeline_kind, &self.functional_units)?;
        check_caches(&self.cache_hierarchy)?;
        if self.memory_range.bytes() == 0 {
            return Err(InvalidReason::ZeroMemoryRange);
        }
        Ok(core)
    }

    fn check_pipeline(&self) -> Result<CoreModel<'_>, InvalidReason> {
        if self.pipeline_kind.is_in_order() {
            let present = [
                ("widths", self.widths.is_some()),
                ("windowSizes", self.window_sizes.is_some()),
                ("physicalRegs", self.physical_regs.is_some()),
                ("frontend", self.frontend.is_some()),
            ];
            if let Some(&(field, _)) = present.iter().find(|(_, p)| *p) {
                return Err(InvalidReason::OutOfOrderFieldOnInOrder { field });
            }
            let buffers = self
                .stage_buffers
                .as_deref()
                .ok_or(InvalidReason::MissingStageBuffers(self.pipeline_kind))?;
            let stage_buffers: [u32; STAGE_LATCHES.len()] =
                buffers.try_into().map_err(|_| InvalidReason::StageBufferCount {
                    found: buffers.len(),
                    expected: STAGE_LATCHES.len(),
                })?;
            if let Some(index) = stage_buffers.iter().position(|&depth| depth == 0) {
                return Err(InvalidReason::ZeroStageBuffer {
                    index,
                    latch: STAGE_LATCHES[index],
                });
            }
            return Ok(CoreModel::InOrder {
                kind: self.pipeline_kind,
                stage_buffers,
            });
        }

        if self.stage_buffers.is_some() {
            return Err(InvalidReason::StageBuffersOnOutOfOrder);
        }
        let missing = |field| InvalidReason::MissingOutOfOrderField { field };
        let widths = self.widths.as_ref().ok_or_else(|| missing("widths"))?;
        let windows = self
            .window_sizes
            .as_ref()
            .ok_or_else(|| missing("windowSizes"))?;
        let regs = self
            .physical_regs
            .as_ref()
            .ok_or_else(|| missing("physicalRegs"))?;

        let mut sizes: Vec<(&'static str, u32)> = Vec::with_capacity(16);
        sizes.extend(widths.fields());
        if let Some(execute) = widths.execute {
            sizes.push(("widths.execute", execute));
        }
        sizes.extend(windows.fields());
        sizes.push(("physicalRegs.integer", regs.integer));
        sizes.push(("physicalRegs.floatingPoint", regs.floating_point));
        if let Some(vector) = regs.vector {
            sizes.push(("physicalRegs.vector", vector));
        }
        if let Some(frontend) = &self.frontend {
            sizes.push(("frontend.fetchBufferBytes", frontend.fetch_buffer_bytes));
            sizes.push(("frontend.fetchQueueEntries", frontend.fetch_queue_entries));
        }
        if let Some(&(field, _)) = sizes.iter().find(|(_, v)| *v == 0) {
            return Err(InvalidReason::ZeroParameter { field });
        }

        Ok(CoreModel::OutOfOrder {
            widths,
            windows,
            regs,
            frontend: self.frontend.as_ref(),
        })
    }
}

fn check_functional_units(
    pipeline: PipelineKind,
    units: &[FunctionalUnit],
) -> Result<(), InvalidReason> {
    if units.is_empty() {
        return Err(InvalidReason::EmptyFunctionalUnits);
    }
    for unit in units {
        if unit.count == 0 {
            return Err(InvalidReason::ZeroUnitCount(unit.kind));
        }
        if unit.latency == 0 {
            return Err(InvalidReason::ZeroUnitLatency(unit.kind));
        }
        // The in-order engine only models a combined load/store unit; the out-of-order
        // engine only models separate ports.
        let supported = match unit.kind {
            FuKind::MemoryReadPort | FuKind::MemoryWritePort => !pipeline.is_in_order(),
            FuKind::CombinedMemoryUnit => pipeline.is_in_order(),
            _ => true,
        };
        if !supported {
            return Err(InvalidReason::UnsupportedUnit {
                kind: unit.kind,
                pipeline,
            });
        }
    }
    Ok(())
}

fn check_caches(levels: &[CacheLevel]) -> Result<(), InvalidReason> {
    if levels.is_empty() {
        return Err(InvalidReason::EmptyCacheHierarchy);
    }

    let mut seen: Vec<CacheName> = Vec::with_capacity(levels.len());
    let mut prev: Option<&CacheLevel> = None;
    for level in levels {
        if seen.contains(&level.name) {
            return Err(InvalidReason::DuplicateCache(level.name));
        }
        seen.push(level.name);

        if level.size.bytes() == 0 {
            return Err(InvalidReason::ZeroCacheSize(level.name));
        }

        let prev_tier = prev.map_or(0, CacheLevel::tier);
        if let Some(p) = prev.filter(|p| level.tier() < p.tier()) {
            return Err(InvalidReason::CacheOrder {
                inner: level.name,
                outer: p.name,
            });
        }
        if level.tier() > prev_tier + 1 {
            return Err(InvalidReason::MissingCacheTier(prev_tier + 1));
        }
        prev = Some(level);
    }

    // Every cache must be strictly larger than every cache of the tier inside it.
    for (i, outer) in levels.iter().enumerate() {
        let inner_tier = outer.tier().saturating_sub(1);
        if let Some(inner) = levels[..i]
            .iter()
            .filter(|l| l.tier() == inner_tier)
            .max_by_key(|l| l.size)
        {
            if outer.size <= inner.size {
                return Err(InvalidReason::NonIncreasingCacheSize {
                    inner: inner.name,
                    inner_size: inner.size.bytes(),
                    outer: outer.name,
                    outer_size: outer.size.bytes(),
                });
            }
        }
    }
    Ok(())
}
