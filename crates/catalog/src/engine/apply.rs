//! Profile application.
//!
//! Turns a validated profile into engine operations. The order is fixed because the engine
//! resolves ports at instantiation time:
//! 1. **System:** root object, clock, memory mode, memory range, system crossbar.
//! 2. **Core:** branch predictor, functional units, pool, then the CPU with every core
//!    parameter. The core exists before any cache.
//! 3. **Caches:** L1s are created and wired to their CPU ports first; each further tier gets
//!    its own crossbar, fed by the tier inside it. The outermost tier drains into the
//!    system crossbar.
//! 4. **Memory:** system port, DRAM device, memory controller, and the controller's
//!    connection to the system crossbar, strictly after the outermost cache is wired.
//! 5. **Workload:** optional process and the full-system flag.
//!
//! Engine errors abort the sequence and are returned unchanged.

use tracing::{debug, debug_span, trace};

use crate::common::error::{EngineError, InvalidReason, ProfileError};
use crate::config::SystemConfig;
use crate::engine::{AppliedSystem, Assignment, ComponentHandle, Engine, ParamValue, Port};
use crate::profile::cache::{self, Placement};
use crate::profile::{CoreModel, Profile, STAGE_LATCHES};

/// CPU-side ports every core exposes towards the L1 caches.
const CPU_CACHE_PORTS: [&str; 2] = ["icache_port", "dcache_port"];

/// Thin wrapper that traces every operation before handing it to the engine.
struct Issuer<'e, E: Engine + ?Sized> {
    engine: &'e mut E,
}

impl<E: Engine + ?Sized> Issuer<'_, E> {
    fn create(
        &mut self,
        kind: &str,
        params: Vec<Assignment>,
    ) -> Result<ComponentHandle, EngineError> {
        let handle = self.engine.create_component(kind, params)?;
        trace!(kind, %handle, "created component");
        Ok(handle)
    }

    fn connect(&mut self, a: Port, b: Port) -> Result<(), EngineError> {
        self.engine.connect(a, b)?;
        trace!(%a, %b, "connected ports");
        Ok(())
    }

    fn set(&mut self, path: &str, value: impl Into<ParamValue>) -> Result<(), EngineError> {
        let value = value.into();
        trace!(path, %value, "set global parameter");
        self.engine.set_global_param(path, value)
    }

    /// Connects the memory side of `inner` caches, plus any CPU ports without an L1, to the
    /// CPU side of `bus`.
    fn drain_into(
        &mut self,
        inner: &[ComponentHandle],
        bypass: &mut Vec<Port>,
        bus: ComponentHandle,
    ) -> Result<(), EngineError> {
        for &cache in inner {
            self.connect(cache.port("mem_side"), bus.port("cpu_side_ports"))?;
        }
        for port in bypass.drain(..) {
            self.connect(port, bus.port("cpu_side_ports"))?;
        }
        Ok(())
    }
}

/// Validates `profile` and issues the operations that build it inside `engine`.
///
/// # Errors
///
/// Returns [`ProfileError::InvalidProfile`] before touching the engine if the profile is
/// inconsistent or the configured memory range override is zero, or
/// [`ProfileError::EngineConstruction`] carrying the engine's own error.
pub fn apply<E: Engine + ?Sized>(
    profile: &Profile,
    config: &SystemConfig,
    engine: &mut E,
) -> Result<AppliedSystem, ProfileError> {
    let core = profile.core_model()?;
    let memory_range = config.memory_range.unwrap_or(profile.memory_range);
    if memory_range.bytes() == 0 {
        return Err(ProfileError::InvalidProfile {
            profile: profile.name.clone(),
            reason: InvalidReason::ZeroMemoryRange,
        });
    }
    let _span = debug_span!("apply", profile = %profile.name).entered();
    debug!(pipeline = %profile.pipeline_kind, clock = %profile.clock, "applying profile");

    let mut io = Issuer { engine };

    let system = io.create("System", Vec::new())?;
    io.set("system.clk_domain.clock", profile.clock)?;
    io.set("system.mem_mode", config.mem_mode.as_str())?;
    io.set("system.mem_ranges", ParamValue::List(vec![memory_range.into()]))?;
    let membus = io.create("SystemXBar", Vec::new())?;

    let branch_predictor = io.create(profile.branch_predictor.component(), Vec::new())?;
    let in_order = profile.pipeline_kind.is_in_order();
    let mut units = Vec::with_capacity(profile.functional_units.len());
    for unit in &profile.functional_units {
        let kind = if in_order {
            unit.kind.minor_component()
        } else {
            unit.kind.o3_component()
        };
        let handle = io.create(
            kind,
            vec![
                Assignment::new("opLat", unit.latency),
                Assignment::new("count", unit.count),
            ],
        )?;
        units.push(ParamValue::Component(handle));
    }
    let pool_kind = if in_order { "MinorFUPool" } else { "FUPool" };
    let fu_pool = io.create(
        pool_kind,
        vec![Assignment::new("FUList", ParamValue::List(units))],
    )?;

    let cpu_params = core_params(&core, branch_predictor, fu_pool);
    let cpu = io.create(profile.pipeline_kind.cpu_component(), cpu_params)?;
    io.set("system.cpu", cpu)?;

    let tiers = cache::tiers(&profile.cache_hierarchy);
    let mut caches = Vec::with_capacity(profile.cache_hierarchy.len());
    let mut buses = Vec::new();

    let mut inner = Vec::new();
    let first = tiers.first().copied().unwrap_or_default();
    for level in first {
        let handle = io.create(
            level.name.component(),
            vec![Assignment::new("size", level.size)],
        )?;
        caches.push((level.name, handle));
        inner.push(handle);
    }
    let mut claimed = Vec::with_capacity(CPU_CACHE_PORTS.len());
    for (level, &handle) in first.iter().zip(&inner) {
        if let Placement::CpuPort(port) = level.name.placement() {
            io.connect(handle.port("cpu_side"), cpu.port(port))?;
            claimed.push(port);
        }
    }
    // A core without one of the L1s talks to the next level directly on that port.
    let mut bypass: Vec<Port> = CPU_CACHE_PORTS
        .iter()
        .filter(|port| !claimed.contains(*port))
        .map(|&port| cpu.port(port))
        .collect();

    for tier in tiers.iter().skip(1) {
        let bus = io.create("L2XBar", Vec::new())?;
        buses.push(bus);
        io.drain_into(&inner, &mut bypass, bus)?;

        inner.clear();
        for level in *tier {
            let handle = io.create(
                level.name.component(),
                vec![Assignment::new("size", level.size)],
            )?;
            io.connect(handle.port("cpu_side"), bus.port("mem_side_ports"))?;
            caches.push((level.name, handle));
            inner.push(handle);
        }
    }
    io.drain_into(&inner, &mut bypass, membus)?;

    io.connect(system.port("system_port"), membus.port("cpu_side_ports"))?;
    let dram = io.create(
        profile.dram.component(),
        vec![Assignment::new("range", memory_range)],
    )?;
    let mem_ctrl = io.create("MemCtrl", vec![Assignment::new("dram", dram)])?;
    io.connect(mem_ctrl.port("port"), membus.port("mem_side_ports"))?;

    let workload = match config.workload.as_deref() {
        Some(cmd) if !cmd.is_empty() => {
            let argv = cmd.iter().map(|arg| ParamValue::Str(arg.clone())).collect();
            let process = io.create(
                "Process",
                vec![Assignment::new("cmd", ParamValue::List(argv))],
            )?;
            io.set("system.cpu.workload", process)?;
            Some(process)
        }
        _ => None,
    };
    io.set("root.full_system", config.full_system)?;

    debug!(caches = caches.len(), buses = buses.len(), "profile applied");
    Ok(AppliedSystem {
        system,
        membus,
        branch_predictor,
        fu_pool,
        cpu,
        caches,
        buses,
        dram,
        mem_ctrl,
        workload,
    })
}

/// CPU construction parameters for the validated core.
fn core_params(
    core: &CoreModel<'_>,
    branch_predictor: ComponentHandle,
    fu_pool: ComponentHandle,
) -> Vec<Assignment> {
    let mut params = Vec::new();
    match core {
        CoreModel::InOrder { stage_buffers, .. } => {
            for (latch, depth) in STAGE_LATCHES.iter().zip(stage_buffers) {
                params.push(Assignment::new(format!("{latch}BufferSize"), *depth));
            }
            params.push(Assignment::new("branchPred", branch_predictor));
            params.push(Assignment::new("executeFuncUnits", fu_pool));
        }
        CoreModel::OutOfOrder {
            widths,
            windows,
            regs,
            frontend,
        } => {
            params.extend([
                Assignment::new("fetchWidth", widths.fetch),
                Assignment::new("decodeWidth", widths.decode),
                Assignment::new("renameWidth", widths.rename),
                Assignment::new("dispatchWidth", widths.dispatch),
                Assignment::new("issueWidth", widths.issue),
                Assignment::new("wbWidth", widths.writeback),
                Assignment::new("commitWidth", widths.commit),
            ]);
            if let Some(execute) = widths.execute {
                params.push(Assignment::new("executeWidth", execute));
            }
            if let Some(frontend) = frontend {
                params.push(Assignment::new("fetchBufferSize", frontend.fetch_buffer_bytes));
                params.push(Assignment::new("fetchQueueSize", frontend.fetch_queue_entries));
            }
            params.extend([
                Assignment::new("numROBEntries", windows.reorder_buffer_entries),
                Assignment::new("numIQEntries", windows.issue_queue_entries),
                Assignment::new("LQEntries", windows.load_queue_entries),
                Assignment::new("SQEntries", windows.store_queue_entries),
                Assignment::new("numPhysIntRegs", regs.integer),
                Assignment::new("numPhysFloatRegs", regs.floating_point),
            ]);
            if let Some(vector) = regs.vector {
                params.push(Assignment::new("numPhysVecRegs", vector));
            }
            params.push(Assignment::new("branchPred", branch_predictor));
            params.push(Assignment::new("fuPool", fu_pool));
        }
    }
    params
}
