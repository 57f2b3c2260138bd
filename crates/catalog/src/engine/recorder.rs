//! Recording engine.
//!
//! `RecordingEngine` implements [`Engine`] without simulating anything. It keeps the
//! operations in issue order so they can be printed as a plan, and it performs the one
//! structural check a real engine performs at instantiation: every component must have its
//! required ports connected.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::common::error::{EngineError, ProfileError};
use crate::engine::{Assignment, ComponentHandle, Engine, ParamValue, Port, RunOutcome};

/// One operation issued to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum EngineOp {
    /// `create_component`.
    Create {
        /// Handle returned for the new object.
        handle: ComponentHandle,
        /// Component kind.
        kind: String,
        /// Construction parameters.
        params: Vec<Assignment>,
    },
    /// `connect`.
    Connect {
        /// First port.
        a: Port,
        /// Second port.
        b: Port,
    },
    /// `set_global_param`.
    SetGlobal {
        /// Dotted parameter path.
        path: String,
        /// Assigned value.
        value: ParamValue,
    },
}

impl fmt::Display for EngineOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create {
                handle,
                kind,
                params,
            } => {
                write!(f, "{handle} = {kind}(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                f.write_str(")")
            }
            Self::Connect { a, b } => write!(f, "connect {a} <-> {b}"),
            Self::SetGlobal { path, value } => write!(f, "{path} = {value}"),
        }
    }
}

/// Ports the engine refuses to leave dangling, per component kind.
fn required_ports(kind: &str) -> &'static [&'static str] {
    match kind {
        "System" => &["system_port"],
        "MinorCPU" | "O3CPU" => &["icache_port", "dcache_port"],
        "SystemXBar" | "L2XBar" => &["cpu_side_ports", "mem_side_ports"],
        "MemCtrl" => &["port"],
        k if k.ends_with("Cache") => &["cpu_side", "mem_side"],
        _ => &[],
    }
}

/// Engine that records operations instead of building a simulator.
///
/// # Examples
///
/// ```
/// use uarch_catalog::{ProfileCatalog, RecordingEngine};
/// use uarch_catalog::engine::Engine;
///
/// let catalog = ProfileCatalog::builtin();
/// let rocket = catalog.get_profile("Rocket").unwrap();
/// let mut engine = RecordingEngine::new();
/// catalog.apply(rocket, &mut engine).unwrap();
/// assert!(engine.run().is_ok());
/// ```
#[derive(Debug, Default)]
pub struct RecordingEngine {
    ops: Vec<EngineOp>,
    kinds: Vec<String>,
    connected: HashSet<(ComponentHandle, &'static str)>,
}

impl RecordingEngine {
    /// Creates an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations recorded so far, in issue order.
    pub fn ops(&self) -> &[EngineOp] {
        &self.ops
    }

    /// Kind of a component created by this engine.
    pub fn kind_of(&self, handle: ComponentHandle) -> Option<&str> {
        self.kinds.get(handle.0 as usize).map(String::as_str)
    }

    /// Returns `true` if `port` has been connected to anything.
    pub fn is_connected(&self, port: Port) -> bool {
        self.connected.contains(&(port.component, port.name))
    }

    /// Renders the recorded plan, one operation per line.
    pub fn plan(&self) -> String {
        self.ops.iter().map(|op| format!("{op}\n")).collect()
    }

    /// Renders the recorded plan as a JSON array.
    pub fn plan_json(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(&self.ops)?)
    }

    fn check_known(&self, handle: ComponentHandle) -> Result<(), EngineError> {
        if (handle.0 as usize) < self.kinds.len() {
            Ok(())
        } else {
            Err(EngineError::UnknownComponent(handle))
        }
    }

    fn check_value(&self, value: &ParamValue) -> Result<(), EngineError> {
        value
            .components()
            .into_iter()
            .try_for_each(|handle| self.check_known(handle))
    }
}

impl Engine for RecordingEngine {
    fn create_component(
        &mut self,
        kind: &str,
        params: Vec<Assignment>,
    ) -> Result<ComponentHandle, EngineError> {
        for param in &params {
            self.check_value(&param.value)?;
        }
        let index = u32::try_from(self.kinds.len())
            .map_err(|_| EngineError::Rejected("component limit reached".to_string()))?;
        let handle = ComponentHandle(index);
        self.kinds.push(kind.to_string());
        self.ops.push(EngineOp::Create {
            handle,
            kind: kind.to_string(),
            params,
        });
        Ok(handle)
    }

    fn connect(&mut self, a: Port, b: Port) -> Result<(), EngineError> {
        self.check_known(a.component)?;
        self.check_known(b.component)?;
        let _ = self.connected.insert((a.component, a.name));
        let _ = self.connected.insert((b.component, b.name));
        self.ops.push(EngineOp::Connect { a, b });
        Ok(())
    }

    fn set_global_param(&mut self, path: &str, value: ParamValue) -> Result<(), EngineError> {
        self.check_value(&value)?;
        self.ops.push(EngineOp::SetGlobal {
            path: path.to_string(),
            value,
        });
        Ok(())
    }

    fn run(&mut self) -> Result<RunOutcome, EngineError> {
        for (index, kind) in self.kinds.iter().enumerate() {
            let handle = ComponentHandle(index as u32);
            for &port in required_ports(kind) {
                if !self.connected.contains(&(handle, port)) {
                    return Err(EngineError::UnconnectedPort {
                        component: format!("{kind}{handle}"),
                        port: port.to_string(),
                    });
                }
            }
        }
        debug!(components = self.kinds.len(), ops = self.ops.len(), "plan instantiated");
        Ok(RunOutcome {
            final_tick: 0,
            cause: "dry run, no simulator attached".to_string(),
        })
    }
}
