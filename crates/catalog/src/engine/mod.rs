//! Simulation engine boundary.
//!
//! The catalog never simulates anything. It drives an external engine through the narrow
//! [`Engine`] capability:
//! 1. **Construction:** `create_component` instantiates an engine object with parameters.
//! 2. **Wiring:** `connect` joins two named ports.
//! 3. **Globals:** `set_global_param` assigns a dotted parameter path.
//! 4. **Execution:** `run` is left to the entry point once a profile has been applied.
//!
//! [`apply()`] is the only code that issues construction, wiring, and global operations.

use std::fmt;

use serde::Serialize;

use crate::common::error::EngineError;
use crate::common::units::{ByteSize, Frequency};
use crate::profile::CacheName;

/// Translation of a profile into engine operations.
pub mod apply;
/// In-process engine that records operations for dry runs and tests.
pub mod recorder;

pub use apply::apply;
pub use recorder::{EngineOp, RecordingEngine};

/// Opaque reference to an engine object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ComponentHandle(pub u32);

impl ComponentHandle {
    /// Names one of this component's ports.
    pub const fn port(self, name: &'static str) -> Port {
        Port {
            component: self,
            name,
        }
    }
}

impl fmt::Display for ComponentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named port on an engine object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Port {
    /// Owning component.
    pub component: ComponentHandle,
    /// Port name (e.g. `cpu_side`, `mem_side_ports`).
    pub name: &'static str,
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.name)
    }
}

/// A parameter value understood by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamValue {
    /// Unsigned integer.
    Int(u64),
    /// Boolean flag.
    Bool(bool),
    /// String (mode names, command arguments).
    Str(String),
    /// Byte quantity.
    Size(ByteSize),
    /// Clock frequency.
    Frequency(Frequency),
    /// Reference to another engine object.
    Component(ComponentHandle),
    /// Ordered list of values.
    List(Vec<Self>),
}

impl ParamValue {
    /// Visits every component handle referenced by this value.
    pub fn components(&self) -> Vec<ComponentHandle> {
        match self {
            Self::Component(handle) => vec![*handle],
            Self::List(items) => items.iter().flat_map(Self::components).collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v:?}"),
            Self::Size(v) => write!(f, "{v}"),
            Self::Frequency(v) => write!(f, "{v}"),
            Self::Component(v) => write!(f, "{v}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        Self::Int(u64::from(v))
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<ByteSize> for ParamValue {
    fn from(v: ByteSize) -> Self {
        Self::Size(v)
    }
}

impl From<Frequency> for ParamValue {
    fn from(v: Frequency) -> Self {
        Self::Frequency(v)
    }
}

impl From<ComponentHandle> for ParamValue {
    fn from(v: ComponentHandle) -> Self {
        Self::Component(v)
    }
}

/// One `(parameter-path, value)` assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// Parameter name or dotted path.
    pub path: String,
    /// Assigned value.
    pub value: ParamValue,
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(path: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.path, self.value)
    }
}

/// How a simulation run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    /// Simulated time at exit, in engine ticks.
    pub final_tick: u64,
    /// Engine-reported exit cause.
    pub cause: String,
}

/// Capability interface of the external simulation engine.
///
/// Implementations own the simulated object graph; the catalog only sees handles.
pub trait Engine {
    /// Instantiates an engine object of `kind` with the given parameters.
    fn create_component(
        &mut self,
        kind: &str,
        params: Vec<Assignment>,
    ) -> Result<ComponentHandle, EngineError>;

    /// Connects two ports.
    fn connect(&mut self, a: Port, b: Port) -> Result<(), EngineError>;

    /// Assigns a global parameter by dotted path.
    fn set_global_param(&mut self, path: &str, value: ParamValue) -> Result<(), EngineError>;

    /// Instantiates the object graph and simulates until an exit event.
    fn run(&mut self) -> Result<RunOutcome, EngineError>;
}

/// Handles of everything [`apply()`] created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedSystem {
    /// System root.
    pub system: ComponentHandle,
    /// System crossbar in front of the memory controller.
    pub membus: ComponentHandle,
    /// Branch predictor.
    pub branch_predictor: ComponentHandle,
    /// Functional-unit pool.
    pub fu_pool: ComponentHandle,
    /// CPU core.
    pub cpu: ComponentHandle,
    /// Caches, innermost first.
    pub caches: Vec<(CacheName, ComponentHandle)>,
    /// Inter-level crossbars, innermost first.
    pub buses: Vec<ComponentHandle>,
    /// DRAM device.
    pub dram: ComponentHandle,
    /// Memory controller.
    pub mem_ctrl: ComponentHandle,
    /// Workload process, when one was configured.
    pub workload: Option<ComponentHandle>,
}

impl AppliedSystem {
    /// Handle of the named cache, if the profile has it.
    pub fn cache(&self, name: CacheName) -> Option<ComponentHandle> {
        self.caches
            .iter()
            .find_map(|&(n, handle)| (n == name).then_some(handle))
    }
}
