//! Apply-time system configuration.
//!
//! A profile describes the CPU design; this module describes the system it is dropped into.
//! It provides:
//! 1. **Defaults:** The settings every shipped profile was tuned with (timing memory mode,
//!    syscall-emulation mode, no workload).
//! 2. **Structures:** [`SystemConfig`], deserialized from JSON with per-field defaults.
//! 3. **Enums:** The memory access mode of the simulated system.
//!
//! Configuration is supplied as JSON (`uarch --config system.json`) or use
//! `SystemConfig::default()`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::ProfileError;
use crate::common::units::ByteSize;

/// Default configuration constants.
mod defaults {
    /// Cycle-level timing accesses; the only mode in which cache and DRAM parameters matter.
    pub const MEM_MODE: super::MemMode = super::MemMode::Timing;

    /// Syscall-emulation mode: the workload runs as a user process without a kernel.
    pub const FULL_SYSTEM: bool = false;
}

/// Memory access mode of the simulated system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemMode {
    /// Timing accesses through the full cache and DRAM model.
    #[default]
    Timing,
    /// Atomic accesses with fixed latency estimates; used for fast-forwarding.
    Atomic,
}

impl MemMode {
    /// Value of the engine's `mem_mode` parameter.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timing => "timing",
            Self::Atomic => "atomic",
        }
    }
}

/// System-wide settings applied alongside a profile.
///
/// # Examples
///
/// ```
/// use uarch_catalog::config::{MemMode, SystemConfig};
///
/// let config = SystemConfig::from_json(r#"{ "workload": ["./bench", "-n", "10"] }"#).unwrap();
/// assert_eq!(config.mem_mode, MemMode::Timing);
/// assert!(!config.full_system);
/// assert_eq!(config.workload.as_deref().map(<[String]>::len), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemConfig {
    /// Memory access mode.
    #[serde(default = "SystemConfig::default_mem_mode")]
    pub mem_mode: MemMode,

    /// Full-system mode (boots a kernel) instead of syscall emulation.
    #[serde(default = "SystemConfig::default_full_system")]
    pub full_system: bool,

    /// Command line of the process to run on the core, program path first.
    #[serde(default)]
    pub workload: Option<Vec<String>>,

    /// Overrides the profile's memory range when set.
    #[serde(default)]
    pub memory_range: Option<ByteSize>,
}

impl SystemConfig {
    /// Returns the default memory access mode.
    const fn default_mem_mode() -> MemMode {
        defaults::MEM_MODE
    }

    /// Returns the default full-system flag.
    const fn default_full_system() -> bool {
        defaults::FULL_SYSTEM
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let text = fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            mem_mode: defaults::MEM_MODE,
            full_system: defaults::FULL_SYSTEM,
            workload: None,
            memory_range: None,
        }
    }
}
