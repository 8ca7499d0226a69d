//! Session runtime configuration

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Options the training session is created with.
///
/// `SessionConfig::default()` is the process-wide default: soft placement
/// on, memory growth on, and 99% of each GPU's memory available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Fall back to another device when an op has no kernel for the chosen one
    #[serde(default = "default_true")]
    pub allow_soft_placement: bool,

    /// Log the device every op is placed on
    #[serde(default)]
    pub log_device_placement: bool,

    /// Fraction of each GPU's memory the process may claim
    #[serde(default = "default_memory_fraction")]
    pub gpu_memory_fraction: f32,

    /// Grow GPU allocations on demand instead of claiming them up front
    #[serde(default = "default_true")]
    pub allow_growth: bool,

    /// Threads used inside a single op, 0 lets the runtime decide
    #[serde(default)]
    pub intra_op_threads: usize,

    /// Threads used to run independent ops, 0 lets the runtime decide
    #[serde(default)]
    pub inter_op_threads: usize,
}

fn default_true() -> bool {
    true
}

fn default_memory_fraction() -> f32 {
    0.99
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            allow_soft_placement: true,
            log_device_placement: false,
            gpu_memory_fraction: default_memory_fraction(),
            allow_growth: true,
            intra_op_threads: 0,
            inter_op_threads: 0,
        }
    }
}

impl SessionConfig {
    /// Default configuration with a different GPU memory fraction.
    pub fn with_memory_fraction(fraction: f32) -> Self {
        Self { gpu_memory_fraction: fraction, ..Self::default() }
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.gpu_memory_fraction > 0.0 && self.gpu_memory_fraction <= 1.0) {
            return Err(ConfigError::invalid(
                "session_config.gpu_memory_fraction",
                format!("{} (must be in (0.0, 1.0])", self.gpu_memory_fraction),
                "Use a fraction such as 0.5 to share the GPU, or 0.99 for exclusive use",
            ));
        }
        Ok(())
    }
}
