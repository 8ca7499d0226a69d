//! Build optimizer handles from declarative configuration

use super::{Adam, AdamW, Optimizer, Sgd};
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Optimizer parameter field names
const PARAM_MOMENTUM: &str = "momentum";
const PARAM_BETA1: &str = "beta1";
const PARAM_BETA2: &str = "beta2";
const PARAM_EPS: &str = "eps";
const PARAM_WEIGHT_DECAY: &str = "weight_decay";

const SUPPORTED: &str = "sgd, adam, adamw";

/// Optimizer specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimSpec {
    /// Optimizer name: "adam" | "adamw" | "sgd"
    pub name: String,

    /// Learning rate
    pub lr: f32,

    /// Optimizer-specific parameters (beta1, beta2, momentum, etc.)
    #[serde(flatten)]
    pub params: HashMap<String, f64>,
}

impl OptimSpec {
    /// Spec with no extra parameters.
    pub fn new(name: impl Into<String>, lr: f32) -> Self {
        Self { name: name.into(), lr, params: HashMap::new() }
    }

    /// Set an optimizer-specific parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: f64) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    fn param(&self, key: &str, default: f32) -> f32 {
        self.params.get(key).map_or(default, |v| *v as f32)
    }

    fn check_params(&self, allowed: &[&str]) -> Result<()> {
        let mut unknown: Vec<String> = self
            .params
            .keys()
            .filter(|k| !allowed.contains(&k.as_str()))
            .map(|k| format!("optimizer.{k}"))
            .collect();
        if unknown.is_empty() {
            return Ok(());
        }
        unknown.sort();
        Err(ConfigError::UnknownFields { names: unknown })
    }
}

/// Build an optimizer handle, rejecting unknown names, parameters the named
/// optimizer does not take, and learning rates outside `(0, 1]`.
pub fn build_optimizer(spec: &OptimSpec) -> Result<Box<dyn Optimizer>> {
    if !(spec.lr > 0.0 && spec.lr <= 1.0) {
        return Err(ConfigError::invalid(
            "optimizer.lr",
            format!("{} (must be > 0.0 and <= 1.0)", spec.lr),
            "Use a learning rate such as 0.001",
        ));
    }

    match spec.name.to_lowercase().as_str() {
        "sgd" => {
            spec.check_params(&[PARAM_MOMENTUM])?;
            Ok(Box::new(Sgd::new(spec.lr, spec.param(PARAM_MOMENTUM, 0.0))))
        }
        "adam" => {
            spec.check_params(&[PARAM_BETA1, PARAM_BETA2, PARAM_EPS])?;
            Ok(Box::new(Adam::new(
                spec.lr,
                spec.param(PARAM_BETA1, 0.9),
                spec.param(PARAM_BETA2, 0.999),
                spec.param(PARAM_EPS, 1e-8),
            )))
        }
        "adamw" => {
            spec.check_params(&[PARAM_BETA1, PARAM_BETA2, PARAM_EPS, PARAM_WEIGHT_DECAY])?;
            Ok(Box::new(AdamW::new(
                spec.lr,
                spec.param(PARAM_BETA1, 0.9),
                spec.param(PARAM_BETA2, 0.999),
                spec.param(PARAM_EPS, 1e-8),
                spec.param(PARAM_WEIGHT_DECAY, 0.01),
            )))
        }
        name => Err(ConfigError::invalid(
            "optimizer.name",
            format!("unknown optimizer '{name}'"),
            format!("Supported: {SUPPORTED}"),
        )),
    }
}
