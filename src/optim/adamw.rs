//! AdamW handle (Adam with decoupled weight decay)

use super::{Adam, Optimizer};

/// AdamW optimizer
#[derive(Clone, Debug, PartialEq)]
pub struct AdamW {
    adam: Adam,
    weight_decay: f32,
}

impl AdamW {
    /// Create a new AdamW optimizer
    pub fn new(lr: f32, beta1: f32, beta2: f32, epsilon: f32, weight_decay: f32) -> Self {
        Self { adam: Adam::new(lr, beta1, beta2, epsilon), weight_decay }
    }

    /// Create AdamW with default hyperparameters
    pub fn default_params(lr: f32) -> Self {
        Self::new(lr, 0.9, 0.999, 1e-8, 0.01)
    }

    /// Decoupled weight decay coefficient
    pub fn weight_decay(&self) -> f32 {
        self.weight_decay
    }

    /// First and second moment decay rates
    pub fn betas(&self) -> (f32, f32) {
        self.adam.betas()
    }
}

impl Optimizer for AdamW {
    fn name(&self) -> &'static str {
        "adamw"
    }

    fn lr(&self) -> f32 {
        self.adam.lr()
    }

    fn set_lr(&mut self, lr: f32) {
        self.adam.set_lr(lr);
    }
}
