//! Adam handle

use super::Optimizer;

/// Adam optimizer
#[derive(Clone, Debug, PartialEq)]
pub struct Adam {
    lr: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
}

impl Adam {
    /// Create a new Adam optimizer
    pub fn new(lr: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self { lr, beta1, beta2, epsilon }
    }

    /// Create Adam with default hyperparameters
    pub fn default_params(lr: f32) -> Self {
        Self::new(lr, 0.9, 0.999, 1e-8)
    }

    /// First and second moment decay rates
    pub fn betas(&self) -> (f32, f32) {
        (self.beta1, self.beta2)
    }

    /// Numerical stability term
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }
}

impl Optimizer for Adam {
    fn name(&self) -> &'static str {
        "adam"
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn set_lr(&mut self, lr: f32) {
        self.lr = lr;
    }
}
