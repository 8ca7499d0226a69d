//! Core traits and types for the callback system
//!
//! This module provides the foundational types for training callbacks:
//! - `CallbackContext` - State passed to callbacks
//! - `CallbackAction` - Actions a callback can request
//! - `Callback` - The trait all callbacks implement

use super::stats::StatHolder;

/// Context passed to callbacks with current training state
///
/// Callbacks receive it mutably: the step counter advances `global_step`,
/// and any callback may publish epoch statistics into `stats` for the stat
/// printer to report.
#[derive(Clone, Debug)]
pub struct CallbackContext {
    /// Current epoch (1-indexed, counting from the configured starting epoch)
    pub epoch: usize,
    /// Last epoch to run
    pub max_epoch: usize,
    /// Current step within epoch (0-indexed)
    pub step: usize,
    /// Total steps in epoch
    pub steps_per_epoch: usize,
    /// Global step count
    pub global_step: u64,
    /// Loss of the current step
    pub loss: f32,
    /// Current learning rate
    pub lr: f32,
    /// Training duration in seconds
    pub elapsed_secs: f64,
    /// Statistics gathered during the current epoch
    pub stats: StatHolder,
}

impl Default for CallbackContext {
    fn default() -> Self {
        Self {
            epoch: 1,
            max_epoch: 1,
            step: 0,
            steps_per_epoch: 0,
            global_step: 0,
            loss: 0.0,
            lr: 0.0,
            elapsed_secs: 0.0,
            stats: StatHolder::default(),
        }
    }
}

/// Action to take after a callback
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackAction {
    /// Continue training normally
    Continue,
    /// Stop training
    Stop,
    /// Skip rest of current epoch
    SkipEpoch,
}

/// Lifecycle hook invoked by the training loop
///
/// All methods have default no-op implementations, so you only need to
/// implement the events you care about.
pub trait Callback: Send {
    /// Called before training starts
    fn on_train_begin(&mut self, _ctx: &mut CallbackContext) -> CallbackAction {
        CallbackAction::Continue
    }

    /// Called after training ends
    fn on_train_end(&mut self, _ctx: &mut CallbackContext) {}

    /// Called before each epoch
    fn on_epoch_begin(&mut self, _ctx: &mut CallbackContext) -> CallbackAction {
        CallbackAction::Continue
    }

    /// Called after each epoch
    fn on_epoch_end(&mut self, _ctx: &mut CallbackContext) -> CallbackAction {
        CallbackAction::Continue
    }

    /// Called before each training step
    fn on_step_begin(&mut self, _ctx: &mut CallbackContext) -> CallbackAction {
        CallbackAction::Continue
    }

    /// Called after each training step
    fn on_step_end(&mut self, _ctx: &mut CallbackContext) -> CallbackAction {
        CallbackAction::Continue
    }

    /// Get callback name for logging
    fn name(&self) -> &'static str {
        "Callback"
    }
}
