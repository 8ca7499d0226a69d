//! Training result types

use crate::train::callback::EpochStats;
use serde::Serialize;

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainResult {
    /// Epochs that ran to their end-of-epoch hooks
    pub epochs_run: usize,
    /// Last epoch entered
    pub final_epoch: usize,
    /// Steps taken over the whole run
    pub global_step: u64,
    /// Loss of the last step
    pub final_loss: f32,
    /// Whether a callback stopped training
    pub stopped_early: bool,
    /// Total training time in seconds
    pub elapsed_secs: f64,
    /// Statistics closed at each epoch end
    pub stats: Vec<EpochStats>,
}
