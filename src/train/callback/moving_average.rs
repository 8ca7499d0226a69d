//! Moving-average loss summary

use super::traits::{Callback, CallbackAction, CallbackContext};

/// Name of the stat published at each epoch end
pub const LOSS_EMA_STAT: &str = "loss_ema";

/// Tracks an exponential moving average of the step loss and publishes it
/// as the `loss_ema` stat at the end of each epoch.
#[derive(Clone, Debug)]
pub struct MovingAverageSummary {
    decay: f32,
    average: Option<f32>,
}

impl MovingAverageSummary {
    /// Create a summary with the given decay in `[0, 1)`
    pub fn new(decay: f32) -> Self {
        Self { decay: decay.clamp(0.0, 0.9999), average: None }
    }

    /// Current moving average, if any step has been seen
    pub fn average(&self) -> Option<f32> {
        self.average
    }
}

impl Default for MovingAverageSummary {
    fn default() -> Self {
        Self::new(0.95)
    }
}

impl Callback for MovingAverageSummary {
    fn on_step_end(&mut self, ctx: &mut CallbackContext) -> CallbackAction {
        if !ctx.loss.is_finite() {
            return CallbackAction::Continue;
        }
        self.average = Some(match self.average {
            Some(avg) => self.decay * avg + (1.0 - self.decay) * ctx.loss,
            None => ctx.loss,
        });
        CallbackAction::Continue
    }

    fn on_epoch_end(&mut self, ctx: &mut CallbackContext) -> CallbackAction {
        if let Some(avg) = self.average {
            ctx.stats.add_stat(LOSS_EMA_STAT, f64::from(avg));
        }
        CallbackAction::Continue
    }

    fn name(&self) -> &'static str {
        "MovingAverageSummary"
    }
}
