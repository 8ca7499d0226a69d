//! Progress callback for logging training progress

use super::traits::{Callback, CallbackAction, CallbackContext};

/// Progress callback for logging training progress
#[derive(Clone, Debug)]
pub struct ProgressCallback {
    /// Log every N steps
    log_interval: usize,
}

impl ProgressCallback {
    /// Create progress callback; an interval of 0 is treated as 1
    pub fn new(log_interval: usize) -> Self {
        Self { log_interval: log_interval.max(1) }
    }

    fn should_log(&self, step: usize) -> bool {
        (step + 1) % self.log_interval == 0
    }
}

impl Default for ProgressCallback {
    fn default() -> Self {
        Self { log_interval: 10 }
    }
}

impl Callback for ProgressCallback {
    fn on_epoch_begin(&mut self, ctx: &mut CallbackContext) -> CallbackAction {
        tracing::info!(
            epoch = ctx.epoch,
            max_epoch = ctx.max_epoch,
            lr = ctx.lr,
            "Epoch {}/{} starting",
            ctx.epoch,
            ctx.max_epoch
        );
        CallbackAction::Continue
    }

    fn on_epoch_end(&mut self, ctx: &mut CallbackContext) -> CallbackAction {
        tracing::info!(
            epoch = ctx.epoch,
            global_step = ctx.global_step,
            elapsed_secs = ctx.elapsed_secs,
            "Epoch {} finished ({:.1}s)",
            ctx.epoch,
            ctx.elapsed_secs
        );
        CallbackAction::Continue
    }

    fn on_step_end(&mut self, ctx: &mut CallbackContext) -> CallbackAction {
        if self.should_log(ctx.step) {
            tracing::info!(
                epoch = ctx.epoch,
                step = ctx.step + 1,
                steps_per_epoch = ctx.steps_per_epoch,
                loss = ctx.loss,
                "  Step {}/{}: loss: {:.4}",
                ctx.step + 1,
                ctx.steps_per_epoch,
                ctx.loss
            );
        }
        CallbackAction::Continue
    }

    fn name(&self) -> &'static str {
        "ProgressCallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_callback() {
        let mut progress = ProgressCallback::new(5);
        let mut ctx = CallbackContext {
            epoch: 1,
            max_epoch: 10,
            step: 4,
            steps_per_epoch: 100,
            loss: 0.5,
            lr: 0.001,
            ..Default::default()
        };

        assert_eq!(progress.on_epoch_begin(&mut ctx), CallbackAction::Continue);
        assert_eq!(progress.on_step_end(&mut ctx), CallbackAction::Continue);
        assert_eq!(progress.on_epoch_end(&mut ctx), CallbackAction::Continue);
    }

    #[test]
    fn test_progress_callback_default() {
        let pc = ProgressCallback::default();
        assert_eq!(pc.log_interval, 10);
        assert_eq!(pc.name(), "ProgressCallback");
    }

    #[test]
    fn test_log_interval_boundaries() {
        let pc = ProgressCallback::new(5);
        assert!(!pc.should_log(0));
        assert!(pc.should_log(4));
        assert!(pc.should_log(9));

        let every = ProgressCallback::new(0);
        assert!(every.should_log(0));
    }
}
