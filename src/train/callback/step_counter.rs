//! Global step counter

use super::traits::{Callback, CallbackAction, CallbackContext};

/// Advances the global step after every training step.
///
/// Always placed first in a configuration's callback list so that every
/// later callback sees the updated count.
#[derive(Clone, Copy, Debug, Default)]
pub struct StepCounter;

impl Callback for StepCounter {
    fn on_step_end(&mut self, ctx: &mut CallbackContext) -> CallbackAction {
        ctx.global_step += 1;
        CallbackAction::Continue
    }

    fn name(&self) -> &'static str {
        "StepCounter"
    }
}
