//! Callback system for training events
//!
//! Provides extensible hooks for training loop events:
//! - `on_train_begin` / `on_train_end`
//! - `on_epoch_begin` / `on_epoch_end`
//! - `on_step_begin` / `on_step_end`
//!
//! A configuration's callback list is always
//! `[StepCounter] + user callbacks + extras`, where the extras default to
//! `[MovingAverageSummary, ProgressCallback, StatPrinter]`.
//!
//! # Example
//!
//! ```rust
//! use trainconfig::train::callback::{Callback, CallbackAction, CallbackContext};
//!
//! struct PrintCallback;
//!
//! impl Callback for PrintCallback {
//!     fn on_epoch_end(&mut self, ctx: &mut CallbackContext) -> CallbackAction {
//!         println!("Epoch {} finished at step {}", ctx.epoch, ctx.global_step);
//!         CallbackAction::Continue
//!     }
//! }
//! ```

mod group;
mod moving_average;
mod progress;
mod stat_printer;
mod stats;
mod step_counter;
mod traits;

pub use group::Callbacks;
pub use moving_average::{MovingAverageSummary, LOSS_EMA_STAT};
pub use progress::ProgressCallback;
pub use stat_printer::{StatPrinter, STAT_FILE};
pub use stats::{EpochStats, StatHolder};
pub use step_counter::StepCounter;
pub use traits::{Callback, CallbackAction, CallbackContext};

/// The extras appended after user callbacks when none are supplied.
pub fn default_extra_callbacks() -> Vec<Box<dyn Callback>> {
    vec![
        Box::new(MovingAverageSummary::default()),
        Box::new(ProgressCallback::default()),
        Box::new(StatPrinter::new()),
    ]
}
