//! Training loop driver and lifecycle callbacks
//!
//! - [`callback`] - hooks invoked at defined points of the loop, plus the
//!   stock callbacks every configuration carries
//! - [`SimpleTrainer`] - runs a validated configuration to completion

pub mod callback;
mod trainer;

pub use callback::{
    Callback, CallbackAction, CallbackContext, Callbacks, MovingAverageSummary, ProgressCallback,
    StatPrinter, StepCounter,
};
pub use trainer::{SimpleTrainer, TrainResult};
