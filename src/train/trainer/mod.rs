//! Trainer driving a run from a validated [`TrainConfig`](crate::config::TrainConfig)
//!
//! The trainer owns everything the configuration aggregated:
//! - initializes session variables through the configured `SessionInit`
//! - pulls datapoints from the input feed (a dataflow is wrapped in a `FeedInput`)
//! - runs epochs `starting_epoch..=max_epoch`, `steps_per_epoch` steps each
//! - dispatches every lifecycle hook to the callbacks in order
//!
//! # Example
//!
//! ```no_run
//! use trainconfig::config::TrainConfig;
//! use trainconfig::data::{DataFromList, Datapoint};
//! use trainconfig::model::{InputDesc, ModelDesc};
//! use trainconfig::optim::Sgd;
//! use trainconfig::train::SimpleTrainer;
//!
//! struct Sum;
//!
//! impl ModelDesc for Sum {
//!     fn name(&self) -> &str { "sum" }
//!     fn inputs(&self) -> Vec<InputDesc> { vec![InputDesc::new("x", vec![None])] }
//!     fn loss(&self, dp: &Datapoint) -> f32 { dp.iter().flatten().sum() }
//! }
//!
//! let config = TrainConfig::builder()
//!     .dataflow(DataFromList::new(vec![vec![vec![0.5]]; 8]))
//!     .model(Sum)
//!     .optimizer(Sgd::new(0.1, 0.9))
//!     .max_epoch(3)
//!     .build()?;
//!
//! let result = SimpleTrainer::new(config)?.train()?;
//! println!("{} epochs, {} steps", result.epochs_run, result.global_step);
//! # Ok::<(), trainconfig::Error>(())
//! ```

mod core;
mod result;
mod train_loop;

pub use core::SimpleTrainer;
pub use result::TrainResult;
