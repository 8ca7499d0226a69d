//! # trainconfig
//!
//! Validated configuration for a deep-learning training loop.
//!
//! A [`TrainConfig`] aggregates everything one run needs: a data source
//! (dataflow or prepared input feed), a model descriptor, an optimizer, the
//! ordered lifecycle callbacks, session options and initialization, and the
//! schedule (steps per epoch, epoch window, tower assignment). It is built
//! once through [`TrainConfigBuilder`] or loaded from YAML via [`TrainSpec`],
//! validated fail-fast, and then consumed by a trainer such as
//! [`SimpleTrainer`](train::SimpleTrainer).
//!
//! ## Modules
//!
//! - [`cli`] - the `trainconfig validate` command
//! - [`config`] - the configuration record, builder, YAML schema and legacy shims
//! - [`data`] - dataflows and input feeds
//! - [`model`] - model descriptors
//! - [`optim`] - optimizer handles
//! - [`session`] - session options and variable initialization
//! - [`train`] - callbacks and the trainer

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod optim;
pub mod session;
pub mod train;

pub use config::{Schedule, TrainConfig, TrainConfigBuilder, TrainSpec};
pub use error::{ConfigError, Error, Result};
