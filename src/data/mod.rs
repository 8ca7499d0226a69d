//! Data sources consumed by the training loop
//!
//! Two shapes of data source are supported, and a configuration holds exactly
//! one of them:
//! - [`DataFlow`] - a pull-based, possibly sized stream of datapoints
//! - [`InputData`] - a pre-staged feeding mechanism, usually wrapping a dataflow

mod dataflow;
mod input;
mod source;

pub use dataflow::{DataFlow, DataFromGenerator, DataFromList, JsonLinesDataFlow};
pub use input::{FeedInput, InputData};
pub use source::DataSource;

/// One training example: a list of components, each a flat `f32` buffer.
pub type Datapoint = Vec<Vec<f32>>;
