//! Training configuration
//!
//! [`TrainConfig`] aggregates the data source, model, optimizer, callbacks,
//! session setup and schedule of one training run. It is built once through
//! [`TrainConfigBuilder`], either directly in code or from a YAML
//! [`TrainSpec`], and validated in full before it is handed out.

mod builder;
pub mod legacy;
mod numeric;
mod schedule;
mod schema;
mod tower;
mod train_config;

#[cfg(test)]
mod proptests;

pub use builder::TrainConfigBuilder;
pub use legacy::Deprecation;
pub use numeric::Numeric;
pub use schedule::{Schedule, ScheduleArgs, DEFAULT_MAX_EPOCH};
pub use schema::{DataflowSpec, InputSpec, SessionInitSpec, TrainSpec, FIELDS};
pub use tower::{Device, PredictTower, TowerArg, CPU_INDEX};
pub use train_config::TrainConfig;
