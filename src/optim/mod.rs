//! Optimizer handles
//!
//! The configuration does not run gradient updates itself; it holds an
//! optimizer handle that names the algorithm and carries its hyperparameters
//! for the trainer that does.

mod adam;
mod adamw;
mod optimizer;
mod sgd;
mod spec;

pub use adam::Adam;
pub use adamw::AdamW;
pub use optimizer::Optimizer;
pub use sgd::Sgd;
pub use spec::{build_optimizer, OptimSpec};
