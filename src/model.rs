//! Model descriptors
//!
//! A [`ModelDesc`] declares the inputs a model consumes and computes the
//! training loss for one datapoint. Graph construction and gradients belong
//! to the framework driving the model; the configuration only needs these
//! two capabilities.

use crate::data::Datapoint;
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Declared input of a model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDesc {
    /// Input name, unique within a model
    pub name: String,
    /// Shape, `None` for an unknown dimension (usually batch)
    pub shape: Vec<Option<usize>>,
}

impl InputDesc {
    /// Create an input descriptor.
    pub fn new(name: impl Into<String>, shape: Vec<Option<usize>>) -> Self {
        Self { name: name.into(), shape }
    }
}

/// Model descriptor capability: declare inputs and build the loss.
pub trait ModelDesc: Send {
    /// Model name used in logs
    fn name(&self) -> &str;

    /// Inputs the model expects, in datapoint component order.
    fn inputs(&self) -> Vec<InputDesc>;

    /// Training loss for a single datapoint.
    fn loss(&self, datapoint: &Datapoint) -> f32;
}

/// Check that a model declares at least one input and that input names are
/// unique.
pub(crate) fn validate_model(model: &dyn ModelDesc) -> Result<()> {
    let inputs = model.inputs();
    if inputs.is_empty() {
        return Err(ConfigError::invalid(
            "model",
            format!("model '{}' declares no inputs", model.name()),
            "Return at least one InputDesc from ModelDesc::inputs()",
        ));
    }

    let mut seen = HashSet::new();
    for input in &inputs {
        if !seen.insert(input.name.as_str()) {
            return Err(ConfigError::invalid(
                "model",
                format!("model '{}' declares input '{}' twice", model.name(), input.name),
                "Give every input a distinct name",
            ));
        }
    }
    Ok(())
}
