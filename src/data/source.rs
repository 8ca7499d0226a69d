//! The single data source held by a training configuration

use super::{DataFlow, FeedInput, InputData};
use std::fmt;

/// Exactly one of a bulk dataflow or a prepared input feed.
pub enum DataSource {
    /// Pull-based dataflow
    DataFlow(Box<dyn DataFlow>),
    /// Prepared input feed
    Input(Box<dyn InputData>),
}

impl DataSource {
    /// Wrap a dataflow.
    pub fn dataflow<D: DataFlow + 'static>(dataflow: D) -> Self {
        Self::DataFlow(Box::new(dataflow))
    }

    /// Wrap an input feed.
    pub fn input<I: InputData + 'static>(input: I) -> Self {
        Self::Input(Box::new(input))
    }

    /// Declared size of the underlying source, if defined.
    pub fn size(&self) -> Option<usize> {
        match self {
            Self::DataFlow(df) => df.size(),
            Self::Input(input) => input.size(),
        }
    }

    /// Short description of which kind of source this is.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DataFlow(_) => "dataflow",
            Self::Input(_) => "data",
        }
    }

    /// Name of the concrete implementation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DataFlow(df) => df.name(),
            Self::Input(input) => input.name(),
        }
    }

    /// The dataflow, if this source is one.
    pub fn as_dataflow(&self) -> Option<&dyn DataFlow> {
        match self {
            Self::DataFlow(df) => Some(df.as_ref()),
            Self::Input(_) => None,
        }
    }

    /// The input feed, if this source is one.
    pub fn as_input(&self) -> Option<&dyn InputData> {
        match self {
            Self::DataFlow(_) => None,
            Self::Input(input) => Some(input.as_ref()),
        }
    }

    /// Turn the source into a feed the training loop can pull from
    /// indefinitely. Dataflows are wrapped in [`FeedInput`].
    pub fn into_input(self) -> Box<dyn InputData> {
        match self {
            Self::DataFlow(df) => Box::new(FeedInput::from_boxed(df)),
            Self::Input(input) => input,
        }
    }
}

impl fmt::Debug for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSource")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .field("size", &self.size())
            .finish()
    }
}
