//! Prepared input feeds

use super::{DataFlow, Datapoint};
use std::fmt;

/// A pre-staged data-feeding mechanism used instead of pulling from a
/// dataflow directly.
pub trait InputData: Send {
    /// Number of datapoints per epoch, if defined.
    fn size(&self) -> Option<usize> {
        None
    }

    /// Next datapoint to feed. Feeds are expected to cycle, so `None` means
    /// the underlying source cannot produce anything at all.
    fn next_datapoint(&mut self) -> Option<Datapoint>;

    /// Restart the feed.
    fn reset_state(&mut self) {}

    /// Name used in logs
    fn name(&self) -> &'static str {
        "InputData"
    }
}

/// Feeds datapoints from a dataflow, restarting it whenever a pass ends.
pub struct FeedInput {
    dataflow: Box<dyn DataFlow>,
}

impl FeedInput {
    /// Wrap a dataflow.
    pub fn new<D: DataFlow + 'static>(dataflow: D) -> Self {
        Self { dataflow: Box::new(dataflow) }
    }

    /// Wrap an already boxed dataflow.
    pub fn from_boxed(dataflow: Box<dyn DataFlow>) -> Self {
        Self { dataflow }
    }
}

impl fmt::Debug for FeedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedInput")
            .field("dataflow", &self.dataflow.name())
            .field("size", &self.dataflow.size())
            .finish()
    }
}

impl InputData for FeedInput {
    fn size(&self) -> Option<usize> {
        self.dataflow.size()
    }

    fn next_datapoint(&mut self) -> Option<Datapoint> {
        if let Some(dp) = self.dataflow.next_datapoint() {
            return Some(dp);
        }
        self.dataflow.reset_state();
        self.dataflow.next_datapoint()
    }

    fn reset_state(&mut self) {
        self.dataflow.reset_state();
    }

    fn name(&self) -> &'static str {
        "FeedInput"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataFromGenerator, DataFromList};

    #[test]
    fn test_feed_input_delegates_size() {
        let feed = FeedInput::new(DataFromList::new(vec![vec![vec![1.0]]; 3]));
        assert_eq!(feed.size(), Some(3));

        let unsized_feed = FeedInput::new(DataFromGenerator::new(|| None));
        assert_eq!(unsized_feed.size(), None);
    }

    #[test]
    fn test_feed_input_cycles_dataflow() {
        let mut feed = FeedInput::new(DataFromList::new(vec![vec![vec![1.0]], vec![vec![2.0]]]));
        let seen: Vec<_> = (0..5).filter_map(|_| feed.next_datapoint()).collect();
        assert_eq!(
            seen,
            vec![vec![vec![1.0]], vec![vec![2.0]], vec![vec![1.0]], vec![vec![2.0]], vec![vec![1.0]]]
        );
    }

    #[test]
    fn test_feed_input_empty_dataflow_yields_none() {
        let mut feed = FeedInput::new(DataFromList::new(Vec::new()));
        assert_eq!(feed.next_datapoint(), None);
    }
}
