//! Pull-based dataflows

use super::Datapoint;
use crate::error::{ConfigError, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A bulk, possibly sized sequence of training examples.
///
/// `size()` returns `None` when the number of datapoints is not known up
/// front; a configuration built on such a dataflow must set
/// `steps_per_epoch` explicitly.
pub trait DataFlow: Send {
    /// Number of datapoints produced per pass, if defined.
    fn size(&self) -> Option<usize> {
        None
    }

    /// Produce the next datapoint, or `None` at the end of a pass.
    fn next_datapoint(&mut self) -> Option<Datapoint>;

    /// Rewind to the start of a new pass.
    fn reset_state(&mut self) {}

    /// Name used in logs
    fn name(&self) -> &'static str {
        "DataFlow"
    }
}

/// Dataflow over an in-memory list of datapoints.
#[derive(Clone, Debug, Default)]
pub struct DataFromList {
    items: Vec<Datapoint>,
    cursor: usize,
}

impl DataFromList {
    /// Create a dataflow yielding `items` in order.
    pub fn new(items: Vec<Datapoint>) -> Self {
        Self { items, cursor: 0 }
    }
}

impl DataFlow for DataFromList {
    fn size(&self) -> Option<usize> {
        Some(self.items.len())
    }

    fn next_datapoint(&mut self) -> Option<Datapoint> {
        let dp = self.items.get(self.cursor).cloned();
        if dp.is_some() {
            self.cursor += 1;
        }
        dp
    }

    fn reset_state(&mut self) {
        self.cursor = 0;
    }

    fn name(&self) -> &'static str {
        "DataFromList"
    }
}

/// Dataflow driven by a closure. Its size is undefined unless given.
pub struct DataFromGenerator {
    generator: Box<dyn FnMut() -> Option<Datapoint> + Send>,
    size: Option<usize>,
}

impl DataFromGenerator {
    /// Wrap a generator closure; the size is left undefined.
    pub fn new<F>(generator: F) -> Self
    where
        F: FnMut() -> Option<Datapoint> + Send + 'static,
    {
        Self { generator: Box::new(generator), size: None }
    }

    /// Declare how many datapoints one pass yields.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }
}

impl fmt::Debug for DataFromGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataFromGenerator").field("size", &self.size).finish_non_exhaustive()
    }
}

impl DataFlow for DataFromGenerator {
    fn size(&self) -> Option<usize> {
        self.size
    }

    fn next_datapoint(&mut self) -> Option<Datapoint> {
        (self.generator)()
    }

    fn name(&self) -> &'static str {
        "DataFromGenerator"
    }
}

/// Dataflow loaded from a JSON-lines file.
///
/// Each non-empty line holds one datapoint as a JSON array of numeric arrays,
/// e.g. `[[0.1, 0.2], [1.0]]`.
#[derive(Clone, Debug)]
pub struct JsonLinesDataFlow {
    path: PathBuf,
    inner: DataFromList,
}

impl JsonLinesDataFlow {
    /// Read and parse every datapoint in `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| ConfigError::io(format!("reading dataflow {}", path.display()), e))?;

        let mut items = Vec::new();
        for (lineno, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let dp: Datapoint = serde_json::from_str(line).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: format!("line {}: {e}", lineno + 1),
            })?;
            items.push(dp);
        }

        Ok(Self { path: path.to_path_buf(), inner: DataFromList::new(items) })
    }

    /// File the datapoints were read from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataFlow for JsonLinesDataFlow {
    fn size(&self) -> Option<usize> {
        self.inner.size()
    }

    fn next_datapoint(&mut self) -> Option<Datapoint> {
        self.inner.next_datapoint()
    }

    fn reset_state(&mut self) {
        self.inner.reset_state();
    }

    fn name(&self) -> &'static str {
        "JsonLinesDataFlow"
    }
}
