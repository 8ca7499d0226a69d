//! Variable initialization strategies

use crate::error::{Error, Result as ConfigResult};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

type Result<T> = std::result::Result<T, Error>;

/// Named variable values held by a training session.
pub type VariableStore = BTreeMap<String, Vec<f32>>;

/// How to initialize the variables of a session before training starts.
pub trait SessionInit: Send + fmt::Debug {
    /// Populate or overwrite variables in `vars`.
    fn initialize(&self, vars: &mut VariableStore) -> Result<()>;

    /// Name used in logs
    fn name(&self) -> &'static str;
}

/// Start fresh: leave whatever the session already holds untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JustCurrentSession;

impl SessionInit for JustCurrentSession {
    fn initialize(&self, _vars: &mut VariableStore) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "JustCurrentSession"
    }
}

/// Restore variables from an in-memory map.
///
/// Variables present in the map but not in the session are added; variables
/// only in the session are left as they are.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DictRestore {
    values: VariableStore,
}

impl DictRestore {
    /// Restore from `values`.
    pub fn new(values: VariableStore) -> Self {
        Self { values }
    }
}

impl SessionInit for DictRestore {
    fn initialize(&self, vars: &mut VariableStore) -> Result<()> {
        let restored = self.values.len();
        vars.extend(self.values.iter().map(|(k, v)| (k.clone(), v.clone())));
        tracing::info!(init = self.name(), restored, "restored variables");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "DictRestore"
    }
}

/// Restore variables from a JSON checkpoint mapping names to value arrays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckpointRestore {
    path: PathBuf,
}

impl CheckpointRestore {
    /// Restore from the checkpoint at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Checkpoint location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `vars` as a checkpoint readable by this initializer.
    pub fn save(path: impl AsRef<Path>, vars: &VariableStore) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(vars)?;
        fs::write(path, json)
            .map_err(|e| Error::io(format!("writing checkpoint {}", path.display()), e))
    }
}

impl SessionInit for CheckpointRestore {
    fn initialize(&self, vars: &mut VariableStore) -> Result<()> {
        let raw = fs::read_to_string(&self.path).map_err(|e| Error::SessionInit {
            init: self.name(),
            message: format!("cannot read {}: {e}", self.path.display()),
        })?;
        let values: VariableStore = serde_json::from_str(&raw).map_err(|e| Error::SessionInit {
            init: self.name(),
            message: format!("{} is not a valid checkpoint: {e}", self.path.display()),
        })?;
        DictRestore::new(values).initialize(vars)
    }

    fn name(&self) -> &'static str {
        "CheckpointRestore"
    }
}

/// Check that a checkpoint path exists before a run is configured around it.
pub(crate) fn check_checkpoint_exists(path: &Path) -> ConfigResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(crate::error::ConfigError::invalid(
            "session_init.checkpoint",
            format!("checkpoint not found: {}", path.display()),
            "Point `checkpoint` at an existing file, or drop `session_init` to start fresh",
        ))
    }
}
