//! YAML schema for declarative training configuration
//!
//! A spec file covers everything except the model, which is code:
//!
//! ```yaml
//! dataflow: { path: train.jsonl }
//! optimizer: { name: adam, lr: 0.001 }
//! steps_per_epoch: "100"
//! max_epoch: 50
//! nr_tower: 2
//! predict_tower: -1
//! ```

use super::builder::TrainConfigBuilder;
use super::legacy::{self, Deprecation};
use super::numeric::Numeric;
use super::schedule::{Schedule, ScheduleArgs};
use super::tower::PredictTower;
use crate::data::{DataSource, FeedInput, JsonLinesDataFlow};
use crate::error::{ConfigError, Result};
use crate::optim::{build_optimizer, OptimSpec};
use crate::session::{
    check_checkpoint_exists, CheckpointRestore, JustCurrentSession, SessionConfig, SessionInit,
};
use crate::train::callback::{Callback, MovingAverageSummary, ProgressCallback, StatPrinter};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level keys a spec file may contain.
pub const FIELDS: &[&str] = &[
    "dataflow",
    "data",
    "optimizer",
    "session_config",
    "session_init",
    "steps_per_epoch",
    "starting_epoch",
    "max_epoch",
    "nr_tower",
    "tower",
    "predict_tower",
    "log_interval",
    "log_dir",
];

/// Dataflow read from a JSON-lines file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataflowSpec {
    /// Path to the datapoints
    pub path: PathBuf,
}

/// Prepared input feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputSpec {
    /// Dataflow to feed, restarted at the end of each pass
    pub feed: DataflowSpec,
}

/// Variable initialization; empty keeps the session as created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionInitSpec {
    /// Restore from this JSON checkpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpoint: Option<PathBuf>,
}

/// Complete declarative training specification
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrainSpec {
    /// Dataflow source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataflow: Option<DataflowSpec>,

    /// Input feed source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<InputSpec>,

    /// Optimizer configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimizer: Option<OptimSpec>,

    /// Session runtime options
    #[serde(default)]
    pub session_config: SessionConfig,

    /// Variable initialization
    #[serde(default)]
    pub session_init: SessionInitSpec,

    /// Steps per epoch; int, float or numeric string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps_per_epoch: Option<Numeric>,

    /// First epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_epoch: Option<Numeric>,

    /// Last epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_epoch: Option<Numeric>,

    /// Tower count shorthand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nr_tower: Option<usize>,

    /// Explicit training towers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tower: Option<Vec<usize>>,

    /// Prediction towers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predict_tower: Option<PredictTower>,

    /// Progress log interval in steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_interval: Option<usize>,

    /// Directory the stat printer writes `stat.json` to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Legacy keys normalized while loading
    #[serde(skip)]
    pub deprecations: Vec<Deprecation>,
}

impl TrainSpec {
    /// Load a spec from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::io(format!("reading config file: {}", path.display()), e))?;
        Self::from_yaml(&content, path)
    }

    /// Parse a spec from YAML, applying the legacy key shims and rejecting
    /// unknown keys. `path` is only used in error messages.
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self> {
        let parse_err =
            |e: serde_yaml::Error| ConfigError::Parse { path: path.to_path_buf(), message: e.to_string() };

        let mut map = match serde_yaml::from_str::<Value>(content).map_err(parse_err)? {
            Value::Mapping(map) => map,
            Value::Null => Mapping::new(),
            other => {
                return Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    message: format!("expected a mapping at the top level, got {other:?}"),
                })
            }
        };

        let deprecations = legacy::normalize_mapping(&mut map);
        check_unknown_keys(&map)?;

        let mut spec: Self = serde_yaml::from_value(Value::Mapping(map)).map_err(parse_err)?;
        spec.deprecations = deprecations;
        Ok(spec)
    }

    /// Scheduling fields, with defaults for anything not set.
    pub fn schedule_args(&self) -> ScheduleArgs {
        let defaults = ScheduleArgs::default();
        ScheduleArgs {
            steps_per_epoch: self.steps_per_epoch.clone(),
            starting_epoch: self.starting_epoch.clone().unwrap_or(defaults.starting_epoch),
            max_epoch: self.max_epoch.clone().unwrap_or(defaults.max_epoch),
            nr_tower: self.nr_tower,
            tower: self.tower.clone(),
            predict_tower: self.predict_tower.clone().unwrap_or(defaults.predict_tower),
        }
    }

    /// Resolve the scheduling fields alone. Without a data source the steps
    /// per epoch must be given explicitly.
    pub fn schedule(&self) -> Result<Schedule> {
        self.schedule_args().resolve(None)
    }

    /// Open the configured data source.
    pub fn data_source(&self) -> Result<DataSource> {
        match (&self.dataflow, &self.data) {
            (Some(_), Some(_)) => Err(ConfigError::Conflict { first: "dataflow", second: "data" }),
            (Some(df), None) => Ok(DataSource::dataflow(JsonLinesDataFlow::open(&df.path)?)),
            (None, Some(input)) => {
                Ok(DataSource::input(FeedInput::new(JsonLinesDataFlow::open(&input.feed.path)?)))
            }
            (None, None) => Err(ConfigError::Missing {
                field: "dataflow",
                suggestion: "Add `dataflow: { path: ... }` or `data: { feed: { path: ... } }`",
            }),
        }
    }

    /// Validate everything the spec describes without building a model.
    pub fn validate(&self) -> Result<Schedule> {
        let source = self.data_source()?;
        if let Some(optimizer) = &self.optimizer {
            build_optimizer(optimizer)?;
        }
        self.session_config.validate()?;
        self.build_session_init()?;
        self.schedule_args().resolve(Some(&source))
    }

    fn build_session_init(&self) -> Result<Box<dyn SessionInit>> {
        match &self.session_init.checkpoint {
            None => Ok(Box::new(JustCurrentSession)),
            Some(path) => {
                check_checkpoint_exists(path)?;
                Ok(Box::new(CheckpointRestore::new(path)))
            }
        }
    }

    fn extra_callbacks(&self) -> Option<Vec<Box<dyn Callback>>> {
        if self.log_interval.is_none() && self.log_dir.is_none() {
            return None;
        }
        let printer = match &self.log_dir {
            Some(dir) => StatPrinter::with_output_dir(dir),
            None => StatPrinter::new(),
        };
        let progress = self.log_interval.map_or_else(ProgressCallback::default, ProgressCallback::new);
        Some(vec![
            Box::new(MovingAverageSummary::default()),
            Box::new(progress),
            Box::new(printer),
        ])
    }

    /// Turn the spec into a builder; attach the model and build.
    pub fn into_builder(self) -> Result<TrainConfigBuilder> {
        let mut builder = TrainConfigBuilder::new()
            .session_config(self.session_config.clone())
            .session_init_boxed(self.build_session_init()?)
            .schedule(self.schedule_args());

        builder = match self.data_source()? {
            DataSource::DataFlow(df) => builder.dataflow_boxed(df),
            DataSource::Input(input) => builder.data_boxed(input),
        };
        if let Some(optimizer) = &self.optimizer {
            builder = builder.optimizer_boxed(build_optimizer(optimizer)?);
        }
        if let Some(extra) = self.extra_callbacks() {
            builder = builder.extra_callbacks(extra);
        }
        Ok(builder.record_deprecations(self.deprecations))
    }
}

fn check_unknown_keys(map: &Mapping) -> Result<()> {
    let mut unknown: Vec<String> = map
        .keys()
        .map(|k| match k {
            Value::String(s) => s.clone(),
            other => serde_yaml::to_string(other).map_or_else(|_| format!("{other:?}"), |s| s.trim().to_string()),
        })
        .filter(|k| !FIELDS.contains(&k.as_str()))
        .collect();

    if unknown.is_empty() {
        return Ok(());
    }
    unknown.sort();
    Err(ConfigError::UnknownFields { names: unknown })
}
