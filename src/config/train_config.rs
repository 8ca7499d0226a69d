//! The validated training configuration

use super::legacy::{self, Deprecation};
use super::schedule::Schedule;
use super::tower::{tower_range, Device, TowerArg};
use crate::data::{DataFlow, DataSource, InputData};
use crate::error::{ConfigError, Result};
use crate::model::ModelDesc;
use crate::optim::Optimizer;
use crate::session::{SessionConfig, SessionInit};
use crate::train::callback::Callbacks;
use std::fmt;

/// Everything a trainer needs to run: data, model, optimizer, callbacks,
/// session setup and schedule.
///
/// Built and validated by [`TrainConfigBuilder`](super::TrainConfigBuilder).
/// After construction only the tower assignment can change.
pub struct TrainConfig {
    pub(crate) data_source: DataSource,
    pub(crate) model: Box<dyn ModelDesc>,
    pub(crate) optimizer: Box<dyn Optimizer>,
    pub(crate) callbacks: Callbacks,
    pub(crate) session_config: SessionConfig,
    pub(crate) session_init: Box<dyn SessionInit>,
    pub(crate) schedule: Schedule,
    pub(crate) deprecations: Vec<Deprecation>,
}

impl TrainConfig {
    /// Start building a configuration.
    pub fn builder() -> super::TrainConfigBuilder {
        super::TrainConfigBuilder::new()
    }

    /// The data source, dataflow or input feed.
    pub fn data_source(&self) -> &DataSource {
        &self.data_source
    }

    /// The dataflow, when the source is one.
    pub fn dataflow(&self) -> Option<&dyn DataFlow> {
        self.data_source.as_dataflow()
    }

    /// The input feed, when the source is one.
    pub fn data(&self) -> Option<&dyn InputData> {
        self.data_source.as_input()
    }

    /// Model descriptor
    pub fn model(&self) -> &dyn ModelDesc {
        self.model.as_ref()
    }

    /// Optimizer handle
    pub fn optimizer(&self) -> &dyn Optimizer {
        self.optimizer.as_ref()
    }

    /// Callbacks in dispatch order
    pub fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }

    /// Session runtime configuration
    pub fn session_config(&self) -> &SessionConfig {
        &self.session_config
    }

    /// Variable initialization strategy
    pub fn session_init(&self) -> &dyn SessionInit {
        self.session_init.as_ref()
    }

    /// Steps, epochs and towers
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Steps run in each epoch
    pub fn steps_per_epoch(&self) -> usize {
        self.schedule.steps_per_epoch
    }

    /// First epoch
    pub fn starting_epoch(&self) -> usize {
        self.schedule.starting_epoch
    }

    /// Last epoch
    pub fn max_epoch(&self) -> usize {
        self.schedule.max_epoch
    }

    /// Training towers, by relative GPU index
    pub fn tower(&self) -> &[usize] {
        &self.schedule.tower
    }

    /// Prediction devices
    pub fn predict_tower(&self) -> &[Device] {
        &self.schedule.predict_tower
    }

    /// Number of training towers; always the length of [`tower`](Self::tower).
    pub fn nr_tower(&self) -> usize {
        self.schedule.tower.len()
    }

    /// Replace the tower list with `0..n`.
    pub fn set_nr_tower(&mut self, n: usize) -> Result<()> {
        self.schedule.tower = tower_range(n)?;
        Ok(())
    }

    /// Legacy tower setter.
    ///
    /// Takes either a count or a tower argument, never both. A count, or a
    /// [`TowerArg::Count`], expands to `0..n`; a list is used as given.
    #[deprecated(note = "use set_nr_tower, or build with `tower` / `nr_tower`")]
    pub fn set_tower(&mut self, nr_tower: Option<usize>, tower: Option<TowerArg>) -> Result<()> {
        legacy::warn(&legacy::SET_TOWER);
        self.deprecations.push(legacy::SET_TOWER);

        let list = match (nr_tower, tower) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Conflict { first: "nr_tower", second: "tower" })
            }
            (Some(n), None) | (None, Some(TowerArg::Count(n))) => tower_range(n)?,
            (None, Some(TowerArg::List(list))) if !list.is_empty() => list,
            (None, Some(TowerArg::List(_))) => {
                return Err(ConfigError::invalid(
                    "tower",
                    "empty tower list",
                    "List at least one device index",
                ))
            }
            (None, None) => {
                return Err(ConfigError::Missing {
                    field: "tower",
                    suggestion: "Pass either `nr_tower` or `tower`",
                })
            }
        };
        self.schedule.tower = list;
        Ok(())
    }

    /// Legacy shapes that were normalized while building this configuration.
    pub fn deprecations(&self) -> &[Deprecation] {
        &self.deprecations
    }
}

impl fmt::Debug for TrainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainConfig")
            .field("data_source", &self.data_source)
            .field("model", &self.model.name())
            .field("optimizer", &self.optimizer)
            .field("callbacks", &self.callbacks)
            .field("session_config", &self.session_config)
            .field("session_init", &self.session_init)
            .field("schedule", &self.schedule)
            .field("deprecations", &self.deprecations)
            .finish()
    }
}
