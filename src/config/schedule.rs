//! Scheduling parameters: step and epoch counts, tower assignment

use super::numeric::Numeric;
use super::tower::{resolve_towers, Device, PredictTower};
use crate::data::DataSource;
use crate::error::{ConfigError, Result};
use serde::Serialize;

/// Default last epoch when none is given.
pub const DEFAULT_MAX_EPOCH: i64 = 99_999;

/// Scheduling fields as supplied, before coercion and validation.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleArgs {
    /// Steps per epoch; `None` derives it from the data source size
    pub steps_per_epoch: Option<Numeric>,
    /// Index of the first epoch
    pub starting_epoch: Numeric,
    /// Index of the last epoch
    pub max_epoch: Numeric,
    /// Tower count shorthand
    pub nr_tower: Option<usize>,
    /// Explicit training towers
    pub tower: Option<Vec<usize>>,
    /// Prediction towers
    pub predict_tower: PredictTower,
}

impl Default for ScheduleArgs {
    fn default() -> Self {
        Self {
            steps_per_epoch: None,
            starting_epoch: Numeric::Int(1),
            max_epoch: Numeric::Int(DEFAULT_MAX_EPOCH),
            nr_tower: None,
            tower: None,
            predict_tower: PredictTower::default(),
        }
    }
}

/// Validated scheduling parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Schedule {
    /// Steps run in each epoch
    pub steps_per_epoch: usize,
    /// First epoch, at least 1
    pub starting_epoch: usize,
    /// Last epoch, at least 1
    pub max_epoch: usize,
    /// Training towers, never empty
    pub tower: Vec<usize>,
    /// Prediction devices
    pub predict_tower: Vec<Device>,
}

impl ScheduleArgs {
    /// Coerce and validate, taking the steps per epoch from `source` when
    /// not given explicitly.
    pub fn resolve(self, source: Option<&DataSource>) -> Result<Schedule> {
        let steps_per_epoch = match &self.steps_per_epoch {
            Some(steps) => steps.to_count("steps_per_epoch", 0, "must be >= 0")?,
            None => {
                let source = source.ok_or(ConfigError::UndefinedSize { source_kind: "data source" })?;
                source.size().ok_or(ConfigError::UndefinedSize { source_kind: source.kind() })?
            }
        };

        let starting_epoch = self.starting_epoch.to_count("starting_epoch", 1, "must be > 0")?;
        let max_epoch = self.max_epoch.to_count("max_epoch", 1, "must be > 0")?;
        let tower = resolve_towers(self.nr_tower, self.tower)?;
        let predict_tower = self.predict_tower.normalize()?;

        Ok(Schedule { steps_per_epoch, starting_epoch, max_epoch, tower, predict_tower })
    }
}

impl Schedule {
    /// Number of epochs a run covers.
    pub fn epochs(&self) -> usize {
        (self.max_epoch + 1).saturating_sub(self.starting_epoch)
    }
}
