//! Builder that validates and assembles a [`TrainConfig`]

use super::legacy::{self, Deprecation};
use super::numeric::Numeric;
use super::schedule::ScheduleArgs;
use super::tower::PredictTower;
use super::train_config::TrainConfig;
use crate::data::{DataFlow, DataSource, InputData};
use crate::error::{ConfigError, Result};
use crate::model::{validate_model, ModelDesc};
use crate::optim::Optimizer;
use crate::session::{JustCurrentSession, SessionConfig, SessionInit};
use crate::train::callback::{default_extra_callbacks, Callback, Callbacks, StepCounter};
use std::fmt;

/// Collects training configuration fields; [`build`](Self::build) validates
/// them all at once.
///
/// # Example
///
/// ```no_run
/// use trainconfig::config::TrainConfig;
/// use trainconfig::data::DataFromList;
/// use trainconfig::optim::Adam;
/// # use trainconfig::model::{InputDesc, ModelDesc};
/// # use trainconfig::data::Datapoint;
/// # struct Linear;
/// # impl ModelDesc for Linear {
/// #     fn name(&self) -> &str { "linear" }
/// #     fn inputs(&self) -> Vec<InputDesc> { vec![InputDesc::new("x", vec![None])] }
/// #     fn loss(&self, _: &Datapoint) -> f32 { 0.0 }
/// # }
///
/// let config = TrainConfig::builder()
///     .dataflow(DataFromList::new(vec![vec![vec![1.0]]; 100]))
///     .model(Linear)
///     .optimizer(Adam::default_params(1e-3))
///     .max_epoch(10)
///     .nr_tower(2)
///     .build()?;
/// assert_eq!(config.steps_per_epoch(), 100);
/// assert_eq!(config.tower(), &[0, 1]);
/// # Ok::<(), trainconfig::ConfigError>(())
/// ```
#[derive(Default)]
pub struct TrainConfigBuilder {
    dataflow: Option<Box<dyn DataFlow>>,
    legacy_dataset: Option<Box<dyn DataFlow>>,
    data: Option<Box<dyn InputData>>,
    model: Option<Box<dyn ModelDesc>>,
    optimizer: Option<Box<dyn Optimizer>>,
    callbacks: Vec<Box<dyn Callback>>,
    extra_callbacks: Option<Vec<Box<dyn Callback>>>,
    session_config: SessionConfig,
    session_init: Option<Box<dyn SessionInit>>,
    schedule: ScheduleArgs,
    legacy_steps: Option<Numeric>,
    deprecations: Vec<Deprecation>,
}

impl TrainConfigBuilder {
    /// Empty builder with every default in place.
    pub fn new() -> Self {
        Self::default()
    }

    /// Train from a dataflow.
    pub fn dataflow<D: DataFlow + 'static>(self, dataflow: D) -> Self {
        self.dataflow_boxed(Box::new(dataflow))
    }

    /// Train from an already boxed dataflow.
    pub fn dataflow_boxed(mut self, dataflow: Box<dyn DataFlow>) -> Self {
        self.dataflow = Some(dataflow);
        self
    }

    /// Train from a prepared input feed.
    pub fn data<I: InputData + 'static>(self, data: I) -> Self {
        self.data_boxed(Box::new(data))
    }

    /// Train from an already boxed input feed.
    pub fn data_boxed(mut self, data: Box<dyn InputData>) -> Self {
        self.data = Some(data);
        self
    }

    /// Model to train.
    pub fn model<M: ModelDesc + 'static>(mut self, model: M) -> Self {
        self.model = Some(Box::new(model));
        self
    }

    /// Optimizer handle.
    pub fn optimizer<O: Optimizer + 'static>(self, optimizer: O) -> Self {
        self.optimizer_boxed(Box::new(optimizer))
    }

    /// Already boxed optimizer handle, e.g. from [`build_optimizer`](crate::optim::build_optimizer).
    pub fn optimizer_boxed(mut self, optimizer: Box<dyn Optimizer>) -> Self {
        self.optimizer = Some(optimizer);
        self
    }

    /// Append one user callback.
    pub fn callback<C: Callback + 'static>(mut self, callback: C) -> Self {
        self.callbacks.push(Box::new(callback));
        self
    }

    /// Replace the user callbacks.
    pub fn callbacks(mut self, callbacks: Vec<Box<dyn Callback>>) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Replace the default extras appended after user callbacks. Put a
    /// [`StatPrinter`](crate::train::callback::StatPrinter) last so it can
    /// report what the others publish.
    pub fn extra_callbacks(mut self, extra: Vec<Box<dyn Callback>>) -> Self {
        self.extra_callbacks = Some(extra);
        self
    }

    /// Session runtime configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Variable initialization strategy; defaults to [`JustCurrentSession`].
    pub fn session_init<S: SessionInit + 'static>(self, init: S) -> Self {
        self.session_init_boxed(Box::new(init))
    }

    /// Already boxed initialization strategy.
    pub fn session_init_boxed(mut self, init: Box<dyn SessionInit>) -> Self {
        self.session_init = Some(init);
        self
    }

    /// Steps per epoch; coerced to an integer when built.
    pub fn steps_per_epoch(mut self, steps: impl Into<Numeric>) -> Self {
        self.schedule.steps_per_epoch = Some(steps.into());
        self
    }

    /// First epoch index; coerced to an integer when built.
    pub fn starting_epoch(mut self, epoch: impl Into<Numeric>) -> Self {
        self.schedule.starting_epoch = epoch.into();
        self
    }

    /// Last epoch index; coerced to an integer when built.
    pub fn max_epoch(mut self, epoch: impl Into<Numeric>) -> Self {
        self.schedule.max_epoch = epoch.into();
        self
    }

    /// Number of training towers, expanded to `0..n`.
    pub fn nr_tower(mut self, n: usize) -> Self {
        self.schedule.nr_tower = Some(n);
        self
    }

    /// Explicit training towers.
    pub fn tower(mut self, tower: Vec<usize>) -> Self {
        self.schedule.tower = Some(tower);
        self
    }

    /// Prediction towers: one device index or a list. `-1` selects the CPU.
    pub fn predict_tower(mut self, predict: impl Into<PredictTower>) -> Self {
        self.schedule.predict_tower = predict.into();
        self
    }

    /// Replace all scheduling fields at once.
    pub fn schedule(mut self, schedule: ScheduleArgs) -> Self {
        self.schedule = schedule;
        self
    }

    /// Legacy name for [`dataflow`](Self::dataflow). Replaces any
    /// `dataflow` when built.
    #[deprecated(note = "use `dataflow`")]
    pub fn dataset<D: DataFlow + 'static>(mut self, dataflow: D) -> Self {
        self.legacy_dataset = Some(Box::new(dataflow));
        self
    }

    /// Legacy name for [`steps_per_epoch`](Self::steps_per_epoch).
    ///
    /// Setting both, in any order, fails the build with an unknown field.
    #[deprecated(note = "use `steps_per_epoch`")]
    pub fn step_per_epoch(mut self, steps: impl Into<Numeric>) -> Self {
        self.legacy_steps = Some(steps.into());
        self
    }

    /// Legacy form taking a whole callback group whose last element is the
    /// stat printer. That element is dropped; the configuration appends its
    /// own extras.
    #[deprecated(note = "pass a list of callbacks without StatPrinter to `callbacks`")]
    pub fn callback_group(mut self, group: Callbacks) -> Self {
        self.callbacks = legacy::callbacks_from_group(group);
        self.deprecations.push(legacy::CALLBACK_GROUP);
        self
    }

    pub(crate) fn record_deprecations(mut self, deprecations: Vec<Deprecation>) -> Self {
        self.deprecations.extend(deprecations);
        self
    }

    /// Map the legacy fields onto their replacements.
    fn apply_legacy(&mut self) -> Result<()> {
        if let Some(dataset) = self.legacy_dataset.take() {
            if self.dataflow.is_some() {
                tracing::warn!(
                    target: "trainconfig::deprecated",
                    "both `dataset` and `dataflow` are set; `dataset` takes precedence"
                );
            }
            legacy::warn(&legacy::DATASET);
            self.deprecations.push(legacy::DATASET);
            self.dataflow = Some(dataset);
        }

        if let Some(steps) = self.legacy_steps.take() {
            if self.schedule.steps_per_epoch.is_some() {
                return Err(ConfigError::UnknownFields {
                    names: vec![legacy::STEP_PER_EPOCH.old.to_string()],
                });
            }
            legacy::warn(&legacy::STEP_PER_EPOCH);
            self.deprecations.push(legacy::STEP_PER_EPOCH);
            self.schedule.steps_per_epoch = Some(steps);
        }
        Ok(())
    }

    /// Validate every field and assemble the configuration.
    pub fn build(mut self) -> Result<TrainConfig> {
        self.apply_legacy()?;

        let data_source = match (self.dataflow, self.data) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Conflict { first: "dataflow", second: "data" })
            }
            (Some(df), None) => DataSource::DataFlow(df),
            (None, Some(input)) => DataSource::Input(input),
            (None, None) => {
                return Err(ConfigError::Missing {
                    field: "dataflow",
                    suggestion: "Set either `dataflow` or `data`",
                })
            }
        };

        let model = self.model.ok_or(ConfigError::Missing {
            field: "model",
            suggestion: "Pass the ModelDesc to train",
        })?;
        validate_model(model.as_ref())?;

        let optimizer = self.optimizer.ok_or(ConfigError::Missing {
            field: "optimizer",
            suggestion: "Pass an optimizer, e.g. Adam::default_params(1e-3)",
        })?;

        let mut callbacks = Callbacks::new();
        callbacks.add(StepCounter);
        let extras = self.extra_callbacks.unwrap_or_else(default_extra_callbacks);
        for cb in self.callbacks.into_iter().chain(extras) {
            callbacks.push(cb);
        }

        self.session_config.validate()?;
        let session_init = self.session_init.unwrap_or_else(|| Box::new(JustCurrentSession));

        let schedule = self.schedule.resolve(Some(&data_source))?;

        Ok(TrainConfig {
            data_source,
            model,
            optimizer,
            callbacks,
            session_config: self.session_config,
            session_init,
            schedule,
            deprecations: self.deprecations,
        })
    }
}

impl fmt::Debug for TrainConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainConfigBuilder")
            .field("dataflow", &self.dataflow.as_ref().map(|d| d.name()))
            .field("legacy_dataset", &self.legacy_dataset.as_ref().map(|d| d.name()))
            .field("data", &self.data.as_ref().map(|d| d.name()))
            .field("model", &self.model.as_ref().map(|m| m.name()))
            .field("optimizer", &self.optimizer)
            .field("callbacks", &self.callbacks.iter().map(|cb| cb.name()).collect::<Vec<_>>())
            .field(
                "extra_callbacks",
                &self.extra_callbacks.as_ref().map(|cbs| cbs.iter().map(|cb| cb.name()).collect::<Vec<_>>()),
            )
            .field("session_config", &self.session_config)
            .field("session_init", &self.session_init)
            .field("schedule", &self.schedule)
            .field("legacy_steps", &self.legacy_steps)
            .field("deprecations", &self.deprecations)
            .finish()
    }
}
