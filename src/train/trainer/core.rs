//! Core SimpleTrainer struct and setup

use crate::config::{Schedule, TrainConfig};
use crate::data::InputData;
use crate::error::Error;
use crate::model::ModelDesc;
use crate::optim::Optimizer;
use crate::session::VariableStore;
use crate::train::callback::{CallbackContext, Callbacks};
use std::time::Instant;

/// Single-process trainer over a validated configuration.
pub struct SimpleTrainer {
    pub(super) input: Box<dyn InputData>,
    pub(super) model: Box<dyn ModelDesc>,
    pub(super) optimizer: Box<dyn Optimizer>,
    pub(super) callbacks: Callbacks,
    pub(super) schedule: Schedule,
    pub(super) variables: VariableStore,
    pub(super) start_time: Option<Instant>,
}

impl SimpleTrainer {
    /// Take ownership of `config` and initialize the session variables.
    pub fn new(config: TrainConfig) -> Result<Self, Error> {
        let TrainConfig {
            data_source,
            model,
            optimizer,
            callbacks,
            session_config,
            session_init,
            schedule,
            deprecations,
        } = config;

        let mut variables = VariableStore::new();
        session_init.initialize(&mut variables)?;

        tracing::info!(
            model = model.name(),
            source = data_source.name(),
            optimizer = optimizer.name(),
            session_init = session_init.name(),
            towers = ?schedule.tower,
            gpu_memory_fraction = session_config.gpu_memory_fraction,
            restored = variables.len(),
            deprecations = deprecations.len(),
            "trainer ready"
        );

        Ok(Self {
            input: data_source.into_input(),
            model,
            optimizer,
            callbacks,
            schedule,
            variables,
            start_time: None,
        })
    }

    /// Session variables after initialization
    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    /// Schedule the trainer runs
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Names of the callbacks, in dispatch order
    pub fn callback_names(&self) -> Vec<&'static str> {
        self.callbacks.names()
    }

    /// Seconds since `train` started, 0 before that
    pub(super) fn elapsed_secs(&self) -> f64 {
        self.start_time.map_or(0.0, |t| t.elapsed().as_secs_f64())
    }

    pub(super) fn initial_context(&self) -> CallbackContext {
        CallbackContext {
            epoch: self.schedule.starting_epoch,
            max_epoch: self.schedule.max_epoch,
            steps_per_epoch: self.schedule.steps_per_epoch,
            lr: self.optimizer.lr(),
            ..Default::default()
        }
    }
}
