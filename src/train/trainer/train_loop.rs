//! Epoch and step loop

use super::core::SimpleTrainer;
use super::result::TrainResult;
use crate::error::Error;
use crate::train::callback::CallbackAction;
use std::time::Instant;

impl SimpleTrainer {
    /// Run every configured epoch, or until a callback stops training.
    ///
    /// A step that cannot get a datapoint fails the run with
    /// [`Error::DataExhausted`]; the train-end hooks still run first.
    pub fn train(&mut self) -> Result<TrainResult, Error> {
        self.start_time = Some(Instant::now());
        self.input.reset_state();

        let mut ctx = self.initial_context();
        let mut epochs_run = 0;
        let mut stopped_early = false;
        let mut failure = None;

        if self.callbacks.on_train_begin(&mut ctx) == CallbackAction::Stop {
            stopped_early = true;
        }

        let (first, last) = (self.schedule.starting_epoch, self.schedule.max_epoch);
        let mut epoch = first;
        while !stopped_early && failure.is_none() && epoch <= last {
            ctx.epoch = epoch;
            ctx.step = 0;
            match self.callbacks.on_epoch_begin(&mut ctx) {
                CallbackAction::Stop => {
                    stopped_early = true;
                    break;
                }
                CallbackAction::SkipEpoch => {
                    epoch += 1;
                    continue;
                }
                CallbackAction::Continue => {}
            }

            for step in 0..self.schedule.steps_per_epoch {
                ctx.step = step;
                match self.callbacks.on_step_begin(&mut ctx) {
                    CallbackAction::Stop => {
                        stopped_early = true;
                        break;
                    }
                    CallbackAction::SkipEpoch => break,
                    CallbackAction::Continue => {}
                }

                let Some(datapoint) = self.input.next_datapoint() else {
                    failure = Some(Error::DataExhausted { epoch, step });
                    break;
                };
                ctx.loss = self.model.loss(&datapoint);
                ctx.lr = self.optimizer.lr();
                ctx.elapsed_secs = self.elapsed_secs();

                match self.callbacks.on_step_end(&mut ctx) {
                    CallbackAction::Stop => {
                        stopped_early = true;
                        break;
                    }
                    CallbackAction::SkipEpoch => break,
                    CallbackAction::Continue => {}
                }
            }

            if failure.is_some() {
                break;
            }
            epochs_run += 1;
            if self.callbacks.on_epoch_end(&mut ctx) == CallbackAction::Stop {
                stopped_early = true;
            }
            epoch += 1;
        }

        ctx.elapsed_secs = self.elapsed_secs();
        self.callbacks.on_train_end(&mut ctx);

        if let Some(err) = failure {
            tracing::error!(epoch = ctx.epoch, step = ctx.step, "{err}");
            return Err(err);
        }

        Ok(TrainResult {
            epochs_run,
            final_epoch: ctx.epoch,
            global_step: ctx.global_step,
            final_loss: ctx.loss,
            stopped_early,
            elapsed_secs: ctx.elapsed_secs,
            stats: ctx.stats.history().to_vec(),
        })
    }
}
