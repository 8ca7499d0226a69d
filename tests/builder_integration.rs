//! Builder integration tests against the public API

use std::sync::{Arc, Mutex};
use trainconfig::config::{Device, TowerArg};
use trainconfig::data::{DataFromGenerator, DataFromList, Datapoint, FeedInput};
use trainconfig::model::{InputDesc, ModelDesc};
use trainconfig::optim::{build_optimizer, OptimSpec, Sgd};
use trainconfig::session::{DictRestore, SessionConfig, VariableStore};
use trainconfig::train::callback::{Callback, CallbackAction, CallbackContext};
use trainconfig::train::SimpleTrainer;
use trainconfig::{ConfigError, TrainConfig, TrainConfigBuilder};

struct Identity;

impl ModelDesc for Identity {
    fn name(&self) -> &str {
        "identity"
    }

    fn inputs(&self) -> Vec<InputDesc> {
        vec![InputDesc::new("x", vec![Some(1)])]
    }

    fn loss(&self, datapoint: &Datapoint) -> f32 {
        datapoint[0][0]
    }
}

/// Records every hook it sees
struct Recorder(Arc<Mutex<Vec<String>>>);

impl Callback for Recorder {
    fn on_train_begin(&mut self, _ctx: &mut CallbackContext) -> CallbackAction {
        self.0.lock().unwrap().push("train_begin".into());
        CallbackAction::Continue
    }

    fn on_epoch_begin(&mut self, ctx: &mut CallbackContext) -> CallbackAction {
        self.0.lock().unwrap().push(format!("epoch_begin:{}", ctx.epoch));
        CallbackAction::Continue
    }

    fn on_step_end(&mut self, ctx: &mut CallbackContext) -> CallbackAction {
        self.0.lock().unwrap().push(format!("step:{}", ctx.global_step));
        CallbackAction::Continue
    }

    fn on_train_end(&mut self, _ctx: &mut CallbackContext) {
        self.0.lock().unwrap().push("train_end".into());
    }

    fn name(&self) -> &'static str {
        "Recorder"
    }
}

fn rows(n: usize) -> DataFromList {
    DataFromList::new((0..n).map(|i| vec![vec![i as f32]]).collect())
}

fn builder() -> TrainConfigBuilder {
    TrainConfig::builder().model(Identity).optimizer(Sgd::new(0.05, 0.9))
}

#[test]
fn test_hook_order_through_trainer() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let config =
        builder().dataflow(rows(2)).max_epoch(2).callback(Recorder(Arc::clone(&log))).build().unwrap();
    assert_eq!(config.callbacks().names()[1], "Recorder");

    SimpleTrainer::new(config).unwrap().train().unwrap();
    let events = log.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            "train_begin",
            "epoch_begin:1",
            "step:1",
            "step:2",
            "epoch_begin:2",
            "step:3",
            "step:4",
            "train_end"
        ]
    );
}

#[test]
fn test_generator_needs_explicit_steps() {
    let generator = || DataFromGenerator::new(|| Some(vec![vec![1.0]]));

    let err = builder().dataflow(generator()).build().unwrap_err();
    assert!(matches!(err, ConfigError::UndefinedSize { .. }));

    let config = builder().dataflow(generator()).steps_per_epoch(2.9).max_epoch(2).build().unwrap();
    assert_eq!(config.steps_per_epoch(), 2);
    let result = SimpleTrainer::new(config).unwrap().train().unwrap();
    assert_eq!(result.global_step, 4);
    assert_eq!(result.final_loss, 1.0);
}

#[test]
fn test_sized_generator_and_feed() {
    let gen = DataFromGenerator::new(|| Some(vec![vec![0.0]])).with_size(7);
    let config = builder().data(FeedInput::new(gen)).build().unwrap();
    assert_eq!(config.steps_per_epoch(), 7);
    assert_eq!(config.data_source().kind(), "data");
}

#[test]
fn test_dict_restore_and_session_config() {
    let vars: VariableStore = [("w".to_string(), vec![1.0, 2.0])].into_iter().collect();
    let config = builder()
        .dataflow(rows(1))
        .session_init(DictRestore::new(vars))
        .session_config(SessionConfig { intra_op_threads: 4, ..SessionConfig::default() })
        .max_epoch(1)
        .build()
        .unwrap();
    assert_eq!(config.session_config().intra_op_threads, 4);

    let trainer = SimpleTrainer::new(config).unwrap();
    assert_eq!(trainer.variables().len(), 1);
}

#[test]
fn test_optimizer_from_spec() {
    let optimizer = build_optimizer(&OptimSpec::new("adam", 0.002)).unwrap();
    let config = builder().optimizer_boxed(optimizer).dataflow(rows(1)).build().unwrap();
    assert_eq!(config.optimizer().name(), "adam");
    assert_eq!(config.optimizer().lr(), 0.002);

    let err = build_optimizer(&OptimSpec::new("adam", 0.0)).unwrap_err();
    assert_eq!(err.field(), Some("optimizer.lr"));
}

#[test]
#[allow(deprecated)]
fn test_tower_mutation_after_build() {
    let mut config = builder().dataflow(rows(1)).predict_tower(vec![1i64, 3]).build().unwrap();
    assert_eq!(config.tower(), &[0]);
    assert_eq!(config.predict_tower(), &[Device::Gpu(1), Device::Gpu(3)]);

    config.set_nr_tower(3).unwrap();
    assert_eq!(config.tower(), &[0, 1, 2]);

    config.set_tower(None, Some(TowerArg::List(vec![7]))).unwrap();
    assert_eq!(config.nr_tower(), 1);
    assert_eq!(config.deprecations().len(), 1);
}

#[test]
fn test_negative_predict_tower_other_than_cpu_rejected() {
    let err = builder().dataflow(rows(1)).predict_tower(-2i64).build().unwrap_err();
    assert_eq!(err.field(), Some("predict_tower"));
}
