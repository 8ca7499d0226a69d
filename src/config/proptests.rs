//! Property-based tests for configuration construction

use super::*;
use crate::data::{DataFromList, Datapoint};
use crate::error::ConfigError;
use crate::model::{InputDesc, ModelDesc};
use crate::optim::Sgd;
use crate::train::callback::{Callback, StepCounter};
use proptest::prelude::*;
use std::path::Path;

struct Probe;

impl ModelDesc for Probe {
    fn name(&self) -> &str {
        "probe"
    }

    fn inputs(&self) -> Vec<InputDesc> {
        vec![InputDesc::new("x", vec![None])]
    }

    fn loss(&self, _datapoint: &Datapoint) -> f32 {
        0.0
    }
}

fn builder(size: usize) -> TrainConfigBuilder {
    TrainConfig::builder()
        .dataflow(DataFromList::new(vec![vec![vec![0.0]]; size]))
        .model(Probe)
        .optimizer(Sgd::new(0.1, 0.0))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_steps_follow_dataflow_size(size in 0usize..500) {
        let config = builder(size).build().unwrap();
        prop_assert_eq!(config.steps_per_epoch(), size);
    }

    #[test]
    fn prop_string_steps_coerce(steps in 0i64..100_000) {
        let config = builder(1).steps_per_epoch(steps.to_string()).build().unwrap();
        prop_assert_eq!(config.steps_per_epoch() as i64, steps);
    }

    #[test]
    fn prop_nr_tower_expands_to_range(n in 1usize..64) {
        let config = builder(1).nr_tower(n).build().unwrap();
        prop_assert_eq!(config.tower().to_vec(), (0..n).collect::<Vec<_>>());
        prop_assert_eq!(config.nr_tower(), n);
    }

    #[test]
    fn prop_tower_list_with_count_conflicts(
        n in 2usize..16,
        list in prop::collection::vec(0usize..8, 1..8),
    ) {
        let err = builder(1).nr_tower(n).tower(list).build().unwrap_err();
        let is_conflict = matches!(err, ConfigError::Conflict { .. });
        prop_assert!(is_conflict);
    }

    #[test]
    fn prop_set_nr_tower_keeps_pair_consistent(initial in 1usize..16, next in 1usize..16) {
        let mut config = builder(1).nr_tower(initial).build().unwrap();
        config.set_nr_tower(next).unwrap();
        prop_assert_eq!(config.nr_tower(), next);
        prop_assert_eq!(config.tower().to_vec(), (0..next).collect::<Vec<_>>());
    }

    #[test]
    fn prop_predict_tower_scalar_is_single_device(index in 0i64..16) {
        let config = builder(1).predict_tower(index).build().unwrap();
        prop_assert_eq!(config.predict_tower(), &[Device::Gpu(index as usize)][..]);
    }

    #[test]
    fn prop_callback_sequence_layout(user in 0usize..8) {
        let callbacks: Vec<Box<dyn Callback>> =
            (0..user).map(|_| Box::new(StepCounter) as Box<dyn Callback>).collect();
        let config = builder(1).callbacks(callbacks).build().unwrap();
        let names = config.callbacks().names();

        prop_assert_eq!(names.len(), user + 4);
        prop_assert_eq!(names[0], "StepCounter");
        prop_assert_eq!(
            &names[user + 1..],
            &["MovingAverageSummary", "ProgressCallback", "StatPrinter"][..]
        );
    }

    #[test]
    fn prop_unknown_yaml_keys_are_named(key in "[a-z]{3,10}_x") {
        let yaml = format!("steps_per_epoch: 1\n{key}: 1\n");
        let err = TrainSpec::from_yaml(&yaml, Path::new("t.yaml")).unwrap_err();
        match err {
            ConfigError::UnknownFields { names } => prop_assert_eq!(names, vec![key]),
            other => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn prop_epoch_window_respected(start in 1usize..100, len in 0usize..100) {
        let config = builder(1).starting_epoch(start).max_epoch(start + len).build().unwrap();
        prop_assert_eq!(config.schedule().epochs(), len + 1);
    }
}
