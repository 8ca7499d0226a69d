//! Compatibility shims for legacy configuration shapes
//!
//! Each shim maps an old input shape onto the current one, emits a warning
//! on the `trainconfig::deprecated` target and records a [`Deprecation`] on
//! the resulting configuration. None of them fails; anything a shim does not
//! recognize is left for the unknown-field check.

use crate::train::callback::{Callback, Callbacks};
use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// A legacy input shape that was normalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Deprecation {
    /// The old name or shape
    pub old: &'static str,
    /// What replaces it
    pub new: &'static str,
    /// What the caller should change
    pub note: &'static str,
}

/// `dataset` was renamed to `dataflow`.
pub const DATASET: Deprecation = Deprecation {
    old: "dataset",
    new: "dataflow",
    note: "TrainConfig.dataset has been deprecated. Use TrainConfig.dataflow instead.",
};

/// `step_per_epoch` was renamed to `steps_per_epoch`.
pub const STEP_PER_EPOCH: Deprecation = Deprecation {
    old: "step_per_epoch",
    new: "steps_per_epoch",
    note: "Use steps_per_epoch instead of step_per_epoch!",
};

/// Callbacks used to be passed as a whole group ending in a stat printer.
pub const CALLBACK_GROUP: Deprecation = Deprecation {
    old: "callbacks=Callbacks(..)",
    new: "callbacks=[..]",
    note: "Please change the argument 'callbacks=' to a *list* of callbacks without StatPrinter().",
};

/// `set_tower` was replaced by setting the tower list or count directly.
pub const SET_TOWER: Deprecation = Deprecation {
    old: "set_tower",
    new: "set_nr_tower / tower",
    note: "config.set_tower is deprecated. set config.tower or config.nr_tower directly",
};

/// Emit the warning for `dep`.
pub(crate) fn warn(dep: &Deprecation) {
    tracing::warn!(
        target: "trainconfig::deprecated",
        old = dep.old,
        new = dep.new,
        "[Deprecated] {}",
        dep.note
    );
}

/// Convert a legacy callback group into a plain callback list.
///
/// The old group always ended with the stat printer, which is now appended
/// by the configuration itself, so the last element is dropped without
/// looking at it.
pub(crate) fn callbacks_from_group(group: Callbacks) -> Vec<Box<dyn Callback>> {
    warn(&CALLBACK_GROUP);
    let mut callbacks = group.into_vec();
    callbacks.pop();
    callbacks
}

/// Rename legacy keys of a declarative configuration in place.
///
/// `dataset` always replaces `dataflow`. `step_per_epoch` is only renamed
/// when `steps_per_epoch` is absent; otherwise it stays behind and is
/// reported as unknown.
pub(crate) fn normalize_mapping(map: &mut Mapping) -> Vec<Deprecation> {
    let mut applied = Vec::new();

    if let Some(value) = map.remove(DATASET.old) {
        if map.contains_key(DATASET.new) {
            tracing::warn!(
                target: "trainconfig::deprecated",
                "both `dataset` and `dataflow` are set; `dataset` takes precedence"
            );
        }
        map.insert(Value::from(DATASET.new), value);
        warn(&DATASET);
        applied.push(DATASET);
    }

    if !map.contains_key(STEP_PER_EPOCH.new) {
        if let Some(value) = map.remove(STEP_PER_EPOCH.old) {
            map.insert(Value::from(STEP_PER_EPOCH.new), value);
            warn(&STEP_PER_EPOCH);
            applied.push(STEP_PER_EPOCH);
        }
    }

    applied
}
