//! Split-toning grade presets and their evaluation.

pub(crate) mod evaluator;
pub(crate) mod matcher;
pub(crate) mod preset;
