//! Provides some tools to evaluate a learner.

/// Defines k-fold cross validation.
pub mod cross_validation;

pub use cross_validation::{CrossValidation, cross_val_score};
