//! Multinomial Naive Bayes for word-count features.
//!
//! [`MultinomialNB`] is the learner; fitting it yields an
//! [`NBayesClassifier`] holding one [`Multinomial`] model per class.
//! A fitted classifier can be saved to and loaded from JSON.
/// Defines the multinomial Naive Bayes learner.
mod nbayes;
/// Defines Naive Bayes Classifiers returned by `MultinomialNB`.
mod nbayes_classifier;

/// Defines class-conditional probability models.
mod probability;

pub use nbayes::MultinomialNB;
pub use nbayes_classifier::NBayesClassifier;
pub use probability::{Probability, Multinomial};
