//! The core traits for the learners and classifiers in this crate.
//!
//! A [`Learner`] fits a [`Classifier`] on a labeled [`Sample`].
//! A classifier assigns a class label to every example of a [`Sample`].
//! Implementors only need to provide [`Classifier::predict`]
//! and [`Classifier::n_features`];
//! the batch prediction and the accuracy come for free.
use rayon::prelude::*;

use crate::{Sample, Label};
use crate::error::{Error, Result};
use crate::common::checker;


/// A trait that produces a classifier from a training sample.
pub trait Learner {
    /// The classifier this learner produces.
    type Classifier: Classifier;


    /// Fits a classifier on the labeled `sample`.
    fn fit(&self, sample: &Sample) -> Result<Self::Classifier>;
}


/// A trait that defines the behavior of a fitted classifier.
pub trait Classifier: Sync {
    /// Returns the number of features the classifier was fitted on.
    fn n_features(&self) -> usize;


    /// Predicts the label of the `row`-th example of `sample`.
    /// Fails with [`Error::FeatureMismatch`]
    /// if `sample` does not have [`Classifier::n_features`] features.
    fn predict(&self, sample: &Sample, row: usize) -> Result<Label>;


    /// Predicts the labels of all examples in `sample`.
    fn predict_all(&self, sample: &Sample) -> Result<Vec<Label>> {
        checker::check_n_features(sample, self.n_features())?;
        let n_sample = sample.shape().0;

        (0..n_sample).into_par_iter()
            .map(|row| self.predict(sample, row))
            .collect()
    }


    /// Returns the fraction of examples in `sample`
    /// whose predicted label equals the true label.
    fn score(&self, sample: &Sample) -> Result<f64> {
        if sample.shape().0 == 0 {
            return Err(Error::EmptySample);
        }
        if !sample.has_target() {
            return Err(Error::MissingTarget);
        }

        let predictions = self.predict_all(sample)?;
        let n_sample = predictions.len() as f64;
        let n_correct = predictions.into_iter()
            .zip(sample.target())
            .filter(|(hx, y)| hx == *y)
            .count() as f64;

        Ok(n_correct / n_sample)
    }
}
