use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{
    Serialize,
    Deserialize,
    de::DeserializeOwned,
};

use crate::{Classifier, Sample, Label};
use crate::common::{checker, utils};
use crate::error::{Error, Result};

use super::probability::Probability;


/// Naive Bayes classifier.
/// The `k`-th prior and the `k`-th conditional model
/// belong to the class `classes[k]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NBayesClassifier<P> {
    pub(super) classes: Vec<Label>,
    pub(super) ln_priors: Vec<f64>,
    pub(super) conditionals: Vec<P>,
    pub(super) n_features: usize,
}


impl<P> NBayesClassifier<P> {
    /// Returns the class labels, sorted in ascending order.
    pub fn classes(&self) -> &[Label] {
        &self.classes[..]
    }


    /// Returns the prior probability of each class.
    pub fn priors(&self) -> Vec<f64> {
        self.ln_priors.iter()
            .map(|p| p.exp())
            .collect()
    }


    /// Returns the class-conditional models.
    pub fn conditionals(&self) -> &[P] {
        &self.conditionals[..]
    }
}


impl<P> NBayesClassifier<P>
    where P: Probability
{
    /// Computes the joint log-probability `ln P(c) + ln P(x | c)`
    /// of each class for the given instance.
    /// Fails with [`Error::FeatureMismatch`] if `sample` does not have
    /// the number of features the classifier was fitted on.
    pub fn log_probabilities(&self, sample: &Sample, row: usize)
        -> Result<Vec<f64>>
    {
        checker::check_n_features(sample, self.n_features)?;
        let scores = self.ln_priors.iter()
            .zip(&self.conditionals[..])
            .map(|(ln_prior, cond)| ln_prior + cond.log_probability(sample, row))
            .collect();
        Ok(scores)
    }


    /// Computes the posterior probability `P(c | x)`
    /// of each class for the given instance.
    pub fn predict_proba(&self, sample: &Sample, row: usize)
        -> Result<Vec<f64>>
    {
        let ln_joint = self.log_probabilities(sample, row)?;
        let ln_evidence = utils::log_sum_exp(&ln_joint);

        let proba = ln_joint.into_iter()
            .map(|p| (p - ln_evidence).exp())
            .collect();
        Ok(proba)
    }
}


impl<P> NBayesClassifier<P>
    where P: Serialize
{
    /// Writes the classifier to `path` as JSON.
    pub fn save_json<Q: AsRef<Path>>(&self, path: Q) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }
}


impl<P> NBayesClassifier<P>
    where P: Probability + DeserializeOwned
{
    /// Reads a classifier written by [`NBayesClassifier::save_json`].
    /// Fails with [`Error::InvalidModel`] if the numbers of classes,
    /// priors and conditional models disagree,
    /// if a conditional model does not cover every feature,
    /// or if the classes are not sorted without duplicates.
    pub fn load_json<Q: AsRef<Path>>(path: Q) -> Result<Self> {
        let file = File::open(path)?;
        let f: Self = serde_json::from_reader(BufReader::new(file))?;
        f.validate()?;
        Ok(f)
    }


    fn validate(&self) -> Result<()> {
        let n_classes = self.classes.len();
        if n_classes == 0 {
            return Err(Error::InvalidModel("no classes".to_string()));
        }
        if self.ln_priors.len() != n_classes {
            let reason = format!(
                "{} priors for {n_classes} classes", self.ln_priors.len()
            );
            return Err(Error::InvalidModel(reason));
        }
        if self.conditionals.len() != n_classes {
            let reason = format!(
                "{} conditional models for {n_classes} classes",
                self.conditionals.len()
            );
            return Err(Error::InvalidModel(reason));
        }
        if !self.classes.windows(2).all(|w| w[0] < w[1]) {
            let reason = "classes are not strictly increasing".to_string();
            return Err(Error::InvalidModel(reason));
        }
        let bad = self.conditionals.iter()
            .position(|cond| cond.n_features() != self.n_features);
        if let Some(k) = bad {
            let reason = format!(
                "conditional model of class {} has {} features, expected {}",
                self.classes[k],
                self.conditionals[k].n_features(),
                self.n_features,
            );
            return Err(Error::InvalidModel(reason));
        }
        Ok(())
    }
}


impl<P> Classifier for NBayesClassifier<P>
    where P: Probability + Sync
{
    fn n_features(&self) -> usize {
        self.n_features
    }


    fn predict(&self, sample: &Sample, row: usize) -> Result<Label> {
        let scores = self.log_probabilities(sample, row)?;
        Ok(self.classes[utils::argmax(&scores)])
    }
}
