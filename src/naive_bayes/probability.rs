use serde::{
    Serialize,
    Deserialize,
};

use crate::Sample;


/// A class-conditional probability model over the features.
pub trait Probability {
    /// Returns `ln P(x | class)` for the `row`-th example,
    /// up to a term that does not depend on the class.
    fn log_probability(&self, sample: &Sample, row: usize) -> f64;

    /// Returns the number of features the model covers.
    fn n_features(&self) -> usize;
}


/// Multinomial distribution over the words of a single class.
/// `ln_theta[j]` is the log-probability of drawing the `j`-th word.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Multinomial {
    pub(super) ln_theta: Vec<f64>,
}


impl Multinomial {
    /// Builds the smoothed distribution from the word counts of a class.
    ///
    /// `theta[j] = (counts[j] + alpha) / (sum(counts) + alpha * n_words)`
    pub(super) fn smoothed(counts: &[f64], alpha: f64) -> Self {
        let n_words = counts.len() as f64;
        let total = counts.iter().sum::<f64>();
        let ln_denominator = (total + alpha * n_words).ln();

        let ln_theta = counts.iter()
            .map(|&c| (c + alpha).ln() - ln_denominator)
            .collect();
        Self { ln_theta }
    }


    /// Returns the log-probability of each word.
    pub fn log_probabilities(&self) -> &[f64] {
        &self.ln_theta[..]
    }


    /// Returns the probability of each word.
    pub fn probabilities(&self) -> Vec<f64> {
        self.ln_theta.iter()
            .map(|p| p.exp())
            .collect()
    }
}


impl Probability for Multinomial {
    fn n_features(&self) -> usize {
        self.ln_theta.len()
    }


    #[inline(always)]
    fn log_probability(&self, sample: &Sample, row: usize) -> f64 {
        sample.features()
            .iter()
            .zip(&self.ln_theta[..])
            .map(|(feat, &ln_theta)| {
                let x = feat[row];
                // Avoids `0 * -inf`.
                if x == 0.0 { 0.0 } else { x * ln_theta }
            })
            .sum::<f64>()
    }
}
