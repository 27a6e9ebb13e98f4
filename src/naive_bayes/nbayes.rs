use std::collections::HashMap;

use rayon::prelude::*;
use tracing::debug;

use crate::{Learner, Sample};
use crate::common::checker;
use crate::error::Result;

use super::probability::Multinomial;
use super::nbayes_classifier::*;


const DEFAULT_ALPHA: f64 = 1.0;


/// A factory that produces an `NBayesClassifier`
/// from a sample of word counts.
/// The struct name comes from scikit-learn.
///
/// # Example
/// ```no_run
/// use minibayes::prelude::*;
///
/// let train = SampleReader::<_, &str>::new()
///     .file("train.svm")
///     .read()
///     .unwrap();
/// let f = MultinomialNB::init()
///     .alpha(0.5)
///     .fit(&train)
///     .unwrap();
/// let accuracy = f.score(&train).unwrap();
/// println!("train accuracy: {accuracy}");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultinomialNB {
    alpha: f64,
    fit_prior: bool,
}


impl MultinomialNB {
    /// Initializes the MultinomialNB instance
    /// with Laplace smoothing (`alpha = 1`).
    pub fn init() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            fit_prior: true,
        }
    }


    /// Set the additive smoothing parameter.
    /// `alpha = 1` is Laplace smoothing.
    /// Default value is `1.0`.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }


    /// If `false`, every class gets the same prior.
    /// Default value is `true`.
    pub fn fit_prior(mut self, flag: bool) -> Self {
        self.fit_prior = flag;
        self
    }
}


impl Learner for MultinomialNB {
    type Classifier = NBayesClassifier<Multinomial>;


    /// Fits the model on `sample`.
    ///
    /// The prior of class `c` is the fraction of examples labeled `c`.
    /// The conditional probability of word `j` given class `c` is
    /// `(N_cj + alpha) / (N_c + alpha * n_features)`,
    /// where `N_cj` is the total count of word `j` in class `c`
    /// and `N_c` is the total word count of class `c`.
    fn fit(&self, sample: &Sample) -> Result<Self::Classifier> {
        checker::check_alpha(self.alpha)?;
        checker::check_sample(sample)?;

        let (n_sample, n_feature) = sample.shape();
        let classes = sample.classes();
        let n_classes = classes.len();

        let index_of = classes.iter()
            .enumerate()
            .map(|(k, &y)| (y, k))
            .collect::<HashMap<_, _>>();
        let class_of_row = sample.target()
            .iter()
            .map(|y| index_of[y])
            .collect::<Vec<usize>>();


        // Compute the prior probabilities
        let mut class_counts = vec![0_usize; n_classes];
        class_of_row.iter()
            .for_each(|&k| { class_counts[k] += 1; });

        let ln_priors = if self.fit_prior {
            class_counts.iter()
                .map(|&n_c| (n_c as f64 / n_sample as f64).ln())
                .collect::<Vec<_>>()
        } else {
            vec![-(n_classes as f64).ln(); n_classes]
        };


        // Word counts per feature, then per class.
        let counts_by_feature = sample.features()
            .par_iter()
            .map(|feat| feat.sums_by_class(&class_of_row, n_classes))
            .collect::<Vec<Vec<f64>>>();

        let conditionals = (0..n_classes).into_par_iter()
            .map(|k| {
                let counts = counts_by_feature.iter()
                    .map(|sums| sums[k])
                    .collect::<Vec<f64>>();
                Multinomial::smoothed(&counts, self.alpha)
            })
            .collect::<Vec<_>>();


        debug!(
            n_sample,
            n_feature,
            n_classes,
            alpha = self.alpha,
            ?class_counts,
            "fitted multinomial naive bayes"
        );


        Ok(NBayesClassifier {
            classes,
            ln_priors,
            conditionals,
            n_features: n_feature,
        })
    }
}


impl Default for MultinomialNB {
    fn default() -> Self {
        Self::init()
    }
}
