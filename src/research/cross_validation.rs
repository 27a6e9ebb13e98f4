use rand::prelude::*;
use colored::Colorize;
use tracing::info;

use crate::{Classifier, Learner, Sample};
use crate::common::checker;
use crate::error::Result;

use std::iter::Iterator;

const WIDTH: usize = 9;
const DEFAULT_N_FOLDS: usize = 5;
const DEFAULT_SEED: u64 = 1234;

/// A struct that generates
/// pairs of training/test sample for k-fold cross validation.
/// The `i`-th test sample is the `i`-th of `n_folds` contiguous blocks
/// of the (optionally shuffled) examples;
/// the training sample is everything else.
/// # Example
/// ```no_run
/// use minibayes::prelude::*;
/// use minibayes::CrossValidation;
///
/// let sample = SampleReader::<_, &str>::new()
///     .file("reviews.svm")
///     .read()
///     .unwrap();
/// let cv = CrossValidation::new(&sample)
///     .n_folds(5)
///     .verbose(true)
///     .seed(777)
///     .shuffle();
/// for (train, test) in cv {
///     let f = MultinomialNB::init().fit(&train).unwrap();
///     let train_acc = f.score(&train).unwrap();
///     let test_acc = f.score(&test).unwrap();
///     println!("[train: {train_acc}] [test: {test_acc}]");
/// }
/// ```
pub struct CrossValidation<'a> {
    current_fold: usize,
    n_folds: usize,
    seed: u64,
    sample: &'a Sample,
    ix: Vec<usize>,
    verbose: bool,
}


impl<'a> CrossValidation<'a> {
    /// Construct a new instance of `CrossValidation.`
    #[inline]
    pub fn new(sample: &'a Sample) -> Self {
        let n_sample = sample.shape().0;
        let ix = (0..n_sample).collect::<Vec<_>>();
        Self {
            current_fold: 0,
            n_folds: DEFAULT_N_FOLDS,
            seed: DEFAULT_SEED,
            verbose: false,
            sample,
            ix,
        }
    }


    /// Set the number of folds.
    /// Default value is `5.`
    #[inline]
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }


    /// Set the seed of the randomness for shuffling.
    /// Default vaule is `1234.`
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Set the verbose parameter.
    /// If `true`, `CrossValidation` prints some information
    /// when generating a train/test pair.
    /// Default vaule is `false.`
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Shuffle the training sample.
    /// By default, `CrossValidation` does not shuffle the sample.
    #[inline]
    pub fn shuffle(mut self) -> Self {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.ix.shuffle(&mut rng);
        self
    }


    /// Returns the training/test sample for `i`th fold.
    #[inline]
    fn fold_at(&self, i: usize) -> (Sample, Sample) {
        let n_sample = self.ix.len();
        let start = i * n_sample / self.n_folds;
        let end = (i + 1) * n_sample / self.n_folds;
        self.sample.split(&self.ix, start, end)
    }
}


impl<'a> Iterator for CrossValidation<'a> {
    type Item = (Sample, Sample);
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_fold >= self.n_folds { return None; }

        let output = self.fold_at(self.current_fold);
        self.current_fold += 1;

        if self.verbose {
            let train_size = output.0.shape().0;
            let test_size = output.1.shape().0;
            println!("{}", banner(self.current_fold, train_size, test_size));
        }

        Some(output)
    }
}


/// The line printed for each fold in verbose mode.
fn banner(fold: usize, train_size: usize, test_size: usize) -> String {
    format!(
        "{}    {}    {}",
        format!("  [{: >3}'th fold]", fold).bold().red(),
        format!("[TRAIN {:>WIDTH$}]", train_size).bold().green(),
        format!("[TEST {:>WIDTH$}]", test_size).bold().yellow(),
    )
}


/// Runs `n_folds`-fold cross validation and
/// returns the test accuracy of each fold.
/// The examples are shuffled with `seed` if it is given.
pub fn cross_val_score<L>(
    learner: &L,
    sample: &Sample,
    n_folds: usize,
    seed: Option<u64>,
) -> Result<Vec<f64>>
    where L: Learner,
{
    checker::check_n_folds(n_folds, sample.shape().0)?;

    let mut cv = CrossValidation::new(sample)
        .n_folds(n_folds);
    if let Some(seed) = seed {
        cv = cv.seed(seed).shuffle();
    }

    cv.enumerate()
        .map(|(k, (train, test))| -> Result<f64> {
            let f = learner.fit(&train)?;
            let accuracy = f.score(&test)?;
            info!(fold = k + 1, accuracy, "cross validation fold");
            Ok(accuracy)
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_reports_fold_and_sizes() {
        colored::control::set_override(false);
        let line = banner(2, 8, 4);
        assert_eq!(
            line,
            "  [  2'th fold]    [TRAIN         8]    [TEST         4]"
        );
    }
}
