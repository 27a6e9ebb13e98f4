//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of data

use crate::Sample;
use crate::error::{Error, Result};


/// Check whether the training sample is valid or not.
#[inline(always)]
pub(crate) fn check_sample(sample: &Sample) -> Result<()> {
    let (n_sample, n_feature) = sample.shape();


    // `data` and `target` must have the length greater than `0`.
    if n_sample == 0 {
        return Err(Error::EmptySample);
    }


    // `data` must have a feature.
    if n_feature == 0 {
        return Err(Error::NoFeatures);
    }


    // Every example must be labeled.
    if !sample.has_target() {
        return Err(Error::MissingTarget);
    }


    sample.check_counts()
}


/// Check whether `sample` has the expected number of features.
#[inline(always)]
pub(crate) fn check_n_features(sample: &Sample, expected: usize)
    -> Result<()>
{
    let got = sample.shape().1;
    if got != expected {
        return Err(Error::FeatureMismatch { expected, got });
    }
    Ok(())
}


/// Check the smoothing parameter.
#[inline(always)]
pub(crate) fn check_alpha(alpha: f64) -> Result<()> {
    if !alpha.is_finite() || alpha <= 0.0 {
        return Err(Error::InvalidParameter {
            name: "alpha",
            reason: format!("must be a positive finite number, got {alpha}"),
        });
    }
    Ok(())
}


/// Check the number of folds for cross validation.
#[inline(always)]
pub(crate) fn check_n_folds(n_folds: usize, n_sample: usize) -> Result<()> {
    if n_folds < 2 || n_folds > n_sample {
        return Err(Error::InvalidParameter {
            name: "n_folds",
            reason: format!(
                "must be in `2..={n_sample}`, got {n_folds}"
            ),
        });
    }
    Ok(())
}
