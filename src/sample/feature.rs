use polars::prelude::*;
use std::ops::Index;
use std::slice::Iter;

use crate::error::Result;

const BUF_SIZE: usize = 256;

/// Dense representation of a feature.
#[derive(Debug,Clone)]
pub struct DenseFeature {
    /// Feature name
    pub name: String,
    /// Feature values.
    pub sample: Vec<f64>,
}


/// Sparse representation of a feature.
/// Examples absent from `sample` have the value `0`.
#[derive(Debug,Clone)]
pub struct SparseFeature {
    /// Feature name
    pub name: String,
    /// Pairs of sample index and feature value,
    /// sorted by sample index.
    pub sample: Vec<(usize, f64)>,
}


/// An enumeration of sparse/dense feature.
/// In this crate each feature is a word
/// and each value is the number of times the word occurs in a document.
#[derive(Debug,Clone)]
pub enum Feature {
    /// Dense representation of a feature
    Dense(DenseFeature),
    /// Sparse representation of a feature
    Sparse(SparseFeature),
}


impl Feature {
    /// Returns `true` if this feature is stored sparsely.
    pub fn is_sparse(&self) -> bool {
        match self {
            Self::Dense(_) => false,
            Self::Sparse(_) => true,
        }
    }


    /// Get the feature name.
    pub fn name(&self) -> &str {
        match self {
            Self::Dense(feat) => feat.name(),
            Self::Sparse(feat) => feat.name(),
        }
    }


    /// Returns the number of stored items in this feature.
    /// For a sparse feature, zeros are not counted.
    pub fn len(&self) -> usize {
        match self {
            Self::Dense(feat) => feat.len(),
            Self::Sparse(feat) => feat.len(),
        }
    }


    /// Returns `true` if nothing is stored in this feature.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Dense(feat) => feat.is_empty(),
            Self::Sparse(feat) => feat.is_empty(),
        }
    }


    /// Returns the pairs `(row, value)` of non-zero entries.
    pub fn non_zeros(&self) -> Box<dyn Iterator<Item = (usize, f64)> + '_> {
        match self {
            Self::Dense(feat) => Box::new(
                feat.iter()
                    .copied()
                    .enumerate()
                    .filter(|(_, x)| *x != 0.0)
            ),
            Self::Sparse(feat) => Box::new(feat.iter().copied()),
        }
    }


    /// Returns the first entry that is not a valid word count,
    /// i.e., a negative, NaN or infinite value.
    pub(crate) fn first_invalid_count(&self) -> Option<(usize, f64)> {
        self.non_zeros()
            .find(|(_, x)| !x.is_finite() || *x < 0.0)
    }


    /// Sums the values of this feature per class.
    /// `class_of_row[i]` is the class index of the `i`-th example.
    pub(crate) fn sums_by_class(
        &self,
        class_of_row: &[usize],
        n_classes: usize,
    ) -> Vec<f64>
    {
        let mut sums = vec![0.0_f64; n_classes];
        for (i, x) in self.non_zeros() {
            sums[class_of_row[i]] += x;
        }
        sums
    }


    /// Returns a new feature that holds the examples `ix`,
    /// in the order of `ix`.
    pub(crate) fn subset(&self, ix: &[usize]) -> Self {
        match self {
            Self::Dense(feat) => {
                let sample = ix.iter()
                    .map(|&i| feat.sample[i])
                    .collect();
                Self::Dense(DenseFeature { name: feat.name.clone(), sample })
            },
            Self::Sparse(feat) => {
                let mut sample = ix.iter()
                    .enumerate()
                    .filter_map(|(new, &old)| {
                        let x = feat[old];
                        if x == 0.0 { None } else { Some((new, x)) }
                    })
                    .collect::<Vec<_>>();
                sample.sort_by_key(|(i, _)| *i);
                Self::Sparse(SparseFeature {
                    name: feat.name.clone(),
                    sample,
                })
            },
        }
    }
}


impl DenseFeature {
    /// Construct an empty dense feature with `name`.
    pub fn new<T: ToString>(name: T) -> Self {
        Self {
            name: name.to_string(),
            sample: Vec::with_capacity(BUF_SIZE),
        }
    }


    fn name(&self) -> &str {
        &self.name
    }


    /// Returns an iterator over feature values.
    pub fn iter(&self) -> Iter<'_, f64> {
        self.sample.iter()
    }


    /// Convert `polars::Series` into `DenseFeature`.
    /// Integer columns are cast to `f64`.
    /// Null entries are read as `0`.
    pub fn from_series(series: &Series) -> Result<Self> {
        let name = series.name().to_string();

        let casted = series.cast(&DataType::Float64)?;
        let sample = casted.f64()?
            .into_iter()
            .map(|x| x.unwrap_or(0.0))
            .collect::<Vec<_>>();

        Ok(Self { name, sample, })
    }


    /// Append an example to this feature.
    pub fn append(&mut self, x: f64) {
        self.sample.push(x);
    }


    /// Returns the number of items in `self.sample`.
    pub fn len(&self) -> usize {
        self.sample.len()
    }


    /// Returns `true` if `self.len()` is equals to `0`.
    pub fn is_empty(&self) -> bool {
        self.sample.is_empty()
    }
}


impl SparseFeature {
    /// Construct an empty sparse feature with `name`.
    pub fn new<T: ToString>(name: T) -> Self {
        Self {
            name: name.to_string(),
            sample: Vec::with_capacity(BUF_SIZE),
        }
    }


    /// Append an example to this feature.
    /// Examples must be appended in ascending order of `i`.
    pub fn append(&mut self, (i, x): (usize, f64)) {
        self.sample.push((i, x));
    }


    fn name(&self) -> &str {
        &self.name
    }


    /// Returns an iterator over non-zero feature values.
    pub fn iter(&self) -> Iter<'_, (usize, f64)> {
        self.sample.iter()
    }


    /// Return the number of examples that have non-zero value.
    pub fn len(&self) -> usize {
        self.sample.len()
    }


    /// Returns `true` if `self.len()` is equals to `0`.
    pub fn is_empty(&self) -> bool {
        self.sample.is_empty()
    }
}


impl Index<usize> for Feature {
    type Output = f64;
    fn index(&self, idx: usize) -> &Self::Output {
        match self {
            Self::Dense(feat)  => &feat[idx],
            Self::Sparse(feat) => &feat[idx],
        }
    }
}


impl Index<usize> for DenseFeature {
    type Output = f64;
    fn index(&self, idx: usize) -> &Self::Output {
        &self.sample[idx]
    }
}


impl Index<usize> for SparseFeature {
    type Output = f64;
    fn index(&self, idx: usize) -> &Self::Output {
        match self.sample.binary_search_by(|(i, _)| i.cmp(&idx)) {
            Ok(pos) => &self.sample[pos].1,
            Err(_) => &0.0,
        }
    }
}
