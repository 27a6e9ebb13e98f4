use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::collections::{BTreeSet, HashMap};
use std::ops::Index;
use std::mem;

use polars::prelude::*;
use rayon::prelude::*;

use crate::error::{Error, Result};
use super::feature::*;


/// The class label of an example.
pub type Label = i64;


/// Struct `Sample` holds a batch of word-count vectors
/// with dense/sparse format.
/// Features are stored column-wise; the `j`-th feature holds
/// the count of the `j`-th word for every document.
#[derive(Debug, Clone)]
pub struct Sample {
    pub(super) name_to_index: HashMap<String, usize>,
    pub(super) features: Vec<Feature>,
    pub(super) target: Vec<Label>,
    pub(super) n_sample: usize,
    pub(super) n_feature: usize,
}


impl Sample {
    /// Construct a dense `Sample` from row vectors.
    /// Pass an empty `target` for an unlabeled sample.
    pub fn from_rows<R>(rows: &[R], target: Vec<Label>) -> Result<Self>
        where R: AsRef<[f64]>,
    {
        let n_sample = rows.len();
        let n_feature = rows.first()
            .map(|row| row.as_ref().len())
            .unwrap_or(0);

        let mut features = (1..=n_feature)
            .map(|k| DenseFeature::new(format!("Feat. [{k}]")))
            .collect::<Vec<_>>();

        for row in rows {
            let row = row.as_ref();
            if row.len() != n_feature {
                return Err(Error::FeatureMismatch {
                    expected: n_feature,
                    got: row.len(),
                });
            }
            for (feat, &x) in features.iter_mut().zip(row) {
                feat.append(x);
            }
        }

        let features = features.into_iter()
            .map(Feature::Dense)
            .collect::<Vec<_>>();

        Self::new(features, target, n_sample)
    }


    /// Convert `polars::DataFrame` and `polars::Series` into `Sample`.
    /// This method takes the ownership for the given pair
    /// `data` and `target`.
    pub fn from_dataframe(data: DataFrame, target: Series) -> Result<Self> {
        let n_sample = data.height();
        let target = target.cast(&DataType::Int64)?;
        let target = target.i64()?
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or(Error::MissingTarget)?;

        let features = data.get_columns()
            .into_par_iter()
            .map(|series|
                DenseFeature::from_series(series).map(Feature::Dense)
            )
            .collect::<Result<Vec<_>>>()?;

        Self::new(features, target, n_sample)
    }


    /// Read a CSV format file to `Sample` type.
    /// The resulting sample has no target;
    /// use [`Sample::set_target`] to pick the label column.
    pub fn from_csv<P>(file: P, has_header: bool) -> Result<Self>
        where P: AsRef<Path>,
    {
        // Open the given `file`.
        let file = File::open(file)?;
        let mut lines = BufReader::new(file).lines().enumerate();

        let mut features: Vec<DenseFeature> = Vec::new();
        if has_header {
            if let Some((_, line)) = lines.next() {
                features = line?.split(',')
                    .map(|name| DenseFeature::new(name.trim()))
                    .collect::<Vec<_>>();
            }
        }
        let mut n_sample = 0_usize;

        // For each line of the file
        for (k, line) in lines {
            let line = line?;
            if line.trim().is_empty() { continue; }

            let xs = line.split(',')
                .map(|x| parse_value(x, k + 1))
                .collect::<Result<Vec<_>>>()?;

            // If the header does not exist,
            // construct a dummy header from the first row.
            if features.is_empty() {
                features = (1..=xs.len())
                    .map(|i| DenseFeature::new(format!("Feat. [{i}]")))
                    .collect::<Vec<_>>();
            }

            if xs.len() != features.len() {
                return Err(Error::Parse {
                    line: k + 1,
                    reason: format!(
                        "expected {} columns, got {}",
                        features.len(),
                        xs.len(),
                    ),
                });
            }

            for (feat, x) in features.iter_mut().zip(xs) {
                feat.append(x);
            }
            n_sample += 1;
        }

        let features = features.into_iter()
            .map(Feature::Dense)
            .collect::<Vec<_>>();

        Self::new(features, Vec::new(), n_sample)
    }


    /// Read a SVMLight format file to `Sample` type.
    ///
    /// Each line of SVMLight format file has the following form:
    /// ```txt
    /// y index:value index: value
    /// ```
    /// where `y` is the class label,
    /// `index` is the feature index, and `value` is the word count
    /// at the feature.
    /// The `i`-th feature (named `Feat. [i]`) holds the values at index `i`,
    /// so the width is the largest index plus one.
    /// Columns are matched by position, not by name:
    /// a test file must use the same indices as the training file.
    ///
    /// **Note**
    /// The SVMLight format file is basically 1-indexed,
    /// while the `sklearn.datasets.dump_svmlight_file` outputs
    /// a svmlight format file with 0-indexed, by default.
    /// For a 1-indexed file, the feature `Feat. [0]` is all zero.
    pub fn from_svmlight<P: AsRef<Path>>(file: P) -> Result<Self> {
        Self::from_svmlight_with_width(file, 0)
    }


    /// Same as [`Sample::from_svmlight`], but the sample has at least
    /// `n_features` features.
    /// Use it to read a test file with the width of the training sample;
    /// the missing trailing columns are all zero.
    pub fn from_svmlight_with_width<P: AsRef<Path>>(
        file: P,
        n_features: usize,
    ) -> Result<Self>
    {
        let mut features: Vec<SparseFeature> = Vec::new();
        let mut target = Vec::new();
        let mut n_sample = 0_usize;

        // Open the given `file`.
        let file = File::open(file)?;
        let lines = BufReader::new(file).lines();

        // For each line of the file
        for (k, line) in lines.enumerate() {
            let line = line?;
            let mut words = line.split_whitespace();
            // The first word corresponds to the target value.
            let y = match words.next() {
                Some(y) => parse_label(y, k + 1)?,
                None => { continue; },
            };
            target.push(y);

            for word in words {
                let (i, x) = index_and_feature(word, k + 1)?;

                while features.len() <= i {
                    features.push(svmlight_feature(features.len()));
                }

                if features[i].sample.last().is_some_and(|(r, _)| *r == n_sample) {
                    return Err(Error::Parse {
                        line: k + 1,
                        reason: format!("index {i} appears twice"),
                    });
                }
                features[i].append((n_sample, x));
            }
            n_sample += 1;
        }

        while features.len() < n_features {
            features.push(svmlight_feature(features.len()));
        }

        let features = features.into_iter()
            .map(Feature::Sparse)
            .collect::<Vec<_>>();

        Self::new(features, target, n_sample)
    }


    /// Assembles a sample and indexes the feature names.
    pub(crate) fn new(
        features: Vec<Feature>,
        target: Vec<Label>,
        n_sample: usize,
    ) -> Result<Self>
    {
        if !target.is_empty() && target.len() != n_sample {
            return Err(Error::ShapeMismatch {
                expected: n_sample,
                got: target.len(),
            });
        }
        let n_feature = features.len();
        let name_to_index = features.iter()
            .enumerate()
            .map(|(i, f)| (f.name().to_string(), i))
            .collect::<HashMap<_, _>>();

        Ok(Self {
            name_to_index, features, target, n_sample, n_feature,
        })
    }


    /// Returns the class labels.
    /// The slice is empty if the sample is unlabeled.
    pub fn target(&self) -> &[Label] {
        &self.target[..]
    }


    /// Returns `true` if every example has a class label.
    pub fn has_target(&self) -> bool {
        self.n_sample > 0 && self.target.len() == self.n_sample
    }


    /// Returns a slice of type `Feature`.
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }


    /// Returns the feature named `name`, if any.
    pub fn feature<S: AsRef<str>>(&self, name: S) -> Option<&Feature> {
        self.name_to_index.get(name.as_ref())
            .map(|&k| &self.features[k])
    }


    /// Returns the feature names in column order.
    pub fn feature_names(&self) -> Vec<&str> {
        self.features.iter()
            .map(|feat| feat.name())
            .collect()
    }


    /// Set the feature of name `target` to `self.target`.
    /// The old value assigned to `self.target` will be dropped.
    /// Every value of the column must be an integer;
    /// otherwise this fails with [`Error::InvalidLabel`],
    /// which names the example (not the file line) holding the value.
    pub fn set_target<S: AsRef<str>>(mut self, target: S) -> Result<Self> {
        let target = target.as_ref();
        let pos = self.features.iter()
            .position(|feat| feat.name() == target)
            .ok_or_else(|| Error::InvalidParameter {
                name: "target",
                reason: format!("no column named `{target}`"),
            })?;


        let column = self.features.remove(pos);
        let labels = (0..self.n_sample)
            .map(|i| {
                let y = column[i];
                if y.fract() == 0.0 && y.is_finite() {
                    Ok(y as Label)
                } else {
                    Err(Error::InvalidLabel { row: i, value: y })
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(mem::take(&mut self.features), labels, self.n_sample)
    }


    /// Returns the pair of the number of examples and
    /// the number of features
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }


    /// Returns the sorted, distinct class labels.
    pub fn classes(&self) -> Vec<Label> {
        self.target.iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }


    /// Returns the feature vector of the `idx`-th example.
    pub fn row(&self, idx: usize) -> Vec<f64> {
        self.features.iter()
            .map(|feat| feat[idx])
            .collect::<Vec<f64>>()
    }


    /// Returns the `idx`-th instance `(x, y)`.
    /// `y` is `None` for an unlabeled sample.
    pub fn at(&self, idx: usize) -> (Vec<f64>, Option<Label>) {
        let x = self.row(idx);
        let y = self.target.get(idx).copied();

        (x, y)
    }


    /// Checks that every value is a valid word count.
    pub fn check_counts(&self) -> Result<()> {
        let invalid = self.features.par_iter()
            .find_map_first(|feat| {
                feat.first_invalid_count()
                    .map(|(row, value)| (feat.name().to_string(), row, value))
            });
        match invalid {
            Some((feature, row, value))
                => Err(Error::InvalidCount { row, feature, value }),
            None => Ok(()),
        }
    }


    /// Returns the sub-sample of the examples `ix`, in the order of `ix`.
    pub fn subset(&self, ix: &[usize]) -> Self {
        let features = self.features.par_iter()
            .map(|feat| feat.subset(ix))
            .collect::<Vec<_>>();
        let target = if self.target.is_empty() {
            Vec::new()
        } else {
            ix.iter().map(|&i| self.target[i]).collect()
        };

        Self {
            name_to_index: self.name_to_index.clone(),
            features,
            target,
            n_sample: ix.len(),
            n_feature: self.n_feature,
        }
    }


    /// Splits the sample into a training/test pair.
    /// The examples `ix[start..end]` form the test sample
    /// and the rest of `ix` forms the training sample.
    pub fn split(&self, ix: &[usize], start: usize, end: usize)
        -> (Sample, Sample)
    {
        let end = end.min(ix.len());
        let start = start.min(end);
        let train_ix = ix[..start].iter()
            .chain(&ix[end..])
            .copied()
            .collect::<Vec<_>>();
        let test_ix = &ix[start..end];

        (self.subset(&train_ix), self.subset(test_ix))
    }
}


fn parse_value(word: &str, line: usize) -> Result<f64> {
    word.trim()
        .parse::<f64>()
        .map_err(|e| Error::Parse { line, reason: format!("`{word}`: {e}") })
}


fn parse_label(word: &str, line: usize) -> Result<Label> {
    let y = parse_value(word, line)?;
    if y.fract() != 0.0 || !y.is_finite() {
        return Err(Error::Parse {
            line,
            reason: format!("class label {y} is not an integer"),
        });
    }
    Ok(y as Label)
}


/// The feature that holds the values at SVMLight index `index`.
fn svmlight_feature(index: usize) -> SparseFeature {
    SparseFeature::new(format!("Feat. [{index}]"))
}


/// Parses an `index:value` pair of a SVMLight line.
pub(self) fn index_and_feature(word: &str, line: usize)
    -> Result<(usize, f64)>
{
    let (i, x) = word.split_once(':')
        .ok_or_else(|| Error::Parse {
            line,
            reason: format!("`{word}` is not of the form `index:value`"),
        })?;
    let i = i.trim()
        .parse::<usize>()
        .map_err(|e| Error::Parse { line, reason: format!("`{i}`: {e}") })?;
    let x = parse_value(x, line)?;

    Ok((i, x))
}



impl<S> Index<S> for Sample
    where S: AsRef<str>
{
    type Output = Feature;


    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        match self.name_to_index.get(name) {
            Some(&k) => &self.features[k],
            None => panic!("The feature `{name}` does not exist"),
        }
    }
}
