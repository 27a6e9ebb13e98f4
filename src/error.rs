//! Error types shared by the classifier and the tag stripper.

use thiserror::Error;

/// Result type alias for `minibayes` operations.
pub type Result<T> = std::result::Result<T, Error>;


/// Errors that can occur in `minibayes`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The sample has no rows.
    #[error("the sample has no examples")]
    EmptySample,

    /// The sample has no feature columns.
    #[error("the sample has no features")]
    NoFeatures,

    /// An operation needs target labels but the sample has none.
    #[error("the sample has no target labels")]
    MissingTarget,

    /// Two inputs disagree on the number of rows.
    #[error("shape mismatch: expected {expected} rows, got {got}")]
    ShapeMismatch {
        /// Expected row count.
        expected: usize,
        /// Actual row count.
        got: usize,
    },

    /// The sample to predict has a different number of features
    /// than the one the classifier was fitted on.
    #[error("the classifier expects {expected} features, got {got}")]
    FeatureMismatch {
        /// Number of features seen at fit time.
        expected: usize,
        /// Number of features in the given sample.
        got: usize,
    },

    /// A word count is negative, NaN or infinite.
    #[error("invalid count {value} at row {row}, feature `{feature}`")]
    InvalidCount {
        /// Row index.
        row: usize,
        /// Feature name.
        feature: String,
        /// Offending value.
        value: f64,
    },

    /// A hyper-parameter is out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A line of an input file could not be parsed.
    #[error("parse error at line {line}: {reason}")]
    Parse {
        /// 1-indexed line number.
        line: usize,
        /// What went wrong.
        reason: String,
    },

    /// A class label is not an integer.
    #[error("class label {value} of example {row} is not an integer")]
    InvalidLabel {
        /// 0-indexed example (data row) number.
        row: usize,
        /// Offending value.
        value: f64,
    },

    /// A deserialized model is internally inconsistent.
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// The tag name cannot appear in markup.
    #[error("invalid tag name `{0}`")]
    InvalidTagName(String),

    /// An opening tag has no matching closing tag.
    #[error("`<{tag}>` at byte {offset} is never closed")]
    UnclosedTag {
        /// Tag name.
        tag: String,
        /// Byte offset of the opening tag.
        offset: usize,
    },

    /// I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failure while reading a polars data frame.
    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),

    /// Failure while (de)serializing a model.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The tokenizer pattern does not compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}
