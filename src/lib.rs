#![warn(missing_docs)]

//!
//! A crate that provides two small text utilities.
//!
//! - Multinomial Naive Bayes
//!     [`MultinomialNB`] fits an [`NBayesClassifier`] on a [`Sample`]
//!     of word counts.
//!     The prior of a class is its document frequency and
//!     the conditional probability of a word given a class is
//!     estimated with additive (Laplace) smoothing.
//!     Documents can be turned into word counts by [`CountVectorizer`],
//!     and a learner can be evaluated by [`cross_val_score`].
//!
//!
//! - HTML tag stripping
//!     [`TagStripper`] removes every `<tag>...</tag>` span of a tag name
//!     from a text or, in place, from a file.
//!
//! # Example
//! ```
//! use minibayes::prelude::*;
//!
//! let docs = [
//!     "a great and fun movie",
//!     "great acting, fun plot",
//!     "a boring and bad movie",
//!     "bad acting, boring plot",
//! ];
//! let mut vectorizer = CountVectorizer::new();
//! let sample = vectorizer.fit_transform(&docs[..], vec![1, 1, 0, 0]).unwrap();
//!
//! let f = MultinomialNB::init().fit(&sample).unwrap();
//! assert_eq!(f.predict_all(&sample).unwrap(), vec![1, 1, 0, 0]);
//! assert_eq!(f.score(&sample).unwrap(), 1.0);
//! ```

pub mod error;
pub mod sample;
pub mod classifier;
pub mod naive_bayes;
pub mod text;
pub mod research;
pub mod html;
pub mod prelude;

pub(crate) mod common;


pub use error::{Error, Result};

pub use sample::{Sample, SampleReader, Format, Feature, Label};

pub use classifier::{Classifier, Learner};

pub use naive_bayes::{
    MultinomialNB,
    NBayesClassifier,
    Multinomial,
    Probability,
};

pub use text::CountVectorizer;

pub use research::{CrossValidation, cross_val_score};

pub use html::{TagStripper, Stripped, strip_tag, strip_tag_in_file};
