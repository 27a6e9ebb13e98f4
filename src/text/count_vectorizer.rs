use std::collections::{BTreeMap, BTreeSet, HashMap};

use rayon::prelude::*;
use regex::Regex;
use tracing::debug;

use crate::{Sample, Label};
use crate::error::{Error, Result};
use crate::sample::{Feature, SparseFeature};


/// Two or more word characters, as in scikit-learn.
const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";


/// Converts raw documents into a [`Sample`] of word counts.
/// The struct name comes from scikit-learn.
///
/// The vocabulary is the sorted set of tokens seen by
/// [`CountVectorizer::fit`]; the `j`-th feature of the resulting sample
/// counts the `j`-th word.
///
/// # Example
/// ```
/// use minibayes::CountVectorizer;
///
/// let docs = ["good movie", "bad movie, bad plot"];
/// let mut vectorizer = CountVectorizer::new();
/// let sample = vectorizer.fit_transform(&docs[..], vec![1, 0]).unwrap();
/// assert_eq!(sample.shape(), (2, 4));
/// assert_eq!(sample["bad"][1], 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    token_pattern: String,
    lowercase: bool,
    vocabulary: Option<BTreeMap<String, usize>>,
}


impl CountVectorizer {
    /// Construct a new instance of `CountVectorizer`.
    pub fn new() -> Self {
        Self {
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            lowercase: true,
            vocabulary: None,
        }
    }


    /// Set the regular expression a token must match.
    /// Default value is `(?u)\b\w\w+\b`.
    pub fn token_pattern<S: ToString>(mut self, pattern: S) -> Self {
        self.token_pattern = pattern.to_string();
        self
    }


    /// Set whether documents are lowercased before tokenizing.
    /// Default value is `true`.
    pub fn lowercase(mut self, flag: bool) -> Self {
        self.lowercase = flag;
        self
    }


    /// Returns the vocabulary, if fitted.
    pub fn vocabulary(&self) -> Option<&BTreeMap<String, usize>> {
        self.vocabulary.as_ref()
    }


    /// Splits a document into tokens.
    pub fn tokenize(&self, doc: &str) -> Result<Vec<String>> {
        let regex = Regex::new(&self.token_pattern)?;
        Ok(tokens(&regex, doc, self.lowercase))
    }


    /// Learns the vocabulary from `docs`.
    pub fn fit<S>(&mut self, docs: &[S]) -> Result<()>
        where S: AsRef<str> + Sync,
    {
        let regex = Regex::new(&self.token_pattern)?;
        let lowercase = self.lowercase;

        let words = docs.par_iter()
            .map(|doc| tokens(&regex, doc.as_ref(), lowercase))
            .flatten_iter()
            .collect::<BTreeSet<String>>();

        let vocabulary = words.into_iter()
            .enumerate()
            .map(|(j, word)| (word, j))
            .collect::<BTreeMap<_, _>>();

        debug!(
            n_docs = docs.len(),
            n_words = vocabulary.len(),
            "fitted vocabulary"
        );
        self.vocabulary = Some(vocabulary);
        Ok(())
    }


    /// Counts the vocabulary words in each document.
    /// Words outside the vocabulary are ignored.
    /// Pass an empty `target` for unlabeled documents.
    pub fn transform<S>(&self, docs: &[S], target: Vec<Label>)
        -> Result<Sample>
        where S: AsRef<str> + Sync,
    {
        let vocabulary = self.vocabulary.as_ref()
            .ok_or_else(|| Error::InvalidParameter {
                name: "vocabulary",
                reason: "`CountVectorizer::fit` has not been called".into(),
            })?;
        let regex = Regex::new(&self.token_pattern)?;
        let lowercase = self.lowercase;

        let rows = docs.par_iter()
            .map(|doc| {
                let mut counts = HashMap::<usize, f64>::new();
                tokens(&regex, doc.as_ref(), lowercase)
                    .into_iter()
                    .filter_map(|word| vocabulary.get(&word))
                    .for_each(|&j| { *counts.entry(j).or_insert(0.0) += 1.0; });
                counts
            })
            .collect::<Vec<_>>();

        let mut features = vocabulary.keys()
            .map(SparseFeature::new)
            .collect::<Vec<_>>();

        // Rows are visited in order, so each feature stays sorted.
        for (i, counts) in rows.into_iter().enumerate() {
            let mut counts = counts.into_iter().collect::<Vec<_>>();
            counts.sort_by_key(|(j, _)| *j);
            for (j, x) in counts {
                features[j].append((i, x));
            }
        }

        let features = features.into_iter()
            .map(Feature::Sparse)
            .collect::<Vec<_>>();

        Sample::new(features, target, docs.len())
    }


    /// Learns the vocabulary from `docs` and counts the words.
    pub fn fit_transform<S>(&mut self, docs: &[S], target: Vec<Label>)
        -> Result<Sample>
        where S: AsRef<str> + Sync,
    {
        self.fit(docs)?;
        self.transform(docs, target)
    }
}


impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new()
    }
}


fn tokens(regex: &Regex, doc: &str, lowercase: bool) -> Vec<String> {
    let doc = if lowercase { doc.to_lowercase() } else { doc.to_string() };
    regex.find_iter(&doc)
        .map(|m| m.as_str().to_string())
        .collect()
}
