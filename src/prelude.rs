//! Exports the standard learners, classifiers and traits.
//!
pub use crate::classifier::{
    // Traits
    Learner,
    Classifier,
};


pub use crate::naive_bayes::{
    // Naive Bayes
    MultinomialNB,
    NBayesClassifier,
    Multinomial,
};


pub use crate::sample::{
    Sample,
    SampleReader,
    Label,
};


pub use crate::text::CountVectorizer;


pub use crate::html::TagStripper;
