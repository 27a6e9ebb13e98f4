//! Turns raw text documents into word-count samples.

/// Defines `CountVectorizer`.
mod count_vectorizer;

pub use count_vectorizer::CountVectorizer;
