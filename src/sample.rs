//! Struct `Sample` represents a batch of word-count vectors.

// Provides feature struct.
pub(crate) mod feature;
// Provides sample struct.
pub(crate) mod sample_struct;

// Provides a struct that reads a file.
pub(crate) mod sample_reader;


pub use sample_reader::{SampleReader, Format};
pub use sample_struct::{Sample, Label};
pub use feature::{Feature, DenseFeature, SparseFeature};
