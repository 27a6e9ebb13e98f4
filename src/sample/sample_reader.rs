use std::path::Path;

use crate::error::{Error, Result};
use super::sample_struct::Sample;


/// The file formats [`SampleReader`] understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Comma separated values. One column holds the class label.
    Csv,
    /// `label index:count index:count ...` lines.
    SvmLight,
}


/// A struct that returns [`Sample`].
/// Using this struct, one can read a CSV/SVMLIGHT format file to [`Sample`].
/// Other formats are not supported yet.
/// # Example
/// The following code is a simple example to read a CSV file.
/// ```no_run
/// use minibayes::SampleReader;
/// let filename = "/path/to/csv/file.csv";
/// let sample = SampleReader::new()
///     .file(filename)
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
/// ```
pub struct SampleReader<P, S> {
    file: Option<P>,
    has_header: bool,
    target: Option<S>,
    format: Option<Format>,
    n_features: usize,
}


impl<P, S> SampleReader<P, S> {
    /// Construct a new instance of [`SampleReader`].
    pub fn new() -> Self {
        Self {
            file: None,
            has_header: false,
            target: None,
            format: None,
            n_features: 0,
        }
    }


    /// Set the flag whether the file has the header row or not.
    /// Default is `false.`
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }


    /// Set the file format.
    /// By default, files ending with `.csv` are read as CSV
    /// and everything else as SVMLight.
    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }


    /// Set the minimum number of features of a SVMLight sample.
    /// Pass the width of a fitted classifier
    /// to read a test file whose largest index is smaller
    /// than that of the training file.
    /// CSV files ignore it.
    /// Default is `0.`
    pub fn n_features(mut self, n_features: usize) -> Self {
        self.n_features = n_features;
        self
    }
}


impl<P, S> Default for SampleReader<P, S> {
    fn default() -> Self {
        Self::new()
    }
}


impl<P, S> SampleReader<P, S>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }
}


impl<P, S> SampleReader<P, S>
    where S: AsRef<str>
{
    /// Set the column name that is used for the class label.
    /// Only CSV files need it.
    pub fn target_feature(mut self, column: S) -> Self {
        self.target = Some(column);
        self
    }
}



impl<P, S> SampleReader<P, S>
    where P: AsRef<Path>,
          S: AsRef<str>
{
    /// Reads the file based on the arguments.
    /// This method consumes `self.`
    pub fn read(self) -> Result<Sample> {
        let file = self.file
            .ok_or_else(|| Error::InvalidParameter {
                name: "file",
                reason: "the file name for csv/svmlight is not set".into(),
            })?;
        let file = file.as_ref();

        let format = self.format.unwrap_or_else(|| {
            if file.extension().is_some_and(|ext| ext == "csv") {
                Format::Csv
            } else {
                Format::SvmLight
            }
        });

        match format {
            Format::Csv => {
                let target = self.target
                    .ok_or_else(|| Error::InvalidParameter {
                        name: "target",
                        reason: "the class column of a CSV file \
                            is not specified".into(),
                    })?;
                Sample::from_csv(file, self.has_header)?
                    .set_target(target.as_ref())
            },
            Format::SvmLight => {
                Sample::from_svmlight_with_width(file, self.n_features)
            },
        }
    }
}
