#![forbid(unsafe_code)]

//! MiniBayes CLI
//!
//! Command-line interface for the Naive Bayes classifier
//! and the HTML tag stripper.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use minibayes::prelude::*;
use minibayes::{cross_val_score, Format};


const WIDTH: usize = 9;


/// MiniBayes Command-Line Interface
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}


#[derive(Subcommand, Debug)]
enum Command {
    /// Remove every `<TAG>...</TAG>` span from an HTML file, in place
    StripTag {
        /// File to rewrite
        #[arg(default_value = "TP3.html", env = "MINIBAYES_HTML")]
        file: PathBuf,

        /// Tag name to remove
        #[arg(short, long, default_value = "input", env = "MINIBAYES_TAG")]
        tag: String,

        /// Match the tag name ASCII case-insensitively
        #[arg(long)]
        ignore_case: bool,

        /// Print the result instead of overwriting the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Fit a multinomial Naive Bayes classifier
    Fit {
        /// Training file (CSV or SVMLight)
        #[arg(long)]
        train: PathBuf,

        #[command(flatten)]
        data: DataArgs,

        /// Additive smoothing parameter
        #[arg(long, default_value_t = 1.0, env = "MINIBAYES_ALPHA")]
        alpha: f64,

        /// Use a uniform prior instead of the class frequencies
        #[arg(long)]
        uniform_prior: bool,

        /// Where to write the fitted model (JSON)
        #[arg(short, long, env = "MINIBAYES_MODEL")]
        model: Option<PathBuf>,
    },

    /// Report the accuracy of a saved model on a labeled file
    Score {
        /// Test file (CSV or SVMLight)
        #[arg(long)]
        test: PathBuf,

        #[command(flatten)]
        data: DataArgs,

        /// Fitted model (JSON)
        #[arg(short, long, env = "MINIBAYES_MODEL")]
        model: PathBuf,
    },

    /// Run k-fold cross validation
    Cv {
        /// Labeled file (CSV or SVMLight)
        #[arg(long)]
        train: PathBuf,

        #[command(flatten)]
        data: DataArgs,

        /// Additive smoothing parameter
        #[arg(long, default_value_t = 1.0, env = "MINIBAYES_ALPHA")]
        alpha: f64,

        /// Number of folds
        #[arg(long, default_value_t = 5)]
        folds: usize,

        /// Shuffle the examples with this seed
        #[arg(long)]
        seed: Option<u64>,
    },
}


/// How to read a labeled sample.
#[derive(Args, Debug)]
struct DataArgs {
    /// File format; inferred from the extension by default
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Column holding the class label (CSV only)
    #[arg(long, default_value = "class")]
    target: String,

    /// The CSV file has no header row
    #[arg(long)]
    no_header: bool,
}


#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Csv,
    Svmlight,
}


impl DataArgs {
    /// Reads `file`. A SVMLight sample gets at least `n_features` features.
    fn read(&self, file: &Path, n_features: usize) -> Result<Sample> {
        let mut reader = SampleReader::new()
            .file(file)
            .has_header(!self.no_header)
            .target_feature(self.target.as_str())
            .n_features(n_features);
        if let Some(format) = self.format {
            reader = reader.format(match format {
                FormatArg::Csv => Format::Csv,
                FormatArg::Svmlight => Format::SvmLight,
            });
        }
        reader.read()
            .with_context(|| format!("failed to read {}", file.display()))
    }
}


fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::StripTag { file, tag, ignore_case, dry_run } => {
            let stripper = TagStripper::new(&tag)?
                .ignore_case(ignore_case);
            if dry_run {
                let stripped = stripper.preview_file(&file)
                    .with_context(|| format!("failed to strip {}", file.display()))?;
                print!("{}", stripped.text);
            } else {
                let removed = stripper.strip_file(&file)
                    .with_context(|| format!("failed to strip {}", file.display()))?;
                println!(
                    "{}    {}",
                    format!("[{: >WIDTH$}]", file.display()).bold().green(),
                    format!("removed {removed} <{tag}> span(s)").bold(),
                );
            }
        },
        Command::Fit { train, data, alpha, uniform_prior, model } => {
            let sample = data.read(&train, 0)?;
            let f = MultinomialNB::init()
                .alpha(alpha)
                .fit_prior(!uniform_prior)
                .fit(&sample)?;
            let accuracy = f.score(&sample)?;

            let (n_sample, n_feature) = sample.shape();
            println!(
                "{}    {}    {}",
                format!("[SAMPLE {n_sample:>WIDTH$}]").bold().red(),
                format!("[WORDS {n_feature:>WIDTH$}]").bold().yellow(),
                format!("[TRAIN ACC. {accuracy:>WIDTH$.4}]").bold().green(),
            );
            for (y, p) in f.classes().iter().zip(f.priors()) {
                println!("  class {y:>WIDTH$}    prior {p:.4}");
            }

            if let Some(path) = model {
                f.save_json(&path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
        },
        Command::Score { test, data, model } => {
            let f = NBayesClassifier::<Multinomial>::load_json(&model)
                .with_context(|| format!("failed to load {}", model.display()))?;
            let sample = data.read(&test, f.n_features())?;
            let accuracy = f.score(&sample)?;
            println!(
                "{}",
                format!("[TEST ACC. {accuracy:>WIDTH$.4}]").bold().green(),
            );
        },
        Command::Cv { train, data, alpha, folds, seed } => {
            let sample = data.read(&train, 0)?;
            let learner = MultinomialNB::init().alpha(alpha);
            let scores = cross_val_score(&learner, &sample, folds, seed)?;
            for (k, score) in scores.iter().enumerate() {
                println!(
                    "{}    {}",
                    format!("  [{: >3}'th fold]", k + 1).bold().red(),
                    format!("[TEST ACC. {score:>WIDTH$.4}]").bold().yellow(),
                );
            }
            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            println!("{}", format!("  [MEAN ACC. {mean:>WIDTH$.4}]").bold().green());
        },
    }

    Ok(())
}
