use std::path::PathBuf;

use clap::Parser;

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

pub const DEFAULT_INPUT: &str = "iris.txt";
pub const DEFAULT_DISTANCE_OUTPUT: &str = "distance.txt";
pub const DEFAULT_CORRELATION_OUTPUT: &str = "correlation.txt";

/// Every path a run touches. Built once in `main` and passed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Tab-separated input table.
    pub input_path: PathBuf,
    /// Destination of the Euclidean distance matrix.
    pub distance_output_path: PathBuf,
    /// Destination of the Pearson correlation matrix.
    pub correlation_output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            distance_output_path: PathBuf::from(DEFAULT_DISTANCE_OUTPUT),
            correlation_output_path: PathBuf::from(DEFAULT_CORRELATION_OUTPUT),
        }
    }
}

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(
    version,
    about = "Pairwise Euclidean distance and Pearson correlation between the rows of a TSV table",
    after_help = "Writes distance.txt and correlation.txt to the working directory."
)]
pub struct Cli {
    /// Input table: header line, then `id<TAB>label<TAB>values...` per row
    pub input: Option<PathBuf>,
}

impl Cli {
    /// Overlay the command line onto the defaults.
    pub fn into_config(self) -> Config {
        let mut config = Config::default();
        if let Some(input) = self.input {
            config.input_path = input;
        }
        config
    }
}
