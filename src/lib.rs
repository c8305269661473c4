//! All-pairs Euclidean distance and Pearson correlation between the rows of a
//! tab-separated table.
//!
//! ```text
//!  table.tsv ──loader──▶ FeatureTable ──metrics──▶ PairwiseMatrices ──output──▶ distance.txt
//!                                                                              correlation.txt
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod output;
pub mod pipeline;

pub use config::Config;
pub use data::loader::{load_matrix, load_table};
pub use data::model::{FeatureRow, FeatureTable};
pub use error::TableError;
pub use metrics::{compute_pairwise, PairwiseMatrices, SquareMatrix};
pub use output::{write_matrix, write_outputs};
pub use pipeline::run;
