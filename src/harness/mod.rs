mod case;
mod report;
mod runner;
mod score;


pub use case::{TestCase, load_cases};
pub use report::{
    ClusterSummary, RunReport, Scores, TestSummary, compute_filename, save_report,
};
pub use runner::{RunOptions, run_case};
pub use score::{ScoreError, adjusted_rand_score};

/// Version tag appended to the algorithm name in result filenames.
pub const RESULTS_VERSION: &str = "v2";
