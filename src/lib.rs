// Public API exports
pub mod clusterer;
pub mod db;
pub mod harness;

// Re-export main types for convenience
pub use clusterer::{
    ALGORITHM_NAME, Assignment, Cluster, ClusterStore, Descriptor, EPSILON, Ecm, EcmConfig,
    EcmError, SharedEcm, euclidean_distance,
};

pub use harness::{
    RunOptions, RunReport, ScoreError, TestCase, adjusted_rand_score, compute_filename,
    load_cases, run_case, save_report,
};

pub use db::{ResultsDb, StoredCluster, StoredRun};
