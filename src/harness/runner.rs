use anyhow::{Context, Result};
use chrono::Utc;
use rand::{SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::clusterer::Ecm;
use crate::harness::{
    TestCase,
    report::{ClusterSummary, RunReport, Scores, TestSummary, format_duration},
    score::adjusted_rand_score,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    /// Include every cluster with its members in the report.
    pub with_clusters: bool,
    /// Echo the inputs, ground truth and predicted labels.
    pub with_inputs: bool,
    /// Feed the inputs in a seeded random order instead of file order.
    pub shuffle_seed: Option<u64>,
}

/// Stream a case through `ecm`, label every input, and score against ground truth.
///
/// Labels are produced in the case's original order even when the stream is shuffled.
pub fn run_case(ecm: &mut Ecm, case: &TestCase, options: &RunOptions) -> Result<RunReport> {
    case.validate()?;

    let mut order: Vec<usize> = (0..case.inputs.len()).collect();
    if let Some(seed) = options.shuffle_seed {
        order.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
    }

    let tic = Instant::now();
    for &i in &order {
        ecm.add(&case.inputs[i])
            .with_context(|| format!("Failed to add input #{} of case '{}'", i, case.name))?;
    }
    let time_to_add = tic.elapsed();

    let tic = Instant::now();
    let predicted = ecm
        .labels(&case.inputs)
        .with_context(|| format!("Failed to label case '{}'", case.name))?;
    let time_to_predict = tic.elapsed();

    let adjusted_rand_score = if case.has_ground_truth() {
        Some(adjusted_rand_score(&case.correct, &predicted)?)
    } else {
        None
    };

    let descriptor = ecm.describe();
    info!(
        case = %case.name,
        algorithm = %descriptor.canonical(),
        clusters = ecm.len(),
        ?adjusted_rand_score,
        "run complete"
    );

    let clusters = if options.with_clusters {
        ecm.clusters()
            .iter()
            .enumerate()
            .map(|(i, c)| ClusterSummary::from_cluster(i, c))
            .collect()
    } else {
        Vec::new()
    };

    Ok(RunReport {
        run_id: Uuid::new_v4(),
        created_at: Utc::now(),
        fingerprint: descriptor.fingerprint(),
        used_algorithm: descriptor,
        test: TestSummary::from_case(case, options.with_inputs),
        time_to_add: format_duration(time_to_add),
        time_to_predict: format_duration(time_to_predict),
        cluster_count: ecm.len(),
        clusters,
        predicted: if options.with_inputs { predicted } else { Vec::new() },
        scores: Scores {
            adjusted_rand_score,
        },
    })
}
