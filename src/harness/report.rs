use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

use crate::clusterer::{Cluster, Descriptor};
use crate::harness::{RESULTS_VERSION, TestCase};

/// Case metadata echoed into a report. Inputs and labels are only filled in on request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSummary {
    pub name: String,
    pub path: String,
    pub description: String,
    #[serde(default)]
    pub inputs: Vec<Vec<f64>>,
    #[serde(default)]
    pub correct: Vec<i64>,
}

impl TestSummary {
    pub fn from_case(case: &TestCase, with_inputs: bool) -> Self {
        Self {
            name: case.name.clone(),
            path: case.path.clone(),
            description: case.description.clone(),
            inputs: if with_inputs { case.inputs.clone() } else { Vec::new() },
            correct: if with_inputs { case.correct.clone() } else { Vec::new() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    #[serde(rename = "#")]
    pub index: usize,
    pub center: Vec<f64>,
    pub radius: f64,
    pub instances: Vec<Vec<f64>>,
}

impl ClusterSummary {
    pub fn from_cluster(index: usize, cluster: &Cluster) -> Self {
        Self {
            index,
            center: cluster.center().to_vec(),
            radius: cluster.radius(),
            instances: cluster.instances().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    #[serde(
        rename = "sklearn.metrics.cluster.adjusted_rand_score",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub adjusted_rand_score: Option<f64>,
}

/// Everything recorded about one engine run over one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "used algorithm")]
    pub used_algorithm: Descriptor,
    pub fingerprint: String,
    pub test: TestSummary,
    #[serde(rename = "time to add")]
    pub time_to_add: String,
    #[serde(rename = "time to predict")]
    pub time_to_predict: String,
    #[serde(rename = "cluster count")]
    pub cluster_count: usize,
    #[serde(default)]
    pub clusters: Vec<ClusterSummary>,
    #[serde(default)]
    pub predicted: Vec<usize>,
    pub scores: Scores,
}

impl RunReport {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read report {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse report {}", path.display()))
    }
}

pub(crate) fn format_duration(duration: Duration) -> String {
    format!("{:.4} seconds", duration.as_secs_f64())
}

/// Result filename for a run: `"<case> ; <algorithm> v2 = k=v;k=v.json"`.
///
/// Path separators in the case name become `_`, so the file always lands
/// directly inside `base`. Unless `overwrite` is set, `_0`, `_1`, ... is
/// appended to the stem until the name is free.
pub fn compute_filename(
    base: &Path,
    descriptor: &Descriptor,
    case_name: &str,
    overwrite: bool,
) -> String {
    let wanted = format!(
        "{} ; {} {} = {}",
        case_name.replace(['/', '\\'], "_"),
        descriptor.name,
        RESULTS_VERSION,
        descriptor.parameter_parts().join(";")
    );
    let mut proposed = format!("{}.json", wanted);

    if !overwrite {
        let mut extra = 0;
        while base.join(&proposed).exists() {
            proposed = format!("{}_{}.json", wanted, extra);
            extra += 1;
        }
    }

    proposed
}

/// Write a report as pretty JSON, creating parent directories as needed.
pub fn save_report(report: &RunReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    fs::write(path, json).with_context(|| format!("Failed to write report {}", path.display()))?;
    Ok(())
}
