use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// A stream of points to cluster, with optional ground-truth labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub inputs: Vec<Vec<f64>>,
    #[serde(default)]
    pub correct: Vec<i64>,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// On-disk JSON shapes: a bare array of points, or a full case object.
#[derive(Deserialize)]
#[serde(untagged)]
enum CaseFile {
    Points(Vec<Vec<f64>>),
    Full(TestCase),
}

impl TestCase {
    pub fn new(name: impl Into<String>, inputs: Vec<Vec<f64>>) -> Self {
        Self {
            inputs,
            correct: Vec::new(),
            path: String::new(),
            name: name.into(),
            description: String::new(),
        }
    }

    pub fn with_correct(mut self, correct: Vec<i64>) -> Self {
        self.correct = correct;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn has_ground_truth(&self) -> bool {
        !self.correct.is_empty()
    }

    /// Ground truth, when present, must label every input.
    pub fn validate(&self) -> Result<()> {
        if self.has_ground_truth() && self.correct.len() != self.inputs.len() {
            bail!(
                "Case '{}' has {} inputs but {} ground-truth labels",
                self.name,
                self.inputs.len(),
                self.correct.len()
            );
        }
        Ok(())
    }

    /// Load a `.json` case file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read case file {}", path.display()))?;
        let parsed: CaseFile = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse case file {}", path.display()))?;

        let mut case = match parsed {
            CaseFile::Points(inputs) => TestCase::new("", inputs),
            CaseFile::Full(case) => case,
        };
        case.fill_from_path(path);
        case.validate()?;
        Ok(case)
    }

    /// Load a comma-separated file with one point per line.
    ///
    /// When `labelled` is set the last column is the ground-truth label.
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_csv_file(path: &Path, labelled: bool) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read case file {}", path.display()))?;

        let mut inputs = Vec::new();
        let mut correct = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields: Vec<&str> = line.split(',').map(str::trim).collect();

            if labelled {
                let label = fields.pop().unwrap_or_default();
                let label: i64 = label.parse().with_context(|| {
                    format!("{}:{}: invalid label '{}'", path.display(), line_no + 1, label)
                })?;
                correct.push(label);
            }

            let point = fields
                .iter()
                .map(|f| {
                    f.parse::<f64>().with_context(|| {
                        format!("{}:{}: invalid number '{}'", path.display(), line_no + 1, f)
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            inputs.push(point);
        }

        let mut case = TestCase::new("", inputs).with_correct(correct);
        case.fill_from_path(path);
        case.validate()?;
        Ok(case)
    }

    /// Pick a loader by file extension.
    pub fn from_path(path: &Path, labelled: bool) -> Result<Self> {
        match extension(path).as_deref() {
            Some("json") => Self::from_json_file(path),
            Some("csv") | Some("txt") => Self::from_csv_file(path, labelled),
            _ => bail!("Unsupported case file: {}", path.display()),
        }
    }

    fn fill_from_path(&mut self, path: &Path) {
        self.path = path.display().to_string();
        if self.name.is_empty() {
            self.name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
        }
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
}

/// Load one case file, or every `.json`/`.csv`/`.txt` file below a directory
/// (sorted by path).
pub fn load_cases(path: &Path, labelled: bool) -> Result<Vec<TestCase>> {
    if !path.is_dir() {
        return Ok(vec![TestCase::from_path(path, labelled)?]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).follow_links(true) {
        let entry = entry
            .with_context(|| format!("Failed to read directory entry under {}", path.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file = entry.into_path();
        if matches!(extension(&file).as_deref(), Some("json" | "csv" | "txt")) {
            files.push(file);
        }
    }
    files.sort();

    debug!(dir = %path.display(), count = files.len(), "discovered case files");

    files
        .iter()
        .map(|p| TestCase::from_path(p, labelled))
        .collect()
}
