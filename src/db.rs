use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::harness::RunReport;

/// One row of the `runs` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRun {
    pub run_id: String,
    pub created_at: String,
    pub case_name: String,
    pub case_path: String,
    pub algorithm: String,
    pub parameters: BTreeMap<String, f64>,
    pub fingerprint: String,
    pub cluster_count: usize,
    pub time_to_add: String,
    pub time_to_predict: String,
    pub adjusted_rand_score: Option<f64>,
}

/// One row of the `clusters` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCluster {
    pub index: usize,
    pub center: Vec<f64>,
    pub radius: f64,
    pub instance_count: usize,
}

pub struct ResultsDb {
    conn: Connection,
}

impl ResultsDb {
    /// Create a new in-memory database
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to create in-memory database")?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Open (or create) a database file
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r#"
            CREATE TABLE IF NOT EXISTS runs (
                run_id TEXT PRIMARY KEY,
                created_at TEXT NOT NULL,
                case_name TEXT NOT NULL,
                case_path TEXT NOT NULL,
                algorithm TEXT NOT NULL,
                parameters TEXT NOT NULL,
                fingerprint TEXT NOT NULL,
                cluster_count INTEGER NOT NULL,
                time_to_add TEXT NOT NULL,
                time_to_predict TEXT NOT NULL,
                adjusted_rand_score REAL
            );

            CREATE TABLE IF NOT EXISTS clusters (
                run_id TEXT NOT NULL,
                idx INTEGER NOT NULL,
                center BLOB NOT NULL,
                radius REAL NOT NULL,
                instance_count INTEGER NOT NULL,
                PRIMARY KEY (run_id, idx),
                FOREIGN KEY (run_id) REFERENCES runs(run_id)
            );

            CREATE INDEX IF NOT EXISTS idx_runs_case ON runs(case_name);
            CREATE INDEX IF NOT EXISTS idx_runs_fingerprint ON runs(fingerprint);
            "#,
            )
            .context("Failed to initialize database schema")?;
        Ok(())
    }

    /// Insert a run and whatever cluster summaries it carries
    pub fn insert_report(&self, report: &RunReport) -> Result<()> {
        let parameters = serde_json::to_string(&report.used_algorithm.parameters)
            .context("Failed to serialize parameters")?;
        let run_id = report.run_id.to_string();

        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to begin transaction")?;

        tx.execute(
            "INSERT OR REPLACE INTO runs (run_id, created_at, case_name, case_path, algorithm, parameters, fingerprint, cluster_count, time_to_add, time_to_predict, adjusted_rand_score) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                run_id,
                report.created_at.to_rfc3339(),
                report.test.name,
                report.test.path,
                report.used_algorithm.name,
                parameters,
                report.fingerprint,
                report.cluster_count as i64,
                report.time_to_add,
                report.time_to_predict,
                report.scores.adjusted_rand_score
            ],
        )
        .with_context(|| format!("Failed to insert run: {}", run_id))?;

        for cluster in &report.clusters {
            // f64 little-endian
            let center_bytes: Vec<u8> = cluster.center.iter().flat_map(|f| f.to_le_bytes()).collect();

            tx.execute(
                "INSERT OR REPLACE INTO clusters (run_id, idx, center, radius, instance_count) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    run_id,
                    cluster.index as i64,
                    center_bytes,
                    cluster.radius,
                    cluster.instances.len() as i64
                ],
            )
            .with_context(|| format!("Failed to insert cluster {} of run {}", cluster.index, run_id))?;
        }

        tx.commit().context("Failed to commit run")?;
        Ok(())
    }

    pub fn count_runs(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM runs", [], |row| row.get(0))
            .context("Failed to count runs")?;
        Ok(count as usize)
    }

    /// All runs over a case, oldest first
    pub fn runs_for_case(&self, case_name: &str) -> Result<Vec<StoredRun>> {
        self.query_runs(
            "SELECT run_id, created_at, case_name, case_path, algorithm, parameters, fingerprint, cluster_count, time_to_add, time_to_predict, adjusted_rand_score FROM runs WHERE case_name = ?1 ORDER BY created_at, rowid",
            case_name,
        )
    }

    /// Runs made with an identical engine configuration
    pub fn runs_with_fingerprint(&self, fingerprint: &str) -> Result<Vec<StoredRun>> {
        self.query_runs(
            "SELECT run_id, created_at, case_name, case_path, algorithm, parameters, fingerprint, cluster_count, time_to_add, time_to_predict, adjusted_rand_score FROM runs WHERE fingerprint = ?1 ORDER BY created_at, rowid",
            fingerprint,
        )
    }

    fn query_runs(&self, sql: &str, key: &str) -> Result<Vec<StoredRun>> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .context("Failed to prepare statement")?;

        let rows = stmt
            .query_map(params![key], |row| {
                Ok((
                    StoredRun {
                        run_id: row.get(0)?,
                        created_at: row.get(1)?,
                        case_name: row.get(2)?,
                        case_path: row.get(3)?,
                        algorithm: row.get(4)?,
                        parameters: BTreeMap::new(),
                        fingerprint: row.get(6)?,
                        cluster_count: row.get::<_, i64>(7)? as usize,
                        time_to_add: row.get(8)?,
                        time_to_predict: row.get(9)?,
                        adjusted_rand_score: row.get(10)?,
                    },
                    row.get::<_, String>(5)?,
                ))
            })
            .context("Failed to query runs")?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to collect runs")?;

        rows.into_iter()
            .map(|(mut run, parameters)| {
                run.parameters = serde_json::from_str(&parameters)
                    .with_context(|| format!("Invalid parameters for run {}", run.run_id))?;
                Ok(run)
            })
            .collect()
    }

    /// Cluster summaries stored for a run, by index
    pub fn clusters_for_run(&self, run_id: &str) -> Result<Vec<StoredCluster>> {
        let mut stmt = self
            .conn
            .prepare("SELECT idx, center, radius, instance_count FROM clusters WHERE run_id = ?1 ORDER BY idx")
            .context("Failed to prepare statement")?;

        let clusters = stmt
            .query_map(params![run_id], |row| {
                let center_bytes: Vec<u8> = row.get(1)?;

                // Convert bytes back to Vec<f64>
                let center = center_bytes
                    .chunks_exact(8)
                    .map(|chunk| {
                        let mut buf = [0u8; 8];
                        buf.copy_from_slice(chunk);
                        f64::from_le_bytes(buf)
                    })
                    .collect();

                Ok(StoredCluster {
                    index: row.get::<_, i64>(0)? as usize,
                    center,
                    radius: row.get(2)?,
                    instance_count: row.get::<_, i64>(3)? as usize,
                })
            })
            .context("Failed to query clusters")?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to collect clusters")?;

        Ok(clusters)
    }
}
