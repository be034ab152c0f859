use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ecm_stream::{
    Ecm, EcmConfig, ResultsDb, RunOptions, compute_filename, load_cases, run_case, save_report,
};
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ecm", version, about = "Evolving Clustering Method over streamed vectors")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Cluster one or more cases at one or more thresholds and write result files
    Run(RunArgs),
    /// Print the descriptor of an engine as JSON
    Describe {
        #[arg(long)]
        threshold: f64,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Case file (.json, .csv, .txt) or directory of case files
    #[arg(long = "input", short, required = true)]
    inputs: Vec<PathBuf>,

    /// Distance threshold; repeat to sweep several values
    #[arg(long = "threshold", short, default_values_t = [1000.0, 100.0, 10.0, 250.0])]
    thresholds: Vec<f64>,

    /// Directory for result files
    #[arg(long, short, default_value = "results")]
    out: PathBuf,

    /// Reuse the base filename instead of adding a numeric suffix
    #[arg(long)]
    overwrite: bool,

    /// Treat the last CSV column as the ground-truth label
    #[arg(long)]
    labelled: bool,

    /// Include clusters with their members in each report
    #[arg(long)]
    with_clusters: bool,

    /// Include inputs, ground truth and predicted labels in each report
    #[arg(long)]
    with_inputs: bool,

    /// Feed points in a seeded random order
    #[arg(long)]
    shuffle_seed: Option<u64>,

    /// Also record every run in this SQLite database
    #[arg(long)]
    db: Option<PathBuf>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run(args),
        Command::Describe { threshold } => {
            let ecm = Ecm::new(threshold)?;
            let descriptor = ecm.describe();
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
            println!("fingerprint: {}", descriptor.fingerprint());
            Ok(())
        }
    }
}

fn run(args: RunArgs) -> Result<()> {
    let start_time = Instant::now();

    // Reject bad thresholds before touching any data
    let configs: Vec<EcmConfig> = args.thresholds.iter().map(|&t| EcmConfig::new(t)).collect();
    for config in &configs {
        config.validate()?;
    }

    let mut cases = Vec::new();
    for input in &args.inputs {
        let loaded = load_cases(input, args.labelled)
            .with_context(|| format!("Failed to load cases from {}", input.display()))?;
        cases.extend(loaded);
    }
    info!(cases = cases.len(), thresholds = configs.len(), "loaded cases");

    let db = args.db.as_deref().map(ResultsDb::open).transpose()?;

    let options = RunOptions {
        with_clusters: args.with_clusters,
        with_inputs: args.with_inputs,
        shuffle_seed: args.shuffle_seed,
    };

    let mut written = 0;
    for case in &cases {
        for config in &configs {
            let mut ecm = Ecm::from_config(config)?;
            let report = run_case(&mut ecm, case, &options)?;

            let filename =
                compute_filename(&args.out, &report.used_algorithm, &case.name, args.overwrite);
            let path = args.out.join(&filename);
            save_report(&report, &path)?;
            info!(path = %path.display(), "wrote report");

            if let Some(db) = &db {
                db.insert_report(&report)?;
            }
            written += 1;
        }
    }

    info!(
        reports = written,
        elapsed_secs = start_time.elapsed().as_secs_f64(),
        "done"
    );
    Ok(())
}
