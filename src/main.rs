use clap::{Parser, Subcommand};
use ingest_eval::config::EvalConfig;
use ingest_eval::render::{ValidationView, render_json};
use ingest_eval::sample::{LogDirSource, SampleSource};
use ingest_eval::simulate::{RecordedSimulator, SimulateResponse};
use ingest_eval::{Result, sniff, validate, value};

use anyhow::Context;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ingest-eval")]
#[command(about = "Score ingest pipeline runs and infer the fields they produce", long_about = None)]
struct Cli {
    /// TOML config file (defaults to $INGEST_EVAL_CONFIG when set).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Root directory with one sub-directory of *.log files per corpus.
    #[arg(long, global = true)]
    samples_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a corpus as JSON, NDJSON or OTHER.
    Sniff {
        #[arg(long)]
        corpus: String,

        /// Samples to inspect (capped at 50).
        #[arg(long)]
        limit: Option<usize>,

        #[arg(short = 'o', long)]
        out: Option<String>,
    },
    /// Score a recorded simulate response against a corpus.
    Validate {
        #[arg(long)]
        corpus: String,

        #[arg(long)]
        pipeline: String,

        #[arg(long)]
        results: String,

        #[arg(short = 'o', long)]
        out: Option<String>,
    },
    /// Build the field catalog from a recorded simulate response.
    Fields {
        #[arg(long)]
        results: String,

        #[arg(short = 'o', long)]
        out: Option<String>,
    },
    /// Merge every sample of a JSON corpus into one combined document.
    Merge {
        #[arg(long)]
        corpus: String,

        #[arg(short = 'o', long)]
        out: Option<String>,
    },
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn write_output(out: Option<&str>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("write output {}", path))?;
            tracing::info!(path, "wrote output");
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = EvalConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.samples_dir {
        config.samples_dir = dir;
    }
    init_tracing(&config.log_level);

    let source = LogDirSource::new(&config.samples_dir);

    match cli.cmd {
        Commands::Sniff { corpus, limit, out } => {
            let verdict =
                sniff::sniff_corpus(&source, &corpus, Some(limit.unwrap_or(config.sniff_limit)))?;
            write_output(out.as_deref(), &render_json(&verdict)?)?;
        }
        Commands::Validate {
            corpus,
            pipeline: pipeline_path,
            results,
            out,
        } => {
            let text = std::fs::read_to_string(&pipeline_path)
                .with_context(|| format!("read pipeline {}", pipeline_path))?;
            let pipeline: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("parse pipeline {}", pipeline_path))?;
            let simulator = RecordedSimulator::from_file(&results)?;

            let run = validate::validate_pipeline(&source, &simulator, &corpus, &pipeline);
            tracing::info!("{}", run.report.summary());
            write_output(out.as_deref(), &render_json(&ValidationView::new(&run))?)?;
        }
        Commands::Fields { results, out } => {
            let text = std::fs::read_to_string(&results)
                .with_context(|| format!("read simulate results {}", results))?;
            let response: SimulateResponse = serde_json::from_str(&text)
                .with_context(|| format!("parse simulate results {}", results))?;

            let fields = response.unique_fields();
            tracing::info!(fields = fields.len(), "extracted unique fields");
            write_output(out.as_deref(), &render_json(&fields)?)?;
        }
        Commands::Merge { corpus, out } => {
            let samples = source.read_samples(&corpus)?;
            let merged = value::merge_samples(&samples)
                .with_context(|| format!("merge samples of corpus {}", corpus))?;
            write_output(out.as_deref(), &render_json(&merged)?)?;
        }
    }

    Ok(())
}
