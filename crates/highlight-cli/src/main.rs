//! Highlight — extractive highlight ranking and evaluation runs.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use chrono::Local;
use highlight_core::{HighlightConfig, RunPaths};
use highlight_dataset::{prepare_dataset, JsonlRawSource, PreparedSplits};
use highlight_eval::{EvaluationResult, Evaluator};
use tracing::{debug, info};

mod logging;

const RULE: &str =
    "|-------------------------------------------------------------------------------------------|";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Prepare,
    Evaluate,
}

fn print_help() {
    println!("Highlight — rank article sentences and evaluate extracted highlights");
    println!();
    println!("Usage: highlight <command> [config.json]");
    println!();
    println!("Commands:");
    println!("  prepare [config]         Clean raw articles and build the dataset splits");
    println!("  evaluate [config]        Rank test articles and report ROUGE / similarity / MRR");
    println!("  help                     Show this help message");
    println!();
    println!("Environment overrides: HIGHLIGHT_SEED, HIGHLIGHT_OUTPUT_DIR, HIGHLIGHT_DATASET_PATH,");
    println!("HIGHLIGHT_NUM_HIGHLIGHT, HIGHLIGHT_AGGREGATION");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let command = match args.get(1).map(String::as_str) {
        Some("prepare") => Command::Prepare,
        Some("evaluate") => Command::Evaluate,
        Some("--help" | "-h" | "help") | None => {
            print_help();
            return Ok(());
        }
        Some(other) => {
            eprintln!("Unknown command: {}. Use 'highlight help' for usage.", other);
            std::process::exit(1);
        }
    };

    let config_path = args.get(2).map(Path::new);
    let config = HighlightConfig::load(config_path).context("Failed to load configuration")?;

    let paths = RunPaths::new(&config.output_dir, Local::now());
    paths.create_logs_dir()?;
    logging::init(&paths.logs)?;

    info!("Configuration: {:?}", config);
    info!("The outputs are being saved in {}", paths.root.display());

    match command {
        Command::Prepare => {
            prepare(&config, &paths)?;
        }
        Command::Evaluate => {
            let result = evaluate(&config, &paths)?;
            write_report(&result, &paths.report)?;
        }
    }
    Ok(())
}

fn prepare(config: &HighlightConfig, paths: &RunPaths) -> anyhow::Result<PreparedSplits> {
    info!("##### PREPARING DATASETS #####");
    let source = JsonlRawSource::new(&config.raw_source_dir);
    let splits = prepare_dataset(config, &source, &paths.dataset)?;
    info!(
        "Dataset ready: train={} validation={} test={} sentences",
        splits.train.len(),
        splits.validation.len(),
        splits.test.len()
    );
    info!("{}", RULE);
    Ok(splits)
}

fn evaluate(config: &HighlightConfig, paths: &RunPaths) -> anyhow::Result<EvaluationResult> {
    info!("##### LOADING MODELS #####");
    let relevance = highlight_infer::create_relevance_model(&config.relevance_model_dir)
        .context("Failed to load relevance model")?;
    let embedder = highlight_infer::create_embedder(&config.embedding_model_dir)
        .context("Failed to load embedding model")?;
    info!("{}", RULE);

    let splits = prepare(config, paths)?;

    debug!("##### EXAMPLE DATAPOINT #####");
    if let Some(row) = splits.test.first() {
        debug!("{:?}", row);
    }
    debug!("{}", RULE);

    info!("##### EVALUATING MODEL #####");
    let evaluator = Evaluator::from_config(config, relevance, embedder);
    let result = evaluator.evaluate(&splits.test)?;

    for (name, score) in result.aggregate.metrics() {
        info!("{}: f={:.4} p={:.4} r={:.4}", name, score.f, score.p, score.r);
    }
    info!("Mean semantic similarity: {:.4}", result.mean_similarity);
    info!("Mean reciprocal rank: {:.4}", result.mean_mrr);
    info!("{}", RULE);
    Ok(result)
}

fn write_report(result: &EvaluationResult, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), result)?;
    info!("Report written to {}", path.display());
    Ok(())
}
