use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, ensure};
use tracing::{info, info_span};

use mcat_aggregate::{LineAggregator, SUMMARY_COLUMNS};
use mcat_cli::job::JobRunner;
use mcat_ingest::{check_file_size, read_lines, validate_encoding, write_lines, write_serialized};
use mcat_model::{JobConfig, QualityCounters};
use mcat_transform::{CatalogCleaner, CatalogRules};
use mcat_validate::ChartValidator;

use crate::cli::{AggregateArgs, JobArgs, RulesArgs};
use crate::summary::rules_table;
use crate::types::JobSummary;

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => JobConfig::load(path).context("load job configuration")?,
        None => JobConfig::default(),
    };
    let rules = CatalogRules::with_overrides(&config.rules).context("apply rule overrides")?;
    println!("{}", rules_table(&rules));
    Ok(())
}

pub fn run_clean_catalog(args: &JobArgs) -> Result<JobSummary> {
    let span = info_span!("clean_catalog", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let config = job_config(args)?;
    let rules = CatalogRules::with_overrides(&config.rules).context("apply rule overrides")?;
    let cleaner = CatalogCleaner::new(rules, config.delimiter);
    let runner = JobRunner::from_config(&config)?;

    let lines = load_input(&args.input)?;
    let output = runner.clean_catalog(&lines, &cleaner);
    write_lines(&args.output, &output.lines).context("write cleaned catalog")?;

    finish("clean-catalog", args, lines.len(), output.records, output.counters, start)
}

pub fn run_clean_chart(args: &JobArgs) -> Result<JobSummary> {
    let span = info_span!("clean_chart", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let config = job_config(args)?;
    let validator = ChartValidator::new(config.delimiter);
    let runner = JobRunner::from_config(&config)?;

    let lines = load_input(&args.input)?;
    let output = runner.clean_chart(&lines, &validator);
    write_lines(&args.output, &output.lines).context("write cleaned chart")?;

    finish("clean-chart", args, lines.len(), output.records, output.counters, start)
}

pub fn run_aggregate(args: &AggregateArgs) -> Result<JobSummary> {
    let job = &args.job;
    let span = info_span!(
        "aggregate",
        input = %job.input.display(),
        sanitize = args.sanitize
    );
    let _guard = span.enter();
    let start = Instant::now();

    let config = job_config(job)?;
    ensure!(
        config.delimiter.is_ascii(),
        "summary output needs an ASCII delimiter, got {:?}",
        config.delimiter
    );
    let delimiter = config.delimiter as u8;
    let aggregator = if args.sanitize {
        let rules = CatalogRules::with_overrides(&config.rules).context("apply rule overrides")?;
        LineAggregator::sanitizing(CatalogCleaner::new(rules, config.delimiter))
    } else {
        LineAggregator::strict(config.delimiter)
    };
    let runner = JobRunner::from_config(&config)?;

    let lines = load_input(&job.input)?;
    let output = runner.aggregate(&lines, &aggregator, config.aggregation);
    info!(
        years = output.table.len(),
        records = output.table.record_count(),
        "aggregation complete"
    );
    let rows = output.table.finalize();
    write_serialized(&job.output, &SUMMARY_COLUMNS, &rows, delimiter)
        .context("write yearly summary")?;

    finish("aggregate", job, lines.len(), rows.len(), output.counters, start)
}

/// Configuration file (or defaults) with command line overrides applied.
fn job_config(args: &JobArgs) -> Result<JobConfig> {
    let mut config = match &args.config {
        Some(path) => JobConfig::load(path).context("load job configuration")?,
        None => JobConfig::default(),
    };
    if let Some(delimiter) = args.delimiter {
        config.delimiter = delimiter;
    }
    if let Some(chunk_size) = args.chunk_size {
        config.chunk_size = chunk_size;
    }
    if args.threads.is_some() {
        config.threads = args.threads;
    }
    config.validate().context("invalid job configuration")?;
    Ok(config)
}

fn load_input(path: &Path) -> Result<Vec<String>> {
    check_file_size(path).context("check input size")?;
    validate_encoding(path).context("check input encoding")?;
    let start = Instant::now();
    let lines = read_lines(path).context("read input")?;
    info!(
        path = %path.display(),
        lines = lines.len(),
        duration_ms = start.elapsed().as_millis(),
        "input loaded"
    );
    Ok(lines)
}

fn finish(
    job: &'static str,
    args: &JobArgs,
    lines_read: usize,
    records_written: usize,
    counters: QualityCounters,
    start: Instant,
) -> Result<JobSummary> {
    if let Some(path) = &args.counters_out {
        write_counters(path, &counters)?;
    }
    let elapsed = start.elapsed();
    info!(
        job,
        lines_read,
        records_written,
        issues = counters.total(),
        duration_ms = elapsed.as_millis(),
        "job complete"
    );
    Ok(JobSummary {
        job,
        input: args.input.clone(),
        output: args.output.clone(),
        lines_read,
        records_written,
        counters,
        counters_out: args.counters_out.clone(),
        elapsed,
    })
}

fn write_counters(path: &Path, counters: &QualityCounters) -> Result<()> {
    let json = serde_json::to_string_pretty(counters).context("serialize quality counters")?;
    std::fs::write(path, json)
        .with_context(|| format!("write quality counters to {}", path.display()))?;
    Ok(())
}
