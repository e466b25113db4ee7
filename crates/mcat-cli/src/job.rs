//! Parallel line-job harness.
//!
//! Input lines are split into fixed-size chunks and processed on a rayon
//! pool. Every chunk produces its own output lines, [`QualityCounters`] and,
//! for aggregation, its own [`YearTable`]; the partials are merged in chunk
//! order once all workers finish. Only the line at global index 0 is treated
//! as the first line of the input, whichever chunk it lands in.

use anyhow::{Context, Result, ensure};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use mcat_aggregate::{LineAggregator, LineFold, YearTable};
use mcat_model::{AggregationConfig, JobConfig, QualityCounters};
use mcat_transform::{CatalogCleaner, CatalogLine};
use mcat_validate::{ChartLine, ChartValidator};

use crate::logging::redact_value;

/// Cleaned lines of a catalog or chart job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanOutput {
    /// Output lines in input order, header included.
    pub lines: Vec<String>,
    /// Records written, header excluded.
    pub records: usize,
    pub counters: QualityCounters,
}

impl CleanOutput {
    fn merge(&mut self, other: CleanOutput) {
        self.lines.extend(other.lines);
        self.records += other.records;
        self.counters.merge(other.counters);
    }
}

/// Merged year table of an aggregation job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateOutput {
    pub table: YearTable,
    pub counters: QualityCounters,
}

/// Chunked executor for line jobs.
pub struct JobRunner {
    pool: ThreadPool,
    chunk_size: usize,
}

impl JobRunner {
    /// Runner with `chunk_size` lines per work unit and `threads` workers
    /// (`None` for the rayon default).
    pub fn new(chunk_size: usize, threads: Option<usize>) -> Result<Self> {
        ensure!(chunk_size > 0, "chunk size must be at least 1");
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads.unwrap_or(0))
            .build()
            .context("build worker pool")?;
        Ok(Self { pool, chunk_size })
    }

    pub fn from_config(config: &JobConfig) -> Result<Self> {
        Self::new(config.chunk_size, config.threads)
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Clean catalog lines, keeping the header and dropping skipped lines.
    pub fn clean_catalog(&self, lines: &[String], cleaner: &CatalogCleaner) -> CleanOutput {
        let partials = self.map_chunks(lines, |offset, chunk| {
            let mut output = CleanOutput::default();
            for (index, line) in (offset..).zip(chunk) {
                match cleaner.clean_line(line, index == 0, &mut output.counters) {
                    CatalogLine::Header(header) => output.lines.push(header),
                    CatalogLine::Record(fields) => {
                        output.lines.push(cleaner.format_record(&fields));
                        output.records += 1;
                    }
                    CatalogLine::Skipped(reason) => debug!(
                        line = index + 1,
                        %reason,
                        record = redact_value(line),
                        "skipped catalog line"
                    ),
                }
            }
            output
        });
        merge_clean(partials)
    }

    /// Validate chart lines, replacing the first line with the output header.
    pub fn clean_chart(&self, lines: &[String], validator: &ChartValidator) -> CleanOutput {
        let partials = self.map_chunks(lines, |offset, chunk| {
            let mut output = CleanOutput::default();
            for (index, line) in (offset..).zip(chunk) {
                match validator.validate_line(line, index == 0, &mut output.counters) {
                    ChartLine::Header => output.lines.push(validator.header()),
                    ChartLine::Record(record) => {
                        output.lines.push(record.to_line(validator.delimiter()));
                        output.records += 1;
                    }
                    ChartLine::Rejected(reason) => debug!(
                        line = index + 1,
                        %reason,
                        record = redact_value(line),
                        "rejected chart line"
                    ),
                }
            }
            output
        });
        merge_clean(partials)
    }

    /// Fold catalog lines into per-year accumulators.
    pub fn aggregate(
        &self,
        lines: &[String],
        aggregator: &LineAggregator,
        range: AggregationConfig,
    ) -> AggregateOutput {
        let partials = self.map_chunks(lines, |offset, chunk| {
            let mut table = YearTable::new(range);
            let mut counters = QualityCounters::new();
            for (index, line) in (offset..).zip(chunk) {
                match aggregator.fold_line(line, index == 0, &mut table, &mut counters) {
                    LineFold::Ignored | LineFold::Folded { .. } => {}
                    LineFold::OutOfRange { year } => {
                        debug!(line = index + 1, year, "year outside aggregation window");
                    }
                    LineFold::Skipped(reason) => debug!(
                        line = index + 1,
                        %reason,
                        record = redact_value(line),
                        "skipped aggregation line"
                    ),
                }
            }
            AggregateOutput { table, counters }
        });

        partials.into_iter().fold(
            AggregateOutput {
                table: YearTable::new(range),
                counters: QualityCounters::new(),
            },
            |mut merged, partial| {
                merged.table.merge(partial.table);
                merged.counters.merge(partial.counters);
                merged
            },
        )
    }

    /// Run `work` over every chunk; results come back in chunk order.
    fn map_chunks<T, F>(&self, lines: &[String], work: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize, &[String]) -> T + Sync,
    {
        let chunk_size = self.chunk_size;
        self.pool.install(|| {
            lines
                .par_chunks(chunk_size)
                .enumerate()
                .map(|(chunk, lines)| work(chunk * chunk_size, lines))
                .collect()
        })
    }
}

fn merge_clean(partials: Vec<CleanOutput>) -> CleanOutput {
    let mut merged = CleanOutput::default();
    for partial in partials {
        merged.merge(partial);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_rejects_zero_chunk_size() {
        assert!(JobRunner::new(0, None).is_err());
    }

    #[test]
    fn test_first_line_only_in_first_chunk() {
        let runner = JobRunner::new(1, Some(2)).unwrap();
        let input = lines("Date,Song\n2021-01-02,\"A\",B,1,2,1,3\n2021-01-02,\"A\",B,1,2,1,3");
        let output = runner.clean_chart(&input, &ChartValidator::default());
        assert_eq!(output.lines.len(), 3);
        assert_eq!(output.records, 2);
        assert_eq!(output.lines[0], mcat_model::CHART_HEADER);
    }

    #[test]
    fn test_empty_input() {
        let runner = JobRunner::new(4, Some(1)).unwrap();
        let output = runner.clean_catalog(&[], &CatalogCleaner::default());
        assert_eq!(output, CleanOutput::default());
        let summary = runner.aggregate(&[], &LineAggregator::strict(','), AggregationConfig::default());
        assert!(summary.table.is_empty());
        assert!(summary.counters.is_empty());
    }
}
