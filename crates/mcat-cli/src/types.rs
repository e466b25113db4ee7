use std::path::PathBuf;
use std::time::Duration;

use mcat_model::QualityCounters;

#[derive(Debug)]
pub struct JobSummary {
    pub job: &'static str,
    pub input: PathBuf,
    pub output: PathBuf,
    pub lines_read: usize,
    pub records_written: usize,
    pub counters: QualityCounters,
    pub counters_out: Option<PathBuf>,
    pub elapsed: Duration,
}
