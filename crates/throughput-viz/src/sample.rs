// File: crates/throughput-viz/src/sample.rs
// Summary: Throughput data model and CSV loading.

use std::fs::File;
use std::io;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, RenderError};

pub const TIME_COLUMN: &str = "time_seconds";
pub const COUNT_COLUMN: &str = "messages_per_10_seconds";

/// Messages counted in one 10-second bucket.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ThroughputSample {
    pub time_seconds: f64,
    pub messages_per_10_seconds: f64,
}

/// Samples in file order. Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct ThroughputSeries {
    samples: Vec<ThroughputSample>,
}

impl ThroughputSeries {
    pub fn new(samples: Vec<ThroughputSample>) -> Result<Self, RenderError> {
        if samples.is_empty() {
            return Err(RenderError::EmptySeries);
        }
        Ok(Self { samples })
    }

    /// Parse CSV with a header row. Columns are matched by name; extra columns are ignored.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, RenderError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        for column in [TIME_COLUMN, COUNT_COLUMN] {
            if !headers.iter().any(|h| h == column) {
                return Err(RenderError::MissingColumn(column));
            }
        }

        let mut samples: Vec<ThroughputSample> = Vec::new();
        for (i, record) in rdr.deserialize::<ThroughputSample>().enumerate() {
            let sample = record?;
            let row = i + 1;
            if !sample.time_seconds.is_finite() || !sample.messages_per_10_seconds.is_finite() {
                return Err(RenderError::NonFinite { row });
            }
            if let Some(prev) = samples.last() {
                if sample.time_seconds < prev.time_seconds {
                    warn!(row, time_seconds = sample.time_seconds, previous = prev.time_seconds, "time_seconds decreases; keeping file order");
                }
            }
            samples.push(sample);
        }
        debug!(rows = samples.len(), "parsed throughput CSV");
        Self::new(samples)
    }

    pub fn samples(&self) -> &[ThroughputSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Arithmetic mean of `messages_per_10_seconds`.
    pub fn average(&self) -> f64 {
        let sum: f64 = self.samples.iter().map(|s| s.messages_per_10_seconds).sum();
        sum / self.samples.len() as f64
    }

    /// (time_seconds, messages_per_10_seconds) pairs for plotting.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| (s.time_seconds, s.messages_per_10_seconds))
            .collect()
    }
}

/// Load a series from `path`. A missing file is reported as [`Error::MissingInput`].
pub fn load_series(path: &Path) -> Result<ThroughputSeries, Error> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::MissingInput { path: path.to_path_buf() });
        }
        Err(source) => {
            return Err(RenderError::Io { path: path.to_path_buf(), source }.into());
        }
    };
    Ok(ThroughputSeries::from_reader(io::BufReader::new(file))?)
}
