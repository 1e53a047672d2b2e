// File: crates/throughput-viz/src/error.rs
// Summary: Error taxonomy: missing input vs. everything else that can go wrong rendering.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The input CSV does not exist. Nothing was written.
    #[error("{} not found", path.display())]
    MissingInput { path: PathBuf },

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl Error {
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Error::MissingInput { .. })
    }
}

/// Any failure after the input was found: parsing, validation, drawing, writing.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("input contains no throughput samples")]
    EmptySeries,

    #[error("non-finite value in data row {row}")]
    NonFinite { row: usize },

    /// Rasterizing, encoding or writing the image failed.
    #[error("{0:#}")]
    Chart(anyhow::Error),
}
