// Generation-time errors. Every variant is fatal for the run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    /// Maximum arity outside the range the naming scheme supports.
    #[error("invalid maximum arity {value}: expected 1..={max}")]
    InvalidMaxArity { value: i64, max: usize },

    /// A module path option is not a `::`-separated Rust path.
    #[error("invalid module path '{0}'")]
    InvalidPath(String),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A composed artifact does not hold exactly one entry per arity.
    #[error("table inconsistency: {0}")]
    TableInconsistency(String),

    #[error("stale artifacts: {}", display_paths(.0))]
    Stale(Vec<PathBuf>),
}

impl GenError {
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
