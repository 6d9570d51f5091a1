use std::path::PathBuf;

use thiserror::Error;

use crate::scaffold::ScaffoldId;

pub type Result<T> = std::result::Result<T, SelectError>;

#[derive(Debug, Error)]
pub enum SelectError {
    /// The FASTA file has no record named `scaffold_<N>`.
    #[error("Scaffold {0} nao existente!")]
    ScaffoldNotFound(ScaffoldId),

    #[error("output directory {} already exists", .0.display())]
    OutputDirExists(PathBuf),

    /// An annotation row is too short for a column the selection needs.
    #[error("{}: line {line} has no column {index}", .path.display())]
    MissingColumn {
        path: PathBuf,
        line: u64,
        index: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed annotation file: {0}")]
    Csv(#[from] csv::Error),
}
