use thiserror::Error;

use crate::model::ColumnId;

/// Errors emitted while loading the grid configuration.
#[derive(Debug, Error)]
pub enum GridConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Column {0} is configured more than once.")]
    DuplicateColumn(ColumnId),
    #[error("Primary column {0} is not configured.")]
    UnknownPrimaryColumn(ColumnId),
    #[error("Seed row references unknown column {0}.")]
    UnknownSeedColumn(ColumnId),
}
