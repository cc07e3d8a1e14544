//! Execution state models

use serde::{Deserialize, Serialize};

/// How a pipeline run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    /// Every task completed
    Completed,
    /// A task failed and the run was aborted
    Failed,
}
