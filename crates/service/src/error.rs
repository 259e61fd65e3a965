//! Typed errors for the bootstrap and teardown flows.

use std::fmt;

use thiserror::Error;
use votereg_core::CoreError;
use votereg_storage::StorageError;

/// Service-layer error unifying storage, schema and CSV failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    #[error("schema: {0}")]
    Schema(#[from] CoreError),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the bootstrap currently is. Transitions are strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapPhase {
    Idle,
    ConnectingAdmin,
    CreatingDatabase,
    ConnectingTarget,
    EnsuringSchema,
    StreamingCsv,
    Loading,
    Done,
}

impl BootstrapPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ConnectingAdmin => "connecting to admin database",
            Self::CreatingDatabase => "creating database",
            Self::ConnectingTarget => "connecting to target database",
            Self::EnsuringSchema => "ensuring schema",
            Self::StreamingCsv => "streaming csv",
            Self::Loading => "loading records",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for BootstrapPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal bootstrap failure, tagged with the phase it happened in.
#[derive(Debug, Error)]
#[error("bootstrap failed while {phase}: {source}")]
pub struct BootstrapError {
    pub phase: BootstrapPhase,
    #[source]
    pub source: ServiceError,
}

impl BootstrapError {
    pub(crate) fn at(phase: BootstrapPhase) -> impl FnOnce(ServiceError) -> Self {
        move |source| Self { phase, source }
    }

    /// Whether the run stopped before any row was written.
    pub fn aborted_before_import(&self) -> bool {
        !matches!(self.phase, BootstrapPhase::Loading | BootstrapPhase::Done)
    }
}
