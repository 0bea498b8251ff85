use thiserror::Error;

use crate::phase::Phase;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not parse metadata in {file}: {reason}")]
    Metadata { file: String, reason: String },

    #[error("{file} does not have a 'deployDoc: true' metadatum")]
    Configuration { file: String },

    #[error("Missing required environment variables: {}", .names.join(", "))]
    MissingEnv { names: Vec<String> },

    #[error("Could not finish step {step} in phase {phase}: {detail}")]
    StepExecution {
        phase: Phase,
        step: String,
        detail: String,
    },

    #[error("Failed to clean up the infrastructure: {source}")]
    CleanupFailure { source: Box<Error> },

    #[error("IO error: {context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::Metadata { .. } => "METADATA_ERROR",
            Error::Configuration { .. } => "CONFIG_ERROR",
            Error::MissingEnv { .. } => "MISSING_ENV",
            Error::StepExecution { .. } => "STEP_FAILED",
            Error::CleanupFailure { .. } => "CLEANUP_FAILED",
            Error::Io { .. } => "IO_ERROR",
            Error::Json(_) => "JSON_ERROR",
            Error::Other(_) => "ERROR",
        }
    }

    /// Process exit code for this error.
    ///
    /// The executor returns `Ok(RunOutcome::Failed { .. })` for ordinary
    /// protected-region failures (exit 1 decided by the caller), so the
    /// codes here cover the fatal paths: cleanup failure (2) and missing
    /// environment (3) stay distinguishable from a test failure, and
    /// construction-time problems map to 4.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::StepExecution { .. } => 1,
            Error::CleanupFailure { .. } => 2,
            Error::MissingEnv { .. } => 3,
            Error::Metadata { .. }
            | Error::Configuration { .. }
            | Error::Io { .. }
            | Error::Json(_) => 4,
            Error::Other(_) => 1,
        }
    }
}
