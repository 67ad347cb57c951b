// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline-level error taxonomy.

use thiserror::Error;

/// Broad classes of pipeline failure, each with its own propagation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing configuration; reported before any work starts.
    Configuration,
    /// A required external tool is absent; reported before any work starts.
    Environment,
    /// A remote freshness query failed; logged and treated as "no update".
    NetworkDegraded,
    /// A step failed or did not produce its outputs.
    StepExecution,
}

crate::simple_display! {
    ErrorKind {
        Configuration => "configuration",
        Environment => "environment",
        NetworkDegraded => "network",
        StepExecution => "step execution",
    }
}

impl ErrorKind {
    /// Process exit code for an error of this kind.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Configuration => 2,
            ErrorKind::Environment => 3,
            ErrorKind::NetworkDegraded => 0,
            ErrorKind::StepExecution => 1,
        }
    }
}

/// Errors surfaced by the pipeline driver.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("environment error: {0}")]
    Environment(String),

    #[error("remote check degraded: {0}")]
    NetworkDegraded(String),

    #[error("{message}")]
    StepExecution {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Configuration(_) => ErrorKind::Configuration,
            PipelineError::Environment(_) => ErrorKind::Environment,
            PipelineError::NetworkDegraded(_) => ErrorKind::NetworkDegraded,
            PipelineError::StepExecution { .. } => ErrorKind::StepExecution,
        }
    }

    pub fn step_execution(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        PipelineError::StepExecution { message: source.to_string(), source: Some(Box::new(source)) }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
