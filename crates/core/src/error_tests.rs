// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    configuration = { ErrorKind::Configuration,   2 },
    environment   = { ErrorKind::Environment,     3 },
    network       = { ErrorKind::NetworkDegraded, 0 },
    step          = { ErrorKind::StepExecution,   1 },
)]
fn kind_exit_codes(kind: ErrorKind, exit_code: i32) {
    assert_eq!(kind.exit_code(), exit_code);
}

#[test]
fn errors_report_their_kind() {
    assert_eq!(PipelineError::Configuration("x".into()).kind(), ErrorKind::Configuration);
    assert_eq!(PipelineError::Environment("x".into()).kind(), ErrorKind::Environment);
    assert_eq!(PipelineError::NetworkDegraded("x".into()).kind(), ErrorKind::NetworkDegraded);
}

#[test]
fn step_execution_keeps_source_message() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "tabix exploded");
    let err = PipelineError::step_execution(io);
    assert_eq!(err.kind(), ErrorKind::StepExecution);
    assert_eq!(err.to_string(), "tabix exploded");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn kind_display() {
    assert_eq!(ErrorKind::StepExecution.to_string(), "step execution");
}
