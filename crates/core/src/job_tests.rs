// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_job_is_empty() {
    let job = Job::new("clinvar");
    assert_eq!(job.name(), "clinvar");
    assert!(job.is_empty());
    assert_eq!(job.len(), 0);
}

#[test]
fn push_appends_in_order() {
    let mut job = Job::new("j");
    job.push(Step::parse("echo one").unwrap())
        .push(Step::parse("echo two").unwrap());
    job.push_parsed("cat IN:a > OUT:b").unwrap();

    let rendered: Vec<String> = job.steps().iter().map(Step::render).collect();
    assert_eq!(rendered, vec!["echo one", "echo two", "cat a > b"]);
}

#[test]
fn push_parsed_rejects_blank_commands_without_appending() {
    let mut job = Job::new("j");
    job.push_parsed("echo ok").unwrap();
    assert_eq!(job.push_parsed("  ").err(), Some(StepError::EmptyCommand));
    assert_eq!(job.len(), 1);
}

#[test]
fn extend_appends_all_steps() {
    let mut job = Job::new("downloads");
    job.extend(["echo a", "echo b"].iter().map(|t| Step::parse(t).unwrap()));
    assert_eq!(job.len(), 2);
}
