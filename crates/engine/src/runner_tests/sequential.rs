// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential job execution and up-to-date skipping.

use super::*;

const COPY: &str = "cat IN:a > OUT:b; echo copy >> runs.log";

#[tokio::test]
async fn second_run_skips_up_to_date_step() {
    let h = Harness::new();
    h.touch_aged("a", 100);
    let runner = h.runner();
    let job = job("main", &[COPY]);

    let first = runner.run(&job).await.unwrap();
    assert_eq!(first.ran(), 1);
    assert_eq!(first.steps[0].1.reason(), Some(&StaleReason::MissingOutput("b".into())));
    assert_eq!(std::fs::read_to_string(h.path().join("b")).unwrap(), "a");

    let second = runner.run(&job).await.unwrap();
    assert_eq!(second.skipped(), 1);
    assert_eq!(second.ran(), 0);
    assert_eq!(h.runs(), vec!["copy"]);
}

#[tokio::test]
async fn newer_input_reruns_step_once() {
    let h = Harness::new();
    h.touch_aged("a", 100);
    let runner = h.runner();
    let job = job("main", &[COPY]);
    runner.run(&job).await.unwrap();

    h.bump("a", 100);
    let report = runner.run(&job).await.unwrap();
    assert_eq!(
        report.steps[0].1.reason(),
        Some(&StaleReason::OlderThanInput { output: "b".into(), input: "a".into() })
    );
    assert_eq!(h.runs().len(), 2);
}

#[tokio::test]
async fn missing_declared_output_stops_the_job() {
    let h = Harness::new();
    h.touch_aged("a", 100);
    let job = job(
        "main",
        &["cat IN:a > OUT:b", "true OUT:c", "cat IN:c > OUT:d; echo third >> runs.log"],
    );

    let err = h.runner().run(&job).await.unwrap_err();
    match err {
        RunError::MissingOutput { step, path, .. } => {
            assert_eq!(step.index, 2);
            assert_eq!(path, PathBuf::from("c"));
        }
        other => panic!("expected MissingOutput, got {other:?}"),
    }
    assert!(h.exists("b"));
    assert!(!h.exists("d"));
    assert!(h.runs().is_empty());
}

#[tokio::test]
async fn missing_input_fails_before_spawning() {
    let h = Harness::new();
    let job = job("main", &["cat IN:nope > OUT:b; echo ran >> runs.log"]);

    let err = h.runner().run(&job).await.unwrap_err();
    assert!(
        matches!(&err, RunError::MissingInput { path, .. } if path == Path::new("nope")),
        "got {err:?}"
    );
    assert!(!h.exists("b"));
    assert!(h.runs().is_empty());
}

#[tokio::test]
async fn non_zero_exit_reports_code_and_stops() {
    let h = Harness::new();
    let mut job = Job::new("main");
    job.push(Step::builder().raw("exit 3").extra_output("never").build().unwrap());
    job.push_parsed("echo after > OUT:after").unwrap();

    let err = h.runner().run(&job).await.unwrap_err();
    match &err {
        RunError::StepFailed { step, command, exit_code } => {
            assert_eq!(step.index, 1);
            assert_eq!(command, "exit 3");
            assert_eq!(*exit_code, 3);
        }
        other => panic!("expected StepFailed, got {other:?}"),
    }
    assert!(!h.exists("after"));
}

#[tokio::test]
async fn step_without_outputs_runs_every_time() {
    let h = Harness::new();
    let runner = h.runner();
    let job = job("main", &["echo tick >> runs.log"]);

    runner.run(&job).await.unwrap();
    runner.run(&job).await.unwrap();
    assert_eq!(h.runs(), vec!["tick", "tick"]);
}

#[tokio::test]
async fn dry_run_spawns_nothing_and_marks_downstream_steps() {
    let h = Harness::new();
    h.touch_aged("a", 100);
    let runner = JobRunner::new(h.config().dry_run(true));
    let job = job("main", &["cp IN:a OUT:b; echo one >> runs.log", "cp IN:b OUT:c"]);

    let report = runner.run(&job).await.unwrap();
    assert_eq!(
        report.steps.iter().map(|(_, o)| o.clone()).collect::<Vec<_>>(),
        vec![
            StepOutcome::WouldRun { reason: StaleReason::MissingOutput("b".into()) },
            StepOutcome::WouldRun { reason: StaleReason::UpstreamPending("b".into()) },
        ]
    );
    assert!(!h.exists("b"));
    assert!(!h.exists("c"));
    assert!(h.runs().is_empty());
}

#[tokio::test]
async fn dry_run_still_skips_up_to_date_steps() {
    let h = Harness::new();
    h.touch_aged("a", 100);
    h.touch_aged("b", 50);
    let runner = JobRunner::new(h.config().dry_run(true));

    let report = runner.run(&job("main", &["cp IN:a OUT:b"])).await.unwrap();
    assert_eq!(report.skipped(), 1);
}

#[tokio::test]
async fn force_reruns_fresh_steps() {
    let h = Harness::new();
    h.touch_aged("a", 100);
    h.touch_aged("b", 50);
    let runner = JobRunner::new(h.config().force(true));

    let report = runner.run(&job("main", &[COPY])).await.unwrap();
    assert_eq!(report.steps[0].1.reason(), Some(&StaleReason::Forced));
    assert_eq!(h.runs(), vec!["copy"]);
}

#[tokio::test]
async fn newer_definition_source_reruns_steps() {
    let h = Harness::new();
    h.touch_aged("a", 100);
    h.touch_aged("b", 50);
    h.touch_aged("pipeline.toml", 10);
    let source = h.path().join("pipeline.toml");
    let runner = JobRunner::new(h.config().definition_source(source.clone()));

    let report = runner.run(&job("main", &[COPY])).await.unwrap();
    assert_eq!(
        report.steps[0].1.reason(),
        Some(&StaleReason::OlderThanDefinition { output: "b".into(), source })
    );
}

#[tokio::test]
async fn decisions_are_written_to_the_run_log() {
    let h = Harness::new();
    h.touch_aged("a", 100);
    let runner = JobRunner::new(h.config().log_dir(h.path().join("logs")));
    let job = job("main", &[COPY]);

    runner.run(&job).await.unwrap();
    runner.run(&job).await.unwrap();

    let log = std::fs::read_to_string(h.path().join("logs/main.log")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 3, "log was:\n{log}");
    assert!(lines[0].contains("[step 1 (cat)] running (b is missing): cat a > b"));
    assert!(lines[1].contains("[step 1 (cat)] finished in "));
    assert!(lines[2].contains("[step 1 (cat)] skipped (up to date)"));
}

#[tokio::test]
async fn pipefail_surfaces_failures_inside_pipelines() {
    if cv_adapters::ToolLocator::from_env().find("bash").is_none() {
        return;
    }
    let h = Harness::new();
    let strict = JobRunner::new(h.config().shell("bash").pipefail(true));
    let err = strict.run(&job("main", &["false | cat > OUT:strict"])).await.unwrap_err();
    assert!(matches!(err, RunError::StepFailed { exit_code: 1, .. }), "got {err:?}");

    let lenient = JobRunner::new(h.config().shell("bash").pipefail(false));
    lenient.run(&job("main", &["false | cat > OUT:lenient"])).await.unwrap();
    assert!(h.exists("lenient"));
}
