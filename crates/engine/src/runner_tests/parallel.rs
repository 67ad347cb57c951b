// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parallel queue execution.

use super::*;

fn raw(command: &str) -> Step {
    Step::builder().raw(command).build().unwrap()
}

#[tokio::test]
async fn empty_queue_is_a_no_op() {
    let h = Harness::new();
    let mut runner = h.runner();
    let report = runner.run_queued().await.unwrap();
    assert!(report.items.is_empty());
}

#[tokio::test]
async fn failure_does_not_stop_siblings() {
    let h = Harness::new();
    let mut runner = h.runner();
    runner.add_parallel(Step::parse("echo one > OUT:one.txt").unwrap());
    runner.add_parallel(raw("exit 7"));
    runner.add_parallel(Step::parse("sleep 0.2; echo three > OUT:three.txt").unwrap());
    assert_eq!(runner.queued(), 3);

    let err = runner.run_queued().await.unwrap_err();
    let RunError::BatchFailed { failed, total, report } = err else {
        panic!("expected BatchFailed, got {err:?}");
    };
    assert_eq!((failed, total), (1, 3));
    assert_eq!(report.succeeded().count(), 2);
    assert!(matches!(
        report.items[1].result,
        Err(RunError::StepFailed { exit_code: 7, .. })
    ));
    assert!(h.exists("one.txt"));
    assert!(h.exists("three.txt"));
    assert_eq!(runner.queued(), 0);
}

#[tokio::test]
async fn queued_steps_run_concurrently() {
    let h = Harness::new();
    let mut runner = JobRunner::new(h.config().parallelism(2));
    // Each step waits (bounded) for the other's marker file.
    let rendezvous = |mine: &str, theirs: &str| {
        raw(&format!(
            "touch {mine}; i=0; while [ ! -f {theirs} ] && [ $i -lt 200 ]; do sleep 0.05; i=$((i+1)); done; [ -f {theirs} ]"
        ))
    };
    runner.add_parallel(rendezvous("left.ready", "right.ready"));
    runner.add_parallel(rendezvous("right.ready", "left.ready"));

    let report = runner.run_queued().await.unwrap();
    assert_eq!(report.succeeded().count(), 2);
}

#[tokio::test]
async fn parallelism_of_one_still_runs_everything() {
    let h = Harness::new();
    let mut runner = JobRunner::new(h.config().parallelism(1));
    for name in ["a.txt", "b.txt", "c.txt"] {
        runner.add_parallel(Step::parse(&format!("echo x > OUT:{name}")).unwrap());
    }

    let report = runner.run_queued().await.unwrap();
    assert_eq!(report.items.len(), 3);
    assert_eq!(
        report.items.iter().map(|item| item.step.index).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(h.exists("a.txt") && h.exists("b.txt") && h.exists("c.txt"));
}

#[tokio::test]
async fn missing_output_fails_the_batch() {
    let h = Harness::new();
    let mut runner = h.runner();
    runner.add_parallel(Step::parse("true OUT:never.txt").unwrap());

    let err = runner.run_queued().await.unwrap_err();
    let RunError::BatchFailed { report, .. } = err else {
        panic!("expected BatchFailed, got {err:?}");
    };
    assert!(matches!(report.items[0].result, Err(RunError::MissingOutput { .. })));
}

#[tokio::test]
async fn queued_steps_ignore_fresh_outputs() {
    let h = Harness::new();
    h.touch_aged("release.gz", 10);
    let mut runner = h.runner();
    runner.add_parallel(Step::parse("echo fetched >> runs.log; touch OUT:release.gz").unwrap());

    runner.run_queued().await.unwrap();
    assert_eq!(h.runs(), vec!["fetched"]);
}

#[tokio::test]
async fn dry_run_queue_spawns_nothing() {
    let h = Harness::new();
    let mut runner = JobRunner::new(h.config().dry_run(true));
    runner.add_parallel(Step::parse("echo x > OUT:x.txt").unwrap());

    let report = runner.run_queued().await.unwrap();
    assert!(matches!(report.items[0].result, Ok(None)));
    assert!(!h.exists("x.txt"));
}

#[tokio::test]
async fn queue_decisions_are_logged() {
    let h = Harness::new();
    let mut runner = JobRunner::new(h.config().log_dir(h.path().join("logs")));
    runner.add_parallel(raw("exit 2"));

    let _ = runner.run_queued().await;
    let log = std::fs::read_to_string(h.path().join("logs/parallel.log")).unwrap();
    assert!(log.contains("[step 1 (exit)] queued: exit 2"));
    assert!(log.contains("[step 1 (exit)] failed: "));
}

#[tokio::test]
async fn dry_run_queue_outputs_feed_later_jobs() {
    let h = Harness::new();
    let mut runner = JobRunner::new(h.config().dry_run(true));
    runner.add_parallel(Step::parse("wget url -O OUT:release.gz").unwrap());
    runner.run_queued().await.unwrap();

    let job = job("main", &["zcat IN:release.gz > OUT:table.tsv"]);
    let report = runner.run(&job).await.unwrap();
    assert_eq!(
        report.steps[0].1,
        StepOutcome::WouldRun { reason: StaleReason::UpstreamPending("release.gz".into()) }
    );
    assert!(!h.exists("release.gz"));
}

#[tokio::test]
async fn dry_run_queue_marks_stale_existing_copies() {
    let h = Harness::new();
    h.touch_aged("release.gz", 100);
    h.touch_aged("table.tsv", 50);
    let mut runner = JobRunner::new(h.config().dry_run(true));
    runner.add_parallel(Step::parse("wget url -O OUT:release.gz").unwrap());
    runner.run_queued().await.unwrap();

    let report = runner.run(&job("main", &["zcat IN:release.gz > OUT:table.tsv"])).await.unwrap();
    assert_eq!(report.skipped(), 0);
    assert!(matches!(report.steps[0].1, StepOutcome::WouldRun { .. }));
}
