use std::error::Error;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use taskseq::runner::{RunnerError, TaskRunner};
use taskseq_test_utils::recorder::{Gate, Recorder};
use taskseq_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn test_cancel_lets_running_task_finish_but_skips_next() -> TestResult {
    init_tracing();

    let token = CancellationToken::new();
    let runner = TaskRunner::<String>::new(token.clone());
    let gate = Gate::new();
    let seen = Recorder::new();

    let (g, s) = (gate.clone(), seen.clone());
    runner
        .add(move || async move {
            g.pass().await;
            s.push("task1");
            Ok(())
        })
        .await?;

    let s = seen.clone();
    runner
        .add(move || async move {
            s.push("task2");
            Ok(())
        })
        .await?;

    with_timeout(gate.wait_started()).await;
    token.cancel();
    gate.release();

    let outcome = with_timeout(runner.wait()).await;
    assert!(matches!(outcome, Err(RunnerError::Cancelled)));
    assert_eq!(seen.snapshot(), vec!["task1"]);
    Ok(())
}

#[tokio::test]
async fn test_precancelled_token_runs_nothing() -> TestResult {
    init_tracing();

    let token = CancellationToken::new();
    token.cancel();

    let runner = TaskRunner::<String>::new(token);
    let seen = Recorder::new();
    for i in 0..3u32 {
        let seen = seen.clone();
        runner
            .add(move || async move {
                seen.push(i);
                Ok(())
            })
            .await?;
    }

    let outcome = with_timeout(runner.wait()).await;
    assert!(outcome.as_ref().is_err_and(RunnerError::is_cancelled));
    assert!(seen.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_cancellation_with_nothing_left_to_start_is_success() -> TestResult {
    init_tracing();

    let token = CancellationToken::new();
    let runner = TaskRunner::<String>::new(token.clone());
    let gate = Gate::new();
    let seen = Recorder::new();

    let (g, s) = (gate.clone(), seen.clone());
    runner
        .add(move || async move {
            s.push("only");
            g.pass().await;
            Ok(())
        })
        .await?;

    with_timeout(gate.wait_started()).await;
    token.cancel();
    gate.release();

    // No task was prevented from starting, so this is not a cancellation.
    with_timeout(runner.wait()).await?;
    assert_eq!(seen.snapshot(), vec!["only"]);
    Ok(())
}

#[tokio::test]
async fn test_runner_never_cancels_the_token_itself() -> TestResult {
    init_tracing();

    let token = CancellationToken::new();
    let runner = TaskRunner::<String>::new(token.clone());
    runner.add(|| async { Err("failed".to_string()) }).await?;

    let outcome = with_timeout(runner.wait()).await;
    assert!(matches!(outcome, Err(RunnerError::Task(_))));
    assert!(!token.is_cancelled());
    Ok(())
}

#[tokio::test]
async fn test_dropping_runner_without_wait_stops_queued_tasks() -> TestResult {
    init_tracing();

    let runner = TaskRunner::<String>::new(CancellationToken::new());
    let gate = Gate::new();
    let seen = Recorder::new();

    let (g, s) = (gate.clone(), seen.clone());
    runner
        .add(move || async move {
            g.pass().await;
            s.push("running");
            Ok(())
        })
        .await?;
    let s = seen.clone();
    runner
        .add(move || async move {
            s.push("queued");
            Ok(())
        })
        .await?;

    with_timeout(gate.wait_started()).await;
    drop(runner);
    gate.release();

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(seen.snapshot(), vec!["running"]);
    Ok(())
}

#[tokio::test]
async fn test_dropped_wait_keeps_runner_going_and_outcome_observable() -> TestResult {
    init_tracing();

    let runner = TaskRunner::<String>::new(CancellationToken::new());
    let gate = Gate::new();
    let seen = Recorder::new();

    let (g, s) = (gate.clone(), seen.clone());
    runner
        .add(move || async move {
            g.pass().await;
            s.push("task1");
            Ok(())
        })
        .await?;
    let s = seen.clone();
    runner
        .add(move || async move {
            s.push("task2");
            Ok(())
        })
        .await?;

    with_timeout(gate.wait_started()).await;
    let first = tokio::time::timeout(Duration::from_millis(20), runner.wait()).await;
    assert!(first.is_err(), "first wait should time out while task1 is held");

    gate.release();

    with_timeout(runner.wait()).await?;
    assert_eq!(seen.snapshot(), vec!["task1", "task2"]);

    let again = with_timeout(runner.wait()).await;
    assert!(matches!(again, Err(RunnerError::Finalized)));
    Ok(())
}
