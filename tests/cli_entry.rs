// tests/cli_entry.rs

use std::error::Error;
use std::fs;

use clap::Parser;

use taskseq::cli::{CliArgs, LogLevel};
use taskseq::logging::resolve_level;
use taskseq::run;
use taskseq_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn args_for(config: &std::path::Path) -> CliArgs {
    CliArgs {
        config: config.display().to_string(),
        queue_length: None,
        log_level: None,
        dry_run: false,
    }
}

#[test]
fn test_cli_parses_all_flags() {
    let args = CliArgs::try_parse_from([
        "taskseq",
        "--config",
        "steps.toml",
        "--queue-length",
        "3",
        "--log-level",
        "debug",
        "--dry-run",
    ])
    .unwrap();

    assert_eq!(args.config, "steps.toml");
    assert_eq!(args.queue_length, Some(3));
    assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    assert!(args.dry_run);
}

#[test]
fn test_cli_defaults() {
    let args = CliArgs::try_parse_from(["taskseq"]).unwrap();
    assert_eq!(args.config, "Taskseq.toml");
    assert_eq!(args.queue_length, None);
    assert!(args.log_level.is_none());
    assert!(!args.dry_run);
}

#[test]
fn test_log_level_resolution_order() {
    assert_eq!(
        resolve_level(Some(LogLevel::Trace), Some("error")),
        tracing::Level::TRACE
    );
    assert_eq!(resolve_level(None, Some(" WARNING ")), tracing::Level::WARN);
    assert_eq!(resolve_level(None, Some("loud")), tracing::Level::INFO);
    assert_eq!(resolve_level(None, None), tracing::Level::INFO);
}

#[tokio::test]
async fn test_run_executes_steps_from_file() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let out = dir.path().join("out/complete.txt");
    let config = dir.path().join("Taskseq.toml");
    fs::write(
        &config,
        format!(
            r#"
[[step]]
name = "mark complete"
kind = "write"
path = "{}"
contents = "done"
"#,
            out.display()
        ),
    )?;

    run(args_for(&config)).await?;
    assert_eq!(fs::read_to_string(&out)?, "done");
    Ok(())
}

#[tokio::test]
async fn test_dry_run_executes_nothing() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let out = dir.path().join("never.txt");
    let config = dir.path().join("Taskseq.toml");
    fs::write(
        &config,
        format!(
            r#"
[[step]]
name = "never"
kind = "write"
path = "{}"
"#,
            out.display()
        ),
    )?;

    let mut args = args_for(&config);
    args.dry_run = true;
    run(args).await?;
    assert!(!out.exists());
    Ok(())
}

#[tokio::test]
async fn test_run_reports_failing_step_and_zero_queue_length() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let config = dir.path().join("Taskseq.toml");
    fs::write(
        &config,
        r#"
[[step]]
name = "fails"
kind = "command"
cmd = "sh"
args = ["-c", "exit 2"]
"#,
    )?;

    let err = run(args_for(&config)).await.expect_err("failing step");
    let chain = format!("{err:?}");
    assert!(chain.contains("did not complete"));
    assert!(chain.contains("step 'fails' failed"));

    let mut args = args_for(&config);
    args.queue_length = Some(0);
    let err = run(args).await.expect_err("zero queue length");
    assert!(err.to_string().contains("--queue-length must be >= 1"));
    Ok(())
}
