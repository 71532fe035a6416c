//! One-shot runner tests

mod common;

use std::process::Command;

use common::{lines_of, FakeRuntime, ScriptedLlm};
use navigator::cli::{run_once, Console, RUNNER_USAGE};
use navigator::NavigatorError;

#[tokio::test]
async fn test_successful_run_closes_browser() {
    let runtime = FakeRuntime::default();
    let mut console = Console::new(Vec::new());

    let outcome = run_once(&runtime, ScriptedLlm::new(&[]), "read the news", &mut console)
        .await
        .unwrap();

    assert_eq!(outcome.final_result.as_deref(), Some("did read the news"));
    assert_eq!(runtime.launches(), 1);
    assert_eq!(runtime.closes(), 1);
    assert_eq!(
        lines_of(console.into_inner()),
        vec![
            "[runner] Browser started. Provider: scripted, Model: scripted-1",
            "[agent] Running: read the news",
            "[result] did read the news",
        ]
    );
}

#[tokio::test]
async fn test_failed_run_still_closes_browser() {
    let runtime = FakeRuntime::default();
    let mut console = Console::new(Vec::new());

    let err = run_once(&runtime, ScriptedLlm::new(&[]), "fail hard", &mut console)
        .await
        .unwrap_err();

    assert!(matches!(err, NavigatorError::Agent(_)));
    assert_eq!(runtime.closes(), 1);
}

#[tokio::test]
async fn test_run_error_wins_over_close_error() {
    let runtime = FakeRuntime {
        fail_close: true,
        ..Default::default()
    };
    let mut console = Console::new(Vec::new());

    let err = run_once(&runtime, ScriptedLlm::new(&[]), "fail hard", &mut console)
        .await
        .unwrap_err();
    assert!(matches!(err, NavigatorError::Agent(_)));

    let err = run_once(&runtime, ScriptedLlm::new(&[]), "succeed", &mut console)
        .await
        .unwrap_err();
    assert!(matches!(err, NavigatorError::Browser(_)));
    assert_eq!(runtime.closes(), 2);
}

#[test]
fn test_binary_prints_usage_with_too_few_arguments() {
    let output = Command::new(env!("CARGO_BIN_EXE_navigator"))
        .args(["openai", "gpt-4o"])
        // Would fail loudly if anything tried to launch a browser
        .env("NAVIGATOR_BROWSER_BINARY", "/nonexistent/agent-browser")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        RUNNER_USAGE
    );
}

#[test]
fn test_binary_without_arguments_prints_usage() {
    let output = Command::new(env!("CARGO_BIN_EXE_navigator"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("Usage:"));
}
