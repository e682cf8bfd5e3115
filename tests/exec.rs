//! Behavioural tests for the suppressing/converting executor.
//!
//! Cover success passthrough, swallowed failures yielding defaults,
//! conversion into `BusinessError` with the original as source, and failure
//! capture.

use std::error::Error as StdError;

use anyhow::{Result, anyhow, ensure};
use quell::{DEFAULT_MESSAGE, exec};
use rstest::rstest;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("lookup failed: {0}")]
struct LookupError(String);

fn lookup_ok() -> Result<u32, LookupError> {
    Ok(7)
}

fn lookup_broken() -> Result<u32, LookupError> {
    Err(LookupError("index offline".to_owned()))
}

fn sync_broken() -> Result<(), LookupError> {
    Err(LookupError("replica gone".to_owned()))
}

#[test]
fn successful_value_passes_through_unchanged() {
    assert_eq!(exec::get_ignoring(lookup_ok, None, None), Some(7));
}

#[test]
fn successful_raising_run_yields_the_value() -> Result<()> {
    let value = exec::get_raising(lookup_ok, Some("lookup"))?;
    ensure!(value == 7, "expected 7, got {value}");
    Ok(())
}

#[rstest]
#[case(Some(9), Some(9))]
#[case(None, None)]
fn swallowed_failure_yields_the_default(
    #[case] default: Option<u32>,
    #[case] expected: Option<u32>,
) {
    let got = exec::get_ignoring(lookup_broken, default, Some("index lookup"));
    assert_eq!(got, expected);
}

#[test]
fn void_failure_is_swallowed() {
    exec::run_ignoring(sync_broken, Some("replica sync"));
    exec::run_ignoring(sync_broken, None);
}

#[test]
fn raising_failure_carries_message_and_source() -> Result<()> {
    let err = match exec::get_raising(lookup_broken, Some("index lookup")) {
        Ok(value) => return Err(anyhow!("expected failure, got {value}")),
        Err(err) => err,
    };
    ensure!(err.message() == "index lookup", "message: {}", err.message());
    let source = err
        .source()
        .and_then(|source| source.downcast_ref::<LookupError>())
        .ok_or_else(|| anyhow!("expected LookupError source"))?;
    ensure!(source == &LookupError("index offline".to_owned()));
    Ok(())
}

#[test]
fn raising_failure_uses_the_default_text_without_a_message() -> Result<()> {
    let err = match exec::run_raising(sync_broken, None) {
        Ok(()) => return Err(anyhow!("expected failure")),
        Err(err) => err,
    };
    ensure!(err.message() == DEFAULT_MESSAGE, "message: {}", err.message());
    Ok(())
}

#[test]
fn configured_entry_point_honours_the_raise_flag() -> Result<()> {
    let swallowed = exec::get_configured(lookup_broken, Some(1), Some("flagged"), false)?;
    ensure!(swallowed == Some(1));
    ensure!(exec::get_configured(lookup_broken, Some(1), Some("flagged"), true).is_err());
    ensure!(exec::run_configured(sync_broken, None, true).is_err());
    exec::run_configured(sync_broken, None, false)?;
    Ok(())
}

#[test]
fn capture_returns_the_failure_unchanged() {
    let captured = exec::capture(sync_broken);
    assert_eq!(captured, Some(LookupError("replica gone".to_owned())));
    assert_eq!(exec::capture(|| Ok::<(), LookupError>(())), None);
}

#[rstest]
#[case(5, Some(LookupError("too big".to_owned())))]
#[case(2, None)]
fn capture_with_covers_the_one_argument_shape(
    #[case] input: u32,
    #[case] expected: Option<LookupError>,
) {
    let captured = exec::capture_with(input, |n| {
        if n > 3 {
            Err(LookupError("too big".to_owned()))
        } else {
            Ok(())
        }
    });
    assert_eq!(captured, expected);
}
