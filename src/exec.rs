//! Run a fallible operation and uniformly swallow, convert, or capture its
//! failure.
//!
//! [`run_configured`] and [`get_configured`] are the configurable entry
//! points; the named variants fix the `raise` flag. A swallowed failure
//! produces exactly one console line and yields the default; a converted
//! failure comes back as a [`BusinessError`] and logs nothing.
//!
//! ```
//! use quell::exec;
//!
//! let port = exec::get_ignoring(|| "8080".parse::<u16>(), Some(80), Some("bad port override"));
//! assert_eq!(port, Some(8080));
//! ```

use std::error::Error as StdError;

use crate::console::{Console, Severity};
use crate::error::{BusinessError, DEFAULT_MESSAGE};

/// Single point deciding what happens to a finished operation's failure.
fn settle<T, E>(
    outcome: Result<T, E>,
    default: Option<T>,
    message: Option<&str>,
    raise: bool,
    severity: Severity,
) -> Result<Option<T>, BusinessError>
where
    E: StdError + Send + Sync + 'static,
{
    match outcome {
        Ok(value) => Ok(Some(value)),
        Err(error) => {
            let message = message.unwrap_or(DEFAULT_MESSAGE);
            if raise {
                Err(BusinessError::with_source(message, error))
            } else {
                Console::global().emit(severity, "{}: {}", &[Some(&message), Some(&error)]);
                Ok(default)
            }
        }
    }
}

/// Run a void operation with explicit swallow-or-convert behaviour.
///
/// With `raise` unset, a failure is logged once at `Error` severity using
/// `message` (or the default text) and swallowed.
///
/// # Errors
///
/// With `raise` set, a failure comes back as a [`BusinessError`] carrying
/// `message` and the original error as its source; nothing is logged.
pub fn run_configured<E>(
    op: impl FnOnce() -> Result<(), E>,
    message: Option<&str>,
    raise: bool,
) -> Result<(), BusinessError>
where
    E: StdError + Send + Sync + 'static,
{
    settle(op(), None, message, raise, Severity::Error).map(|_| ())
}

/// Run a value-producing operation with explicit swallow-or-convert
/// behaviour.
///
/// With `raise` unset, a failure is logged once at `Warn` severity and
/// swallowed, yielding `default`.
///
/// # Errors
///
/// With `raise` set, a failure comes back as a [`BusinessError`] carrying
/// `message` and the original error as its source; nothing is logged.
pub fn get_configured<T, E>(
    op: impl FnOnce() -> Result<T, E>,
    default: Option<T>,
    message: Option<&str>,
    raise: bool,
) -> Result<Option<T>, BusinessError>
where
    E: StdError + Send + Sync + 'static,
{
    settle(op(), default, message, raise, Severity::Warn)
}

/// Run `op`, swallowing any failure after logging one line at `Error`
/// severity with `message` or the default text.
pub fn run_ignoring<E>(op: impl FnOnce() -> Result<(), E>, message: Option<&str>)
where
    E: StdError + Send + Sync + 'static,
{
    let _ = run_configured(op, message, false);
}

/// Run `op`; on failure log one `Warn` line and yield `default`.
pub fn get_ignoring<T, E>(
    op: impl FnOnce() -> Result<T, E>,
    default: Option<T>,
    message: Option<&str>,
) -> Option<T>
where
    E: StdError + Send + Sync + 'static,
{
    get_configured(op, default, message, false).unwrap_or_default()
}

/// Run `op`; on failure convert into a [`BusinessError`], without logging.
///
/// # Errors
///
/// Returns the converted failure, with the original error as its source.
pub fn run_raising<E>(
    op: impl FnOnce() -> Result<(), E>,
    message: Option<&str>,
) -> Result<(), BusinessError>
where
    E: StdError + Send + Sync + 'static,
{
    run_configured(op, message, true)
}

/// Run `op`; on success yield its value, on failure convert into a
/// [`BusinessError`], without logging.
///
/// # Errors
///
/// Returns the converted failure, with the original error as its source.
pub fn get_raising<T, E>(
    op: impl FnOnce() -> Result<T, E>,
    message: Option<&str>,
) -> Result<T, BusinessError>
where
    E: StdError + Send + Sync + 'static,
{
    // A raising run only succeeds when a value was produced.
    get_configured(op, None, message, true)?
        .ok_or_else(|| BusinessError::new(message.unwrap_or(DEFAULT_MESSAGE)))
}

/// Run `op` and hand back its failure itself, unchanged; `None` on success.
pub fn capture<E>(op: impl FnOnce() -> Result<(), E>) -> Option<E> {
    op().err()
}

/// One-argument form of [`capture`].
pub fn capture_with<A, E>(arg: A, op: impl FnOnce(A) -> Result<(), E>) -> Option<E> {
    op(arg).err()
}
