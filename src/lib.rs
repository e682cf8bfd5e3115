//! Functional-style wrappers around fallible operations.
//!
//! Two independent facilities share one console helper:
//!
//! - The [`exec`] functions run an operation and either swallow its failure
//!   after logging one line, convert it into the single unchecked
//!   [`BusinessError`] kind, or hand the failure back for inspection.
//! - [`Attempt`] runs an operation immediately, captures its outcome, and
//!   exposes chainable reaction methods such as [`Attempt::on_error`],
//!   [`Attempt::on_success`], [`Attempt::log_error`], and
//!   [`Attempt::or_raise`].
//!
//! Captured failures carry an explicit [`FaultKind`] tag distinguishing
//! recoverable application errors from the unchecked kind; console output is
//! routed to `tracing` or plain standard output by a process-wide
//! [`Console`] configured once at startup.
//!
//! ```
//! use quell::Attempt;
//! use std::io;
//!
//! let outcome = Attempt::supply(|| Ok::<_, io::Error>(21 * 2))
//!     .on_error(|fault| eprintln!("failed: {fault}"))
//!     .on_success(|| ());
//! assert_eq!(outcome.into_value(), Some(42));
//! ```

pub mod attempt;
pub mod console;
pub mod error;
pub mod exec;

pub use attempt::Attempt;
pub use console::{Console, Severity, format_template};
pub use error::{BoxedError, BusinessError, DEFAULT_MESSAGE, Fault, FaultKind};
