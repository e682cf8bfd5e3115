//! Chainable wrapper over one operation's outcome.
//!
//! Each constructor runs its operation immediately, on the caller's thread,
//! and captures either the produced value or the failure as a [`Fault`]. The
//! outcome is fixed at construction; the chainable methods only inspect or
//! react to it. [`Attempt::or_raise`] is the only chain terminator: with `?`
//! it propagates the failure upward as a [`BusinessError`].

use std::error::Error as StdError;
use std::fmt;

use crate::console::{Console, Severity, format_template};
use crate::error::{BusinessError, Fault};

const VOID_LABEL: &str = "operation failed";
const VALUE_LABEL: &str = "supplier failed";

/// Outcome of one completed operation: a produced value (for the supplier
/// shapes) or a captured [`Fault`].
///
/// The void shapes are `Attempt<()>`. Instances are immutable once built and
/// safe to read from multiple threads.
///
/// ```
/// use quell::Attempt;
/// use std::io;
///
/// let greeting = Attempt::supply(|| Ok::<_, io::Error>("hello".to_owned()))
///     .on_error(|fault| eprintln!("lookup failed: {fault}"))
///     .into_value();
/// assert_eq!(greeting.as_deref(), Some("hello"));
/// ```
#[derive(Debug)]
pub struct Attempt<T = ()> {
    value: Option<T>,
    fault: Option<Fault>,
    label: &'static str,
}

impl Attempt {
    /// Run a void operation and capture its outcome.
    pub fn run<E>(op: impl FnOnce() -> Result<(), E>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        match op() {
            Ok(()) => Self::succeeded((), VOID_LABEL),
            Err(error) => Self::failed(Fault::capture(error), VOID_LABEL),
        }
    }

    /// Run a void operation; on failure store `substitute` instead, with the
    /// original failure attached as its cause.
    pub fn run_substituting<E>(
        op: impl FnOnce() -> Result<(), E>,
        substitute: impl Into<Fault>,
    ) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        match op() {
            Ok(()) => Self::succeeded((), VOID_LABEL),
            Err(error) => Self::failed(substitute.into().with_cause(error), VOID_LABEL),
        }
    }

    /// Run a one-argument void operation and capture its outcome.
    pub fn run_with<A, E>(arg: A, op: impl FnOnce(A) -> Result<(), E>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::run(|| op(arg))
    }
}

impl<T> Attempt<T> {
    fn succeeded(value: T, label: &'static str) -> Self {
        Self {
            value: Some(value),
            fault: None,
            label,
        }
    }

    fn failed(fault: Fault, label: &'static str) -> Self {
        Self {
            value: None,
            fault: Some(fault),
            label,
        }
    }

    /// Run a value-producing operation; success stores the produced value.
    pub fn supply<E>(op: impl FnOnce() -> Result<T, E>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        match op() {
            Ok(value) => Self::succeeded(value, VALUE_LABEL),
            Err(error) => Self::failed(Fault::capture(error), VALUE_LABEL),
        }
    }

    /// One-argument form of [`Attempt::supply`].
    pub fn supply_with<A, E>(arg: A, op: impl FnOnce(A) -> Result<T, E>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::supply(|| op(arg))
    }

    /// React to a recoverable fault.
    ///
    /// A [`FaultKind::Programming`](crate::FaultKind::Programming) fault
    /// skips `handler` and logs a debug diagnostic instead: operations are
    /// not meant to surface the unchecked error kind.
    pub fn on_error(self, handler: impl FnOnce(&Fault)) -> Self {
        if let Some(fault) = &self.fault {
            if fault.is_programming() {
                Console::global().emit(
                    Severity::Debug,
                    "handler skipped for unchecked failure: {}; operations should not surface the unchecked error kind",
                    &[Some(fault)],
                );
            } else {
                handler(fault);
            }
        }
        self
    }

    /// React to a fault whose underlying error is an `E`. No-op otherwise.
    pub fn on_error_of<E>(self, handler: impl FnOnce(&E)) -> Self
    where
        E: StdError + 'static,
    {
        if let Some(error) = self.fault.as_ref().and_then(|fault| fault.downcast_ref::<E>()) {
            handler(error);
        }
        self
    }

    /// React to any fault, regardless of classification.
    pub fn on_any_error(self, handler: impl FnOnce(&Fault)) -> Self {
        if let Some(fault) = &self.fault {
            handler(fault);
        }
        self
    }

    /// Write the fault and its cause chain to standard error.
    pub fn print_trace(self) -> Self {
        if let Some(fault) = &self.fault {
            eprintln!("{fault}");
            let mut source = fault.source();
            while let Some(error) = source {
                eprintln!("Caused by: {error}");
                source = error.source();
            }
        }
        self
    }

    /// Log the fault at `Error` severity with the shape's default prefix.
    pub fn log_error(self) -> Self {
        let label = self.label;
        self.log_error_with(label)
    }

    /// Log the fault at `Error` severity, prefixed with `message`.
    pub fn log_error_with(self, message: &str) -> Self {
        if let Some(fault) = &self.fault {
            Console::global().emit(Severity::Error, "{}: {}", &[Some(&message), Some(fault)]);
        }
        self
    }

    /// Run `action` when the operation succeeded.
    pub fn on_success(self, action: impl FnOnce()) -> Self {
        if self.fault.is_none() {
            action();
        }
        self
    }

    /// Run `action` when the operation failed.
    pub fn on_failure(self, action: impl FnOnce()) -> Self {
        if self.fault.is_some() {
            action();
        }
        self
    }

    /// Convert a captured fault into a [`BusinessError`] and return it,
    /// ending the chain; yields the wrapper back on success.
    ///
    /// ```
    /// use quell::{Attempt, BusinessError};
    ///
    /// fn save() -> Result<(), std::io::Error> {
    ///     Ok(())
    /// }
    ///
    /// fn persist() -> Result<(), BusinessError> {
    ///     Attempt::run(save).or_raise_with("persist failed for {}", &[Some(&"profile")])?;
    ///     Ok(())
    /// }
    /// # assert!(persist().is_ok());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`BusinessError`] whose message is the fault's text and
    /// whose source is the captured fault.
    pub fn or_raise(self) -> Result<Self, BusinessError> {
        self.raise_inner(None)
    }

    /// As [`Attempt::or_raise`], with a message template formatted by the
    /// `{}` placeholder contract of
    /// [`format_template`](crate::format_template).
    ///
    /// # Errors
    ///
    /// Returns a [`BusinessError`] carrying the formatted message and the
    /// captured fault as its source.
    pub fn or_raise_with(
        self,
        template: &str,
        args: &[Option<&dyn fmt::Display>],
    ) -> Result<Self, BusinessError> {
        self.raise_inner(Some(format_template(template, args)))
    }

    fn raise_inner(mut self, message: Option<String>) -> Result<Self, BusinessError> {
        match self.fault.take() {
            Some(fault) => {
                let message = message.unwrap_or_else(|| fault.to_string());
                Err(BusinessError::with_source(message, fault))
            }
            None => Ok(self),
        }
    }

    /// Whether the operation completed without a fault.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.fault.is_none()
    }

    /// The captured fault, when the operation failed.
    #[must_use]
    pub const fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    /// Borrow the produced value.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// The produced value as an owned `Option`.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        self.value
    }

    /// The produced value, or `fallback` when absent.
    #[must_use]
    pub fn value_or(self, fallback: T) -> T {
        self.value.unwrap_or(fallback)
    }
}
