//! Error types: the single unchecked wrapping error and captured faults.
//!
//! Every converted failure becomes a [`BusinessError`]; every captured
//! failure becomes a [`Fault`] carrying a [`FaultKind`] classification tag in
//! place of a language-level checked/unchecked type split.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Boxed error type used for captured underlying failures.
pub type BoxedError = Box<dyn StdError + Send + Sync + 'static>;

/// Default text used when a failure is logged or converted without a message.
pub const DEFAULT_MESSAGE: &str = "business exception";

/// The library's single unchecked error kind.
///
/// Produced whenever a captured failure is converted and returned instead of
/// swallowed. Carries the human message and, when one exists, the original
/// failure as its source so the cause chain stays available for diagnosis.
#[derive(Debug, Error)]
#[error("business execution error: {message}")]
pub struct BusinessError {
    message: String,
    #[source]
    source: Option<BoxedError>,
}

impl BusinessError {
    /// Build an error with a message and no underlying cause.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Build an error wrapping `source` as its cause.
    #[must_use]
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxedError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The raw message text, without the display label.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Classification of a captured failure.
///
/// Replaces a checked/unchecked type split with an explicit tag:
/// `Recoverable` failures are ordinary application errors the caller may
/// handle; `Programming` failures mean the operation surfaced the unchecked
/// kind, which recovery handlers are not meant to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Ordinary application failure; recovery handlers run.
    Recoverable,
    /// Unchecked failure; [`Attempt::on_error`](crate::Attempt::on_error)
    /// skips its handler and logs a diagnostic instead.
    Programming,
}

/// A failure captured from a fallible operation.
///
/// Wraps the underlying error together with its [`FaultKind`] tag and, when
/// the failure was substituted, the original cause.
#[derive(Debug)]
pub struct Fault {
    kind: FaultKind,
    error: BoxedError,
    cause: Option<BoxedError>,
}

impl Fault {
    /// Capture `error`, inferring its classification.
    ///
    /// A [`BusinessError`] classifies as [`FaultKind::Programming`]; a
    /// `Fault` that was already captured is reused unchanged; anything else
    /// is [`FaultKind::Recoverable`].
    #[must_use]
    pub fn capture<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let boxed: BoxedError = Box::new(error);
        match boxed.downcast::<Self>() {
            Ok(fault) => *fault,
            Err(other) => {
                let kind = if other.is::<BusinessError>() {
                    FaultKind::Programming
                } else {
                    FaultKind::Recoverable
                };
                Self {
                    kind,
                    error: other,
                    cause: None,
                }
            }
        }
    }

    /// Capture `error` tagged [`FaultKind::Recoverable`].
    #[must_use]
    pub fn recoverable(error: impl Into<BoxedError>) -> Self {
        Self {
            kind: FaultKind::Recoverable,
            error: error.into(),
            cause: None,
        }
    }

    /// Capture `error` tagged [`FaultKind::Programming`].
    #[must_use]
    pub fn programming(error: impl Into<BoxedError>) -> Self {
        Self {
            kind: FaultKind::Programming,
            error: error.into(),
            cause: None,
        }
    }

    /// Attach the failure this fault substituted for.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<BoxedError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Classification tag.
    #[must_use]
    pub const fn kind(&self) -> FaultKind {
        self.kind
    }

    /// Whether this fault is tagged [`FaultKind::Programming`].
    #[must_use]
    pub const fn is_programming(&self) -> bool {
        matches!(self.kind, FaultKind::Programming)
    }

    /// The underlying error, downcast to `E` when it is one.
    #[must_use]
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.error.downcast_ref::<E>()
    }

    /// Consume the fault, handing back the underlying boxed error.
    #[must_use]
    pub fn into_inner(self) -> BoxedError {
        self.error
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl StdError for Fault {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
            .or_else(|| self.error.source())
    }
}

impl From<BusinessError> for Fault {
    fn from(error: BusinessError) -> Self {
        Self::programming(error)
    }
}
