//! Console sink and `{}` template formatting shared by the executor and the
//! [`Attempt`](crate::Attempt) wrapper.
//!
//! Lines go either to the `tracing` subscriber or, by default, to standard
//! output as `SEVERITY ==> message`. The destination and the minimum severity
//! are process-wide: install a [`Console`] once at startup and it is read-only
//! thereafter.

use std::fmt;
use std::sync::OnceLock;

const DIRECTOR: &str = " ==> ";

static GLOBAL: OnceLock<Console> = OnceLock::new();

/// Message and threshold severity for console output.
///
/// Ordered `Debug < Info = Warn < Error < Fatal < Off`; `Info` and `Warn`
/// share a rank. `Fatal` and `Off` act as thresholds only: a message at
/// either severity is never emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Developer diagnostics.
    Debug,
    /// Routine progress notes.
    Info,
    /// Swallowed failures from value-producing operations.
    Warn,
    /// Swallowed failures from void operations, and logged faults.
    Error,
    /// Threshold-only: suppresses everything except `Fatal` messages, of
    /// which there are none.
    Fatal,
    /// Threshold-only: suppresses all output.
    Off,
}

impl Severity {
    /// Rank used for threshold comparison. `Info` and `Warn` are equal.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Debug => 10,
            Self::Info | Self::Warn => 30,
            Self::Error => 40,
            Self::Fatal => 50,
            Self::Off => u8::MAX,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
            Self::Off => "OFF",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Destination and minimum severity for library log lines.
#[derive(Debug, Clone)]
pub struct Console {
    structured: bool,
    threshold: Severity,
}

impl Default for Console {
    /// Plain standard output with a `Debug` threshold.
    fn default() -> Self {
        Self::plain(Severity::Debug)
    }
}

impl Console {
    /// Build a console printing plain lines to standard output.
    #[must_use]
    pub const fn plain(threshold: Severity) -> Self {
        Self {
            structured: false,
            threshold,
        }
    }

    /// Build a console routing lines to the `tracing` subscriber.
    #[must_use]
    pub const fn structured(threshold: Severity) -> Self {
        Self {
            structured: true,
            threshold,
        }
    }

    /// Install `self` as the process-wide console.
    ///
    /// The first installation wins; later calls leave the existing console in
    /// place and return `false`. Configure once at startup, before the
    /// library is used from multiple threads.
    pub fn install(self) -> bool {
        GLOBAL.set(self).is_ok()
    }

    /// The installed console, or the default when none was installed.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::default)
    }

    /// Whether a message at `severity` passes the threshold.
    ///
    /// `Fatal` and `Off` messages never pass, whatever the threshold.
    #[must_use]
    pub fn should_emit(&self, severity: Severity) -> bool {
        matches!(
            severity,
            Severity::Debug | Severity::Info | Severity::Warn | Severity::Error
        ) && self.threshold.rank() <= severity.rank()
    }

    /// The plain-output line that [`Console::emit`] would print, or `None`
    /// when the severity is filtered out.
    #[must_use]
    pub fn render(
        &self,
        severity: Severity,
        template: &str,
        args: &[Option<&dyn fmt::Display>],
    ) -> Option<String> {
        self.should_emit(severity)
            .then(|| format!("{severity}{DIRECTOR}{}", format_template(template, args)))
    }

    /// Emit one line at `severity` to the configured destination.
    pub fn emit(&self, severity: Severity, template: &str, args: &[Option<&dyn fmt::Display>]) {
        if !self.should_emit(severity) {
            return;
        }
        if self.structured {
            let message = format_template(template, args);
            match severity {
                Severity::Debug => tracing::debug!("{message}"),
                Severity::Info => tracing::info!("{message}"),
                Severity::Warn => tracing::warn!("{message}"),
                Severity::Error => tracing::error!("{message}"),
                Severity::Fatal | Severity::Off => {}
            }
        } else if let Some(line) = self.render(severity, template, args) {
            println!("{line}");
        }
    }
}

/// Replace `{}` placeholders in `template` left to right with the display
/// form of each argument.
///
/// A `None` argument substitutes to the empty string. Placeholders without a
/// matching argument stay literal; arguments without a matching placeholder
/// are ignored.
///
/// ```
/// use quell::format_template;
///
/// assert_eq!(format_template("a{}b{}c", &[Some(&"X")]), "aXb{}c");
/// assert_eq!(format_template("{}-{}", &[None, Some(&"Y")]), "-Y");
/// ```
#[must_use]
pub fn format_template(template: &str, args: &[Option<&dyn fmt::Display>]) -> String {
    let mut out = String::new();
    let mut rest = template;
    for arg in args {
        let Some(at) = rest.find("{}") else {
            break;
        };
        let (head, tail) = rest.split_at(at);
        out.push_str(head);
        if let Some(value) = arg {
            out.push_str(&value.to_string());
        }
        rest = tail.split_at(2).1;
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::{Console, Severity, format_template};
    use rstest::rstest;
    use std::fmt::Display;

    // Case expressions are bound outside the call, so each argument needs an
    // explicit `&dyn Display` cast rather than relying on unsize coercion.
    #[rstest]
    #[case("plain text", &[], "plain text")]
    #[case("a{}b{}c", &[Some(&"X" as &dyn Display)], "aXb{}c")]
    #[case("{}-{}", &[None, Some(&"Y" as &dyn Display)], "-Y")]
    #[case("{} {}", &[Some(&1 as &dyn Display), Some(&2 as &dyn Display)], "1 2")]
    #[case("{}", &[Some(&"a" as &dyn Display), Some(&"b" as &dyn Display)], "a")]
    #[case("no holes", &[Some(&"a" as &dyn Display)], "no holes")]
    fn substitutes_placeholders(
        #[case] template: &str,
        #[case] args: &[Option<&dyn Display>],
        #[case] expected: &str,
    ) {
        assert_eq!(format_template(template, args), expected);
    }

    #[test]
    fn info_and_warn_share_a_rank() {
        assert_eq!(Severity::Info.rank(), Severity::Warn.rank());
        assert!(Severity::Debug.rank() < Severity::Info.rank());
        assert!(Severity::Warn.rank() < Severity::Error.rank());
        assert!(Severity::Error.rank() < Severity::Fatal.rank());
        assert!(Severity::Fatal.rank() < Severity::Off.rank());
    }

    #[rstest]
    #[case(Severity::Debug, Severity::Debug, true)]
    #[case(Severity::Warn, Severity::Info, true)]
    #[case(Severity::Error, Severity::Warn, false)]
    #[case(Severity::Off, Severity::Error, false)]
    fn threshold_filters_messages(
        #[case] threshold: Severity,
        #[case] message: Severity,
        #[case] expected: bool,
    ) {
        assert_eq!(Console::plain(threshold).should_emit(message), expected);
    }

    #[rstest]
    #[case(Severity::Fatal)]
    #[case(Severity::Off)]
    fn fatal_and_off_messages_are_never_emitted(#[case] severity: Severity) {
        assert!(!Console::plain(Severity::Debug).should_emit(severity));
        assert!(
            Console::plain(Severity::Debug)
                .render(severity, "ignored", &[])
                .is_none()
        );
    }

    #[test]
    fn renders_severity_and_director() {
        let line = Console::plain(Severity::Debug).render(
            Severity::Error,
            "lookup failed for {}",
            &[Some(&"profile")],
        );
        assert_eq!(line.as_deref(), Some("ERROR ==> lookup failed for profile"));
    }

    #[test]
    fn first_installation_wins() {
        assert!(Console::structured(Severity::Warn).install());
        assert!(!Console::plain(Severity::Debug).install());
        assert!(!Console::global().should_emit(Severity::Debug));
        assert!(Console::global().should_emit(Severity::Warn));
    }
}
