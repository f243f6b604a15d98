//! Diagnostics for the analysis phases.
//!
//! Lexing and parsing fail fast: the first error aborts the phase and
//! surfaces as one [`Diagnostic`] carrying a stable [`ErrorCode`], the
//! offending line, and a message naming the offending text. Runtime
//! failures are not diagnostics — they travel as sentinel Error values
//! inside the evaluator.

use std::error::Error;
use std::fmt;

/// Error codes for all analysis diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: lexer errors
/// - E1xxx: parser errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Malformed numeric literal
    E0003,
    /// Operator run not in the profile's operator set
    E0004,

    // Parser errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Unexpected end of input
    E1002,
    /// Expected an identifier
    E1003,
}

impl ErrorCode {
    /// The `E####` code string.
    pub const fn code(self) -> &'static str {
        match self {
            Self::E0001 => "E0001",
            Self::E0002 => "E0002",
            Self::E0003 => "E0003",
            Self::E0004 => "E0004",
            Self::E1001 => "E1001",
            Self::E1002 => "E1002",
            Self::E1003 => "E1003",
        }
    }

    /// Short description of the error class.
    pub const fn description(self) -> &'static str {
        match self {
            Self::E0001 => "unterminated string literal",
            Self::E0002 => "invalid character",
            Self::E0003 => "malformed numeric literal",
            Self::E0004 => "unknown operator",
            Self::E1001 => "unexpected token",
            Self::E1002 => "unexpected end of input",
            Self::E1003 => "expected an identifier",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// How serious a diagnostic is. Analysis only ever emits errors today;
/// warnings exist for hosts that layer lints on top.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// A single analysis failure.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    /// 1-based source line the failure was detected on.
    pub line: u32,
}

impl Diagnostic {
    /// Build an error-severity diagnostic.
    #[must_use]
    pub fn error(code: ErrorCode, message: impl Into<String>, line: u32) -> Self {
        Self {
            code,
            severity: Severity::Error,
            message: message.into(),
            line,
        }
    }

    /// Build a warning-severity diagnostic.
    #[must_use]
    pub fn warning(code: ErrorCode, message: impl Into<String>, line: u32) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            message: message.into(),
            line,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: line {}: {}",
            self.severity.as_str(),
            self.code,
            self.line,
            self.message
        )
    }
}

impl Error for Diagnostic {}
