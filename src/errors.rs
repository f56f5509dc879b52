//! Theoria Error Handling - Unified Encapsulated API
//!
//! One error type for the whole enumeration pipeline, with a hard split
//! between recoverable (branch-local) and fatal (enumeration-wide)
//! failures. Drivers must consult [`TheoryError::is_recoverable`] before
//! deciding whether to skip a branch or abort the search.

use std::fmt;

use miette::Diagnostic;

/// The single error type - no wrapper, no variants, just essential data
#[derive(Debug)]
pub struct TheoryError {
    /// What went wrong (type-specific data)
    pub kind: ErrorKind,
    /// How to help (auto-populated based on the kind)
    pub help: Option<String>,
    /// Stable diagnostic code, e.g. `theoria::materialize::could_not_generate`
    pub error_code: String,
}

/// All error types as a clean enum - no duplicate fields
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    // Materialization errors - recoverable, local to one search branch
    CouldNotGenerateValue {
        candidate: String,
    },

    // Supplier-resolution errors - fatal to the enclosing enumeration
    UnknownSupplier {
        id: String,
    },
    SupplierInstantiation {
        id: String,
        reason: String,
    },

    // Fixture declaration errors - fatal, surfaced before enumeration starts
    InvalidFixture {
        fixture: String,
        reason: String,
    },
}

/// Failure tier: determines whether a driver skips the current branch or
/// aborts enumeration for the whole theory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Skip this branch, continue exploring siblings.
    Recoverable,
    /// No candidate list can be obtained at all; stop the search.
    Fatal,
}

impl ErrorKind {
    /// Get the error category for driver decisions and test assertions
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CouldNotGenerateValue { .. } => ErrorCategory::Recoverable,

            Self::UnknownSupplier { .. }
            | Self::SupplierInstantiation { .. }
            | Self::InvalidFixture { .. } => ErrorCategory::Fatal,
        }
    }

    /// Get error code suffix for diagnostic codes
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::CouldNotGenerateValue { .. } => "could_not_generate",
            Self::UnknownSupplier { .. } => "unknown_supplier",
            Self::SupplierInstantiation { .. } => "supplier_instantiation",
            Self::InvalidFixture { .. } => "invalid_fixture",
        }
    }

    /// Pipeline phase the error belongs to, used in diagnostic codes.
    pub const fn phase(&self) -> &'static str {
        match self {
            Self::CouldNotGenerateValue { .. } => "materialize",
            Self::UnknownSupplier { .. } | Self::SupplierInstantiation { .. } => "supply",
            Self::InvalidFixture { .. } => "fixture",
        }
    }
}

impl TheoryError {
    /// Create an error from a kind, deriving its diagnostic code and help.
    pub fn new(kind: ErrorKind) -> Self {
        let error_code = format!("theoria::{}::{}", kind.phase(), kind.code_suffix());
        let help = match &kind {
            ErrorKind::CouldNotGenerateValue { .. } => Some(
                "this is branch-local: discard the current combination and \
                 continue with the remaining candidates"
                    .to_string(),
            ),
            ErrorKind::UnknownSupplier { id } => Some(format!(
                "register a factory for '{}' on the SupplierRegistry before running",
                id
            )),
            ErrorKind::SupplierInstantiation { .. } => None,
            ErrorKind::InvalidFixture { .. } => None,
        };
        Self {
            kind,
            help,
            error_code,
        }
    }

    /// A candidate's deferred evaluation yielded no value while absence
    /// was disallowed. `candidate` is the candidate's fixed description.
    pub fn could_not_generate(candidate: impl Into<String>) -> Self {
        Self::new(ErrorKind::CouldNotGenerateValue {
            candidate: candidate.into(),
        })
    }

    /// Attribute metadata names a supplier id with no registered factory.
    pub fn unknown_supplier(id: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownSupplier { id: id.into() })
    }

    /// A registered supplier factory failed to construct its supplier.
    pub fn supplier_instantiation(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::SupplierInstantiation {
            id: id.into(),
            reason: reason.into(),
        })
    }

    /// The fixture declaration itself is unusable.
    pub fn invalid_fixture(fixture: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFixture {
            fixture: fixture.into(),
            reason: reason.into(),
        })
    }

    /// True iff a driver may treat this as "skip the branch, keep searching".
    pub fn is_recoverable(&self) -> bool {
        self.kind.category() == ErrorCategory::Recoverable
    }
}

impl std::error::Error for TheoryError {}

impl fmt::Display for TheoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::CouldNotGenerateValue { candidate } => {
                write!(f, "could not generate a value for candidate '{}'", candidate)
            }
            ErrorKind::UnknownSupplier { id } => {
                write!(f, "no parameter supplier registered under id '{}'", id)
            }
            ErrorKind::SupplierInstantiation { id, reason } => {
                write!(f, "failed to instantiate supplier '{}': {}", id, reason)
            }
            ErrorKind::InvalidFixture { fixture, reason } => {
                write!(f, "invalid fixture '{}': {}", fixture, reason)
            }
        }
    }
}

impl Diagnostic for TheoryError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }
}
