//! Error types for placement group operations.
//!
//! Every error is terminal for an invocation. Categories exist so the
//! caller can print useful advice, not to drive retries.

use std::fmt;
use std::io;

/// Result type alias for placement operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of placement errors for user feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The cloud client is not available in this build.
    Dependency,
    /// Parameters were missing, mistyped or not allowed.
    Input,
    /// The provider rejected or failed a call.
    Remote,
    /// The local system could not run the client.
    System,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Dependency => "Missing dependency",
            Self::Input => "Invalid parameters",
            Self::Remote => "Provider request failed",
            Self::System => "System error",
        }
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Dependency => "Rebuild with the `ec2` feature enabled",
            Self::Input => "Check the name, state and strategy parameters",
            Self::Remote => "Check credentials, region and network access, then try again",
            Self::System => "Check available threads and file descriptors, then try again",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur while reconciling placement groups.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The cloud client library is unavailable.
    #[error("{message}")]
    MissingDependency {
        /// What is missing.
        message: String,
    },

    /// A parameter has the wrong type or a disallowed value.
    #[error("{field} argument {message}")]
    InvalidInput {
        /// Parameter name.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// A parameter required by the requested state was not supplied.
    #[error("{field} argument is required when state is {state}")]
    MissingRequiredField {
        /// Parameter name.
        field: &'static str,
        /// Desired state that requires it.
        state: String,
    },

    /// The async runtime driving the client could not start.
    #[error("failed to start async runtime: {source}")]
    Runtime {
        #[source]
        source: io::Error,
    },

    /// The provider call failed. The message is passed through untouched.
    #[error("{operation} failed: {message}")]
    RemoteOperationFailure {
        /// Provider operation, e.g. `DescribePlacementGroups`.
        operation: &'static str,
        /// Provider error text.
        message: String,
    },
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a remote failure for a provider operation.
    pub fn remote(operation: &'static str, message: impl Into<String>) -> Self {
        Self::RemoteOperationFailure {
            operation,
            message: message.into(),
        }
    }

    /// Get the error category.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::MissingDependency { .. } => ErrorCategory::Dependency,
            Error::InvalidInput { .. } | Error::MissingRequiredField { .. } => {
                ErrorCategory::Input
            }
            Error::RemoteOperationFailure { .. } => ErrorCategory::Remote,
            Error::Runtime { .. } => ErrorCategory::System,
        }
    }
}
