//! error
//!
//! Typed failure categories for every porcelain operation.
//!
//! # Error Handling
//!
//! Failures are categorized into typed variants so callers can tell a
//! precondition failure (nothing touched on disk) from a mid-workflow
//! failure (side effects already committed):
//!
//! - [`Error::RepositoryNotFound`]: locator path resolution failed
//! - [`Error::Clone`], [`Error::Fetch`], [`Error::Merge`]: workflow stages
//! - [`Error::Unsupported`]: declared-but-unimplemented command
//! - [`Error::Git`]: passthrough for everything libgit2 reports
//!
//! No error is caught or retried anywhere in this crate; every failure
//! immediately aborts the current operation and is surfaced to the caller.

use thiserror::Error;

use crate::types::TypeError;

/// Errors from porcelain operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No metadata directory at the resolved location.
    ///
    /// Carries the original user-supplied path, not the normalized
    /// metadata path.
    #[error("repository not found: {path}")]
    RepositoryNotFound {
        /// The path as the caller supplied it
        path: String,
    },

    /// The operation needs a working tree and the repository has none.
    #[error("bare repository has no working tree")]
    BareRepository,

    /// The clone stage failed (bad URI, unreachable remote, target
    /// directory conflict).
    #[error("clone failed: {message}")]
    Clone {
        /// What libgit2 reported
        message: String,
    },

    /// The fetch stage failed (missing remote, network or protocol error).
    #[error("fetch failed: {message}")]
    Fetch {
        /// What libgit2 reported
        message: String,
    },

    /// The merge stage failed (conflicts, or no usable merge source).
    #[error("merge failed: {message}")]
    Merge {
        /// What went wrong
        message: String,
    },

    /// Declared command with no behavior yet.
    #[error("operation not yet supported: {operation}")]
    Unsupported {
        /// The porcelain command name
        operation: &'static str,
    },

    /// Invalid branch name or object id.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Permission or filesystem error outside libgit2.
    #[error("repository access error: {message}")]
    Access {
        /// Description of the error
        message: String,
    },

    /// Passthrough libgit2 error.
    #[error("git error: {message}")]
    Git {
        /// The error message
        message: String,
    },
}

impl Error {
    /// Create an `Error` from a git2::Error with richer context.
    pub(crate) fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::Locked => Error::Access {
                message: format!("repository is locked: {}", err.message()),
            },
            _ => Error::Git {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

impl From<git2::Error> for Error {
    fn from(err: git2::Error) -> Self {
        Error::Git {
            message: err.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_displays_original_path() {
        let err = Error::RepositoryNotFound {
            path: "some/workdir".to_string(),
        };
        assert!(err.to_string().contains("some/workdir"));
    }

    #[test]
    fn stage_errors_name_their_stage() {
        let clone = Error::Clone {
            message: "boom".into(),
        };
        let fetch = Error::Fetch {
            message: "boom".into(),
        };
        let merge = Error::Merge {
            message: "boom".into(),
        };
        assert!(clone.to_string().starts_with("clone failed"));
        assert!(fetch.to_string().starts_with("fetch failed"));
        assert!(merge.to_string().starts_with("merge failed"));
    }

    #[test]
    fn unsupported_names_the_operation() {
        let err = Error::Unsupported { operation: "push" };
        assert!(err.to_string().contains("push"));
    }

    #[test]
    fn type_errors_convert() {
        let err: Error = TypeError::InvalidOid("nope".into()).into();
        assert!(matches!(err, Error::Type(_)));
    }
}
