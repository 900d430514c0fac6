//! Gitglaze - a high-level Git porcelain over libgit2
//!
//! Gitglaze exposes one operation per Git subcommand (init, clone, add,
//! commit, checkout, branch management, merge, fetch, log, status, rm),
//! each a thin, typed call sequence against the `git2` crate. Everything
//! hard - the object database, transport, merge machinery, working-tree
//! manipulation - stays inside libgit2; this layer translates parameters,
//! fills in defaults, and returns stable result shapes that do not leak
//! `git2` types into the public API.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`repo`] - The [`Repo`] handle: locating, opening, and initializing
//!   repositories
//! - [`ops`] - One module per porcelain concern, each extending [`Repo`]
//! - [`types`] - Strong types: [`BranchName`], [`Oid`]
//! - [`error`] - Typed failure categories for every operation
//!
//! # Example
//!
//! ```no_run
//! use gitglaze::{CloneOptions, Repo};
//!
//! # fn main() -> Result<(), gitglaze::Error> {
//! // Open an existing repository (either spelling works)
//! let repo = Repo::load("/path/to/repo")?;
//! let repo = Repo::load("/path/to/repo/.git")?;
//!
//! // Clone, then fetch and merge the first advertised ref
//! let outcome = Repo::clone_full("https://example.com/project.git", CloneOptions::default())?;
//! println!("merged with status {:?}", outcome.merge.status);
//! # Ok(())
//! # }
//! ```
//!
//! # Correctness Invariants
//!
//! 1. No error is caught or retried in this layer; every failure aborts
//!    the current operation and surfaces to the caller
//! 2. No cleanup or rollback happens on partial failure (a failed merge
//!    after a successful clone leaves the cloned directory in place)
//! 3. Handles are immutable once built and retained only by the caller

pub mod error;
pub mod ops;
pub mod repo;
pub mod types;

pub use error::Error;
pub use ops::branch::CheckoutOptions;
pub use ops::clone::{CloneOptions, CloneOutcome};
pub use ops::commit::{CommitInfo, CommitOptions, Ident, LogOptions};
pub use ops::remote::{FetchResult, MergeResult, MergeStatus, RemoteRef};
pub use ops::stage::RmOptions;
pub use ops::status::{StatusField, StatusReport};
pub use repo::Repo;
pub use types::{BranchName, Oid, TypeError};
