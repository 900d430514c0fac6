//! ops
//!
//! Porcelain operations, one module per concern. Each module extends
//! [`crate::Repo`] with an `impl` block so the handle stays the single
//! doorway to Git while the surface stays navigable.
//!
//! # Modules
//!
//! - [`stage`] - add, rm
//! - [`commit`] - commit, log
//! - [`branch`] - branch list/create/delete, checkout
//! - [`remote`] - fetch, merge
//! - [`clone`] - clone and the clone-and-integrate workflow
//! - [`status`] - selector-driven working tree status
//! - [`unsupported`] - declared commands with no behavior yet
//!
//! # Design Principles
//!
//! - Parameter translation and default filling only; libgit2 does the work
//! - Optional-arity surfaces become option structs with `Default` impls
//! - Result shapes are defined here so `git2` types never leak upward

pub mod branch;
pub mod clone;
pub mod commit;
pub mod remote;
pub mod stage;
pub mod status;
pub mod unsupported;

pub use branch::CheckoutOptions;
pub use clone::{CloneOptions, CloneOutcome};
pub use commit::{CommitInfo, CommitOptions, Ident, LogOptions};
pub use remote::{FetchResult, MergeResult, MergeStatus, RemoteRef};
pub use stage::RmOptions;
pub use status::{StatusField, StatusReport};
