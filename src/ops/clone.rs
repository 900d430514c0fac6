//! ops::clone
//!
//! Cloning, and the clone-and-integrate workflow.
//!
//! # Workflow
//!
//! [`Repo::clone_full`] is a strict four-stage pipeline: clone, fetch,
//! merge the first advertised reference, aggregate. Each stage's success
//! gates the next, there are no retries, and nothing is rolled back on
//! failure - a merge that stops on conflicts leaves the freshly cloned
//! directory on disk for the caller to inspect.

use std::path::PathBuf;

use crate::error::Error;
use crate::ops::remote::{FetchResult, MergeResult, RemoteRef};
use crate::repo::Repo;

/// The remote name the integrate stages always use.
///
/// The workflow has always fetched the remote named `master`, independent
/// of [`CloneOptions::remote`]. With default options the clone stage also
/// names its remote `master`, so the stages line up; callers that rename
/// the remote get a fetch failure rather than a silently different
/// behavior. Kept as-is for compatibility with the workflow's historical
/// contract.
const INTEGRATE_REMOTE: &str = "master";

/// Options for [`Repo::clone`] and [`Repo::clone_full`].
///
/// The single option struct replaces a ladder of progressively longer
/// parameter lists; unset fields take the documented defaults.
#[derive(Debug, Clone)]
pub struct CloneOptions {
    /// Target directory. Defaults to the trailing path segment of the
    /// URL with any `.git` suffix removed, relative to the current
    /// directory.
    pub dir: Option<PathBuf>,
    /// Name given to the remote the clone creates. Defaults to `master`.
    pub remote: String,
    /// Branch to check out after cloning. Defaults to `master`.
    pub branch: String,
    /// Create a bare repository. Defaults to `false`.
    pub bare: bool,
}

impl Default for CloneOptions {
    fn default() -> Self {
        Self {
            dir: None,
            remote: "master".to_string(),
            branch: "master".to_string(),
            bare: false,
        }
    }
}

/// Composite result of [`Repo::clone_full`].
///
/// Only ever built from three successful stages; a failed stage aborts
/// the workflow instead of producing a partially populated outcome.
#[derive(Debug)]
pub struct CloneOutcome {
    /// Handle bound to the newly created local repository
    pub repo: Repo,
    /// Summary of the post-clone fetch
    pub fetch: FetchResult,
    /// Summary of the integrate merge
    pub merge: MergeResult,
}

impl Repo {
    /// Clone a repository.
    ///
    /// The remote is created under `options.remote` and `options.branch`
    /// is checked out, unless `options.bare` suppresses the working tree.
    ///
    /// # Errors
    ///
    /// - [`Error::Clone`] if the URL is invalid, the remote is
    ///   unreachable, or the target directory conflicts
    pub fn clone(url: &str, options: CloneOptions) -> Result<Self, Error> {
        let target = options
            .dir
            .clone()
            .unwrap_or_else(|| local_dir_for_url(url));

        tracing::debug!(url, target = %target.display(), "cloning");

        let remote_name = options.remote.clone();
        let mut builder = git2::build::RepoBuilder::new();
        builder
            .bare(options.bare)
            .branch(&options.branch)
            .remote_create(move |repo, _default_name, url| repo.remote(&remote_name, url));

        let repo = builder.clone(url, &target).map_err(|e| Error::Clone {
            message: e.message().to_string(),
        })?;

        Ok(Repo::from_inner(repo))
    }

    /// Clone, then fetch and merge the remote's first advertised head.
    ///
    /// Stages run strictly in order, each gating the next:
    ///
    /// 1. Clone per `options` ([`Error::Clone`] on failure)
    /// 2. Fetch the remote named `master` - fixed, regardless of
    ///    `options.remote`; see [`CloneOptions`] ([`Error::Fetch`])
    /// 3. Merge the first reference the fetch advertised into the
    ///    current branch ([`Error::Merge`]; also when the remote
    ///    advertised nothing)
    /// 4. Aggregate all three results
    ///
    /// There is no rollback: a failure in stages 2-3 leaves the cloned
    /// directory on disk.
    pub fn clone_full(url: &str, options: CloneOptions) -> Result<CloneOutcome, Error> {
        let repo = Repo::clone(url, options)?;
        let fetch = repo.fetch(INTEGRATE_REMOTE)?;
        let source = first_advertised(&fetch)?.clone();
        let merge = repo.merge_fetched(&source)?;

        Ok(CloneOutcome { repo, fetch, merge })
    }
}

/// Pick the merge source for the integrate stage: whatever reference the
/// remote advertised first, in its own ordering.
fn first_advertised(fetch: &FetchResult) -> Result<&RemoteRef, Error> {
    fetch.advertised.first().ok_or_else(|| Error::Merge {
        message: format!(
            "remote '{}' advertised no references to merge",
            fetch.remote
        ),
    })
}

/// Derive a local directory name from the trailing segment of a URL,
/// dropping any `.git` suffix.
fn local_dir_for_url(url: &str) -> PathBuf {
    let trimmed = url.trim_end_matches('/');
    let tail = trimmed
        .rsplit(['/', ':'])
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(trimmed);
    PathBuf::from(tail.strip_suffix(".git").unwrap_or(tail))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::types::Oid;

    mod local_dir {
        use super::*;

        #[test]
        fn derives_from_url_tail() {
            assert_eq!(
                local_dir_for_url("https://example.com/owner/project.git"),
                PathBuf::from("project")
            );
            assert_eq!(
                local_dir_for_url("https://example.com/owner/project"),
                PathBuf::from("project")
            );
            assert_eq!(
                local_dir_for_url("git@example.com:owner/project.git"),
                PathBuf::from("project")
            );
        }

        #[test]
        fn ignores_trailing_slashes() {
            assert_eq!(
                local_dir_for_url("https://example.com/owner/project/"),
                PathBuf::from("project")
            );
        }

        #[test]
        fn plain_paths_use_last_component() {
            assert_eq!(
                local_dir_for_url("/srv/git/project.git"),
                PathBuf::from("project")
            );
        }
    }

    mod defaults {
        use super::*;

        #[test]
        fn clone_options_default_to_master_non_bare() {
            let options = CloneOptions::default();
            assert_eq!(options.remote, "master");
            assert_eq!(options.branch, "master");
            assert!(!options.bare);
            assert!(options.dir.is_none());
        }

        #[test]
        fn integrate_stage_is_pinned_to_master() {
            // The fetch stage ignores CloneOptions::remote on purpose
            assert_eq!(INTEGRATE_REMOTE, "master");
        }
    }

    mod advertised {
        use super::*;

        fn sample_oid() -> Oid {
            Oid::new("abc123def4567890abc123def4567890abc12345").unwrap()
        }

        #[test]
        fn first_advertised_takes_remote_order() {
            let fetch = FetchResult {
                remote: "master".into(),
                advertised: vec![
                    RemoteRef {
                        name: "HEAD".into(),
                        oid: sample_oid(),
                    },
                    RemoteRef {
                        name: "refs/heads/master".into(),
                        oid: sample_oid(),
                    },
                ],
            };
            assert_eq!(first_advertised(&fetch).unwrap().name, "HEAD");
        }

        #[test]
        fn empty_advertisement_is_a_merge_error() {
            let fetch = FetchResult {
                remote: "master".into(),
                advertised: Vec::new(),
            };
            let err = first_advertised(&fetch).unwrap_err();
            assert!(matches!(err, Error::Merge { .. }));
            assert!(err.to_string().contains("advertised no references"));
        }
    }
}
