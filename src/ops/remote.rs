//! ops::remote
//!
//! Talking to remotes and integrating their heads: `fetch` and `merge`.
//!
//! # Result shapes
//!
//! Fetch and merge return [`FetchResult`] and [`MergeResult`] rather than
//! anything from `git2`, so the contract at this boundary stays stable
//! regardless of the underlying library's types. The advertised-reference
//! list in a fetch result preserves exactly the order the remote reported.

use serde::Serialize;

use crate::error::Error;
use crate::repo::Repo;
use crate::types::Oid;

/// A reference advertised by a remote during negotiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteRef {
    /// Remote-side ref name (e.g. `HEAD`, `refs/heads/master`)
    pub name: String,
    /// The OID the ref points to
    pub oid: Oid,
}

/// Summary of a fetch.
#[derive(Debug, Clone, Serialize)]
pub struct FetchResult {
    /// The remote that was fetched
    pub remote: String,
    /// References the remote advertised, in the order it reported them
    pub advertised: Vec<RemoteRef>,
}

/// How a merge concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MergeStatus {
    /// The current branch pointer was simply advanced.
    FastForward,
    /// A merge commit was created.
    Merged,
    /// The merge source was already reachable from HEAD.
    AlreadyUpToDate,
}

/// Summary of a merge.
#[derive(Debug, Clone, Serialize)]
pub struct MergeResult {
    /// How the merge concluded
    pub status: MergeStatus,
    /// The commit HEAD points at afterwards
    pub head: Oid,
}

impl Repo {
    /// Get the URL for a remote.
    ///
    /// Returns `None` if the remote doesn't exist.
    pub fn remote_url(&self, name: &str) -> Result<Option<String>, Error> {
        match self.inner().find_remote(name) {
            Ok(remote) => Ok(remote.url().map(String::from)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(Error::from_git2(e, name)),
        }
    }

    /// Fetch from a named remote.
    ///
    /// Connects first to capture the remote's advertised references (in
    /// the order the remote reports them), then downloads using the
    /// remote's configured refspecs.
    ///
    /// # Errors
    ///
    /// - [`Error::Fetch`] if the remote does not exist or the transfer
    ///   fails
    pub fn fetch(&self, remote_name: &str) -> Result<FetchResult, Error> {
        let mut remote = self.inner().find_remote(remote_name).map_err(|e| {
            Error::Fetch {
                message: format!("remote '{}' not found: {}", remote_name, e.message()),
            }
        })?;

        remote
            .connect(git2::Direction::Fetch)
            .map_err(|e| Error::Fetch {
                message: format!("cannot connect to '{}': {}", remote_name, e.message()),
            })?;

        let mut advertised = Vec::new();
        for head in remote.list().map_err(|e| Error::Fetch {
            message: format!("cannot list '{}': {}", remote_name, e.message()),
        })? {
            advertised.push(RemoteRef {
                name: head.name().to_string(),
                oid: Oid::from_git2(head.oid())?,
            });
        }

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.transfer_progress(|_| true);
        let mut options = git2::FetchOptions::new();
        options.remote_callbacks(callbacks);

        remote
            .fetch(&[] as &[&str], Some(&mut options), None)
            .map_err(|e| Error::Fetch {
                message: e.message().to_string(),
            })?;

        tracing::debug!(
            remote = remote_name,
            advertised = advertised.len(),
            "fetch complete"
        );

        Ok(FetchResult {
            remote: remote_name.to_string(),
            advertised,
        })
    }

    /// Merge a previously fetched reference into the current branch.
    pub fn merge_fetched(&self, source: &RemoteRef) -> Result<MergeResult, Error> {
        let oid = source.oid.to_git2()?;
        let annotated = self
            .inner()
            .find_annotated_commit(oid)
            .map_err(|e| Error::Merge {
                message: format!("{}: {}", source.name, e.message()),
            })?;
        self.perform_merge(&annotated, &source.name)
    }

    /// Merge a local reference (branch, tag, or revision) into the
    /// current branch.
    pub fn merge(&self, refname: &str) -> Result<MergeResult, Error> {
        let object = self
            .inner()
            .revparse_single(refname)
            .map_err(|e| Error::Merge {
                message: format!("{}: {}", refname, e.message()),
            })?;
        let annotated = self
            .inner()
            .find_annotated_commit(object.id())
            .map_err(|e| Error::Merge {
                message: format!("{}: {}", refname, e.message()),
            })?;
        self.perform_merge(&annotated, refname)
    }

    /// Shared merge driver: analysis, then fast-forward, no-op, or a real
    /// merge commit. Conflicts surface as [`Error::Merge`] and leave the
    /// repository in its in-progress merge state, exactly as the CLI
    /// would.
    fn perform_merge(
        &self,
        theirs: &git2::AnnotatedCommit<'_>,
        label: &str,
    ) -> Result<MergeResult, Error> {
        let (analysis, _preference) = self
            .inner()
            .merge_analysis(&[theirs])
            .map_err(|e| Error::Merge {
                message: e.message().to_string(),
            })?;

        if analysis.is_up_to_date() {
            tracing::debug!(source = label, "merge: already up to date");
            return Ok(MergeResult {
                status: MergeStatus::AlreadyUpToDate,
                head: self.head_oid()?,
            });
        }

        if analysis.is_unborn() || analysis.is_fast_forward() {
            return self.fast_forward(theirs, label, analysis.is_unborn());
        }

        // Normal merge: run it through the index and look for conflicts
        self.inner()
            .merge(&[theirs], None, None)
            .map_err(|e| Error::Merge {
                message: e.message().to_string(),
            })?;

        let mut index = self
            .inner()
            .index()
            .map_err(|e| Error::from_git2(e, "index"))?;

        if index.has_conflicts() {
            let conflicted = index
                .conflicts()
                .map_err(|e| Error::from_git2(e, "index"))?
                .count();
            tracing::warn!(source = label, conflicted, "merge stopped on conflicts");
            return Err(Error::Merge {
                message: format!("{} conflicting path(s) merging {}", conflicted, label),
            });
        }

        let tree_id = index
            .write_tree()
            .map_err(|e| Error::from_git2(e, "write-tree"))?;
        let tree = self
            .inner()
            .find_tree(tree_id)
            .map_err(|e| Error::from_git2(e, "write-tree"))?;

        let signature = self
            .inner()
            .signature()
            .map_err(|e| Error::from_git2(e, "signature"))?;
        let head_commit = self
            .inner()
            .head()
            .and_then(|h| h.peel_to_commit())
            .map_err(|e| Error::from_git2(e, "HEAD"))?;
        let their_commit = self
            .inner()
            .find_commit(theirs.id())
            .map_err(|e| Error::from_git2(e, label))?;

        let message = format!("Merge {}", label);
        let merge_oid = self
            .inner()
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                &message,
                &tree,
                &[&head_commit, &their_commit],
            )
            .map_err(|e| Error::from_git2(e, "merge commit"))?;

        self.inner()
            .cleanup_state()
            .map_err(|e| Error::from_git2(e, "cleanup"))?;

        tracing::debug!(source = label, head = %merge_oid, "merge commit created");

        Ok(MergeResult {
            status: MergeStatus::Merged,
            head: Oid::from_git2(merge_oid)?,
        })
    }

    /// Advance the current branch to `theirs` without creating a commit.
    fn fast_forward(
        &self,
        theirs: &git2::AnnotatedCommit<'_>,
        label: &str,
        unborn: bool,
    ) -> Result<MergeResult, Error> {
        let oid = theirs.id();
        let log_message = format!("merge {}: fast-forward", label);

        if unborn {
            // HEAD points at a branch that does not exist yet; create it
            let head_ref = self
                .inner()
                .find_reference("HEAD")
                .map_err(|e| Error::from_git2(e, "HEAD"))?;
            let target = head_ref
                .symbolic_target()
                .unwrap_or("refs/heads/master")
                .to_string();
            self.inner()
                .reference(&target, oid, true, &log_message)
                .map_err(|e| Error::from_git2(e, &target))?;
            self.inner()
                .set_head(&target)
                .map_err(|e| Error::from_git2(e, &target))?;
        } else {
            let mut head_ref = self
                .inner()
                .head()
                .map_err(|e| Error::from_git2(e, "HEAD"))?;
            head_ref
                .set_target(oid, &log_message)
                .map_err(|e| Error::from_git2(e, "HEAD"))?;
        }

        if !self.is_bare() {
            self.inner()
                .checkout_head(Some(git2::build::CheckoutBuilder::new().force()))
                .map_err(|e| Error::from_git2(e, "checkout"))?;
        }

        tracing::debug!(source = label, head = %oid, "merge: fast-forward");

        Ok(MergeResult {
            status: MergeStatus::FastForward,
            head: Oid::from_git2(oid)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::ops::branch::CheckoutOptions;
    use crate::ops::commit::{CommitOptions, Ident};
    use crate::types::BranchName;

    fn ident() -> Ident {
        Ident::new("Test User", "test@example.com")
    }

    fn commit_file(repo: &Repo, name: &str, content: &str, message: &str) -> Oid {
        std::fs::write(repo.workdir().unwrap().join(name), content).unwrap();
        repo.add(&[name]).unwrap();
        repo.commit(
            message,
            CommitOptions {
                author: Some(ident()),
                committer: Some(ident()),
            },
        )
        .unwrap()
    }

    fn committed_repo() -> (TempDir, Repo) {
        let dir = TempDir::new().unwrap();
        let repo = Repo::init(dir.path().join("wt"), false).unwrap();
        commit_file(&repo, "a.txt", "one\n", "first commit");
        (dir, repo)
    }

    #[test]
    fn merge_of_current_head_is_up_to_date() {
        let (_dir, repo) = committed_repo();
        let branch = repo.current_branch().unwrap().unwrap();

        let result = repo.merge(branch.as_str()).unwrap();
        assert_eq!(result.status, MergeStatus::AlreadyUpToDate);
        assert_eq!(result.head, repo.head_oid().unwrap());
    }

    #[test]
    fn merge_of_descendant_fast_forwards() {
        let (_dir, repo) = committed_repo();
        let base = repo.current_branch().unwrap().unwrap();

        let topic = BranchName::new("topic").unwrap();
        repo.checkout(&topic, CheckoutOptions { create: true })
            .unwrap();
        let tip = commit_file(&repo, "b.txt", "two\n", "topic commit");

        repo.checkout(&base, CheckoutOptions::default()).unwrap();
        let result = repo.merge("topic").unwrap();

        assert_eq!(result.status, MergeStatus::FastForward);
        assert_eq!(result.head, tip);
        assert_eq!(repo.head_oid().unwrap(), tip);
        assert!(repo.workdir().unwrap().join("b.txt").exists());
    }

    #[test]
    fn merge_of_diverged_branches_creates_merge_commit() {
        let (_dir, repo) = committed_repo();
        let base = repo.current_branch().unwrap().unwrap();

        let topic = BranchName::new("topic").unwrap();
        repo.checkout(&topic, CheckoutOptions { create: true })
            .unwrap();
        let topic_tip = commit_file(&repo, "b.txt", "two\n", "topic commit");

        repo.checkout(&base, CheckoutOptions::default()).unwrap();
        let base_tip = commit_file(&repo, "c.txt", "three\n", "base commit");

        // Merge commits need a configured signature
        repo.inner()
            .config()
            .unwrap()
            .set_str("user.name", "Test User")
            .unwrap();
        repo.inner()
            .config()
            .unwrap()
            .set_str("user.email", "test@example.com")
            .unwrap();

        let result = repo.merge("topic").unwrap();
        assert_eq!(result.status, MergeStatus::Merged);

        let merge = repo
            .inner()
            .find_commit(result.head.to_git2().unwrap())
            .unwrap();
        assert_eq!(merge.parent_count(), 2);
        assert_eq!(merge.parent_id(0).unwrap().to_string(), base_tip.as_str());
        assert_eq!(merge.parent_id(1).unwrap().to_string(), topic_tip.as_str());
    }

    #[test]
    fn conflicting_merge_surfaces_merge_error() {
        let (_dir, repo) = committed_repo();
        let base = repo.current_branch().unwrap().unwrap();

        let topic = BranchName::new("topic").unwrap();
        repo.checkout(&topic, CheckoutOptions { create: true })
            .unwrap();
        commit_file(&repo, "a.txt", "topic version\n", "topic edit");

        repo.checkout(&base, CheckoutOptions::default()).unwrap();
        commit_file(&repo, "a.txt", "base version\n", "base edit");

        let err = repo.merge("topic").unwrap_err();
        assert!(matches!(err, Error::Merge { .. }));
    }

    #[test]
    fn merge_of_unknown_ref_fails() {
        let (_dir, repo) = committed_repo();
        assert!(matches!(
            repo.merge("no-such-branch"),
            Err(Error::Merge { .. })
        ));
    }

    #[test]
    fn fetch_unknown_remote_fails() {
        let (_dir, repo) = committed_repo();
        assert!(matches!(
            repo.fetch("master"),
            Err(Error::Fetch { .. })
        ));
    }
}
