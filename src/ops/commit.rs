//! ops::commit
//!
//! Recording history: `commit` and `log`.

use serde::Serialize;

use crate::error::Error;
use crate::repo::Repo;
use crate::types::Oid;

/// A name + email pair for commit attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ident {
    pub name: String,
    pub email: String,
}

impl Ident {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    fn to_signature(&self) -> Result<git2::Signature<'static>, Error> {
        git2::Signature::now(&self.name, &self.email)
            .map_err(|e| Error::from_git2(e, &self.name))
    }
}

/// Options for [`Repo::commit`].
///
/// Author and committer both fall back to the repository's configured
/// signature (`user.name` / `user.email`) when unset.
#[derive(Debug, Clone, Default)]
pub struct CommitOptions {
    /// Author override.
    pub author: Option<Ident>,
    /// Committer override.
    pub committer: Option<Ident>,
}

/// Options for [`Repo::log`].
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Stop after this many commits.
    pub max_count: Option<usize>,
}

/// Information about a commit.
#[derive(Debug, Clone, Serialize)]
pub struct CommitInfo {
    /// The commit OID
    pub oid: Oid,
    /// First line of the commit message
    pub summary: String,
    /// Full commit message
    pub message: String,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// Author timestamp
    pub author_time: chrono::DateTime<chrono::Utc>,
}

impl Repo {
    /// Commit the current index with the given message.
    ///
    /// The parent is the current HEAD commit, or nothing for the first
    /// commit of a repository. Returns the new commit's OID.
    ///
    /// # Errors
    ///
    /// - [`Error::Git`] if no signature is configured and none is given
    pub fn commit(&self, message: &str, options: CommitOptions) -> Result<Oid, Error> {
        let author = match &options.author {
            Some(ident) => ident.to_signature()?,
            None => self
                .inner()
                .signature()
                .map_err(|e| Error::from_git2(e, "signature"))?,
        };
        let committer = match &options.committer {
            Some(ident) => ident.to_signature()?,
            None => self
                .inner()
                .signature()
                .map_err(|e| Error::from_git2(e, "signature"))?,
        };

        let mut index = self
            .inner()
            .index()
            .map_err(|e| Error::from_git2(e, "index"))?;
        let tree_id = index
            .write_tree()
            .map_err(|e| Error::from_git2(e, "write-tree"))?;
        let tree = self
            .inner()
            .find_tree(tree_id)
            .map_err(|e| Error::from_git2(e, "write-tree"))?;

        // Unborn HEAD means a parentless initial commit
        let parent = match self.inner().head() {
            Ok(head) => Some(head.peel_to_commit().map_err(|e| Error::from_git2(e, "HEAD"))?),
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                None
            }
            Err(e) => return Err(Error::from_git2(e, "HEAD")),
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self
            .inner()
            .commit(Some("HEAD"), &author, &committer, message, &tree, &parents)
            .map_err(|e| Error::from_git2(e, "commit"))?;

        Oid::from_git2(oid).map_err(Error::from)
    }

    /// Walk history from HEAD, newest first.
    pub fn log(&self, options: LogOptions) -> Result<Vec<CommitInfo>, Error> {
        let mut revwalk = self
            .inner()
            .revwalk()
            .map_err(|e| Error::from_git2(e, "revwalk"))?;
        revwalk
            .push_head()
            .map_err(|e| Error::from_git2(e, "HEAD"))?;
        revwalk
            .set_sorting(git2::Sort::TIME)
            .map_err(|e| Error::from_git2(e, "revwalk"))?;

        let max = options.max_count.unwrap_or(usize::MAX);

        let mut commits = Vec::new();
        for oid in revwalk.take(max) {
            let oid = oid.map_err(|e| Error::from_git2(e, "revwalk"))?;
            commits.push(self.commit_info(oid)?);
        }

        Ok(commits)
    }

    /// Look up display information for a single commit.
    fn commit_info(&self, oid: git2::Oid) -> Result<CommitInfo, Error> {
        let commit = self
            .inner()
            .find_commit(oid)
            .map_err(|e| Error::from_git2(e, &oid.to_string()))?;

        let author = commit.author();
        let author_time = chrono::DateTime::from_timestamp(author.when().seconds(), 0)
            .unwrap_or(chrono::DateTime::UNIX_EPOCH)
            .with_timezone(&chrono::Utc);

        Ok(CommitInfo {
            oid: Oid::from_git2(oid)?,
            summary: commit.summary().unwrap_or("").to_string(),
            message: commit.message().unwrap_or("").to_string(),
            author_name: author.name().unwrap_or("").to_string(),
            author_email: author.email().unwrap_or("").to_string(),
            author_time,
        })
    }
}
