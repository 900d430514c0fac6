//! repo
//!
//! The [`Repo`] handle: locating, opening, and initializing repositories.
//!
//! # Architecture
//!
//! `Repo` is the single doorway to a repository. All porcelain operations
//! hang off it (see [`crate::ops`]); no other module constructs a
//! `git2::Repository` directly. The handle is immutable once built and is
//! owned exclusively by the caller - nothing here retains a reference
//! after returning it.
//!
//! # Path resolution
//!
//! [`Repo::load`] accepts either a working-tree root or the metadata
//! directory itself. A path that does not end in `.git` is resolved to
//! `<path>/.git`; a path that does is used verbatim. The resolved
//! directory must already exist - `load` never creates or mutates
//! anything on disk.
//!
//! # Example
//!
//! ```no_run
//! use gitglaze::Repo;
//!
//! # fn main() -> Result<(), gitglaze::Error> {
//! // Both spellings open the same repository
//! let repo = Repo::load("project")?;
//! let repo = Repo::load("project/.git")?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::types::{BranchName, Oid};

/// An opened repository.
///
/// Bound at construction to one on-disk metadata directory. Every
/// porcelain operation in [`crate::ops`] is a method on this handle.
pub struct Repo {
    /// The underlying git2 repository
    inner: git2::Repository,
}

impl std::fmt::Debug for Repo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repo")
            .field("path", &self.inner.path())
            .finish()
    }
}

impl Repo {
    // =========================================================================
    // Locating and Opening
    // =========================================================================

    /// Open the repository at `path`.
    ///
    /// `path` may name either a working-tree root or the metadata
    /// directory itself. If it does not end with `.git`, the metadata
    /// directory is taken to be `<path>/.git`; otherwise the path is used
    /// verbatim. The resolved directory is then handed to libgit2, which
    /// honors environment-derived configuration and discovers the
    /// repository from there.
    ///
    /// # Errors
    ///
    /// - [`Error::RepositoryNotFound`] if the resolved metadata directory
    ///   does not exist; the error carries the original `path`, not the
    ///   resolved one
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let original = path.as_ref();
        let metadata_dir = resolve_metadata_dir(original);

        if !metadata_dir.exists() {
            return Err(Error::RepositoryNotFound {
                path: original.display().to_string(),
            });
        }

        let repo = git2::Repository::discover(&metadata_dir)
            .map_err(|e| Error::from_git2(e, &metadata_dir.display().to_string()))?;

        Ok(Self { inner: repo })
    }

    /// Initialize a new repository at `path`.
    ///
    /// Creates a working repository, or a bare one if `bare` is set.
    pub fn init(path: impl AsRef<Path>, bare: bool) -> Result<Self, Error> {
        let path = path.as_ref();
        let repo = if bare {
            git2::Repository::init_bare(path)
        } else {
            git2::Repository::init(path)
        }
        .map_err(|e| Error::from_git2(e, &path.display().to_string()))?;

        Ok(Self { inner: repo })
    }

    /// Wrap an already-opened git2 repository.
    pub(crate) fn from_inner(inner: git2::Repository) -> Self {
        Self { inner }
    }

    /// Access the underlying git2 repository.
    pub(crate) fn inner(&self) -> &git2::Repository {
        &self.inner
    }

    // =========================================================================
    // Repository Info
    // =========================================================================

    /// Path to the metadata (`.git`) directory.
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Path to the working tree, if the repository has one.
    pub fn workdir(&self) -> Option<&Path> {
        self.inner.workdir()
    }

    /// Whether the repository is bare.
    pub fn is_bare(&self) -> bool {
        self.inner.is_bare()
    }

    /// Get the working tree root, failing on bare repositories.
    pub(crate) fn require_workdir(&self) -> Result<PathBuf, Error> {
        self.inner
            .workdir()
            .map(Path::to_path_buf)
            .ok_or(Error::BareRepository)
    }

    /// Get the current branch name, if on a branch.
    ///
    /// Returns `None` if HEAD is detached or unborn.
    pub fn current_branch(&self) -> Result<Option<BranchName>, Error> {
        let head = match self.inner.head() {
            Ok(h) => h,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            if let Some(name) = head.shorthand() {
                return Ok(Some(BranchName::new(name)?));
            }
        }

        Ok(None) // Detached HEAD
    }

    /// Get HEAD commit OID.
    ///
    /// # Errors
    ///
    /// Fails if HEAD is unborn (new repository).
    pub fn head_oid(&self) -> Result<Oid, Error> {
        let head = self.inner.head().map_err(|e| Error::from_git2(e, "HEAD"))?;

        let oid = head
            .peel_to_commit()
            .map_err(|e| Error::from_git2(e, "HEAD"))?
            .id();

        Oid::from_git2(oid).map_err(Error::from)
    }
}

/// Resolve a user-supplied path to the metadata directory.
///
/// Paths already ending in `.git` are used verbatim; anything else gets
/// `.git` appended.
fn resolve_metadata_dir(path: &Path) -> PathBuf {
    if path.as_os_str().to_string_lossy().ends_with(".git") {
        path.to_path_buf()
    } else {
        path.join(".git")
    }
}
