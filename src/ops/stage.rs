//! ops::stage
//!
//! Index staging operations: `add` and `rm`.

use std::path::Path;

use crate::error::Error;
use crate::repo::Repo;

/// Options for [`Repo::rm`].
#[derive(Debug, Clone, Default)]
pub struct RmOptions {
    /// Remove only from the index, leaving the working tree file alone.
    pub cached: bool,
}

impl Repo {
    /// Stage files matching the given pathspecs into the index.
    ///
    /// Pathspecs are interpreted by libgit2, so globs like `src/*.rs`
    /// work. New, modified, and deleted files matching a pathspec are all
    /// staged, mirroring `git add -A -- <pathspec>...`.
    ///
    /// # Errors
    ///
    /// - [`Error::BareRepository`] if the repository has no working tree
    pub fn add(&self, pathspecs: &[&str]) -> Result<(), Error> {
        self.require_workdir()?;

        let mut index = self
            .inner()
            .index()
            .map_err(|e| Error::from_git2(e, "index"))?;

        index
            .add_all(
                pathspecs.iter().copied(),
                git2::IndexAddOption::DEFAULT,
                None,
            )
            .map_err(|e| Error::from_git2(e, "add"))?;
        index.write().map_err(|e| Error::from_git2(e, "index"))?;

        Ok(())
    }

    /// Remove files from the index and, unless `options.cached` is set,
    /// from the working tree.
    ///
    /// # Errors
    ///
    /// - [`Error::BareRepository`] if the repository has no working tree
    /// - [`Error::Git`] if a path is not tracked
    pub fn rm(&self, paths: &[&Path], options: RmOptions) -> Result<(), Error> {
        let workdir = self.require_workdir()?;

        let mut index = self
            .inner()
            .index()
            .map_err(|e| Error::from_git2(e, "index"))?;

        for path in paths {
            index
                .remove_path(path)
                .map_err(|e| Error::from_git2(e, &path.display().to_string()))?;

            if !options.cached {
                match std::fs::remove_file(workdir.join(path)) {
                    Ok(()) => {}
                    // Already gone from the working tree is fine
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => {
                        return Err(Error::Access {
                            message: format!("cannot remove {}: {}", path.display(), e),
                        });
                    }
                }
            }
        }

        index.write().map_err(|e| Error::from_git2(e, "index"))?;

        Ok(())
    }
}
