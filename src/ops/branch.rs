//! ops::branch
//!
//! Branch management: list, create, delete, checkout.

use crate::error::Error;
use crate::repo::Repo;
use crate::types::BranchName;

/// Options for [`Repo::checkout`].
#[derive(Debug, Clone, Default)]
pub struct CheckoutOptions {
    /// Create the branch at HEAD before checking it out.
    pub create: bool,
}

impl Repo {
    /// List all local branches.
    ///
    /// Returns validated [`BranchName`] instances; branches whose names
    /// are not valid refnames (or not UTF-8) are skipped.
    pub fn branches(&self) -> Result<Vec<BranchName>, Error> {
        let branches = self
            .inner()
            .branches(Some(git2::BranchType::Local))
            .map_err(|e| Error::from_git2(e, "branches"))?;

        let mut names = Vec::new();
        for branch in branches {
            let (branch, _) = branch.map_err(|e| Error::from_git2(e, "branches"))?;
            if let Some(name) = branch.name().ok().flatten() {
                if let Ok(branch_name) = BranchName::new(name) {
                    names.push(branch_name);
                }
            }
        }

        Ok(names)
    }

    /// Create a branch at the current HEAD commit.
    pub fn create_branch(&self, name: &BranchName) -> Result<(), Error> {
        let head = self
            .inner()
            .head()
            .map_err(|e| Error::from_git2(e, "HEAD"))?
            .peel_to_commit()
            .map_err(|e| Error::from_git2(e, "HEAD"))?;

        self.inner()
            .branch(name.as_str(), &head, false)
            .map_err(|e| Error::from_git2(e, name.as_str()))?;

        Ok(())
    }

    /// Delete a local branch.
    pub fn delete_branch(&self, name: &BranchName) -> Result<(), Error> {
        let mut branch = self
            .inner()
            .find_branch(name.as_str(), git2::BranchType::Local)
            .map_err(|e| Error::from_git2(e, name.as_str()))?;

        branch
            .delete()
            .map_err(|e| Error::from_git2(e, name.as_str()))?;

        Ok(())
    }

    /// Check out a local branch, updating HEAD and the working tree.
    ///
    /// With `options.create` the branch is first created at HEAD, so the
    /// call behaves like `git checkout -b <name>`.
    ///
    /// # Errors
    ///
    /// - [`Error::BareRepository`] if the repository has no working tree
    /// - [`Error::Git`] if the branch does not exist (and `create` is off)
    pub fn checkout(&self, name: &BranchName, options: CheckoutOptions) -> Result<(), Error> {
        self.require_workdir()?;

        if options.create {
            self.create_branch(name)?;
        }

        let refname = format!("refs/heads/{}", name.as_str());
        let object = self
            .inner()
            .revparse_single(&refname)
            .map_err(|e| Error::from_git2(e, &refname))?;

        self.inner()
            .checkout_tree(&object, Some(git2::build::CheckoutBuilder::new().safe()))
            .map_err(|e| Error::from_git2(e, &refname))?;
        self.inner()
            .set_head(&refname)
            .map_err(|e| Error::from_git2(e, &refname))?;

        Ok(())
    }
}
