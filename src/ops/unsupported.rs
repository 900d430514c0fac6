//! ops::unsupported
//!
//! Commands that are part of the declared surface but carry no behavior
//! yet. Each returns [`Error::Unsupported`] naming the command, rather
//! than inventing semantics.

use crate::error::Error;
use crate::repo::Repo;

impl Repo {
    /// Not yet supported.
    pub fn cherry_pick(&self) -> Result<(), Error> {
        Err(Error::Unsupported {
            operation: "cherry-pick",
        })
    }

    /// Not yet supported.
    pub fn push(&self) -> Result<(), Error> {
        Err(Error::Unsupported { operation: "push" })
    }

    /// Not yet supported.
    pub fn rebase(&self) -> Result<(), Error> {
        Err(Error::Unsupported { operation: "rebase" })
    }

    /// Not yet supported.
    pub fn revert(&self) -> Result<(), Error> {
        Err(Error::Unsupported { operation: "revert" })
    }

    /// Not yet supported.
    pub fn tag(&self) -> Result<(), Error> {
        Err(Error::Unsupported { operation: "tag" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn placeholders_name_their_operation() {
        let dir = TempDir::new().unwrap();
        let repo = Repo::init(dir.path().join("wt"), false).unwrap();

        for (result, name) in [
            (repo.cherry_pick(), "cherry-pick"),
            (repo.push(), "push"),
            (repo.rebase(), "rebase"),
            (repo.revert(), "revert"),
            (repo.tag(), "tag"),
        ] {
            match result.unwrap_err() {
                Error::Unsupported { operation } => assert_eq!(operation, name),
                other => panic!("expected Unsupported, got {other:?}"),
            }
        }
    }
}
