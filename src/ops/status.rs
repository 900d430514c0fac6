//! ops::status
//!
//! Selector-driven working tree status.
//!
//! The report is a mapping from [`StatusField`] to the set of paths in
//! that state. Callers pick which fields they want; asking for nothing
//! means asking for everything.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::Error;
use crate::repo::Repo;

/// The fixed vocabulary of status selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusField {
    /// Staged, new in the index.
    Added,
    /// Staged modification of a tracked file.
    Changed,
    /// Tracked file deleted in the working tree but not staged.
    Missing,
    /// Unstaged modification of a tracked file.
    Modified,
    /// Staged deletion.
    Removed,
    /// Not tracked and not ignored.
    Untracked,
}

impl StatusField {
    /// All six selectors, in reporting order.
    pub const ALL: [StatusField; 6] = [
        StatusField::Added,
        StatusField::Changed,
        StatusField::Missing,
        StatusField::Modified,
        StatusField::Removed,
        StatusField::Untracked,
    ];

    /// The selector's wire/display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusField::Added => "added",
            StatusField::Changed => "changed",
            StatusField::Missing => "missing",
            StatusField::Modified => "modified",
            StatusField::Removed => "removed",
            StatusField::Untracked => "untracked",
        }
    }
}

impl std::fmt::Display for StatusField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status report: one key per requested selector, each holding the paths
/// currently in that state.
pub type StatusReport = BTreeMap<StatusField, BTreeSet<String>>;

impl Repo {
    /// Report working tree status for the requested selectors.
    ///
    /// An empty `fields` slice returns a report with exactly the six
    /// keys of [`StatusField::ALL`], empty sets included. A non-empty
    /// slice returns exactly the requested keys and nothing else.
    ///
    /// # Errors
    ///
    /// - [`Error::BareRepository`] if the repository has no working tree
    pub fn status(&self, fields: &[StatusField]) -> Result<StatusReport, Error> {
        self.require_workdir()?;

        let requested: Vec<StatusField> = if fields.is_empty() {
            StatusField::ALL.to_vec()
        } else {
            fields.to_vec()
        };

        let mut report: StatusReport = requested
            .iter()
            .map(|field| (*field, BTreeSet::new()))
            .collect();

        let mut options = git2::StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self
            .inner()
            .statuses(Some(&mut options))
            .map_err(|e| Error::from_git2(e, "status"))?;

        for entry in statuses.iter() {
            // Skip entries with non-UTF8 paths
            let path = match entry.path() {
                Some(p) => p.to_string(),
                None => continue,
            };
            let status = entry.status();

            for field in classify(status) {
                if let Some(paths) = report.get_mut(&field) {
                    paths.insert(path.clone());
                }
            }
        }

        Ok(report)
    }
}

/// Map a git2 status bitfield onto the selector vocabulary.
///
/// A single entry can land in several buckets (e.g. staged and then
/// modified again in the working tree).
fn classify(status: git2::Status) -> Vec<StatusField> {
    let mut fields = Vec::new();

    if status.is_index_new() {
        fields.push(StatusField::Added);
    }
    if status.is_index_modified() || status.is_index_renamed() || status.is_index_typechange() {
        fields.push(StatusField::Changed);
    }
    if status.is_index_deleted() {
        fields.push(StatusField::Removed);
    }
    if status.is_wt_deleted() {
        fields.push(StatusField::Missing);
    }
    if status.is_wt_modified() || status.is_wt_renamed() || status.is_wt_typechange() {
        fields.push(StatusField::Modified);
    }
    if status.is_wt_new() {
        fields.push(StatusField::Untracked);
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;

    use tempfile::TempDir;

    use crate::ops::commit::{CommitOptions, Ident};
    use crate::ops::stage::RmOptions;

    fn ident() -> Ident {
        Ident::new("Test User", "test@example.com")
    }

    fn committed_repo() -> (TempDir, Repo) {
        let dir = TempDir::new().unwrap();
        let repo = Repo::init(dir.path().join("wt"), false).unwrap();
        std::fs::write(repo.workdir().unwrap().join("tracked.txt"), "one\n").unwrap();
        repo.add(&["tracked.txt"]).unwrap();
        repo.commit(
            "first commit",
            CommitOptions {
                author: Some(ident()),
                committer: Some(ident()),
            },
        )
        .unwrap();
        (dir, repo)
    }

    fn paths(report: &StatusReport, field: StatusField) -> Vec<&str> {
        report[&field].iter().map(String::as_str).collect()
    }

    #[test]
    fn empty_selector_set_returns_all_six_keys() {
        let (_dir, repo) = committed_repo();
        let report = repo.status(&[]).unwrap();

        let keys: Vec<StatusField> = report.keys().copied().collect();
        assert_eq!(keys, StatusField::ALL.to_vec());
        // Clean repo: every set is empty, but every key is present
        assert!(report.values().all(BTreeSet::is_empty));
    }

    #[test]
    fn explicit_selectors_return_exactly_those_keys() {
        let (_dir, repo) = committed_repo();
        let report = repo
            .status(&[StatusField::Modified, StatusField::Untracked])
            .unwrap();

        let keys: Vec<StatusField> = report.keys().copied().collect();
        assert_eq!(keys, vec![StatusField::Modified, StatusField::Untracked]);
    }

    #[test]
    fn untracked_and_added_files_are_bucketed() {
        let (_dir, repo) = committed_repo();
        std::fs::write(repo.workdir().unwrap().join("new.txt"), "x\n").unwrap();

        let report = repo.status(&[]).unwrap();
        assert_eq!(paths(&report, StatusField::Untracked), vec!["new.txt"]);

        repo.add(&["new.txt"]).unwrap();
        let report = repo.status(&[]).unwrap();
        assert_eq!(paths(&report, StatusField::Added), vec!["new.txt"]);
        assert!(report[&StatusField::Untracked].is_empty());
    }

    #[test]
    fn working_tree_edits_and_deletions_are_bucketed() {
        let (_dir, repo) = committed_repo();

        std::fs::write(repo.workdir().unwrap().join("tracked.txt"), "edited\n").unwrap();
        let report = repo.status(&[]).unwrap();
        assert_eq!(paths(&report, StatusField::Modified), vec!["tracked.txt"]);

        std::fs::remove_file(repo.workdir().unwrap().join("tracked.txt")).unwrap();
        let report = repo.status(&[]).unwrap();
        assert_eq!(paths(&report, StatusField::Missing), vec!["tracked.txt"]);
    }

    #[test]
    fn staged_edits_and_removals_are_bucketed() {
        let (_dir, repo) = committed_repo();

        std::fs::write(repo.workdir().unwrap().join("tracked.txt"), "edited\n").unwrap();
        repo.add(&["tracked.txt"]).unwrap();
        let report = repo.status(&[]).unwrap();
        assert_eq!(paths(&report, StatusField::Changed), vec!["tracked.txt"]);

        repo.rm(&[Path::new("tracked.txt")], RmOptions::default())
            .unwrap();
        let report = repo.status(&[]).unwrap();
        assert_eq!(paths(&report, StatusField::Removed), vec!["tracked.txt"]);
    }

    #[test]
    fn status_on_bare_repo_fails() {
        let dir = TempDir::new().unwrap();
        let repo = Repo::init(dir.path().join("bare.git"), true).unwrap();
        assert!(matches!(repo.status(&[]), Err(Error::BareRepository)));
    }
}
