//! Filtering logic for the repository browser
//!
//! Pure functions from (full collection, query, category) to an
//! order-preserving subsequence. Re-running with identical inputs always
//! yields an identical result.

use crate::github::Repository;

/// Category filter applied on top of the free-text query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterCategory {
    #[default]
    All,
    Starred,
    Owned,
    Forked,
    HasIssues,
}

impl FilterCategory {
    /// Cycle order in the UI.
    pub const ORDER: [FilterCategory; 5] = [
        FilterCategory::All,
        FilterCategory::Starred,
        FilterCategory::Owned,
        FilterCategory::Forked,
        FilterCategory::HasIssues,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterCategory::All => "All",
            FilterCategory::Starred => "Starred",
            FilterCategory::Owned => "Owned",
            FilterCategory::Forked => "Forked",
            FilterCategory::HasIssues => "Issues",
        }
    }

    pub fn next(self) -> Self {
        let pos = Self::ORDER.iter().position(|c| *c == self).unwrap_or(0);
        Self::ORDER[(pos + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let pos = Self::ORDER.iter().position(|c| *c == self).unwrap_or(0);
        Self::ORDER[(pos + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn accepts(self, repo: &Repository) -> bool {
        match self {
            FilterCategory::All => true,
            FilterCategory::Starred => repo.starred,
            FilterCategory::Owned => !repo.fork,
            FilterCategory::Forked => repo.fork,
            FilterCategory::HasIssues => repo.open_issues_count > 0,
        }
    }
}

/// Filter repositories by a case-insensitive substring query and a
/// category. A record passes when any of name, description, or language
/// contains the query, and the category predicate holds.
pub fn filter_repositories(
    all: &[Repository],
    query: &str,
    category: FilterCategory,
) -> Vec<Repository> {
    let needle = query.to_lowercase();

    all.iter()
        .filter(|repo| matches_query(repo, &needle) && category.accepts(repo))
        .cloned()
        .collect()
}

fn matches_query(repo: &Repository, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    repo.name.to_lowercase().contains(needle)
        || repo
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
        || repo
            .language
            .as_deref()
            .is_some_and(|l| l.to_lowercase().contains(needle))
}
