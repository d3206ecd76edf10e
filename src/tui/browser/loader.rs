//! Asynchronous repository loading.
//!
//! Fetches the target account's repository list and starred list, then
//! annotates each repository with its starred status. Annotation never
//! begins until both fetches have completed, so a collection is never
//! published partially cross-referenced.

use std::collections::HashSet;

use crate::error::Result;
use crate::github::{RepoHost, Repository};

/// What the session browses: the account's repositories, or only the
/// repositories it has starred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowseMode {
    #[default]
    Repositories,
    StarredOnly,
}

/// Load the collection for `target`, or for the authenticated user when
/// no target is given. The two list fetches run concurrently.
pub async fn load_repositories(
    host: &impl RepoHost,
    target: Option<&str>,
    mode: BrowseMode,
) -> Result<Vec<Repository>> {
    let account = match target {
        Some(account) => account.to_string(),
        None => host.resolve_authenticated_login().await?,
    };

    let repositories = match mode {
        BrowseMode::Repositories => {
            let (mut repositories, starred) = futures::try_join!(
                host.list_repositories(&account),
                host.list_starred(&account)
            )?;

            let starred_names: HashSet<String> =
                starred.into_iter().map(|repo| repo.full_name).collect();
            for repo in &mut repositories {
                repo.starred = starred_names.contains(&repo.full_name);
            }
            repositories
        }
        BrowseMode::StarredOnly => {
            let mut repositories = host.list_starred(&account).await?;
            for repo in &mut repositories {
                repo.starred = true;
            }
            repositories
        }
    };

    tracing::debug!(
        account = %account,
        count = repositories.len(),
        ?mode,
        "loaded repositories"
    );
    Ok(repositories)
}
