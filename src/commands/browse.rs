//! Interactive browser entry points.

use std::sync::Arc;

use iocraft::prelude::*;

use crate::config::Config;
use crate::error::{Result, StargazerError};
use crate::github::{GitHubClient, RepoHost};
use crate::tui::browser::{BrowseMode, RepoBrowser};

/// Browse an account's repositories (or the authenticated user's).
pub fn cmd_browse(user: Option<&str>) -> Result<()> {
    run_browser(user, BrowseMode::Repositories)
}

/// Browse only the repositories an account has starred.
pub fn cmd_browse_starred(user: Option<&str>) -> Result<()> {
    run_browser(user, BrowseMode::StarredOnly)
}

/// NOTE: This function creates its own tokio runtime because it's an
/// entry point for the TUI. This is intentional and safe since it's not
/// called from within another async context.
fn run_browser(user: Option<&str>, mode: BrowseMode) -> Result<()> {
    let config = Config::load()?;
    let token = config.github_token().ok_or_else(|| {
        StargazerError::Auth(
            "no GitHub token found; set GITHUB_TOKEN or run: gh auth login".to_string(),
        )
    })?;

    let client = Arc::new(GitHubClient::new(&token)?);
    let target_account = user
        .map(str::to_string)
        .or_else(|| config.default_user.clone());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| StargazerError::Other(format!("Failed to create runtime: {}", e)))?;

    rt.block_on(async {
        element!(RepoBrowser(
            client: Some(client.clone()),
            target_account: target_account.clone(),
            mode,
        ))
        .fullscreen()
        .await
        .map_err(|e| StargazerError::Other(format!("TUI error: {}", e)))
    })?;

    // Release the transport on the quit path. Work still in flight was
    // abandoned with the session and its results are discarded.
    if let Ok(client) = Arc::try_unwrap(client) {
        rt.block_on(client.close());
    }

    Ok(())
}
