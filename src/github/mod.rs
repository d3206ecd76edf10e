//! GitHub API boundary.
//!
//! This module defines the repository data model as it passes through
//! from the REST API, plus the [`RepoHost`] service contract the browser
//! session consumes. The concrete client lives in [`client`].

pub mod client;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use client::GitHubClient;

/// Minimal reference to the user owning a repository.
///
/// A plain embedded value: read-only, never points back at the
/// repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
}

/// Repository license, name only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoLicense {
    pub name: String,
}

/// One repository as known to the browser.
///
/// All fields except `starred` pass through unchanged from the API
/// client's deserialization layer. `starred` is an ephemeral annotation:
/// it is set by the loader by cross-referencing the authenticated user's
/// starred set, and mutated afterwards only through session-applied
/// patches when the user stars or unstars through the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub private: bool,
    pub fork: bool,
    #[serde(default)]
    pub language: Option<String>,
    pub stargazers_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub default_branch: String,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub license: Option<RepoLicense>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub pushed_at: Option<Timestamp>,
    pub html_url: String,
    pub clone_url: String,
    #[serde(default)]
    pub ssh_url: String,
    pub owner: RepoOwner,

    /// Whether the authenticated user has starred this repository.
    /// Not part of the API payload.
    #[serde(skip)]
    pub starred: bool,
}

/// Service contract for the hosted code forge.
///
/// The browser session and its tests consume this abstraction; the
/// production implementation is [`GitHubClient`]. Each method may fail
/// with a distinguishable authentication / rate-limit / generic API
/// error (see [`crate::StargazerError`]).
pub trait RepoHost: Send + Sync {
    /// Resolve the login of the authenticated user.
    fn resolve_authenticated_login(&self) -> impl Future<Output = Result<String>> + Send;

    /// List an account's repositories.
    fn list_repositories(&self, account: &str)
    -> impl Future<Output = Result<Vec<Repository>>> + Send;

    /// List the repositories an account has starred.
    fn list_starred(&self, account: &str) -> impl Future<Output = Result<Vec<Repository>>> + Send;

    /// Star a repository as the authenticated user.
    fn star(&self, owner: &str, name: &str) -> impl Future<Output = Result<()>> + Send;

    /// Remove the authenticated user's star from a repository.
    fn unstar(&self, owner: &str, name: &str) -> impl Future<Output = Result<()>> + Send;

    /// Fork a repository into the authenticated user's account and
    /// return the new fork.
    fn fork(&self, owner: &str, name: &str) -> impl Future<Output = Result<Repository>> + Send;

    /// Release the underlying transport. Safe to call once at session
    /// teardown; in-flight work that resolves later is discarded by the
    /// caller.
    fn close(self) -> impl Future<Output = ()> + Send
    where
        Self: Sized;
}
