pub mod commands;
pub mod config;
pub mod error;
pub mod github;
pub mod tui;

pub use config::Config;
pub use error::{Result, StargazerError};
pub use github::{GitHubClient, RepoHost, RepoLicense, RepoOwner, Repository};
pub use tui::browser::{BrowseMode, FilterCategory, RepoBrowser, filter_repositories};
