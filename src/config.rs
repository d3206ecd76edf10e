//! Configuration handling.
//!
//! Configuration is stored in `config.yaml` under the user's config
//! directory (e.g. `~/.config/stargazer/`) and includes:
//! - Default account to browse when `--user` is not given
//! - GitHub authentication token
//!
//! The token itself is resolved from the environment first so that a
//! config file is never required for authenticated use.

use std::env;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use wait_timeout::ChildExt;

use crate::error::Result;

/// How long to wait for `gh auth token` before giving up.
const GH_CLI_TIMEOUT: Duration = Duration::from_secs(5);

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Account to browse when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,

    /// Authentication tokens
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Authentication configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<GitHubAuth>,
}

/// GitHub authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubAuth {
    pub token: String,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "stargazer").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Load configuration from the user config file, or return default if not found
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> Result<()> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => Err(crate::error::StargazerError::Config(
                "could not determine a config directory for this platform".to_string(),
            )),
        }
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the GitHub token.
    ///
    /// Order: `GITHUB_TOKEN` env var, `GH_TOKEN` env var, config file,
    /// then the `gh` CLI's stored credential.
    pub fn github_token(&self) -> Option<String> {
        for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
            if let Ok(token) = env::var(var)
                && !token.is_empty()
            {
                return Some(token);
            }
        }

        if let Some(github) = &self.auth.github
            && !github.token.is_empty()
        {
            return Some(github.token.clone());
        }

        token_from_gh_cli()
    }

    /// Set GitHub token
    pub fn set_github_token(&mut self, token: String) {
        self.auth.github = Some(GitHubAuth { token });
    }

    /// Set the default account
    pub fn set_default_user(&mut self, user: String) {
        self.default_user = Some(user);
    }
}

/// Ask the `gh` CLI for its stored token, bounded by a timeout so a hung
/// credential helper cannot stall startup.
fn token_from_gh_cli() -> Option<String> {
    let mut child = Command::new("gh")
        .args(["auth", "token"])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .ok()?;

    match child.wait_timeout(GH_CLI_TIMEOUT) {
        Ok(Some(status)) if status.success() => {
            let mut output = String::new();
            child.stdout.take()?.read_to_string(&mut output).ok()?;
            let token = output.trim().to_string();
            if token.is_empty() { None } else { Some(token) }
        }
        Ok(Some(_)) => None,
        _ => {
            let _ = child.kill();
            let _ = child.wait();
            None
        }
    }
}
