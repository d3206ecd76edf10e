//! Configuration commands.

use owo_colors::OwoColorize;

use crate::config::Config;
use crate::error::{Result, StargazerError};

/// Show current configuration. The token is never printed.
pub fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;

    println!(
        "{} {}",
        "default.user:".cyan(),
        config.default_user.as_deref().unwrap_or("(not set)")
    );
    println!(
        "{} {}",
        "github.token:".cyan(),
        if config.auth.github.is_some() {
            "(set, hidden)"
        } else {
            "(not set)"
        }
    );
    Ok(())
}

/// Get a single configuration value.
pub fn cmd_config_get(key: &str) -> Result<()> {
    let config = Config::load()?;

    match key {
        "default.user" => {
            println!("{}", config.default_user.as_deref().unwrap_or("(not set)"));
            Ok(())
        }
        "github.token" => {
            println!(
                "{}",
                if config.auth.github.is_some() {
                    "(set, hidden)"
                } else {
                    "(not set)"
                }
            );
            Ok(())
        }
        _ => Err(unknown_key(key)),
    }
}

/// Set a configuration value and persist it.
pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "default.user" => config.set_default_user(value.to_string()),
        "github.token" => config.set_github_token(value.to_string()),
        _ => return Err(unknown_key(key)),
    }

    config.save()?;
    println!("{} {} updated", "✓".green(), key);
    Ok(())
}

fn unknown_key(key: &str) -> StargazerError {
    StargazerError::Config(format!(
        "unknown configuration key '{}', expected 'github.token' or 'default.user'",
        key
    ))
}
