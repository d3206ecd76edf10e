//! CLI command implementations.

mod browse;
mod config;

pub use browse::{cmd_browse, cmd_browse_starred};
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
