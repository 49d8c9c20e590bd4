//! Configuration management commands.

use nsrtag::config::Config;

use crate::cli::icons::{dim_arrow, info};

/// Print the effective configuration as TOML.
pub fn cmd_config_show(config: &Config) -> anyhow::Result<()> {
    match config.source_path {
        Some(ref path) => eprintln!("{} Loaded from {}", info(), path.display()),
        None => eprintln!("{} No config file found, using defaults", dim_arrow()),
    }

    let rendered = config.to_toml().map_err(|e| anyhow::anyhow!(e))?;
    print!("{}", rendered);
    Ok(())
}
