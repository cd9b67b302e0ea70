//! Show or initialise the configuration file.

use camtrail_common::config::{config_file_path, AppConfig};

pub fn run(config: &AppConfig, path_only: bool, init: bool) -> anyhow::Result<()> {
    let path = config_file_path();
    if path_only {
        println!("{}", path.display());
        return Ok(());
    }

    if init {
        config.save()?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    println!("# {}", path.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
