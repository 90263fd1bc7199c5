//! Show or create the config file.

use castkit_common::config::{config_file_path, AppConfig};

pub fn run(config: &AppConfig, write_default: bool) -> anyhow::Result<()> {
    let path = config_file_path();

    if write_default {
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }
        let written = AppConfig::default().save()?;
        println!("Wrote default config to {}", written.display());
        return Ok(());
    }

    println!("# {}", path.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
