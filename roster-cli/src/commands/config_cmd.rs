use anyhow::Result;
use std::path::Path;
use std::process::Command;

use crate::config::Config;
use crate::ui::widgets::render_success;

pub async fn show_config(config_file: &Path) -> Result<()> {
    let config = Config::load_from(config_file)?;
    let config_str = toml::to_string_pretty(&config)?;

    println!("Current Configuration ({})", config_file.display());
    println!("────────────────────────────────");
    println!();
    println!("{}", config_str);
    println!("Roster file: {}", config.roster_path()?.display());

    Ok(())
}

pub async fn edit_config(config_file: &Path) -> Result<()> {
    // Ensure config file exists
    if !config_file.exists() {
        Config::default().save_to(config_file)?;
    }

    // Open in default editor
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

    Command::new(editor).arg(config_file).status()?;

    // Reject edits that no longer parse
    Config::load_from(config_file)?;
    render_success("Configuration saved!");

    Ok(())
}

pub async fn init_config(config_file: &Path, force: bool) -> Result<()> {
    if config_file.exists() && !force {
        println!(
            "Configuration file already exists at: {}",
            config_file.display()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    Config::default().save_to(config_file)?;

    render_success(&format!(
        "Configuration initialized at: {}",
        config_file.display()
    ));
    println!();
    println!("You can edit it with: roster config edit");

    Ok(())
}
