use super::prompts;
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use popcorn_config::{Config, CredentialStore, PathManager, API_KEY_ENV};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, output).await,
        crate::ConfigCommands::ApiKey { key } => configure_api_key(key, output).await,
        crate::ConfigCommands::Init => init_config(output).await,
    }
}

/// Where the effective API key comes from
fn api_key_source(cred_store: &CredentialStore) -> (&'static str, Option<String>) {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => ("environment", Some(key)),
        _ => match cred_store.get_omdb_api_key() {
            Some(key) => ("credentials file", Some(key.clone())),
            None => ("not set", None),
        },
    }
}

async fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let config = super::load_config()?;

    let mut cred_store = CredentialStore::new(path_manager.credentials_file());
    cred_store
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
    let (key_source, api_key) = api_key_source(&cred_store);
    let key_display = match &api_key {
        Some(key) if full => key.clone(),
        Some(key) => mask_string(key),
        None => "<not set>".to_string(),
    };

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            if !config_file.exists() {
                output.warn(format!("Configuration file not found at: {}", config_file.display()));
                output.info("Using defaults. Run 'popcorn config init' to write them to disk.");
                println!();
            }

            println!("{}", "Configuration".bright_cyan().bold());

            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.set_header(vec![
                Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
                Cell::new("Value").fg(Color::Cyan).add_attribute(Attribute::Bold),
            ]);
            table.add_row(vec![Cell::new("Config File"), Cell::new(config_file.display().to_string())]);
            table.add_row(vec![Cell::new("Data Directory"), Cell::new(path_manager.data_dir().display().to_string())]);
            table.add_row(vec![Cell::new("OMDb URL"), Cell::new(&config.omdb.base_url)]);
            table.add_row(vec![
                Cell::new("OMDb API Key"),
                Cell::new(format!("{} ({})", key_display, key_source)),
            ]);
            table.add_row(vec![
                Cell::new("Request Timeout"),
                Cell::new(format!("{}s", config.omdb.request_timeout_secs)),
            ]);
            table.add_row(vec![
                Cell::new("Min Query Length"),
                Cell::new(config.search.min_query_length),
            ]);
            table.add_row(vec![Cell::new("Watched List Key"), Cell::new(&config.storage.watched_key)]);
            table.add_row(vec![Cell::new("Exchange URL"), Cell::new(&config.exchange.base_url)]);
            table.add_row(vec![
                Cell::new("Log File"),
                Cell::new(
                    config
                        .logging
                        .file
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "stderr".to_string()),
                ),
            ]);
            println!("{}", table);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "data_dir": path_manager.data_dir().display().to_string(),
                "omdb": {
                    "base_url": config.omdb.base_url,
                    "request_timeout_secs": config.omdb.request_timeout_secs,
                    "api_key": api_key.as_ref().map(|_| key_display.clone()),
                    "api_key_source": key_source,
                },
                "search": config.search,
                "storage": config.storage,
                "exchange": config.exchange,
                "logging": config.logging,
            }));
        }
    }

    Ok(())
}

async fn configure_api_key(key: Option<String>, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create config directories: {}", e))?;

    let key = match key {
        Some(key) => key,
        None => {
            output.println("Get a free key at https://www.omdbapi.com/apikey.aspx");
            prompts::prompt_password("OMDb API key")?
        }
    };
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(eyre!("API key cannot be empty"));
    }

    let mut cred_store = CredentialStore::new(path_manager.credentials_file());
    cred_store
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
    cred_store.set_omdb_api_key(key);
    cred_store
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success(format!("API key saved to {}", path_manager.credentials_file().display()));
    if std::env::var(API_KEY_ENV).is_ok() {
        output.warn(format!("{} is set and takes precedence over the stored key", API_KEY_ENV));
    }

    Ok(())
}

async fn init_config(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if config_file.exists()
        && !prompts::prompt_yes_no(
            &format!("{} exists. Overwrite with defaults?", config_file.display()),
            Some(false),
        )?
    {
        output.info("Left existing configuration untouched");
        return Ok(());
    }

    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create config directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write config to {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}

fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return "<not set>".to_string();
    }
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abcd"), "****");
        assert_eq!(mask_string("a1b2c3d4"), "a1***d4");
    }
}
