use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::PathManager;
use std::fs;

pub async fn run_clear(all: bool, watched: bool, credentials: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();

    if all {
        clear_watched(&path_manager, output).await?;
        clear_credentials(&path_manager, output).await?;
        output.success("Watched list and credentials cleared");
        return Ok(());
    }

    let mut cleared_anything = false;

    if watched {
        clear_watched(&path_manager, output).await?;
        cleared_anything = true;
    }

    if credentials {
        clear_credentials(&path_manager, output).await?;
        cleared_anything = true;
    }

    if !cleared_anything {
        output.warn("No clear option specified. Use --watched, --credentials, or --all");
        output.println("\nExample: popcorn clear --watched");
    }

    Ok(())
}

async fn clear_watched(path_manager: &PathManager, output: &Output) -> Result<()> {
    let config = super::load_config()?;
    let store = super::watched_store(&config, path_manager);

    let existed = path_manager.store_file(store.key()).exists();
    store
        .clear()
        .map_err(|e| eyre!("Failed to clear watched list: {}", e))?;

    if existed {
        output.success(format!("Cleared watched list: {}", path_manager.store_file(store.key()).display()));
    } else {
        output.info("No watched list found to clear");
    }

    Ok(())
}

async fn clear_credentials(path_manager: &PathManager, output: &Output) -> Result<()> {
    let credentials_file = path_manager.credentials_file();

    if credentials_file.exists() {
        fs::remove_file(&credentials_file)
            .map_err(|e| eyre!("Failed to remove credentials file at {}: {}", credentials_file.display(), e))?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }

    Ok(())
}
