use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

use crate::models::taxonomy::{Curriculum, SchoolDirectory};

/// Load the curriculum taxonomy from a TOML file
pub async fn load_curriculum(path: &Path) -> Result<Curriculum> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read curriculum file: {}", path.display()))?;

    let curriculum: Curriculum = toml::from_str(&content)
        .with_context(|| format!("failed to parse curriculum file: {}", path.display()))?;

    Ok(curriculum)
}

/// Load the curriculum taxonomy, falling back to the built-in one
pub async fn load_curriculum_or_default(path: &str) -> Curriculum {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "curriculum file {} not found, using built-in curriculum",
            path.display()
        );
        return Curriculum::default_curriculum();
    }

    match load_curriculum(path).await {
        Ok(curriculum) => {
            tracing::info!("loaded curriculum from {}", path.display());
            curriculum
        }
        Err(e) => {
            tracing::warn!("{:#}, using built-in curriculum", e);
            Curriculum::default_curriculum()
        }
    }
}

/// Load the school directory from a TOML file
pub async fn load_schools(path: &Path) -> Result<SchoolDirectory> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read schools file: {}", path.display()))?;

    let directory: SchoolDirectory = toml::from_str(&content)
        .with_context(|| format!("failed to parse schools file: {}", path.display()))?;

    Ok(directory)
}

/// Load the school directory, falling back to the built-in one
pub async fn load_schools_or_default(path: &str) -> SchoolDirectory {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "schools file {} not found, using built-in directory",
            path.display()
        );
        return SchoolDirectory::default_directory();
    }

    match load_schools(path).await {
        Ok(directory) => {
            tracing::info!("loaded school directory from {}", path.display());
            directory
        }
        Err(e) => {
            tracing::warn!("{:#}, using built-in directory", e);
            SchoolDirectory::default_directory()
        }
    }
}
