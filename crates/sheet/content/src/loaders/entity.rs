//! Entity document loader.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use sheet_core::Entity;
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// On-disk encoding of an entity document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Ron,
    #[cfg(feature = "json")]
    Json,
}

impl DocumentFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("ron") => Ok(DocumentFormat::Ron),
            #[cfg(feature = "json")]
            Some("json") => Ok(DocumentFormat::Json),
            _ => bail!("unsupported document extension: {}", path.display()),
        }
    }
}

/// Loader for entity documents.
pub struct EntityLoader;

impl EntityLoader {
    /// Load one entity document, choosing RON or JSON by extension.
    pub fn load(path: &Path) -> LoadResult<Entity> {
        let format = DocumentFormat::from_path(path)?;
        let content = read_file(path)?;
        let entity = Self::parse(&content, format)
            .with_context(|| format!("failed to parse entity document {}", path.display()))?;
        debug!(
            entity = %entity.id,
            kind = %entity.kind,
            items = entity.items.len(),
            "loaded entity document"
        );
        Ok(entity)
    }

    pub fn parse(content: &str, format: DocumentFormat) -> LoadResult<Entity> {
        let entity = match format {
            DocumentFormat::Ron => ron::from_str(content)?,
            #[cfg(feature = "json")]
            DocumentFormat::Json => serde_json::from_str(content)?,
        };
        Ok(entity)
    }

    /// Load every supported document in a directory, ordered by file name.
    ///
    /// Files with other extensions are skipped.
    pub fn load_dir(dir: &Path) -> LoadResult<Vec<Entity>> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("failed to list {}", dir.display()))?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("failed to list {}", dir.display()))?
                .path();
            if path.is_file() && DocumentFormat::from_path(&path).is_ok() {
                paths.push(path);
            }
        }
        paths.sort();

        paths.iter().map(|path| Self::load(path)).collect()
    }
}
