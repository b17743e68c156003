use std::path::PathBuf;

use thiserror::Error;

/// Catalog invariants that a category list failed to satisfy.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("duplicate media id '{0}'")]
    DuplicateId(String),
    #[error("duplicate category id '{0}'")]
    DuplicateCategory(String),
    #[error("item '{item}' references category '{category}' but sits in '{container}'")]
    CategoryMismatch {
        item: String,
        category: String,
        container: String,
    },
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid manifest JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
