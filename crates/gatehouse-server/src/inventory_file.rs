//! File-backed inventory for standalone deployments.
//!
//! A JSON document with `resources` and `groups` arrays stands in for
//! the backend inventory service. Each fetch re-reads the file, so
//! edits show up on the next session without a restart.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use gatehouse_core::error::{Error, Result};
use gatehouse_core::inventory::{InventoryService, Resource, ResourceGroup};

/// On-disk inventory document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryFile {
    /// Resources visible to every user of this gateway.
    #[serde(default)]
    pub resources: Vec<Resource>,
    /// Resource groups visible to every user of this gateway.
    #[serde(default)]
    pub groups: Vec<ResourceGroup>,
}

/// Inventory service reading a JSON file.
#[derive(Debug, Clone)]
pub struct FileInventory {
    path: PathBuf,
}

impl FileInventory {
    /// Serve inventory from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<InventoryFile> {
        let data = tokio::fs::read(&self.path).await?;
        serde_json::from_slice(&data).map_err(|e| Error::Inventory {
            message: format!("{}: {e}", self.path.display()),
        })
    }
}

#[async_trait]
impl InventoryService for FileInventory {
    async fn fetch_resources(&self, _user: &str) -> Result<Vec<Resource>> {
        Ok(self.load().await?.resources)
    }

    async fn fetch_resource_groups(&self, _user: &str) -> Result<Vec<ResourceGroup>> {
        Ok(self.load().await?.groups)
    }
}

// =============================================================================
// Tests
// =============================================================================
