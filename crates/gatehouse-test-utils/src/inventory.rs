//! In-memory inventory services for tests.

use async_trait::async_trait;

use gatehouse_core::error::{Error, Result};
use gatehouse_core::inventory::{InventoryService, Resource, ResourceGroup};

/// Inventory serving fixed in-memory snapshots.
#[derive(Debug, Default, Clone)]
pub struct StaticInventory {
    resources: Vec<Resource>,
    groups: Vec<ResourceGroup>,
}

impl StaticInventory {
    /// Create an inventory with the given snapshots.
    pub fn new(resources: Vec<Resource>, groups: Vec<ResourceGroup>) -> Self {
        Self { resources, groups }
    }

    /// The standard three-host fixture with two groups.
    pub fn sample() -> Self {
        Self::new(sample_resources(), sample_groups())
    }
}

#[async_trait]
impl InventoryService for StaticInventory {
    async fn fetch_resources(&self, _user: &str) -> Result<Vec<Resource>> {
        Ok(self.resources.clone())
    }

    async fn fetch_resource_groups(&self, _user: &str) -> Result<Vec<ResourceGroup>> {
        Ok(self.groups.clone())
    }
}

/// Inventory whose fetches always fail, for exercising the empty-set
/// fallback.
#[derive(Debug, Default, Clone)]
pub struct FailingInventory;

#[async_trait]
impl InventoryService for FailingInventory {
    async fn fetch_resources(&self, _user: &str) -> Result<Vec<Resource>> {
        Err(Error::Inventory {
            message: "backend unreachable".to_string(),
        })
    }

    async fn fetch_resource_groups(&self, _user: &str) -> Result<Vec<ResourceGroup>> {
        Err(Error::Inventory {
            message: "backend unreachable".to_string(),
        })
    }
}

/// Three hosts: web1, web2, db1.
pub fn sample_resources() -> Vec<Resource> {
    vec![
        Resource {
            hostname: "web1".to_string(),
            address: "10.0.0.1".to_string(),
            port: 22,
            identities: vec!["root".to_string(), "deploy".to_string()],
            comment: "frontend".to_string(),
        },
        Resource {
            hostname: "web2".to_string(),
            address: "10.0.0.2".to_string(),
            port: 22,
            identities: vec!["root".to_string()],
            comment: "frontend".to_string(),
        },
        Resource {
            hostname: "db1".to_string(),
            address: "10.0.0.3".to_string(),
            port: 22,
            identities: vec!["postgres".to_string()],
            comment: "primary database".to_string(),
        },
    ]
}

/// Two groups over the sample resources: web (2 members), db (1 member).
pub fn sample_groups() -> Vec<ResourceGroup> {
    let resources = sample_resources();
    vec![
        ResourceGroup {
            name: "web".to_string(),
            comment: "frontend fleet".to_string(),
            members: vec![resources[0].clone(), resources[1].clone()],
        },
        ResourceGroup {
            name: "db".to_string(),
            comment: "databases".to_string(),
            members: vec![resources[2].clone()],
        },
    ]
}

// =============================================================================
// Tests
// =============================================================================
