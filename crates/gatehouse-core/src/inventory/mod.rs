//! Inventory model: resources, resource groups, and the fetch seam.
//!
//! The authoritative resource and group lists live in an external
//! inventory service; this module defines the immutable snapshot types
//! the session works with, the collaborator trait used to fetch them,
//! and the write-once background prefetch cell.

mod prefetch;

pub use prefetch::Prefetch;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An addressable backend target a user may connect to.
///
/// Owned and supplied by the inventory collaborator; immutable from the
/// session's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Host identifier shown in listings and matched by the resolver.
    pub hostname: String,
    /// Network address of the target.
    pub address: String,
    /// Port the forwarding component dials.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Login identities eligible for this resource.
    #[serde(default)]
    pub identities: Vec<String>,
    /// Free-text annotation.
    #[serde(default)]
    pub comment: String,
}

fn default_port() -> u16 {
    22
}

impl Resource {
    /// Eligible identities joined for the LoginAs listing column.
    pub fn login_summary(&self) -> String {
        self.identities.join(", ")
    }

    /// Address the forwarding component dials.
    pub fn dial_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

/// A named collection of resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroup {
    /// Group name shown in listings.
    pub name: String,
    /// Free-text annotation.
    #[serde(default)]
    pub comment: String,
    /// Member resources granted through this group.
    #[serde(default)]
    pub members: Vec<Resource>,
}

impl ResourceGroup {
    /// Number of member resources.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

// =============================================================================
// Listing Order
// =============================================================================

/// Sort key applied to resource listings before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Order by host identifier.
    #[default]
    Hostname,
    /// Order by network address, numerically when the address parses as an IP.
    Address,
}

/// Sort a resource listing in place by the configured key.
pub fn sort_resources(resources: &mut [Resource], key: SortKey) {
    match key {
        SortKey::Hostname => resources.sort_by(|a, b| a.hostname.cmp(&b.hostname)),
        SortKey::Address => resources.sort_by(|a, b| address_rank(a).cmp(&address_rank(b))),
    }
}

/// IP addresses order numerically and ahead of non-IP addresses, which
/// fall back to lexicographic order.
fn address_rank(resource: &Resource) -> (u8, Option<std::net::IpAddr>, &str) {
    match resource.address.parse::<std::net::IpAddr>() {
        Ok(ip) => (0, Some(ip), ""),
        Err(_) => (1, None, resource.address.as_str()),
    }
}

// =============================================================================
// Fetch Seam
// =============================================================================

/// Collaborator supplying the current user's visible inventory.
///
/// Fetch failures are treated as an empty set by consumers; the core
/// must not crash on an empty inventory.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Fetch the resources visible to `user`.
    async fn fetch_resources(&self, user: &str) -> Result<Vec<Resource>>;

    /// Fetch the resource groups visible to `user`.
    async fn fetch_resource_groups(&self, user: &str) -> Result<Vec<ResourceGroup>>;
}

// =============================================================================
// Tests
// =============================================================================
