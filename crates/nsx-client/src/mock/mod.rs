//! Mock NsxClient for unit testing
//!
//! This module provides an in-memory implementation of [`NsxApiClient`] that
//! simulates the manager closely enough for the provisioning handlers:
//! object stores per family, uuid object ids, display-name defaulting, and
//! `_revision` enforcement on update.
//!
//! The mock is organized into domain-specific modules:
//! - `dhcp.rs` - DHCP server IP pools
//! - `services.rs` - Grouping-objects NS services
//! - `routing.rs` - Logical routers and advertisement configs

mod dhcp;
mod routing;
mod services;

use crate::error::NsxError;
use crate::models::*;
use crate::nsx_trait::NsxApiClient;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock NsxClient for testing
///
/// Stores objects in memory; test setup seeds parent objects (logical DHCP
/// servers) via the `add_*` helpers.
#[derive(Debug, Clone)]
pub struct MockNsxClient {
    pub(crate) base_url: String,
    // In-memory object stores
    pub(crate) dhcp_servers: Arc<Mutex<HashSet<String>>>,
    // Pools are keyed by (server id, pool id) to enforce parent scoping
    pub(crate) dhcp_pools: Arc<Mutex<HashMap<(String, String), DhcpIpPool>>>,
    pub(crate) services: Arc<Mutex<HashMap<String, IcmpTypeNsService>>>,
    pub(crate) routers: Arc<Mutex<HashMap<String, LogicalRouter>>>,
    pub(crate) advertisements: Arc<Mutex<HashMap<String, AdvertisementConfig>>>,
}

impl MockNsxClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            dhcp_servers: Arc::new(Mutex::new(HashSet::new())),
            dhcp_pools: Arc::new(Mutex::new(HashMap::new())),
            services: Arc::new(Mutex::new(HashMap::new())),
            routers: Arc::new(Mutex::new(HashMap::new())),
            advertisements: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Seed a logical DHCP server (for test setup)
    pub fn add_dhcp_server(&self, id: impl Into<String>) {
        self.dhcp_servers.lock().unwrap().insert(id.into());
    }

    /// Delete an object out-of-band, bypassing the client API (for drift tests)
    pub fn remove_dhcp_ip_pool(&self, server_id: &str, id: &str) {
        self.dhcp_pools
            .lock()
            .unwrap()
            .remove(&(server_id.to_string(), id.to_string()));
    }

    /// Delete a service out-of-band (for drift tests)
    pub fn remove_icmp_type_service(&self, id: &str) {
        self.services.lock().unwrap().remove(id);
    }

    /// Delete a router out-of-band (for drift tests)
    pub fn remove_logical_router(&self, id: &str) {
        self.routers.lock().unwrap().remove(id);
        self.advertisements.lock().unwrap().remove(id);
    }

    /// Generate the next object id
    pub(crate) fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Reject an update whose `_revision` does not match the stored object,
/// the way the manager does.
pub(crate) fn check_revision(submitted: i64, stored: i64, what: &str) -> Result<(), NsxError> {
    if submitted != stored {
        return Err(NsxError::UnexpectedStatus {
            status: 412,
            body: format!(
                "{}: revision {} does not match current revision {}",
                what, submitted, stored
            ),
        });
    }
    Ok(())
}

#[async_trait::async_trait]
impl NsxApiClient for MockNsxClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn validate_credentials(&self) -> Result<(), NsxError> {
        Ok(())
    }

    async fn create_dhcp_ip_pool(
        &self,
        server_id: &str,
        pool: &DhcpIpPool,
    ) -> Result<DhcpIpPool, NsxError> {
        dhcp::create_dhcp_ip_pool(self, server_id, pool).await
    }

    async fn read_dhcp_ip_pool(&self, server_id: &str, id: &str) -> Result<DhcpIpPool, NsxError> {
        dhcp::read_dhcp_ip_pool(self, server_id, id).await
    }

    async fn update_dhcp_ip_pool(
        &self,
        server_id: &str,
        id: &str,
        pool: &DhcpIpPool,
    ) -> Result<DhcpIpPool, NsxError> {
        dhcp::update_dhcp_ip_pool(self, server_id, id, pool).await
    }

    async fn delete_dhcp_ip_pool(&self, server_id: &str, id: &str) -> Result<(), NsxError> {
        dhcp::delete_dhcp_ip_pool(self, server_id, id).await
    }

    async fn list_dhcp_ip_pools(&self, server_id: &str) -> Result<Vec<DhcpIpPool>, NsxError> {
        dhcp::list_dhcp_ip_pools(self, server_id).await
    }

    async fn create_icmp_type_service(
        &self,
        service: &IcmpTypeNsService,
    ) -> Result<IcmpTypeNsService, NsxError> {
        services::create_icmp_type_service(self, service).await
    }

    async fn read_icmp_type_service(&self, id: &str) -> Result<IcmpTypeNsService, NsxError> {
        services::read_icmp_type_service(self, id).await
    }

    async fn update_icmp_type_service(
        &self,
        id: &str,
        service: &IcmpTypeNsService,
    ) -> Result<IcmpTypeNsService, NsxError> {
        services::update_icmp_type_service(self, id, service).await
    }

    async fn delete_icmp_type_service(&self, id: &str) -> Result<(), NsxError> {
        services::delete_icmp_type_service(self, id).await
    }

    async fn list_icmp_type_services(&self) -> Result<Vec<IcmpTypeNsService>, NsxError> {
        services::list_icmp_type_services(self).await
    }

    async fn create_logical_router(
        &self,
        router: &LogicalRouter,
    ) -> Result<LogicalRouter, NsxError> {
        routing::create_logical_router(self, router).await
    }

    async fn read_logical_router(&self, id: &str) -> Result<LogicalRouter, NsxError> {
        routing::read_logical_router(self, id).await
    }

    async fn update_logical_router(
        &self,
        id: &str,
        router: &LogicalRouter,
    ) -> Result<LogicalRouter, NsxError> {
        routing::update_logical_router(self, id, router).await
    }

    async fn delete_logical_router(&self, id: &str) -> Result<(), NsxError> {
        routing::delete_logical_router(self, id).await
    }

    async fn list_logical_routers(
        &self,
        router_type: Option<&str>,
    ) -> Result<Vec<LogicalRouter>, NsxError> {
        routing::list_logical_routers(self, router_type).await
    }

    async fn read_advertisement_config(
        &self,
        router_id: &str,
    ) -> Result<AdvertisementConfig, NsxError> {
        routing::read_advertisement_config(self, router_id).await
    }

    async fn update_advertisement_config(
        &self,
        router_id: &str,
        config: &AdvertisementConfig,
    ) -> Result<AdvertisementConfig, NsxError> {
        routing::update_advertisement_config(self, router_id, config).await
    }
}
