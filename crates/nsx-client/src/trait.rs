//! NsxClient trait for mocking
//!
//! This trait abstracts the NsxClient so the provisioning handlers can be
//! driven against a simulated manager in tests. The concrete NsxClient
//! implements this trait, and the `test-util` mock provides the simulation.

use crate::error::NsxError;
use crate::models::*;

/// Trait for NSX manager API client operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait NsxApiClient: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// Validate the API credentials
    async fn validate_credentials(&self) -> Result<(), NsxError>;

    // DHCP Operations
    async fn create_dhcp_ip_pool(
        &self,
        server_id: &str,
        pool: &DhcpIpPool,
    ) -> Result<DhcpIpPool, NsxError>;
    async fn read_dhcp_ip_pool(&self, server_id: &str, id: &str) -> Result<DhcpIpPool, NsxError>;
    async fn update_dhcp_ip_pool(
        &self,
        server_id: &str,
        id: &str,
        pool: &DhcpIpPool,
    ) -> Result<DhcpIpPool, NsxError>;
    async fn delete_dhcp_ip_pool(&self, server_id: &str, id: &str) -> Result<(), NsxError>;
    async fn list_dhcp_ip_pools(&self, server_id: &str) -> Result<Vec<DhcpIpPool>, NsxError>;

    // Grouping Objects Operations
    async fn create_icmp_type_service(
        &self,
        service: &IcmpTypeNsService,
    ) -> Result<IcmpTypeNsService, NsxError>;
    async fn read_icmp_type_service(&self, id: &str) -> Result<IcmpTypeNsService, NsxError>;
    async fn update_icmp_type_service(
        &self,
        id: &str,
        service: &IcmpTypeNsService,
    ) -> Result<IcmpTypeNsService, NsxError>;
    async fn delete_icmp_type_service(&self, id: &str) -> Result<(), NsxError>;
    async fn list_icmp_type_services(&self) -> Result<Vec<IcmpTypeNsService>, NsxError>;

    // Logical Routing Operations
    async fn create_logical_router(&self, router: &LogicalRouter)
        -> Result<LogicalRouter, NsxError>;
    async fn read_logical_router(&self, id: &str) -> Result<LogicalRouter, NsxError>;
    async fn update_logical_router(
        &self,
        id: &str,
        router: &LogicalRouter,
    ) -> Result<LogicalRouter, NsxError>;
    async fn delete_logical_router(&self, id: &str) -> Result<(), NsxError>;
    async fn list_logical_routers(
        &self,
        router_type: Option<&str>,
    ) -> Result<Vec<LogicalRouter>, NsxError>;
    async fn read_advertisement_config(
        &self,
        router_id: &str,
    ) -> Result<AdvertisementConfig, NsxError>;
    async fn update_advertisement_config(
        &self,
        router_id: &str,
        config: &AdvertisementConfig,
    ) -> Result<AdvertisementConfig, NsxError>;
}
