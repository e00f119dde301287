//! NSX manager API client
//!
//! Implements the manager REST endpoints the provisioning handlers depend
//! on: DHCP server IP pools, ICMP-type NS services, and logical routers
//! with their route advertisement configuration.

use crate::common::{query, HttpClient};
use crate::error::NsxError;
use crate::models::*;
use crate::nsx_trait::NsxApiClient;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// NSX manager API client
#[derive(Debug)]
pub struct NsxClient {
    http: HttpClient,
}

impl NsxClient {
    /// Create a new NSX client
    ///
    /// # Arguments
    /// * `base_url` - Manager base URL (e.g., "https://nsx-manager")
    /// * `username` - API username
    /// * `password` - API password
    /// * `insecure` - Accept the manager's self-signed certificate
    pub fn new(
        base_url: String,
        username: String,
        password: String,
        insecure: bool,
    ) -> Result<Self, NsxError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(NsxError::Http)?;

        Ok(Self {
            http: HttpClient::new(client, base_url, username, password),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Validate the credentials by making a lightweight authenticated request.
    ///
    /// # Returns
    /// * `Ok(())` - Credentials are valid and the manager is reachable
    /// * `Err(NsxError)` - Credentials are invalid or the manager is unreachable
    pub async fn validate_credentials(&self) -> Result<(), NsxError> {
        debug!("Validating NSX manager credentials and connectivity");
        let (status, body) = self.http.get_status("/api/v1/node").await?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(NsxError::Authentication(format!(
                "invalid credentials: {} - {}",
                status, body
            )));
        }

        if !status.is_success() {
            return Err(NsxError::UnexpectedStatus {
                status: status.as_u16(),
                body: format!("failed to validate credentials: {}", body),
            });
        }

        debug!("Credentials validated successfully");
        Ok(())
    }

    // ====================
    // DHCP IP Pool Methods
    // ====================

    /// Create a DHCP IP pool under a logical DHCP server
    pub async fn create_dhcp_ip_pool(
        &self,
        server_id: &str,
        pool: &DhcpIpPool,
    ) -> Result<DhcpIpPool, NsxError> {
        debug!("Creating DHCP IP pool under server {}", server_id);
        self.http
            .post(&format!("/api/v1/dhcp/servers/{}/ip-pools", server_id), pool)
            .await
    }

    /// Read a DHCP IP pool by id
    pub async fn read_dhcp_ip_pool(
        &self,
        server_id: &str,
        id: &str,
    ) -> Result<DhcpIpPool, NsxError> {
        debug!("Fetching DHCP IP pool {} from server {}", id, server_id);
        self.http
            .get(&format!("/api/v1/dhcp/servers/{}/ip-pools/{}", server_id, id))
            .await
    }

    /// Update a DHCP IP pool (full object, `_revision` required)
    pub async fn update_dhcp_ip_pool(
        &self,
        server_id: &str,
        id: &str,
        pool: &DhcpIpPool,
    ) -> Result<DhcpIpPool, NsxError> {
        debug!("Updating DHCP IP pool {} on server {}", id, server_id);
        self.http
            .put(
                &format!("/api/v1/dhcp/servers/{}/ip-pools/{}", server_id, id),
                pool,
            )
            .await
    }

    /// Delete a DHCP IP pool
    pub async fn delete_dhcp_ip_pool(&self, server_id: &str, id: &str) -> Result<(), NsxError> {
        debug!("Deleting DHCP IP pool {} from server {}", id, server_id);
        self.http
            .delete(&format!("/api/v1/dhcp/servers/{}/ip-pools/{}", server_id, id))
            .await
    }

    /// List the IP pools of a logical DHCP server
    pub async fn list_dhcp_ip_pools(&self, server_id: &str) -> Result<Vec<DhcpIpPool>, NsxError> {
        debug!("Listing DHCP IP pools of server {}", server_id);
        query::list_resources(
            &self.http,
            &format!("/api/v1/dhcp/servers/{}/ip-pools", server_id),
            &[],
        )
        .await
    }

    // ====================
    // ICMP NS Service Methods
    // ====================

    /// Create an ICMP-type NS service
    pub async fn create_icmp_type_service(
        &self,
        service: &IcmpTypeNsService,
    ) -> Result<IcmpTypeNsService, NsxError> {
        debug!("Creating ICMP NS service {}", service.display_name);
        self.http.post("/api/v1/ns-services", service).await
    }

    /// Read an ICMP-type NS service by id
    pub async fn read_icmp_type_service(&self, id: &str) -> Result<IcmpTypeNsService, NsxError> {
        debug!("Fetching ICMP NS service {}", id);
        self.http.get(&format!("/api/v1/ns-services/{}", id)).await
    }

    /// Update an ICMP-type NS service (full object, `_revision` required)
    pub async fn update_icmp_type_service(
        &self,
        id: &str,
        service: &IcmpTypeNsService,
    ) -> Result<IcmpTypeNsService, NsxError> {
        debug!("Updating ICMP NS service {}", id);
        self.http
            .put(&format!("/api/v1/ns-services/{}", id), service)
            .await
    }

    /// Delete an ICMP-type NS service
    pub async fn delete_icmp_type_service(&self, id: &str) -> Result<(), NsxError> {
        debug!("Deleting ICMP NS service {}", id);
        self.http
            .delete(&format!("/api/v1/ns-services/{}", id))
            .await
    }

    /// List ICMP-type NS services
    pub async fn list_icmp_type_services(&self) -> Result<Vec<IcmpTypeNsService>, NsxError> {
        debug!("Listing ICMP NS services");
        query::list_resources(&self.http, "/api/v1/ns-services", &[]).await
    }

    // ====================
    // Logical Router Methods
    // ====================

    /// Create a logical router
    pub async fn create_logical_router(
        &self,
        router: &LogicalRouter,
    ) -> Result<LogicalRouter, NsxError> {
        debug!("Creating logical router {}", router.display_name);
        self.http.post("/api/v1/logical-routers", router).await
    }

    /// Read a logical router by id
    pub async fn read_logical_router(&self, id: &str) -> Result<LogicalRouter, NsxError> {
        debug!("Fetching logical router {}", id);
        self.http
            .get(&format!("/api/v1/logical-routers/{}", id))
            .await
    }

    /// Update a logical router (full object, `_revision` required)
    pub async fn update_logical_router(
        &self,
        id: &str,
        router: &LogicalRouter,
    ) -> Result<LogicalRouter, NsxError> {
        debug!("Updating logical router {}", id);
        self.http
            .put(&format!("/api/v1/logical-routers/{}", id), router)
            .await
    }

    /// Delete a logical router
    pub async fn delete_logical_router(&self, id: &str) -> Result<(), NsxError> {
        debug!("Deleting logical router {}", id);
        self.http
            .delete(&format!("/api/v1/logical-routers/{}", id))
            .await
    }

    /// List logical routers, optionally filtered by router type
    ///
    /// # Arguments
    /// * `router_type` - Optional filter, e.g. `Some("TIER1")`
    pub async fn list_logical_routers(
        &self,
        router_type: Option<&str>,
    ) -> Result<Vec<LogicalRouter>, NsxError> {
        debug!("Listing logical routers (type filter: {:?})", router_type);
        let filters: Vec<(&str, &str)> = router_type
            .map(|t| vec![("router_type", t)])
            .unwrap_or_default();
        query::list_resources(&self.http, "/api/v1/logical-routers", &filters).await
    }

    /// Read the route advertisement configuration of a logical router
    pub async fn read_advertisement_config(
        &self,
        router_id: &str,
    ) -> Result<AdvertisementConfig, NsxError> {
        debug!("Fetching advertisement config of router {}", router_id);
        self.http
            .get(&format!(
                "/api/v1/logical-routers/{}/routing/advertisement",
                router_id
            ))
            .await
    }

    /// Update the route advertisement configuration of a logical router
    pub async fn update_advertisement_config(
        &self,
        router_id: &str,
        config: &AdvertisementConfig,
    ) -> Result<AdvertisementConfig, NsxError> {
        debug!("Updating advertisement config of router {}", router_id);
        self.http
            .put(
                &format!("/api/v1/logical-routers/{}/routing/advertisement", router_id),
                config,
            )
            .await
    }
}

#[async_trait::async_trait]
impl NsxApiClient for NsxClient {
    fn base_url(&self) -> &str {
        self.base_url()
    }

    async fn validate_credentials(&self) -> Result<(), NsxError> {
        self.validate_credentials().await
    }

    async fn create_dhcp_ip_pool(
        &self,
        server_id: &str,
        pool: &DhcpIpPool,
    ) -> Result<DhcpIpPool, NsxError> {
        self.create_dhcp_ip_pool(server_id, pool).await
    }

    async fn read_dhcp_ip_pool(&self, server_id: &str, id: &str) -> Result<DhcpIpPool, NsxError> {
        self.read_dhcp_ip_pool(server_id, id).await
    }

    async fn update_dhcp_ip_pool(
        &self,
        server_id: &str,
        id: &str,
        pool: &DhcpIpPool,
    ) -> Result<DhcpIpPool, NsxError> {
        self.update_dhcp_ip_pool(server_id, id, pool).await
    }

    async fn delete_dhcp_ip_pool(&self, server_id: &str, id: &str) -> Result<(), NsxError> {
        self.delete_dhcp_ip_pool(server_id, id).await
    }

    async fn list_dhcp_ip_pools(&self, server_id: &str) -> Result<Vec<DhcpIpPool>, NsxError> {
        self.list_dhcp_ip_pools(server_id).await
    }

    async fn create_icmp_type_service(
        &self,
        service: &IcmpTypeNsService,
    ) -> Result<IcmpTypeNsService, NsxError> {
        self.create_icmp_type_service(service).await
    }

    async fn read_icmp_type_service(&self, id: &str) -> Result<IcmpTypeNsService, NsxError> {
        self.read_icmp_type_service(id).await
    }

    async fn update_icmp_type_service(
        &self,
        id: &str,
        service: &IcmpTypeNsService,
    ) -> Result<IcmpTypeNsService, NsxError> {
        self.update_icmp_type_service(id, service).await
    }

    async fn delete_icmp_type_service(&self, id: &str) -> Result<(), NsxError> {
        self.delete_icmp_type_service(id).await
    }

    async fn list_icmp_type_services(&self) -> Result<Vec<IcmpTypeNsService>, NsxError> {
        self.list_icmp_type_services().await
    }

    async fn create_logical_router(
        &self,
        router: &LogicalRouter,
    ) -> Result<LogicalRouter, NsxError> {
        self.create_logical_router(router).await
    }

    async fn read_logical_router(&self, id: &str) -> Result<LogicalRouter, NsxError> {
        self.read_logical_router(id).await
    }

    async fn update_logical_router(
        &self,
        id: &str,
        router: &LogicalRouter,
    ) -> Result<LogicalRouter, NsxError> {
        self.update_logical_router(id, router).await
    }

    async fn delete_logical_router(&self, id: &str) -> Result<(), NsxError> {
        self.delete_logical_router(id).await
    }

    async fn list_logical_routers(
        &self,
        router_type: Option<&str>,
    ) -> Result<Vec<LogicalRouter>, NsxError> {
        self.list_logical_routers(router_type).await
    }

    async fn read_advertisement_config(
        &self,
        router_id: &str,
    ) -> Result<AdvertisementConfig, NsxError> {
        self.read_advertisement_config(router_id).await
    }

    async fn update_advertisement_config(
        &self,
        router_id: &str,
        config: &AdvertisementConfig,
    ) -> Result<AdvertisementConfig, NsxError> {
        self.update_advertisement_config(router_id, config).await
    }
}
