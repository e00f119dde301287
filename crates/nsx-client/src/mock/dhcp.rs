//! DHCP operations for MockNsxClient
//!
//! Pools live under a seeded logical DHCP server; creating a pool under an
//! unknown server returns NotFound, as the manager does.

use super::{check_revision, MockNsxClient};
use crate::error::NsxError;
use crate::models::*;

pub async fn create_dhcp_ip_pool(
    client: &MockNsxClient,
    server_id: &str,
    pool: &DhcpIpPool,
) -> Result<DhcpIpPool, NsxError> {
    if !client.dhcp_servers.lock().unwrap().contains(server_id) {
        return Err(NsxError::NotFound(format!(
            "Logical DHCP server {} not found",
            server_id
        )));
    }

    let id = client.next_id();
    let mut created = pool.clone();
    created.id = id.clone();
    // Manager defaults the display name to the id
    if created.display_name.is_empty() {
        created.display_name = id.clone();
    }
    created.revision = 0;

    client
        .dhcp_pools
        .lock()
        .unwrap()
        .insert((server_id.to_string(), id), created.clone());
    Ok(created)
}

pub async fn read_dhcp_ip_pool(
    client: &MockNsxClient,
    server_id: &str,
    id: &str,
) -> Result<DhcpIpPool, NsxError> {
    client
        .dhcp_pools
        .lock()
        .unwrap()
        .get(&(server_id.to_string(), id.to_string()))
        .cloned()
        .ok_or_else(|| NsxError::NotFound(format!("DHCP IP pool {} not found", id)))
}

pub async fn update_dhcp_ip_pool(
    client: &MockNsxClient,
    server_id: &str,
    id: &str,
    pool: &DhcpIpPool,
) -> Result<DhcpIpPool, NsxError> {
    let mut pools = client.dhcp_pools.lock().unwrap();
    let key = (server_id.to_string(), id.to_string());
    let stored = pools
        .get(&key)
        .ok_or_else(|| NsxError::NotFound(format!("DHCP IP pool {} not found", id)))?;

    check_revision(pool.revision, stored.revision, "DhcpIpPool")?;

    let mut updated = pool.clone();
    updated.id = id.to_string();
    if updated.display_name.is_empty() {
        updated.display_name = id.to_string();
    }
    updated.revision = stored.revision + 1;

    pools.insert(key, updated.clone());
    Ok(updated)
}

pub async fn delete_dhcp_ip_pool(
    client: &MockNsxClient,
    server_id: &str,
    id: &str,
) -> Result<(), NsxError> {
    client
        .dhcp_pools
        .lock()
        .unwrap()
        .remove(&(server_id.to_string(), id.to_string()))
        .map(|_| ())
        .ok_or_else(|| NsxError::NotFound(format!("DHCP IP pool {} not found", id)))
}

pub async fn list_dhcp_ip_pools(
    client: &MockNsxClient,
    server_id: &str,
) -> Result<Vec<DhcpIpPool>, NsxError> {
    if !client.dhcp_servers.lock().unwrap().contains(server_id) {
        return Err(NsxError::NotFound(format!(
            "Logical DHCP server {} not found",
            server_id
        )));
    }

    let pools = client.dhcp_pools.lock().unwrap();
    Ok(pools
        .iter()
        .filter(|((server, _), _)| server == server_id)
        .map(|(_, pool)| pool.clone())
        .collect())
}
