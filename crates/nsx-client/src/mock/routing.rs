//! Logical routing operations for MockNsxClient
//!
//! Creating a router implicitly creates its advertisement config (disabled,
//! all flags false), as the manager does; deleting the router removes it.

use super::{check_revision, MockNsxClient};
use crate::error::NsxError;
use crate::models::*;

pub async fn create_logical_router(
    client: &MockNsxClient,
    router: &LogicalRouter,
) -> Result<LogicalRouter, NsxError> {
    let id = client.next_id();
    let mut created = router.clone();
    created.id = id.clone();
    if created.display_name.is_empty() {
        created.display_name = id.clone();
    }
    created.revision = 0;

    client
        .routers
        .lock()
        .unwrap()
        .insert(id.clone(), created.clone());
    client.advertisements.lock().unwrap().insert(
        id,
        AdvertisementConfig {
            resource_type: "AdvertisementConfig".to_string(),
            ..Default::default()
        },
    );
    Ok(created)
}

pub async fn read_logical_router(
    client: &MockNsxClient,
    id: &str,
) -> Result<LogicalRouter, NsxError> {
    client
        .routers
        .lock()
        .unwrap()
        .get(id)
        .cloned()
        .ok_or_else(|| NsxError::NotFound(format!("Logical router {} not found", id)))
}

pub async fn update_logical_router(
    client: &MockNsxClient,
    id: &str,
    router: &LogicalRouter,
) -> Result<LogicalRouter, NsxError> {
    let mut routers = client.routers.lock().unwrap();
    let stored = routers
        .get(id)
        .ok_or_else(|| NsxError::NotFound(format!("Logical router {} not found", id)))?;

    check_revision(router.revision, stored.revision, "LogicalRouter")?;

    let mut updated = router.clone();
    updated.id = id.to_string();
    if updated.display_name.is_empty() {
        updated.display_name = id.to_string();
    }
    updated.revision = stored.revision + 1;

    routers.insert(id.to_string(), updated.clone());
    Ok(updated)
}

pub async fn delete_logical_router(client: &MockNsxClient, id: &str) -> Result<(), NsxError> {
    let removed = client.routers.lock().unwrap().remove(id);
    client.advertisements.lock().unwrap().remove(id);
    removed
        .map(|_| ())
        .ok_or_else(|| NsxError::NotFound(format!("Logical router {} not found", id)))
}

pub async fn list_logical_routers(
    client: &MockNsxClient,
    router_type: Option<&str>,
) -> Result<Vec<LogicalRouter>, NsxError> {
    let routers = client.routers.lock().unwrap();
    Ok(routers
        .values()
        .filter(|r| router_type.is_none_or(|t| r.router_type == t))
        .cloned()
        .collect())
}

pub async fn read_advertisement_config(
    client: &MockNsxClient,
    router_id: &str,
) -> Result<AdvertisementConfig, NsxError> {
    client
        .advertisements
        .lock()
        .unwrap()
        .get(router_id)
        .cloned()
        .ok_or_else(|| NsxError::NotFound(format!("Logical router {} not found", router_id)))
}

pub async fn update_advertisement_config(
    client: &MockNsxClient,
    router_id: &str,
    config: &AdvertisementConfig,
) -> Result<AdvertisementConfig, NsxError> {
    let mut advertisements = client.advertisements.lock().unwrap();
    let stored = advertisements
        .get(router_id)
        .ok_or_else(|| NsxError::NotFound(format!("Logical router {} not found", router_id)))?;

    check_revision(config.revision, stored.revision, "AdvertisementConfig")?;

    let mut updated = config.clone();
    updated.resource_type = "AdvertisementConfig".to_string();
    updated.revision = stored.revision + 1;

    advertisements.insert(router_id.to_string(), updated.clone());
    Ok(updated)
}
