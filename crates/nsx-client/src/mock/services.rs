//! Grouping-objects operations for MockNsxClient

use super::{check_revision, MockNsxClient};
use crate::error::NsxError;
use crate::models::*;

pub async fn create_icmp_type_service(
    client: &MockNsxClient,
    service: &IcmpTypeNsService,
) -> Result<IcmpTypeNsService, NsxError> {
    let id = client.next_id();
    let mut created = service.clone();
    created.id = id.clone();
    if created.display_name.is_empty() {
        created.display_name = id.clone();
    }
    created.revision = 0;

    client.services.lock().unwrap().insert(id, created.clone());
    Ok(created)
}

pub async fn read_icmp_type_service(
    client: &MockNsxClient,
    id: &str,
) -> Result<IcmpTypeNsService, NsxError> {
    client
        .services
        .lock()
        .unwrap()
        .get(id)
        .cloned()
        .ok_or_else(|| NsxError::NotFound(format!("NS service {} not found", id)))
}

pub async fn update_icmp_type_service(
    client: &MockNsxClient,
    id: &str,
    service: &IcmpTypeNsService,
) -> Result<IcmpTypeNsService, NsxError> {
    let mut services = client.services.lock().unwrap();
    let stored = services
        .get(id)
        .ok_or_else(|| NsxError::NotFound(format!("NS service {} not found", id)))?;

    check_revision(service.revision, stored.revision, "IcmpTypeNSService")?;

    let mut updated = service.clone();
    updated.id = id.to_string();
    if updated.display_name.is_empty() {
        updated.display_name = id.to_string();
    }
    updated.revision = stored.revision + 1;

    services.insert(id.to_string(), updated.clone());
    Ok(updated)
}

pub async fn delete_icmp_type_service(client: &MockNsxClient, id: &str) -> Result<(), NsxError> {
    client
        .services
        .lock()
        .unwrap()
        .remove(id)
        .map(|_| ())
        .ok_or_else(|| NsxError::NotFound(format!("NS service {} not found", id)))
}

pub async fn list_icmp_type_services(
    client: &MockNsxClient,
) -> Result<Vec<IcmpTypeNsService>, NsxError> {
    Ok(client.services.lock().unwrap().values().cloned().collect())
}
