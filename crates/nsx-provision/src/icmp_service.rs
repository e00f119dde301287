//! ICMP-type NS service lifecycle handlers

use crate::attrs::{tags_from_api, tags_to_api, ScopedTag};
use crate::error::ProvisionError;
use crate::import::plain_import_id;
use crate::outcome::{interpret, Outcome};
use nsx_client::{IcmpTypeNsService, IcmpTypeServiceEntry, NsxApiClient, NsxError};
use tracing::{debug, info, warn};

const KIND: &str = "IcmpTypeService";

const ENTRY_RESOURCE_TYPE: &str = "ICMPTypeNSServiceEntry";

/// ICMP protocol family of the service entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IcmpProtocol {
    Icmpv4,
    Icmpv6,
}

impl IcmpProtocol {
    /// Wire representation expected by the grouping-objects API
    pub fn as_str(self) -> &'static str {
        match self {
            IcmpProtocol::Icmpv4 => "ICMPv4",
            IcmpProtocol::Icmpv6 => "ICMPv6",
        }
    }
}

fn protocol_from_wire(value: &str) -> Result<IcmpProtocol, NsxError> {
    match value {
        "ICMPv4" => Ok(IcmpProtocol::Icmpv4),
        "ICMPv6" => Ok(IcmpProtocol::Icmpv6),
        other => Err(NsxError::InvalidRequest(format!(
            "unknown ICMP protocol {other:?}"
        ))),
    }
}

/// Desired configuration of an ICMP-type NS service.
///
/// Type and code bounds (0..=255) are validated by the host before a
/// handler is invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcmpServiceConfig {
    /// Defaults to the service id when not set (manager-computed)
    pub display_name: Option<String>,
    pub description: String,
    pub protocol: IcmpProtocol,
    pub icmp_type: Option<i64>,
    pub icmp_code: Option<i64>,
    pub tags: Vec<ScopedTag>,
}

/// Observed state of a managed ICMP-type NS service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcmpServiceState {
    pub id: String,
    pub revision: i64,
    pub config: IcmpServiceConfig,
}

/// Translate the desired configuration into the manager's object graph.
pub fn to_api(cfg: &IcmpServiceConfig, revision: i64) -> IcmpTypeNsService {
    IcmpTypeNsService {
        id: String::new(),
        display_name: cfg.display_name.clone().unwrap_or_default(),
        description: cfg.description.clone(),
        nsservice_element: IcmpTypeServiceEntry {
            resource_type: ENTRY_RESOURCE_TYPE.to_string(),
            protocol: cfg.protocol.as_str().to_string(),
            icmp_type: cfg.icmp_type,
            icmp_code: cfg.icmp_code,
        },
        tags: tags_to_api(&cfg.tags),
        revision,
    }
}

/// Translate a manager object back into observed state.
///
/// Fails if the manager reports a protocol outside the known families,
/// which would leave the host unable to represent the object.
pub fn from_api(service: &IcmpTypeNsService) -> Result<IcmpServiceState, NsxError> {
    Ok(IcmpServiceState {
        id: service.id.clone(),
        revision: service.revision,
        config: IcmpServiceConfig {
            display_name: Some(service.display_name.clone()),
            description: service.description.clone(),
            protocol: protocol_from_wire(&service.nsservice_element.protocol)?,
            icmp_type: service.nsservice_element.icmp_type,
            icmp_code: service.nsservice_element.icmp_code,
            tags: tags_from_api(&service.tags),
        },
    })
}

/// Create the service and read it back to populate manager-computed fields.
pub async fn create(
    api: &dyn NsxApiClient,
    cfg: &IcmpServiceConfig,
) -> Result<IcmpServiceState, ProvisionError> {
    let body = to_api(cfg, 0);
    let created =
        api.create_icmp_type_service(&body)
            .await
            .map_err(|e| ProvisionError::CreateFailed {
                kind: KIND,
                source: e,
            })?;
    info!("Created ICMP-type NS service {}", created.id);

    match read(api, &created.id).await? {
        Outcome::Present(state) => Ok(state),
        Outcome::Absent => Err(ProvisionError::ReadFailed {
            kind: KIND,
            source: NsxError::NotFound(format!(
                "ICMP-type NS service {} vanished immediately after create",
                created.id
            )),
        }),
    }
}

/// Refresh the service from the manager; 404 reports drift as `Absent`.
pub async fn read(
    api: &dyn NsxApiClient,
    id: &str,
) -> Result<Outcome<IcmpServiceState>, ProvisionError> {
    if id.is_empty() {
        return Err(ProvisionError::MissingIdentifier {
            kind: KIND,
            field: "id",
        });
    }

    let outcome = interpret(api.read_icmp_type_service(id).await).map_err(|e| {
        ProvisionError::ReadFailed {
            kind: KIND,
            source: e,
        }
    })?;

    match outcome {
        Outcome::Present(service) => {
            let state = from_api(&service).map_err(|e| ProvisionError::ReadFailed {
                kind: KIND,
                source: e,
            })?;
            Ok(Outcome::Present(state))
        }
        Outcome::Absent => {
            warn!(
                "ICMP-type NS service {} was deleted in the manager (drift detected), will recreate",
                id
            );
            Ok(Outcome::Absent)
        }
    }
}

/// Push the desired configuration, then read back the refreshed state.
///
/// `revision` must come from the most recent read.
pub async fn update(
    api: &dyn NsxApiClient,
    id: &str,
    cfg: &IcmpServiceConfig,
    revision: i64,
) -> Result<IcmpServiceState, ProvisionError> {
    if id.is_empty() {
        return Err(ProvisionError::MissingIdentifier {
            kind: KIND,
            field: "id",
        });
    }

    let body = to_api(cfg, revision);
    api.update_icmp_type_service(id, &body)
        .await
        .map_err(|e| ProvisionError::UpdateFailed {
            kind: KIND,
            source: e,
        })?;
    info!("Updated ICMP-type NS service {}", id);

    match read(api, id).await? {
        Outcome::Present(state) => Ok(state),
        Outcome::Absent => Err(ProvisionError::UpdateFailed {
            kind: KIND,
            source: NsxError::NotFound(format!(
                "ICMP-type NS service {} vanished immediately after update",
                id
            )),
        }),
    }
}

/// Delete the service; a 404 means it is already gone and counts as success.
pub async fn delete(api: &dyn NsxApiClient, id: &str) -> Result<(), ProvisionError> {
    if id.is_empty() {
        return Err(ProvisionError::MissingIdentifier {
            kind: KIND,
            field: "id",
        });
    }

    let outcome = interpret(api.delete_icmp_type_service(id).await).map_err(|e| {
        ProvisionError::DeleteFailed {
            kind: KIND,
            source: e,
        }
    })?;

    match outcome {
        Outcome::Present(()) => info!("Deleted ICMP-type NS service {}", id),
        Outcome::Absent => debug!("ICMP-type NS service {} already absent", id),
    }
    Ok(())
}

/// Validate a bare service-id import identifier.
pub fn import(import_id: &str) -> Result<String, ProvisionError> {
    plain_import_id(import_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsx_client::MockNsxClient;

    fn sample_config() -> IcmpServiceConfig {
        IcmpServiceConfig {
            display_name: Some("echo-request".to_string()),
            description: "allow ping".to_string(),
            protocol: IcmpProtocol::Icmpv4,
            icmp_type: Some(8),
            icmp_code: Some(0),
            tags: vec![ScopedTag {
                scope: "env".to_string(),
                value: "lab".to_string(),
            }],
        }
    }

    #[test]
    fn codec_round_trips_controller_preserved_fields() {
        let cfg = sample_config();
        let mut service = to_api(&cfg, 2);
        service.id = "svc-1".to_string();
        let state = from_api(&service).unwrap();
        assert_eq!(state.config, cfg);
        assert_eq!(state.revision, 2);
    }

    #[test]
    fn entry_resource_type_is_fixed() {
        let service = to_api(&sample_config(), 0);
        assert_eq!(
            service.nsservice_element.resource_type,
            "ICMPTypeNSServiceEntry"
        );
        assert_eq!(service.nsservice_element.protocol, "ICMPv4");
    }

    #[test]
    fn unknown_wire_protocol_is_rejected() {
        let mut service = to_api(&sample_config(), 0);
        service.nsservice_element.protocol = "ICMPv7".to_string();
        assert!(matches!(
            from_api(&service),
            Err(NsxError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn create_defaults_display_name_to_id() {
        let mock = MockNsxClient::new("https://mock");
        let mut cfg = sample_config();
        cfg.display_name = None;

        let state = create(&mock, &cfg).await.unwrap();
        assert_eq!(state.config.display_name.as_deref(), Some(state.id.as_str()));
    }

    #[tokio::test]
    async fn read_of_deleted_service_is_absent() {
        let mock = MockNsxClient::new("https://mock");
        let state = create(&mock, &sample_config()).await.unwrap();

        mock.remove_icmp_type_service(&state.id);

        let outcome = read(&mock, &state.id).await.unwrap();
        assert!(outcome.is_absent());
    }

    #[tokio::test]
    async fn update_bumps_revision_and_applies_changes() {
        let mock = MockNsxClient::new("https://mock");
        let state = create(&mock, &sample_config()).await.unwrap();

        let mut cfg = sample_config();
        cfg.icmp_type = Some(13);
        cfg.icmp_code = None;
        let refreshed = update(&mock, &state.id, &cfg, state.revision).await.unwrap();
        assert_eq!(refreshed.revision, state.revision + 1);
        assert_eq!(refreshed.config.icmp_type, Some(13));
        assert_eq!(refreshed.config.icmp_code, None);
    }

    #[tokio::test]
    async fn delete_with_empty_id_is_missing_identifier() {
        let mock = MockNsxClient::new("https://mock");
        let err = delete(&mock, "").await.unwrap_err();
        assert!(matches!(
            err,
            ProvisionError::MissingIdentifier { field: "id", .. }
        ));
    }
}
