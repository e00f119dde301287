//! Logical tier-1 router lifecycle handlers
//!
//! A tier-1 router pairs two manager objects: the router itself and its
//! route advertisement configuration. The advertisement config is a
//! singleton that exists as soon as the router does, so create and update
//! both drive the pair, and each side carries its own revision token.

use crate::attrs::{tags_from_api, tags_to_api, ScopedTag};
use crate::error::ProvisionError;
use crate::import::plain_import_id;
use crate::outcome::{interpret, Outcome};
use nsx_client::{AdvertisementConfig, LogicalRouter, NsxApiClient, NsxError};
use tracing::{debug, info, warn};

const KIND: &str = "Tier1Router";

const ROUTER_TYPE: &str = "TIER1";

const ADVERTISEMENT_RESOURCE_TYPE: &str = "AdvertisementConfig";

/// Failover behavior when the active service router recovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailoverMode {
    Preemptive,
    NonPreemptive,
}

impl FailoverMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FailoverMode::Preemptive => "PREEMPTIVE",
            FailoverMode::NonPreemptive => "NON_PREEMPTIVE",
        }
    }
}

fn failover_from_wire(value: &str) -> Result<FailoverMode, NsxError> {
    match value {
        "PREEMPTIVE" => Ok(FailoverMode::Preemptive),
        "NON_PREEMPTIVE" => Ok(FailoverMode::NonPreemptive),
        other => Err(NsxError::InvalidRequest(format!(
            "unknown failover mode {other:?}"
        ))),
    }
}

/// High availability placement of the service router.
///
/// Tier-1 routers only support active/standby; the host rejects
/// active/active before a handler is invoked, the variant exists so the
/// wire value still round-trips for imported objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighAvailabilityMode {
    ActiveActive,
    ActiveStandby,
}

impl HighAvailabilityMode {
    pub fn as_str(self) -> &'static str {
        match self {
            HighAvailabilityMode::ActiveActive => "ACTIVE_ACTIVE",
            HighAvailabilityMode::ActiveStandby => "ACTIVE_STANDBY",
        }
    }
}

fn ha_mode_from_wire(value: &str) -> Result<HighAvailabilityMode, NsxError> {
    match value {
        "ACTIVE_ACTIVE" => Ok(HighAvailabilityMode::ActiveActive),
        "ACTIVE_STANDBY" => Ok(HighAvailabilityMode::ActiveStandby),
        other => Err(NsxError::InvalidRequest(format!(
            "unknown high availability mode {other:?}"
        ))),
    }
}

/// Desired configuration of a tier-1 logical router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier1RouterConfig {
    /// Defaults to the router id when not set (manager-computed)
    pub display_name: Option<String>,
    pub description: String,
    pub failover_mode: FailoverMode,
    pub high_availability_mode: HighAvailabilityMode,
    /// Required before the router can host stateful services
    pub edge_cluster_id: Option<String>,
    /// Master switch of the advertisement config
    pub enable_router_advertisement: bool,
    pub advertise_connected_routes: bool,
    pub advertise_static_routes: bool,
    pub advertise_nat_routes: bool,
    pub tags: Vec<ScopedTag>,
}

/// Observed state of a managed tier-1 router and its advertisement config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier1RouterState {
    pub id: String,
    /// Revision token of the router object
    pub revision: i64,
    /// Revision token of the advertisement sub-object
    pub advertisement_revision: i64,
    pub config: Tier1RouterConfig,
}

/// Translate the desired configuration into the router object.
pub fn router_to_api(cfg: &Tier1RouterConfig, revision: i64) -> LogicalRouter {
    LogicalRouter {
        id: String::new(),
        display_name: cfg.display_name.clone().unwrap_or_default(),
        description: cfg.description.clone(),
        router_type: ROUTER_TYPE.to_string(),
        edge_cluster_id: cfg.edge_cluster_id.clone(),
        failover_mode: cfg.failover_mode.as_str().to_string(),
        high_availability_mode: cfg.high_availability_mode.as_str().to_string(),
        tags: tags_to_api(&cfg.tags),
        revision,
    }
}

/// Translate the desired configuration into the advertisement object.
pub fn advertisement_to_api(cfg: &Tier1RouterConfig, revision: i64) -> AdvertisementConfig {
    AdvertisementConfig {
        resource_type: ADVERTISEMENT_RESOURCE_TYPE.to_string(),
        enabled: cfg.enable_router_advertisement,
        advertise_nsx_connected_routes: cfg.advertise_connected_routes,
        advertise_static_routes: cfg.advertise_static_routes,
        advertise_nat_routes: cfg.advertise_nat_routes,
        revision,
    }
}

/// Combine the router and advertisement objects into observed state.
pub fn from_api(
    router: &LogicalRouter,
    advertisement: &AdvertisementConfig,
) -> Result<Tier1RouterState, NsxError> {
    Ok(Tier1RouterState {
        id: router.id.clone(),
        revision: router.revision,
        advertisement_revision: advertisement.revision,
        config: Tier1RouterConfig {
            display_name: Some(router.display_name.clone()),
            description: router.description.clone(),
            failover_mode: failover_from_wire(&router.failover_mode)?,
            high_availability_mode: ha_mode_from_wire(&router.high_availability_mode)?,
            edge_cluster_id: router.edge_cluster_id.clone(),
            enable_router_advertisement: advertisement.enabled,
            advertise_connected_routes: advertisement.advertise_nsx_connected_routes,
            advertise_static_routes: advertisement.advertise_static_routes,
            advertise_nat_routes: advertisement.advertise_nat_routes,
            tags: tags_from_api(&router.tags),
        },
    })
}

/// Create the router, push its advertisement config, and read both back.
///
/// Any failure along the way is a create failure: the host records no
/// state and retries the whole creation on the next pass, so a router
/// left behind by a failed advertisement push is re-created cleanly
/// rather than half-adopted.
pub async fn create(
    api: &dyn NsxApiClient,
    cfg: &Tier1RouterConfig,
) -> Result<Tier1RouterState, ProvisionError> {
    let created = api
        .create_logical_router(&router_to_api(cfg, 0))
        .await
        .map_err(|e| ProvisionError::CreateFailed {
            kind: KIND,
            source: e,
        })?;
    info!("Created tier-1 logical router {}", created.id);

    // The manager seeds the advertisement config at router creation; its
    // revision token must be read before the first PUT.
    let seeded = api
        .read_advertisement_config(&created.id)
        .await
        .map_err(|e| ProvisionError::CreateFailed {
            kind: KIND,
            source: e,
        })?;
    api.update_advertisement_config(&created.id, &advertisement_to_api(cfg, seeded.revision))
        .await
        .map_err(|e| ProvisionError::CreateFailed {
            kind: KIND,
            source: e,
        })?;

    match read(api, &created.id).await? {
        Outcome::Present(state) => Ok(state),
        Outcome::Absent => Err(ProvisionError::ReadFailed {
            kind: KIND,
            source: NsxError::NotFound(format!(
                "tier-1 router {} vanished immediately after create",
                created.id
            )),
        }),
    }
}

/// Refresh the router and its advertisement config from the manager.
///
/// A 404 on the router reports drift as `Absent`; once the router is known
/// to exist, a failure reading the advertisement config is an error.
pub async fn read(
    api: &dyn NsxApiClient,
    id: &str,
) -> Result<Outcome<Tier1RouterState>, ProvisionError> {
    if id.is_empty() {
        return Err(ProvisionError::MissingIdentifier {
            kind: KIND,
            field: "id",
        });
    }

    let outcome = interpret(api.read_logical_router(id).await).map_err(|e| {
        ProvisionError::ReadFailed {
            kind: KIND,
            source: e,
        }
    })?;

    let router = match outcome {
        Outcome::Present(router) => router,
        Outcome::Absent => {
            warn!(
                "Tier-1 router {} was deleted in the manager (drift detected), will recreate",
                id
            );
            return Ok(Outcome::Absent);
        }
    };

    let advertisement =
        api.read_advertisement_config(id)
            .await
            .map_err(|e| ProvisionError::ReadFailed {
                kind: KIND,
                source: e,
            })?;

    let state = from_api(&router, &advertisement).map_err(|e| ProvisionError::ReadFailed {
        kind: KIND,
        source: e,
    })?;
    Ok(Outcome::Present(state))
}

/// Push the desired configuration to both objects, then read back.
///
/// The two revision tokens must come from the most recent read.
pub async fn update(
    api: &dyn NsxApiClient,
    id: &str,
    cfg: &Tier1RouterConfig,
    revision: i64,
    advertisement_revision: i64,
) -> Result<Tier1RouterState, ProvisionError> {
    if id.is_empty() {
        return Err(ProvisionError::MissingIdentifier {
            kind: KIND,
            field: "id",
        });
    }

    api.update_logical_router(id, &router_to_api(cfg, revision))
        .await
        .map_err(|e| ProvisionError::UpdateFailed {
            kind: KIND,
            source: e,
        })?;
    api.update_advertisement_config(id, &advertisement_to_api(cfg, advertisement_revision))
        .await
        .map_err(|e| ProvisionError::UpdateFailed {
            kind: KIND,
            source: e,
        })?;
    info!("Updated tier-1 logical router {}", id);

    match read(api, id).await? {
        Outcome::Present(state) => Ok(state),
        Outcome::Absent => Err(ProvisionError::UpdateFailed {
            kind: KIND,
            source: NsxError::NotFound(format!(
                "tier-1 router {} vanished immediately after update",
                id
            )),
        }),
    }
}

/// Delete the router; the manager removes the advertisement config with it.
/// A 404 means the router is already gone and counts as success.
pub async fn delete(api: &dyn NsxApiClient, id: &str) -> Result<(), ProvisionError> {
    if id.is_empty() {
        return Err(ProvisionError::MissingIdentifier {
            kind: KIND,
            field: "id",
        });
    }

    let outcome = interpret(api.delete_logical_router(id).await).map_err(|e| {
        ProvisionError::DeleteFailed {
            kind: KIND,
            source: e,
        }
    })?;

    match outcome {
        Outcome::Present(()) => info!("Deleted tier-1 logical router {}", id),
        Outcome::Absent => debug!("Tier-1 router {} already absent", id),
    }
    Ok(())
}

/// Validate a bare router-id import identifier.
pub fn import(import_id: &str) -> Result<String, ProvisionError> {
    plain_import_id(import_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsx_client::MockNsxClient;

    fn sample_config() -> Tier1RouterConfig {
        Tier1RouterConfig {
            display_name: Some("tier1-app".to_string()),
            description: "app segment gateway".to_string(),
            failover_mode: FailoverMode::Preemptive,
            high_availability_mode: HighAvailabilityMode::ActiveStandby,
            edge_cluster_id: Some("edge-cluster-1".to_string()),
            enable_router_advertisement: true,
            advertise_connected_routes: true,
            advertise_static_routes: false,
            advertise_nat_routes: false,
            tags: vec![ScopedTag {
                scope: "env".to_string(),
                value: "lab".to_string(),
            }],
        }
    }

    #[test]
    fn codec_round_trips_controller_preserved_fields() {
        let cfg = sample_config();
        let mut router = router_to_api(&cfg, 5);
        router.id = "router-1".to_string();
        let advertisement = advertisement_to_api(&cfg, 2);
        let state = from_api(&router, &advertisement).unwrap();
        assert_eq!(state.config, cfg);
        assert_eq!(state.revision, 5);
        assert_eq!(state.advertisement_revision, 2);
    }

    #[test]
    fn router_type_is_always_tier1() {
        let router = router_to_api(&sample_config(), 0);
        assert_eq!(router.router_type, "TIER1");
        assert_eq!(router.failover_mode, "PREEMPTIVE");
        assert_eq!(router.high_availability_mode, "ACTIVE_STANDBY");
    }

    #[test]
    fn unknown_wire_modes_are_rejected() {
        let cfg = sample_config();
        let mut router = router_to_api(&cfg, 0);
        router.failover_mode = "SOMETIMES".to_string();
        let advertisement = advertisement_to_api(&cfg, 0);
        assert!(matches!(
            from_api(&router, &advertisement),
            Err(NsxError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn create_pushes_advertisement_config() {
        let mock = MockNsxClient::new("https://mock");
        let state = create(&mock, &sample_config()).await.unwrap();

        assert!(!state.id.is_empty());
        assert!(state.config.enable_router_advertisement);
        assert!(state.config.advertise_connected_routes);
        // The seeded config was replaced with one PUT
        assert_eq!(state.advertisement_revision, 1);
    }

    #[tokio::test]
    async fn read_of_deleted_router_is_absent() {
        let mock = MockNsxClient::new("https://mock");
        let state = create(&mock, &sample_config()).await.unwrap();

        mock.remove_logical_router(&state.id);

        let outcome = read(&mock, &state.id).await.unwrap();
        assert!(outcome.is_absent());
    }

    #[tokio::test]
    async fn update_applies_both_objects() {
        let mock = MockNsxClient::new("https://mock");
        let state = create(&mock, &sample_config()).await.unwrap();

        let mut cfg = sample_config();
        cfg.failover_mode = FailoverMode::NonPreemptive;
        cfg.advertise_nat_routes = true;
        let refreshed = update(
            &mock,
            &state.id,
            &cfg,
            state.revision,
            state.advertisement_revision,
        )
        .await
        .unwrap();

        assert_eq!(refreshed.config.failover_mode, FailoverMode::NonPreemptive);
        assert!(refreshed.config.advertise_nat_routes);
        assert_eq!(refreshed.revision, state.revision + 1);
        assert_eq!(
            refreshed.advertisement_revision,
            state.advertisement_revision + 1
        );
    }

    #[tokio::test]
    async fn delete_is_idempotent_on_missing_router() {
        let mock = MockNsxClient::new("https://mock");
        let state = create(&mock, &sample_config()).await.unwrap();

        delete(&mock, &state.id).await.unwrap();
        delete(&mock, &state.id).await.unwrap();
    }

    #[test]
    fn import_rejects_composite_ids() {
        assert!(import("a/b").is_err());
        assert_eq!(import("router-9").unwrap(), "router-9");
    }
}
