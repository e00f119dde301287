//! DHCP server IP pool lifecycle handlers
//!
//! A pool is scoped under a logical DHCP server; the server id is fixed at
//! creation time (the host replaces the pool rather than updating it when
//! the parent changes).

use crate::attrs::{tags_from_api, tags_to_api, GenericOption, IpRange, ScopedTag, StaticRoute};
use crate::error::ProvisionError;
use crate::import::split_import_id;
use crate::outcome::{interpret, Outcome};
use nsx_client::{
    ClasslessStaticRoute, DhcpIpPool, DhcpOption121, DhcpOptions, GenericDhcpOption, IpPoolRange,
    NsxApiClient, NsxError,
};
use tracing::{debug, info, warn};

const KIND: &str = "DhcpIpPool";

/// Desired configuration of a DHCP IP pool.
///
/// Scalar bounds are validated by the host before a handler is invoked:
/// lease time 0..=4294967295 seconds, error threshold 80..=100, warning
/// threshold 50..=80.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpIpPoolConfig {
    /// Defaults to the pool id when not set (manager-computed)
    pub display_name: Option<String>,
    /// Id of the logical DHCP server owning this pool; immutable after creation
    pub logical_dhcp_server_id: String,
    pub gateway_ip: Option<String>,
    /// Lease time in seconds
    pub lease_time: i64,
    pub error_threshold: i64,
    pub warning_threshold: i64,
    /// Ordered allocation ranges
    pub ip_ranges: Vec<IpRange>,
    /// Option-121 classless static routes; empty means no option block on the wire
    pub option_121_routes: Vec<StaticRoute>,
    /// Generic DHCP options; empty means no option block on the wire
    pub generic_options: Vec<GenericOption>,
    pub tags: Vec<ScopedTag>,
}

/// Observed state of a managed DHCP IP pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpIpPoolState {
    /// Manager-assigned object id
    pub id: String,
    /// Revision token required by the manager on the next update
    pub revision: i64,
    /// Attributes as last read back from the manager
    pub config: DhcpIpPoolConfig,
}

/// Translate the desired configuration into the manager's object graph.
///
/// Entirely absent option blocks decode to `None`, never to empty
/// structures, so the manager does not receive spurious `options: {}`.
pub fn to_api(cfg: &DhcpIpPoolConfig, revision: i64) -> DhcpIpPool {
    let option121 = if cfg.option_121_routes.is_empty() {
        None
    } else {
        Some(DhcpOption121 {
            static_routes: cfg
                .option_121_routes
                .iter()
                .map(|r| ClasslessStaticRoute {
                    network: r.network.clone(),
                    next_hop: r.next_hop.clone(),
                })
                .collect(),
        })
    };
    let others = if cfg.generic_options.is_empty() {
        None
    } else {
        Some(
            cfg.generic_options
                .iter()
                .map(|o| GenericDhcpOption {
                    code: o.code,
                    values: o.values.clone(),
                })
                .collect(),
        )
    };
    let options = if option121.is_none() && others.is_none() {
        None
    } else {
        Some(DhcpOptions { option121, others })
    };

    DhcpIpPool {
        id: String::new(),
        display_name: cfg.display_name.clone().unwrap_or_default(),
        gateway_ip: cfg.gateway_ip.clone(),
        lease_time: cfg.lease_time,
        error_threshold: cfg.error_threshold,
        warning_threshold: cfg.warning_threshold,
        allocation_ranges: cfg
            .ip_ranges
            .iter()
            .map(|r| IpPoolRange {
                start: r.start.clone(),
                end: r.end.clone(),
            })
            .collect(),
        options,
        tags: tags_to_api(&cfg.tags),
        revision,
    }
}

/// Translate a manager object back into observed state.
pub fn from_api(pool: &DhcpIpPool, server_id: &str) -> DhcpIpPoolState {
    let (option_121_routes, generic_options) = match &pool.options {
        Some(options) => (
            options
                .option121
                .as_ref()
                .map(|o| {
                    o.static_routes
                        .iter()
                        .map(|r| StaticRoute {
                            network: r.network.clone(),
                            next_hop: r.next_hop.clone(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            options
                .others
                .as_ref()
                .map(|others| {
                    others
                        .iter()
                        .map(|o| GenericOption {
                            code: o.code,
                            values: o.values.clone(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        ),
        None => (Vec::new(), Vec::new()),
    };

    DhcpIpPoolState {
        id: pool.id.clone(),
        revision: pool.revision,
        config: DhcpIpPoolConfig {
            display_name: Some(pool.display_name.clone()),
            logical_dhcp_server_id: server_id.to_string(),
            gateway_ip: pool.gateway_ip.clone(),
            lease_time: pool.lease_time,
            error_threshold: pool.error_threshold,
            warning_threshold: pool.warning_threshold,
            ip_ranges: pool
                .allocation_ranges
                .iter()
                .map(|r| IpRange {
                    start: r.start.clone(),
                    end: r.end.clone(),
                })
                .collect(),
            option_121_routes,
            generic_options,
            tags: tags_from_api(&pool.tags),
        },
    }
}

/// Create the pool and read it back to populate manager-computed fields.
pub async fn create(
    api: &dyn NsxApiClient,
    cfg: &DhcpIpPoolConfig,
) -> Result<DhcpIpPoolState, ProvisionError> {
    let body = to_api(cfg, 0);
    let created = api
        .create_dhcp_ip_pool(&cfg.logical_dhcp_server_id, &body)
        .await
        .map_err(|e| ProvisionError::CreateFailed {
            kind: KIND,
            source: e,
        })?;
    info!(
        "Created DHCP IP pool {} under server {}",
        created.id, cfg.logical_dhcp_server_id
    );

    match read(api, &cfg.logical_dhcp_server_id, &created.id).await? {
        Outcome::Present(state) => Ok(state),
        Outcome::Absent => Err(ProvisionError::ReadFailed {
            kind: KIND,
            source: NsxError::NotFound(format!(
                "DHCP IP pool {} vanished immediately after create",
                created.id
            )),
        }),
    }
}

/// Refresh the pool from the manager.
///
/// A 404 is the documented drift-detection path: the pool was deleted
/// out-of-band, the host clears the id and schedules recreation.
pub async fn read(
    api: &dyn NsxApiClient,
    server_id: &str,
    id: &str,
) -> Result<Outcome<DhcpIpPoolState>, ProvisionError> {
    if id.is_empty() {
        return Err(ProvisionError::MissingIdentifier {
            kind: KIND,
            field: "id",
        });
    }
    if server_id.is_empty() {
        return Err(ProvisionError::MissingIdentifier {
            kind: KIND,
            field: "logical_dhcp_server_id",
        });
    }

    let outcome = interpret(api.read_dhcp_ip_pool(server_id, id).await).map_err(|e| {
        ProvisionError::ReadFailed {
            kind: KIND,
            source: e,
        }
    })?;

    match outcome {
        Outcome::Present(pool) => Ok(Outcome::Present(from_api(&pool, server_id))),
        Outcome::Absent => {
            warn!(
                "DHCP IP pool {} was deleted in the manager (drift detected), will recreate",
                id
            );
            Ok(Outcome::Absent)
        }
    }
}

/// Push the desired configuration, then read back the refreshed state.
///
/// `revision` must come from the most recent read; the manager rejects
/// stale tokens. A 404 here means the pool disappeared between the host's
/// read and this call, which is surfaced as fatal rather than recovered.
pub async fn update(
    api: &dyn NsxApiClient,
    id: &str,
    cfg: &DhcpIpPoolConfig,
    revision: i64,
) -> Result<DhcpIpPoolState, ProvisionError> {
    if id.is_empty() {
        return Err(ProvisionError::MissingIdentifier {
            kind: KIND,
            field: "id",
        });
    }
    if cfg.logical_dhcp_server_id.is_empty() {
        return Err(ProvisionError::MissingIdentifier {
            kind: KIND,
            field: "logical_dhcp_server_id",
        });
    }

    let body = to_api(cfg, revision);
    api.update_dhcp_ip_pool(&cfg.logical_dhcp_server_id, id, &body)
        .await
        .map_err(|e| ProvisionError::UpdateFailed {
            kind: KIND,
            source: e,
        })?;
    info!(
        "Updated DHCP IP pool {} on server {}",
        id, cfg.logical_dhcp_server_id
    );

    match read(api, &cfg.logical_dhcp_server_id, id).await? {
        Outcome::Present(state) => Ok(state),
        Outcome::Absent => Err(ProvisionError::UpdateFailed {
            kind: KIND,
            source: NsxError::NotFound(format!(
                "DHCP IP pool {} vanished immediately after update",
                id
            )),
        }),
    }
}

/// Delete the pool; a 404 means it is already gone and counts as success.
pub async fn delete(
    api: &dyn NsxApiClient,
    server_id: &str,
    id: &str,
) -> Result<(), ProvisionError> {
    if id.is_empty() {
        return Err(ProvisionError::MissingIdentifier {
            kind: KIND,
            field: "id",
        });
    }
    if server_id.is_empty() {
        return Err(ProvisionError::MissingIdentifier {
            kind: KIND,
            field: "logical_dhcp_server_id",
        });
    }

    let outcome = interpret(api.delete_dhcp_ip_pool(server_id, id).await).map_err(|e| {
        ProvisionError::DeleteFailed {
            kind: KIND,
            source: e,
        }
    })?;

    match outcome {
        Outcome::Present(()) => {
            info!("Deleted DHCP IP pool {} from server {}", id, server_id);
        }
        Outcome::Absent => {
            debug!("DHCP IP pool {} already absent", id);
        }
    }
    Ok(())
}

/// Parse a `<dhcp-server-id>/<ip-pool-id>` import identifier into the
/// (server id, pool id) pair that seeds managed state; the host performs
/// the follow-up read.
pub fn import(import_id: &str) -> Result<(String, String), ProvisionError> {
    split_import_id(import_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsx_client::MockNsxClient;

    fn sample_config(server_id: &str) -> DhcpIpPoolConfig {
        DhcpIpPoolConfig {
            display_name: Some("pool-a".to_string()),
            logical_dhcp_server_id: server_id.to_string(),
            gateway_ip: Some("10.0.0.1".to_string()),
            lease_time: 86400,
            error_threshold: 100,
            warning_threshold: 80,
            ip_ranges: vec![IpRange {
                start: "10.0.0.10".to_string(),
                end: "10.0.0.99".to_string(),
            }],
            option_121_routes: vec![StaticRoute {
                network: "192.168.10.0/24".to_string(),
                next_hop: "10.0.0.1".to_string(),
            }],
            generic_options: vec![GenericOption {
                code: 42,
                values: vec!["10.0.0.2".to_string()],
            }],
            tags: vec![ScopedTag {
                scope: "env".to_string(),
                value: "lab".to_string(),
            }],
        }
    }

    #[test]
    fn codec_round_trips_controller_preserved_fields() {
        let cfg = sample_config("server-1");
        let mut pool = to_api(&cfg, 3);
        pool.id = "pool-id".to_string();
        let state = from_api(&pool, "server-1");
        assert_eq!(state.config, cfg);
        assert_eq!(state.revision, 3);
        assert_eq!(state.id, "pool-id");
    }

    #[test]
    fn absent_option_blocks_decode_to_none_not_empty() {
        let mut cfg = sample_config("server-1");
        cfg.option_121_routes.clear();
        cfg.generic_options.clear();
        let pool = to_api(&cfg, 0);
        assert!(pool.options.is_none());
    }

    #[test]
    fn partial_option_blocks_keep_the_other_side_none() {
        let mut cfg = sample_config("server-1");
        cfg.generic_options.clear();
        let pool = to_api(&cfg, 0);
        let options = pool.options.unwrap();
        assert!(options.option121.is_some());
        assert!(options.others.is_none());
    }

    #[tokio::test]
    async fn create_populates_id_and_revision() {
        let mock = MockNsxClient::new("https://mock");
        mock.add_dhcp_server("server-1");

        let state = create(&mock, &sample_config("server-1")).await.unwrap();
        assert!(!state.id.is_empty());
        assert_eq!(state.revision, 0);
        assert_eq!(state.config.display_name.as_deref(), Some("pool-a"));
    }

    #[tokio::test]
    async fn create_under_missing_server_is_create_failed() {
        let mock = MockNsxClient::new("https://mock");

        let err = create(&mock, &sample_config("no-such-server"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProvisionError::CreateFailed { .. }));
    }

    #[tokio::test]
    async fn read_of_deleted_pool_is_absent_not_an_error() {
        let mock = MockNsxClient::new("https://mock");
        mock.add_dhcp_server("server-1");
        let state = create(&mock, &sample_config("server-1")).await.unwrap();

        mock.remove_dhcp_ip_pool("server-1", &state.id);

        let outcome = read(&mock, "server-1", &state.id).await.unwrap();
        assert!(outcome.is_absent());
    }

    #[tokio::test]
    async fn update_with_empty_id_is_missing_identifier() {
        let mock = MockNsxClient::new("https://mock");
        let err = update(&mock, "", &sample_config("server-1"), 0)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProvisionError::MissingIdentifier { field: "id", .. }
        ));
    }

    #[tokio::test]
    async fn update_with_stale_revision_is_update_failed() {
        let mock = MockNsxClient::new("https://mock");
        mock.add_dhcp_server("server-1");
        let cfg = sample_config("server-1");
        let state = create(&mock, &cfg).await.unwrap();

        // First update bumps the revision
        let refreshed = update(&mock, &state.id, &cfg, state.revision).await.unwrap();
        assert_eq!(refreshed.revision, 1);

        // Replaying the old token must be rejected, not retried
        let err = update(&mock, &state.id, &cfg, state.revision)
            .await
            .unwrap_err();
        assert!(matches!(err, ProvisionError::UpdateFailed { .. }));
    }

    #[tokio::test]
    async fn delete_is_idempotent_on_missing_pool() {
        let mock = MockNsxClient::new("https://mock");
        mock.add_dhcp_server("server-1");
        let state = create(&mock, &sample_config("server-1")).await.unwrap();

        delete(&mock, "server-1", &state.id).await.unwrap();
        // Already gone: still success
        delete(&mock, "server-1", &state.id).await.unwrap();
    }
}
