//! NSX manager API models
//!
//! These structs match the NSX-T manager REST serializers for the
//! DHCP, grouping-objects, and logical-routing endpoints. Field names
//! mirror the wire JSON, including the `_revision` optimistic-concurrency
//! token that the manager requires on every update.

use serde::{Deserialize, Serialize};

/// NSX list response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResult<T> {
    pub result_count: u64,
    pub results: Vec<T>,
}

/// Scoped tag pair attachable to any managed object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub scope: String,
    pub tag: String,
}

/// Contiguous IP range inside a DHCP pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpPoolRange {
    pub start: String,
    pub end: String,
}

/// Classless static route pushed via DHCP option 121
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClasslessStaticRoute {
    pub network: String,
    pub next_hop: String,
}

/// DHCP option 121 block (static routes)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpOption121 {
    pub static_routes: Vec<ClasslessStaticRoute>,
}

/// Generic DHCP option (code plus values)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericDhcpOption {
    pub code: i64,
    pub values: Vec<String>,
}

/// DHCP options container.
///
/// Both sub-objects are optional; an entirely absent block is omitted from
/// the wire JSON so the manager never receives a spurious empty structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpOptions {
    #[serde(rename = "option121", default, skip_serializing_if = "Option::is_none")]
    pub option121: Option<DhcpOption121>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub others: Option<Vec<GenericDhcpOption>>,
}

/// DHCP IP pool, scoped under a logical DHCP server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpIpPool {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_ip: Option<String>,
    /// Lease time in seconds
    #[serde(default)]
    pub lease_time: i64,
    #[serde(default)]
    pub error_threshold: i64,
    #[serde(default)]
    pub warning_threshold: i64,
    #[serde(default)]
    pub allocation_ranges: Vec<IpPoolRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<DhcpOptions>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Optimistic-concurrency token, assigned by the manager
    #[serde(rename = "_revision", default)]
    pub revision: i64,
}

/// Service element nested inside an ICMP-type NS service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcmpTypeServiceEntry {
    /// Always `"ICMPTypeNSServiceEntry"` on the wire
    #[serde(default)]
    pub resource_type: String,
    /// `"ICMPv4"` or `"ICMPv6"`
    #[serde(default)]
    pub protocol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icmp_type: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icmp_code: Option<i64>,
}

/// ICMP-type NS service (grouping objects API)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcmpTypeNsService {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    pub nsservice_element: IcmpTypeServiceEntry,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(rename = "_revision", default)]
    pub revision: i64,
}

/// Logical router (tier-0 or tier-1)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalRouter {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// `"TIER0"` or `"TIER1"`
    #[serde(default)]
    pub router_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_cluster_id: Option<String>,
    /// `"PREEMPTIVE"` or `"NON_PREEMPTIVE"`
    #[serde(default)]
    pub failover_mode: String,
    /// `"ACTIVE_ACTIVE"` or `"ACTIVE_STANDBY"`
    #[serde(default)]
    pub high_availability_mode: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(rename = "_revision", default)]
    pub revision: i64,
}

/// Route advertisement configuration of a logical router.
///
/// This is a singleton sub-object: it exists as soon as the router does and
/// is mutated with PUT, carrying its own `_revision`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvertisementConfig {
    /// Always `"AdvertisementConfig"` on the wire
    #[serde(default)]
    pub resource_type: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub advertise_nsx_connected_routes: bool,
    #[serde(default)]
    pub advertise_static_routes: bool,
    #[serde(default)]
    pub advertise_nat_routes: bool,
    #[serde(rename = "_revision", default)]
    pub revision: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_option_blocks_are_omitted_from_wire_json() {
        let pool = DhcpIpPool {
            display_name: "pool".to_string(),
            lease_time: 86400,
            ..Default::default()
        };
        let json = serde_json::to_value(&pool).unwrap();
        assert!(json.get("options").is_none());
        assert!(json.get("gateway_ip").is_none());
    }

    #[test]
    fn revision_round_trips_through_underscore_field() {
        let json = serde_json::json!({
            "id": "abc",
            "display_name": "svc",
            "nsservice_element": {
                "resource_type": "ICMPTypeNSServiceEntry",
                "protocol": "ICMPv4",
                "icmp_type": 5
            },
            "_revision": 7
        });
        let svc: IcmpTypeNsService = serde_json::from_value(json).unwrap();
        assert_eq!(svc.revision, 7);
        assert_eq!(svc.nsservice_element.icmp_code, None);

        let back = serde_json::to_value(&svc).unwrap();
        assert_eq!(back["_revision"], 7);
        assert!(back["nsservice_element"].get("icmp_code").is_none());
    }
}
