//! Host-facing attribute types shared by all resource configurations
//!
//! These are the strongly-typed counterparts of the wire sub-records in
//! `nsx_client::models`. The host's apply engine populates them from its
//! configuration surface; the per-resource codecs translate them to and
//! from the manager's object graph.

use nsx_client::Tag;

/// A {scope, value} label pair attachable to a resource.
///
/// Tags form an order-irrelevant set; handlers and tests compare them
/// without regard to position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScopedTag {
    pub scope: String,
    pub value: String,
}

/// Contiguous IP range allocated by a DHCP pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpRange {
    pub start: String,
    pub end: String,
}

/// Classless static route pushed to DHCP clients via option 121
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRoute {
    /// Destination network in CIDR notation
    pub network: String,
    pub next_hop: String,
}

/// Generic DHCP option.
///
/// The code is trusted as range-validated upstream (0..=255).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericOption {
    pub code: i64,
    pub values: Vec<String>,
}

pub(crate) fn tags_to_api(tags: &[ScopedTag]) -> Vec<Tag> {
    tags.iter()
        .map(|t| Tag {
            scope: t.scope.clone(),
            tag: t.value.clone(),
        })
        .collect()
}

pub(crate) fn tags_from_api(tags: &[Tag]) -> Vec<ScopedTag> {
    tags.iter()
        .map(|t| ScopedTag {
            scope: t.scope.clone(),
            value: t.tag.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        let tags = vec![
            ScopedTag {
                scope: "env".to_string(),
                value: "staging".to_string(),
            },
            ScopedTag {
                scope: "team".to_string(),
                value: "network".to_string(),
            },
        ];
        assert_eq!(tags_from_api(&tags_to_api(&tags)), tags);
    }
}
