//! Declarative provisioning handlers for NSX-T manager resources
//!
//! Each resource module exposes the same lifecycle surface: a pure codec
//! pair (`to_api` / `from_api`), async `create` / `read` / `update` /
//! `delete` handlers driven through the [`nsx_client::NsxApiClient`]
//! trait, and an `import` parser for adopting pre-existing objects.
//!
//! Handlers never retry and never swallow errors; the one recovered
//! condition is a 404 on read or delete, reported as
//! [`outcome::Outcome::Absent`] so the apply engine can recreate the
//! object or treat the delete as already done.

pub mod attrs;
pub mod dhcp_ip_pool;
pub mod error;
pub mod icmp_service;
pub mod import;
pub mod outcome;
pub mod tier1_router;

pub use attrs::{GenericOption, IpRange, ScopedTag, StaticRoute};
pub use error::ProvisionError;
pub use outcome::Outcome;
