//! NSX-T Manager REST API Client
//!
//! A Rust client library for the NSX-T manager REST API, covering the
//! endpoints the provisioning handlers depend on: DHCP server IP pools,
//! ICMP-type NS services, and logical routers with their route
//! advertisement configuration.
//!
//! # Example
//!
//! ```no_run
//! use nsx_client::{NsxClient, IcmpTypeNsService, IcmpTypeServiceEntry};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client
//! let client = NsxClient::new(
//!     "https://nsx-manager".to_string(),
//!     "admin".to_string(),
//!     "password".to_string(),
//!     true, // accept the manager's self-signed certificate
//! )?;
//!
//! // Create an ICMP echo service
//! let service = IcmpTypeNsService {
//!     display_name: "allow-ping".to_string(),
//!     nsservice_element: IcmpTypeServiceEntry {
//!         resource_type: "ICMPTypeNSServiceEntry".to_string(),
//!         protocol: "ICMPv4".to_string(),
//!         icmp_type: Some(8),
//!         icmp_code: None,
//!     },
//!     ..Default::default()
//! };
//! let created = client.create_icmp_type_service(&service).await?;
//!
//! // Read it back (the manager assigns the id and `_revision`)
//! let fetched = client.read_icmp_type_service(&created.id).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Typed CRUD**: one method per wire call, returning domain objects
//! - **Status contract**: 200/201 success, 404 surfaces as `NsxError::NotFound`
//! - **Revision tokens**: `_revision` round-trips on every read/update
//! - **test-util**: in-memory mock manager for driving handlers in tests

pub mod client;
pub mod common;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod nsx_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::NsxClient;
pub use common::HttpClient;
pub use error::NsxError;
pub use models::*;
pub use nsx_trait::NsxApiClient;
#[cfg(feature = "test-util")]
pub use mock::MockNsxClient;
