//! Handler-specific error types.
//!
//! Every variant wraps the underlying manager error verbatim; nothing is
//! suppressed or retried here. The host decides whether a failed operation
//! is retried on a later reconciliation pass. The single recovered case,
//! 404 on read or delete, never reaches this taxonomy: it is translated
//! into [`crate::outcome::Outcome::Absent`] instead.

use nsx_client::NsxError;
use thiserror::Error;

/// Errors surfaced by the resource lifecycle handlers.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Create call failed; nothing was recorded, the host retries the whole creation
    #[error("{kind} create failed: {source}")]
    CreateFailed {
        kind: &'static str,
        #[source]
        source: NsxError,
    },

    /// Read call failed with something other than 404
    #[error("{kind} read failed: {source}")]
    ReadFailed {
        kind: &'static str,
        #[source]
        source: NsxError,
    },

    /// Update call failed; a 404 here is a race window and is fatal
    #[error("{kind} update failed: {source}")]
    UpdateFailed {
        kind: &'static str,
        #[source]
        source: NsxError,
    },

    /// Delete call failed; the host retains the id so the delete can be retried
    #[error("{kind} delete failed: {source}")]
    DeleteFailed {
        kind: &'static str,
        #[source]
        source: NsxError,
    },

    /// A handler was invoked without a required identifier.
    ///
    /// This indicates host-side state corruption, not a remote condition.
    #[error("{kind} has no {field} assigned")]
    MissingIdentifier {
        kind: &'static str,
        field: &'static str,
    },

    /// The import identifier did not have the expected shape
    #[error("malformed import id {given:?}: expected {expected}")]
    MalformedImportId {
        given: String,
        expected: &'static str,
    },
}
