//! Response interpretation shared by all handlers
//!
//! The manager's status contract collapses to a tri-state: success,
//! not-found, or failure. [`interpret`] applies it once so every read and
//! delete handler branches the same way instead of re-implementing the
//! 404 special case.

use nsx_client::NsxError;

/// Result of probing a remote object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The object exists; carries the refreshed value
    Present(T),
    /// The manager returned 404: the object is gone and the host should
    /// clear the stored id (drift is handled by recreation, not as an error)
    Absent,
}

impl<T> Outcome<T> {
    /// True if the remote object no longer exists
    pub fn is_absent(&self) -> bool {
        matches!(self, Outcome::Absent)
    }

    /// The present value, if any
    pub fn present(self) -> Option<T> {
        match self {
            Outcome::Present(value) => Some(value),
            Outcome::Absent => None,
        }
    }

    /// Map the present value, keeping absence as-is
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Present(value) => Outcome::Present(f(value)),
            Outcome::Absent => Outcome::Absent,
        }
    }
}

/// Translate a manager call result into the tri-state.
///
/// `Ok` becomes `Present`, a 404 becomes `Absent`, and every other error
/// propagates for the caller to wrap into its taxonomy.
pub fn interpret<T>(result: Result<T, NsxError>) -> Result<Outcome<T>, NsxError> {
    match result {
        Ok(value) => Ok(Outcome::Present(value)),
        Err(NsxError::NotFound(_)) => Ok(Outcome::Absent),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_is_present() {
        let outcome = interpret(Ok(42)).unwrap();
        assert_eq!(outcome, Outcome::Present(42));
        assert!(!outcome.is_absent());
    }

    #[test]
    fn not_found_is_absent_not_an_error() {
        let outcome: Outcome<i32> =
            interpret(Err(NsxError::NotFound("gone".to_string()))).unwrap();
        assert!(outcome.is_absent());
        assert_eq!(outcome.present(), None);
    }

    #[test]
    fn other_errors_propagate() {
        let result: Result<Outcome<i32>, _> = interpret(Err(NsxError::UnexpectedStatus {
            status: 500,
            body: "boom".to_string(),
        }));
        assert!(matches!(
            result,
            Err(NsxError::UnexpectedStatus { status: 500, .. })
        ));
    }
}
