//! Import identifier parsing
//!
//! Adopting a pre-existing remote object into managed state starts from a
//! single identifier string supplied by the operator. Parent-scoped
//! resources use a composite `<parent-id>/<resource-id>` form; parentless
//! resources take the bare object id.

use crate::error::ProvisionError;

/// Parse a composite `<parent-id>/<resource-id>` import identifier.
///
/// Exactly one separator, both components non-empty.
pub fn split_import_id(import_id: &str) -> Result<(String, String), ProvisionError> {
    let parts: Vec<&str> = import_id.split('/').collect();
    match parts.as_slice() {
        [parent, id] if !parent.is_empty() && !id.is_empty() => {
            Ok((parent.to_string(), id.to_string()))
        }
        _ => Err(ProvisionError::MalformedImportId {
            given: import_id.to_string(),
            expected: "<parent-id>/<resource-id>",
        }),
    }
}

/// Validate a bare object-id import identifier (parentless resources).
pub fn plain_import_id(import_id: &str) -> Result<String, ProvisionError> {
    if import_id.is_empty() || import_id.contains('/') {
        return Err(ProvisionError::MalformedImportId {
            given: import_id.to_string(),
            expected: "<resource-id>",
        });
    }
    Ok(import_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_id_splits_into_parent_and_resource() {
        let (parent, id) = split_import_id("serverA/poolB").unwrap();
        assert_eq!(parent, "serverA");
        assert_eq!(id, "poolB");
    }

    #[test]
    fn missing_separator_is_malformed() {
        assert!(matches!(
            split_import_id("serverA"),
            Err(ProvisionError::MalformedImportId { .. })
        ));
    }

    #[test]
    fn extra_separator_is_malformed() {
        assert!(matches!(
            split_import_id("a/b/c"),
            Err(ProvisionError::MalformedImportId { .. })
        ));
    }

    #[test]
    fn empty_components_are_malformed() {
        assert!(split_import_id("/poolB").is_err());
        assert!(split_import_id("serverA/").is_err());
        assert!(split_import_id("/").is_err());
        assert!(split_import_id("").is_err());
    }

    #[test]
    fn plain_id_accepts_bare_ids_only() {
        assert_eq!(plain_import_id("svc-1").unwrap(), "svc-1");
        assert!(plain_import_id("").is_err());
        assert!(plain_import_id("a/b").is_err());
    }
}
