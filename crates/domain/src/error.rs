//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`SentraError`]
//! via `#[from]` or an explicit boxing conversion (storage adapters).

/// Top-level error enum shared by services and adapters.
#[derive(Debug, thiserror::Error)]
pub enum SentraError {
    /// A domain invariant or request precondition failed.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A lookup target does not exist. Recoverable for callers.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A persistence operation failed. The source carries the adapter detail.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Violated domain invariants.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A device identifier was empty or missing.
    #[error("device id must not be empty")]
    EmptyDeviceId,

    /// An ingestion request carried no metrics at all.
    #[error("metrics must not be empty")]
    EmptyMetrics,

    /// A display name was empty.
    #[error("name must not be empty")]
    EmptyName,
}

/// A lookup by identifier found nothing.
#[derive(Debug, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// Human-readable kind of the missing record (e.g. `"Device"`).
    pub entity: &'static str,
    /// The identifier that was looked up.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_format_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Device",
            id: "dev_home_01".to_string(),
        };
        assert_eq!(err.to_string(), "Device not found: dev_home_01");
    }

    #[test]
    fn should_convert_validation_error_into_sentra_error() {
        let err: SentraError = ValidationError::EmptyDeviceId.into();
        assert!(matches!(
            err,
            SentraError::Validation(ValidationError::EmptyDeviceId)
        ));
    }

    #[test]
    fn should_convert_not_found_error_into_sentra_error() {
        let err: SentraError = NotFoundError {
            entity: "Variant",
            id: "office".to_string(),
        }
        .into();
        assert!(matches!(err, SentraError::NotFound(_)));
    }
}
