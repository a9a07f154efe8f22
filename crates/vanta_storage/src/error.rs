//! # Storage Error Types
//!
//! All errors that can occur in the component storage layer.
//!
//! Every error is detected before any state changes: the failing operation
//! is a no-op, a diagnostic is emitted through `tracing`, and the error is
//! returned for the caller to escalate or ignore. Nothing here is fatal.

use thiserror::Error;

use crate::entity::EntityId;

/// Errors reported by sparse set and registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The entity id lies outside the set's sparse index range.
    ///
    /// The range grows only through [`SparseSet::reserve`](crate::SparseSet::reserve),
    /// never as a side effect of an insert.
    #[error("entity {entity} is out of range: sparse capacity is {capacity}")]
    CapacityExceeded {
        /// The rejected entity id.
        entity: EntityId,
        /// The sparse capacity at the time of the call.
        capacity: usize,
    },

    /// The entity already holds a component of the requested type.
    #[error("entity {entity} already has a component of this type")]
    DuplicateComponent {
        /// The rejected entity id.
        entity: EntityId,
    },

    /// The entity holds no component of the requested type.
    #[error("entity {entity} has no component of this type")]
    MissingComponent {
        /// The rejected entity id.
        entity: EntityId,
    },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Rejects an operation: emits the diagnostic, then hands the error back.
///
/// This is the single observability chokepoint of the crate. The sink is
/// whatever `tracing` subscriber the embedder installs; with none, the
/// storage layer is silent and the functional contract is unchanged.
pub(crate) fn reject<T>(error: StorageError) -> StorageResult<T> {
    tracing::warn!(%error, "storage operation rejected");
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_name_the_offender() {
        let error = StorageError::CapacityExceeded {
            entity: EntityId::new(9),
            capacity: 4,
        };
        assert_eq!(
            error.to_string(),
            "entity 9 is out of range: sparse capacity is 4"
        );

        let error = StorageError::MissingComponent {
            entity: EntityId::new(3),
        };
        assert!(error.to_string().contains("entity 3"));
    }
}
