//! Error types for repository lookups.

use thiserror::Error;

use crate::graph::{EdgeId, VertexId};

/// Lookup failures. Both kinds mean a dangling reference or a bad input id;
/// neither is transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// No vertex with this id exists, either on direct lookup or as the
    /// endpoint of an indexed edge.
    #[error("vertex with id '{0}' not exist")]
    VertexNotFound(VertexId),

    /// No edge with this id exists.
    #[error("edge with id '{0}' not exist")]
    EdgeNotFound(EdgeId),
}

/// Result type for repository operations.
pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphError::VertexNotFound("v42".to_string());
        assert!(err.to_string().contains("v42"));

        let err = GraphError::EdgeNotFound("e7".to_string());
        assert_eq!(err.to_string(), "edge with id 'e7' not exist");
    }
}
