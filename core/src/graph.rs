use serde::{Deserialize, Serialize};

/// Stable, unique vertex identifier.
pub type VertexId = String;

/// Stable, unique edge identifier.
pub type EdgeId = String;

/// Categorical type tag used by filter conditions.
pub type TypeName = String;

/// A graph vertex: identity plus a type tag. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    #[serde(rename = "type")]
    pub vertex_type: TypeName,
}

impl Vertex {
    /// Build a vertex from an id and a type tag.
    pub fn new(id: impl Into<VertexId>, vertex_type: impl Into<TypeName>) -> Self {
        Self {
            id: id.into(),
            vertex_type: vertex_type.into(),
        }
    }
}

/// A directed, typed connection `from_id -> to_id`.
///
/// Endpoints are ids, not references: an edge may name a vertex the
/// repository does not hold, which only surfaces when a query reaches it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    #[serde(rename = "type")]
    pub edge_type: TypeName,
    #[serde(rename = "fromId")]
    pub from_id: VertexId,
    #[serde(rename = "toId")]
    pub to_id: VertexId,
}

impl Edge {
    /// Build an edge `from_id -> to_id` with the given id and type tag.
    pub fn new(
        id: impl Into<EdgeId>,
        edge_type: impl Into<TypeName>,
        from_id: impl Into<VertexId>,
        to_id: impl Into<VertexId>,
    ) -> Self {
        Self {
            id: id.into(),
            edge_type: edge_type.into(),
            from_id: from_id.into(),
            to_id: to_id.into(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from_id == self.to_id
    }

    /// The endpoint reached when this edge is followed in `direction`.
    pub fn target(&self, direction: Direction) -> &str {
        match direction {
            Direction::Outgoing => &self.to_id,
            Direction::Incoming => &self.from_id,
        }
    }
}

/// Which adjacency index a neighbor query reads.
///
/// `Outgoing` follows edges forward (`from -> to`), `Incoming` follows them
/// backward (`to -> from`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Outgoing,
    Incoming,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Outgoing => Direction::Incoming,
            Direction::Incoming => Direction::Outgoing,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Outgoing => "outgoing",
            Direction::Incoming => "incoming",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_target_by_direction() {
        let e = Edge::new("e1", "link", "a", "b");
        assert_eq!(e.target(Direction::Outgoing), "b");
        assert_eq!(e.target(Direction::Incoming), "a");
        assert!(!e.is_self_loop());
        assert!(Edge::new("e2", "link", "a", "a").is_self_loop());
    }

    #[test]
    fn test_direction_reverse() {
        assert_eq!(Direction::Outgoing.reverse(), Direction::Incoming);
        assert_eq!(Direction::Incoming.reverse(), Direction::Outgoing);
        assert_eq!(Direction::default(), Direction::Outgoing);
        assert_eq!(Direction::Incoming.to_string(), "incoming");
    }

    #[test]
    fn test_wire_field_names() {
        let e: Edge = serde_json::from_str(
            r#"{"id":"e1","type":"link","fromId":"a","toId":"b"}"#,
        )
        .unwrap();
        assert_eq!(e, Edge::new("e1", "link", "a", "b"));

        let v: Vertex = serde_json::from_str(r#"{"id":"a","type":"x"}"#).unwrap();
        assert_eq!(v.vertex_type, "x");
        assert_eq!(
            serde_json::to_string(&v).unwrap(),
            r#"{"id":"a","type":"x"}"#
        );
    }
}
