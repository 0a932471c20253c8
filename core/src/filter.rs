use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::graph::{Edge, TypeName, Vertex};

/// Allow/exclude type sets applied to vertexes and, independently, to edges.
///
/// For either pair: when `*_only` is present the type must be a member of
/// it, and a type found in `*_exclude` is always rejected. Exclusion wins
/// over inclusion. An absent condition accepts everything; see
/// [`vertex_passes`] and [`edge_passes`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCondition {
    pub vertex_types_only: Option<HashSet<TypeName>>,
    #[serde(deserialize_with = "null_as_empty")]
    pub vertex_types_exclude: HashSet<TypeName>,
    pub connection_types_only: Option<HashSet<TypeName>>,
    #[serde(deserialize_with = "null_as_empty")]
    pub connection_types_exclude: HashSet<TypeName>,
}

/// An explicit `null` exclude set excludes nothing.
fn null_as_empty<'de, D>(deserializer: D) -> Result<HashSet<TypeName>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<HashSet<TypeName>>::deserialize(deserializer)?.unwrap_or_default())
}

impl FilterCondition {
    /// A condition that accepts everything until narrowed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict vertexes to these types. Repeated calls widen the allow set.
    pub fn only_vertex_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TypeName>,
    {
        self.vertex_types_only
            .get_or_insert_with(HashSet::new)
            .extend(types.into_iter().map(Into::into));
        self
    }

    /// Reject vertexes of these types, whatever the allow set says.
    pub fn exclude_vertex_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TypeName>,
    {
        self.vertex_types_exclude
            .extend(types.into_iter().map(Into::into));
        self
    }

    /// Restrict edges to these types. Repeated calls widen the allow set.
    pub fn only_edge_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TypeName>,
    {
        self.connection_types_only
            .get_or_insert_with(HashSet::new)
            .extend(types.into_iter().map(Into::into));
        self
    }

    /// Reject edges of these types, whatever the allow set says.
    pub fn exclude_edge_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TypeName>,
    {
        self.connection_types_exclude
            .extend(types.into_iter().map(Into::into));
        self
    }

    /// True when no set constrains anything.
    pub fn accepts_all(&self) -> bool {
        self.vertex_types_only.is_none()
            && self.vertex_types_exclude.is_empty()
            && self.connection_types_only.is_none()
            && self.connection_types_exclude.is_empty()
    }

    /// Vertex type check against both vertex sets.
    #[inline]
    pub fn is_suitable_vertex(&self, vertex: &Vertex) -> bool {
        type_passes(
            &vertex.vertex_type,
            self.vertex_types_only.as_ref(),
            &self.vertex_types_exclude,
        )
    }

    /// Edge type check against both connection sets.
    #[inline]
    pub fn is_suitable_edge(&self, edge: &Edge) -> bool {
        type_passes(
            &edge.edge_type,
            self.connection_types_only.as_ref(),
            &self.connection_types_exclude,
        )
    }
}

#[inline]
fn type_passes(ty: &str, only: Option<&HashSet<TypeName>>, exclude: &HashSet<TypeName>) -> bool {
    if let Some(only) = only {
        if !only.contains(ty) {
            return false;
        }
    }
    !exclude.contains(ty)
}

/// Vertex check for an optional condition; `None` accepts without looking.
#[inline]
pub fn vertex_passes(condition: Option<&FilterCondition>, vertex: &Vertex) -> bool {
    match condition {
        None => true,
        Some(c) => c.is_suitable_vertex(vertex),
    }
}

/// Edge check for an optional condition; `None` accepts without looking.
#[inline]
pub fn edge_passes(condition: Option<&FilterCondition>, edge: &Edge) -> bool {
    match condition {
        None => true,
        Some(c) => c.is_suitable_edge(edge),
    }
}
