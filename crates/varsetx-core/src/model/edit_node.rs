use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ChoiceTriple;

/// Opaque reference to a node in an edit chain (or to the chain's root input)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeRef(String);

impl NodeRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh time-ordered reference (UUID v7)
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A node in the edit chain
///
/// Nodes created by the chain builder carry the applier marker and the
/// triple they encode. Nodes authored by other means may carry neither, and
/// a damaged node may carry the marker without a triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditNode {
    /// Unique reference for this node within its chain
    pub id: NodeRef,

    /// Display name, unique within the chain
    pub name: String,

    /// The single input this node edits
    pub upstream: Option<NodeRef>,

    /// The (node path, group, choice) this node sets, if it records one
    pub triple: Option<ChoiceTriple>,

    /// Applier marker recorded at creation time
    pub marker: Option<String>,

    /// Timestamp when this node was created
    pub created_at: DateTime<Utc>,
}

impl EditNode {
    /// Create a node the way the chain builder does: tagged and recording its triple
    pub fn applied(
        id: NodeRef,
        name: String,
        upstream: NodeRef,
        triple: ChoiceTriple,
        marker: String,
    ) -> Self {
        Self {
            id,
            name,
            upstream: Some(upstream),
            triple: Some(triple),
            marker: Some(marker),
            created_at: Utc::now(),
        }
    }

    /// Create a node authored outside the chain builder (no marker)
    pub fn authored(
        id: NodeRef,
        name: String,
        upstream: Option<NodeRef>,
        triple: Option<ChoiceTriple>,
    ) -> Self {
        Self {
            id,
            name,
            upstream,
            triple,
            marker: None,
            created_at: Utc::now(),
        }
    }

    /// The recorded triple, if this node exposes a complete one
    ///
    /// A triple with an empty field counts as absent.
    pub fn recorded_triple(&self) -> Option<&ChoiceTriple> {
        self.triple.as_ref().filter(|t| t.validate().is_ok())
    }

    /// Check whether this node carries the given applier marker
    pub fn has_marker(&self, marker: &str) -> bool {
        self.marker.as_deref() == Some(marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applied_node_exposes_triple_and_marker() {
        let node = EditNode::applied(
            NodeRef::new("e1"),
            "blue".to_string(),
            NodeRef::new("root"),
            ChoiceTriple::new("/A", "look", "blue"),
            "varsetx.applier".to_string(),
        );

        assert!(node.has_marker("varsetx.applier"));
        assert!(!node.has_marker("other"));
        assert_eq!(
            node.recorded_triple(),
            Some(&ChoiceTriple::new("/A", "look", "blue"))
        );
        assert_eq!(node.upstream, Some(NodeRef::new("root")));
    }

    #[test]
    fn test_partial_triple_is_not_exposed() {
        let node = EditNode::authored(
            NodeRef::new("m1"),
            "manual".to_string(),
            None,
            Some(ChoiceTriple::new("/A", "", "blue")),
        );
        assert!(node.recorded_triple().is_none());
        assert!(node.marker.is_none());
    }

    #[test]
    fn test_generated_refs_are_distinct() {
        assert_ne!(NodeRef::generate(), NodeRef::generate());
    }
}
