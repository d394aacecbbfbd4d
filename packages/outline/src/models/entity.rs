//! Entity Kinds and Node Identifiers
//!
//! The questionnaire builder works with a fixed three-level hierarchy:
//! sections contain steps, steps contain questions. Each level has exactly one
//! legal depth, so the kind of a node fully determines where it may live in
//! the tree.
//!
//! Node ids are composite strings of the form `"<kind>_<entity_id>"`
//! (e.g. `"step_42"`), unique across the whole tree even though the numeric
//! server ids are only unique per table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Server-assigned numeric entity id (unique per entity table).
pub type EntityId = i64;

/// Errors raised while parsing composite node ids
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdParseError {
    #[error("Unknown entity kind: {0}")]
    UnknownKind(String),

    #[error("Malformed node id (expected \"<kind>_<id>\"): {0}")]
    MalformedId(String),

    #[error("Invalid numeric entity id in node id: {0}")]
    InvalidEntityId(String),
}

/// The three entity kinds of the questionnaire hierarchy.
///
/// Each kind has a fixed depth and a fixed legal parent kind:
///
/// | kind     | depth | parent  |
/// |----------|-------|---------|
/// | section  | 0     | (root)  |
/// | step     | 1     | section |
/// | question | 2     | step    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Section,
    Step,
    Question,
}

impl EntityKind {
    /// The only depth at which this kind may appear.
    pub fn fixed_depth(&self) -> usize {
        match self {
            EntityKind::Section => 0,
            EntityKind::Step => 1,
            EntityKind::Question => 2,
        }
    }

    /// The kind a parent node must have, or `None` for root-level kinds.
    pub fn parent_kind(&self) -> Option<EntityKind> {
        match self {
            EntityKind::Section => None,
            EntityKind::Step => Some(EntityKind::Section),
            EntityKind::Question => Some(EntityKind::Step),
        }
    }

    /// Wire name of the kind (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Section => "section",
            EntityKind::Step => "step",
            EntityKind::Question => "question",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "section" => Ok(EntityKind::Section),
            "step" => Ok(EntityKind::Step),
            "question" => Ok(EntityKind::Question),
            other => Err(IdParseError::UnknownKind(other.to_string())),
        }
    }
}

/// Composite node id: `"<kind>_<entity_id>"`.
///
/// Stable for the lifetime of the entity, unique across the whole tree, and
/// self-describing: the kind and numeric id can always be recovered without a
/// tree lookup.
///
/// # Examples
///
/// ```rust
/// use auditflow_outline::models::{EntityKind, NodeId};
///
/// let id = NodeId::new(EntityKind::Step, 42);
/// assert_eq!(id.as_str(), "step_42");
/// assert_eq!(id.kind().unwrap(), EntityKind::Step);
/// assert_eq!(id.entity_id().unwrap(), 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Build a composite id from a kind and a server entity id.
    pub fn new(kind: EntityKind, entity_id: EntityId) -> Self {
        NodeId(format!("{}_{}", kind.as_str(), entity_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the composite id back into `(kind, entity_id)`.
    pub fn parse(&self) -> Result<(EntityKind, EntityId), IdParseError> {
        let (kind, id) = self
            .0
            .split_once('_')
            .ok_or_else(|| IdParseError::MalformedId(self.0.clone()))?;
        let kind = kind.parse::<EntityKind>()?;
        let id = id
            .parse::<EntityId>()
            .map_err(|_| IdParseError::InvalidEntityId(self.0.clone()))?;
        Ok((kind, id))
    }

    /// Entity kind embedded in the id.
    pub fn kind(&self) -> Result<EntityKind, IdParseError> {
        self.parse().map(|(kind, _)| kind)
    }

    /// Numeric server id embedded in the id.
    pub fn entity_id(&self) -> Result<EntityId, IdParseError> {
        self.parse().map(|(_, id)| id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NodeId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = NodeId(s.to_string());
        id.parse()?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_depths_match_hierarchy() {
        assert_eq!(EntityKind::Section.fixed_depth(), 0);
        assert_eq!(EntityKind::Step.fixed_depth(), 1);
        assert_eq!(EntityKind::Question.fixed_depth(), 2);
    }

    #[test]
    fn test_parent_kind_chain() {
        assert_eq!(EntityKind::Section.parent_kind(), None);
        assert_eq!(EntityKind::Step.parent_kind(), Some(EntityKind::Section));
        assert_eq!(EntityKind::Question.parent_kind(), Some(EntityKind::Step));
    }

    #[test]
    fn test_node_id_round_trip() {
        let id = NodeId::new(EntityKind::Question, 7);
        assert_eq!(id.as_str(), "question_7");
        assert_eq!(id.parse().unwrap(), (EntityKind::Question, 7));
    }

    #[test]
    fn test_node_id_rejects_unknown_kind() {
        let err = "widget_3".parse::<NodeId>().unwrap_err();
        assert!(matches!(err, IdParseError::UnknownKind(_)));
    }

    #[test]
    fn test_node_id_rejects_missing_separator() {
        let err = "section".parse::<NodeId>().unwrap_err();
        assert!(matches!(err, IdParseError::MalformedId(_)));
    }

    #[test]
    fn test_node_id_rejects_non_numeric_entity_id() {
        let err = "step_abc".parse::<NodeId>().unwrap_err();
        assert!(matches!(err, IdParseError::InvalidEntityId(_)));
    }

    #[test]
    fn test_kind_serde_is_lowercase() {
        let json = serde_json::to_string(&EntityKind::Question).unwrap();
        assert_eq!(json, "\"question\"");
        let kind: EntityKind = serde_json::from_str("\"section\"").unwrap();
        assert_eq!(kind, EntityKind::Section);
    }
}
