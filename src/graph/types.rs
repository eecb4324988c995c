//! Core type definitions for the graph model

use super::error::{GraphError, GraphResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier shared by every addressable entity
/// (graphs, subgraphs, nodes and edges).
///
/// The canonical encoding is the lowercase hyphenated UUID form, e.g.
/// `67e55044-10b1-426f-9247-bb680e5fe0c8`. Only that exact form parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Uuid);

impl Identifier {
    /// Length of the canonical encoding
    pub const ENCODED_LEN: usize = 36;

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Identifier(Uuid::new_v4())
    }

    /// Parse the canonical encoding
    pub fn parse(s: &str) -> GraphResult<Self> {
        let malformed = || GraphError::MalformedIdentifier(s.to_string());

        if s.len() != Self::ENCODED_LEN {
            return Err(malformed());
        }
        let uuid = Uuid::try_parse(s).map_err(|_| malformed())?;

        // uuid accepts upper-case hex too; the canonical form is lowercase only
        let id = Identifier(uuid);
        if id.to_string() != s {
            return Err(malformed());
        }
        Ok(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

impl FromStr for Identifier {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identifier::parse(s)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Identifier::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Kind of entity registered in a graph's membership index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Node,
    SubGraph,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Node => write!(f, "node"),
            MemberKind::SubGraph => write!(f, "subgraph"),
        }
    }
}
