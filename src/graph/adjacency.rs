//! Per-node edge index
//!
//! Adjacency lists split by direction. Order is registration order.

use super::types::Identifier;
use serde::{Deserialize, Serialize};

/// Role a node plays for an incident edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeRole {
    /// Node is the tail (edge goes FROM this node)
    Outgoing,
    /// Node is the head (edge goes TO this node)
    Incoming,
}

/// Incident edges of a single node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCollection {
    outgoing: Vec<Identifier>,
    incoming: Vec<Identifier>,
}

impl EdgeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an edge to the list for `role`
    pub fn register(&mut self, edge: Identifier, role: EdgeRole) {
        match role {
            EdgeRole::Outgoing => self.outgoing.push(edge),
            EdgeRole::Incoming => self.incoming.push(edge),
        }
    }

    pub fn outgoing(&self) -> &[Identifier] {
        &self.outgoing
    }

    pub fn incoming(&self) -> &[Identifier] {
        &self.incoming
    }

    /// Outgoing followed by incoming. A self-loop shows up twice.
    pub fn all(&self) -> Vec<Identifier> {
        self.outgoing
            .iter()
            .chain(self.incoming.iter())
            .copied()
            .collect()
    }

    pub fn degree(&self, role: EdgeRole) -> usize {
        match role {
            EdgeRole::Outgoing => self.outgoing.len(),
            EdgeRole::Incoming => self.incoming.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.outgoing.len() + self.incoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty() && self.incoming.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_by_role() {
        let mut edges = EdgeCollection::new();
        let e1 = Identifier::generate();
        let e2 = Identifier::generate();
        let e3 = Identifier::generate();

        edges.register(e1, EdgeRole::Outgoing);
        edges.register(e2, EdgeRole::Incoming);
        edges.register(e3, EdgeRole::Outgoing);

        assert_eq!(edges.outgoing(), &[e1, e3]);
        assert_eq!(edges.incoming(), &[e2]);
        assert_eq!(edges.all(), vec![e1, e3, e2]);
        assert_eq!(edges.degree(EdgeRole::Outgoing), 2);
        assert_eq!(edges.degree(EdgeRole::Incoming), 1);
        assert_eq!(edges.len(), 3);
    }

    #[test]
    fn test_self_loop_appears_twice() {
        let mut edges = EdgeCollection::new();
        let lp = Identifier::generate();
        edges.register(lp, EdgeRole::Outgoing);
        edges.register(lp, EdgeRole::Incoming);

        assert_eq!(edges.all(), vec![lp, lp]);
    }

    #[test]
    fn test_empty() {
        let edges = EdgeCollection::new();
        assert!(edges.is_empty());
        assert!(edges.all().is_empty());
    }
}
