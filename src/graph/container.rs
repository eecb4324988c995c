//! Graphs and subgraphs
//!
//! A [`Graph`] is a container of nodes and other graphs. A subgraph is the
//! same type with a parent set: it is both a container and a member of its
//! parent.
//!
//! Each graph keeps two indices:
//! - `direct_members`: entities registered straight into this graph, in
//!   registration order
//! - `all_members`: every entity reachable through the containment chain,
//!   maintained eagerly by the store so lookups never walk the tree

use super::attributes::{AttributeBag, EntityRevision};
use super::edge::Edge;
use super::node::Node;
use super::types::{Identifier, MemberKind};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug)]
pub struct Graph {
    id: Identifier,

    /// Containing graph; `None` for a root graph
    parent: Option<Identifier>,

    direct_members: IndexMap<Identifier, MemberKind>,

    all_members: FxHashMap<Identifier, MemberKind>,

    attributes: AttributeBag,

    revision: Arc<EntityRevision>,
}

impl Graph {
    pub(crate) fn new_root() -> Self {
        Self::with_parent(None)
    }

    pub(crate) fn new_subgraph(parent: Identifier) -> Self {
        Self::with_parent(Some(parent))
    }

    fn with_parent(parent: Option<Identifier>) -> Self {
        let id = Identifier::generate();
        let revision = Arc::new(EntityRevision::new());
        let attributes = AttributeBag::new(id, &revision);

        Graph {
            id,
            parent,
            direct_members: IndexMap::new(),
            all_members: FxHashMap::default(),
            attributes,
            revision,
        }
    }

    pub fn id(&self) -> Identifier {
        self.id
    }

    pub fn parent(&self) -> Option<Identifier> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_subgraph(&self) -> bool {
        self.parent.is_some()
    }

    /// Whether `id` is a member at any depth
    pub fn contains(&self, id: Identifier) -> bool {
        self.all_members.contains_key(&id)
    }

    /// Whether `id` was registered straight into this graph
    pub fn contains_directly(&self, id: Identifier) -> bool {
        self.direct_members.contains_key(&id)
    }

    /// Kind of a member at any depth
    pub fn member_kind(&self, id: Identifier) -> Option<MemberKind> {
        self.all_members.get(&id).copied()
    }

    /// Direct members in registration order
    pub fn direct_members(&self) -> impl Iterator<Item = (Identifier, MemberKind)> + '_ {
        self.direct_members.iter().map(|(id, kind)| (*id, *kind))
    }

    pub fn direct_member_count(&self) -> usize {
        self.direct_members.len()
    }

    /// Number of members at any depth
    pub fn member_count(&self) -> usize {
        self.all_members.len()
    }

    /// Flat projection of the direct members, in registration order.
    /// Nested members are only visible through the subgraph's own projection.
    pub fn to_array(&self) -> GraphProjection {
        GraphProjection {
            members: self.direct_members.keys().copied().collect(),
        }
    }

    pub fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attributes
    }

    pub fn version(&self) -> u64 {
        self.revision.version()
    }

    pub fn created_at(&self) -> i64 {
        self.revision.created_at()
    }

    pub fn updated_at(&self) -> i64 {
        self.revision.updated_at()
    }

    pub(crate) fn register_direct(&mut self, id: Identifier, kind: MemberKind) {
        self.direct_members.insert(id, kind);
    }

    pub(crate) fn register_transitive(&mut self, id: Identifier, kind: MemberKind) {
        self.all_members.insert(id, kind);
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Graph {}

/// Serializable `{"members": [...]}` view of a graph's direct members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphProjection {
    pub members: Vec<Identifier>,
}

/// Borrowed member resolved from a graph's membership index
#[derive(Debug, Clone, Copy)]
pub enum Member<'a> {
    Node(&'a Node),
    SubGraph(&'a Graph),
}

impl<'a> Member<'a> {
    pub fn id(&self) -> Identifier {
        match self {
            Member::Node(node) => node.id(),
            Member::SubGraph(graph) => graph.id(),
        }
    }

    pub fn kind(&self) -> MemberKind {
        match self {
            Member::Node(_) => MemberKind::Node,
            Member::SubGraph(_) => MemberKind::SubGraph,
        }
    }

    pub fn as_node(&self) -> Option<&'a Node> {
        match *self {
            Member::Node(node) => Some(node),
            Member::SubGraph(_) => None,
        }
    }

    pub fn as_subgraph(&self) -> Option<&'a Graph> {
        match *self {
            Member::SubGraph(graph) => Some(graph),
            Member::Node(_) => None,
        }
    }

    pub fn attributes(&self) -> &'a AttributeBag {
        match *self {
            Member::Node(node) => node.attributes(),
            Member::SubGraph(graph) => graph.attributes(),
        }
    }
}

/// Edges resolved for a node, grouped like its [`EdgeCollection`](super::adjacency::EdgeCollection)
#[derive(Debug, Clone, Default)]
pub struct IncidentEdges<'a> {
    pub outgoing: Vec<&'a Edge>,
    pub incoming: Vec<&'a Edge>,
}

impl<'a> IncidentEdges<'a> {
    /// Outgoing followed by incoming
    pub fn all(&self) -> Vec<&'a Edge> {
        self.outgoing
            .iter()
            .chain(self.incoming.iter())
            .copied()
            .collect()
    }
}
