//! Node implementation
//!
//! A node belongs to exactly one graph (the one it was created in) and is
//! transitively a member of every ancestor of that graph. Membership itself
//! is recorded by [`GraphStore`](super::store::GraphStore); the node only
//! remembers its direct owner.

use super::adjacency::EdgeCollection;
use super::attributes::{AttributeBag, EntityRevision};
use super::types::Identifier;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct Node {
    /// Unique identifier for this node
    id: Identifier,

    /// Graph the node was created in
    graph: Identifier,

    /// Attributes, observed by this node's revision
    attributes: AttributeBag,

    /// Incident edges
    edges: EdgeCollection,

    #[serde(skip)]
    revision: Arc<EntityRevision>,
}

impl Node {
    pub(crate) fn new(graph: Identifier) -> Self {
        let id = Identifier::generate();
        let revision = Arc::new(EntityRevision::new());
        let attributes = AttributeBag::new(id, &revision);

        Node {
            id,
            graph,
            attributes,
            edges: EdgeCollection::new(),
            revision,
        }
    }

    pub fn id(&self) -> Identifier {
        self.id
    }

    /// Direct owning graph
    pub fn graph(&self) -> Identifier {
        self.graph
    }

    pub fn edges(&self) -> &EdgeCollection {
        &self.edges
    }

    pub(crate) fn edges_mut(&mut self) -> &mut EdgeCollection {
        &mut self.edges
    }

    pub fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attributes
    }

    /// Bumped on every attribute mutation, starting at 1
    pub fn version(&self) -> u64 {
        self.revision.version()
    }

    pub fn created_at(&self) -> i64 {
        self.revision.created_at()
    }

    pub fn updated_at(&self) -> i64 {
        self.revision.updated_at()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
