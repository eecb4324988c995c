//! Directed edge implementation
//!
//! Tail and head are fixed at construction. Edges are allowed to connect
//! nodes living in unrelated graph hierarchies; nothing checks that both
//! endpoints share a root.

use super::attributes::{AttributeBag, EntityRevision};
use super::predicate::{BasePredicate, Predicate};
use super::types::Identifier;
use serde::{Serialize, Serializer};
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct Edge {
    /// Unique identifier for this edge
    id: Identifier,

    /// Tail node (edge goes FROM this node)
    tail: Identifier,

    /// Head node (edge goes TO this node)
    head: Identifier,

    /// Semantic relationship, immutable once assigned
    #[serde(serialize_with = "serialize_predicate")]
    predicate: Box<dyn Predicate>,

    attributes: AttributeBag,

    #[serde(skip)]
    revision: Arc<EntityRevision>,
}

impl Edge {
    pub(crate) fn new(
        tail: Identifier,
        head: Identifier,
        predicate: Option<Box<dyn Predicate>>,
    ) -> Self {
        let id = Identifier::generate();
        let revision = Arc::new(EntityRevision::new());
        let attributes = AttributeBag::new(id, &revision);

        Edge {
            id,
            tail,
            head,
            predicate: predicate.unwrap_or_else(|| Box::new(BasePredicate) as Box<dyn Predicate>),
            attributes,
            revision,
        }
    }

    pub fn id(&self) -> Identifier {
        self.id
    }

    pub fn tail(&self) -> Identifier {
        self.tail
    }

    pub fn head(&self) -> Identifier {
        self.head
    }

    pub fn predicate(&self) -> &dyn Predicate {
        self.predicate.as_ref()
    }

    /// The predicate as a concrete type, if it is one
    pub fn predicate_as<P: Predicate>(&self) -> Option<&P> {
        self.predicate.as_any().downcast_ref::<P>()
    }

    pub fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attributes
    }

    pub fn is_self_loop(&self) -> bool {
        self.tail == self.head
    }

    /// Check if this edge connects two specific nodes (in either direction)
    pub fn connects(&self, a: Identifier, b: Identifier) -> bool {
        (self.tail == a && self.head == b) || (self.tail == b && self.head == a)
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
}

#[allow(clippy::borrowed_box)]
fn serialize_predicate<S: Serializer>(
    predicate: &Box<dyn Predicate>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(predicate.name())
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
