//! Core graph model
//!
//! This module implements:
//! - Identifiers shared by every addressable entity
//! - Observable attribute bags on graphs, nodes and edges
//! - Directed edges with per-node adjacency bookkeeping
//! - Graphs nesting recursively as subgraphs, with transitive membership

pub mod adjacency;
pub mod attributes;
pub mod container;
pub mod edge;
pub mod error;
pub mod event;
pub mod node;
pub mod predicate;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use adjacency::{EdgeCollection, EdgeRole};
pub use attributes::{AttributeBag, AttributeObserver, EntityRevision};
pub use container::{Graph, GraphProjection, IncidentEdges, Member};
pub use edge::Edge;
pub use error::{GraphError, GraphResult};
pub use event::AttributeChange;
pub use node::Node;
pub use predicate::{BasePredicate, Predicate};
pub use property::{AttributeMap, AttributeValue};
pub use store::{Ancestors, GraphStore};
pub use types::{Identifier, MemberKind};
