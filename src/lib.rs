//! Nestgraph
//!
//! An in-memory graph model of addressable nodes and directed edges, grouped
//! into graphs that nest recursively as subgraphs of other graphs.
//!
//! The crate covers identity, containment and adjacency bookkeeping:
//! - Unique identifiers with a strict canonical string encoding
//! - Recursive membership: a node created in a subgraph is a member of every
//!   ancestor, with O(1) lookup from any level
//! - Per-node outgoing/incoming edge lists
//! - Observable attribute bags on every entity
//!
//! ## Example Usage
//!
//! ```rust
//! use nestgraph::graph::GraphStore;
//!
//! let mut store = GraphStore::new();
//!
//! // A root graph with a nested subgraph
//! let people = store.create_graph();
//! let team = store.create_subgraph(people).unwrap();
//!
//! // Nodes live in exactly one graph but are visible from every ancestor
//! let alice = store.create_node(team).unwrap();
//! let bob = store.create_node(people).unwrap();
//! assert!(store.contains(people, alice));
//!
//! // Attributes
//! if let Some(node) = store.get_node_mut(alice) {
//!     node.attributes_mut().set("name", "Alice");
//!     node.attributes_mut().set("active", true);
//! }
//!
//! // Directed edge with the default predicate
//! let knows = store.create_edge(alice, bob, None).unwrap();
//! assert_eq!(store.get_node(alice).unwrap().edges().outgoing(), &[knows]);
//!
//! // Direct members only
//! let projection = store.to_array(people).unwrap();
//! assert_eq!(projection.members, vec![team, bob]);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod graph;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigResult, StoreConfig};
pub use graph::{
    AttributeBag, AttributeChange, AttributeMap, AttributeObserver, AttributeValue,
    BasePredicate, Edge, EdgeCollection, EdgeRole, Graph, GraphError, GraphProjection,
    GraphResult, GraphStore, Identifier, Member, MemberKind, Node, Predicate,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
