//! In-memory graph storage
//!
//! The store is the arena that owns every graph, node and edge. Entities
//! refer to each other by [`Identifier`] only: a graph's membership indices,
//! a subgraph's parent link, a node's owning graph and an edge's endpoints
//! are all non-owning.
//!
//! Registration protocol: when a node or subgraph is created under graph
//! `g`, it is inserted into `g`'s direct index, then into the recursive
//! index of `g` and of every ancestor up to the root. The walk is
//! iterative, so nesting depth never turns into stack depth.

use super::adjacency::EdgeRole;
use super::container::{Graph, GraphProjection, IncidentEdges, Member};
use super::edge::Edge;
use super::error::{GraphError, GraphResult};
use super::node::Node;
use super::predicate::Predicate;
use super::types::{Identifier, MemberKind};
use crate::config::StoreConfig;
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug)]
pub struct GraphStore {
    graphs: HashMap<Identifier, Graph>,

    nodes: HashMap<Identifier, Node>,

    edges: HashMap<Identifier, Edge>,

    max_depth: Option<usize>,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::default())
    }

    pub fn with_config(config: &StoreConfig) -> Self {
        info!(
            graph_capacity = config.graph_capacity,
            node_capacity = config.node_capacity,
            edge_capacity = config.edge_capacity,
            max_depth = ?config.max_depth,
            "creating graph store"
        );
        GraphStore {
            graphs: HashMap::with_capacity(config.graph_capacity),
            nodes: HashMap::with_capacity(config.node_capacity),
            edges: HashMap::with_capacity(config.edge_capacity),
            max_depth: config.max_depth,
        }
    }

    /// Create a root graph
    pub fn create_graph(&mut self) -> Identifier {
        let graph = Graph::new_root();
        let id = graph.id();
        self.graphs.insert(id, graph);
        debug!(graph = %id, "created root graph");
        id
    }

    /// Create a subgraph, registered as a member of `parent` and of every
    /// ancestor of `parent`
    pub fn create_subgraph(&mut self, parent: Identifier) -> GraphResult<Identifier> {
        if !self.has_graph(parent) {
            return Err(GraphError::GraphNotFound(parent));
        }
        if let Some(max_depth) = self.max_depth {
            if self.depth(parent) + 1 > max_depth {
                return Err(GraphError::NestingTooDeep { parent, max_depth });
            }
        }

        let subgraph = Graph::new_subgraph(parent);
        let id = subgraph.id();
        self.register_member(parent, id, MemberKind::SubGraph)?;
        self.graphs.insert(id, subgraph);
        debug!(subgraph = %id, parent = %parent, "created subgraph");
        Ok(id)
    }

    /// Create a node owned by `graph`
    pub fn create_node(&mut self, graph: Identifier) -> GraphResult<Identifier> {
        if !self.has_graph(graph) {
            return Err(GraphError::GraphNotFound(graph));
        }

        let node = Node::new(graph);
        let id = node.id();
        self.register_member(graph, id, MemberKind::Node)?;
        self.nodes.insert(id, node);
        debug!(node = %id, graph = %graph, "created node");
        Ok(id)
    }

    /// Create a directed edge from `tail` to `head`. Without a predicate the
    /// edge gets a [`BasePredicate`](super::predicate::BasePredicate).
    ///
    /// The endpoints may belong to unrelated graph hierarchies.
    pub fn create_edge(
        &mut self,
        tail: Identifier,
        head: Identifier,
        predicate: Option<Box<dyn Predicate>>,
    ) -> GraphResult<Identifier> {
        if !self.has_node(tail) {
            return Err(GraphError::InvalidEdgeTail(tail));
        }
        if !self.has_node(head) {
            return Err(GraphError::InvalidEdgeHead(head));
        }

        let edge = Edge::new(tail, head, predicate);
        let id = edge.id();

        if let Some(node) = self.nodes.get_mut(&tail) {
            node.edges_mut().register(id, EdgeRole::Outgoing);
        }
        if let Some(node) = self.nodes.get_mut(&head) {
            node.edges_mut().register(id, EdgeRole::Incoming);
        }

        debug!(edge = %id, tail = %tail, head = %head, predicate = edge.predicate().name(), "created edge");
        self.edges.insert(id, edge);
        Ok(id)
    }

    fn register_member(
        &mut self,
        graph: Identifier,
        member: Identifier,
        kind: MemberKind,
    ) -> GraphResult<()> {
        self.graphs
            .get_mut(&graph)
            .ok_or(GraphError::GraphNotFound(graph))?
            .register_direct(member, kind);

        let mut levels = 0usize;
        let mut cursor = Some(graph);
        while let Some(current) = cursor {
            let ancestor = self
                .graphs
                .get_mut(&current)
                .ok_or(GraphError::GraphNotFound(current))?;
            ancestor.register_transitive(member, kind);
            cursor = ancestor.parent();
            levels += 1;
        }

        debug!(member = %member, %kind, graph = %graph, levels, "registered member");
        Ok(())
    }

    /// Resolve a member of `graph` at any depth
    pub fn get(&self, graph: Identifier, id: Identifier) -> GraphResult<Member<'_>> {
        let container = self
            .get_graph(graph)
            .ok_or(GraphError::GraphNotFound(graph))?;

        let member = match container.member_kind(id) {
            Some(MemberKind::Node) => self.nodes.get(&id).map(Member::Node),
            Some(MemberKind::SubGraph) => self.graphs.get(&id).map(Member::SubGraph),
            None => None,
        };
        member.ok_or(GraphError::NotFound(id))
    }

    /// Whether `id` is a member of `graph` at any depth. Unknown graphs
    /// contain nothing.
    pub fn contains(&self, graph: Identifier, id: Identifier) -> bool {
        self.get_graph(graph)
            .map(|g| g.contains(id))
            .unwrap_or(false)
    }

    /// Projection of the direct members of `graph`
    pub fn to_array(&self, graph: Identifier) -> GraphResult<GraphProjection> {
        self.get_graph(graph)
            .map(Graph::to_array)
            .ok_or(GraphError::GraphNotFound(graph))
    }

    /// Ancestors of `graph`, nearest first, ending at the root
    pub fn ancestors(&self, graph: Identifier) -> Ancestors<'_> {
        Ancestors {
            store: self,
            next: self.get_graph(graph).and_then(Graph::parent),
        }
    }

    /// Root graph of the hierarchy `graph` belongs to
    pub fn root_of(&self, graph: Identifier) -> GraphResult<Identifier> {
        if !self.has_graph(graph) {
            return Err(GraphError::GraphNotFound(graph));
        }
        Ok(self.ancestors(graph).last().unwrap_or(graph))
    }

    /// Nesting depth of `graph`; root graphs are depth 0
    pub fn depth(&self, graph: Identifier) -> usize {
        self.ancestors(graph).count()
    }

    pub fn get_graph(&self, id: Identifier) -> Option<&Graph> {
        self.graphs.get(&id)
    }

    pub fn get_graph_mut(&mut self, id: Identifier) -> Option<&mut Graph> {
        self.graphs.get_mut(&id)
    }

    pub fn get_node(&self, id: Identifier) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_node_mut(&mut self, id: Identifier) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn get_edge(&self, id: Identifier) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn get_edge_mut(&mut self, id: Identifier) -> Option<&mut Edge> {
        self.edges.get_mut(&id)
    }

    pub fn has_graph(&self, id: Identifier) -> bool {
        self.graphs.contains_key(&id)
    }

    pub fn has_node(&self, id: Identifier) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn has_edge(&self, id: Identifier) -> bool {
        self.edges.contains_key(&id)
    }

    /// Get all outgoing edges from a node
    pub fn outgoing_edges(&self, node: Identifier) -> Vec<&Edge> {
        self.nodes
            .get(&node)
            .map(|n| self.resolve_edges(n.edges().outgoing()))
            .unwrap_or_default()
    }

    /// Get all incoming edges to a node
    pub fn incoming_edges(&self, node: Identifier) -> Vec<&Edge> {
        self.nodes
            .get(&node)
            .map(|n| self.resolve_edges(n.edges().incoming()))
            .unwrap_or_default()
    }

    /// Outgoing then incoming edges of a node
    pub fn incident_edges(&self, node: Identifier) -> GraphResult<IncidentEdges<'_>> {
        let n = self.nodes.get(&node).ok_or(GraphError::NodeNotFound(node))?;
        Ok(IncidentEdges {
            outgoing: self.resolve_edges(n.edges().outgoing()),
            incoming: self.resolve_edges(n.edges().incoming()),
        })
    }

    fn resolve_edges(&self, ids: &[Identifier]) -> Vec<&Edge> {
        ids.iter().filter_map(|id| self.edges.get(id)).collect()
    }

    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a graph's parent chain
pub struct Ancestors<'a> {
    store: &'a GraphStore,
    next: Option<Identifier>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = Identifier;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.store.get_graph(current).and_then(Graph::parent);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::predicate::BasePredicate;
    use std::any::Any;

    #[derive(Debug)]
    struct Cites;

    impl Predicate for Cites {
        fn name(&self) -> &str {
            "cites"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_create_and_get_node() {
        let mut store = GraphStore::new();
        let graph = store.create_graph();
        let node = store.create_node(graph).unwrap();

        assert_eq!(store.node_count(), 1);
        assert!(store.contains(graph, node));
        let member = store.get(graph, node).unwrap();
        assert_eq!(member.id(), node);
        assert_eq!(member.kind(), MemberKind::Node);
        assert_eq!(member.as_node().unwrap().graph(), graph);
    }

    #[test]
    fn test_get_missing_member() {
        let mut store = GraphStore::new();
        let graph = store.create_graph();
        let stranger = Identifier::generate();

        assert!(!store.contains(graph, stranger));
        assert_eq!(
            store.get(graph, stranger).unwrap_err(),
            GraphError::NotFound(stranger)
        );
    }

    #[test]
    fn test_unknown_graph() {
        let mut store = GraphStore::new();
        let missing = Identifier::generate();

        assert_eq!(store.create_node(missing), Err(GraphError::GraphNotFound(missing)));
        assert_eq!(store.create_subgraph(missing), Err(GraphError::GraphNotFound(missing)));
        assert!(store.get(missing, Identifier::generate()).is_err());
        assert!(!store.contains(missing, Identifier::generate()));
        assert!(store.to_array(missing).is_err());
        assert_eq!(store.node_count(), 0);
        assert_eq!(store.graph_count(), 0);
    }

    #[test]
    fn test_transitive_registration() {
        let mut store = GraphStore::new();
        let root = store.create_graph();
        let sub = store.create_subgraph(root).unwrap();
        let node = store.create_node(sub).unwrap();

        assert!(store.contains(sub, node));
        assert!(store.contains(root, node));
        assert!(store.contains(root, sub));
        assert!(!store.contains(sub, sub));

        let member = store.get(root, sub).unwrap();
        assert_eq!(member.as_subgraph().unwrap().parent(), Some(root));
        assert_eq!(store.get(root, node).unwrap().id(), node);
    }

    #[test]
    fn test_deep_nesting_updates_every_ancestor() {
        let mut store = GraphStore::new();
        let root = store.create_graph();

        let mut chain = vec![root];
        for _ in 0..50 {
            let parent = *chain.last().unwrap();
            chain.push(store.create_subgraph(parent).unwrap());
        }
        let leaf = store.create_node(*chain.last().unwrap()).unwrap();

        for graph in &chain {
            assert!(store.contains(*graph, leaf));
        }
        assert_eq!(store.depth(*chain.last().unwrap()), 50);
        assert_eq!(store.root_of(*chain.last().unwrap()).unwrap(), root);
        assert_eq!(store.get_graph(root).unwrap().member_count(), 51);
    }

    #[test]
    fn test_siblings_do_not_see_each_other() {
        let mut store = GraphStore::new();
        let root = store.create_graph();
        let left = store.create_subgraph(root).unwrap();
        let right = store.create_subgraph(root).unwrap();
        let node = store.create_node(left).unwrap();

        assert!(store.contains(left, node));
        assert!(!store.contains(right, node));
        assert!(store.contains(root, node));
    }

    #[test]
    fn test_to_array_direct_members_only() {
        let mut store = GraphStore::new();
        let root = store.create_graph();
        let sub = store.create_subgraph(root).unwrap();
        let nested = store.create_node(sub).unwrap();
        let direct = store.create_node(root).unwrap();

        assert_eq!(store.to_array(root).unwrap().members, vec![sub, direct]);
        assert_eq!(store.to_array(sub).unwrap().members, vec![nested]);
    }

    #[test]
    fn test_ancestors() {
        let mut store = GraphStore::new();
        let root = store.create_graph();
        let mid = store.create_subgraph(root).unwrap();
        let leaf = store.create_subgraph(mid).unwrap();

        assert_eq!(store.ancestors(leaf).collect::<Vec<_>>(), vec![mid, root]);
        assert_eq!(store.ancestors(root).count(), 0);
        assert_eq!(store.root_of(root).unwrap(), root);
        assert_eq!(store.depth(root), 0);
    }

    #[test]
    fn test_max_depth() {
        let config = StoreConfig {
            max_depth: Some(2),
            ..StoreConfig::default()
        };
        let mut store = GraphStore::with_config(&config);
        let root = store.create_graph();
        let one = store.create_subgraph(root).unwrap();
        let two = store.create_subgraph(one).unwrap();

        assert_eq!(
            store.create_subgraph(two),
            Err(GraphError::NestingTooDeep { parent: two, max_depth: 2 })
        );
        assert_eq!(store.graph_count(), 3);
        // Nodes are not limited by depth
        assert!(store.create_node(two).is_ok());
    }

    #[test]
    fn test_failed_creation_leaves_store_unchanged() {
        let mut store = GraphStore::new();
        let root = store.create_graph();
        let unknown = Identifier::generate();

        assert_eq!(store.create_subgraph(unknown), Err(GraphError::GraphNotFound(unknown)));
        assert_eq!(store.create_node(unknown), Err(GraphError::GraphNotFound(unknown)));
        assert_eq!(store.graph_count(), 1);
        assert_eq!(store.node_count(), 0);

        let sub = store.create_subgraph(root).unwrap();
        let node = store.create_node(sub).unwrap();
        assert!(store.get_graph(sub).is_some());
        assert!(store.get_node(node).is_some());
        assert!(store.contains(root, sub));
        assert!(store.contains(root, node));
        assert_eq!(store.graph_count(), 2);
        assert_eq!(store.node_count(), 1);
    }

    #[test]
    fn test_create_edge() {
        let mut store = GraphStore::new();
        let graph = store.create_graph();
        let n1 = store.create_node(graph).unwrap();
        let n2 = store.create_node(graph).unwrap();

        let edge = store.create_edge(n1, n2, None).unwrap();

        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.get_node(n1).unwrap().edges().outgoing(), &[edge]);
        assert_eq!(store.get_node(n2).unwrap().edges().incoming(), &[edge]);
        assert_eq!(store.get_node(n2).unwrap().edges().all(), vec![edge]);

        let e = store.get_edge(edge).unwrap();
        assert_eq!(e.tail(), n1);
        assert_eq!(e.head(), n2);
        assert!(e.predicate().is_base());
    }

    #[test]
    fn test_edge_validation() {
        let mut store = GraphStore::new();
        let graph = store.create_graph();
        let node = store.create_node(graph).unwrap();
        let invalid = Identifier::generate();

        assert_eq!(
            store.create_edge(invalid, node, None),
            Err(GraphError::InvalidEdgeTail(invalid))
        );
        assert_eq!(
            store.create_edge(node, invalid, None),
            Err(GraphError::InvalidEdgeHead(invalid))
        );
        assert_eq!(store.edge_count(), 0);
        assert!(store.get_node(node).unwrap().edges().is_empty());
    }

    #[test]
    fn test_self_loop() {
        let mut store = GraphStore::new();
        let graph = store.create_graph();
        let node = store.create_node(graph).unwrap();
        let edge = store.create_edge(node, node, None).unwrap();

        let edges = store.get_node(node).unwrap().edges();
        assert_eq!(edges.outgoing(), &[edge]);
        assert_eq!(edges.incoming(), &[edge]);
        assert_eq!(edges.all(), vec![edge, edge]);
        assert!(store.get_edge(edge).unwrap().is_self_loop());
    }

    #[test]
    fn test_edge_across_hierarchies() {
        let mut store = GraphStore::new();
        let left = store.create_graph();
        let right = store.create_graph();
        let a = store.create_node(left).unwrap();
        let b = store.create_node(right).unwrap();

        let edge = store.create_edge(a, b, None).unwrap();
        assert_eq!(store.outgoing_edges(a)[0].id(), edge);
        assert_eq!(store.incoming_edges(b)[0].id(), edge);
    }

    #[test]
    fn test_adjacency_lists() {
        let mut store = GraphStore::new();
        let graph = store.create_graph();
        let n1 = store.create_node(graph).unwrap();
        let n2 = store.create_node(graph).unwrap();
        let n3 = store.create_node(graph).unwrap();

        let e12 = store.create_edge(n1, n2, None).unwrap();
        let e13 = store.create_edge(n1, n3, None).unwrap();
        let e23 = store.create_edge(n2, n3, None).unwrap();

        let ids = |edges: Vec<&Edge>| edges.iter().map(|e| e.id()).collect::<Vec<_>>();
        assert_eq!(ids(store.outgoing_edges(n1)), vec![e12, e13]);
        assert_eq!(ids(store.incoming_edges(n3)), vec![e13, e23]);

        let incident = store.incident_edges(n2).unwrap();
        assert_eq!(ids(incident.all()), vec![e23, e12]);
        assert!(store.outgoing_edges(Identifier::generate()).is_empty());
        assert!(store.incident_edges(Identifier::generate()).is_err());
    }

    #[test]
    fn test_predicates_are_independent() {
        let mut store = GraphStore::new();
        let graph = store.create_graph();
        let a = store.create_node(graph).unwrap();
        let b = store.create_node(graph).unwrap();

        let custom = store.create_edge(a, b, Some(Box::new(Cites))).unwrap();
        let plain = store.create_edge(a, b, None).unwrap();

        assert!(store.get_edge(custom).unwrap().predicate_as::<Cites>().is_some());
        assert!(store.get_edge(plain).unwrap().predicate_as::<Cites>().is_none());
        assert!(store.get_edge(plain).unwrap().predicate_as::<BasePredicate>().is_some());
    }

    #[test]
    fn test_member_attributes_through_store() {
        let mut store = GraphStore::new();
        let graph = store.create_graph();
        let node = store.create_node(graph).unwrap();

        store
            .get_node_mut(node)
            .unwrap()
            .attributes_mut()
            .set("name", "Alice");

        let member = store.get(graph, node).unwrap();
        assert_eq!(member.attributes().get("name").unwrap().as_string(), Some("Alice"));
    }
}
