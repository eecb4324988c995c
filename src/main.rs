use anyhow::Context;
use nestgraph::graph::{AttributeBag, AttributeObserver, GraphStore};
use nestgraph::StoreConfig;
use std::sync::Arc;
use tracing::info;

/// Logs every attribute change it is attached to
struct ChangeLogger;

impl AttributeObserver for ChangeLogger {
    fn update(&self, bag: &AttributeBag) {
        if let Some(change) = bag.last_change() {
            info!(owner = %change.owner(), key = change.key(), unset = change.is_unset(), "attribute changed");
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Nestgraph v{}", nestgraph::version());
    println!("==========================================");

    let config = match std::env::args().nth(1) {
        Some(path) => StoreConfig::from_yaml_file(&path)
            .with_context(|| format!("loading config from {}", path))?,
        None => StoreConfig::default(),
    };
    let mut store = GraphStore::with_config(&config);
    let logger = Arc::new(ChangeLogger);

    // Organisation -> engineering -> platform team
    let org = store.create_graph();
    let engineering = store.create_subgraph(org)?;
    let platform = store.create_subgraph(engineering)?;

    let alice = store.create_node(platform)?;
    let bob = store.create_node(engineering)?;
    let carol = store.create_node(org)?;

    for (id, name) in [(alice, "Alice"), (bob, "Bob"), (carol, "Carol")] {
        if let Some(node) = store.get_node_mut(id) {
            node.attributes_mut().attach(&logger);
            node.attributes_mut().set("name", name);
        }
    }
    println!("✓ Created Alice (platform), Bob (engineering), Carol (org)");

    let reports_to = store.create_edge(alice, bob, None)?;
    store.create_edge(bob, carol, None)?;
    println!("✓ Alice -> Bob -> Carol");

    println!("\nContainment:");
    println!("  org contains Alice:         {}", store.contains(org, alice));
    println!("  engineering contains Alice: {}", store.contains(engineering, alice));
    println!("  platform contains Carol:    {}", store.contains(platform, carol));

    println!("\nProjections:");
    for (label, graph) in [("org", org), ("engineering", engineering), ("platform", platform)] {
        let projection = store.to_array(graph)?;
        println!("  {}: {}", label, serde_json::to_string(&projection)?);
    }

    if let Some(edge) = store.get_edge(reports_to) {
        println!("\nEdge {} uses predicate '{}'", edge.id(), edge.predicate().name());
    }

    println!("\nTotals: {} graphs, {} nodes, {} edges", store.graph_count(), store.node_count(), store.edge_count());
    Ok(())
}
