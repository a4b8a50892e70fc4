//! Node-link graph loading and saving.
//!
//! A persisted topology is a node-link document (YAML or JSON; the YAML
//! parser accepts both) with a `nodes` list carrying `id`, `type` and any
//! override blocks, and a `links` list with `source`, `target` and an
//! optional `value` weight. Loading validates the structural invariants and
//! reports violations as `Error::MalformedGraph`; saving emits the same
//! shape from an annotated graph so generated topologies round-trip.

use std::fs::File;
use std::path::Path;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::Error;
use crate::graph::{Graph, Node, NodeKind, DEFAULT_COST};

/// Node keys with dedicated fields on `Node`; everything else is a block.
const NODE_FIELDS: [&str; 2] = ["id", "type"];

#[derive(Debug, Default, Serialize, Deserialize)]
struct NodeLinkDocument {
    #[serde(default)]
    directed: bool,
    #[serde(default)]
    multigraph: bool,
    #[serde(default)]
    nodes: Vec<Map<String, Value>>,
    #[serde(default)]
    links: Vec<LinkRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LinkRecord {
    source: String,
    target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<u64>,
}

/// Load a graph from a node-link file.
pub fn load_graph(path: &Path) -> Result<Graph> {
    info!("Loading graph from {:?}", path);
    let file = File::open(path)
        .wrap_err_with(|| format!("Failed to open graph file '{}'", path.display()))?;
    let document: NodeLinkDocument = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Graph file '{}' is not a node-link document", path.display()))?;
    graph_from_document(document)
}

fn graph_from_document(document: NodeLinkDocument) -> Result<Graph> {
    let mut graph = Graph::new();

    for record in document.nodes {
        let id = record
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MalformedGraph("node is missing a string 'id'".to_string()))?
            .to_string();
        let kind_name = record.get("type").and_then(Value::as_str).ok_or_else(|| {
            Error::MalformedGraph(format!("node '{}' is missing a string 'type'", id))
        })?;
        let kind = NodeKind::parse(kind_name).ok_or_else(|| {
            Error::MalformedGraph(format!(
                "node '{}' has unknown type '{}', expected 'router' or 'broker'",
                id, kind_name
            ))
        })?;

        let mut node = Node::new(id, kind);
        for (key, value) in record {
            if NODE_FIELDS.contains(&key.as_str()) {
                continue;
            }
            // Suppression flags count as set by presence, whatever the value.
            match key.as_str() {
                "def_list" => node.suppress.listeners = true,
                "def_conn" => node.suppress.connectors = true,
                "def_addr" => node.suppress.addresses = true,
                _ => {
                    node.blocks.insert(key, value);
                }
            }
        }
        graph.add_node(node)?;
    }

    for link in document.links {
        // Weights are positive integers; an absent value means DEFAULT_COST.
        if link.value == Some(0) {
            return Err(Error::MalformedGraph(format!(
                "link '{}'-'{}' has zero weight",
                link.source, link.target
            ))
            .into());
        }
        graph.add_edge(&link.source, &link.target, link.value.unwrap_or(DEFAULT_COST))?;
    }

    info!(
        "Loaded graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Serialize a graph back to the node-link shape.
pub fn to_node_link(graph: &Graph) -> Value {
    let nodes: Vec<Value> = graph
        .nodes()
        .iter()
        .map(|node| {
            let mut record = Map::new();
            record.insert("id".to_string(), json!(node.id));
            record.insert("type".to_string(), json!(node.kind.as_str()));
            if node.suppress.listeners {
                record.insert("def_list".to_string(), json!(true));
            }
            if node.suppress.connectors {
                record.insert("def_conn".to_string(), json!(true));
            }
            if node.suppress.addresses {
                record.insert("def_addr".to_string(), json!(true));
            }
            for (key, value) in &node.blocks {
                record.insert(key.clone(), value.clone());
            }
            Value::Object(record)
        })
        .collect();

    let links: Vec<Value> = graph
        .edges()
        .iter()
        .map(|edge| json!({ "source": edge.a, "target": edge.b, "value": edge.weight }))
        .collect();

    json!({
        "directed": false,
        "multigraph": false,
        "nodes": nodes,
        "links": links
    })
}

/// Write a graph to a node-link JSON file.
pub fn save_graph(graph: &Graph, path: &Path) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("Failed to create graph file '{}'", path.display()))?;
    serde_json::to_writer_pretty(file, &to_node_link(graph))
        .wrap_err_with(|| format!("Failed to write graph file '{}'", path.display()))?;
    Ok(())
}
