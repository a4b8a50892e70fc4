//! Graph model for routing topologies.
//!
//! Typed nodes (router or broker) carrying optional override blocks, and
//! weighted undirected edges. The graph is a pure data structure: the
//! topology builder wires it up and the synthesizer annotates it in place,
//! but all behavior beyond mutation primitives lives elsewhere.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::error::Error;

/// Default weight assigned to every edge created by the builder.
pub const DEFAULT_COST: u64 = 1;

/// Kind of a topology node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A message-routing node; receives a synthesized configuration.
    Router,
    /// A message-storage endpoint; referenced by router connectors only.
    Broker,
}

impl NodeKind {
    /// Wire name used in node-link documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Router => "router",
            NodeKind::Broker => "broker",
        }
    }

    /// Parse the wire name back into a kind.
    pub fn parse(s: &str) -> Option<NodeKind> {
        match s {
            "router" => Some(NodeKind::Router),
            "broker" => Some(NodeKind::Broker),
            _ => None,
        }
    }
}

/// Per-node flags disabling default synthesis for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Suppression {
    /// `def_list`: do not append synthesized listeners.
    pub listeners: bool,
    /// `def_conn`: do not synthesize connectors or link routes.
    pub connectors: bool,
    /// `def_addr`: do not append the canonical address entries.
    pub addresses: bool,
}

/// A single topology node with its override/annotation blocks.
///
/// `blocks` holds user-supplied override blocks (`listener`, `connector`,
/// `linkRoute`, `address`, `router`, or any named settings block such as a
/// certificate profile) and is also where synthesis writes its derived
/// results back, so later phases and external introspection can read them.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub blocks: BTreeMap<String, Value>,
    pub suppress: Suppression,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Node {
            id: id.into(),
            kind,
            blocks: BTreeMap::new(),
            suppress: Suppression::default(),
        }
    }

    pub fn is_router(&self) -> bool {
        self.kind == NodeKind::Router
    }
}

/// Undirected weighted edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub a: String,
    pub b: String,
    pub weight: u64,
}

impl Edge {
    /// True if this edge connects the same unordered pair as (a, b).
    fn joins(&self, a: &str, b: &str) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }
}

/// An undirected simple graph with insertion-ordered nodes and edges.
///
/// Node ids are unique within a graph; `add_node` enforces this at
/// construction time. Duplicate edges (in either orientation) are ignored
/// rather than rejected, matching simple-graph semantics.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    /// Add a node, rejecting duplicate ids.
    pub fn add_node(&mut self, node: Node) -> Result<(), Error> {
        if self.index.contains_key(&node.id) {
            return Err(Error::MalformedGraph(format!(
                "duplicate node id '{}'",
                node.id
            )));
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Add an undirected edge between two existing, distinct nodes.
    ///
    /// Adding an edge that already exists (in either orientation) is a no-op.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: u64) -> Result<(), Error> {
        if a == b {
            return Err(Error::MalformedGraph(format!(
                "self-loop on node '{}'",
                a
            )));
        }
        for endpoint in [a, b] {
            if !self.index.contains_key(endpoint) {
                return Err(Error::MalformedGraph(format!(
                    "edge references unknown node '{}'",
                    endpoint
                )));
            }
        }
        if self.edges.iter().any(|e| e.joins(a, b)) {
            return Ok(());
        }
        self.edges.push(Edge {
            a: a.to_string(),
            b: b.to_string(),
            weight,
        });
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.index.get(id).copied().map(move |i| &mut self.nodes[i])
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.edges.iter().any(|e| e.joins(a, b))
    }

    /// Neighbor ids of a node, in edge insertion order.
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter_map(|e| {
                if e.a == id {
                    Some(e.b.as_str())
                } else if e.b == id {
                    Some(e.a.as_str())
                } else {
                    None
                }
            })
            .collect()
    }

    /// Router nodes in insertion order.
    pub fn routers(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_router())
    }
}
