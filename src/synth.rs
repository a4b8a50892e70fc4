//! Per-router configuration synthesis.
//!
//! Consumes a finished graph (possibly carrying user overrides, e.g. loaded
//! from a persisted description) and derives one configuration object per
//! router node. Synthesis runs in two ordered passes: router info, listeners,
//! addresses and pass-through settings first for every router, then
//! connectors and link routes. The ordering matters because an inter-router
//! connector's port is resolved against the neighbor's already-computed
//! listener list.
//!
//! Derived lists are also written back onto the graph nodes, so external
//! introspection (and the graph exporter) sees the annotated topology.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::Error;
use crate::graph::{Graph, Node, NodeKind};

/// Default port for broker connectors and the first synthesized listener.
pub const DEFAULT_PORT: u16 = 5672;

/// Block names with dedicated synthesis rules; everything else on a node is
/// a pass-through settings block.
const RESERVED_BLOCKS: [&str; 5] = ["listener", "connector", "linkRoute", "address", "router"];

/// The canonical address entries appended unless suppressed.
const CANONICAL_ADDRESSES: [(&str, &str); 5] = [
    ("closest", "closest"),
    ("multicast", "multicast"),
    ("unicast", "closest"),
    ("exclusive", "closest"),
    ("broadcast", "multicast"),
];

/// Deployable configuration for a single router node.
///
/// Serializes to the canonical JSON shape: `machine`, `router` and
/// `listener` are always present, the remaining categories are omitted when
/// empty, and pass-through settings blocks appear as top-level keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigObject {
    pub machine: String,
    pub router: Vec<Value>,
    pub listener: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connector: Vec<Value>,
    #[serde(rename = "linkRoute", default, skip_serializing_if = "Vec::is_empty")]
    pub link_route: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Derive configuration objects for every router in the graph.
///
/// Fails with `Error::EmptyTopology` when the graph contains no router and
/// with `Error::ListenerResolution` when an inter-router connector cannot
/// find its target listener port. On failure no partial result is returned.
pub fn synthesize(graph: &mut Graph) -> Result<BTreeMap<String, ConfigObject>, Error> {
    let router_ids: Vec<String> = graph.routers().map(|n| n.id.clone()).collect();
    if router_ids.is_empty() {
        return Err(Error::EmptyTopology);
    }

    let mut configs: BTreeMap<String, ConfigObject> = BTreeMap::new();
    let mut listeners: BTreeMap<String, Vec<Value>> = BTreeMap::new();

    // Pass 1: every router's listeners must exist before any connector is
    // derived, since inter-router connectors reference neighbor ports.
    for id in &router_ids {
        let (router_block, listener_list, address_list, extra) = {
            let node = match graph.node(id) {
                Some(node) => node,
                None => continue,
            };
            let neighbors = graph.neighbors(id);
            let has_router_neighbor = neighbors
                .iter()
                .any(|n| graph.node(n).map_or(false, Node::is_router));
            let has_broker_neighbor = neighbors
                .iter()
                .any(|n| graph.node(n).map_or(false, |n| !n.is_router()));
            (
                generate_router_info(node, !neighbors.is_empty()),
                generate_listeners(node, has_router_neighbor, has_broker_neighbor),
                generate_addresses(node),
                generate_extra_settings(node),
            )
        };

        if let Some(node) = graph.node_mut(id) {
            node.blocks
                .insert("router".to_string(), Value::Array(router_block.clone()));
            node.blocks
                .insert("listener".to_string(), Value::Array(listener_list.clone()));
            node.blocks
                .insert("address".to_string(), Value::Array(address_list.clone()));
        }

        listeners.insert(id.clone(), listener_list.clone());
        configs.insert(
            id.clone(),
            ConfigObject {
                machine: id.clone(),
                router: router_block,
                listener: listener_list,
                address: address_list,
                extra,
                ..Default::default()
            },
        );
    }

    // Pass 2: connectors and link routes, resolving neighbor listener ports.
    for id in &router_ids {
        let (connectors, link_routes) = {
            let node = match graph.node(id) {
                Some(node) => node,
                None => continue,
            };
            generate_connectors(graph, node, &listeners)?
        };

        if let Some(node) = graph.node_mut(id) {
            node.blocks
                .insert("connector".to_string(), Value::Array(connectors.clone()));
            node.blocks
                .insert("linkRoute".to_string(), Value::Array(link_routes.clone()));
        }

        if let Some(config) = configs.get_mut(id) {
            config.connector = connectors;
            config.link_route = link_routes;
        }
    }

    Ok(configs)
}

/// Normalize an override block (single object or list) to a list of entries.
fn normalize_list(block: &Value) -> Vec<Value> {
    match block {
        Value::Array(items) => items.clone(),
        Value::Null => Vec::new(),
        other => vec![other.clone()],
    }
}

/// The `router` block: override content wins, with `id` forced to the node's
/// own id; otherwise the mode is derived from the node's degree.
fn generate_router_info(node: &Node, has_neighbors: bool) -> Vec<Value> {
    if let Some(block) = node.blocks.get("router") {
        let mut entries = normalize_list(block);
        for entry in &mut entries {
            if let Value::Object(map) = entry {
                map.insert("id".to_string(), json!(node.id));
            }
        }
        return entries;
    }

    let mode = if has_neighbors { "interior" } else { "standalone" };
    vec![json!({ "id": node.id, "mode": mode })]
}

fn default_listener(port: u16, role: &str) -> Value {
    json!({
        "host": "0.0.0.0",
        "port": port,
        "role": role,
        "authenticatePeer": "no",
        "saslMechanisms": "ANONYMOUS"
    })
}

/// Listener list for one router: override entries first, then synthesized
/// defaults with ports counting up from the base port. A `def_list` flag
/// together with a non-empty override suppresses the defaults entirely.
///
/// Ports are local to each router; two routers may legitimately reuse the
/// same numbers.
fn generate_listeners(node: &Node, has_router_neighbor: bool, has_broker_neighbor: bool) -> Vec<Value> {
    let mut listeners = node
        .blocks
        .get("listener")
        .map(normalize_list)
        .unwrap_or_default();

    if node.suppress.listeners && !listeners.is_empty() {
        return listeners;
    }

    let mut port = DEFAULT_PORT;
    listeners.push(default_listener(port, "normal"));
    if has_router_neighbor {
        port += 1;
        listeners.push(default_listener(port, "inter-router"));
    }
    if has_broker_neighbor {
        port += 1;
        listeners.push(default_listener(port, "route-container"));
    }
    listeners
}

/// Address list: override entries seed the result; the canonical entries are
/// union-appended unless `def_addr` is set, skipping exact duplicates.
fn generate_addresses(node: &Node) -> Vec<Value> {
    let mut addresses = node
        .blocks
        .get("address")
        .map(normalize_list)
        .unwrap_or_default();

    if !node.suppress.addresses {
        for (prefix, distribution) in CANONICAL_ADDRESSES {
            let entry = json!({ "prefix": prefix, "distribution": distribution });
            if !addresses.contains(&entry) {
                addresses.push(entry);
            }
        }
    }
    addresses
}

/// Pass-through settings blocks: every non-reserved node block holding a
/// non-empty list, reduced to its first element.
fn generate_extra_settings(node: &Node) -> Map<String, Value> {
    let mut extra = Map::new();
    for (key, value) in &node.blocks {
        if RESERVED_BLOCKS.contains(&key.as_str()) {
            continue;
        }
        if let Value::Array(items) = value {
            if let Some(first) = items.first() {
                // Only the first element survives even when more were
                // supplied. Kept for output compatibility with existing
                // consumers; likely an unintended limitation of the
                // original rule.
                extra.insert(key.clone(), Value::Array(vec![first.clone()]));
            }
        }
    }
    extra
}

/// Connector and link-route lists for one router.
///
/// With both `connector` and `linkRoute` overrides present, only the pairs
/// where a connector's `name` equals a link route's `connection` survive.
/// Unless `def_conn` is set, one connector is then synthesized per neighbor,
/// plus an in/out link-route pair for each broker neighbor.
fn generate_connectors(
    graph: &Graph,
    node: &Node,
    listeners: &BTreeMap<String, Vec<Value>>,
) -> Result<(Vec<Value>, Vec<Value>), Error> {
    let mut connectors = Vec::new();
    let mut link_routes = Vec::new();

    let conn_override = node.blocks.get("connector").map(normalize_list);
    let link_override = node.blocks.get("linkRoute").map(normalize_list);

    match (conn_override, link_override) {
        (Some(conns), Some(links)) => {
            for conn in &conns {
                let name = conn.get("name");
                if name.is_some() && links.iter().any(|l| l.get("connection") == name) {
                    connectors.push(conn.clone());
                }
            }
            for link in &links {
                let connection = link.get("connection");
                if connection.is_some() && conns.iter().any(|c| c.get("name") == connection) {
                    link_routes.push(link.clone());
                }
            }
        }
        (Some(conns), None) => connectors = conns,
        _ => {}
    }

    if node.suppress.connectors {
        return Ok((connectors, link_routes));
    }

    for neighbor in graph.neighbors(&node.id) {
        let kind = match graph.node(neighbor) {
            Some(n) => n.kind,
            None => continue,
        };
        match kind {
            NodeKind::Router => {
                let port = inter_router_port(listeners.get(neighbor)).ok_or_else(|| {
                    Error::ListenerResolution {
                        node: node.id.clone(),
                        neighbor: neighbor.to_string(),
                    }
                })?;
                connectors.push(json!({
                    "name": neighbor,
                    "host": neighbor,
                    "port": port,
                    "role": "inter-router"
                }));
            }
            NodeKind::Broker => {
                connectors.push(json!({
                    "name": neighbor,
                    "host": neighbor,
                    "port": DEFAULT_PORT,
                    "role": "route-container"
                }));
                let prefix = format!("{}_queue", node.id);
                for dir in ["in", "out"] {
                    link_routes.push(json!({
                        "prefix": prefix.as_str(),
                        "connection": neighbor,
                        "dir": dir
                    }));
                }
            }
        }
    }

    Ok((connectors, link_routes))
}

/// Port of the neighbor's listener with role `inter-router`, as computed in
/// Pass 1. Override listeners pass their port value through untouched.
fn inter_router_port(listeners: Option<&Vec<Value>>) -> Option<Value> {
    listeners?
        .iter()
        .find(|l| l.get("role").and_then(Value::as_str) == Some("inter-router"))
        .and_then(|l| l.get("port"))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DEFAULT_COST;
    use crate::topology::build;

    fn router_names(count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("router{}", i)).collect()
    }

    fn broker_names(count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("broker{}", i)).collect()
    }

    fn add_router(graph: &mut Graph, id: &str) {
        graph.add_node(Node::new(id, NodeKind::Router)).unwrap();
    }

    #[test]
    fn test_empty_topology() {
        let mut graph = build(&[], &broker_names(2), "complete").unwrap();
        let err = synthesize(&mut graph).unwrap_err();
        assert!(matches!(err, Error::EmptyTopology));
    }

    #[test]
    fn test_standalone_single_router() {
        // Scenario: one router, no edges.
        let mut graph = build(&router_names(1), &[], "complete").unwrap();
        assert_eq!(graph.edge_count(), 0);

        let configs = synthesize(&mut graph).unwrap();
        let config = &configs["router1"];
        assert_eq!(config.machine, "router1");
        assert_eq!(
            config.router,
            vec![json!({ "id": "router1", "mode": "standalone" })]
        );
        assert_eq!(config.listener, vec![default_listener(5672, "normal")]);
        assert!(config.connector.is_empty());
        assert!(config.link_route.is_empty());
    }

    #[test]
    fn test_router_override_forces_id() {
        let mut graph = Graph::new();
        add_router(&mut graph, "router1");
        add_router(&mut graph, "router2");
        graph.add_edge("router1", "router2", DEFAULT_COST).unwrap();
        graph
            .node_mut("router1")
            .unwrap()
            .blocks
            .insert("router".to_string(), json!([{ "mode": "standalone" }]));

        let configs = synthesize(&mut graph).unwrap();
        assert_eq!(
            configs["router1"].router,
            vec![json!({ "id": "router1", "mode": "standalone" })]
        );
        // No override: mode follows the neighbor count.
        assert_eq!(
            configs["router2"].router,
            vec![json!({ "id": "router2", "mode": "interior" })]
        );
    }

    #[test]
    fn test_listener_override_with_suppression_is_complete() {
        let mut graph = Graph::new();
        add_router(&mut graph, "router1");
        add_router(&mut graph, "router2");
        graph.add_edge("router1", "router2", DEFAULT_COST).unwrap();
        {
            let node = graph.node_mut("router1").unwrap();
            node.blocks.insert(
                "listener".to_string(),
                json!([{ "host": "1.1.1.1", "port": "666", "role": "inter-router" }]),
            );
            node.suppress.listeners = true;
        }

        let configs = synthesize(&mut graph).unwrap();
        assert_eq!(
            configs["router1"].listener,
            vec![json!({ "host": "1.1.1.1", "port": "666", "role": "inter-router" })]
        );
    }

    #[test]
    fn test_listener_override_without_suppression_keeps_defaults() {
        let mut graph = Graph::new();
        add_router(&mut graph, "router1");
        add_router(&mut graph, "router2");
        graph.add_edge("router1", "router2", DEFAULT_COST).unwrap();
        graph
            .node_mut("router1")
            .unwrap()
            .blocks
            .insert("listener".to_string(), json!([{ "host": "0.0.0.0", "port": "777" }]));

        let configs = synthesize(&mut graph).unwrap();
        assert_eq!(
            configs["router1"].listener,
            vec![
                json!({ "host": "0.0.0.0", "port": "777" }),
                default_listener(5672, "normal"),
                default_listener(5673, "inter-router"),
            ]
        );
    }

    #[test]
    fn test_suppression_without_override_falls_through() {
        let mut graph = Graph::new();
        add_router(&mut graph, "router1");
        graph
            .add_node(Node::new("broker1", NodeKind::Broker))
            .unwrap();
        add_router(&mut graph, "router2");
        graph.add_edge("router1", "router2", DEFAULT_COST).unwrap();
        graph.add_edge("router1", "broker1", DEFAULT_COST).unwrap();
        graph.node_mut("router1").unwrap().suppress.listeners = true;

        let configs = synthesize(&mut graph).unwrap();
        assert_eq!(
            configs["router1"].listener,
            vec![
                default_listener(5672, "normal"),
                default_listener(5673, "inter-router"),
                default_listener(5674, "route-container"),
            ]
        );
    }

    #[test]
    fn test_broker_only_neighbor_listener_ports() {
        // No inter-router entry is emitted, so route-container takes the
        // next port after normal.
        let mut graph = Graph::new();
        add_router(&mut graph, "router1");
        graph
            .add_node(Node::new("broker1", NodeKind::Broker))
            .unwrap();
        graph.add_edge("router1", "broker1", DEFAULT_COST).unwrap();

        let configs = synthesize(&mut graph).unwrap();
        assert_eq!(
            configs["router1"].listener,
            vec![
                default_listener(5672, "normal"),
                default_listener(5673, "route-container"),
            ]
        );
    }

    #[test]
    fn test_listener_ports_unique_per_node() {
        let mut graph = build(&router_names(3), &broker_names(2), "bus").unwrap();
        let configs = synthesize(&mut graph).unwrap();
        for config in configs.values() {
            let mut ports: Vec<String> = config
                .listener
                .iter()
                .filter_map(|l| l.get("port"))
                .map(Value::to_string)
                .collect();
            let total = ports.len();
            ports.sort();
            ports.dedup();
            assert_eq!(ports.len(), total, "duplicate port on {}", config.machine);
        }
    }

    #[test]
    fn test_address_defaults() {
        let mut graph = build(&router_names(1), &[], "complete").unwrap();
        let configs = synthesize(&mut graph).unwrap();
        let prefixes: Vec<&str> = configs["router1"]
            .address
            .iter()
            .filter_map(|a| a.get("prefix").and_then(Value::as_str))
            .collect();
        assert_eq!(
            prefixes,
            vec!["closest", "multicast", "unicast", "exclusive", "broadcast"]
        );
    }

    #[test]
    fn test_address_override_deduplicates() {
        // Scenario: an override equal to a canonical entry is not repeated.
        let mut graph = build(&router_names(1), &[], "complete").unwrap();
        graph.node_mut("router1").unwrap().blocks.insert(
            "address".to_string(),
            json!([{ "prefix": "closest", "distribution": "closest" }]),
        );

        let configs = synthesize(&mut graph).unwrap();
        let address = &configs["router1"].address;
        assert_eq!(address.len(), 5);
        assert_eq!(
            address[0],
            json!({ "prefix": "closest", "distribution": "closest" })
        );
    }

    #[test]
    fn test_address_suppression_keeps_seed_only() {
        let mut graph = build(&router_names(1), &[], "complete").unwrap();
        {
            let node = graph.node_mut("router1").unwrap();
            node.blocks.insert(
                "address".to_string(),
                json!({ "prefix": "jobs", "distribution": "balanced" }),
            );
            node.suppress.addresses = true;
        }

        let configs = synthesize(&mut graph).unwrap();
        assert_eq!(
            configs["router1"].address,
            vec![json!({ "prefix": "jobs", "distribution": "balanced" })]
        );
    }

    #[test]
    fn test_extra_settings_pass_through() {
        let mut graph = build(&router_names(1), &[], "complete").unwrap();
        graph.node_mut("router1").unwrap().blocks.insert(
            "sslProfile".to_string(),
            json!([{ "name": "Test", "ciphers": "AES-256", "keyFile": "file" }]),
        );

        let configs = synthesize(&mut graph).unwrap();
        assert_eq!(
            configs["router1"].extra.get("sslProfile"),
            Some(&json!([{ "name": "Test", "ciphers": "AES-256", "keyFile": "file" }]))
        );
    }

    #[test]
    fn test_extra_settings_truncated_to_first_element() {
        let mut graph = build(&router_names(1), &[], "complete").unwrap();
        graph.node_mut("router1").unwrap().blocks.insert(
            "autoLink".to_string(),
            json!([
                { "addr": "queue", "connection": "BROKER", "dir": "out" },
                { "addr": "queue2", "connection": "BROKER", "dir": "in" }
            ]),
        );

        let configs = synthesize(&mut graph).unwrap();
        assert_eq!(
            configs["router1"].extra.get("autoLink"),
            Some(&json!([{ "addr": "queue", "connection": "BROKER", "dir": "out" }]))
        );
    }

    #[test]
    fn test_extra_settings_skip_empty_and_non_list_blocks() {
        let mut graph = build(&router_names(1), &[], "complete").unwrap();
        {
            let node = graph.node_mut("router1").unwrap();
            node.blocks.insert("log".to_string(), json!([]));
            node.blocks.insert("note".to_string(), json!("text"));
        }

        let configs = synthesize(&mut graph).unwrap();
        assert!(configs["router1"].extra.is_empty());
    }

    #[test]
    fn test_connector_port_resolved_from_neighbor_listener() {
        // router5 connects to router4, whose listener override pins the
        // inter-router port to 5675.
        let mut graph = Graph::new();
        add_router(&mut graph, "router4");
        add_router(&mut graph, "router5");
        graph.add_edge("router5", "router4", DEFAULT_COST).unwrap();
        {
            let node = graph.node_mut("router4").unwrap();
            node.blocks.insert(
                "listener".to_string(),
                json!([{ "host": "router4", "port": 5675, "role": "inter-router" }]),
            );
            node.suppress.listeners = true;
        }

        let configs = synthesize(&mut graph).unwrap();
        assert_eq!(
            configs["router5"].connector,
            vec![json!({
                "name": "router4",
                "host": "router4",
                "port": 5675,
                "role": "inter-router"
            })]
        );
    }

    #[test]
    fn test_missing_inter_router_listener_is_fatal() {
        let mut graph = Graph::new();
        add_router(&mut graph, "router1");
        add_router(&mut graph, "router2");
        graph.add_edge("router1", "router2", DEFAULT_COST).unwrap();
        {
            // router2's complete listener list has no inter-router entry.
            let node = graph.node_mut("router2").unwrap();
            node.blocks.insert(
                "listener".to_string(),
                json!([{ "host": "0.0.0.0", "port": 9000, "role": "normal" }]),
            );
            node.suppress.listeners = true;
        }

        let err = synthesize(&mut graph).unwrap_err();
        assert!(
            matches!(err, Error::ListenerResolution { ref node, ref neighbor } if node == "router1" && neighbor == "router2")
        );
    }

    #[test]
    fn test_def_conn_suppresses_synthesis() {
        // Scenario: def_conn and no connector override yields empty lists
        // regardless of neighbors.
        let mut graph = build(&router_names(2), &broker_names(1), "bus").unwrap();
        graph.node_mut("router1").unwrap().suppress.connectors = true;

        let configs = synthesize(&mut graph).unwrap();
        assert!(configs["router1"].connector.is_empty());
        assert!(configs["router1"].link_route.is_empty());
        assert!(!configs["router2"].connector.is_empty());
    }

    #[test]
    fn test_matched_override_pairs_survive() {
        let mut graph = Graph::new();
        add_router(&mut graph, "router6");
        {
            let node = graph.node_mut("router6").unwrap();
            node.blocks.insert(
                "connector".to_string(),
                json!([
                    { "name": "broker1", "host": "broker1", "port": 5672, "role": "route-container" },
                    { "name": "orphan", "host": "orphan", "port": 5672, "role": "route-container" }
                ]),
            );
            node.blocks.insert(
                "linkRoute".to_string(),
                json!([
                    { "prefix": "default_queue", "connection": "broker1", "dir": "in" },
                    { "prefix": "default_queue", "connection": "broker1", "dir": "out" },
                    { "prefix": "stray", "connection": "missing", "dir": "in" }
                ]),
            );
            node.suppress.connectors = true;
        }

        let configs = synthesize(&mut graph).unwrap();
        let config = &configs["router6"];
        assert_eq!(
            config.connector,
            vec![json!({ "name": "broker1", "host": "broker1", "port": 5672, "role": "route-container" })]
        );
        assert_eq!(config.link_route.len(), 2);
        assert!(config
            .link_route
            .iter()
            .all(|l| l.get("connection") == Some(&json!("broker1"))));
    }

    #[test]
    fn test_connector_override_without_link_routes_kept() {
        let mut graph = Graph::new();
        add_router(&mut graph, "router1");
        {
            let node = graph.node_mut("router1").unwrap();
            node.blocks.insert(
                "connector".to_string(),
                json!([{ "host": "router2", "port": 5672 }]),
            );
            node.suppress.connectors = true;
        }

        let configs = synthesize(&mut graph).unwrap();
        assert_eq!(
            configs["router1"].connector,
            vec![json!({ "host": "router2", "port": 5672 })]
        );
    }

    #[test]
    fn test_bus_scenario_end_to_end() {
        // Scenario: two routers, one broker, bus shape.
        let mut graph = build(&router_names(2), &broker_names(1), "bus").unwrap();
        assert!(graph.has_edge("router1", "router2"));
        assert!(graph.has_edge("router1", "broker1"));

        let configs = synthesize(&mut graph).unwrap();
        let r1 = &configs["router1"];
        assert_eq!(
            r1.listener,
            vec![
                default_listener(5672, "normal"),
                default_listener(5673, "inter-router"),
                default_listener(5674, "route-container"),
            ]
        );
        // router2 has only a router neighbor, so its inter-router listener
        // sits at 5673.
        assert_eq!(
            r1.connector,
            vec![
                json!({ "name": "router2", "host": "router2", "port": 5673, "role": "inter-router" }),
                json!({ "name": "broker1", "host": "broker1", "port": 5672, "role": "route-container" }),
            ]
        );
        assert_eq!(
            r1.link_route,
            vec![
                json!({ "prefix": "router1_queue", "connection": "broker1", "dir": "in" }),
                json!({ "prefix": "router1_queue", "connection": "broker1", "dir": "out" }),
            ]
        );

        let r2 = &configs["router2"];
        assert_eq!(
            r2.connector,
            vec![json!({ "name": "router1", "host": "router1", "port": 5673, "role": "inter-router" })]
        );
        assert!(r2.link_route.is_empty());
    }

    #[test]
    fn test_graph_annotated_in_place() {
        let mut graph = build(&router_names(2), &[], "line").unwrap();
        synthesize(&mut graph).unwrap();
        let node = graph.node("router1").unwrap();
        assert!(node.blocks.contains_key("listener"));
        assert!(node.blocks.contains_key("connector"));
        assert!(node.blocks.contains_key("address"));
        assert!(node.blocks.contains_key("router"));
    }

    #[test]
    fn test_canonical_json_shape() {
        let mut graph = build(&router_names(1), &[], "complete").unwrap();
        graph
            .node_mut("router1")
            .unwrap()
            .blocks
            .insert("sslProfile".to_string(), json!([{ "name": "Test" }]));

        let configs = synthesize(&mut graph).unwrap();
        let value = serde_json::to_value(&configs["router1"]).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.get("machine"), Some(&json!("router1")));
        assert!(object.contains_key("router"));
        assert!(object.contains_key("listener"));
        assert!(object.contains_key("address"));
        // Empty categories are omitted, pass-through blocks are top-level.
        assert!(!object.contains_key("connector"));
        assert!(!object.contains_key("linkRoute"));
        assert_eq!(object.get("sslProfile"), Some(&json!([{ "name": "Test" }])));
    }
}
