//! Graph construction from router/broker name lists.
//!
//! All nodes are added first (routers, then brokers, in input order), then
//! edges are wired according to the selected shape. Every created edge gets
//! weight `DEFAULT_COST`. The algorithms are index-based over the input
//! order and never mutate the caller's lists.

use log::debug;

use crate::error::Error;
use crate::graph::{Graph, Node, NodeKind, DEFAULT_COST};
use crate::topology::shape::Shape;

/// Build a graph from identifier lists and a shape name.
///
/// Fails with `Error::UnknownShape` when the name is not one of the five
/// recognized shapes.
pub fn build(routers: &[String], brokers: &[String], shape: &str) -> Result<Graph, Error> {
    build_shape(routers, brokers, shape.parse()?)
}

/// Build a graph for an already-validated shape.
pub fn build_shape(routers: &[String], brokers: &[String], shape: Shape) -> Result<Graph, Error> {
    debug!(
        "Building '{}' topology: {} routers, {} brokers",
        shape,
        routers.len(),
        brokers.len()
    );

    let mut graph = Graph::new();
    for id in routers {
        graph.add_node(Node::new(id, NodeKind::Router))?;
    }
    for id in brokers {
        graph.add_node(Node::new(id, NodeKind::Broker))?;
    }

    match shape {
        Shape::Complete => connect_complete(&mut graph)?,
        Shape::Line => connect_line(&mut graph, routers, brokers)?,
        Shape::LineMix => connect_line_mix(&mut graph, routers, brokers, false)?,
        Shape::Cycle => connect_line_mix(&mut graph, routers, brokers, true)?,
        Shape::Bus => connect_bus(&mut graph, routers, brokers)?,
    }

    Ok(graph)
}

/// Connect every distinct unordered pair of nodes.
fn connect_complete(graph: &mut Graph) -> Result<(), Error> {
    let ids: Vec<String> = graph.nodes().iter().map(|n| n.id.clone()).collect();
    for i in 0..ids.len() {
        for j in (i + 1)..ids.len() {
            graph.add_edge(&ids[i], &ids[j], DEFAULT_COST)?;
        }
    }
    Ok(())
}

/// Chain the routers, split the brokers into two half-chains, and join the
/// first and last broker to the first and last router.
///
/// When either list is empty the cross-connecting edges are skipped rather
/// than raised, matching the reference behavior.
fn connect_line(graph: &mut Graph, routers: &[String], brokers: &[String]) -> Result<(), Error> {
    for pair in routers.windows(2) {
        graph.add_edge(&pair[0], &pair[1], DEFAULT_COST)?;
    }

    let len_b = brokers.len();
    // First half: forward sub-chain from the start.
    for x in 0..(len_b / 2).saturating_sub(1) {
        graph.add_edge(&brokers[x], &brokers[x + 1], DEFAULT_COST)?;
    }
    // Second half: reverse sub-chain from the last broker down to the midpoint.
    for x in ((len_b / 2 + 1)..len_b).rev() {
        graph.add_edge(&brokers[x], &brokers[x - 1], DEFAULT_COST)?;
    }

    if !routers.is_empty() && !brokers.is_empty() {
        graph.add_edge(&brokers[0], &routers[0], DEFAULT_COST)?;
        graph.add_edge(&brokers[len_b - 1], &routers[routers.len() - 1], DEFAULT_COST)?;
    }
    Ok(())
}

/// Chain a single interleaved sequence of routers and brokers.
///
/// The larger list L and the smaller list S interleave at positions that are
/// multiples of `|L| / |S| + 1`; both lists are consumed from the tail, so
/// the sequence starts at the large list's last element. With `close`, the
/// first and last sequence elements are additionally connected into a ring.
fn connect_line_mix(
    graph: &mut Graph,
    routers: &[String],
    brokers: &[String],
    close: bool,
) -> Result<(), Error> {
    // Ties make brokers the smaller list.
    let (large, small) = if brokers.len() > routers.len() {
        (brokers, routers)
    } else {
        (routers, brokers)
    };

    // One empty side degrades to a plain chain over the other list.
    if small.is_empty() {
        for pair in large.windows(2) {
            graph.add_edge(&pair[0], &pair[1], DEFAULT_COST)?;
        }
        if close && large.len() > 1 {
            graph.add_edge(&large[0], &large[large.len() - 1], DEFAULT_COST)?;
        }
        return Ok(());
    }

    let multiplier = large.len() / small.len() + 1;
    let total = large.len() + small.len();
    let mut remaining_large = large.len();
    let mut remaining_small = small.len();
    let mut sequence: Vec<&str> = Vec::with_capacity(total);

    for position in 1..=total {
        let next = if position % multiplier == 0 && remaining_small > 0 {
            remaining_small -= 1;
            small[remaining_small].as_str()
        } else if remaining_large > 0 {
            remaining_large -= 1;
            large[remaining_large].as_str()
        } else {
            remaining_small -= 1;
            small[remaining_small].as_str()
        };
        sequence.push(next);
    }

    for pair in sequence.windows(2) {
        graph.add_edge(pair[0], pair[1], DEFAULT_COST)?;
    }
    if close && sequence.len() > 1 {
        graph.add_edge(sequence[0], sequence[sequence.len() - 1], DEFAULT_COST)?;
    }
    Ok(())
}

/// Chain the routers and attach brokers by index, cycling router indices
/// round-robin when there are more brokers than routers.
fn connect_bus(graph: &mut Graph, routers: &[String], brokers: &[String]) -> Result<(), Error> {
    for pair in routers.windows(2) {
        graph.add_edge(&pair[0], &pair[1], DEFAULT_COST)?;
    }

    if routers.is_empty() || brokers.is_empty() {
        return Ok(());
    }

    if brokers.len() <= routers.len() {
        for (x, broker) in brokers.iter().enumerate() {
            graph.add_edge(broker, &routers[x], DEFAULT_COST)?;
        }
    } else {
        let mut y = 0;
        for broker in brokers {
            if y > routers.len() - 1 {
                y = 0;
            }
            graph.add_edge(broker, &routers[y], DEFAULT_COST)?;
            y += 1;
        }
    }
    Ok(())
}
