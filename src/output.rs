//! Output directory management and artifact writing.
//!
//! A run writes into `<out_dir>/<shape>_R<routers>_B<brokers>/`:
//! `router_confs.json` with the per-router configuration objects (in router
//! input order, under a top-level `confs` key) and `topology.json` with the
//! annotated node-link graph for round-tripping.

use std::collections::BTreeMap;
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use serde_json::json;

use crate::graph::Graph;
use crate::graph_io;
use crate::synth::ConfigObject;

/// Directory name encoding the run parameters, e.g. `bus_R3_B2`.
pub fn run_dirname(shape: &str, routers: usize, brokers: usize) -> String {
    format!("{}_R{}_B{}", shape, routers, brokers)
}

/// Write the run artifacts, recreating the run directory from scratch.
pub fn write_output(
    out_dir: &Path,
    dirname: &str,
    graph: &Graph,
    configs: &BTreeMap<String, ConfigObject>,
) -> Result<PathBuf> {
    let directory = out_dir.join(dirname);
    if directory.exists() {
        fs::remove_dir_all(&directory)
            .wrap_err_with(|| format!("Failed to remove run directory '{}'", directory.display()))?;
    }
    fs::create_dir_all(&directory)
        .wrap_err_with(|| format!("Failed to create run directory '{}'", directory.display()))?;

    // Router input order, not map order.
    let confs: Vec<&ConfigObject> = graph
        .routers()
        .filter_map(|node| configs.get(&node.id))
        .collect();
    let confs_path = directory.join("router_confs.json");
    let file = File::create(&confs_path)
        .wrap_err_with(|| format!("Failed to create '{}'", confs_path.display()))?;
    serde_json::to_writer_pretty(file, &json!({ "confs": confs }))
        .wrap_err_with(|| format!("Failed to write '{}'", confs_path.display()))?;

    graph_io::save_graph(graph, &directory.join("topology.json"))?;

    info!("Wrote {} router configurations to {:?}", confs.len(), confs_path);
    Ok(directory)
}
