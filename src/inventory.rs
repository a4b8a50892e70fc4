//! Inventory file parsing.
//!
//! Resolves the router and broker identifier lists from an ansible-style
//! hosts file. Hosts reachable from the `routers` group (directly or through
//! `[group:children]` indirection, any nesting depth) become routers; the
//! `brokers` group works the same way. Order of first appearance is kept.
//!
//! ```text
//! [routers:children]
//! group1
//! group2
//!
//! [group1]
//! router1
//!
//! [group2]
//! router2
//! router3
//!
//! [brokers]
//! broker1
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{info, warn};

/// Parsed inventory: per-group host lines and child-group references.
#[derive(Debug, Default)]
pub struct Inventory {
    hosts: HashMap<String, Vec<String>>,
    children: HashMap<String, Vec<String>>,
}

impl Inventory {
    /// Parse inventory text. Unknown section suffixes (e.g. `:vars`) are
    /// skipped with a warning; host lines keep only their first token so
    /// per-host variables are tolerated.
    pub fn parse(text: &str) -> Inventory {
        let mut inventory = Inventory::default();
        let mut current: Option<(String, bool)> = None;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let section = &line[1..line.len() - 1];
                current = match section.split_once(':') {
                    None => Some((section.to_string(), false)),
                    Some((group, "children")) => Some((group.to_string(), true)),
                    Some((_, suffix)) => {
                        warn!("Skipping inventory section with unsupported suffix ':{}'", suffix);
                        None
                    }
                };
                continue;
            }

            let Some((group, is_children)) = &current else {
                warn!("Skipping inventory line outside any section: '{}'", line);
                continue;
            };
            let entry = match line.split_whitespace().next() {
                Some(token) => token.to_string(),
                None => continue,
            };
            let target = if *is_children {
                &mut inventory.children
            } else {
                &mut inventory.hosts
            };
            target.entry(group.clone()).or_default().push(entry);
        }

        inventory
    }

    /// Read and parse an inventory file.
    pub fn from_file(path: &Path) -> Result<Inventory> {
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read inventory file '{}'", path.display()))?;
        Ok(Inventory::parse(&text))
    }

    /// All hosts reachable from a group, in order of first appearance.
    pub fn hosts_of(&self, group: &str) -> Vec<String> {
        let mut hosts = Vec::new();
        let mut visited = Vec::new();
        self.collect(group, &mut hosts, &mut visited);
        hosts
    }

    fn collect(&self, group: &str, hosts: &mut Vec<String>, visited: &mut Vec<String>) {
        if visited.iter().any(|g| g == group) {
            return;
        }
        visited.push(group.to_string());

        if let Some(direct) = self.hosts.get(group) {
            for host in direct {
                if !hosts.contains(host) {
                    hosts.push(host.clone());
                }
            }
        }
        if let Some(children) = self.children.get(group) {
            for child in children {
                if self.hosts.contains_key(child) || self.children.contains_key(child) {
                    self.collect(child, hosts, visited);
                } else {
                    warn!("Inventory group '{}' names unknown child group '{}'", group, child);
                }
            }
        }
    }
}

/// Resolve the router and broker name lists from a hosts file.
pub fn resolve(path: &Path) -> Result<(Vec<String>, Vec<String>)> {
    let inventory = Inventory::from_file(path)?;
    let routers = inventory.hosts_of("routers");
    let brokers = inventory.hosts_of("brokers");
    info!(
        "Inventory {:?}: {} routers, {} brokers",
        path,
        routers.len(),
        brokers.len()
    );
    Ok((routers, brokers))
}
