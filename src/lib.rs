//! # Topogen - Configuration generator for message-routing mesh topologies
//!
//! This library derives deployable configuration for a mesh of
//! message-routing nodes (routers) and attached message-storage endpoints
//! (brokers) from an abstract description of the desired network shape.
//!
//! ## Overview
//!
//! Given router and broker identifier lists and a named topology shape, the
//! builder wires a graph using one of five connection algorithms; the
//! synthesizer then deterministically derives, for every router, a structured
//! configuration object describing its operating mode, listeners, connectors,
//! link-route bindings, addressing rules and pass-through settings blocks.
//! A persisted graph with user overrides can bypass the builder and feed the
//! synthesizer directly.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `graph`: typed node/edge model with mutation primitives
//! - `topology`: shape selector and the five connection algorithms
//! - `synth`: two-pass per-router configuration synthesis
//! - `graph_io`: node-link graph loading and saving
//! - `inventory`: router/broker name resolution from a hosts file
//! - `config`: generator configuration structures and YAML parsing
//! - `output`: run directory management and artifact writing
//! - `error`: the distinct fatal error kinds and their exit codes
//!
//! ## Example Usage
//!
//! ```rust
//! use topogen::{synth, topology};
//!
//! let routers = vec!["r1".to_string(), "r2".to_string()];
//! let brokers = vec!["b1".to_string()];
//!
//! let mut graph = topology::build(&routers, &brokers, "bus")?;
//! let configs = synth::synthesize(&mut graph)?;
//!
//! assert_eq!(configs["r1"].machine, "r1");
//! # Ok::<(), topogen::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! The core pipeline reports failures through the [`Error`] enum, one
//! distinct kind per cause; the binary wraps I/O around it with `color_eyre`
//! for contextual reports. Synthesis either completes for the whole graph or
//! returns no usable result.

pub mod config;
pub mod error;
pub mod graph;
pub mod graph_io;
pub mod inventory;
pub mod output;
pub mod synth;
pub mod topology;

pub use error::Error;
