//! Error types for topology construction and configuration synthesis.
//!
//! Every failure in the core pipeline is fatal to the current invocation;
//! there is no retry or partial-result path. Each kind maps to its own
//! process exit status so wrapping tooling can report a specific diagnosis.

/// Errors produced by the topology builder and the configuration synthesizer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Requested topology shape name is not one of the five recognized names.
    #[error("unknown topology shape '{0}', expected one of: complete, line, line_mix, cycle, bus")]
    UnknownShape(String),

    /// A graph is missing required node fields, has duplicate ids, or
    /// references nodes that do not exist.
    #[error("malformed graph: {0}")]
    MalformedGraph(String),

    /// Synthesis requires at least one router node.
    #[error("topology contains no routers")]
    EmptyTopology,

    /// An inter-router connector could not find the neighbor's
    /// inter-router listener port.
    #[error("router '{neighbor}' has no inter-router listener required by connector on '{node}'")]
    ListenerResolution { node: String, neighbor: String },
}

impl Error {
    /// Process exit status for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::UnknownShape(_) => 97,
            Error::MalformedGraph(_) => 99,
            Error::EmptyTopology => 96,
            Error::ListenerResolution { .. } => 95,
        }
    }
}
