//! Topology shape selector.
//!
//! A closed enum over the five supported connection algorithms. Unknown
//! shape names are rejected at this boundary instead of being dispatched
//! dynamically by name.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The five recognized topology shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Every distinct pair of nodes is connected (clique).
    Complete,
    /// Router chain with split broker half-chains joined at both ends.
    Line,
    /// Single interleaved router/broker chain.
    LineMix,
    /// Interleaved chain closed into a ring.
    Cycle,
    /// Router chain with brokers attached by index.
    Bus,
}

impl Shape {
    /// Name used in configuration files and output directory names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Complete => "complete",
            Shape::Line => "line",
            Shape::LineMix => "line_mix",
            Shape::Cycle => "cycle",
            Shape::Bus => "bus",
        }
    }
}

impl FromStr for Shape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "complete" => Ok(Shape::Complete),
            "line" => Ok(Shape::Line),
            "line_mix" => Ok(Shape::LineMix),
            "cycle" => Ok(Shape::Cycle),
            "bus" => Ok(Shape::Bus),
            other => Err(Error::UnknownShape(other.to_string())),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
