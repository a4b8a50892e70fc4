//! Network topology construction.
//!
//! This module contains the shape selector and the five connection
//! algorithms that turn router/broker name lists into a wired graph.

pub mod builder;
pub mod shape;

// Re-export key types and functions for easier access
pub use builder::{build, build_shape};
pub use shape::Shape;
