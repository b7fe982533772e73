//! Data types for the chart feed.

mod graph;
mod payload;
mod point;

pub use graph::*;
pub use payload::*;
pub use point::*;
