//! Common types shared across the heatmap workspace.

pub mod bounds;
pub mod error;
pub mod point;

pub use bounds::Bounds;
pub use error::{HeatmapError, HeatmapResult};
pub use point::{p, Point};
