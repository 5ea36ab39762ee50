//! Density heatmap rendering.
//!
//! The pipeline runs in four stages:
//! - Limits: bounding box of the input points and projection to pixels
//! - Dot: the radial falloff stamp applied at every point
//! - Placement: saturating accumulation of stamps into an intensity buffer
//! - Warming: mapping intensities through a 256-entry color scheme
//!
//! [`render`] composes them and is the only entry point most callers need.

pub mod dot;
pub mod limits;
pub mod pipeline;
pub mod placement;
pub mod png;
pub mod scheme;
pub mod warm;

pub use dot::Dot;
pub use heatmap_common::{p, Bounds, HeatmapError, HeatmapResult, Point};
pub use limits::{compute_limits, Projection, Size};
pub use pipeline::{render, render_with_bounds};
pub use placement::{place_points, Accumulator};
pub use scheme::{Color, ColorStop, Scheme};
pub use warm::warm;
