//! KML ground overlays for rendered heatmaps.
//!
//! Supports:
//! - Single-file KML referencing an externally hosted image
//! - KMZ archives bundling the document with the PNG it references

pub mod document;
pub mod emit;

pub use document::{KmlDocument, LatLonBox, KML_NAMESPACE};
pub use emit::{render_kml, render_kmz, Overlay, KMZ_DOCUMENT_NAME, KMZ_IMAGE_NAME};
