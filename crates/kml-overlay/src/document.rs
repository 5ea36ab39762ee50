//! The KML ground overlay document.

use std::io::Write;

use heatmap_common::{Bounds, HeatmapResult};
use serde::{Deserialize, Serialize};

/// KML 2.2 namespace.
pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Geographic box the overlay image is stretched over, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLonBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl LatLonBox {
    /// Box matching point bounds with x as longitude and y as latitude.
    ///
    /// The raster is rendered north-up, so the image's top edge is `north`.
    pub fn from_bounds(bounds: &Bounds) -> Self {
        Self {
            north: bounds.max.y,
            south: bounds.min.y,
            east: bounds.max.x,
            west: bounds.min.x,
        }
    }
}

/// A `GroundOverlay` inside a `Folder`, pointing at one image.
#[derive(Debug, Clone, PartialEq)]
pub struct KmlDocument {
    pub href: String,
    pub lat_lon_box: LatLonBox,
}

impl KmlDocument {
    pub fn new(href: impl Into<String>, lat_lon_box: LatLonBox) -> Self {
        Self {
            href: href.into(),
            lat_lon_box,
        }
    }

    /// Serialize to KML text.
    pub fn to_xml(&self) -> String {
        let b = &self.lat_lon_box;
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="{ns}">
<Folder>
  <GroundOverlay>
    <Icon>
      <href>{href}</href>
    </Icon>
    <LatLonBox>
      <north>{north}</north>
      <south>{south}</south>
      <east>{east}</east>
      <west>{west}</west>
      <rotation>0</rotation>
    </LatLonBox>
  </GroundOverlay>
</Folder>
</kml>
"#,
            ns = KML_NAMESPACE,
            href = quick_xml::escape::escape(&self.href),
            north = b.north,
            south = b.south,
            east = b.east,
            west = b.west,
        )
    }

    /// Write the serialized document to `sink` in one piece.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> HeatmapResult<()> {
        sink.write_all(self.to_xml().as_bytes())?;
        sink.flush()?;
        Ok(())
    }
}
