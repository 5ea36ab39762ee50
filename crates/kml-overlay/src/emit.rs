//! Rendering heatmaps straight into KML and KMZ output.
//!
//! Both emitters check the point bounds against the geographic range before
//! any rendering, and only touch the sink once the complete output exists in
//! memory. A failing sink therefore surfaces as `WriteFailure`, never as a
//! silently truncated success.

use std::io::{Cursor, Write};

use heatmap_common::{Bounds, HeatmapError, HeatmapResult, Point};
use heatmap_renderer::{compute_limits, png, render_with_bounds, Scheme, Size};
use image::RgbaImage;
use tracing::{debug, info, warn};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::document::{KmlDocument, LatLonBox};

/// Name of the image entry inside a KMZ archive.
pub const KMZ_IMAGE_NAME: &str = "heatmap.png";

/// Name of the document entry inside a KMZ archive.
pub const KMZ_DOCUMENT_NAME: &str = "doc.kml";

/// Result of a single-file KML render: the raster the document points at
/// and the bounds it covers.
#[derive(Debug, Clone)]
pub struct Overlay {
    pub image: RgbaImage,
    pub bounds: Bounds,
}

/// Render a heatmap and write a KML document referencing `image_url`.
///
/// The image itself is returned, not written; the caller publishes it at
/// `image_url`.
pub fn render_kml<W: Write>(
    size: Size,
    points: &[Point],
    radius: f64,
    workers: usize,
    scheme: &Scheme,
    image_url: &str,
    sink: &mut W,
) -> HeatmapResult<Overlay> {
    check_geographic(points)?;

    let (image, bounds) = render_with_bounds(size, points, radius, workers, scheme)?;
    let document = KmlDocument::new(image_url, LatLonBox::from_bounds(&bounds));
    document.write_to(sink)?;

    info!(%bounds, href = image_url, "Wrote KML overlay");
    Ok(Overlay { image, bounds })
}

/// Render a heatmap and write a KMZ archive holding the PNG and a KML
/// document that references it.
pub fn render_kmz<W: Write>(
    size: Size,
    points: &[Point],
    radius: f64,
    workers: usize,
    scheme: &Scheme,
    sink: &mut W,
) -> HeatmapResult<Bounds> {
    check_geographic(points)?;

    let (image, bounds) = render_with_bounds(size, points, radius, workers, scheme)?;
    let png = png::encode_image(&image)?;
    let document = KmlDocument::new(KMZ_IMAGE_NAME, LatLonBox::from_bounds(&bounds));

    let archive = build_archive(&document, &png)?;
    sink.write_all(&archive)?;
    sink.flush()?;

    info!(%bounds, bytes = archive.len(), "Wrote KMZ overlay");
    Ok(bounds)
}

fn check_geographic(points: &[Point]) -> HeatmapResult<()> {
    let bounds = compute_limits(points)?;
    if !bounds.in_geographic_range() {
        warn!(%bounds, "Points outside geographic range");
        return Err(HeatmapError::OutOfRange { bounds });
    }
    Ok(())
}

/// Assemble and finalize the KMZ in memory.
fn build_archive(document: &KmlDocument, png: &[u8]) -> HeatmapResult<Vec<u8>> {
    let zip_failed = |e: zip::result::ZipError| HeatmapError::Encode(format!("KMZ: {}", e));
    let entry_failed = |e: std::io::Error| HeatmapError::Encode(format!("KMZ entry: {}", e));

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    zip.start_file(
        KMZ_DOCUMENT_NAME,
        FileOptions::default().compression_method(CompressionMethod::Deflated),
    )
    .map_err(zip_failed)?;
    zip.write_all(document.to_xml().as_bytes()).map_err(entry_failed)?;

    // PNG data is already deflated
    zip.start_file(
        KMZ_IMAGE_NAME,
        FileOptions::default().compression_method(CompressionMethod::Stored),
    )
    .map_err(zip_failed)?;
    zip.write_all(png).map_err(entry_failed)?;

    let archive = zip.finish().map_err(zip_failed)?.into_inner();
    debug!(bytes = archive.len(), "Finalized KMZ archive");
    Ok(archive)
}
