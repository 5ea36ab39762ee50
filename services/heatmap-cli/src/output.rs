//! Writing rendered heatmaps to disk.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use heatmap_common::Point;
use heatmap_renderer::{png, render, Scheme};
use kml_overlay::{render_kml, render_kmz};
use tracing::info;

use crate::config::{HeatmapConfig, OutputFormat};

/// Render `points` and write them to `output` in the configured format.
///
/// KML output also writes the referenced PNG next to the document. Returns
/// every file written.
pub fn write_output(
    config: &HeatmapConfig,
    scheme: &Scheme,
    points: &[Point],
    output: &Path,
) -> Result<Vec<PathBuf>> {
    let size = config.size();

    match config.format {
        OutputFormat::Png => {
            let image = render(size, points, config.radius, config.workers, scheme)?;
            let bytes = png::encode_image(&image)?;
            std::fs::write(output, &bytes)
                .with_context(|| format!("writing {}", output.display()))?;
            info!(path = %output.display(), bytes = bytes.len(), "Wrote PNG");
            Ok(vec![output.to_path_buf()])
        }
        OutputFormat::Kml => {
            // The image is written beside the document with a .png extension
            if output
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
            {
                bail!(
                    "KML output {} would be overwritten by its image; use a .kml path",
                    output.display()
                );
            }
            let image_path = output.with_extension("png");
            let href = match &config.image_url {
                Some(url) => url.clone(),
                None => image_path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "heatmap.png".to_string()),
            };

            let mut sink = BufWriter::new(create(output)?);
            let overlay = render_kml(
                size,
                points,
                config.radius,
                config.workers,
                scheme,
                &href,
                &mut sink,
            )?;

            let bytes = png::encode_image(&overlay.image)?;
            std::fs::write(&image_path, &bytes)
                .with_context(|| format!("writing {}", image_path.display()))?;
            info!(path = %image_path.display(), %href, "Wrote overlay image");
            Ok(vec![output.to_path_buf(), image_path])
        }
        OutputFormat::Kmz => {
            let mut sink = BufWriter::new(create(output)?);
            render_kmz(size, points, config.radius, config.workers, scheme, &mut sink)?;
            Ok(vec![output.to_path_buf()])
        }
    }
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("creating {}", path.display()))
}
