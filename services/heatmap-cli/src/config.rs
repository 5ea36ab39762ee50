//! Renderer configuration.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::ValueEnum;
use heatmap_renderer::scheme::PRESET_NAMES;
use heatmap_renderer::{ColorStop, Scheme, Size};
use serde::{Deserialize, Serialize};

/// What the renderer writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain PNG raster
    #[default]
    Png,
    /// KML document plus a PNG beside it
    Kml,
    /// Single KMZ archive
    Kmz,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "kml" => Some(Self::Kml),
            "kmz" => Some(Self::Kmz),
            _ => None,
        }
    }
}

/// Top-level renderer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Output width in pixels
    pub width: u32,

    /// Output height in pixels
    pub height: u32,

    /// Dot radius in pixels
    pub radius: f64,

    /// Row bands colored in parallel
    pub workers: usize,

    /// Preset scheme name
    pub scheme: String,

    /// Gradient image to derive the scheme from, overrides `scheme`
    pub gradient: Option<PathBuf>,

    /// Explicit color stops, override `scheme` when non-empty
    pub scheme_stops: Vec<ColorStop>,

    /// Alpha multiplier applied to the scheme (255 leaves it unchanged)
    pub opacity: u8,

    pub format: OutputFormat,

    /// Image location written into KML output
    pub image_url: Option<String>,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            radius: 150.0,
            workers: 8,
            scheme: "alpha_fire".to_string(),
            gradient: None,
            scheme_stops: Vec::new(),
            opacity: 255,
            format: OutputFormat::Png,
            image_url: None,
        }
    }
}

impl HeatmapConfig {
    /// Load configuration from a YAML file. Missing keys take their defaults.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load configuration from `HEATMAP_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup, starting from defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("HEATMAP_WIDTH") {
            config.width = parse_var("HEATMAP_WIDTH", &v)?;
        }
        if let Some(v) = lookup("HEATMAP_HEIGHT") {
            config.height = parse_var("HEATMAP_HEIGHT", &v)?;
        }
        if let Some(v) = lookup("HEATMAP_RADIUS") {
            config.radius = parse_var("HEATMAP_RADIUS", &v)?;
        }
        if let Some(v) = lookup("HEATMAP_WORKERS") {
            config.workers = parse_var("HEATMAP_WORKERS", &v)?;
        }
        if let Some(v) = lookup("HEATMAP_OPACITY") {
            config.opacity = parse_var("HEATMAP_OPACITY", &v)?;
        }
        if let Some(v) = lookup("HEATMAP_SCHEME") {
            config.scheme = v;
        }
        if let Some(v) = lookup("HEATMAP_GRADIENT") {
            config.gradient = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("HEATMAP_FORMAT") {
            config.format = OutputFormat::from_name(&v)
                .ok_or_else(|| anyhow!("HEATMAP_FORMAT: unknown format '{}'", v))?;
        }
        if let Some(v) = lookup("HEATMAP_IMAGE_URL") {
            config.image_url = Some(v);
        }

        Ok(config)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Resolve the color scheme: gradient image, then stops, then preset.
    pub fn build_scheme(&self) -> Result<Scheme> {
        let scheme = if let Some(path) = &self.gradient {
            Scheme::from_image_file(path)?
        } else if !self.scheme_stops.is_empty() {
            Scheme::from_stops(&self.scheme_stops)?
        } else {
            match Scheme::by_name(&self.scheme) {
                Some(preset) => preset.clone(),
                None => bail!(
                    "unknown scheme '{}', expected one of: {}",
                    self.scheme,
                    PRESET_NAMES.join(", ")
                ),
            }
        };

        if self.opacity == u8::MAX {
            Ok(scheme)
        } else {
            Ok(scheme.with_opacity(self.opacity))
        }
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| anyhow!("{}: invalid value '{}': {}", key, value, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatmap_renderer::scheme::{ALPHA_FIRE, FIRE};
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = HeatmapConfig::default();
        assert_eq!(config.size(), Size::new(1024, 1024));
        assert_eq!(config.radius, 150.0);
        assert_eq!(config.format, OutputFormat::Png);
        assert_eq!(config.build_scheme().unwrap(), *ALPHA_FIRE);
    }

    #[test]
    fn test_from_lookup() {
        let config = HeatmapConfig::from_lookup(lookup(&[
            ("HEATMAP_WIDTH", "640"),
            ("HEATMAP_HEIGHT", " 480 "),
            ("HEATMAP_RADIUS", "12.5"),
            ("HEATMAP_SCHEME", "fire"),
            ("HEATMAP_FORMAT", "KMZ"),
        ]))
        .unwrap();

        assert_eq!(config.width, 640);
        assert_eq!(config.height, 480);
        assert_eq!(config.radius, 12.5);
        assert_eq!(config.format, OutputFormat::Kmz);
        assert_eq!(config.build_scheme().unwrap(), *FIRE);
        assert_eq!(config.workers, HeatmapConfig::default().workers);
    }

    #[test]
    fn test_from_lookup_rejects_bad_numbers() {
        let err = HeatmapConfig::from_lookup(lookup(&[("HEATMAP_OPACITY", "300")])).unwrap_err();
        assert!(err.to_string().contains("HEATMAP_OPACITY"));

        assert!(HeatmapConfig::from_lookup(lookup(&[("HEATMAP_FORMAT", "gif")])).is_err());
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = HeatmapConfig::from_yaml_str(
            r##"
width: 256
format: kml
image_url: http://example.com/heat.png
scheme_stops:
  - value: 0.0
    color: "#00000000"
  - value: 1.0
    color: "#FF0000FF"
"##,
        )
        .unwrap();

        assert_eq!(config.width, 256);
        assert_eq!(config.height, 1024);
        assert_eq!(config.format, OutputFormat::Kml);
        assert_eq!(config.image_url.as_deref(), Some("http://example.com/heat.png"));

        let scheme = config.build_scheme().unwrap();
        assert_eq!(scheme.rgba(0), [0, 0, 0, 0]);
        assert_eq!(scheme.rgba(255), [255, 0, 0, 255]);
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heatmap.yaml");
        std::fs::write(&path, "radius: 20\nworkers: 2\n").unwrap();

        let config = HeatmapConfig::from_yaml(&path).unwrap();
        assert_eq!(config.radius, 20.0);
        assert_eq!(config.workers, 2);
    }

    #[test]
    fn test_opacity_applied() {
        let config = HeatmapConfig {
            scheme: "fire".to_string(),
            opacity: 0,
            ..Default::default()
        };
        let scheme = config.build_scheme().unwrap();
        assert!(scheme.colors().iter().all(|c| c.a == 0));
    }

    #[test]
    fn test_unknown_scheme() {
        let config = HeatmapConfig {
            scheme: "plaid".to_string(),
            ..Default::default()
        };
        let err = config.build_scheme().unwrap_err();
        assert!(err.to_string().contains("plaid"));
    }
}
