//! Color schemes: 256-entry intensity-to-RGBA lookup tables.
//!
//! Index 0 is the background (no heat), index 255 the hottest value. Presets
//! are built once on first use and shared read-only for the rest of the
//! process.

use std::path::Path;

use heatmap_common::{HeatmapError, HeatmapResult};
use image::RgbaImage;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Number of entries in every scheme.
pub const SCHEME_LEN: usize = 256;

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 && hex.len() != 8 {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        let a = if hex.len() == 8 { channel(6)? } else { 255 };

        Some(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// Linear color interpolation
pub fn interpolate_color(color1: Color, color2: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;
    let mix = |a: u8, b: u8| (a as f32 * t_inv + b as f32 * t).round() as u8;

    Color::new(
        mix(color1.r, color2.r),
        mix(color1.g, color2.g),
        mix(color1.b, color2.b),
        mix(color1.a, color2.a),
    )
}

/// Gradient stop: a hex color pinned at a position in [0, 1].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ColorStop {
    pub value: f32,
    pub color: String,
}

impl ColorStop {
    pub fn new(value: f32, color: impl Into<String>) -> Self {
        Self {
            value,
            color: color.into(),
        }
    }
}

/// Intensity-to-color lookup table with exactly 256 entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheme {
    colors: [Color; SCHEME_LEN],
}

impl Scheme {
    /// Wrap a complete table.
    pub fn new(colors: [Color; SCHEME_LEN]) -> Self {
        Self { colors }
    }

    /// Build a table from any number of entries by resampling.
    ///
    /// The first entry becomes index 0 and the last index 255; intermediate
    /// entries are linearly interpolated.
    pub fn from_colors(samples: &[Color]) -> HeatmapResult<Self> {
        if samples.is_empty() {
            return Err(HeatmapError::InvalidScheme(
                "at least one color is required".to_string(),
            ));
        }

        let last = (samples.len() - 1) as f32;
        let mut colors = [Color::transparent(); SCHEME_LEN];
        for (i, color) in colors.iter_mut().enumerate() {
            let pos = i as f32 * last / (SCHEME_LEN - 1) as f32;
            let lo = pos.floor() as usize;
            let hi = (lo + 1).min(samples.len() - 1);
            *color = interpolate_color(samples[lo], samples[hi], pos - lo as f32);
        }

        Ok(Self::new(colors))
    }

    /// Build a table from gradient stops positioned in [0, 1].
    ///
    /// Entries before the first stop take its color, entries after the last
    /// stop take the last color.
    pub fn from_stops(stops: &[ColorStop]) -> HeatmapResult<Self> {
        if stops.is_empty() {
            return Err(HeatmapError::InvalidScheme(
                "at least one color stop is required".to_string(),
            ));
        }

        let mut parsed = Vec::with_capacity(stops.len());
        for stop in stops {
            if !(0.0..=1.0).contains(&stop.value) {
                return Err(HeatmapError::InvalidScheme(format!(
                    "stop position {} is outside [0, 1]",
                    stop.value
                )));
            }
            let color = Color::from_hex(&stop.color).ok_or_else(|| {
                HeatmapError::InvalidScheme(format!("invalid color '{}'", stop.color))
            })?;
            parsed.push((stop.value, color));
        }
        parsed.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut colors = [Color::transparent(); SCHEME_LEN];
        for (i, color) in colors.iter_mut().enumerate() {
            *color = sample_stops(&parsed, i as f32 / (SCHEME_LEN - 1) as f32);
        }

        Ok(Self::new(colors))
    }

    /// Derive a table from a reference gradient image.
    ///
    /// Tall images are read down column 0 with the top row hottest; wide
    /// images are read along row 0 with the rightmost column hottest.
    pub fn from_gradient_image(image: &RgbaImage) -> HeatmapResult<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(HeatmapError::InvalidScheme(
                "gradient image has no pixels".to_string(),
            ));
        }

        let samples: Vec<Color> = if height >= width {
            (0..height)
                .rev()
                .map(|y| Color::from(image.get_pixel(0, y).0))
                .collect()
        } else {
            (0..width)
                .map(|x| Color::from(image.get_pixel(x, 0).0))
                .collect()
        };

        Self::from_colors(&samples)
    }

    /// Load a gradient image from disk and derive a table from it.
    pub fn from_image_file(path: impl AsRef<Path>) -> HeatmapResult<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| HeatmapError::ImageLoad(format!("{}: {}", path.display(), e)))?
            .to_rgba8();
        Self::from_gradient_image(&image)
    }

    /// Look up a built-in preset by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Scheme> {
        match name.to_ascii_lowercase().as_str() {
            "classic" => Some(&CLASSIC),
            "fire" => Some(&FIRE),
            "alpha_fire" | "alphafire" | "alpha-fire" => Some(&ALPHA_FIRE),
            "omg" => Some(&OMG),
            "pbj" => Some(&PBJ),
            "pgaitch" => Some(&PGAITCH),
            _ => None,
        }
    }

    /// Copy of this scheme with every alpha scaled by `opacity / 255`.
    pub fn with_opacity(&self, opacity: u8) -> Self {
        let mut colors = self.colors;
        for color in colors.iter_mut() {
            color.a = ((u16::from(color.a) * u16::from(opacity) + 127) / 255) as u8;
        }
        Self::new(colors)
    }

    /// RGBA bytes for an accumulated intensity.
    #[inline]
    pub fn rgba(&self, intensity: u8) -> [u8; 4] {
        self.colors[intensity as usize].to_array()
    }

    pub fn colors(&self) -> &[Color; SCHEME_LEN] {
        &self.colors
    }
}

impl std::ops::Index<u8> for Scheme {
    type Output = Color;

    fn index(&self, intensity: u8) -> &Color {
        &self.colors[intensity as usize]
    }
}

fn sample_stops(stops: &[(f32, Color)], t: f32) -> Color {
    let (first_pos, first) = stops[0];
    if t <= first_pos {
        return first;
    }
    for pair in stops.windows(2) {
        let (lo_pos, lo) = pair[0];
        let (hi_pos, hi) = pair[1];
        if t <= hi_pos {
            let span = hi_pos - lo_pos;
            if span <= f32::EPSILON {
                return hi;
            }
            return interpolate_color(lo, hi, (t - lo_pos) / span);
        }
    }
    stops[stops.len() - 1].1
}

fn preset(stops: &[(f32, &str)]) -> Scheme {
    let stops: Vec<ColorStop> = stops.iter().map(|&(v, c)| ColorStop::new(v, c)).collect();
    match Scheme::from_stops(&stops) {
        Ok(scheme) => scheme,
        Err(e) => panic!("built-in scheme is malformed: {}", e),
    }
}

/// Names accepted by [`Scheme::by_name`].
pub const PRESET_NAMES: [&str; 6] = ["classic", "fire", "alpha_fire", "omg", "pbj", "pgaitch"];

/// Transparent through blue, cyan, green and yellow to red.
pub static CLASSIC: Lazy<Scheme> = Lazy::new(|| {
    preset(&[
        (0.0, "#0000FF00"),
        (0.2, "#0000FFA0"),
        (0.4, "#00FFFF"),
        (0.6, "#00FF00"),
        (0.8, "#FFFF00"),
        (1.0, "#FF0000"),
    ])
});

/// Opaque black through dark red and orange to white.
pub static FIRE: Lazy<Scheme> = Lazy::new(|| {
    preset(&[
        (0.0, "#000000"),
        (0.3, "#8B0000"),
        (0.55, "#FF4500"),
        (0.8, "#FFD700"),
        (1.0, "#FFFFFF"),
    ])
});

/// Fire with a transparent background that becomes opaque with heat.
pub static ALPHA_FIRE: Lazy<Scheme> = Lazy::new(|| {
    preset(&[
        (0.0, "#00000000"),
        (0.3, "#8B000080"),
        (0.55, "#FF4500D0"),
        (0.8, "#FFD700"),
        (1.0, "#FFFFFF"),
    ])
});

pub static OMG: Lazy<Scheme> = Lazy::new(|| {
    preset(&[
        (0.0, "#FFFFFF00"),
        (0.25, "#FFC0FF80"),
        (0.5, "#FF00FF"),
        (0.75, "#8000FF"),
        (1.0, "#000080"),
    ])
});

pub static PBJ: Lazy<Scheme> = Lazy::new(|| {
    preset(&[
        (0.0, "#FFF8DC00"),
        (0.3, "#D2A060A0"),
        (0.6, "#8B2252"),
        (1.0, "#4B0082"),
    ])
});

pub static PGAITCH: Lazy<Scheme> = Lazy::new(|| {
    preset(&[
        (0.0, "#FFFFFF00"),
        (0.3, "#FFB0B0A0"),
        (0.65, "#FF4040"),
        (1.0, "#800000"),
    ])
});
