//! Snapping of raw design values onto the utility vocabulary.

use log::{trace, warn};
use serde::{Deserialize, Serialize};
use sprout_core::Rgba;

/// Maximum RGB distance at which a color still snaps to a palette entry.
///
/// The largest possible distance (black to white) is about 441.
pub const DEFAULT_COLOR_THRESHOLD: f64 = 30.0;

/// A named palette color as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    /// Token name, e.g. `blue-500`.
    pub name: String,
    /// `#rrggbb` value.
    pub hex: String,
}

/// Reference palette for color snapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    entries: Vec<(String, [u8; 3])>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::tailwind()
    }
}

impl Palette {
    /// The default utility palette.
    pub fn tailwind() -> Self {
        Self {
            entries: TAILWIND_COLORS
                .iter()
                .filter_map(|(name, hex)| Some((name.to_string(), parse_hex(hex)?)))
                .collect(),
        }
    }

    /// Build a palette from configured swatches. Swatches with an unreadable
    /// hex value are skipped.
    pub fn from_swatches(swatches: &[Swatch]) -> Self {
        let entries = swatches
            .iter()
            .filter_map(|swatch| match parse_hex(&swatch.hex) {
                Some(rgb) => Some((swatch.name.clone(), rgb)),
                None => {
                    warn!(name = swatch.name.as_str(), hex = swatch.hex.as_str(); "Skipping palette entry with invalid hex");
                    None
                }
            })
            .collect();
        Self { entries }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the palette has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nearest entry and its Euclidean RGB distance. Ties go to the entry
    /// listed first.
    pub fn nearest(&self, rgb: [u8; 3]) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (name, entry) in &self.entries {
            let distance = rgb_distance(rgb, *entry);
            if best.map_or(true, |(_, current)| distance < current) {
                best = Some((name.as_str(), distance));
            }
        }
        best
    }
}

/// Maps design values onto utility tokens.
#[derive(Debug, Clone)]
pub struct StyleResolver {
    palette: Palette,
    threshold: f64,
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::new(Palette::tailwind(), DEFAULT_COLOR_THRESHOLD)
    }
}

impl StyleResolver {
    /// Create a resolver over a palette with the given snapping threshold.
    pub fn new(palette: Palette, threshold: f64) -> Self {
        Self { palette, threshold }
    }

    /// The palette in use.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette token for a color, or `None` when no entry is within the
    /// threshold.
    pub fn color_token(&self, color: &Rgba) -> Option<&str> {
        let rgb = color.to_rgb8();
        let (name, distance) = self.palette.nearest(rgb)?;
        trace!(hex = color.to_hex().as_str(), nearest = name, distance = distance; "Color lookup");
        (distance <= self.threshold).then_some(name)
    }

    /// Color utility with the given prefix: `bg-red-500` or `bg-[#ff00ff]`.
    pub fn color_class(&self, prefix: &str, color: &Rgba) -> String {
        match self.color_token(color) {
            Some(token) => format!("{}-{}", prefix, token),
            None => format!("{}-[{}]", prefix, color.to_hex()),
        }
    }
}

/// Spacing scale step for a pixel length (one step is 4px).
///
/// The value is rounded to the nearest pixel first. Returns `None` when the
/// length is not on the scale.
pub fn spacing_scale(px: f64) -> Option<String> {
    if !px.is_finite() {
        return None;
    }
    let rounded = px.round() as i64;
    if rounded <= 0 {
        return Some("0".to_string());
    }
    match rounded {
        n if n % 4 == 0 => Some((n / 4).to_string()),
        2 => Some("0.5".to_string()),
        6 => Some("1.5".to_string()),
        10 => Some("2.5".to_string()),
        _ => None,
    }
}

/// Spacing utility with the given prefix: `p-4` or `p-[17px]`.
pub fn spacing_class(prefix: &str, px: f64) -> String {
    match spacing_scale(px) {
        Some(step) => format!("{}-{}", prefix, step),
        None => format!("{}-[{}]", prefix, format_px(px)),
    }
}

/// Corner radius utility. Zero or negative radii produce nothing.
pub fn radius_class(px: f64) -> Option<String> {
    if !px.is_finite() || px <= 0.0 {
        return None;
    }
    let named = RADIUS_STEPS
        .iter()
        .find(|(step, _)| (px - step).abs() < 0.01)
        .map(|(_, class)| class.to_string());
    Some(named.unwrap_or_else(|| format!("rounded-[{}]", format_px(px))))
}

/// Literal pixel value with at most two decimals, e.g. `17px`, `17.5px`.
pub fn format_px(px: f64) -> String {
    let rounded = (px * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}px", rounded as i64)
    } else {
        format!("{}px", rounded)
    }
}

fn rgb_distance(a: [u8; 3], b: [u8; 3]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = f64::from(*x) - f64::from(*y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

const RADIUS_STEPS: [(f64, &str); 6] = [
    (2.0, "rounded-sm"),
    (4.0, "rounded"),
    (6.0, "rounded-md"),
    (8.0, "rounded-lg"),
    (12.0, "rounded-xl"),
    (16.0, "rounded-2xl"),
];

const TAILWIND_COLORS: &[(&str, &str)] = &[
    ("white", "#ffffff"),
    ("black", "#000000"),
    // Slate
    ("slate-50", "#f8fafc"), ("slate-100", "#f1f5f9"), ("slate-200", "#e2e8f0"),
    ("slate-300", "#cbd5e1"), ("slate-400", "#94a3b8"), ("slate-500", "#64748b"),
    ("slate-600", "#475569"), ("slate-700", "#334155"), ("slate-800", "#1e293b"),
    ("slate-900", "#0f172a"),
    // Gray
    ("gray-50", "#f9fafb"), ("gray-100", "#f3f4f6"), ("gray-200", "#e5e7eb"),
    ("gray-300", "#d1d5db"), ("gray-400", "#9ca3af"), ("gray-500", "#6b7280"),
    ("gray-600", "#4b5563"), ("gray-700", "#374151"), ("gray-800", "#1f2937"),
    ("gray-900", "#111827"),
    // Red
    ("red-50", "#fef2f2"), ("red-100", "#fee2e2"), ("red-200", "#fecaca"),
    ("red-300", "#fca5a5"), ("red-400", "#f87171"), ("red-500", "#ef4444"),
    ("red-600", "#dc2626"), ("red-700", "#b91c1c"), ("red-800", "#991b1b"),
    ("red-900", "#7f1d1d"),
    // Yellow
    ("yellow-50", "#fefce8"), ("yellow-100", "#fef9c3"), ("yellow-200", "#fef08a"),
    ("yellow-300", "#fde047"), ("yellow-400", "#facc15"), ("yellow-500", "#eab308"),
    ("yellow-600", "#ca8a04"), ("yellow-700", "#a16207"), ("yellow-800", "#854d0e"),
    ("yellow-900", "#713f12"),
    // Green
    ("green-50", "#f0fdf4"), ("green-100", "#dcfce7"), ("green-200", "#bbf7d0"),
    ("green-300", "#86efac"), ("green-400", "#4ade80"), ("green-500", "#22c55e"),
    ("green-600", "#16a34a"), ("green-700", "#15803d"), ("green-800", "#166534"),
    ("green-900", "#14532d"),
    // Blue
    ("blue-50", "#eff6ff"), ("blue-100", "#dbeafe"), ("blue-200", "#bfdbfe"),
    ("blue-300", "#93c5fd"), ("blue-400", "#60a5fa"), ("blue-500", "#3b82f6"),
    ("blue-600", "#2563eb"), ("blue-700", "#1d4ed8"), ("blue-800", "#1e40af"),
    ("blue-900", "#1e3a8a"),
    // Indigo
    ("indigo-50", "#eef2ff"), ("indigo-100", "#e0e7ff"), ("indigo-200", "#c7d2fe"),
    ("indigo-300", "#a5b4fc"), ("indigo-400", "#818cf8"), ("indigo-500", "#6366f1"),
    ("indigo-600", "#4f46e5"), ("indigo-700", "#4338ca"), ("indigo-800", "#3730a3"),
    ("indigo-900", "#312e81"),
    // Purple
    ("purple-50", "#faf5ff"), ("purple-100", "#f3e8ff"), ("purple-200", "#e9d5ff"),
    ("purple-300", "#d8b4fe"), ("purple-400", "#c084fc"), ("purple-500", "#a855f7"),
    ("purple-600", "#9333ea"), ("purple-700", "#7e22ce"), ("purple-800", "#6b21a8"),
    ("purple-900", "#581c87"),
    // Pink
    ("pink-50", "#fdf2f8"), ("pink-100", "#fce7f3"), ("pink-200", "#fbcfe8"),
    ("pink-300", "#f9a8d4"), ("pink-400", "#f472b6"), ("pink-500", "#ec4899"),
    ("pink-600", "#db2777"), ("pink-700", "#be185d"), ("pink-800", "#9d174d"),
    ("pink-900", "#831843"),
];
