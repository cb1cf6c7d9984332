//! Deterministic pastel colors and the default metric palette.

use std::collections::BTreeMap;

/// A color in HSL space. Hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Hsl {
    /// Convert to 8-bit sRGB components.
    pub fn to_rgb(&self) -> [u8; 3] {
        let h = f32::from(self.h % 360) / 360.0;
        let s = f32::from(self.s.min(100)) / 100.0;
        let l = f32::from(self.l.min(100)) / 100.0;

        if s == 0.0 {
            let v = (l * 255.0).round() as u8;
            return [v, v, v];
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        let channel = |t: f32| {
            let t = t.rem_euclid(1.0);
            let v = if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            };
            (v * 255.0).round().clamp(0.0, 255.0) as u8
        };

        [
            channel(h + 1.0 / 3.0),
            channel(h),
            channel(h - 1.0 / 3.0),
        ]
    }

    /// CSS notation, e.g. `hsl(120, 55%, 80%)`.
    pub fn to_css(&self) -> String {
        format!("hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// Pastel color derived from an identifier.
///
/// The same seed always yields the same color. Saturation stays in 50..80
/// and lightness in 75..90.
pub fn pastel_color(seed: &str) -> Hsl {
    let hash = seed.encode_utf16().fold(0i32, |hash, c| {
        i32::from(c)
            .wrapping_add(hash.wrapping_shl(5))
            .wrapping_sub(hash)
    });

    Hsl {
        h: hash.rem_euclid(360) as u16,
        s: 50 + hash.rem_euclid(30) as u8,
        l: 75 + hash.rem_euclid(15) as u8,
    }
}

/// Parse `#rrggbb`.
pub fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some([byte(0)?, byte(2)?, byte(4)?])
}

const METRIC_COLORS: &[(&str, &str)] = &[
    ("partners", "#ff7300"),
    ("users", "#8884d8"),
    ("collections", "#82ca9d"),
    ("activations", "#ffc658"),
    ("scans", "#d53e4f"),
    ("likes", "#fc8d59"),
    ("views", "#99d594"),
];

/// Default metric name to RGB mapping.
pub fn metric_palette() -> BTreeMap<String, [u8; 3]> {
    METRIC_COLORS
        .iter()
        .filter_map(|(name, hex)| parse_hex(hex).map(|rgb| (name.to_string(), rgb)))
        .collect()
}

/// Color for a metric, falling back to a pastel hash of its name.
pub fn metric_color(palette: &BTreeMap<String, [u8; 3]>, metric: &str) -> [u8; 3] {
    palette
        .get(metric)
        .copied()
        .unwrap_or_else(|| pastel_color(metric).to_rgb())
}
