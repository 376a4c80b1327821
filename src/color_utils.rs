//crampon/src/color_utils.rs

// Marker colour helpers.
// Checks the colour values accepted in the config and derives a stable colour
// per group tag when the marker colour is set to `auto`.

use std::hash::{Hash, Hasher};

/// Keyword that asks the renderer for one generated colour per group.
pub const AUTO_COLOR: &str = "auto";

/// Generates a deterministic colour (r, g, b) in [0.0, 1.0] from a group tag.
/// Darker than typical UI accents so the marker stays visible on white.
pub fn generate_color(tag: &str) -> (f32, f32, f32) {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    tag.hash(&mut hasher);
    let hash = hasher.finish();

    // Hue: 0-360 degrees
    let h = (hash % 360) as f32;

    let hash_s = hash >> 16;
    let hash_l = hash >> 32;

    // Saturation: 50% - 90%
    let s = 0.50 + ((hash_s % 41) as f32 / 100.0);

    // Lightness: 30% - 50%
    let l = 0.30 + ((hash_l % 21) as f32 / 100.0);

    hsl_to_rgb(h, s, l)
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r1, g1, b1) = if (0.0..60.0).contains(&h) {
        (c, x, 0.0)
    } else if (60.0..120.0).contains(&h) {
        (x, c, 0.0)
    } else if (120.0..180.0).contains(&h) {
        (0.0, c, x)
    } else if (180.0..240.0).contains(&h) {
        (0.0, x, c)
    } else if (240.0..300.0).contains(&h) {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r1 + m, g1 + m, b1 + m)
}

/// Formats floats in [0.0, 1.0] as "#rrggbb".
pub fn floats_to_hex(r: f32, g: f32, b: f32) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

/// Checks a configured marker colour.
///
/// Any CSS colour syntax is passed through as written (`rgb()`, `hsl()`, 8-digit hex,
/// every named colour), so only values that would break out of a style attribute are
/// refused.
pub fn is_valid_color(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && !value
            .chars()
            .any(|c| matches!(c, ';' | '"' | '<' | '>') || c.is_control())
}

/// Resolves the colour to paint for one group.
pub fn marker_color_for(configured: &str, tag: &str) -> String {
    if configured.trim().eq_ignore_ascii_case(AUTO_COLOR) {
        let (r, g, b) = generate_color(tag);
        floats_to_hex(r, g, b)
    } else {
        configured.trim().to_string()
    }
}
