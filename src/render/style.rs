// File: ./src/render/style.rs
// Inline style values for boxes and their decorations.
//
// Icon mode:   image at 80% of the item height, 10% top margin, pulled left
//              by the item height plus 5px; last box shrinks to 85%.
// Ordinal mode: box as wide as the radius, label indented 2.5 radii to the
//              left, rounded top-left on the first item and bottom-left on
//              the last.

use crate::config::{Config, DecorationMode, Dimension, format_px};
use crate::render::surface::BoxImage;

pub const LIST_CLASS: &str = "crampon-list";
pub const BOX_CLASS: &str = "crampon-box";

const IMAGE_SCALE: f32 = 0.8;
const IMAGE_MARGIN: f32 = 0.1;
const IMAGE_GAP: f32 = 5.0;
const LAST_BOX_SCALE: f32 = 0.85;
const LABEL_INDENT: f32 = 2.5;

pub fn px(value: f32) -> String {
    format!("{}px", format_px(value))
}

/// Styles applied to a freshly inserted box, before grouping is known.
pub fn box_styles(config: &Config, item_height: f32) -> Vec<(&'static str, String)> {
    let height = px(item_height);
    match config.mode {
        DecorationMode::Icon => vec![("height", height.clone()), ("line-height", height)],
        DecorationMode::Ordinal => {
            let radius = config.radius;
            vec![
                ("height", height),
                ("width", radius.to_string()),
                ("left", negative(radius)),
                ("text-indent", negative(radius.scale(LABEL_INDENT))),
            ]
        }
    }
}

fn negative(d: Dimension) -> String {
    px(-d.value())
}

pub fn border_left(marker_width: Dimension, color: &str) -> String {
    format!("{} solid {}", marker_width, color)
}

pub fn group_image(src: &str, item_height: f32) -> BoxImage {
    BoxImage {
        src: src.to_string(),
        margin_top: item_height * IMAGE_MARGIN,
        max_height: item_height * IMAGE_SCALE,
        width: item_height * IMAGE_SCALE,
        left: -(item_height + IMAGE_GAP),
    }
}

impl BoxImage {
    pub fn styles(&self) -> Vec<(&'static str, String)> {
        vec![
            ("margin-top", px(self.margin_top)),
            ("max-height", px(self.max_height)),
            ("width", px(self.width)),
            ("left", px(self.left)),
        ]
    }
}

pub fn shortened_height(box_height: f32) -> String {
    px(box_height * LAST_BOX_SCALE)
}

/// Corner rounding for an ordinal-mode box, if it has any.
pub fn ordinal_radius(radius: Dimension, is_first: bool, is_last: bool) -> Option<String> {
    match (is_first, is_last) {
        (true, true) => Some(format!("{r} 0 0 {r}", r = radius)),
        (true, false) => Some(format!("{} 0 0 0", radius)),
        (false, true) => Some(format!("0 0 0 {}", radius)),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_box_geometry() {
        let config = Config::default().with_mode(DecorationMode::Ordinal);
        let styles = box_styles(&config, 20.0);
        assert_eq!(
            styles,
            vec![
                ("height", "20px".to_string()),
                ("width", "7px".to_string()),
                ("left", "-7px".to_string()),
                ("text-indent", "-17.5px".to_string()),
            ]
        );
    }

    #[test]
    fn image_geometry() {
        let image = group_image("a.png", 20.0);
        let styles = image.styles();
        assert_eq!(styles[0], ("margin-top", "2px".to_string()));
        assert_eq!(styles[1], ("max-height", "16px".to_string()));
        assert_eq!(styles[2], ("width", "16px".to_string()));
        assert_eq!(styles[3], ("left", "-25px".to_string()));
    }

    #[test]
    fn corners() {
        let r = Dimension::px(7.0);
        assert_eq!(ordinal_radius(r, true, true).as_deref(), Some("7px 0 0 7px"));
        assert_eq!(ordinal_radius(r, true, false).as_deref(), Some("7px 0 0 0"));
        assert_eq!(ordinal_radius(r, false, true).as_deref(), Some("0 0 0 7px"));
        assert_eq!(ordinal_radius(r, false, false), None);
    }
}
