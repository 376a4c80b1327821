// File: ./src/render/surface.rs
use crate::model::ItemId;

/// Image placed inside the first box of a group in icon mode.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxImage {
    pub src: String,
    pub margin_top: f32,
    pub max_height: f32,
    pub width: f32,
    pub left: f32,
}

/// The drawing capability the renderer is handed.
///
/// Everything the renderer knows about the page goes through here: item
/// measurements come in, style mutations go out. Implementations decide what a
/// "box" is (a DOM node, a recorded struct, ...).
pub trait RenderSurface {
    fn add_list_class(&mut self, class: &str);
    fn set_list_style(&mut self, property: &str, value: &str);

    /// Rendered height of an item, in pixels.
    fn item_height(&self, item: ItemId) -> f32;

    /// Inserts an empty box as the first child of the item.
    fn insert_box(&mut self, item: ItemId, class: &str);
    fn set_box_style(&mut self, item: ItemId, property: &str, value: &str);
    fn set_box_text(&mut self, item: ItemId, text: &str);
    fn insert_box_image(&mut self, item: ItemId, image: &BoxImage);

    /// Rendered height of the item's box, in pixels.
    fn box_height(&self, item: ItemId) -> f32;
}
