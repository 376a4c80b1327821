// File: ./src/render/markup.rs
// In-memory surface: records what the renderer does and writes it back out as HTML.
use crate::model::{Item, ItemId};
use crate::render::surface::{BoxImage, RenderSurface};
use crate::source::ListSource;
use std::collections::HashMap;
use std::fmt::Write;

/// Height of one line of text at the browser's default font size.
pub const DEFAULT_ITEM_HEIGHT: f32 = 20.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerBox {
    pub class: String,
    styles: Vec<(String, String)>,
    text: Option<String>,
    images: Vec<BoxImage>,
}

impl MarkerBox {
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn styles(&self) -> &[(String, String)] {
        &self.styles
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn images(&self) -> &[BoxImage] {
        &self.images
    }

    fn set_style(&mut self, property: &str, value: &str) {
        set_style(&mut self.styles, property, value);
    }
}

#[derive(Debug, Clone)]
struct Entry {
    item: Item,
    text: String,
    height: Option<f32>,
    marker: Option<MarkerBox>,
}

#[derive(Debug, Clone)]
pub struct MarkupSurface {
    list_tag: String,
    list_classes: Vec<String>,
    list_styles: Vec<(String, String)>,
    entries: Vec<Entry>,
    // Item id to its first entry.
    index: HashMap<ItemId, usize>,
    default_height: f32,
}

impl MarkupSurface {
    pub fn new(list_tag: &str, items: &[Item]) -> Self {
        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            index.entry(item.id).or_insert(pos);
        }
        Self {
            list_tag: list_tag.to_string(),
            list_classes: Vec::new(),
            list_styles: Vec::new(),
            entries: items
                .iter()
                .map(|item| Entry {
                    item: item.clone(),
                    text: String::new(),
                    height: None,
                    marker: None,
                })
                .collect(),
            index,
            default_height: DEFAULT_ITEM_HEIGHT,
        }
    }

    pub fn from_source(source: &ListSource) -> Self {
        let mut surface = Self::new(&source.list_tag, &source.items);
        surface.list_classes = source.classes.clone();
        for (entry, text) in surface.entries.iter_mut().zip(&source.texts) {
            entry.text = text.clone();
        }
        surface
    }

    /// Height used for items without an explicit override.
    pub fn with_default_height(mut self, height: f32) -> Self {
        self.default_height = height;
        self
    }

    pub fn set_item_height(&mut self, item: ItemId, height: f32) {
        if let Some(entry) = self.entry_mut(item) {
            entry.height = Some(height);
        }
    }

    pub fn marker(&self, item: ItemId) -> Option<&MarkerBox> {
        self.entry(item).and_then(|e| e.marker.as_ref())
    }

    pub fn list_classes(&self) -> &[String] {
        &self.list_classes
    }

    pub fn list_style(&self, property: &str) -> Option<&str> {
        self.list_styles
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    fn entry(&self, item: ItemId) -> Option<&Entry> {
        self.index.get(&item).map(|&pos| &self.entries[pos])
    }

    fn entry_mut(&mut self, item: ItemId) -> Option<&mut Entry> {
        let pos = *self.index.get(&item)?;
        self.entries.get_mut(pos)
    }

    fn marker_mut(&mut self, item: ItemId) -> Option<&mut MarkerBox> {
        let marker = self.entry_mut(item).and_then(|e| e.marker.as_mut());
        if marker.is_none() {
            log::warn!("No box for item {}", item);
        }
        marker
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let _ = write!(out, "<{}", self.list_tag);
        write_attr(&mut out, "class", &self.list_classes.join(" "));
        write_attr(&mut out, "style", &style_attr(&self.list_styles));
        out.push_str(">\n");

        for entry in &self.entries {
            out.push_str("  <li");
            if let Some(tag) = &entry.item.tag {
                let _ = write!(out, " data-crampon=\"{}\"", escape(tag));
            }
            out.push('>');
            if let Some(marker) = &entry.marker {
                write_marker(&mut out, marker);
            }
            out.push_str(&escape(&entry.text));
            out.push_str("</li>\n");
        }

        let _ = writeln!(out, "</{}>", self.list_tag);
        out
    }
}

impl RenderSurface for MarkupSurface {
    fn add_list_class(&mut self, class: &str) {
        if !self.list_classes.iter().any(|c| c == class) {
            self.list_classes.push(class.to_string());
        }
    }

    fn set_list_style(&mut self, property: &str, value: &str) {
        set_style(&mut self.list_styles, property, value);
    }

    fn item_height(&self, item: ItemId) -> f32 {
        self.entry(item)
            .and_then(|e| e.height)
            .unwrap_or(self.default_height)
    }

    fn insert_box(&mut self, item: ItemId, class: &str) {
        match self.entry_mut(item) {
            Some(entry) => {
                entry.marker = Some(MarkerBox {
                    class: class.to_string(),
                    ..MarkerBox::default()
                })
            }
            None => log::warn!("Cannot insert box, unknown item {}", item),
        }
    }

    fn set_box_style(&mut self, item: ItemId, property: &str, value: &str) {
        if let Some(marker) = self.marker_mut(item) {
            marker.set_style(property, value);
        }
    }

    fn set_box_text(&mut self, item: ItemId, text: &str) {
        if let Some(marker) = self.marker_mut(item) {
            marker.text = Some(text.to_string());
        }
    }

    fn insert_box_image(&mut self, item: ItemId, image: &BoxImage) {
        if let Some(marker) = self.marker_mut(item) {
            marker.images.push(image.clone());
        }
    }

    fn box_height(&self, item: ItemId) -> f32 {
        self.marker(item)
            .and_then(|m| m.style("height"))
            .and_then(|h| h.trim_end_matches("px").parse::<f32>().ok())
            .unwrap_or_else(|| self.item_height(item))
    }
}

fn set_style(styles: &mut Vec<(String, String)>, property: &str, value: &str) {
    match styles.iter_mut().find(|(p, _)| p == property) {
        Some((_, v)) => *v = value.to_string(),
        None => styles.push((property.to_string(), value.to_string())),
    }
}

fn style_attr<P: AsRef<str>, V: AsRef<str>>(styles: &[(P, V)]) -> String {
    styles
        .iter()
        .map(|(p, v)| format!("{}: {};", p.as_ref(), v.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    if !value.is_empty() {
        let _ = write!(out, " {}=\"{}\"", name, escape(value));
    }
}

fn write_marker(out: &mut String, marker: &MarkerBox) {
    out.push_str("<div");
    write_attr(out, "class", &marker.class);
    write_attr(out, "style", &style_attr(&marker.styles));
    out.push('>');
    if let Some(text) = &marker.text {
        out.push_str(&escape(text));
    }
    for image in &marker.images {
        out.push_str("<img");
        write_attr(out, "src", &image.src);
        write_attr(out, "style", &style_attr(&image.styles()));
        out.push_str(" />");
    }
    out.push_str("</div>");
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_height_follows_height_style() {
        let items = vec![Item::tagged(0, "a")];
        let mut surface = MarkupSurface::new("ul", &items);
        surface.set_item_height(ItemId(0), 30.0);
        surface.insert_box(ItemId(0), "crampon-box");
        assert_eq!(surface.box_height(ItemId(0)), 30.0);

        surface.set_box_style(ItemId(0), "height", "12.5px");
        assert_eq!(surface.box_height(ItemId(0)), 12.5);
    }

    #[test]
    fn html_escapes_text_and_attributes() {
        let items = vec![Item::tagged(0, "a&b")];
        let mut surface = MarkupSurface::new("ol", &items);
        surface.insert_box(ItemId(0), "crampon-box");
        surface.set_box_text(ItemId(0), "<1>");
        let html = surface.to_html();
        assert!(html.starts_with("<ol>\n"));
        assert!(html.contains("data-crampon=\"a&amp;b\""));
        assert!(html.contains("<div class=\"crampon-box\">&lt;1&gt;</div>"));
    }

    #[test]
    fn large_list_keeps_every_marker() {
        let items: Vec<Item> = (0..5000).map(|i| Item::tagged(i, "a")).collect();
        let mut surface = MarkupSurface::new("ul", &items);
        for item in &items {
            surface.insert_box(item.id, "crampon-box");
            surface.set_box_text(item.id, &item.id.0.to_string());
        }
        assert_eq!(surface.marker(ItemId(4999)).unwrap().text(), Some("4999"));
        assert_eq!(surface.marker(ItemId(0)).unwrap().text(), Some("0"));
    }

    #[test]
    fn unknown_item_is_ignored() {
        let mut surface = MarkupSurface::new("ul", &[]);
        surface.insert_box(ItemId(3), "crampon-box");
        surface.set_box_style(ItemId(3), "height", "1px");
        assert!(surface.marker(ItemId(3)).is_none());
        assert_eq!(surface.item_height(ItemId(3)), DEFAULT_ITEM_HEIGHT);
    }
}
