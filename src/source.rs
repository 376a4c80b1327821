// File: ./src/source.rs
// Reads list items out of an XHTML fragment such as
//
//   <ul>
//     <li data-crampon="fruit">Apple</li>
//     <li data-crampon="veg">Leek</li>
//   </ul>
//
// The fragment must be well-formed XML; HTML-only entities like &nbsp; are rejected.
use crate::model::Item;

pub const TAG_ATTRIBUTE: &str = "data-crampon";

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to parse list markup: {0}")]
    Parse(#[from] roxmltree::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSource {
    /// Element name of the list, usually `ul` or `ol`.
    pub list_tag: String,
    /// Classes already present on the list element.
    pub classes: Vec<String>,
    pub items: Vec<Item>,
    /// Text of each item, parallel to `items`.
    pub texts: Vec<String>,
}

/// Collects every `li` below the root element in document order, nested ones included.
pub fn parse_list(markup: &str) -> Result<ListSource, SourceError> {
    let doc = roxmltree::Document::parse(markup)?;
    let root = doc.root_element();
    let list_tag = root.tag_name().name().to_string();
    if list_tag != "ul" && list_tag != "ol" {
        log::warn!("List root is <{}>, not <ul> or <ol>", list_tag);
    }

    let classes = root
        .attribute("class")
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();

    let mut items = Vec::new();
    let mut texts = Vec::new();
    for node in root.descendants().filter(|n| n.has_tag_name("li")) {
        items.push(Item::new(items.len(), node.attribute(TAG_ATTRIBUTE)));
        texts.push(own_text(node));
    }

    log::debug!("Read {} items from <{}>", items.len(), list_tag);
    Ok(ListSource {
        list_tag,
        classes,
        items,
        texts,
    })
}

/// Text of an `li`, skipping any nested list so it is not counted twice.
fn own_text(node: roxmltree::Node<'_, '_>) -> String {
    let mut parts = Vec::new();
    collect_text(node, &mut parts);
    parts.join(" ")
}

fn collect_text<'a>(node: roxmltree::Node<'a, '_>, parts: &mut Vec<&'a str>) {
    for child in node.children() {
        if child.is_text() {
            if let Some(text) = child.text().map(str::trim).filter(|t| !t.is_empty()) {
                parts.push(text);
            }
        } else if child.is_element() && !matches!(child.tag_name().name(), "ul" | "ol") {
            collect_text(child, parts);
        }
    }
}
