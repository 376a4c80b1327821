// File: ./src/model/item.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Document position of a list entry. Surfaces use it to find the element again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub usize);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub tag: Option<String>,
}

impl Item {
    pub fn new(id: usize, tag: Option<&str>) -> Self {
        Self {
            id: ItemId(id),
            tag: tag.map(str::to_string),
        }
    }

    pub fn tagged(id: usize, tag: &str) -> Self {
        Self::new(id, Some(tag))
    }

    /// Returns the tag only when it is present and non-empty.
    /// An empty `data-crampon=""` attribute counts as missing.
    pub fn group_tag(&self) -> Option<&str> {
        self.tag.as_deref().filter(|t| !t.is_empty())
    }

    /// Builds items in document order from a list of raw tags.
    pub fn from_tags<'a, I>(tags: I) -> Vec<Item>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        tags.into_iter()
            .enumerate()
            .map(|(i, tag)| Item::new(i, tag))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tag_is_missing() {
        assert_eq!(Item::new(0, Some("")).group_tag(), None);
        assert_eq!(Item::new(1, None).group_tag(), None);
        assert_eq!(Item::tagged(2, "fruit").group_tag(), Some("fruit"));
    }

    #[test]
    fn from_tags_assigns_positions() {
        let items = Item::from_tags([Some("a"), None, Some("b")]);
        let ids: Vec<usize> = items.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(items[1].tag, None);
    }
}
