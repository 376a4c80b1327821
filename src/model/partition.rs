// File: ./src/model/partition.rs
// Groups list items by their tag and works out which item opens and closes each group.
//
// Items are bucketed by tag value across the whole list, not by contiguous run:
// `[x, x, y, x]` yields one `x` group holding items 0, 1 and 3. Ordinals follow the
// order in which each tag is first seen.

use crate::model::item::{Item, ItemId};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartitionError {
    #[error("item {item} has no data-crampon tag")]
    MissingTag { item: ItemId },
}

/// Position of one item inside its group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRole {
    pub is_first: bool,
    pub is_last: bool,
    pub group_ordinal: u32,
    pub group_tag: String,
}

/// All items sharing one tag, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub tag: String,
    pub ordinal: u32,
    pub items: Vec<ItemId>,
}

impl Group {
    pub fn first(&self) -> Option<ItemId> {
        self.items.first().copied()
    }

    pub fn last(&self) -> Option<ItemId> {
        self.items.last().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartitionResult {
    roles: Vec<(ItemId, ItemRole)>,
    groups: Vec<Group>,
    #[serde(skip)]
    positions: HashMap<ItemId, usize>,
}

impl PartitionResult {
    /// Role of a single item, if it was part of the input. A repeated id resolves to
    /// its first occurrence; [`PartitionResult::roles`] still lists every one.
    pub fn role(&self, id: ItemId) -> Option<&ItemRole> {
        self.positions.get(&id).map(|&pos| &self.roles[pos].1)
    }

    /// Roles in input order.
    pub fn roles(&self) -> impl Iterator<Item = (ItemId, &ItemRole)> {
        self.roles.iter().map(|(id, role)| (*id, role))
    }

    /// Groups in ordinal order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, tag: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Partitions `items` into tag buckets.
///
/// Aborts with [`PartitionError::MissingTag`] on the first item without a tag; no
/// partial result is produced in that case.
pub fn partition(items: &[Item]) -> Result<PartitionResult, PartitionError> {
    let mut groups: Vec<Group> = Vec::new();
    // Input positions of each group's members, parallel to `groups`.
    let mut members: Vec<Vec<usize>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (pos, item) in items.iter().enumerate() {
        let tag = item
            .group_tag()
            .ok_or(PartitionError::MissingTag { item: item.id })?;

        match index.get(tag) {
            Some(&slot) => {
                groups[slot].items.push(item.id);
                members[slot].push(pos);
            }
            None => {
                index.insert(tag, groups.len());
                groups.push(Group {
                    tag: tag.to_string(),
                    ordinal: groups.len() as u32 + 1,
                    items: vec![item.id],
                });
                members.push(vec![pos]);
            }
        }
    }

    // Filled by input position, so repeated ids each keep their own role.
    let mut slots: Vec<Option<ItemRole>> = vec![None; items.len()];
    for (group, positions) in groups.iter().zip(&members) {
        let last = positions.len() - 1;
        for (rank, &pos) in positions.iter().enumerate() {
            slots[pos] = Some(ItemRole {
                is_first: rank == 0,
                is_last: rank == last,
                group_ordinal: group.ordinal,
                group_tag: group.tag.clone(),
            });
        }
    }

    let roles: Vec<(ItemId, ItemRole)> = items
        .iter()
        .zip(slots)
        .filter_map(|(item, role)| role.map(|role| (item.id, role)))
        .collect();
    let mut positions = HashMap::with_capacity(roles.len());
    for (pos, (id, _)) in roles.iter().enumerate() {
        positions.entry(*id).or_insert(pos);
    }

    Ok(PartitionResult {
        roles,
        groups,
        positions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(tags: &[&str]) -> Vec<Item> {
        Item::from_tags(tags.iter().map(|t| Some(*t)))
    }

    #[test]
    fn empty_input_is_empty_result() {
        let result = partition(&[]).unwrap();
        assert!(result.is_empty());
        assert!(result.groups().is_empty());
    }

    #[test]
    fn singleton_is_first_and_last() {
        let result = partition(&items(&["solo"])).unwrap();
        let role = result.role(ItemId(0)).unwrap();
        assert!(role.is_first && role.is_last);
        assert_eq!(role.group_ordinal, 1);
    }

    #[test]
    fn missing_tag_names_first_offender() {
        let list = Item::from_tags([Some("a"), None, Some("")]);
        assert_eq!(
            partition(&list),
            Err(PartitionError::MissingTag { item: ItemId(1) })
        );
    }

    #[test]
    fn group_bounds() {
        let result = partition(&items(&["x", "x", "y", "x"])).unwrap();
        let x = result.group("x").unwrap();
        assert_eq!(x.first(), Some(ItemId(0)));
        assert_eq!(x.last(), Some(ItemId(3)));
        assert_eq!(x.len(), 3);
    }

    #[test]
    fn empty_group_has_no_bounds() {
        let group = Group {
            tag: "x".into(),
            ordinal: 1,
            items: Vec::new(),
        };
        assert!(group.is_empty());
        assert_eq!(group.first(), None);
        assert_eq!(group.last(), None);
    }

    #[test]
    fn repeated_ids_keep_one_role_each() {
        let list = [Item::tagged(0, "a"), Item::tagged(0, "b")];
        let result = partition(&list).unwrap();
        assert_eq!(result.len(), 2);
        let tags: Vec<&str> = result.roles().map(|(_, r)| r.group_tag.as_str()).collect();
        assert_eq!(tags, ["a", "b"]);
        assert_eq!(result.role(ItemId(0)).unwrap().group_tag, "a");
    }
}
