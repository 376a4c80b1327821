// File: ./src/model/mod.rs
pub mod item;
pub mod partition;

pub use item::{Item, ItemId};
pub use partition::{Group, ItemRole, PartitionError, PartitionResult, partition};
