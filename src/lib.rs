// Crate root library declaration and module exports.
//
// `model` holds the pure grouping logic; `render` applies it to a surface.
pub mod cli;
pub mod color_utils;
pub mod config;
pub mod context;
pub mod model;
pub mod render;
pub mod source;
pub mod storage;

pub use config::{Config, DecorationMode, Dimension};
pub use model::{Item, ItemId, ItemRole, PartitionError, PartitionResult, partition};
pub use render::{RenderReport, RenderSurface, Renderer};
