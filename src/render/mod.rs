// File: ./src/render/mod.rs
// Draws group markers onto a surface from a partition of the list items.
pub mod markup;
pub mod style;
pub mod surface;

pub use markup::{MarkerBox, MarkupSurface};
pub use surface::{BoxImage, RenderSurface};

use crate::config::{Config, ConfigError, DecorationMode};
use crate::model::{Item, PartitionError, PartitionResult, partition};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

/// What a render pass did.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderReport {
    pub boxes: usize,
    pub groups: usize,
    /// Set when grouping was abandoned; boxes are drawn but left empty.
    pub skipped: Option<PartitionError>,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    config: Config,
}

impl Renderer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Styles the list, inserts one box per item and decorates group bounds.
    ///
    /// Configuration problems, including a group without an icon in icon mode,
    /// are reported before the surface is touched.
    pub fn render<S>(&self, items: &[Item], surface: &mut S) -> Result<RenderReport, RenderError>
    where
        S: RenderSurface + ?Sized,
    {
        self.config.validate()?;

        let partitioned = partition(items);
        if let (Ok(result), DecorationMode::Icon) = (&partitioned, self.config.mode) {
            for group in result.groups() {
                self.config.icon_for(&group.tag)?;
            }
        }

        self.set_list_style(surface);
        self.add_boxes(items, surface);

        let result = match partitioned {
            Ok(result) => result,
            Err(e) => {
                log::debug!("Skipping group markers: {}", e);
                return Ok(RenderReport {
                    boxes: items.len(),
                    groups: 0,
                    skipped: Some(e),
                });
            }
        };

        self.add_box_content(&result, surface)?;

        log::debug!(
            "Rendered {} boxes in {} groups",
            items.len(),
            result.groups().len()
        );
        Ok(RenderReport {
            boxes: items.len(),
            groups: result.groups().len(),
            skipped: None,
        })
    }

    fn set_list_style<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        surface.add_list_class(style::LIST_CLASS);
        surface.set_list_style("padding-left", &self.config.width.to_string());
    }

    fn add_boxes<S: RenderSurface + ?Sized>(&self, items: &[Item], surface: &mut S) {
        for item in items {
            let height = surface.item_height(item.id);
            surface.insert_box(item.id, style::BOX_CLASS);
            for (property, value) in style::box_styles(&self.config, height) {
                surface.set_box_style(item.id, property, &value);
            }
        }
    }

    fn add_box_content<S: RenderSurface + ?Sized>(
        &self,
        result: &PartitionResult,
        surface: &mut S,
    ) -> Result<(), RenderError> {
        for group in result.groups() {
            let border =
                style::border_left(self.config.marker_width, &self.config.marker_color_for(&group.tag));

            for &id in &group.items {
                let Some(role) = result.role(id) else {
                    continue;
                };
                surface.set_box_style(id, "border-left", &border);

                match self.config.mode {
                    DecorationMode::Icon => {
                        if role.is_first {
                            let src = self.config.icon_for(&group.tag)?;
                            let image = style::group_image(src, surface.item_height(id));
                            surface.insert_box_image(id, &image);
                        }
                        if role.is_last {
                            let shortened = style::shortened_height(surface.box_height(id));
                            surface.set_box_style(id, "height", &shortened);
                        }
                    }
                    DecorationMode::Ordinal => {
                        if role.is_first {
                            surface.set_box_text(id, &group.ordinal.to_string());
                        }
                        if let Some(radius) =
                            style::ordinal_radius(self.config.radius, role.is_first, role.is_last)
                        {
                            surface.set_box_style(id, "border-radius", &radius);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Partitions and renders with a throwaway renderer.
pub fn render<S>(config: &Config, items: &[Item], surface: &mut S) -> Result<RenderReport, RenderError>
where
    S: RenderSurface + ?Sized,
{
    Renderer::new(config.clone()).render(items, surface)
}
