use crate::{
    assets::raster::RasterImage,
    editor::overlay::{OutlineState, draw_billboard_outline},
    foundation::core::{Canvas, Rect},
    foundation::error::{BillboardError, BillboardResult},
    render::compositor::{CompositorOpts, composite_banner},
    render::export::encode_png,
    render::surface::DrawingSurface,
    scene::billboard::Billboard,
    scene::catalog::Screenshot,
};

/// Options for [`Scene::render`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOpts {
    /// Draw billboard outlines on top of the composite.
    pub outlines: bool,
    /// Billboard highlighted as active when outlines are drawn.
    pub active: Option<usize>,
    /// Tile compositor settings.
    pub compositor: CompositorOpts,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            outlines: true,
            active: None,
            compositor: CompositorOpts::default(),
        }
    }
}

impl RenderOpts {
    /// Same options with overlays suppressed.
    pub fn without_overlays(self) -> Self {
        Self {
            outlines: false,
            ..self
        }
    }
}

/// Outcome of one [`Scene::render`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Billboards whose banner was composited.
    pub composited: Vec<usize>,
    /// Billboards skipped because their quad or banner was rejected.
    pub skipped: Vec<usize>,
}

/// A screenshot with its billboards and the banners assigned to them.
#[derive(Clone, Debug)]
pub struct Scene {
    canvas: Canvas,
    base: Option<RasterImage>,
    billboards: Vec<Billboard>,
    banners: Vec<Option<RasterImage>>,
}

impl Scene {
    /// Scene over a `canvas`-sized screenshot; at least one billboard is required.
    pub fn new(canvas: Canvas, billboards: Vec<Billboard>) -> BillboardResult<Self> {
        if billboards.is_empty() {
            return Err(BillboardError::validation(
                "scene needs at least one billboard",
            ));
        }
        let banners = vec![None; billboards.len()];
        Ok(Self {
            canvas,
            base: None,
            billboards,
            banners,
        })
    }

    /// Scene for a catalog screenshot.
    pub fn from_screenshot(canvas: Canvas, shot: &Screenshot) -> BillboardResult<Self> {
        Self::new(canvas, shot.to_billboards())
    }

    /// Canvas size (the base screenshot size once one is attached).
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Attach the base screenshot; the canvas follows its size.
    pub fn set_base(&mut self, base: RasterImage) {
        self.canvas = Canvas::new(base.width, base.height);
        self.base = Some(base);
    }

    /// Base screenshot, if attached.
    pub fn base(&self) -> Option<&RasterImage> {
        self.base.as_ref()
    }

    /// All billboards in draw order.
    pub fn billboards(&self) -> &[Billboard] {
        &self.billboards
    }

    /// Billboard at `index`.
    pub fn billboard(&self, index: usize) -> BillboardResult<&Billboard> {
        self.billboards.get(index).ok_or_else(|| out_of_range(index))
    }

    /// Mutable billboard at `index`, e.g. as the target of an editor commit.
    pub fn billboard_mut(&mut self, index: usize) -> BillboardResult<&mut Billboard> {
        self.billboards
            .get_mut(index)
            .ok_or_else(|| out_of_range(index))
    }

    /// Append a billboard without a banner; returns its index.
    pub fn add_billboard(&mut self, billboard: Billboard) -> usize {
        self.billboards.push(billboard);
        self.banners.push(None);
        self.billboards.len() - 1
    }

    /// Remove and return the billboard at `index`. The last billboard cannot be removed.
    pub fn remove_billboard(&mut self, index: usize) -> BillboardResult<Billboard> {
        if index >= self.billboards.len() {
            return Err(out_of_range(index));
        }
        if self.billboards.len() == 1 {
            return Err(BillboardError::validation(
                "cannot remove the last billboard",
            ));
        }
        self.banners.remove(index);
        Ok(self.billboards.remove(index))
    }

    /// Assign (or clear) the banner for billboard `index`.
    pub fn set_banner(&mut self, index: usize, banner: Option<RasterImage>) -> BillboardResult<()> {
        let slot = self
            .banners
            .get_mut(index)
            .ok_or_else(|| out_of_range(index))?;
        *slot = banner;
        Ok(())
    }

    /// Banner for billboard `index`, if any.
    pub fn banner(&self, index: usize) -> Option<&RasterImage> {
        self.banners.get(index)?.as_ref()
    }

    /// Draw the base screenshot, then every billboard that has a banner, then optional
    /// outlines.
    ///
    /// Billboards with a rejected quad or banner are logged and skipped.
    #[tracing::instrument(skip_all, fields(billboards = self.billboards.len(), outlines = opts.outlines))]
    pub fn render<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        opts: &RenderOpts,
    ) -> BillboardResult<RenderReport> {
        let base = self.base.as_ref().ok_or_else(|| {
            BillboardError::missing_content("base screenshot has not been loaded")
        })?;
        opts.compositor.validate()?;

        surface.clear();
        let base_image = surface.upload(base)?;
        let full = Rect::from_origin_size((0.0, 0.0), base.size());
        surface.draw_image(&base_image, full, full);

        let mut report = RenderReport::default();
        for (index, (billboard, banner)) in self.billboards.iter().zip(&self.banners).enumerate() {
            let Some(banner) = banner else {
                continue;
            };
            surface.save();
            let result = composite_banner(surface, &billboard.perspective, banner, &opts.compositor);
            surface.restore();
            match result {
                Ok(_) => report.composited.push(index),
                Err(err) if err.is_local() => {
                    tracing::warn!(index, billboard = %billboard.id, error = %err, "skipping billboard");
                    report.skipped.push(index);
                }
                Err(err) => return Err(err),
            }
        }

        if opts.outlines {
            for (index, billboard) in self.billboards.iter().enumerate() {
                let state = if opts.active == Some(index) {
                    OutlineState::Active
                } else if self.banners[index].is_some() {
                    OutlineState::WithBanner
                } else {
                    OutlineState::Idle
                };
                draw_billboard_outline(surface, &billboard.perspective, state);
            }
        }

        tracing::debug!(
            composited = report.composited.len(),
            skipped = report.skipped.len(),
            "scene rendered"
        );
        Ok(report)
    }

    /// Render without overlays and encode the result as PNG.
    pub fn export_png<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        opts: &RenderOpts,
    ) -> BillboardResult<Vec<u8>> {
        self.render(surface, &opts.without_overlays())?;
        let frame = surface.snapshot()?;
        encode_png(&frame)
    }
}

fn out_of_range(index: usize) -> BillboardError {
    BillboardError::validation(format!("billboard index {index} out of range"))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/compose.rs"]
mod tests;
