use std::path::Path;

use kurbo::{Point, Rect};

use crate::{
    color::Rgb,
    error::{SpiroError, SpiroResult},
    surface::Surface,
};

#[derive(Clone, Debug)]
enum DrawOp {
    Segment {
        from: Point,
        to: Point,
        color: Rgb,
        thickness: f64,
    },
    Oval {
        rect: Rect,
        outline: Rgb,
        dash: Vec<f64>,
    },
}

/// CPU raster surface: records draw ops and rasterizes them over an opaque
/// background when an image is requested. Recording keeps `clear()` cheap and
/// lets playback re-draw overlays without touching pixels until export.
#[derive(Debug)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    background: Rgb,
    ops: Vec<DrawOp>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, background: Rgb) -> SpiroResult<Self> {
        if width == 0 || height == 0 {
            return Err(SpiroError::render("surface dimensions must be > 0"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(SpiroError::render(format!(
                "surface {width}x{height} exceeds the {} pixel side limit",
                u16::MAX
            )));
        }
        Ok(Self {
            width,
            height,
            background,
            ops: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn op_count(&self) -> usize {
        self.ops.len()
    }

    fn rasterize(&self) -> SpiroResult<vello_cpu::Pixmap> {
        use vello_cpu::kurbo::Shape as _;

        let width = self.width as u16;
        let height = self.height as u16;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            self.background.r,
            self.background.g,
            self.background.b,
            255,
        ));
        let full = vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height));
        ctx.fill_path(&full.to_path(0.1));

        for op in &self.ops {
            match op {
                DrawOp::Segment {
                    from,
                    to,
                    color,
                    thickness,
                } => {
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        color.r, color.g, color.b, 255,
                    ));
                    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*thickness));
                    let mut path = vello_cpu::kurbo::BezPath::new();
                    path.move_to(point_to_cpu(*from));
                    path.line_to(point_to_cpu(*to));
                    ctx.stroke_path(&path);
                }
                DrawOp::Oval {
                    rect,
                    outline,
                    dash,
                } => {
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        outline.r, outline.g, outline.b, 255,
                    ));
                    let stroke = vello_cpu::kurbo::Stroke::new(1.0)
                        .with_dashes(0.0, dash.iter().copied());
                    ctx.set_stroke(stroke);
                    let ellipse = vello_cpu::kurbo::Ellipse::from_rect(rect_to_cpu(*rect));
                    ctx.stroke_path(&ellipse.to_path(0.1));
                }
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);
        Ok(pixmap)
    }

    /// Rasterizes the recorded ops to a straight-alpha RGBA image. The
    /// background is opaque, so the premultiplied pixmap bytes carry full
    /// alpha and can be taken as-is.
    pub fn to_image(&self) -> SpiroResult<image::RgbaImage> {
        let pixmap = self.rasterize()?;
        let data = pixmap.data_as_u8_slice().to_vec();
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| SpiroError::render("pixmap byte length mismatch"))
    }

    pub fn save_png(&self, path: &Path) -> SpiroResult<()> {
        let img = self.to_image()?;
        image::save_buffer_with_format(
            path,
            img.as_raw(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| SpiroError::render(format!("write png '{}': {e}", path.display())))
    }
}

impl Surface for RasterSurface {
    fn draw_segment(
        &mut self,
        from: Point,
        to: Point,
        color: Rgb,
        thickness: f64,
    ) -> SpiroResult<()> {
        if !(thickness > 0.0) {
            return Err(SpiroError::invalid_parameter("line thickness must be > 0"));
        }
        self.ops.push(DrawOp::Segment {
            from,
            to,
            color,
            thickness,
        });
        Ok(())
    }

    fn draw_oval(&mut self, rect: Rect, outline: Rgb, dash: &[f64]) -> SpiroResult<()> {
        self.ops.push(DrawOp::Oval {
            rect,
            outline,
            dash: dash.to_vec(),
        });
        Ok(())
    }

    fn clear(&mut self) -> SpiroResult<()> {
        self.ops.clear();
        Ok(())
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}
