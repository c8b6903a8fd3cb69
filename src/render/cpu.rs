use crate::foundation::core::{Affine, BezPath, Canvas, Color, Point, Vec2};
use crate::foundation::error::{CoverError, CoverResult};
use crate::render::surface::{
    FrameRGBA, LineCap, LineJoin, StrokeStyle, Surface, TextPaint, TextStyle, TransformStack,
};
use crate::render::text::TextEngine;

/// CPU raster surface backed by `vello_cpu`.
///
/// Draw calls are recorded into a `vello_cpu::RenderContext` and rasterized into a premultiplied
/// RGBA8 pixmap on [`Surface::finish_frame`]. The context and pixmap are reused across frames.
pub struct CpuSurface {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    stack: TransformStack,
    text: Option<TextEngine>,
    frames: u64,
}

impl CpuSurface {
    pub fn new(canvas: Canvas) -> CoverResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| CoverError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| CoverError::render("surface height exceeds u16"))?;
        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            stack: TransformStack::default(),
            text: None,
            frames: 0,
        })
    }

    /// Attach a text engine; without one, text draws are skipped.
    pub fn with_text_engine(mut self, engine: Option<TextEngine>) -> Self {
        self.text = engine;
        self
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    fn prepare(&mut self, color: Color) {
        self.ctx.set_transform(affine_to_cpu(self.stack.current()));
        self.ctx.set_paint(color_to_cpu(color));
    }

    fn emit_glyphs(
        &mut self,
        text: &str,
        style: TextStyle,
        transform: Affine,
        color: Color,
        stroke_width: Option<f64>,
    ) -> CoverResult<()> {
        let Some(engine) = self.text.as_mut() else {
            return Ok(());
        };
        let shaped = engine.shape(text, style)?;
        let font = engine.font().clone();

        let origin = Vec2::new(
            -f64::from(shaped.width) / 2.0,
            -f64::from(shaped.height) / 2.0,
        );
        self.ctx
            .set_transform(affine_to_cpu(transform * Affine::translate(origin)));
        self.ctx.set_paint(color_to_cpu(color));
        if let Some(width) = stroke_width {
            self.ctx.set_stroke(
                vello_cpu::kurbo::Stroke::new(width).with_join(vello_cpu::kurbo::Join::Round),
            );
        }

        for line in shaped.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                let builder = self
                    .ctx
                    .glyph_run(&font)
                    .font_size(run.run().font_size());
                if stroke_width.is_some() {
                    builder.stroke_glyphs(glyphs);
                } else {
                    builder.fill_glyphs(glyphs);
                }
            }
        }
        Ok(())
    }
}

impl Surface for CpuSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn begin_frame(&mut self) {
        self.ctx.reset();
        self.stack.reset();
    }

    fn finish_frame(&mut self) -> CoverResult<()> {
        clear_pixmap_to_transparent(&mut self.pixmap);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        self.frames += 1;
        Ok(())
    }

    fn save(&mut self) {
        self.stack.save();
    }

    fn restore(&mut self) {
        self.stack.restore();
    }

    fn transform(&mut self, affine: Affine) {
        self.stack.apply(affine);
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.prepare(color);
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, stroke: StrokeStyle) {
        self.prepare(color);
        self.ctx.set_stroke(stroke_to_cpu(stroke));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn draw_text(&mut self, text: &str, style: TextStyle, center: Point, paint: TextPaint) {
        let base = self.stack.current() * Affine::translate(center.to_vec2());
        let result = match paint {
            TextPaint::Fill(color) => self.emit_glyphs(text, style, base, color, None),
            TextPaint::Stroke {
                color,
                width,
                shadow,
            } => {
                let shadow_pass = match shadow {
                    Some(s) => self.emit_glyphs(
                        text,
                        style,
                        Affine::translate(s.offset) * base,
                        s.color,
                        Some(width),
                    ),
                    None => Ok(()),
                };
                shadow_pass.and_then(|()| self.emit_glyphs(text, style, base, color, Some(width)))
            }
        };
        if let Err(err) = result {
            tracing::warn!(error = %err, text, "skipping text draw");
        }
    }

    fn read_pixels(&self) -> Option<FrameRGBA> {
        if self.frames == 0 {
            return None;
        }
        Some(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

fn clear_pixmap_to_transparent(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn color_to_cpu(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn stroke_to_cpu(s: StrokeStyle) -> vello_cpu::kurbo::Stroke {
    let join = match s.join {
        LineJoin::Miter => vello_cpu::kurbo::Join::Miter,
        LineJoin::Round => vello_cpu::kurbo::Join::Round,
    };
    let cap = match s.cap {
        LineCap::Butt => vello_cpu::kurbo::Cap::Butt,
        LineCap::Round => vello_cpu::kurbo::Cap::Round,
    };
    vello_cpu::kurbo::Stroke::new(s.width)
        .with_join(join)
        .with_caps(cap)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
