use crate::foundation::core::{Affine, BezPath, Canvas, Color, Point};
use crate::foundation::error::{CoverError, CoverResult};
use crate::render::surface::{FrameRGBA, StrokeStyle, Surface, TextPaint, TextStyle, TransformStack};

/// One draw call captured by [`RecordingSurface`], with the transform in effect at the time.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillPath {
        path: BezPath,
        transform: Affine,
        color: Color,
    },
    StrokePath {
        path: BezPath,
        transform: Affine,
        color: Color,
        stroke: StrokeStyle,
    },
    Text {
        text: String,
        style: TextStyle,
        center: Point,
        transform: Affine,
        paint: TextPaint,
    },
}

impl DrawCommand {
    pub fn transform(&self) -> Affine {
        match self {
            DrawCommand::FillPath { transform, .. }
            | DrawCommand::StrokePath { transform, .. }
            | DrawCommand::Text { transform, .. } => *transform,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            DrawCommand::FillPath { color, .. } | DrawCommand::StrokePath { color, .. } => *color,
            DrawCommand::Text { paint, .. } => match paint {
                TextPaint::Fill(c) => *c,
                TextPaint::Stroke { color, .. } => *color,
            },
        }
    }
}

/// Surface that records draw calls instead of rasterizing them.
///
/// Used by tests and for debugging draw order; it has no pixels to read back.
#[derive(Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    stack: TransformStack,
    commands: Vec<DrawCommand>,
    in_frame: bool,
    frames: u64,
}

impl RecordingSurface {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            stack: TransformStack::default(),
            commands: Vec::new(),
            in_frame: false,
            frames: 0,
        }
    }

    /// Commands of the current (or last finished) frame, in submission order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Current `save` nesting depth.
    pub fn save_depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn current_transform(&self) -> Affine {
        self.stack.current()
    }
}

impl Surface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn begin_frame(&mut self) {
        self.commands.clear();
        self.stack.reset();
        self.in_frame = true;
    }

    fn finish_frame(&mut self) -> CoverResult<()> {
        if !self.in_frame {
            return Err(CoverError::render("finish_frame without begin_frame"));
        }
        self.in_frame = false;
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
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            transform: self.stack.current(),
            color,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, stroke: StrokeStyle) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            transform: self.stack.current(),
            color,
            stroke,
        });
    }

    fn draw_text(&mut self, text: &str, style: TextStyle, center: Point, paint: TextPaint) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            style,
            center,
            transform: self.stack.current(),
            paint,
        });
    }

    fn read_pixels(&self) -> Option<FrameRGBA> {
        None
    }

    fn frames_rendered(&self) -> u64 {
        self.frames
    }
}
