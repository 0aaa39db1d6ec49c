//! 2D drawing surface abstraction
//!
//! Weather models paint through [`Canvas`] only, so the same model code can
//! target an on-screen surface, an offscreen raster, or a recording double.

use crate::types::{Color, Rect};

/// A retained-state 2D canvas with a rotation stack.
///
/// Colors carry straight (non-premultiplied) alpha and are composited
/// source-over onto whatever is already on the canvas.
pub trait Canvas {
    /// Canvas size in pixels (width, height)
    fn size(&self) -> (u32, u32);

    /// Reset every pixel to fully transparent
    fn clear(&mut self);

    /// Composite a solid color over the whole canvas
    fn fill(&mut self, color: Color);

    /// Push the current transform
    fn save(&mut self);

    /// Pop back to the last saved transform
    fn restore(&mut self);

    /// Rotate subsequent drawing by `degrees` (clockwise) around (`px`, `py`)
    fn rotate(&mut self, degrees: f32, px: f32, py: f32);

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color);

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);

    fn draw_rect(&mut self, rect: Rect, color: Color);
}

/// One recorded canvas call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    Fill(Color),
    Save,
    Restore,
    Rotate { degrees: f32, px: f32, py: f32 },
    Line { from: (f32, f32), to: (f32, f32), width: f32, color: Color },
    Circle { cx: f32, cy: f32, radius: f32, color: Color },
    Rect { rect: Rect, color: Color },
}

impl DrawOp {
    /// Color painted by this op, if it paints anything
    pub fn color(&self) -> Option<Color> {
        match self {
            DrawOp::Fill(c) => Some(*c),
            DrawOp::Line { color, .. } | DrawOp::Circle { color, .. } | DrawOp::Rect { color, .. } => {
                Some(*color)
            }
            _ => None,
        }
    }

    /// True for particle-like shapes (lines, circles, rects)
    pub fn is_shape(&self) -> bool {
        matches!(self, DrawOp::Line { .. } | DrawOp::Circle { .. } | DrawOp::Rect { .. })
    }
}

/// Canvas that records every call instead of rasterizing.
///
/// Used by tests and by callers that want to inspect a frame.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// Number of shapes drawn since the last clear
    pub fn shape_count(&self) -> usize {
        self.ops_since_clear().iter().filter(|op| op.is_shape()).count()
    }

    /// Highest alpha painted since the last clear
    pub fn max_alpha(&self) -> f32 {
        self.ops_since_clear()
            .iter()
            .filter_map(DrawOp::color)
            .map(|c| c.a)
            .fold(0.0, f32::max)
    }

    /// Whether save/restore calls are balanced
    pub fn is_balanced(&self) -> bool {
        let mut depth = 0i32;
        for op in &self.ops {
            match op {
                DrawOp::Save => depth += 1,
                DrawOp::Restore => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }

    fn ops_since_clear(&self) -> &[DrawOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| *op == DrawOp::Clear)
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.ops[start..]
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill(&mut self, color: Color) {
        self.ops.push(DrawOp::Fill(color));
    }

    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn rotate(&mut self, degrees: f32, px: f32, py: f32) {
        self.ops.push(DrawOp::Rotate { degrees, px, py });
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.ops.push(DrawOp::Circle {
            cx,
            cy,
            radius,
            color,
        });
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::Rect { rect, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_counts_since_clear() {
        let mut canvas = RecordingCanvas::new(10, 10);
        canvas.draw_circle(1.0, 1.0, 1.0, Color::WHITE);
        canvas.clear();
        canvas.fill(Color::BLACK.with_alpha(0.3));
        canvas.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE.with_alpha(0.5));
        assert_eq!(canvas.shape_count(), 1);
        assert!((canvas.max_alpha() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn recording_balance() {
        let mut canvas = RecordingCanvas::new(10, 10);
        canvas.save();
        canvas.rotate(10.0, 5.0, 5.0);
        canvas.restore();
        assert!(canvas.is_balanced());
        canvas.restore();
        assert!(!canvas.is_balanced());
    }
}
