//! Color and canvas geometry types

use serde::{Deserialize, Serialize};

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Same color with alpha replaced, clamped to [0, 1]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) },
            ..self
        }
    }

    /// Same color with alpha multiplied by `factor`
    pub fn fade(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor)
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Axis-aligned rectangle in canvas coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle centered on (`cx`, `cy`) with the given half extents
    pub fn centered(cx: f32, cy: f32, half_width: f32, half_height: f32) -> Self {
        Self::new(cx - half_width, cy - half_height, cx + half_width, cy + half_height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f32, f32) {
        ((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }
}

/// Real canvas dimensions plus the oversized square "diagonal space".
///
/// Particles live in a square whose side is the hypotenuse of the real
/// canvas, so the whole scene can be rotated around the canvas center
/// without exposing empty corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasGeometry {
    pub width: f32,
    pub height: f32,
    /// Side length of the diagonal space
    pub canvas_size: f32,
}

impl CanvasGeometry {
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1) as f32;
        let height = height.max(1) as f32;
        Self {
            width,
            height,
            canvas_size: (width * width + height * height).sqrt(),
        }
    }

    /// Offset subtracted from a diagonal-space position to get screen space
    pub fn offset(&self) -> (f32, f32) {
        (
            (self.canvas_size - self.width) * 0.5,
            (self.canvas_size - self.height) * 0.5,
        )
    }

    /// Map a diagonal-space position onto the real canvas
    pub fn to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        let (ox, oy) = self.offset();
        (x - ox, y - oy)
    }

    /// Center of the real canvas
    pub fn center(&self) -> (f32, f32) {
        (self.width * 0.5, self.height * 0.5)
    }

    /// Whether a diagonal-space point lies inside the diagonal canvas,
    /// allowing `margin` of overhang on every side
    pub fn contains(&self, x: f32, y: f32, margin: f32) -> bool {
        x >= -margin && x <= self.canvas_size + margin && y >= -margin && y <= self.canvas_size + margin
    }

    /// Whether the real canvas dimensions match `(width, height)`
    pub fn matches(&self, width: u32, height: u32) -> bool {
        let other = Self::new(width, height);
        self.width == other.width && self.height == other.height
    }
}
