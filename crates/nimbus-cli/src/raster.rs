//! Software rasterizer implementing `Canvas` over an RGBA image
//!
//! Good enough for previews: convex polygons and circles are sampled at pixel
//! centers without anti-aliasing, and composited source-over.

use image::{Rgba, RgbaImage};
use nimbus_core::{Canvas, Color, Rect};
use nimbus_engine::Surface;
use std::sync::{Arc, Mutex, PoisonError};

/// 2D affine transform mapping (x, y) to (a·x + c·y + e, b·x + d·y + f)
#[derive(Clone, Copy, Debug, PartialEq)]
struct Affine {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Affine {
    const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Clockwise rotation (y axis pointing down) by `degrees` around (`px`, `py`)
    fn rotation_about(degrees: f32, px: f32, py: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: px - cos * px + sin * py,
            f: py - sin * px - cos * py,
        }
    }

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// `self ∘ inner`: apply `inner` first
    fn then_inner(&self, inner: &Affine) -> Affine {
        Affine {
            a: self.a * inner.a + self.c * inner.b,
            b: self.b * inner.a + self.d * inner.b,
            c: self.a * inner.c + self.c * inner.d,
            d: self.b * inner.c + self.d * inner.d,
            e: self.a * inner.e + self.c * inner.f + self.e,
            f: self.b * inner.e + self.d * inner.f + self.f,
        }
    }

    /// Uniform scale factor (1 for pure rotations)
    fn scale(&self) -> f32 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }
}

/// A [`Canvas`] that rasterizes into an [`RgbaImage`]
pub struct RasterCanvas {
    image: RgbaImage,
    transform: Affine,
    stack: Vec<Affine>,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
            transform: Affine::IDENTITY,
            stack: Vec::new(),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Drop any transform left over from an unbalanced frame
    pub fn reset_transform(&mut self) {
        self.transform = Affine::IDENTITY;
        self.stack.clear();
    }

    fn blend(&mut self, x: u32, y: u32, color: Color) {
        let pixel = self.image.get_pixel_mut(x, y);
        blend_over(pixel, color);
    }

    /// Fill a convex polygon given in device space
    fn fill_convex(&mut self, points: &[(f32, f32)], color: Color) {
        if points.len() < 3 || color.a <= 0.0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(points.iter().copied()) else {
            return;
        };

        let area: f32 = edges(points).map(|((ax, ay), (bx, by))| ax * by - bx * ay).sum();
        let winding = if area < 0.0 { -1.0 } else { 1.0 };

        for py in y0..y1 {
            for px in x0..x1 {
                let (sx, sy) = (px as f32 + 0.5, py as f32 + 0.5);
                let inside = edges(points).all(|((ax, ay), (bx, by))| {
                    let cross = (bx - ax) * (sy - ay) - (by - ay) * (sx - ax);
                    cross * winding >= 0.0
                });
                if inside {
                    self.blend(px, py, color);
                }
            }
        }
    }

    /// Pixel range covering `points`, clipped to the image
    fn pixel_bounds(
        &self,
        points: impl Iterator<Item = (f32, f32)>,
    ) -> Option<(u32, u32, u32, u32)> {
        let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
        let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for (x, y) in points {
            if !x.is_finite() || !y.is_finite() {
                return None;
            }
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        let (w, h) = (self.image.width() as f32, self.image.height() as f32);
        let x0 = min_x.floor().clamp(0.0, w) as u32;
        let y0 = min_y.floor().clamp(0.0, h) as u32;
        let x1 = max_x.ceil().clamp(0.0, w) as u32;
        let y1 = max_y.ceil().clamp(0.0, h) as u32;
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}

fn edges(points: &[(f32, f32)]) -> impl Iterator<Item = ((f32, f32), (f32, f32))> + '_ {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
}

/// Source-over compositing of a straight-alpha color onto an 8-bit pixel
fn blend_over(pixel: &mut Rgba<u8>, src: Color) {
    let sa = src.a.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let [dr, dg, db, da] = pixel.0.map(|c| c as f32 / 255.0);
    let out_a = sa + da * (1.0 - sa);
    let mix = |s: f32, d: f32| (s * sa + d * da * (1.0 - sa)) / out_a;
    *pixel = Rgba(
        Color::new(mix(src.r, dr), mix(src.g, dg), mix(src.b, db), out_a).to_rgba8(),
    );
}

impl Canvas for RasterCanvas {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    fn fill(&mut self, color: Color) {
        if color.a <= 0.0 {
            return;
        }
        for pixel in self.image.pixels_mut() {
            blend_over(pixel, color);
        }
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(saved) = self.stack.pop() {
            self.transform = saved;
        }
    }

    fn rotate(&mut self, degrees: f32, px: f32, py: f32) {
        let rotation = Affine::rotation_about(degrees, px, py);
        self.transform = self.transform.then_inner(&rotation);
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let length = (dx * dx + dy * dy).sqrt();
        if !(length > 0.0) {
            return;
        }
        let half = width.max(1.0) * 0.5;
        let (nx, ny) = (-dy / length * half, dx / length * half);
        let corners = [
            (from.0 + nx, from.1 + ny),
            (to.0 + nx, to.1 + ny),
            (to.0 - nx, to.1 - ny),
            (from.0 - nx, from.1 - ny),
        ]
        .map(|(x, y)| self.transform.apply(x, y));
        self.fill_convex(&corners, color);
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        if color.a <= 0.0 || !(radius > 0.0) {
            return;
        }
        let (cx, cy) = self.transform.apply(cx, cy);
        let r = radius * self.transform.scale();
        let Some((x0, y0, x1, y1)) =
            self.pixel_bounds([(cx - r, cy - r), (cx + r, cy + r)].into_iter())
        else {
            return;
        };
        let r2 = r * r;
        for py in y0..y1 {
            for px in x0..x1 {
                let (dx, dy) = (px as f32 + 0.5 - cx, py as f32 + 0.5 - cy);
                if dx * dx + dy * dy <= r2 {
                    self.blend(px, py, color);
                }
            }
        }
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        let corners = [
            (rect.left, rect.top),
            (rect.right, rect.top),
            (rect.right, rect.bottom),
            (rect.left, rect.bottom),
        ]
        .map(|(x, y)| self.transform.apply(x, y));
        self.fill_convex(&corners, color);
    }
}

/// Latest posted image, shared with whoever owns the surface
pub type PostedImage = Arc<Mutex<Option<RgbaImage>>>;

/// In-memory [`Surface`] that keeps a copy of the last posted frame
pub struct RasterSurface {
    canvas: RasterCanvas,
    posted: PostedImage,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> (Self, PostedImage) {
        let posted: PostedImage = Arc::new(Mutex::new(None));
        let surface = Self {
            canvas: RasterCanvas::new(width, height),
            posted: Arc::clone(&posted),
        };
        (surface, posted)
    }
}

impl Surface for RasterSurface {
    fn lock_canvas(&mut self) -> Option<&mut dyn Canvas> {
        self.canvas.reset_transform();
        Some(&mut self.canvas)
    }

    fn unlock_and_post(&mut self) {
        let image = self.canvas.image().clone();
        *self.posted.lock().unwrap_or_else(PoisonError::into_inner) = Some(image);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-3 && (a.1 - b.1).abs() < 1e-3
    }

    #[test]
    fn rotation_is_clockwise_on_screen() {
        let r = Affine::rotation_about(90.0, 0.0, 0.0);
        // +x rotates onto +y (downwards)
        assert!(approx(r.apply(1.0, 0.0), (0.0, 1.0)));
        let r = Affine::rotation_about(180.0, 5.0, 5.0);
        assert!(approx(r.apply(6.0, 5.0), (4.0, 5.0)));
        assert!(approx(r.apply(5.0, 5.0), (5.0, 5.0)));
    }

    #[test]
    fn composed_rotations_add_up() {
        let a = Affine::rotation_about(30.0, 2.0, 3.0);
        let b = Affine::rotation_about(60.0, 2.0, 3.0);
        let both = a.then_inner(&b);
        let direct = Affine::rotation_about(90.0, 2.0, 3.0);
        assert!(approx(both.apply(7.0, -1.0), direct.apply(7.0, -1.0)));
        assert!((both.scale() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn fill_and_clear() {
        let mut canvas = RasterCanvas::new(4, 4);
        canvas.fill(Color::rgb(255, 0, 0));
        assert_eq!(canvas.image().get_pixel(2, 2).0, [255, 0, 0, 255]);
        canvas.clear();
        assert_eq!(canvas.image().get_pixel(2, 2).0, [0, 0, 0, 0]);
    }

    #[test]
    fn half_alpha_composites_over_opaque() {
        let mut canvas = RasterCanvas::new(2, 2);
        canvas.fill(Color::WHITE);
        canvas.fill(Color::BLACK.with_alpha(0.5));
        let [r, g, b, a] = canvas.image().get_pixel(0, 0).0;
        assert!((r as i32 - 128).abs() <= 1);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(a, 255);
    }

    #[test]
    fn translucent_over_transparent_keeps_color() {
        let mut canvas = RasterCanvas::new(1, 1);
        canvas.fill(Color::rgb(0, 0, 255).with_alpha(0.25));
        let [r, _, b, a] = canvas.image().get_pixel(0, 0).0;
        assert_eq!((r, b), (0, 255));
        assert!((a as i32 - 64).abs() <= 1);
    }

    #[test]
    fn circle_covers_center_not_corners() {
        let mut canvas = RasterCanvas::new(20, 20);
        canvas.draw_circle(10.0, 10.0, 5.0, Color::WHITE);
        assert_eq!(canvas.image().get_pixel(10, 10).0[3], 255);
        assert_eq!(canvas.image().get_pixel(0, 0).0[3], 0);
        assert_eq!(canvas.image().get_pixel(14, 14).0[3], 0);
    }

    #[test]
    fn rotated_line_becomes_vertical() {
        let mut canvas = RasterCanvas::new(21, 21);
        canvas.save();
        canvas.rotate(90.0, 10.5, 10.5);
        canvas.draw_line((2.0, 10.5), (19.0, 10.5), 3.0, Color::WHITE);
        canvas.restore();
        assert_eq!(canvas.image().get_pixel(10, 4).0[3], 255);
        assert_eq!(canvas.image().get_pixel(10, 16).0[3], 255);
        assert_eq!(canvas.image().get_pixel(4, 10).0[3], 0);
        assert_eq!(canvas.transform, Affine::IDENTITY);
    }

    #[test]
    fn rect_fills_its_pixels() {
        let mut canvas = RasterCanvas::new(10, 10);
        canvas.draw_rect(Rect::new(2.0, 2.0, 6.0, 5.0), Color::WHITE);
        let covered = canvas.image().pixels().filter(|p| p.0[3] > 0).count();
        assert_eq!(covered, 4 * 3);
    }

    #[test]
    fn offscreen_shapes_are_ignored() {
        let mut canvas = RasterCanvas::new(8, 8);
        canvas.draw_circle(-50.0, -50.0, 4.0, Color::WHITE);
        canvas.draw_rect(Rect::new(100.0, 100.0, 120.0, 120.0), Color::WHITE);
        canvas.draw_line((0.0, 0.0), (0.0, 0.0), 2.0, Color::WHITE);
        assert!(canvas.image().pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn surface_posts_a_copy() {
        let (mut surface, posted) = RasterSurface::new(6, 6);
        let canvas = surface.lock_canvas().unwrap();
        canvas.fill(Color::WHITE);
        surface.unlock_and_post();
        let image = posted.lock().unwrap().clone().unwrap();
        assert_eq!(image.get_pixel(3, 3).0, [255, 255, 255, 255]);
    }
}
