//! In-memory canvas and the drawing primitives designs are built from.

use std::fmt;

use image::{imageops, Rgba, RgbaImage};

use crate::error::GenerateError;
use crate::fonts::FontHandle;

/// An axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Direction a linear gradient runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientDirection {
    /// `from` at the top edge, `to` at the bottom edge.
    Vertical,
    /// `from` at the left edge, `to` at the right edge.
    Horizontal,
}

/// A mutable RGBA raster with bounds-checked drawing primitives.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    /// Allocate a canvas filled with `background`.
    #[must_use]
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self { pixels: RgbaImage::from_pixel(width, height, background) }
    }

    /// Canvas width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Canvas height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Give up the canvas, returning its pixels.
    #[must_use]
    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }

    /// Fail unless `rect` lies entirely inside the canvas.
    fn check(&self, rect: Rect) -> Result<(), GenerateError> {
        let fits_x = rect.x.checked_add(rect.width).is_some_and(|r| r <= self.width());
        let fits_y = rect.y.checked_add(rect.height).is_some_and(|b| b <= self.height());
        if fits_x && fits_y {
            Ok(())
        } else {
            Err(GenerateError::OutOfBounds {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                canvas_width: self.width(),
                canvas_height: self.height(),
            })
        }
    }

    /// Fill `rect` with a solid color, replacing what was there.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::OutOfBounds`] if `rect` exceeds the canvas.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) -> Result<(), GenerateError> {
        self.check(rect)?;
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                self.pixels.put_pixel(x, y, color);
            }
        }
        Ok(())
    }

    /// Fill `rect` with rounded corners of the given radius.
    ///
    /// Corner edges are anti-aliased by sampling each pixel on a 4x4 grid.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::OutOfBounds`] if `rect` exceeds the canvas.
    pub fn fill_rounded_rect(
        &mut self,
        rect: Rect,
        radius: u32,
        color: Rgba<u8>,
    ) -> Result<(), GenerateError> {
        self.check(rect)?;
        let radius = radius.min(rect.width / 2).min(rect.height / 2) as f32;
        let (w, h) = (rect.width as f32, rect.height as f32);
        for dy in 0..rect.height {
            for dx in 0..rect.width {
                let coverage = corner_coverage(dx as f32, dy as f32, w, h, radius);
                if coverage > 0.0 {
                    self.blend(rect.x + dx, rect.y + dy, color, coverage);
                }
            }
        }
        Ok(())
    }

    /// Fill `rect` with a two-color linear gradient.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::OutOfBounds`] if `rect` exceeds the canvas.
    pub fn fill_gradient(
        &mut self,
        rect: Rect,
        from: Rgba<u8>,
        to: Rgba<u8>,
        direction: GradientDirection,
    ) -> Result<(), GenerateError> {
        self.check(rect)?;
        let span = match direction {
            GradientDirection::Vertical => rect.height,
            GradientDirection::Horizontal => rect.width,
        };
        let denom = span.saturating_sub(1).max(1) as f32;
        for dy in 0..rect.height {
            for dx in 0..rect.width {
                let step = match direction {
                    GradientDirection::Vertical => dy,
                    GradientDirection::Horizontal => dx,
                };
                let color = lerp(from, to, step as f32 / denom);
                self.pixels.put_pixel(rect.x + dx, rect.y + dy, color);
            }
        }
        Ok(())
    }

    /// Copy `image` onto the canvas with its top-left corner at (`x`, `y`).
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::OutOfBounds`] if the image does not fit.
    pub fn paste(&mut self, image: &RgbaImage, x: u32, y: u32) -> Result<(), GenerateError> {
        self.check(Rect::new(x, y, image.width(), image.height()))?;
        imageops::replace(&mut self.pixels, image, i64::from(x), i64::from(y));
        Ok(())
    }

    /// Draw one line of text with its top-left corner at (`x`, `y`).
    ///
    /// Glyphs falling outside the canvas are clipped rather than rejected.
    pub fn draw_text(&mut self, font: &FontHandle, x: f32, y: f32, text: &str, color: Rgba<u8>) {
        let limit = self.height();
        self.draw_text_above(font, x, y, text, color, limit);
    }

    /// Like [`Canvas::draw_text`], but nothing is painted on row `limit` or below.
    pub fn draw_text_above(&mut self, font: &FontHandle, x: f32, y: f32, text: &str, color: Rgba<u8>, limit: u32) {
        let width = self.width() as i32;
        let limit = limit.min(self.height()) as i32;
        font.rasterize(text, x, y, |px, py, coverage| {
            if px >= 0 && py >= 0 && px < width && py < limit && coverage > 0.0 {
                self.blend(px as u32, py as u32, color, coverage.min(1.0));
            }
        });
    }

    /// Sharpen the canvas the way a sharpness enhancer does.
    ///
    /// The image is blended away from a smoothed copy by `factor`: `1.0`
    /// leaves it untouched, larger values sharpen. Border pixels and alpha are
    /// kept as they were.
    pub fn sharpen(&mut self, factor: f32) {
        const SMOOTH: [f32; 9] = [
            1.0 / 13.0,
            1.0 / 13.0,
            1.0 / 13.0,
            1.0 / 13.0,
            5.0 / 13.0,
            1.0 / 13.0,
            1.0 / 13.0,
            1.0 / 13.0,
            1.0 / 13.0,
        ];
        let (width, height) = self.pixels.dimensions();
        if width < 3 || height < 3 {
            return;
        }
        let smooth = imageops::filter3x3(&self.pixels, &SMOOTH);
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let degenerate = smooth.get_pixel(x, y);
                let pixel = self.pixels.get_pixel_mut(x, y);
                for c in 0..3 {
                    let sharp = f32::from(degenerate[c])
                        + factor * (f32::from(pixel[c]) - f32::from(degenerate[c]));
                    pixel[c] = sharp.round().clamp(0.0, 255.0) as u8;
                }
            }
        }
    }

    /// Composite `color` over the pixel at (`x`, `y`) with extra `coverage`.
    fn blend(&mut self, x: u32, y: u32, color: Rgba<u8>, coverage: f32) {
        let alpha = f32::from(color[3]) / 255.0 * coverage;
        if alpha <= 0.0 {
            return;
        }
        let dst = self.pixels.get_pixel_mut(x, y);
        let dst_alpha = f32::from(dst[3]) / 255.0;
        let out_alpha = alpha + dst_alpha * (1.0 - alpha);
        for c in 0..3 {
            let value = (f32::from(color[c]) * alpha
                + f32::from(dst[c]) * dst_alpha * (1.0 - alpha))
                / out_alpha;
            dst[c] = value.round().clamp(0.0, 255.0) as u8;
        }
        dst[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

/// Linear interpolation between two colors, `t` in `0.0..=1.0`.
#[must_use]
pub fn lerp(from: Rgba<u8>, to: Rgba<u8>, t: f32) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
    Rgba([mix(from[0], to[0]), mix(from[1], to[1]), mix(from[2], to[2]), mix(from[3], to[3])])
}

/// Fraction of the pixel at (`px`, `py`) inside a `w`x`h` rounded rectangle.
fn corner_coverage(px: f32, py: f32, w: f32, h: f32, radius: f32) -> f32 {
    const SAMPLES: u32 = 4;
    if radius <= 0.0 {
        return 1.0;
    }
    let in_corner_band = |v: f32, extent: f32| v < radius || v + 1.0 > extent - radius;
    if !(in_corner_band(px, w) && in_corner_band(py, h)) {
        return 1.0;
    }
    let mut inside = 0;
    for sy in 0..SAMPLES {
        for sx in 0..SAMPLES {
            let x = px + (sx as f32 + 0.5) / SAMPLES as f32;
            let y = py + (sy as f32 + 0.5) / SAMPLES as f32;
            let cx = x.clamp(radius, w - radius);
            let cy = y.clamp(radius, h - radius);
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= radius * radius {
                inside += 1;
            }
        }
    }
    inside as f32 / (SAMPLES * SAMPLES) as f32
}
