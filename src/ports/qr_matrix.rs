//! QR matrix port: turns a text payload into a grid of dark/light modules.

use image::{Rgba, RgbaImage};

use crate::error::GenerateError;

/// Error-correction level requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcLevel {
    /// ~7% recovery.
    L,
    /// ~15% recovery.
    M,
    /// ~25% recovery.
    Q,
    /// ~30% recovery.
    H,
}

/// Pixel size of one module in the base raster.
pub const BASE_MODULE_PX: u32 = 10;

/// Quiet-zone width, in modules, of the base raster.
pub const BASE_QUIET_ZONE: u32 = 2;

/// A square QR grid, row-major, `true` meaning a dark module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    modules: Vec<bool>,
}

impl QrMatrix {
    /// Build a matrix from row-major modules.
    ///
    /// # Errors
    ///
    /// Returns an error if `modules` is not `width * width` long.
    pub fn new(width: usize, modules: Vec<bool>) -> Result<Self, GenerateError> {
        if width == 0 || modules.len() != width * width {
            return Err(GenerateError::Encode(format!(
                "matrix of {} modules is not a {width}x{width} square",
                modules.len()
            )));
        }
        Ok(Self { width, modules })
    }

    /// Number of modules per side.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the module at column `x`, row `y` is dark.
    #[must_use]
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.modules[y * self.width + x]
    }

    /// Side length in pixels of the raster produced by [`QrMatrix::base_image`].
    #[must_use]
    pub fn base_side(&self) -> u32 {
        (self.width as u32 + 2 * BASE_QUIET_ZONE) * BASE_MODULE_PX
    }

    /// Render the base raster: 10 px modules with a two-module quiet zone.
    #[must_use]
    pub fn base_image(&self, dark: Rgba<u8>, light: Rgba<u8>) -> RgbaImage {
        self.render(BASE_MODULE_PX, BASE_QUIET_ZONE, dark, light)
    }

    /// Render the matrix with a given module size and quiet zone.
    #[must_use]
    pub fn render(&self, module_px: u32, quiet_zone: u32, dark: Rgba<u8>, light: Rgba<u8>) -> RgbaImage {
        let side = (self.width as u32 + 2 * quiet_zone) * module_px;
        RgbaImage::from_fn(side, side, |px, py| {
            let mx = (px / module_px).checked_sub(quiet_zone);
            let my = (py / module_px).checked_sub(quiet_zone);
            match (mx, my) {
                (Some(mx), Some(my)) if self.is_dark(mx as usize, my as usize) => dark,
                _ => light,
            }
        })
    }
}

/// Encodes payloads into QR matrices.
pub trait QrMatrixProvider {
    /// Encode `payload` at the requested error-correction level.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Encode`] if the payload does not fit any QR version.
    fn encode(&self, payload: &str, level: EcLevel) -> Result<QrMatrix, GenerateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn checker(width: usize) -> QrMatrix {
        let modules = (0..width * width).map(|i| (i % width + i / width) % 2 == 0).collect();
        QrMatrix::new(width, modules).unwrap()
    }

    #[test]
    fn rejects_non_square_modules() {
        assert!(QrMatrix::new(3, vec![true; 8]).is_err());
        assert!(QrMatrix::new(0, vec![]).is_err());
    }

    #[test]
    fn out_of_range_is_light() {
        let m = checker(3);
        assert!(m.is_dark(0, 0));
        assert!(!m.is_dark(1, 0));
        assert!(!m.is_dark(3, 0));
        assert!(!m.is_dark(0, 7));
    }

    #[test]
    fn base_image_has_quiet_zone() {
        let m = checker(21);
        let img = m.base_image(BLACK, WHITE);
        assert_eq!(img.width(), m.base_side());
        assert_eq!(img.width(), (21 + 4) * 10);
        // Quiet zone corner stays light, first module is dark.
        assert_eq!(*img.get_pixel(0, 0), WHITE);
        assert_eq!(*img.get_pixel(19, 19), WHITE);
        assert_eq!(*img.get_pixel(20, 20), BLACK);
        assert_eq!(*img.get_pixel(29, 29), BLACK);
        assert_eq!(*img.get_pixel(30, 20), WHITE);
    }

    #[test]
    fn render_custom_module_size() {
        let m = checker(5);
        let img = m.render(3, 1, BLACK, WHITE);
        assert_eq!(img.dimensions(), (21, 21));
        assert_eq!(*img.get_pixel(3, 3), BLACK);
        assert_eq!(*img.get_pixel(6, 3), WHITE);
    }
}
