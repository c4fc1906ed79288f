//! Custom design: dark gradient backdrop, rounded white QR panel, cyan text.

use image::Rgba;

use super::{ColorMode, ComposedImage, Role, Texts, Theme, CAVIAR_FONT, WHITE};
use crate::canvas::{lerp, Canvas, GradientDirection, Rect};
use crate::error::GenerateError;
use crate::ports::QrMatrix;
use crate::text::Placement;

const BACKGROUND: Rgba<u8> = Rgba([2, 4, 10, 255]);
const GLOW: Rgba<u8> = Rgba([0, 230, 255, 255]);
const QR_FILL: Rgba<u8> = Rgba([0, 200, 230, 255]);

/// Opacity of the cyan glow at the top edge, out of 255.
const GLOW_ALPHA: u8 = 12;

/// White margin around the QR code inside the panel, both sides combined.
const PANEL_PADDING: u32 = 40;
const PANEL_RADIUS: u32 = 30;
/// How far below the vertical center the panel sits.
const PANEL_DROP: u32 = 30;

const SHARPNESS: f32 = 1.3;

/// Canvas size for a QR raster of side `qr_side`.
#[must_use]
pub fn canvas_size(qr_side: u32) -> (u32, u32) {
    let base = qr_side + 200;
    (base * 6 / 5, base * 8 / 5)
}

/// Compose the gradient image.
///
/// # Errors
///
/// Returns an error if a drawing primitive is given invalid geometry.
pub fn compose(qr: &QrMatrix, texts: &Texts<'_>, theme: &Theme<'_>) -> Result<ComposedImage, GenerateError> {
    let code = qr.base_image(QR_FILL, WHITE);
    let qr_side = code.width();
    let (width, height) = canvas_size(qr_side);

    let mut canvas = Canvas::new(width, height, BACKGROUND);
    let top = lerp(BACKGROUND, GLOW, f32::from(GLOW_ALPHA) / 255.0);
    canvas.fill_gradient(Rect::new(0, 0, width, height), top, BACKGROUND, GradientDirection::Vertical)?;

    let panel_side = qr_side + PANEL_PADDING;
    let panel = Rect::new((width - panel_side) / 2, (height - panel_side) / 2 + PANEL_DROP, panel_side, panel_side);
    canvas.fill_rounded_rect(panel, PANEL_RADIUS, WHITE)?;

    let qr_region = Rect::new(panel.x + PANEL_PADDING / 2, panel.y + PANEL_PADDING / 2, qr_side, qr_side);
    canvas.paste(&code, qr_region.x, qr_region.y)?;

    // Title and subtitle end above the panel.
    theme.draw(
        &mut canvas,
        Role::Title,
        texts.title,
        CAVIAR_FONT,
        120,
        Placement::centered(80.0).above(panel.y),
        GLOW,
    );
    theme.draw(
        &mut canvas,
        Role::Subtitle,
        texts.subtitle,
        CAVIAR_FONT,
        45,
        Placement::centered(220.0).above(panel.y),
        Rgba([255, 255, 255, 220]),
    );
    theme.draw(
        &mut canvas,
        Role::Footer,
        texts.footer,
        CAVIAR_FONT,
        35,
        Placement::centered(height.saturating_sub(100) as f32),
        Rgba([0, 230, 255, 200]),
    );

    canvas.sharpen(SHARPNESS);

    Ok(ComposedImage { pixels: canvas.into_pixels(), color_mode: ColorMode::Rgba, qr_region })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::adapters::QrcodeProvider;
    use crate::fonts::FontResolver;
    use crate::ports::{EcLevel, QrMatrixProvider};
    use crate::request::StyleOptions;

    fn compose_with(url: &str, texts: &Texts<'_>) -> ComposedImage {
        let qr = QrcodeProvider.encode(url, EcLevel::H).unwrap();
        let resolver = FontResolver::new(Vec::new());
        let style = StyleOptions::default();
        let theme = Theme { fonts: &resolver, font_dir: Path::new("/nonexistent"), style: &style };
        compose(&qr, texts, &theme).unwrap()
    }

    #[test]
    fn canvas_follows_qr_size() {
        assert_eq!(canvas_size(330), (636, 848));
        let img = compose_with("https://example.com", &Texts::default());
        // Version 3 code: 29 modules plus a 2-module quiet zone on each side, 10 px each.
        assert_eq!(img.pixels.dimensions(), (636, 848));
        assert_eq!(img.qr_region, Rect::new(153, 289, 330, 330));
        assert_eq!(img.color_mode, ColorMode::Rgba);
    }

    #[test]
    fn gradient_runs_top_to_bottom() {
        let img = compose_with("https://example.com", &Texts::default());
        let top = img.pixels.get_pixel(5, 5);
        let bottom = img.pixels.get_pixel(5, 840);
        assert!(top[2] > bottom[2], "top {top:?} should glow more than bottom {bottom:?}");
        assert!(bottom[2] <= 12);
    }

    #[test]
    fn panel_has_rounded_corners() {
        let img = compose_with("https://example.com", &Texts::default());
        let panel = Rect::new(133, 269, 370, 370);
        // Panel corner is background, panel edge midpoints are white.
        assert_ne!(*img.pixels.get_pixel(panel.x + 1, panel.y + 1), WHITE);
        assert_eq!(*img.pixels.get_pixel(panel.x + panel.width / 2, panel.y + 5), WHITE);
        assert_eq!(*img.pixels.get_pixel(panel.x + 5, panel.y + panel.height / 2), WHITE);
    }

    #[test]
    fn title_is_centered_above_panel() {
        let plain = compose_with("https://example.com", &Texts::default());
        let titled = compose_with("https://example.com", &Texts { title: Some("II"), ..Texts::default() });
        let changed: Vec<u32> = (0..plain.pixels.width())
            .filter(|&x| (80..200).any(|y| plain.pixels.get_pixel(x, y) != titled.pixels.get_pixel(x, y)))
            .collect();
        let (first, last) = (changed[0], changed[changed.len() - 1]);
        let center = (first + last) / 2;
        assert!((310..=326).contains(&center), "title centered at {center}");
    }
}
