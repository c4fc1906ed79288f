//! Multicolored design: a white square framed by the four-color palette.

use image::Rgba;

use super::{
    border_bands, scale_qr, ColorMode, ComposedImage, Role, Texts, Theme, CAVIAR_FONT,
    ORGANICAL_FONT, WHITE,
};
use crate::canvas::{Canvas, Rect};
use crate::error::GenerateError;
use crate::ports::QrMatrix;
use crate::text::Placement;

/// Canvas side length.
pub const SIZE: u32 = 500;

/// Side length of the pasted QR code.
pub const QR_SIZE: u32 = 250;

/// Band colors in painting order: top, left, right, bottom.
pub const PALETTE: [Rgba<u8>; 4] = [
    Rgba([66, 133, 244, 255]),
    Rgba([234, 67, 53, 255]),
    Rgba([251, 188, 5, 255]),
    Rgba([52, 168, 83, 255]),
];

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Compose the multicolored image.
///
/// # Errors
///
/// Returns an error if a drawing primitive is given invalid geometry.
pub fn compose(qr: &QrMatrix, texts: &Texts<'_>, theme: &Theme<'_>) -> Result<ComposedImage, GenerateError> {
    let mut canvas = Canvas::new(SIZE, SIZE, WHITE);
    for (band, color) in border_bands(SIZE).into_iter().zip(PALETTE) {
        canvas.fill_rect(band, color)?;
    }

    let code = scale_qr(&qr.base_image(PALETTE[0], WHITE), QR_SIZE);
    let offset = (SIZE - QR_SIZE) / 2;
    canvas.paste(&code, offset, offset)?;

    let title = Placement::left(10.0, 10.0).above(offset);
    theme.draw(&mut canvas, Role::Title, texts.title, CAVIAR_FONT, 40, title, WHITE);
    let subtitle = Placement::left(20.0, 90.0).above(offset);
    theme.draw(&mut canvas, Role::Subtitle, texts.subtitle, ORGANICAL_FONT, 50, subtitle, BLACK);
    theme.draw(&mut canvas, Role::Footer, texts.footer, CAVIAR_FONT, 40, Placement::left(60.0, 390.0), WHITE);

    Ok(ComposedImage {
        pixels: canvas.into_pixels(),
        color_mode: ColorMode::Rgb,
        qr_region: Rect::new(offset, offset, QR_SIZE, QR_SIZE),
    })
}
