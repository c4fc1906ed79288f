//! Google-style design: a white square framed by bands of one accent color.

use image::Rgba;

use super::{
    border_bands, scale_qr, ColorMode, ComposedImage, Role, Texts, Theme, ORGANICAL_FONT,
    PATCHWORK_FONT, WHITE,
};
use crate::canvas::{Canvas, Rect};
use crate::error::GenerateError;
use crate::ports::QrMatrix;
use crate::text::Placement;

/// Canvas side length.
pub const SIZE: u32 = 800;

/// Side length of the pasted QR code.
pub const QR_SIZE: u32 = SIZE / 2;

/// Google blue, used for the frame and the QR modules.
pub const ACCENT: Rgba<u8> = Rgba([66, 133, 244, 255]);

/// Compose the Google-style image.
///
/// # Errors
///
/// Returns an error if a drawing primitive is given invalid geometry.
pub fn compose(qr: &QrMatrix, texts: &Texts<'_>, theme: &Theme<'_>) -> Result<ComposedImage, GenerateError> {
    let mut canvas = Canvas::new(SIZE, SIZE, WHITE);
    for band in border_bands(SIZE) {
        canvas.fill_rect(band, ACCENT)?;
    }

    let code = scale_qr(&qr.base_image(ACCENT, WHITE), QR_SIZE);
    let offset = (SIZE - QR_SIZE) / 2;
    canvas.paste(&code, offset, offset)?;

    // Title and subtitle stay in the top band.
    let top = Placement::left(10.0, 10.0).above(offset);
    theme.draw(&mut canvas, Role::Title, texts.title, PATCHWORK_FONT, 50, top, WHITE);
    let sub = Placement::left(20.0, 110.0).above(offset);
    theme.draw(&mut canvas, Role::Subtitle, texts.subtitle, ORGANICAL_FONT, 50, sub, WHITE);
    theme.draw(
        &mut canvas,
        Role::Footer,
        texts.footer,
        PATCHWORK_FONT,
        40,
        Placement::left((SIZE / 4) as f32, (SIZE - 150) as f32),
        WHITE,
    );

    Ok(ComposedImage {
        pixels: canvas.into_pixels(),
        color_mode: ColorMode::Rgb,
        qr_region: Rect::new(offset, offset, QR_SIZE, QR_SIZE),
    })
}
