//! Generator facade: validate, encode, compose, save.

use std::path::PathBuf;

use tracing::{debug, error, info};

use crate::context::GeneratorContext;
use crate::designs::{ComposedImage, Design, Theme};
use crate::error::GenerateError;
use crate::output::{resolve_output_path, save_png};
use crate::ports::EcLevel;
use crate::request::GenerationRequest;

/// Generate the styled QR image for `request` and write it to disk.
///
/// Returns the path of the written PNG.
///
/// # Errors
///
/// Returns an error if the url is missing, the design is unknown, the url
/// cannot be encoded, or the file cannot be written. No output file is left
/// behind on error.
pub fn generate(ctx: &GeneratorContext, request: &GenerationRequest) -> Result<PathBuf, GenerateError> {
    info!(design = %request.design, "generating QR code");
    match render_and_save(ctx, request) {
        Ok(path) => {
            info!(path = %path.display(), "QR code generated successfully");
            Ok(path)
        }
        Err(e) => {
            error!(error = %e, "error generating QR code");
            Err(e)
        }
    }
}

fn render_and_save(ctx: &GeneratorContext, request: &GenerationRequest) -> Result<PathBuf, GenerateError> {
    let (design, url, image) = compose(ctx, request)?;
    let path = resolve_output_path(&ctx.output_dir, request.output.as_deref(), design, url);
    save_png(&image, &path)?;
    Ok(path)
}

/// Validate `request` and compose its image without touching the disk.
///
/// # Errors
///
/// Returns an error if the url is missing, the design is unknown, or the url
/// cannot be encoded.
pub fn compose<'r>(
    ctx: &GeneratorContext,
    request: &'r GenerationRequest,
) -> Result<(Design, &'r str, ComposedImage), GenerateError> {
    let url = request
        .url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .ok_or(GenerateError::MissingField("url"))?;
    let design = Design::from_name(&request.design)?;

    let matrix = ctx.provider.encode(url, EcLevel::H)?;
    debug!(url, modules = matrix.width(), design = design.name(), "encoded QR matrix");

    let theme = Theme { fonts: &ctx.fonts, font_dir: &ctx.font_dir, style: &request.style };
    let image = design.compose(&matrix, &request.texts(), &theme)?;
    debug!(qr_region = %image.qr_region, "composed image");
    Ok((design, url, image))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::designs::custom;
    use crate::fonts::FontResolver;
    use crate::ports::{QrMatrix, QrMatrixProvider};
    use crate::text::TextFit;

    fn context(output_dir: &Path) -> GeneratorContext {
        GeneratorContext::new(PathBuf::from("/nonexistent/fonts"), output_dir.to_path_buf())
            .with_fonts(FontResolver::new(Vec::new()))
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn file_count(dir: &Path) -> usize {
        std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
    }

    /// Decode the QR region of `image`, thresholded and padded with white.
    fn decode_region(image: &ComposedImage) -> String {
        const PAD: u32 = 40;
        let region = image.qr_region;
        let (width, height) = (region.width + 2 * PAD, region.height + 2 * PAD);
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            width as usize,
            height as usize,
            |x, y| {
                let (x, y) = (x as u32, y as u32);
                if x < PAD || y < PAD || x >= PAD + region.width || y >= PAD + region.height {
                    return 255;
                }
                let p = image.pixels.get_pixel(region.x + x - PAD, region.y + y - PAD);
                let luma = (299 * u32::from(p[0]) + 587 * u32::from(p[1]) + 114 * u32::from(p[2])) / 1000;
                if luma < 200 {
                    0
                } else {
                    255
                }
            },
        );
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1, "expected exactly one QR code in the region");
        grids[0].decode().unwrap().1
    }

    #[test]
    fn every_design_writes_expected_dimensions() {
        let dir = scratch_dir("qrstyler_generate_dims_test");
        let ctx = context(&dir);
        let url = "https://example.com";
        let custom_side = ctx.provider.encode(url, EcLevel::H).unwrap().base_side();

        for (design, expected) in [
            ("google", (800, 800)),
            ("multicolored", (500, 500)),
            ("custom", custom::canvas_size(custom_side)),
        ] {
            let request = GenerationRequest::new(url).with_design(design);
            let path = generate(&ctx, &request).unwrap();
            assert!(path.starts_with(&dir));
            let img = image::open(&path).unwrap();
            assert_eq!((img.width(), img.height()), expected, "{design}");
        }
        assert_eq!(file_count(&dir), 3);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn qr_region_decodes_to_url_for_every_design() {
        let ctx = context(Path::new("/unused"));
        for url in ["https://example.com", "https://example.com/?q=é&x=<3"] {
            for design in ["google", "multicolored", "custom"] {
                let request = GenerationRequest::new(url).with_design(design);
                let (_, _, image) = compose(&ctx, &request).unwrap();
                assert_eq!(decode_region(&image), url, "{design}");
            }
        }
    }

    #[test]
    fn google_scenario_with_texts_stays_scannable() {
        let dir = scratch_dir("qrstyler_generate_google_test");
        let ctx = context(&dir);
        let mut request = GenerationRequest::new("https://example.com").with_design("google");
        request.title = Some("Google".into());
        request.subtitle = Some("Search".into());
        request.footer = Some("TEAM <3".into());
        request.output = Some("review.png".into());

        let path = generate(&ctx, &request).unwrap();
        assert_eq!(path, dir.join("review.png"));

        let (_, _, image) = compose(&ctx, &request).unwrap();
        assert_eq!(decode_region(&image), "https://example.com");
        let saved = image::open(&path).unwrap().to_rgba8();
        assert_eq!(saved, image.pixels);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unknown_design_writes_nothing() {
        let dir = scratch_dir("qrstyler_generate_unknown_test");
        let ctx = context(&dir);
        let request = GenerationRequest::new("https://example.com").with_design("unknown");

        let err = generate(&ctx, &request).unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedDesign(_)));
        assert_eq!(file_count(&dir), 0);
    }

    #[test]
    fn missing_or_blank_url_is_missing_field() {
        let ctx = context(Path::new("/unused"));
        let mut request = GenerationRequest::new("   ");
        assert!(matches!(generate(&ctx, &request), Err(GenerateError::MissingField("url"))));
        request.url = None;
        assert!(matches!(generate(&ctx, &request), Err(GenerateError::MissingField("url"))));
    }

    #[test]
    fn wrapped_long_texts_leave_qr_region_untouched() {
        let ctx = context(Path::new("/unused"));
        let long = "Scan this code to review The PubCrawlCompany and its tours around La Grand Place";
        for design in ["google", "multicolored", "custom"] {
            let plain = GenerationRequest::new("https://example.com").with_design(design);
            let mut wrapped = plain.clone();
            wrapped.title = Some(long.into());
            wrapped.subtitle = Some(long.into());
            wrapped.footer = Some(long.into());
            wrapped.style.text_fit = TextFit::Wrap;

            let (_, _, before) = compose(&ctx, &plain).unwrap();
            let (_, _, after) = compose(&ctx, &wrapped).unwrap();
            assert_ne!(before.pixels, after.pixels, "{design}: texts not drawn");
            let region = after.qr_region;
            for y in region.y..region.y + region.height {
                for x in region.x..region.x + region.width {
                    assert_eq!(before.pixels.get_pixel(x, y), after.pixels.get_pixel(x, y), "{design} at ({x}, {y})");
                }
            }
            assert_eq!(decode_region(&after), "https://example.com", "{design}");
        }
    }

    struct FailingProvider;

    impl QrMatrixProvider for FailingProvider {
        fn encode(&self, _payload: &str, _level: EcLevel) -> Result<QrMatrix, GenerateError> {
            Err(GenerateError::Encode("data too long".into()))
        }
    }

    #[test]
    fn provider_failure_writes_nothing() {
        let dir = scratch_dir("qrstyler_generate_encode_fail_test");
        let ctx = context(&dir).with_provider(Box::new(FailingProvider));

        let err = generate(&ctx, &GenerationRequest::new("https://example.com")).unwrap_err();
        assert!(matches!(err, GenerateError::Encode(_)));
        assert_eq!(file_count(&dir), 0);
    }
}
