//! Design strategies and the name-to-design table.
//!
//! Each design is a standalone `compose` function that lays out the QR code,
//! decorations and text on a fresh canvas.

pub mod custom;
pub mod google;
pub mod multicolored;

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use tracing::debug;

use crate::canvas::{Canvas, Rect};
use crate::error::GenerateError;
use crate::fonts::{FontResolver, FontSpec};
use crate::ports::QrMatrix;
use crate::request::StyleOptions;
use crate::text::{self, Placement};

/// Opaque white.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Themed font files, looked up in the font directory.
pub const PATCHWORK_FONT: &str = "PatchworkStitchlings.ttf";
/// Light display font used for subtitles.
pub const ORGANICAL_FONT: &str = "ORGANICAL.ttf";
/// Rounded sans used by the multicolored and custom designs.
pub const CAVIAR_FONT: &str = "CaviarDreams.ttf";

/// The available visual layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Design {
    /// White canvas framed in a single accent color.
    Google,
    /// White canvas framed in the four-color palette.
    Multicolored,
    /// Dark gradient with a rounded white QR panel.
    Custom,
}

/// Design names as accepted on the command line and in config files.
const DESIGNS: &[(&str, Design)] = &[
    ("google", Design::Google),
    ("multicolored", Design::Multicolored),
    ("custom", Design::Custom),
];

/// Signature shared by every design's composer.
type ComposeFn = fn(&QrMatrix, &Texts<'_>, &Theme<'_>) -> Result<ComposedImage, GenerateError>;

impl Design {
    /// Look up a design by name.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnsupportedDesign`] for unknown names.
    pub fn from_name(name: &str) -> Result<Self, GenerateError> {
        let wanted = name.trim().to_ascii_lowercase();
        DESIGNS
            .iter()
            .find(|(n, _)| *n == wanted)
            .map(|&(_, design)| design)
            .ok_or_else(|| GenerateError::UnsupportedDesign(name.to_string()))
    }

    /// The design's canonical name.
    #[must_use]
    pub fn name(self) -> &'static str {
        DESIGNS.iter().find(|(_, d)| *d == self).map_or("custom", |(n, _)| n)
    }

    fn composer(self) -> ComposeFn {
        match self {
            Self::Google => google::compose,
            Self::Multicolored => multicolored::compose,
            Self::Custom => custom::compose,
        }
    }

    /// Compose the final image for `qr` and `texts`.
    ///
    /// # Errors
    ///
    /// Returns an error if a drawing primitive is given invalid geometry.
    pub fn compose(
        self,
        qr: &QrMatrix,
        texts: &Texts<'_>,
        theme: &Theme<'_>,
    ) -> Result<ComposedImage, GenerateError> {
        (self.composer())(qr, texts, theme)
    }
}

/// Optional text fields; empty strings count as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Texts<'a> {
    /// Drawn above the QR code.
    pub title: Option<&'a str>,
    /// Drawn below the title.
    pub subtitle: Option<&'a str>,
    /// Drawn near the bottom edge.
    pub footer: Option<&'a str>,
}

/// Which text field a font is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The title line.
    Title,
    /// The subtitle line.
    Subtitle,
    /// The footer line.
    Footer,
}

/// Everything a design needs besides the QR code and text.
#[derive(Debug, Clone, Copy)]
pub struct Theme<'a> {
    /// Resolves font files with fallback.
    pub fonts: &'a FontResolver,
    /// Directory holding the themed font files.
    pub font_dir: &'a Path,
    /// User style choices.
    pub style: &'a StyleOptions,
}

impl Theme<'_> {
    /// Font candidates for `role`: the user's override, then the themed file.
    #[must_use]
    pub fn font_spec(&self, role: Role, file: &str, size: u32) -> FontSpec {
        let over = match role {
            Role::Title => self.style.fonts.title.as_deref(),
            Role::Subtitle => self.style.fonts.subtitle.as_deref(),
            Role::Footer => self.style.fonts.footer.as_deref(),
        };
        FontSpec::new(size).with_optional(over).with_candidate(self.font_path(file))
    }

    fn font_path(&self, file: &str) -> PathBuf {
        self.font_dir.join(file)
    }

    /// Draw a text field if present, resolving its font only when needed.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        canvas: &mut Canvas,
        role: Role,
        text: Option<&str>,
        file: &str,
        size: u32,
        placement: Placement,
        color: Rgba<u8>,
    ) {
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            return;
        };
        let Some(font) = self.fonts.resolve(&self.font_spec(role, file, size)) else {
            return;
        };
        debug!(?role, source = ?font.source(), "drawing text");
        text::draw_block(canvas, &font, placement, text, self.style.text_fit, color);
    }
}

/// Pixel format the composed image is saved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// 8-bit RGB, alpha dropped.
    Rgb,
    /// 8-bit RGBA.
    Rgba,
}

/// A finished design, ready to be written out.
#[derive(Debug, Clone)]
pub struct ComposedImage {
    /// Final pixels.
    pub pixels: RgbaImage,
    /// Format to save in.
    pub color_mode: ColorMode,
    /// Where the QR raster, quiet zone included, was placed.
    pub qr_region: Rect,
}

impl ComposedImage {
    /// Convert to the image in its output color mode.
    #[must_use]
    pub fn to_dynamic(&self) -> DynamicImage {
        let rgba = DynamicImage::ImageRgba8(self.pixels.clone());
        match self.color_mode {
            ColorMode::Rgb => DynamicImage::ImageRgb8(rgba.to_rgb8()),
            ColorMode::Rgba => rgba,
        }
    }
}

/// Resize a square QR raster to `side` pixels without blurring module edges.
#[must_use]
pub fn scale_qr(image: &RgbaImage, side: u32) -> RgbaImage {
    imageops::resize(image, side, side, FilterType::Nearest)
}

/// Top, left, right and bottom bands of width `size / 4`, in painting order.
#[must_use]
pub fn border_bands(size: u32) -> [Rect; 4] {
    let band = size / 4;
    [
        Rect::new(0, 0, size, band),
        Rect::new(0, 0, band, size),
        Rect::new(size - band, 0, band, size),
        Rect::new(0, size - band, size, band),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::FontOverrides;

    #[test]
    fn lookup_known_designs() {
        assert_eq!(Design::from_name("google").unwrap(), Design::Google);
        assert_eq!(Design::from_name("multicolored").unwrap(), Design::Multicolored);
        assert_eq!(Design::from_name(" Custom ").unwrap(), Design::Custom);
    }

    #[test]
    fn lookup_unknown_design() {
        let err = Design::from_name("unknown").unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedDesign(ref n) if n == "unknown"));
    }

    #[test]
    fn names_round_trip() {
        for &(name, design) in DESIGNS {
            assert_eq!(design.name(), name);
            assert_eq!(Design::from_name(name).unwrap(), design);
        }
    }

    #[test]
    fn bands_cover_edges() {
        let [top, left, right, bottom] = border_bands(800);
        assert_eq!(top, Rect::new(0, 0, 800, 200));
        assert_eq!(left, Rect::new(0, 0, 200, 800));
        assert_eq!(right, Rect::new(600, 0, 200, 800));
        assert_eq!(bottom, Rect::new(0, 600, 800, 200));
    }

    #[test]
    fn font_spec_prefers_override() {
        let resolver = FontResolver::new(Vec::new());
        let style = StyleOptions {
            fonts: FontOverrides { title: Some(PathBuf::from("/my/bold.ttf")), ..FontOverrides::default() },
            ..StyleOptions::default()
        };
        let theme = Theme { fonts: &resolver, font_dir: Path::new("fonts"), style: &style };

        let title = theme.font_spec(Role::Title, PATCHWORK_FONT, 50);
        assert_eq!(
            title.candidates,
            vec![PathBuf::from("/my/bold.ttf"), PathBuf::from("fonts/PatchworkStitchlings.ttf")]
        );
        let footer = theme.font_spec(Role::Footer, CAVIAR_FONT, 35);
        assert_eq!(footer.candidates, vec![PathBuf::from("fonts/CaviarDreams.ttf")]);
        assert_eq!(footer.size, 35);
    }

    #[test]
    fn rgb_mode_drops_alpha() {
        let composed = ComposedImage {
            pixels: RgbaImage::from_pixel(2, 2, WHITE),
            color_mode: ColorMode::Rgb,
            qr_region: Rect::new(0, 0, 2, 2),
        };
        assert!(matches!(composed.to_dynamic(), DynamicImage::ImageRgb8(_)));
    }
}
