//! Font resolution with an ordered fallback chain.
//!
//! A [`FontSpec`] names candidate font files in preference order. The
//! [`FontResolver`] tries them, then a list of common system fonts, and
//! finally the DejaVu Sans face compiled into the binary.

use std::fmt;
use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontArc, FontRef, FontVec, GlyphId, PxScale, ScaleFont};
use tracing::{debug, info, warn};

use crate::error::FontError;

/// DejaVu Sans, the last-resort face. Its license ships next to it.
static EMBEDDED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Well-known system font locations tried after a spec's own candidates.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Ordered font candidates and the desired size in pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    /// Candidate font files, most preferred first.
    pub candidates: Vec<PathBuf>,
    /// Em size in pixels.
    pub size: u32,
}

impl FontSpec {
    /// A spec with no candidates at the given size.
    #[must_use]
    pub fn new(size: u32) -> Self {
        Self { candidates: Vec::new(), size }
    }

    /// Append a candidate path.
    #[must_use]
    pub fn with_candidate(mut self, path: impl Into<PathBuf>) -> Self {
        self.candidates.push(path.into());
        self
    }

    /// Append a candidate only when one is given.
    #[must_use]
    pub fn with_optional(self, path: Option<&Path>) -> Self {
        match path {
            Some(p) => self.with_candidate(p),
            None => self,
        }
    }
}

/// Where a resolved font came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// Loaded from a file on disk.
    File(PathBuf),
    /// The face compiled into the binary.
    Embedded,
}

/// A font at a fixed size, ready to measure and rasterize text.
pub struct FontHandle {
    font: FontArc,
    scale: PxScale,
    source: FontSource,
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle").field("scale", &self.scale.y).field("source", &self.source).finish()
    }
}

impl FontHandle {
    /// Wrap `font` so that `size` is its em size, as font sizes are
    /// conventionally specified.
    fn new(font: FontArc, size: u32, source: FontSource) -> Self {
        let size = size as f32;
        let scale = match font.units_per_em() {
            Some(upem) if upem > 0.0 => PxScale::from(size * font.height_unscaled() / upem),
            _ => PxScale::from(size),
        };
        Self { font, scale, source }
    }

    /// The embedded DejaVu Sans at `size` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Embedded`] if the compiled-in font fails to parse.
    pub fn embedded(size: u32) -> Result<Self, FontError> {
        let font = FontRef::try_from_slice(EMBEDDED_FONT).map_err(|_| FontError::Embedded)?;
        Ok(Self::new(FontArc::new(font), size, FontSource::Embedded))
    }

    /// Where this font was loaded from.
    #[must_use]
    pub fn source(&self) -> &FontSource {
        &self.source
    }

    /// Vertical extent of one line of text.
    #[must_use]
    pub fn line_height(&self) -> f32 {
        self.font.as_scaled(self.scale).height()
    }

    /// Horizontal advance of `text` laid out on one line.
    #[must_use]
    pub fn text_width(&self, text: &str) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        let mut width = 0.0;
        let mut prev: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(p) = prev {
                width += scaled.kern(p, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }
        width
    }

    /// Rasterize one line of `text` with its top-left corner at (`x`, `y`).
    ///
    /// `plot` receives absolute pixel coordinates and a coverage in `0.0..=1.0`;
    /// coordinates may fall outside any canvas and are the caller's to clip.
    pub fn rasterize(&self, text: &str, x: f32, y: f32, mut plot: impl FnMut(i32, i32, f32)) {
        let scaled = self.font.as_scaled(self.scale);
        let baseline = y + scaled.ascent();
        let mut caret = x;
        let mut prev: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(p) = prev {
                caret += scaled.kern(p, id);
            }
            let glyph = id.with_scale_and_position(self.scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            prev = Some(id);
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let (ox, oy) = (bounds.min.x as i32, bounds.min.y as i32);
                outlined.draw(|gx, gy, coverage| {
                    plot(ox + gx as i32, oy + gy as i32, coverage);
                });
            }
        }
    }
}

/// Resolves [`FontSpec`]s to usable fonts.
#[derive(Debug, Clone)]
pub struct FontResolver {
    fallbacks: Vec<PathBuf>,
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::with_system_fallbacks()
    }
}

impl FontResolver {
    /// A resolver that tries `fallbacks` after each spec's own candidates.
    #[must_use]
    pub fn new(fallbacks: Vec<PathBuf>) -> Self {
        Self { fallbacks }
    }

    /// A resolver falling back to common system font locations.
    #[must_use]
    pub fn with_system_fallbacks() -> Self {
        Self::new(SYSTEM_FONTS.iter().map(PathBuf::from).collect())
    }

    /// Resolve `spec` to a font.
    ///
    /// Candidates are tried in order, then the resolver's fallbacks, then the
    /// embedded face. Each failure is logged. `None` means not even the
    /// embedded face could be parsed.
    #[must_use]
    pub fn resolve(&self, spec: &FontSpec) -> Option<FontHandle> {
        for path in &spec.candidates {
            match load_font(path) {
                Ok(font) => return Some(from_file(font, spec.size, path)),
                Err(e) => warn!(error = %e, "font unavailable, trying next candidate"),
            }
        }
        for path in &self.fallbacks {
            match load_font(path) {
                Ok(font) => {
                    info!(font = %path.display(), size = spec.size, "using fallback font");
                    return Some(from_file(font, spec.size, path));
                }
                Err(e) => debug!(error = %e, "fallback font unavailable"),
            }
        }
        match FontHandle::embedded(spec.size) {
            Ok(handle) => {
                info!(size = spec.size, "no font file available, using embedded font");
                Some(handle)
            }
            Err(e) => {
                warn!(error = %e, "no usable font, text will be skipped");
                None
            }
        }
    }
}

/// Read and parse a single font file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid font.
pub fn load_font(path: &Path) -> Result<FontVec, FontError> {
    let data = std::fs::read(path).map_err(|source| FontError::Read { path: path.to_path_buf(), source })?;
    FontVec::try_from_vec(data).map_err(|_| FontError::Invalid { path: path.to_path_buf() })
}

fn from_file(font: FontVec, size: u32, path: &Path) -> FontHandle {
    debug!(font = %path.display(), size, "loaded font");
    FontHandle::new(FontArc::new(font), size, FontSource::File(path.to_path_buf()))
}
