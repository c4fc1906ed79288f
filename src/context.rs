//! Generator context that bundles the collaborators of a generation call.

use std::path::PathBuf;

use crate::adapters::QrcodeProvider;
use crate::cli::Cli;
use crate::fonts::FontResolver;
use crate::ports::QrMatrixProvider;

/// Collaborators and directories shared by generation calls.
///
/// Holds no per-call state; each call allocates its own canvas.
pub struct GeneratorContext {
    /// QR matrix port.
    pub provider: Box<dyn QrMatrixProvider>,
    /// Font lookup with fallback.
    pub fonts: FontResolver,
    /// Directory holding the themed font files.
    pub font_dir: PathBuf,
    /// Directory generated images are written to.
    pub output_dir: PathBuf,
}

impl GeneratorContext {
    /// A context using the `qrcode` adapter and system font fallbacks.
    #[must_use]
    pub fn new(font_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            provider: Box::new(QrcodeProvider),
            fonts: FontResolver::with_system_fallbacks(),
            font_dir,
            output_dir,
        }
    }

    /// Build the context described by command-line flags.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(cli.font_dir.clone(), cli.output_dir.clone())
    }

    /// Replace the QR matrix provider.
    #[must_use]
    pub fn with_provider(mut self, provider: Box<dyn QrMatrixProvider>) -> Self {
        self.provider = provider;
        self
    }

    /// Replace the font resolver.
    #[must_use]
    pub fn with_fonts(mut self, fonts: FontResolver) -> Self {
        self.fonts = fonts;
        self
    }
}
