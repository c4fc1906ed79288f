//! The generation request and the user's style options.

use std::path::PathBuf;

use serde::Deserialize;

use crate::cli::Cli;
use crate::config::FileConfig;
use crate::designs::Texts;
use crate::text::TextFit;

/// Design used when neither flags nor config name one.
pub const DEFAULT_DESIGN: &str = "custom";

/// Per-field font files tried before a design's themed fonts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FontOverrides {
    /// Font for the title.
    pub title: Option<PathBuf>,
    /// Font for the subtitle.
    pub subtitle: Option<PathBuf>,
    /// Font for the footer.
    pub footer: Option<PathBuf>,
}

/// Presentation choices that apply across designs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleOptions {
    /// Policy for text wider than its slot.
    pub text_fit: TextFit,
    /// Font overrides per text field.
    pub fonts: FontOverrides,
}

/// Everything needed to produce one styled QR image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Payload to encode; required at generation time.
    pub url: Option<String>,
    /// Design name, resolved when generating.
    pub design: String,
    /// Output file name, placed in the output directory.
    pub output: Option<String>,
    /// Title text.
    pub title: Option<String>,
    /// Subtitle text.
    pub subtitle: Option<String>,
    /// Footer text.
    pub footer: Option<String>,
    /// Style options.
    pub style: StyleOptions,
}

impl GenerationRequest {
    /// A request for `url` with every other field at its default.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            design: DEFAULT_DESIGN.to_string(),
            output: None,
            title: None,
            subtitle: None,
            footer: None,
            style: StyleOptions::default(),
        }
    }

    /// Set the design name.
    #[must_use]
    pub fn with_design(mut self, design: impl Into<String>) -> Self {
        self.design = design.into();
        self
    }

    /// Merge command-line flags with an optional config file.
    ///
    /// A value present in the file overrides the matching flag; flags supply
    /// whatever the file leaves out, and defaults fill the rest.
    #[must_use]
    pub fn from_sources(cli: &Cli, file: Option<FileConfig>) -> Self {
        let file = file.unwrap_or_default();
        Self {
            url: file.url.or_else(|| cli.url.clone()),
            design: file.design.or_else(|| cli.design.clone()).unwrap_or_else(|| DEFAULT_DESIGN.to_string()),
            output: file.output.or_else(|| cli.output.clone()),
            title: file.title.or_else(|| cli.title.clone()),
            subtitle: file.subtitle.or_else(|| cli.subtitle.clone()),
            footer: file.footer.or_else(|| cli.footer.clone()),
            style: StyleOptions {
                text_fit: file.text_fit.or(cli.text_fit).unwrap_or_default(),
                fonts: file.fonts.unwrap_or_default(),
            },
        }
    }

    /// Borrow the text fields, treating empty strings as absent.
    #[must_use]
    pub fn texts(&self) -> Texts<'_> {
        fn field(v: Option<&str>) -> Option<&str> {
            v.filter(|s| !s.is_empty())
        }
        Texts {
            title: field(self.title.as_deref()),
            subtitle: field(self.subtitle.as_deref()),
            footer: field(self.footer.as_deref()),
        }
    }
}
