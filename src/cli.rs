//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

use crate::text::TextFit;

/// Styled QR code generator - Google-style, multicolored and gradient designs.
#[derive(Parser, Debug)]
#[command(name = "qrstyler", version, about)]
pub struct Cli {
    /// URL to encode in the QR code.
    #[arg(short, long, required_unless_present = "config")]
    pub url: Option<String>,

    /// Design style: google, multicolored, custom [default: custom].
    #[arg(short, long)]
    pub design: Option<String>,

    /// Output file name (saved in the output directory; auto-generated if omitted).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Title text.
    #[arg(long)]
    pub title: Option<String>,

    /// Subtitle text.
    #[arg(long)]
    pub subtitle: Option<String>,

    /// Footer text.
    #[arg(long)]
    pub footer: Option<String>,

    /// JSON config file supplying any of the above.
    #[arg(short, long)]
    pub config: Option<String>,

    /// How to handle text wider than its slot.
    #[arg(long, value_enum)]
    pub text_fit: Option<TextFit>,

    /// Directory generated images are written to.
    #[arg(long, default_value = "outputs")]
    pub output_dir: PathBuf,

    /// Directory holding the themed font files.
    #[arg(long, default_value = "fonts")]
    pub font_dir: PathBuf,

    /// Log file, appended to on every run.
    #[arg(long, default_value = "qrstyler.log")]
    pub log_file: PathBuf,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}
