//! Fitting text fields into the space a design gives them.

use clap::ValueEnum;
use image::Rgba;
use serde::Deserialize;
use tracing::debug;

use crate::canvas::Canvas;
use crate::fonts::FontHandle;

const ELLIPSIS: &str = "...";

/// Extra pixels between wrapped lines.
const LINE_SPACING: f32 = 4.0;

/// What to do with text wider than its slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TextFit {
    /// Draw as-is; whatever runs off the canvas is clipped.
    #[default]
    Clip,
    /// Break at word boundaries onto further lines.
    Wrap,
    /// Cut the line short and end it with "...".
    Ellipsis,
}

/// Horizontal alignment of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Lines start at the anchor x.
    Left,
    /// Lines are centered on the canvas.
    Center,
}

/// Where and how a text block is drawn.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    /// Left edge for [`Align::Left`]; ignored when centered.
    pub x: f32,
    /// Top of the first line.
    pub y: f32,
    /// Horizontal alignment.
    pub align: Align,
    /// First row the block may not paint on; the canvas bottom when `None`.
    pub limit: Option<u32>,
}

impl Placement {
    /// Left-aligned text at (`x`, `y`).
    #[must_use]
    pub const fn left(x: f32, y: f32) -> Self {
        Self { x, y, align: Align::Left, limit: None }
    }

    /// Text centered horizontally, top at `y`.
    #[must_use]
    pub const fn centered(y: f32) -> Self {
        Self { x: 0.0, y, align: Align::Center, limit: None }
    }

    /// Keep the block strictly above row `limit`.
    #[must_use]
    pub const fn above(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Break `text` into lines no wider than `max_width` according to `fit`.
///
/// Explicit newlines always start a new line.
#[must_use]
pub fn fit_lines(font: &FontHandle, text: &str, max_width: f32, fit: TextFit) -> Vec<String> {
    text.lines()
        .flat_map(|line| match fit {
            TextFit::Clip => vec![line.to_string()],
            TextFit::Wrap => wrap(font, line, max_width),
            TextFit::Ellipsis => vec![truncate(font, line, max_width)],
        })
        .collect()
}

fn wrap(font: &FontHandle, line: &str, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let candidate =
            if current.is_empty() { word.to_string() } else { format!("{current} {word}") };
        if font.text_width(&candidate) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        // A single word wider than the slot is broken between characters.
        for ch in word.chars() {
            current.push(ch);
            if font.text_width(&current) > max_width && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn truncate(font: &FontHandle, line: &str, max_width: f32) -> String {
    if font.text_width(line) <= max_width {
        return line.to_string();
    }
    let mut kept: String = line.to_string();
    while !kept.is_empty() {
        kept.pop();
        let candidate = format!("{}{ELLIPSIS}", kept.trim_end());
        if font.text_width(&candidate) <= max_width {
            return candidate;
        }
    }
    ELLIPSIS.to_string()
}

/// Draw `text` at `placement`, fitting it to the canvas per `fit`.
///
/// Left-aligned blocks may use the width from their x to 10 px short of the
/// right edge; centered blocks keep 10 px clear on both sides. Nothing is
/// painted at or below the placement's limit, and lines starting there are
/// dropped.
pub fn draw_block(
    canvas: &mut Canvas,
    font: &FontHandle,
    placement: Placement,
    text: &str,
    fit: TextFit,
    color: Rgba<u8>,
) {
    const MARGIN: f32 = 10.0;
    let canvas_width = canvas.width() as f32;
    let max_width = match placement.align {
        Align::Left => canvas_width - placement.x - MARGIN,
        Align::Center => canvas_width - 2.0 * MARGIN,
    }
    .max(1.0);
    let limit = placement.limit.unwrap_or(canvas.height()).min(canvas.height());

    let lines = fit_lines(font, text, max_width, fit);
    let total = lines.len();
    let mut y = placement.y;
    for (drawn, line) in lines.into_iter().enumerate() {
        if y >= limit as f32 {
            debug!(dropped = total - drawn, limit, "text lines do not fit above their limit");
            break;
        }
        let x = match placement.align {
            Align::Left => placement.x,
            Align::Center => ((canvas_width - font.text_width(&line)) / 2.0).floor(),
        };
        canvas.draw_text_above(font, x, y, &line, color, limit);
        y += font.line_height() + LINE_SPACING;
    }
}
