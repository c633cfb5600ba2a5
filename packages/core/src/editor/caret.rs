//! Caret coordinate computation
//!
//! The core never measures text itself. A [`CaretMetrics`] implementation
//! supplied by the host surface reports text widths in the current font, the
//! line height, and the bounding box of the edited surface.

use crate::commands::MenuPosition;
use crate::models::text;

/// Top-left corner of the edited surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceBounds {
    pub top: f64,
    pub left: f64,
}

/// Text measurement supplied by the rendering host
pub trait CaretMetrics {
    /// Pixel width of `text` rendered in the surface's font
    fn text_width(&self, text: &str) -> f64;

    /// Pixel height of one line
    fn line_height(&self) -> f64;

    fn surface_bounds(&self) -> SurfaceBounds;
}

/// Screen position just below the caret
///
/// `caret` is a UTF-16 offset into `content`. The line index is the number of
/// newlines before the caret; the horizontal offset is the measured width of
/// the current line up to the caret.
pub fn caret_position(content: &str, caret: usize, metrics: &dyn CaretMetrics) -> MenuPosition {
    let end = text::byte_index(content, caret);
    let before = &content[..end];
    let line_index = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let line_prefix = &before[line_start..];

    let bounds = metrics.surface_bounds();
    MenuPosition {
        top: bounds.top + (line_index as f64 + 1.0) * metrics.line_height(),
        left: bounds.left + metrics.text_width(line_prefix),
    }
}

/// Fixed-pitch metrics: every UTF-16 unit has the same advance
///
/// Useful for monospace surfaces and for tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub char_width: f64,
    pub line_height: f64,
    pub bounds: SurfaceBounds,
}

impl CaretMetrics for MonospaceMetrics {
    fn text_width(&self, text: &str) -> f64 {
        text::character_count(text) as f64 * self.char_width
    }

    fn line_height(&self) -> f64 {
        self.line_height
    }

    fn surface_bounds(&self) -> SurfaceBounds {
        self.bounds
    }
}
