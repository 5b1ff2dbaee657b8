//! Adaptive fit sizing
//!
//! Finds the largest integer font size that renders a string inside a box,
//! either forced onto a single line or height-bounded with natural wrapping.
//! Acceptance is monotonic in font size (a larger size never shrinks the
//! rendered box), which is what makes the binary search valid. Every input
//! has a defined, non-throwing answer: degenerate boxes and inverted bounds
//! resolve to the minimum size rather than failing.

use serde::{Deserialize, Serialize};

/// Measurement capability the sizer renders against. Implementations are
/// read-only queries of a fixed rendering environment; identical inputs must
/// yield identical dimensions or determinism is lost.
pub trait TextMeasurer {
    /// Rendered width of `content` forced onto a single line.
    fn line_width(&mut self, content: &str, font_size: u32) -> f32;
    /// Height of one line at `font_size`, leading included.
    fn line_height(&mut self, font_size: u32) -> f32;
}

/// One sizing request; created fresh per call (per resize event, per
/// question), never retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitRequest {
    pub content: String,
    pub container_width: f32,
    pub container_height: f32,
    pub min_size: u32,
    pub max_size: u32,
    pub wrap: bool,
}

/// The resolved size, always within the requested bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitResult {
    pub font_size: u32,
}

/// Binary-search the largest accepted size in `[min_size, max_size]`.
pub fn fit(measurer: &mut dyn TextMeasurer, request: &FitRequest) -> FitResult {
    let min = request.min_size;
    if request.container_width <= 0.0
        || request.container_height <= 0.0
        || min > request.max_size
        || request.content.is_empty()
    {
        return FitResult { font_size: min };
    }

    let mut lo = min;
    let mut hi = request.max_size;
    let mut best = min;
    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        if accepts(measurer, request, mid) {
            best = mid;
            lo = mid + 1;
        } else if mid == 0 {
            break;
        } else {
            hi = mid - 1;
        }
    }
    FitResult { font_size: best }
}

/// Convenience wrapper matching the external entry-point shape.
pub fn fit_font_size(
    measurer: &mut dyn TextMeasurer,
    content: &str,
    width: f32,
    height: f32,
    min_size: u32,
    max_size: u32,
    wrap: bool,
) -> u32 {
    fit(
        measurer,
        &FitRequest {
            content: content.to_string(),
            container_width: width,
            container_height: height,
            min_size,
            max_size,
            wrap,
        },
    )
    .font_size
}

fn accepts(measurer: &mut dyn TextMeasurer, request: &FitRequest, size: u32) -> bool {
    if request.wrap {
        wrapped_height(measurer, &request.content, request.container_width, size)
            <= request.container_height
    } else {
        measurer.line_width(&request.content, size) <= request.container_width
            && measurer.line_height(size) <= request.container_height
    }
}

/// Height of `content` after natural wrapping at `max_width`: each logical
/// line contributes `ceil(width / max_width)` rendered lines, at least one.
fn wrapped_height(
    measurer: &mut dyn TextMeasurer,
    content: &str,
    max_width: f32,
    size: u32,
) -> f32 {
    let line_height = measurer.line_height(size);
    let mut lines = 0.0_f32;
    for logical in content.lines() {
        let line = logical.trim();
        if line.is_empty() {
            continue;
        }
        let width = measurer.line_width(line, size);
        lines += (width / max_width.max(1.0)).ceil().max(1.0);
    }
    if lines <= 0.0 {
        lines = 1.0;
    }
    lines * line_height
}

/// Deterministic measurer for hosts with no font access: every glyph
/// advances a fixed fraction of the font size (a full em for CJK and other
/// wide characters, just over half for ASCII-range glyphs).
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvanceMeasurer {
    pub line_spacing: f32,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self { line_spacing: 1.4 }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn line_width(&mut self, content: &str, font_size: u32) -> f32 {
        let size = font_size as f32;
        content
            .chars()
            .map(|ch| if (ch as u32) < 0x2000 { size * 0.55 } else { size })
            .sum()
    }

    fn line_height(&mut self, font_size: u32) -> f32 {
        font_size as f32 * self.line_spacing
    }
}
