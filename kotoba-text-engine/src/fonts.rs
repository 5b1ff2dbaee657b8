//! Font-backed text measurement
//!
//! Provides a real `TextMeasurer` built on fontdue metrics for hosts that
//! have font files available. Advance widths are cached per (character,
//! size) pair since the sizer re-measures the same string at many candidate
//! sizes during one binary search.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Result};
use fontdue::{Font, FontSettings};
use log::{debug, warn};

use crate::fit::TextMeasurer;

/// Measurer backed by a loaded font.
pub struct FontMeasurer {
    font: Font,
    font_name: String,
    line_spacing: f32,
    advance_cache: HashMap<(char, u32), f32>,
}

impl FontMeasurer {
    /// Probe well-known Japanese-capable font locations in priority order.
    pub fn discover() -> Result<Self> {
        let font_paths = vec![
            // Linux packaged CJK fonts.
            ("Noto Sans CJK JP", "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc"),
            ("Noto Sans CJK JP", "/usr/share/fonts/opentype/noto/NotoSansCJKjp-Regular.otf"),
            ("Noto Serif CJK JP", "/usr/share/fonts/opentype/noto/NotoSerifCJK-Regular.ttc"),
            // Windows system fonts.
            ("Yu Gothic", "C:\\Windows\\Fonts\\YuGothR.ttc"),
            ("Meiryo", "C:\\Windows\\Fonts\\meiryo.ttc"),
            ("MS Gothic", "C:\\Windows\\Fonts\\msgothic.ttc"),
            // macOS system fonts.
            ("Hiragino Sans", "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc"),
        ];

        for (font_name, font_path) in font_paths {
            if !Path::new(font_path).exists() {
                continue;
            }
            debug!("loading font: {} from {}", font_name, font_path);
            let font_data = std::fs::read(font_path)?;
            match Self::from_bytes(font_data, font_name) {
                Ok(measurer) => return Ok(measurer),
                Err(e) => warn!("skipping {}: {}", font_path, e),
            }
        }

        Err(anyhow!("no suitable Japanese font found"))
    }

    /// Build a measurer from raw font data (e.g. an embedded font).
    pub fn from_bytes(font_data: Vec<u8>, font_name: &str) -> Result<Self> {
        let font = Font::from_bytes(font_data, FontSettings::default())
            .map_err(|e| anyhow!("failed to parse font {}: {}", font_name, e))?;
        Ok(Self {
            font,
            font_name: font_name.to_string(),
            line_spacing: 1.4,
            advance_cache: HashMap::new(),
        })
    }

    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    /// Leading multiplier applied on top of the font size.
    pub fn set_line_spacing(&mut self, line_spacing: f32) {
        self.line_spacing = line_spacing;
    }

    fn advance(&mut self, ch: char, font_size: u32) -> f32 {
        let key = (ch, font_size);
        if !self.advance_cache.contains_key(&key) {
            let metrics = self.font.metrics(ch, font_size as f32);
            self.advance_cache.insert(key, metrics.advance_width);
        }
        self.advance_cache[&key]
    }
}

impl TextMeasurer for FontMeasurer {
    fn line_width(&mut self, content: &str, font_size: u32) -> f32 {
        let chars: Vec<char> = content.chars().collect();
        let mut width = 0.0;
        for (i, &ch) in chars.iter().enumerate() {
            width += self.advance(ch, font_size);
            if i + 1 < chars.len() {
                if let Some(kern) = self.font.horizontal_kern(ch, chars[i + 1], font_size as f32) {
                    width += kern;
                }
            }
        }
        width
    }

    fn line_height(&mut self, font_size: u32) -> f32 {
        font_size as f32 * self.line_spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_garbage_font_data() {
        assert!(FontMeasurer::from_bytes(vec![0, 1, 2, 3], "garbage").is_err());
    }
}
