//! Sentence segmentation
//!
//! Turns raw sentence text into the initial list of minimal chunks. The
//! preferred backend walks UAX-29 word bounds and then coalesces same-script
//! kana/kanji runs (UAX-29 alone emits one unit per character for unspaced
//! Japanese); the fallback splits purely on script-class transitions so the
//! segmenter works even without boundary data. Either way the worst case is
//! one chunk per character, never an error.

use std::sync::OnceLock;

use log::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::scripts::{classify, CharClass};

/// Ordered chunk list threaded through the pipeline.
pub type ChunkSequence = Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    WordBounds,
    ScriptRuns,
}

static BACKEND: OnceLock<Backend> = OnceLock::new();

/// Pick the segmentation backend once per process. The probe only has to
/// establish that the word-bounds iterator is lossless; writes are
/// idempotent so no locking beyond the cell itself is needed.
fn backend() -> Backend {
    *BACKEND.get_or_init(|| {
        let canary = "日本語とRustの文、テスト。";
        let rejoined: String = canary.split_word_bounds().collect();
        if rejoined == canary {
            debug!("segmenter backend: uax-29 word bounds");
            Backend::WordBounds
        } else {
            debug!("segmenter backend: script-run fallback");
            Backend::ScriptRuns
        }
    })
}

/// Split `text` into minimal chunks.
///
/// Whitespace-only units are dropped; punctuation becomes its own chunk so
/// the later punctuation-absorption pass has something to work with.
pub fn segment(text: &str) -> ChunkSequence {
    let units: Vec<&str> = match backend() {
        Backend::WordBounds => text.split_word_bounds().collect(),
        Backend::ScriptRuns => script_runs(text),
    };
    coalesce(units)
}

/// Locale-independent fallback: break at every script-class transition and
/// emit each punctuation character as its own unit.
fn script_runs(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut run_start = 0usize;
    let mut run_class: Option<CharClass> = None;

    for (i, ch) in text.char_indices() {
        let class = classify(ch);
        let boundary = match run_class {
            None => false,
            Some(prev) => prev != class || class == CharClass::Delimiter,
        };
        if boundary {
            units.push(&text[run_start..i]);
            run_start = i;
        }
        run_class = Some(class);
    }
    if run_start < text.len() {
        units.push(&text[run_start..]);
    }
    units
}

/// Merge adjacent units that are uniform runs of the same CJK class, drop
/// whitespace, and break delimiter units apart character by character.
fn coalesce(units: Vec<&str>) -> ChunkSequence {
    let mut chunks: ChunkSequence = Vec::with_capacity(units.len());
    let mut classes: Vec<Option<CharClass>> = Vec::with_capacity(units.len());

    for unit in units {
        if unit.is_empty() || unit.chars().all(char::is_whitespace) {
            continue;
        }
        let class = uniform_class(unit);
        if class == Some(CharClass::Delimiter) {
            for ch in unit.chars() {
                if ch.is_whitespace() {
                    continue;
                }
                chunks.push(ch.to_string());
                classes.push(Some(CharClass::Delimiter));
            }
            continue;
        }
        let joinable = matches!(
            class,
            Some(CharClass::Ideograph) | Some(CharClass::Hiragana) | Some(CharClass::Katakana)
        );
        if joinable && classes.last().copied().flatten() == class {
            if let Some(prev) = chunks.last_mut() {
                prev.push_str(unit);
                continue;
            }
        }
        chunks.push(unit.to_string());
        classes.push(class);
    }

    chunks
}

/// Class shared by every character of `unit`, if any.
fn uniform_class(unit: &str) -> Option<CharClass> {
    let mut chars = unit.chars();
    let first = classify(chars.next()?);
    for ch in chars {
        if classify(ch) != first {
            return None;
        }
    }
    Some(first)
}
