//! Kotoba text engine
//!
//! Chunking and adaptive fit sizing for the vocabulary trainer: splits
//! boundary-less Japanese sentences into game-usable chunks while keeping
//! the vocabulary term under test intact, and computes the largest legible
//! font size for a string in a bounded box. The engine consumes plain
//! strings and returns plain data; games, rendering, and persistence live
//! in the host.

pub mod agglutination;
pub mod anchor;
pub mod fit;
pub mod fonts;
pub mod refiner;
pub mod scripts;
pub mod segmenter;

// Re-export commonly used functions and types
pub use fit::{fit_font_size, FitRequest, FitResult, FixedAdvanceMeasurer, TextMeasurer};
pub use fonts::FontMeasurer;
pub use segmenter::ChunkSequence;

use unicode_segmentation::UnicodeSegmentation;

/// Run the full chunking pipeline: segment, protect the anchor, agglutinate
/// to fixpoint, refine, and finally repair any anchor boundary the later
/// passes moved. An empty sentence yields an empty list, never an error.
pub fn tokenize_sentence(text: &str, anchor: Option<&str>) -> ChunkSequence {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let chunks = segmenter::segment(text);
    let chunks = anchor::protect(chunks, anchor);
    let chunks = agglutination::agglutinate(chunks);
    let chunks = refiner::refine(chunks);
    anchor::repair(chunks, anchor)
}

/// `tokenize_sentence` with the chunk list serialized as a JSON array, for
/// transport across the FFI boundary.
pub fn tokenize_sentence_json(text: &str, anchor: Option<&str>) -> serde_json::Result<String> {
    serde_json::to_string(&tokenize_sentence(text, anchor))
}

/// Byte offsets after which a visual line break is acceptable: after every
/// sentence/clause terminator, and after the soft-break particles when the
/// next character is not punctuation. Callers turn these into `<wbr>`
/// equivalents; the engine emits no markup.
pub fn break_opportunities(text: &str) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut iter = text.char_indices().peekable();
    while let Some((i, ch)) = iter.next() {
        let end = i + ch.len_utf8();
        if end == text.len() {
            break;
        }
        if scripts::is_terminator(ch) {
            offsets.push(end);
            continue;
        }
        let next_is_punct = iter
            .peek()
            .is_some_and(|&(_, next)| scripts::is_clause_punctuation(next));
        if scripts::SOFT_BREAK_PARTICLES.contains(&ch) && !next_is_punct {
            offsets.push(end);
        }
    }
    offsets
}

/// Grapheme list of a word with whitespace removed, in original order; the
/// word-builder game shuffles these into its letter pool.
pub fn char_pool(word: &str) -> Vec<String> {
    word.graphemes(true)
        .filter(|g| !g.chars().all(char::is_whitespace))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_sentence_chunks_naturally() {
        let chunks = tokenize_sentence("私は学生です。", None);
        assert_eq!(chunks, vec!["私は", "学生", "です。"]);
    }

    #[test]
    fn conjugated_verb_stays_grouped_and_punctuation_attaches() {
        let chunks = tokenize_sentence("猫が逃げました。", Some("逃げる"));
        assert_eq!(chunks, vec!["猫が", "逃げました。"]);
        assert!(chunks.last().is_some_and(|c| c.ends_with('。')));
    }

    #[test]
    fn anchor_survives_the_whole_pipeline() {
        let chunks = tokenize_sentence("私は日本語を勉強します。", Some("日本語"));
        assert!(
            chunks.iter().any(|c| c.contains("日本語")),
            "anchor split across {chunks:?}"
        );
    }

    #[test]
    fn anchor_spanning_segmenter_chunks_is_coalesced() {
        let chunks = tokenize_sentence("お水を飲む", Some("お水"));
        assert!(chunks.iter().any(|c| c.contains("お水")), "got {chunks:?}");
    }

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(tokenize_sentence("", None).is_empty());
        assert!(tokenize_sentence("   ", Some("何か")).is_empty());
    }

    #[test]
    fn concatenation_reproduces_the_sentence() {
        let texts = [
            "私は学生です。",
            "猫が逃げました。",
            "東京大学でたくさん勉強した。",
            "コーヒーを飲む",
        ];
        for text in texts {
            let joined = tokenize_sentence(text, None).concat();
            assert_eq!(joined, text, "characters lost or invented for {text}");
        }
    }

    #[test]
    fn single_character_sentence() {
        assert_eq!(tokenize_sentence("あ", None), vec!["あ"]);
    }

    #[test]
    fn json_payload_round_trips() {
        let json = tokenize_sentence_json("私は学生です。", None).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec!["私は", "学生", "です。"]);
    }

    #[test]
    fn break_opportunities_follow_particles_and_terminators() {
        let text = "私は学生です。";
        let offsets = break_opportunities(text);
        // After は (byte 6) and after the で of です (byte 15); nothing
        // after the trailing 。.
        assert_eq!(offsets, vec![6, 15]);
        for &offset in &offsets {
            assert!(text.is_char_boundary(offset));
        }
    }

    #[test]
    fn no_break_before_clause_punctuation() {
        let offsets = break_opportunities("行くと、");
        assert!(!offsets.contains(&"行くと".len()));
    }

    #[test]
    fn char_pool_strips_whitespace_and_keeps_order() {
        assert_eq!(char_pool("日本 語"), vec!["日", "本", "語"]);
        assert!(char_pool("  ").is_empty());
    }
}
