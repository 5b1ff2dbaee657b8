//! Script classification and rule tables
//!
//! Character classes and the closed word lists the chunking pipeline runs on.
//! The rule set is heuristic, not a grammar: it only has to produce chunks
//! that feel natural when shuffled in a game, so every table here is a small
//! fixed inventory rather than dictionary data.

use unicode_script::{Script, UnicodeScript};

/// Coarse character class used for boundary decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// CJK unified ideographs (kanji).
    Ideograph,
    /// Hiragana, the "plain" phonetic alphabet.
    Hiragana,
    /// Katakana, including the prolonged-sound mark.
    Katakana,
    /// Latin letters, digits, and anything else word-like.
    Word,
    /// Punctuation and whitespace.
    Delimiter,
}

/// Classify a single character for script-boundary splitting.
pub fn classify(ch: char) -> CharClass {
    if ch.is_whitespace() {
        return CharClass::Delimiter;
    }
    // Script::Common marks that still belong to a kana/kanji run.
    match ch {
        'ー' => return CharClass::Katakana,
        '々' | '〆' => return CharClass::Ideograph,
        _ => {}
    }
    match ch.script() {
        Script::Han => CharClass::Ideograph,
        Script::Hiragana => CharClass::Hiragana,
        Script::Katakana => CharClass::Katakana,
        _ => {
            if is_delimiter(ch) {
                CharClass::Delimiter
            } else {
                CharClass::Word
            }
        }
    }
}

/// True for punctuation in either width, plus whitespace.
pub fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || is_clause_punctuation(ch) || ch.is_ascii_punctuation() || matches!(ch, '「' | '」' | '『' | '』' | '（' | '）' | '・' | '･')
}

/// Sentence/clause punctuation absorbed into the preceding chunk.
pub fn is_clause_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '。' | '、' | '！' | '？' | '：' | '；' | '，' | '．' | '.' | ',' | '!' | '?'
    )
}

/// Terminators that force a split immediately after themselves.
pub fn is_terminator(ch: char) -> bool {
    matches!(ch, '。' | '、' | '！' | '？')
}

/// Small/subscript kana and the prolonged-sound mark: none of these can
/// stand alone as a chunk.
pub fn is_small_kana(ch: char) -> bool {
    matches!(
        ch,
        'ぁ' | 'ぃ' | 'ぅ' | 'ぇ' | 'ぉ' | 'っ' | 'ゃ' | 'ゅ' | 'ょ' | 'ゎ'
            | 'ァ' | 'ィ' | 'ゥ' | 'ェ' | 'ォ' | 'ッ' | 'ャ' | 'ュ' | 'ョ' | 'ヮ'
            | 'ヵ' | 'ヶ' | 'ー'
    )
}

/// Single-character grammatical particles merged into the preceding chunk.
pub const PARTICLES: &[char] = &['は', 'が', 'を', 'に', 'で', 'へ', 'と', 'も', 'の'];

/// Grammatical endings, suffixes, and honorifics absorbed into the preceding
/// chunk. です/ます are deliberately absent so the copula stays its own chunk.
pub const SUFFIXES: &[&str] = &[
    "さん", "ちゃん", "くん", "さま", "たち", // honorifics
    "ました", "ません", "ない", "たい", // simple endings
];

/// Adverbial collocations the segmenter tends to split in half.
pub const COLLOCATIONS: &[&str] = &["たくさん", "いろいろ", "そろそろ", "だんだん", "もちろん", "ゆっくり"];

/// Honorific prefixes: stranded at the end of a chunk they belong to the
/// start of the next one.
pub const HONORIFIC_PREFIXES: &[char] = &['お', 'ご'];

/// Particles relocated from the head of a chunk to the tail of the previous.
pub const LEADING_PARTICLES: &[char] = &['は', 'を'];

/// The object marker; a chunk is split immediately after it.
pub const OBJECT_PARTICLE: char = 'を';

/// Discourse adverbs that force a split immediately after themselves.
pub const SPLIT_AFTER_ADVERBS: &[&str] = &["そして", "しかし", "でも"];

/// Discourse adverbs that force a split immediately before themselves.
pub const SPLIT_BEFORE_ADVERBS: &[&str] = &["とても", "すごく"];

/// Particles that mark a soft line-break opportunity when not followed by
/// clause punctuation.
pub const SOFT_BREAK_PARTICLES: &[char] = &['て', 'と', 'が', 'は', 'を', 'に', 'で'];

/// Separator characters stripped from both anchor and text before matching.
pub const ANCHOR_SEPARATORS: &[char] = &['・', '･'];

/// True if every character of `s` is an ideograph.
pub fn is_ideograph_run(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| classify(c) == CharClass::Ideograph)
}

/// True if every character of `s` is punctuation or whitespace.
pub fn is_delimiter_run(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_delimiter)
}
