//! Agglutination engine
//!
//! Repeatedly merges adjacent chunks under a fixed, ordered rule list until a
//! full left-to-right pass produces no merge, then absorbs standalone
//! punctuation into the chunk before it. Every rule strictly reduces the
//! chunk count, so the fixpoint loop terminates; re-running the engine on
//! its own output returns it unchanged.

use log::debug;

use crate::scripts::{
    classify, is_clause_punctuation, is_delimiter_run, is_ideograph_run, is_small_kana, CharClass,
    COLLOCATIONS, PARTICLES, SUFFIXES,
};
use crate::segmenter::ChunkSequence;

/// A pure merge predicate over an adjacent chunk pair.
pub struct MergeRule {
    pub name: &'static str,
    pub applies: fn(prev: &str, curr: &str) -> bool,
}

/// Rule list in priority order; at each position the first match wins.
pub const RULES: &[MergeRule] = &[
    MergeRule { name: "small-kana", applies: small_kana_rule },
    MergeRule { name: "collocation", applies: collocation_rule },
    MergeRule { name: "suffix", applies: suffix_rule },
    MergeRule { name: "script-continuity", applies: continuity_rule },
    MergeRule { name: "particle", applies: particle_rule },
];

/// A small/subscript kana chunk can never stand alone.
fn small_kana_rule(_prev: &str, curr: &str) -> bool {
    !curr.is_empty() && curr.chars().all(is_small_kana)
}

/// Two halves of a known fixed phrase the segmenter tends to split.
fn collocation_rule(prev: &str, curr: &str) -> bool {
    COLLOCATIONS
        .iter()
        .any(|phrase| phrase.len() == prev.len() + curr.len() && phrase.starts_with(prev) && phrase.ends_with(curr))
}

/// Grammatical endings, suffixes, and honorifics attach leftward.
fn suffix_rule(_prev: &str, curr: &str) -> bool {
    SUFFIXES.iter().any(|s| curr == *s || curr.starts_with(s))
}

/// Kanji compounds build up; a lone kanji root takes its hiragana ending.
fn continuity_rule(prev: &str, curr: &str) -> bool {
    if is_ideograph_run(prev) && is_ideograph_run(curr) {
        return true;
    }
    let lone_root = is_ideograph_run(prev) && prev.chars().count() == 1;
    lone_root
        && curr
            .chars()
            .next()
            .is_some_and(|c| classify(c) == CharClass::Hiragana)
}

/// A standalone single-character particle attaches leftward.
fn particle_rule(_prev: &str, curr: &str) -> bool {
    let mut chars = curr.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => PARTICLES.contains(&ch),
        _ => false,
    }
}

/// Merging never crosses a sentence boundary: a chunk that is punctuation,
/// or already ends in clause punctuation, accepts nothing. This is also what
/// keeps the engine idempotent after punctuation absorption.
fn blocks_merge(prev: &str) -> bool {
    is_delimiter_run(prev) || prev.chars().last().is_some_and(is_clause_punctuation)
}

/// Run the rule list to fixpoint, then absorb punctuation.
pub fn agglutinate(chunks: ChunkSequence) -> ChunkSequence {
    let mut current = chunks;
    let mut passes = 0u32;
    loop {
        let (next, merged) = run_pass(&current);
        passes += 1;
        current = next;
        if !merged {
            break;
        }
    }
    debug!("agglutination reached fixpoint after {} pass(es)", passes);
    absorb_punctuation(current)
}

/// One left-to-right scan; builds a fresh sequence instead of splicing the
/// input mid-iteration.
fn run_pass(chunks: &[String]) -> (ChunkSequence, bool) {
    let mut out: ChunkSequence = Vec::with_capacity(chunks.len());
    let mut merged = false;
    for chunk in chunks {
        if let Some(prev) = out.last_mut() {
            if !blocks_merge(prev) && RULES.iter().any(|r| (r.applies)(prev, chunk)) {
                prev.push_str(chunk);
                merged = true;
                continue;
            }
        }
        out.push(chunk.clone());
    }
    (out, merged)
}

/// A chunk consisting solely of punctuation merges into the chunk before it;
/// a leading one has nothing to attach to and stays.
fn absorb_punctuation(chunks: ChunkSequence) -> ChunkSequence {
    let mut out: ChunkSequence = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        if is_delimiter_run(&chunk) {
            if let Some(prev) = out.last_mut() {
                prev.push_str(&chunk);
                continue;
            }
        }
        out.push(chunk);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(parts: &[&str]) -> ChunkSequence {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn particles_attach_to_the_preceding_chunk() {
        let out = agglutinate(chunks(&["私", "は", "学生", "です", "。"]));
        assert_eq!(out, chunks(&["私は", "学生", "です。"]));
    }

    #[test]
    fn lone_kanji_takes_its_conjugated_ending() {
        let out = agglutinate(chunks(&["猫", "が", "逃", "げました", "。"]));
        assert_eq!(out, chunks(&["猫が", "逃げました。"]));
    }

    #[test]
    fn kanji_runs_build_compounds() {
        let out = agglutinate(chunks(&["東京", "大学"]));
        assert_eq!(out, chunks(&["東京大学"]));
    }

    #[test]
    fn small_kana_never_stands_alone() {
        let out = agglutinate(chunks(&["ちょ", "っ", "と"]));
        assert_eq!(out, chunks(&["ちょっと"]));
    }

    #[test]
    fn collocations_are_reassembled() {
        let out = agglutinate(chunks(&["たく", "さん", "食べる"]));
        assert_eq!(out[0], "たくさん");
    }

    #[test]
    fn honorifics_absorb_leftward() {
        let out = agglutinate(chunks(&["田中", "さん", "は"]));
        assert_eq!(out, chunks(&["田中さんは"]));
    }

    #[test]
    fn merging_never_crosses_sentence_punctuation() {
        let out = agglutinate(chunks(&["行く", "。", "は"]));
        assert_eq!(out, chunks(&["行く。", "は"]));
    }

    #[test]
    fn leading_punctuation_stays_put() {
        let out = agglutinate(chunks(&["「", "はい"]));
        assert_eq!(out, chunks(&["「", "はい"]));
    }

    #[test]
    fn idempotent_at_fixpoint() {
        let cases: &[&[&str]] = &[
            &["私", "は", "学生", "です", "。"],
            &["猫", "が", "逃", "げました", "。"],
            &["行く", "。", "は"],
            &["たく", "さん"],
        ];
        for case in cases {
            let once = agglutinate(chunks(case));
            let twice = agglutinate(once.clone());
            assert_eq!(twice, once, "not idempotent for {case:?}");
        }
    }

    #[test]
    fn concatenation_invariant_holds() {
        let input = chunks(&["猫", "が", "逃", "げました", "。"]);
        let joined: String = input.concat();
        assert_eq!(agglutinate(input).concat(), joined);
    }

    #[test]
    fn degenerate_inputs_are_fine() {
        assert!(agglutinate(Vec::new()).is_empty());
        assert_eq!(agglutinate(chunks(&["あ"])), chunks(&["あ"]));
    }
}
