//! Chunk refinement
//!
//! The second, order-sensitive pass over the agglutinated chunk list: first
//! relocate particles and prefixes that settled in the wrong chunk, then
//! force splits at clause boundaries. Relocation must run before splitting,
//! since the split rules assume every particle already sits in its home
//! chunk. No step ever emits an empty chunk or disturbs concatenation order.

use crate::scripts::{
    is_terminator, HONORIFIC_PREFIXES, LEADING_PARTICLES, OBJECT_PARTICLE, SPLIT_AFTER_ADVERBS,
    SPLIT_BEFORE_ADVERBS,
};
use crate::segmenter::ChunkSequence;

/// Apply all refinement passes in their fixed order.
pub fn refine(chunks: ChunkSequence) -> ChunkSequence {
    let chunks = relocate_trailing_prefixes(chunks);
    let chunks = relocate_leading_particles(chunks);
    let chunks = split_after_char(chunks, is_terminator);
    let chunks = split_after_char(chunks, |ch| ch == OBJECT_PARTICLE);
    split_around_adverbs(chunks)
}

/// An honorific prefix (お/ご) stranded at the end of a multi-character
/// chunk belongs to the word that follows; carry it over.
fn relocate_trailing_prefixes(chunks: ChunkSequence) -> ChunkSequence {
    let mut out: ChunkSequence = Vec::with_capacity(chunks.len());
    let mut carry = String::new();
    for chunk in chunks {
        let mut current = if carry.is_empty() {
            chunk
        } else {
            std::mem::take(&mut carry) + &chunk
        };
        if current.chars().count() > 1 {
            if let Some(last) = current.chars().last() {
                if HONORIFIC_PREFIXES.contains(&last) {
                    current.truncate(current.len() - last.len_utf8());
                    carry.push(last);
                }
            }
        }
        out.push(current);
    }
    // A prefix stripped from the final chunk has nowhere to go; put it back.
    if !carry.is_empty() {
        match out.last_mut() {
            Some(prev) => prev.push_str(&carry),
            None => out.push(carry),
        }
    }
    out
}

/// A chunk starting with は/を lost its particle's host to a split; move the
/// particle onto the previous chunk, dropping the current one if emptied.
fn relocate_leading_particles(chunks: ChunkSequence) -> ChunkSequence {
    let mut out: ChunkSequence = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        if let Some(first) = chunk.chars().next() {
            if LEADING_PARTICLES.contains(&first) {
                if let Some(prev) = out.last_mut() {
                    prev.push(first);
                    let rest = &chunk[first.len_utf8()..];
                    if !rest.is_empty() {
                        out.push(rest.to_string());
                    }
                    continue;
                }
            }
        }
        out.push(chunk);
    }
    out
}

/// Split each chunk immediately after every character matching `pred`,
/// except at the very start; the matched character stays with the left
/// piece, and a chunk equal to only that character is left as-is.
fn split_after_char(chunks: ChunkSequence, pred: impl Fn(char) -> bool) -> ChunkSequence {
    let mut out: ChunkSequence = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let mut piece = String::new();
        for (index, ch) in chunk.chars().enumerate() {
            piece.push(ch);
            if index > 0 && pred(ch) {
                out.push(std::mem::take(&mut piece));
            }
        }
        if !piece.is_empty() {
            out.push(piece);
        }
    }
    out
}

/// Split immediately after one adverb group and immediately before the
/// other, wherever they occur embedded inside a chunk.
fn split_around_adverbs(chunks: ChunkSequence) -> ChunkSequence {
    let mut out: ChunkSequence = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let mut cuts: Vec<usize> = Vec::new();
        for adverb in SPLIT_AFTER_ADVERBS {
            for (pos, m) in chunk.match_indices(adverb) {
                cuts.push(pos + m.len());
            }
        }
        for adverb in SPLIT_BEFORE_ADVERBS {
            for (pos, _) in chunk.match_indices(adverb) {
                cuts.push(pos);
            }
        }
        cuts.retain(|&cut| cut > 0 && cut < chunk.len());
        cuts.sort_unstable();
        cuts.dedup();

        let mut start = 0usize;
        for cut in cuts {
            out.push(chunk[start..cut].to_string());
            start = cut;
        }
        out.push(chunk[start..].to_string());
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
    fn stranded_honorific_prefix_moves_forward() {
        let out = relocate_trailing_prefixes(chunks(&["そのお", "菓子"]));
        assert_eq!(out, chunks(&["その", "お菓子"]));
    }

    #[test]
    fn single_character_prefix_chunk_is_untouched() {
        let out = relocate_trailing_prefixes(chunks(&["お", "水"]));
        assert_eq!(out, chunks(&["お", "水"]));
    }

    #[test]
    fn prefix_on_the_final_chunk_stays() {
        let out = relocate_trailing_prefixes(chunks(&["挨拶はお"]));
        assert_eq!(out, chunks(&["挨拶はお"]));
    }

    #[test]
    fn leading_particle_moves_back() {
        let out = relocate_leading_particles(chunks(&["これ", "は本"]));
        assert_eq!(out, chunks(&["これは", "本"]));
    }

    #[test]
    fn emptied_chunk_is_removed() {
        let out = relocate_leading_particles(chunks(&["これ", "は"]));
        assert_eq!(out, chunks(&["これは"]));
    }

    #[test]
    fn leading_particle_in_first_chunk_stays() {
        let out = relocate_leading_particles(chunks(&["はい"]));
        assert_eq!(out, chunks(&["はい"]));
    }

    #[test]
    fn splits_after_sentence_terminator() {
        let out = refine(chunks(&["です。さて"]));
        assert_eq!(out, chunks(&["です。", "さて"]));
    }

    #[test]
    fn terminator_only_chunk_is_left_as_is() {
        let out = refine(chunks(&["。"]));
        assert_eq!(out, chunks(&["。"]));
    }

    #[test]
    fn terminator_at_chunk_end_splits_nothing() {
        let out = refine(chunks(&["です。"]));
        assert_eq!(out, chunks(&["です。"]));
    }

    #[test]
    fn splits_after_object_particle() {
        let out = refine(chunks(&["本を読む"]));
        assert_eq!(out, chunks(&["本を", "読む"]));
    }

    #[test]
    fn splits_after_discourse_adverb() {
        let out = split_around_adverbs(chunks(&["でも行きたい"]));
        assert_eq!(out, chunks(&["でも", "行きたい"]));
    }

    #[test]
    fn splits_before_intensifier() {
        let out = split_around_adverbs(chunks(&["今日はとても暑い"]));
        assert_eq!(out, chunks(&["今日は", "とても暑い"]));
    }

    #[test]
    fn relocation_runs_before_splitting() {
        // The leading particle settles into the previous chunk first, so the
        // split sees the particle in its home chunk.
        let out = refine(chunks(&["本", "を読む"]));
        assert_eq!(out, chunks(&["本を", "読む"]));
    }

    #[test]
    fn never_emits_empty_chunks() {
        let cases: &[&[&str]] = &[&["。さて"], &["を"], &["でも"], &["とても"]];
        for case in cases {
            for chunk in refine(chunks(case)) {
                assert!(!chunk.is_empty(), "empty chunk from {case:?}");
            }
        }
    }

    #[test]
    fn concatenation_is_preserved() {
        let input = chunks(&["そのお", "菓子を食べた。でも"]);
        let joined: String = input.concat();
        assert_eq!(refine(input).concat(), joined);
    }
}
