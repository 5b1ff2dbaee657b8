//! Anchor protection
//!
//! Keeps the vocabulary term under test intact as a single chunk. Matching
//! happens in a normalized space: Unicode whitespace and the ・/･ separators
//! are stripped from both the anchor and the chunk concatenation, so an
//! anchor written with incidental spaces or middle dots still lines up with
//! the sentence rendering. One policy, applied at every call site.

use std::ops::Range;

use log::debug;

use crate::scripts::ANCHOR_SEPARATORS;
use crate::segmenter::ChunkSequence;

/// Strip whitespace and separator characters for matching purposes.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && !ANCHOR_SEPARATORS.contains(c))
        .collect()
}

/// Coalesce every chunk span overlapping an occurrence of `anchor` into a
/// single chunk. A missing or absent anchor is a silent no-op; anchors are
/// advisory, not mandatory.
pub fn protect(chunks: ChunkSequence, anchor: Option<&str>) -> ChunkSequence {
    let needle = match anchor {
        Some(a) => normalize(a),
        None => return chunks,
    };
    if needle.is_empty() || chunks.is_empty() {
        return chunks;
    }

    // Offset map: each chunk's byte range in the normalized concatenation.
    let mut stripped = String::new();
    let mut ranges: Vec<Range<usize>> = Vec::with_capacity(chunks.len());
    for chunk in &chunks {
        let start = stripped.len();
        stripped.push_str(&normalize(chunk));
        ranges.push(start..stripped.len());
    }

    // Overlap-free forward search for every occurrence.
    let mut spans: Vec<Range<usize>> = Vec::new();
    let mut from = 0usize;
    while let Some(pos) = stripped[from..].find(&needle) {
        let begin = from + pos;
        spans.push(begin..begin + needle.len());
        from = begin + needle.len();
    }
    if spans.is_empty() {
        return chunks;
    }
    debug!("anchor '{}' matched {} span(s)", needle, spans.len());

    // Index-to-group mapping: chunks sharing a group id collapse into one.
    // Spans are disjoint and sorted, so assigning the leading index of each
    // affected span is enough; nothing is spliced while scanning.
    let mut group: Vec<usize> = (0..chunks.len()).collect();
    for span in &spans {
        let mut first = None;
        let mut last = None;
        for (i, range) in ranges.iter().enumerate() {
            if range.start < span.end && range.end > span.start {
                first.get_or_insert(i);
                last = Some(i);
            }
        }
        if let (Some(f), Some(l)) = (first, last) {
            for g in &mut group[f..=l] {
                *g = f;
            }
        }
    }

    let mut merged: ChunkSequence = Vec::with_capacity(chunks.len());
    let mut last_group = usize::MAX;
    for (chunk, g) in chunks.into_iter().zip(group) {
        if g == last_group {
            if let Some(prev) = merged.last_mut() {
                prev.push_str(&chunk);
                continue;
            }
        }
        merged.push(chunk);
        last_group = g;
    }

    repair(merged, anchor)
}

/// Defensive invariant, not a primary mechanism: if a later pass moved a
/// boundary into the middle of the anchor, the two halves sit in adjacent
/// chunks and a single merge restores it. Only pairs where neither side
/// already contains the anchor are merged, so an anchored chunk never
/// swallows its neighbors.
pub fn repair(chunks: ChunkSequence, anchor: Option<&str>) -> ChunkSequence {
    let needle = match anchor {
        Some(a) => normalize(a),
        None => return chunks,
    };
    if needle.is_empty() {
        return chunks;
    }

    let mut out: ChunkSequence = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        if let Some(prev) = out.last_mut() {
            let prev_has = normalize(prev).contains(&needle);
            let curr_has = normalize(&chunk).contains(&needle);
            if !prev_has && !curr_has {
                let joined = normalize(prev) + &normalize(&chunk);
                if joined.contains(&needle) {
                    prev.push_str(&chunk);
                    continue;
                }
            }
        }
        out.push(chunk);
    }
    out
}
