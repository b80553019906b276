//! Approximate string similarity on a 0–100 integer scale.
//!
//! Everything here is built on one primitive: Ratcliff/Obershelp matching,
//! which repeatedly takes the longest common run of characters and recurses on
//! the unmatched text to its left and right. The total size of the resulting
//! matching blocks, relative to the combined length of both strings, is the
//! raw similarity. The other scorers reshape their inputs before calling it:
//!
//! - [`partial_ratio`] scores the shorter string against equal-length windows
//!   of the longer one.
//! - [`token_sort_ratio`] and [`token_set_ratio`] compare sorted words, so
//!   word order and extra words matter less.
//! - [`weighted_ratio`] blends all of the above; [`extract_best`] uses it to
//!   pick the closest candidate out of a corpus.
//!
//! All functions are pure and deterministic. Any empty operand scores 0.

use std::collections::{BTreeSet, HashMap};

/// A similarity score in `0..=100`.
pub type Score = u8;

/// Scale applied to token-based scores in [`weighted_ratio`].
const UNBASE_SCALE: f64 = 0.95;
/// Scale applied to partial scores when the length ratio is moderate.
const PARTIAL_SCALE: f64 = 0.90;
/// Scale applied to partial scores when one string dwarfs the other.
const PARTIAL_SCALE_LONG: f64 = 0.60;

/// Second-operand length at which very frequent characters stop seeding matches.
const POPULAR_MIN_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Ratcliff/Obershelp matcher
// ---------------------------------------------------------------------------

/// A run of `len` equal characters at `a[a_start..]` and `b[b_start..]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Block {
    a_start: usize,
    b_start: usize,
    len: usize,
}

/// Longest-common-run matcher over two character slices.
struct SequenceMatcher<'s> {
    a: &'s [char],
    b: &'s [char],
    /// Positions of each character of `b`, ascending.
    b2j: HashMap<char, Vec<usize>>,
}

impl<'s> SequenceMatcher<'s> {
    fn new(a: &'s [char], b: &'s [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }
        if b.len() >= POPULAR_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }
        Self { a, b, b2j }
    }

    /// Longest matching run inside `a[alo..ahi]` × `b[blo..bhi]`.
    ///
    /// Among equally long runs the one starting earliest in `a` wins, then the
    /// one starting earliest in `b`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Block {
        let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0usize);
        let mut run_len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next_run_len = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_run_len.insert(j, k);
                    if k > best_len {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_len = k;
                    }
                }
            }
            run_len = next_run_len;
        }

        // Popular characters never seed a run but may still extend one.
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_len += 1;
        }
        while best_i + best_len < ahi
            && best_j + best_len < bhi
            && self.a[best_i + best_len] == self.b[best_j + best_len]
        {
            best_len += 1;
        }

        Block {
            a_start: best_i,
            b_start: best_j,
            len: best_len,
        }
    }

    /// All matching blocks in ascending order, adjacent blocks merged, followed
    /// by a zero-length sentinel at `(a.len(), b.len())`.
    fn matching_blocks(&self) -> Vec<Block> {
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut found = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let block = self.longest_match(alo, ahi, blo, bhi);
            if block.len == 0 {
                continue;
            }
            found.push(block);
            if alo < block.a_start && blo < block.b_start {
                pending.push((alo, block.a_start, blo, block.b_start));
            }
            let (a_end, b_end) = (block.a_start + block.len, block.b_start + block.len);
            if a_end < ahi && b_end < bhi {
                pending.push((a_end, ahi, b_end, bhi));
            }
        }
        found.sort_unstable();

        let mut merged: Vec<Block> = Vec::with_capacity(found.len() + 1);
        for block in found {
            match merged.last_mut() {
                Some(last)
                    if last.a_start + last.len == block.a_start
                        && last.b_start + last.len == block.b_start =>
                {
                    last.len += block.len;
                }
                _ => merged.push(block),
            }
        }
        merged.push(Block {
            a_start: self.a.len(),
            b_start: self.b.len(),
            len: 0,
        });
        merged
    }

    /// `2·M / (|a| + |b|)` where `M` is the number of matched characters.
    fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matched: usize = self.matching_blocks().iter().map(|b| b.len).sum();
        2.0 * matched as f64 / total as f64
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Round half to even and clamp into the score range.
fn to_score(value: f64) -> Score {
    value.round_ties_even().clamp(0.0, 100.0) as Score
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Canonical preprocessing used by the token scorers and [`extract_best`].
///
/// Drops Latin-1 supplement code points (`U+0080..=U+00FF`), turns every other
/// non-word character into a space, lower-cases and trims. Inner runs of
/// spaces are kept; the token scorers split on whitespace anyway.
pub fn full_process(text: &str) -> String {
    let replaced: String = text
        .chars()
        .filter(|c| !('\u{80}'..='\u{ff}').contains(c))
        .map(|c| if is_word_char(c) { c } else { ' ' })
        .collect();
    replaced.to_lowercase().trim().to_string()
}

fn chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

/// Directional ratio in `0.0..=1.0`, `a` matched against `b`.
fn raw_ratio(a: &[char], b: &[char]) -> f64 {
    SequenceMatcher::new(a, b).ratio()
}

// ---------------------------------------------------------------------------
// Public scorers
// ---------------------------------------------------------------------------

/// Ratcliff/Obershelp similarity of `a` and `b`.
///
/// Symmetric: the operands are put in a canonical order (shorter first, then
/// lexicographic) before matching, so `ratio(a, b) == ratio(b, a)`.
pub fn ratio(a: &str, b: &str) -> Score {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (a, b) = (chars(a), chars(b));
    let (first, second) = if (a.len(), &a) <= (b.len(), &b) {
        (&a, &b)
    } else {
        (&b, &a)
    };
    to_score(100.0 * raw_ratio(first, second))
}

/// Best [`ratio`] of the shorter string against windows of the longer one.
///
/// One window is tried per matching block: it starts where the block would
/// place the shorter string inside the longer one and spans the shorter
/// string's length. A near-perfect window short-circuits to 100.
pub fn partial_ratio(a: &str, b: &str) -> Score {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let (a, b) = (chars(a), chars(b));
    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

    let mut best = 0.0f64;
    for block in SequenceMatcher::new(shorter, longer).matching_blocks() {
        let start = block.b_start.saturating_sub(block.a_start);
        let end = (start + shorter.len()).min(longer.len());
        let r = raw_ratio(shorter, &longer[start..end]);
        if r > 0.995 {
            return 100;
        }
        best = best.max(r);
    }
    to_score(100.0 * best)
}

fn sorted_tokens(text: &str, process: bool) -> String {
    let processed;
    let text = if process {
        processed = full_process(text);
        processed.as_str()
    } else {
        text
    };
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_sort(a: &str, b: &str, partial: bool, process: bool) -> Score {
    let (sorted_a, sorted_b) = (sorted_tokens(a, process), sorted_tokens(b, process));
    if partial {
        partial_ratio(&sorted_a, &sorted_b)
    } else {
        ratio(&sorted_a, &sorted_b)
    }
}

fn token_set(a: &str, b: &str, partial: bool, process: bool) -> Score {
    if !process && a == b {
        return 100;
    }
    let (pa, pb) = if process {
        (full_process(a), full_process(b))
    } else {
        (a.to_string(), b.to_string())
    };
    if pa.is_empty() || pb.is_empty() {
        return 0;
    }

    let tokens_a: BTreeSet<&str> = pa.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = pb.split_whitespace().collect();
    let shared = join(tokens_a.intersection(&tokens_b));
    let only_a = join(tokens_a.difference(&tokens_b));
    let only_b = join(tokens_b.difference(&tokens_a));

    let with_a = format!("{shared} {only_a}").trim().to_string();
    let with_b = format!("{shared} {only_b}").trim().to_string();

    let scorer: fn(&str, &str) -> Score = if partial { partial_ratio } else { ratio };
    [
        scorer(&shared, &with_a),
        scorer(&shared, &with_b),
        scorer(&with_a, &with_b),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

fn join<S: AsRef<str>>(tokens: impl Iterator<Item = S>) -> String {
    tokens.fold(String::new(), |mut joined, token| {
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(token.as_ref());
        joined
    })
}

/// [`ratio`] of both strings after processing and sorting their words.
pub fn token_sort_ratio(a: &str, b: &str) -> Score {
    token_sort(a, b, false, true)
}

/// Word-set similarity: shared words versus shared-plus-leftover words.
///
/// Builds `shared`, `shared + only_a` and `shared + only_b` (each sorted) and
/// returns the best pairwise [`ratio`], so a string that adds words to another
/// still scores high.
pub fn token_set_ratio(a: &str, b: &str) -> Score {
    token_set(a, b, false, true)
}

/// Blend of the direct, partial and token scorers.
///
/// When the processed lengths are within a factor of 1.5 the token scorers
/// compete with the direct ratio; otherwise their partial variants do, scaled
/// down more heavily the more lopsided the lengths are.
pub fn weighted_ratio(a: &str, b: &str) -> Score {
    let (pa, pb) = (full_process(a), full_process(b));
    if pa.is_empty() || pb.is_empty() {
        return 0;
    }

    let base = f64::from(ratio(&pa, &pb));
    let (len_a, len_b) = (pa.chars().count(), pb.chars().count());
    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;

    if len_ratio < 1.5 {
        let sort = f64::from(token_sort(&pa, &pb, false, false)) * UNBASE_SCALE;
        let set = f64::from(token_set(&pa, &pb, false, false)) * UNBASE_SCALE;
        return to_score(base.max(sort).max(set));
    }

    let scale = if len_ratio > 8.0 {
        PARTIAL_SCALE_LONG
    } else {
        PARTIAL_SCALE
    };
    let partial = f64::from(partial_ratio(&pa, &pb)) * scale;
    let sort = f64::from(token_sort(&pa, &pb, true, false)) * UNBASE_SCALE * scale;
    let set = f64::from(token_set(&pa, &pb, true, false)) * UNBASE_SCALE * scale;
    to_score(base.max(partial).max(sort).max(set))
}

/// The best-scoring candidate of an [`extract_best`] search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMatch<'c> {
    /// Position of the candidate in iteration order.
    pub index: usize,
    pub candidate: &'c str,
    pub score: Score,
}

/// Score `query` against every candidate with [`weighted_ratio`] and return the
/// best one. Ties go to the earliest candidate. `None` only when there are no
/// candidates at all.
pub fn extract_best<'c, I>(query: &str, candidates: I) -> Option<BestMatch<'c>>
where
    I: IntoIterator<Item = &'c str>,
{
    let query = full_process(query);
    let mut best: Option<BestMatch<'c>> = None;
    for (index, candidate) in candidates.into_iter().enumerate() {
        let score = weighted_ratio(&query, candidate);
        if best.is_none_or(|b| score > b.score) {
            best = Some(BestMatch {
                index,
                candidate,
                score,
            });
        }
    }
    best
}
