//! Ratcliff/Obershelp sequence matching.
//!
//! The aligner, classifier, and sentence mapper all measure similarity the
//! same way: find the longest common run of elements, recurse on the pieces
//! to the left and right, and score `2·M / T` where `M` is the total length
//! of all matching runs and `T` the combined length of both sequences.
//!
//! The matching blocks also drive an edit script ([`opcodes`]) tagging each
//! contiguous range `Equal`, `Replace`, `Delete`, or `Insert`.
//!
//! Tie-breaking is deterministic: among equally long runs the earliest in
//! `a` wins, then the earliest in `b`. Complexity is O(n·m); fine at
//! article scale, deliberately not tuned for book-length corpora.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// A maximal run of equal elements: `a[a..a+len] == b[b..b+len]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchBlock {
    pub a: usize,
    pub b: usize,
    pub len: usize,
}

/// Edit-script operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpTag {
    Equal,
    Replace,
    Delete,
    Insert,
}

/// One edit-script operation spanning contiguous ranges of both sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opcode {
    pub tag: OpTag,
    pub a_start: usize,
    pub a_end: usize,
    pub b_start: usize,
    pub b_end: usize,
}

/// Longest common run within `a[alo..ahi]` and `b[blo..bhi]`.
///
/// `b2j` maps each element of `b` to its ascending positions.
fn longest_match<T: Eq + Hash>(
    a: &[T],
    b2j: &HashMap<&T, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> MatchBlock {
    let mut best = MatchBlock {
        a: alo,
        b: blo,
        len: 0,
    };
    // run_ends[j] = length of the common run ending at (i, j)
    let mut run_ends: HashMap<usize, usize> = HashMap::new();
    for i in alo..ahi {
        let mut next_run_ends: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(&a[i]) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = if j > 0 {
                    run_ends.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                next_run_ends.insert(j, k);
                if k > best.len {
                    best = MatchBlock {
                        a: i + 1 - k,
                        b: j + 1 - k,
                        len: k,
                    };
                }
            }
        }
        run_ends = next_run_ends;
    }
    best
}

/// All matching blocks between `a` and `b`, in ascending order, terminated
/// by a zero-length sentinel at `(a.len(), b.len())`.
pub fn matching_blocks<T: Eq + Hash>(a: &[T], b: &[T]) -> Vec<MatchBlock> {
    let mut b2j: HashMap<&T, Vec<usize>> = HashMap::new();
    for (j, item) in b.iter().enumerate() {
        b2j.entry(item).or_default().push(j);
    }

    let mut queue = vec![(0, a.len(), 0, b.len())];
    let mut blocks = Vec::new();
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let m = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if m.len > 0 {
            if alo < m.a && blo < m.b {
                queue.push((alo, m.a, blo, m.b));
            }
            if m.a + m.len < ahi && m.b + m.len < bhi {
                queue.push((m.a + m.len, ahi, m.b + m.len, bhi));
            }
            blocks.push(m);
        }
    }
    blocks.sort_by_key(|m| (m.a, m.b));

    let mut collapsed: Vec<MatchBlock> = Vec::with_capacity(blocks.len() + 1);
    for m in blocks {
        if let Some(last) = collapsed.last_mut() {
            if last.a + last.len == m.a && last.b + last.len == m.b {
                last.len += m.len;
                continue;
            }
        }
        collapsed.push(m);
    }
    collapsed.push(MatchBlock {
        a: a.len(),
        b: b.len(),
        len: 0,
    });
    collapsed
}

/// Edit script between `a` and `b` derived from the matching blocks.
pub fn opcodes<T: Eq + Hash>(a: &[T], b: &[T]) -> Vec<Opcode> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    for m in matching_blocks(a, b) {
        let tag = if i < m.a && j < m.b {
            Some(OpTag::Replace)
        } else if i < m.a {
            Some(OpTag::Delete)
        } else if j < m.b {
            Some(OpTag::Insert)
        } else {
            None
        };
        if let Some(tag) = tag {
            out.push(Opcode {
                tag,
                a_start: i,
                a_end: m.a,
                b_start: j,
                b_end: m.b,
            });
        }
        i = m.a + m.len;
        j = m.b + m.len;
        if m.len > 0 {
            out.push(Opcode {
                tag: OpTag::Equal,
                a_start: m.a,
                a_end: i,
                b_start: m.b,
                b_end: j,
            });
        }
    }
    out
}

/// Similarity in `0.0..=1.0`. Two empty sequences are identical (1.0).
pub fn ratio<T: Eq + Hash>(a: &[T], b: &[T]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched: usize = matching_blocks(a, b).iter().map(|m| m.len).sum();
    2.0 * matched as f64 / total as f64
}

/// Character-level [`ratio`] over two strings.
pub fn char_ratio(a: &str, b: &str) -> f64 {
    let av: Vec<char> = a.chars().collect();
    let bv: Vec<char> = b.chars().collect();
    ratio(&av, &bv)
}
