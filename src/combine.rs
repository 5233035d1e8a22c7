//! Cartesian-product combinators shared by the `Seq`/`Ord`/`Bag` rules and
//! by `KeywordArg`'s implicit multi-token sequence.
//!
//! None of these prune combinations early; the reference implementation
//! treats early pruning as an optimization, not a semantic requirement, so
//! every valid combination is always enumerated before [`crate::range::RuleRange`]
//! is applied by the caller.

use crate::result::{Match, ResultSet};

fn as_lists(sets: &[ResultSet]) -> Option<Vec<Vec<Match>>> {
    let lists: Vec<Vec<Match>> = sets.iter().map(|s| s.iter().copied().collect()).collect();
    if lists.iter().any(Vec::is_empty) {
        None
    } else {
        Some(lists)
    }
}

fn cartesian(lists: &[Vec<Match>]) -> Vec<Vec<Match>> {
    let mut combos: Vec<Vec<Match>> = vec![Vec::new()];
    for list in lists {
        let mut next = Vec::with_capacity(combos.len() * list.len().max(1));
        for combo in &combos {
            for &m in list {
                let mut extended = combo.clone();
                extended.push(m);
                next.push(extended);
            }
        }
        combos = next;
    }
    combos
}

fn summed_bias(combo: &[Match]) -> i64 {
    combo.iter().map(|m| m.bias).sum()
}

/// Contiguous join: `r[i].end.offset + 1 == r[i+1].beg.offset`.
pub fn seq_combine(sets: &[ResultSet]) -> ResultSet {
    let Some(lists) = as_lists(sets) else { return ResultSet::new() };
    ResultSet::from_iter(cartesian(&lists).into_iter().filter_map(|combo| {
        for w in combo.windows(2) {
            if w[0].end_index.offset + 1 != w[1].beg_index.offset {
                return None;
            }
        }
        let bias = summed_bias(&combo);
        Some(Match::with_bias(combo.first()?.beg_index, combo.last()?.end_index, bias))
    }))
}

/// Ordered, non-contiguous join: `r[i].end.offset < r[i+1].beg.offset`.
pub fn ord_combine(sets: &[ResultSet]) -> ResultSet {
    let Some(lists) = as_lists(sets) else { return ResultSet::new() };
    ResultSet::from_iter(cartesian(&lists).into_iter().filter_map(|combo| {
        for w in combo.windows(2) {
            if !(w[0].end_index.offset < w[1].beg_index.offset) {
                return None;
            }
        }
        let bias = summed_bias(&combo);
        Some(Match::with_bias(combo.first()?.beg_index, combo.last()?.end_index, bias))
    }))
}

/// Unordered join: every pair in the chosen combination must be
/// non-overlapping; the resulting span runs from the earliest `beg` to
/// the latest `end` among the chosen matches.
pub fn bag_combine(sets: &[ResultSet]) -> ResultSet {
    let Some(lists) = as_lists(sets) else { return ResultSet::new() };
    ResultSet::from_iter(cartesian(&lists).into_iter().filter_map(|combo| {
        for i in 0..combo.len() {
            for j in (i + 1)..combo.len() {
                if combo[i].overlaps(&combo[j]) {
                    return None;
                }
            }
        }
        let beg = combo.iter().map(|m| m.beg_index).min()?;
        let end = combo.iter().map(|m| m.end_index).max()?;
        let bias = summed_bias(&combo);
        Some(Match::with_bias(beg, end, bias))
    }))
}
