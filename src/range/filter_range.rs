use super::RangeUnit;
use crate::result::Match;

/// `@[fw_unit fw_n, overlap, bw_unit bw_n]` — the range argument paired
/// with a `!filt(...)` matcher. A target result is rejected if a
/// candidate produced by the paired matcher falls within the forward
/// window, the backward window, or (when `overlap` is set) overlaps the
/// target outright. A candidate identical to the target itself is
/// skipped by the forward/backward neighborhood tests (spec.md §4.2.2:
/// "compared against every `fr ∈ filter_set`, skipping `fr == target`"),
/// but the overlap test has no such exclusion — it is defined as "reject
/// iff `target` overlaps any `fr`", full stop, and a target trivially
/// overlaps itself.
///
/// `d` requires the candidate and target to additionally share a
/// paragraph *and* sentence and compares `i_word`; `w` requires only a
/// shared paragraph and compares absolute document `offset` — this
/// offset-based `w` proximity (rather than an intra-sentence word count)
/// is a literal carry-over of the reference implementation's behavior,
/// kept deliberately rather than "fixed" (see the crate's design notes).
#[derive(Debug, Clone, Copy)]
pub struct FilterRange {
    pub fw_unit: RangeUnit,
    pub fw_n: i64,
    pub overlap: bool,
    pub bw_unit: RangeUnit,
    pub bw_n: i64,
}

impl FilterRange {
    pub fn new(fw_unit: RangeUnit, fw_n: i64, overlap: bool, bw_unit: RangeUnit, bw_n: i64) -> Self {
        Self { fw_unit, fw_n, overlap, bw_unit, bw_n }
    }

    /// True if `candidate` falls within `target`'s reject neighborhood.
    pub fn matches(&self, target: &Match, candidate: &Match) -> bool {
        let is_self = candidate == target;
        if self.fw_n > 0 && !is_self && fires(self.fw_unit, self.fw_n, target, candidate, Dir::Forward) {
            return true;
        }
        if self.bw_n > 0 && !is_self && fires(self.bw_unit, self.bw_n, target, candidate, Dir::Backward) {
            return true;
        }
        if self.overlap && target.overlaps(candidate) {
            return true;
        }
        false
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Dir {
    Forward,
    Backward,
}

/// Mirrors the reference's per-unit `filter_d`/`filter_w`/`filter_s`/
/// `filter_p`/`filter_t` predicates: each has its own scope guard
/// (same sentence, same paragraph, or none) and its own compared field
/// (`i_word`, `offset`, `i_sent`, `i_para`).
fn fires(unit: RangeUnit, n: i64, target: &Match, candidate: &Match, dir: Dir) -> bool {
    match unit {
        RangeUnit::D => match dir {
            Dir::Forward => {
                candidate.end_index.i_para == target.beg_index.i_para
                    && candidate.end_index.i_sent == target.beg_index.i_sent
                    && target.beg_index.i_word > candidate.end_index.i_word
                    && candidate.end_index.i_word as i64 >= target.beg_index.i_word as i64 - n
            }
            Dir::Backward => {
                candidate.beg_index.i_para == target.end_index.i_para
                    && candidate.beg_index.i_sent == target.end_index.i_sent
                    && target.end_index.i_word < candidate.beg_index.i_word
                    && (candidate.beg_index.i_word as i64) <= target.end_index.i_word as i64 + n
            }
        },
        RangeUnit::W => match dir {
            Dir::Forward => {
                candidate.end_index.i_para == target.beg_index.i_para
                    && target.beg_index.offset > candidate.end_index.offset
                    && candidate.end_index.offset as i64 >= target.beg_index.offset as i64 - n
            }
            Dir::Backward => {
                candidate.beg_index.i_para == target.end_index.i_para
                    && target.end_index.offset < candidate.beg_index.offset
                    && (candidate.beg_index.offset as i64) <= target.end_index.offset as i64 + n
            }
        },
        RangeUnit::S => match dir {
            Dir::Forward => {
                candidate.end_index.i_para == target.beg_index.i_para
                    && target.beg_index.i_sent > candidate.end_index.i_sent
                    && candidate.end_index.i_sent as i64 >= target.beg_index.i_sent as i64 - n
            }
            Dir::Backward => {
                candidate.beg_index.i_para == target.end_index.i_para
                    && target.end_index.i_sent < candidate.beg_index.i_sent
                    && (candidate.beg_index.i_sent as i64) <= target.end_index.i_sent as i64 + n
            }
        },
        RangeUnit::P => match dir {
            Dir::Forward => {
                target.beg_index.i_para > candidate.end_index.i_para
                    && candidate.end_index.i_para as i64 >= target.beg_index.i_para as i64 - n
            }
            Dir::Backward => {
                target.end_index.i_para < candidate.beg_index.i_para
                    && (candidate.beg_index.i_para as i64) <= target.end_index.i_para as i64 + n
            }
        },
        RangeUnit::T => match dir {
            Dir::Forward => candidate.end_index.offset < target.beg_index.offset,
            Dir::Backward => candidate.beg_index.offset > target.end_index.offset,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Index;

    fn idx(p: usize, s: usize, w: usize, o: usize) -> Index {
        Index::new(p, s, w, o)
    }

    #[test]
    fn forward_rejects_a_preceding_candidate_within_window() {
        // "forward" looks *behind* the target: fr.end must fall within n
        // words before target.beg (see scenario 6 in the crate's design
        // notes for the mnemonic: a "not" one token before "on").
        let range = FilterRange::new(RangeUnit::D, 3, false, RangeUnit::D, 0);
        let target = Match::new(idx(0, 0, 5, 5), idx(0, 0, 5, 5));
        let near = Match::new(idx(0, 0, 3, 3), idx(0, 0, 3, 3));
        let far = Match::new(idx(0, 0, 0, 0), idx(0, 0, 0, 0));
        assert!(range.matches(&target, &near));
        assert!(!range.matches(&target, &far));
    }

    #[test]
    fn backward_rejects_a_following_candidate_within_window() {
        let range = FilterRange::new(RangeUnit::D, 0, false, RangeUnit::D, 3);
        let target = Match::new(idx(0, 0, 0, 0), idx(0, 0, 0, 0));
        let near = Match::new(idx(0, 0, 2, 2), idx(0, 0, 2, 2));
        let far = Match::new(idx(0, 0, 9, 9), idx(0, 0, 9, 9));
        assert!(range.matches(&target, &near));
        assert!(!range.matches(&target, &far));
    }

    #[test]
    fn t_unit_forward_is_unconditional_existence_before_target() {
        let range = FilterRange::new(RangeUnit::T, 1, false, RangeUnit::T, 0);
        let target = Match::new(idx(9, 9, 9, 99), idx(9, 9, 9, 99));
        let earlier = Match::new(idx(0, 0, 0, 0), idx(0, 0, 0, 0));
        assert!(range.matches(&target, &earlier));
    }

    #[test]
    fn self_candidate_never_fires_forward_or_backward() {
        let range = FilterRange::new(RangeUnit::T, 1, false, RangeUnit::T, 1);
        let target = Match::new(idx(0, 0, 0, 0), idx(0, 0, 0, 0));
        assert!(!range.matches(&target, &target));
    }

    #[test]
    fn self_candidate_still_fires_overlap() {
        // Unlike the forward/backward neighborhood tests, overlap has no
        // self-exclusion in the spec: "reject iff target overlaps any fr".
        let range = FilterRange::new(RangeUnit::T, 0, true, RangeUnit::T, 0);
        let target = Match::new(idx(0, 0, 0, 0), idx(0, 0, 0, 0));
        assert!(range.matches(&target, &target));
    }

    #[test]
    fn d_unit_requires_same_sentence() {
        let range = FilterRange::new(RangeUnit::D, 10, false, RangeUnit::D, 0);
        let target = Match::new(idx(0, 1, 0, 5), idx(0, 1, 0, 5));
        let other_sentence = Match::new(idx(0, 0, 0, 0), idx(0, 0, 0, 0));
        assert!(!range.matches(&target, &other_sentence));
    }

    #[test]
    fn overlap_short_circuits() {
        let range = FilterRange::new(RangeUnit::D, 0, true, RangeUnit::D, 0);
        let target = Match::new(idx(0, 0, 0, 0), idx(0, 0, 2, 2));
        let overlapping = Match::new(idx(0, 0, 2, 2), idx(0, 0, 3, 3));
        assert!(range.matches(&target, &overlapping));
    }
}
