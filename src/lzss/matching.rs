// Longest-match search over the sliding dictionary window.
//
// Exhaustive scan of every candidate start in the window. The comparison
// may run past `current` into bytes that have not been emitted yet, which
// is how a run of one byte becomes a single token with `offset < length`.

use super::header::{Dictionary, MIN_MATCH};

/// A back-reference candidate. `length == 0` means nothing matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Match {
    /// Distance from the current position back to the match start.
    pub offset: usize,
    /// Number of matching bytes.
    pub length: usize,
}

impl Match {
    /// Whether this match is worth a string token.
    #[inline]
    pub fn is_token(&self) -> bool {
        self.length >= MIN_MATCH
    }
}

/// Find the longest match for `input[current..]` among the window
/// candidates `[current - max_offset, current - 3]`.
///
/// Among equal-length candidates the one closest to `current` wins.
/// Candidates are visited closest first and only a strictly longer match
/// replaces the best, so the scan can stop as soon as a match reaches the
/// length cap.
pub fn longest_match(input: &[u8], current: usize, dict: &Dictionary) -> Match {
    let mut best = Match::default();
    if current < MIN_MATCH || current >= input.len() {
        return best;
    }

    let limit = (input.len() - current).min(dict.max_match());
    let first = current.saturating_sub(dict.max_offset());

    for search in (first..=current - MIN_MATCH).rev() {
        let length = match_len(input, search, current, limit);
        if length > best.length {
            best = Match {
                offset: current - search,
                length,
            };
            if length == limit {
                break;
            }
        }
    }
    best
}

/// Count equal bytes at `a` and `b` (with `a < b`), up to `limit`.
#[inline]
fn match_len(input: &[u8], a: usize, b: usize, limit: usize) -> usize {
    input[a..]
        .iter()
        .zip(&input[b..b + limit])
        .take_while(|(x, y)| x == y)
        .count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(len: u32) -> Dictionary {
        Dictionary::new(len).unwrap()
    }

    #[test]
    fn nothing_before_three_bytes() {
        let input = b"aaaaaaaa";
        for current in 0..3 {
            assert!(!longest_match(input, current, &dict(16)).is_token());
        }
    }

    #[test]
    fn run_matches_itself_with_overlap() {
        let input = [b'z'; 40];
        let m = longest_match(&input, 3, &dict(16));
        // max_match for 16 is 4098, so the run is bounded by the input.
        assert_eq!(m, Match { offset: 3, length: 37 });
    }

    #[test]
    fn length_capped_by_max_match() {
        let input = [7u8; 100];
        let d = dict(16384);
        let m = longest_match(&input, 3, &d);
        assert_eq!(m.length, d.max_match());
        assert_eq!(m.offset, 3);
    }

    #[test]
    fn closer_candidate_wins_ties() {
        // "abc" occurs at 0 and 4; both give length 3 for position 8.
        let input = b"abcXabcYabc";
        let m = longest_match(input, 8, &dict(16));
        assert_eq!(m, Match { offset: 4, length: 3 });
    }

    #[test]
    fn longer_candidate_beats_closer() {
        let input = b"abcdXabcYabcd";
        let m = longest_match(input, 9, &dict(16));
        assert_eq!(m, Match { offset: 9, length: 4 });
    }

    #[test]
    fn window_excludes_far_candidates() {
        // With dictionary 4 the window reaches back 6 bytes.
        let input = b"abcd1234567abcd";
        let m = longest_match(input, 11, &dict(4));
        assert!(!m.is_token());
        let m = longest_match(input, 11, &dict(16));
        assert_eq!(m, Match { offset: 11, length: 4 });
    }

    /// Plain scan of every window candidate, farthest first, letting
    /// equal lengths replace the best.
    fn reference_scan(input: &[u8], current: usize, d: &Dictionary) -> Match {
        let mut best = Match::default();
        if current < MIN_MATCH || current >= input.len() {
            return best;
        }
        let limit = (input.len() - current).min(d.max_match());
        for search in current.saturating_sub(d.max_offset())..=current - MIN_MATCH {
            let length = match_len(input, search, current, limit);
            if length >= best.length {
                best = Match {
                    offset: current - search,
                    length,
                };
            }
        }
        // An all-zero scan still records an offset; normalise it away.
        if best.length == 0 { Match::default() } else { best }
    }

    #[test]
    fn agrees_with_farthest_first_scan() {
        let mut state = 0x9E37_79B9u32;
        let mut input = Vec::new();
        for _ in 0..1500 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            // Small alphabet so long and tied matches are common.
            input.push(b'a' + (state % 3) as u8);
        }
        input.extend(std::iter::repeat_n(b'a', 200));

        for len in [4u32, 8, 64, 512, 16384] {
            let d = dict(len);
            for current in 0..input.len() {
                assert_eq!(
                    longest_match(&input, current, &d),
                    reference_scan(&input, current, &d),
                    "dictionary {len}, position {current}"
                );
            }
        }
    }

    #[test]
    fn close_overlapping_candidate_beats_far_one() {
        // Position 11 matches 4 bytes at offset 8, but the candidate at
        // offset 3 overlaps `current` and extends to 6.
        let input = b"aaaaccaaaccaccaccbcaaaaa";
        let m = longest_match(input, 11, &dict(16));
        assert_eq!(m, Match { offset: 3, length: 6 });
    }

    #[test]
    fn run_prefers_offset_three() {
        let input = [b'r'; 64];
        let d = dict(16384);
        for current in 3..input.len() {
            let m = longest_match(&input, current, &d);
            assert_eq!(m.offset, 3);
            assert_eq!(m.length, (input.len() - current).min(d.max_match()));
        }
    }

    #[test]
    fn at_end_of_input() {
        let input = b"abcabc";
        assert_eq!(longest_match(input, 6, &dict(16)), Match::default());
        assert_eq!(longest_match(input, 3, &dict(16)), Match { offset: 3, length: 3 });
    }
}
