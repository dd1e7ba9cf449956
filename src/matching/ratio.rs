//! Gestalt pattern matching (Ratcliff/Obershelp) similarity
//!
//! `ratio = 2 * M / (len(a) + len(b))` where `M` is the number of characters
//! in the matching blocks found by repeatedly taking the longest common
//! contiguous block and recursing on both sides of it.
//!
//! Sequences of 200 or more characters get the "popular element" heuristic:
//! characters of `b` that make up more than 1% of it (plus one) are not used
//! to seed matches, though blocks may still be extended through them.

use std::collections::HashMap;

const AUTOJUNK_MIN_LEN: usize = 200;

/// Similarity matcher with a fixed second sequence.
///
/// Scoring many `a`s against one `b` reuses the index built for `b`.
pub struct SequenceMatcher {
    b: Vec<char>,
    b2j: HashMap<char, Vec<usize>>,
    full_bcount: Option<HashMap<char, usize>>,
}

impl SequenceMatcher {
    pub fn new(b: &str) -> Self {
        let b: Vec<char> = b.chars().collect();
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }

        let n = b.len();
        if n >= AUTOJUNK_MIN_LEN {
            let ntest = n / 100 + 1;
            b2j.retain(|_, idxs| idxs.len() <= ntest);
        }

        Self {
            b,
            b2j,
            full_bcount: None,
        }
    }

    /// Similarity of `a` against the fixed sequence, in [0, 1]
    pub fn ratio(&self, a: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let matches = self.matching_chars(&a);
        calculate_ratio(matches, a.len() + self.b.len())
    }

    /// Upper bound on `ratio` from character multisets only
    pub fn quick_ratio(&mut self, a: &str) -> f64 {
        let b = &self.b;
        let full = self.full_bcount.get_or_insert_with(|| {
            let mut counts = HashMap::new();
            for c in b {
                *counts.entry(*c).or_insert(0) += 1;
            }
            counts
        });

        let mut avail: HashMap<char, isize> = HashMap::new();
        let mut matches = 0;
        let mut len_a = 0;
        for c in a.chars() {
            len_a += 1;
            let left = avail
                .entry(c)
                .or_insert_with(|| *full.get(&c).unwrap_or(&0) as isize);
            *left -= 1;
            if *left >= 0 {
                matches += 1;
            }
        }
        calculate_ratio(matches, len_a + self.b.len())
    }

    /// Upper bound on `ratio` from lengths only
    pub fn real_quick_ratio(&self, a: &str) -> f64 {
        let la = a.chars().count();
        let lb = self.b.len();
        calculate_ratio(la.min(lb), la + lb)
    }

    fn matching_chars(&self, a: &[char]) -> usize {
        let mut total = 0;
        let mut queue = vec![(0, a.len(), 0, self.b.len())];
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.find_longest_match(a, alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }
        total
    }

    /// Longest block with `a[i..i+k] == b[j..j+k]` inside the given bounds.
    ///
    /// Among equally long blocks the one starting earliest in `a`, then
    /// earliest in `b`, wins.
    fn find_longest_match(
        &self,
        a: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let b = &self.b;
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);

        // j2len[j] = length of the longest match ending at a[i-1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut newj2len = HashMap::new();
            if let Some(idxs) = self.b2j.get(c) {
                for &j in idxs {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|p| j2len.get(&p))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    newj2len.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = newj2len;
        }

        // Popular characters never seed a match but may extend one
        while besti > alo && bestj > blo && a[besti - 1] == b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && a[besti + bestsize] == b[bestj + bestsize]
        {
            bestsize += 1;
        }

        (besti, bestj, bestsize)
    }
}

fn calculate_ratio(matches: usize, length: usize) -> f64 {
    if length == 0 {
        1.0
    } else {
        2.0 * matches as f64 / length as f64
    }
}

/// Similarity of two strings, in [0, 1]
pub fn ratio(a: &str, b: &str) -> f64 {
    SequenceMatcher::new(b).ratio(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(x: f64, y: f64) -> bool {
        (x - y).abs() < 1e-9
    }

    #[test]
    fn test_identical_strings() {
        assert!(approx(ratio("hi", "hi"), 1.0));
        assert!(approx(ratio("how are you?", "how are you?"), 1.0));
    }

    #[test]
    fn test_both_empty_is_identical() {
        assert!(approx(ratio("", ""), 1.0));
    }

    #[test]
    fn test_one_empty_is_zero() {
        assert!(approx(ratio("", "abc"), 0.0));
        assert!(approx(ratio("abc", ""), 0.0));
    }

    #[test]
    fn test_extra_char() {
        // 2 * 2 / 5
        assert!(approx(ratio("hi", "hii"), 0.8));
    }

    #[test]
    fn test_disjoint() {
        assert!(approx(ratio("hi", "goodbye"), 0.0));
    }

    #[test]
    fn test_classic_examples() {
        // abcd / bcde share "bcd"
        assert!(approx(ratio("abcd", "bcde"), 0.75));
        // "apple" vs "ape": matching blocks "ap" + "e"
        assert!(approx(ratio("apple", "ape"), 0.75));
        // " abcd" is found whole inside "abcd abcd"
        assert!(approx(ratio(" abcd", "abcd abcd"), 2.0 * 5.0 / 14.0));
    }

    #[test]
    fn test_recurses_on_both_sides() {
        // "qabxcd" vs "abycdf": "ab" then "cd"
        assert!(approx(ratio("qabxcd", "abycdf"), 2.0 * 4.0 / 12.0));
    }

    #[test]
    fn test_unicode_counts_chars() {
        assert!(approx(ratio("héllo", "hello"), 0.8));
    }

    #[test]
    fn test_bounds_are_upper_bounds() {
        let pairs = [
            ("how are you", "who are you"),
            ("hello there", "there hello"),
            ("abc", "xyz"),
            ("what is your name?", "whats your name"),
        ];
        for (a, b) in pairs {
            let mut m = SequenceMatcher::new(b);
            let r = m.ratio(a);
            assert!(m.quick_ratio(a) >= r);
            assert!(m.real_quick_ratio(a) >= m.quick_ratio(a));
        }
    }

    #[test]
    fn test_popular_chars_are_not_indexed() {
        let long = format!("x{}", "a".repeat(199));
        let m = SequenceMatcher::new(&long);
        assert!(!m.b2j.contains_key(&'a'));
        assert!(m.b2j.contains_key(&'x'));

        // Shorter sequences skip the heuristic
        let short = format!("x{}", "a".repeat(198));
        assert!(SequenceMatcher::new(&short).b2j.contains_key(&'a'));
    }
}
