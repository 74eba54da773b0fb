//! Transition functions for both automaton families.
//!
//! Rule numbers are `u8`, so the 0..=255 range holds by construction.
//! Neighbor counts above 8 never reach [`next_2d`] because they can only
//! come from a Moore neighborhood.

use crate::config::CountSet;

/// Splits a Wolfram rule number into its next-state table, least
/// significant bit first. Entry `k` is the next state for the pattern
/// whose index is `k` (see [`pattern_index`]).
pub fn rule_bits(rule: u8) -> [bool; 8] {
    let mut bits = [false; 8];
    for (k, bit) in bits.iter_mut().enumerate() {
        *bit = (rule >> k) & 1 == 1;
    }
    bits
}

pub fn pattern_index(left: bool, center: bool, right: bool) -> usize {
    (left as usize) << 2 | (center as usize) << 1 | right as usize
}

pub fn next_1d(bits: &[bool; 8], left: bool, center: bool, right: bool) -> bool {
    bits[pattern_index(left, center, right)]
}

pub fn next_2d(alive: bool, live_neighbors: u8, birth: CountSet, survival: CountSet) -> bool {
    if alive {
        survival.contains(live_neighbors)
    } else {
        birth.contains(live_neighbors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn rule_30_table() {
        assert_eq!(
            rule_bits(30),
            [false, true, true, true, true, false, false, false]
        );
    }

    #[test_log::test]
    fn rule_110_table() {
        assert_eq!(
            rule_bits(110),
            [false, true, true, true, false, true, true, false]
        );
    }

    #[test_log::test]
    fn pattern_index_order() {
        assert_eq!(pattern_index(false, false, false), 0);
        assert_eq!(pattern_index(false, false, true), 1);
        assert_eq!(pattern_index(false, true, false), 2);
        assert_eq!(pattern_index(true, false, false), 4);
        assert_eq!(pattern_index(true, true, true), 7);
    }

    #[test_log::test]
    fn rule_90_is_xor_of_neighbors() {
        let bits = rule_bits(90);
        for idx in 0..8 {
            let (l, c, r) = (idx & 4 != 0, idx & 2 != 0, idx & 1 != 0);
            assert_eq!(next_1d(&bits, l, c, r), l ^ r);
        }
    }

    #[test_log::test]
    fn conway_transitions() {
        let birth = CountSet::of(&[3]);
        let survival = CountSet::of(&[2, 3]);
        assert!(next_2d(false, 3, birth, survival));
        assert!(!next_2d(false, 2, birth, survival));
        assert!(next_2d(true, 2, birth, survival));
        assert!(next_2d(true, 3, birth, survival));
        assert!(!next_2d(true, 1, birth, survival));
        assert!(!next_2d(true, 4, birth, survival));
    }
}
