use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;
use std::f64::consts::PI;
use strum::{Display, EnumIter, EnumString};

/// The order in which characters get locked to their true glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RevealDirection {
    /// Left to right.
    #[default]
    Start,

    /// Right to left.
    End,

    /// Spiral outwards from the middle of the text.
    Center,
}

impl RevealDirection {
    /// Parse a direction, falling back to [RevealDirection::Start] for anything unknown.
    pub fn parse_lenient(input: &str) -> Self {
        input.trim().parse().unwrap_or_default()
    }

    /// Pick the next index to reveal given the indexes revealed so far.
    ///
    /// Returns `None` once every index in `0..length` is revealed.
    pub fn next_index(self, revealed: &BTreeSet<usize>, length: usize) -> Option<usize> {
        if revealed.len() >= length {
            return None;
        }
        let size = revealed.len();
        let candidate = match self {
            Self::Start => size,
            Self::End => length - 1 - size,
            Self::Center => center_candidate(size, length),
        };
        if !revealed.contains(&candidate) {
            return Some(candidate);
        }
        (0..length).map(|offset| (candidate + offset) % length).find(|index| !revealed.contains(index))
    }
}

impl<'de> Deserialize<'de> for RevealDirection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let input = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&input))
    }
}

fn center_candidate(size: usize, length: usize) -> usize {
    let middle = length / 2;
    let radius = middle.min(length - middle) as f64;
    let angle = (size as f64 * PI * 2.0) / length as f64;
    let spiral_radius = (size as f64 / length as f64) * radius;
    let position = (middle as f64 + spiral_radius * angle.cos()).floor() as i64;
    position.rem_euclid(length as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    fn reveal_all(direction: RevealDirection, length: usize) -> Vec<usize> {
        let mut revealed = BTreeSet::new();
        let mut order = Vec::new();
        while let Some(index) = direction.next_index(&revealed, length) {
            assert!(revealed.insert(index), "index {index} revealed twice");
            order.push(index);
        }
        order
    }

    #[test]
    fn every_direction_covers_the_full_range() {
        for direction in RevealDirection::iter() {
            for length in 0..40 {
                let order = reveal_all(direction, length);
                assert_eq!(order.len(), length, "{direction} with length {length}");
                let unique: BTreeSet<_> = order.iter().copied().collect();
                assert_eq!(unique, (0..length).collect(), "{direction} with length {length}");
            }
        }
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(7)]
    #[case(10)]
    #[case(25)]
    fn center_starts_at_middle(#[case] length: usize) {
        let first = RevealDirection::Center.next_index(&BTreeSet::new(), length);
        assert_eq!(first, Some(length / 2));
    }

    #[test]
    fn start_and_end_are_monotonic() {
        assert_eq!(reveal_all(RevealDirection::Start, 4), vec![0, 1, 2, 3]);
        assert_eq!(reveal_all(RevealDirection::End, 4), vec![3, 2, 1, 0]);
    }

    #[test]
    fn center_skips_revealed_candidates() {
        let revealed = BTreeSet::from([2]);
        // size 1 over length 5 lands back on the middle, which is taken.
        let next = RevealDirection::Center.next_index(&revealed, 5);
        assert_eq!(next, Some(3));
    }

    #[test]
    fn start_scans_when_candidate_taken() {
        let revealed = BTreeSet::from([1]);
        assert_eq!(RevealDirection::Start.next_index(&revealed, 3), Some(2));
    }

    #[rstest]
    #[case("start", RevealDirection::Start)]
    #[case("END", RevealDirection::End)]
    #[case(" center ", RevealDirection::Center)]
    #[case("diagonal", RevealDirection::Start)]
    #[case("", RevealDirection::Start)]
    fn lenient_parsing(#[case] input: &str, #[case] expected: RevealDirection) {
        assert_eq!(RevealDirection::parse_lenient(input), expected);
    }
}
