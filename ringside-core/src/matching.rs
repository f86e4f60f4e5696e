use crate::division::DivisionKey;

/// A bracket-like type that can accept fighters.
///
/// Implemented by the concrete bracket document in the api crate; the
/// matching rules only ever look at a division through this trait.
pub trait Division {
    /// Whether the division is accepting new fighters at all.
    fn is_open(&self) -> bool;

    /// The number of fighters currently seeded.
    fn fighter_count(&self) -> usize;

    /// The maximum number of fighters the division may hold.
    fn capacity(&self) -> usize;

    /// Whether the division matches the given [`DivisionKey`].
    fn matches(&self, key: &DivisionKey) -> bool;
}

/// Selects the division a new fighter should be placed into.
///
/// Only open divisions matching `key` with free capacity are
/// candidates. Among those the fullest division wins so that divisions
/// close as early as possible and the number of under-filled divisions
/// at event time stays minimal. Ties keep the earliest candidate.
///
/// Returns `None` if no division can take the fighter; the caller is
/// expected to create a new one.
pub fn find_target<'a, D, I>(divisions: I, key: &DivisionKey) -> Option<&'a D>
where
    D: Division,
    I: IntoIterator<Item = &'a D>,
{
    divisions
        .into_iter()
        .filter(|division| {
            division.is_open()
                && division.fighter_count() < division.capacity()
                && division.matches(key)
        })
        .fold(None::<&'a D>, |best, division| match best {
            Some(best) if best.fighter_count() >= division.fighter_count() => Some(best),
            _ => Some(division),
        })
}

/// Returns the seed for the next fighter appended to a roster of
/// `fighter_count` fighters. Seeds start at 1 and are never reused.
#[inline]
pub fn next_seed(fighter_count: usize) -> u32 {
    fighter_count as u32 + 1
}

/// Returns the bracket number for a new division of an event, given the
/// numbers already in use for that event.
pub fn next_bracket_number<I>(existing: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    existing.into_iter().max().unwrap_or(0) + 1
}

/// Whether an ordered seed sequence is exactly `1..=n` with no gaps or
/// duplicates.
pub fn seeds_contiguous<I>(seeds: I) -> bool
where
    I: IntoIterator<Item = u32>,
{
    seeds
        .into_iter()
        .enumerate()
        .all(|(index, seed)| seed == index as u32 + 1)
}

#[cfg(test)]
mod tests {
    use crate::division::{AgeClass, DivisionKey};

    use super::{find_target, next_bracket_number, next_seed, seeds_contiguous, Division};

    struct TestDivision {
        open: bool,
        fighters: usize,
        capacity: usize,
        key: DivisionKey,
    }

    impl TestDivision {
        fn new(open: bool, fighters: usize, capacity: usize) -> Self {
            Self {
                open,
                fighters,
                capacity,
                key: key(),
            }
        }
    }

    impl Division for TestDivision {
        fn is_open(&self) -> bool {
            self.open
        }

        fn fighter_count(&self) -> usize {
            self.fighters
        }

        fn capacity(&self) -> usize {
            self.capacity
        }

        fn matches(&self, key: &DivisionKey) -> bool {
            self.key == *key
        }
    }

    fn key() -> DivisionKey {
        DivisionKey {
            age_class: AgeClass::Adult,
            sport: String::from("Kickboxing (Male)"),
            rule_style: String::from("Standard Single Elimination"),
            criteria: String::from("Novice"),
        }
    }

    #[test]
    fn test_find_target_prefers_fullest() {
        let divisions = [
            TestDivision::new(true, 1, 4),
            TestDivision::new(true, 3, 4),
        ];

        let target = find_target(&divisions, &key()).unwrap();
        assert_eq!(target.fighter_count(), 3);
    }

    #[test]
    fn test_find_target_skips_full() {
        let divisions = [
            TestDivision::new(true, 4, 4),
            TestDivision::new(true, 2, 4),
        ];

        let target = find_target(&divisions, &key()).unwrap();
        assert_eq!(target.fighter_count(), 2);

        // All full: the fighter needs a new division.
        let divisions = [TestDivision::new(true, 4, 4)];
        assert!(find_target(&divisions, &key()).is_none());
    }

    #[test]
    fn test_find_target_skips_closed() {
        let divisions = [
            TestDivision::new(false, 1, 4),
            TestDivision::new(true, 0, 4),
        ];

        let target = find_target(&divisions, &key()).unwrap();
        assert_eq!(target.fighter_count(), 0);
    }

    #[test]
    fn test_find_target_skips_other_keys() {
        let mut other = TestDivision::new(true, 3, 4);
        other.key.criteria = String::from("Class A");

        let divisions = [other, TestDivision::new(true, 1, 4)];

        let target = find_target(&divisions, &key()).unwrap();
        assert_eq!(target.fighter_count(), 1);
    }

    #[test]
    fn test_find_target_tie_keeps_first() {
        let divisions = [
            TestDivision::new(true, 2, 4),
            TestDivision::new(true, 2, 4),
        ];

        let target = find_target(&divisions, &key()).unwrap();
        assert!(std::ptr::eq(target, &divisions[0]));
    }

    #[test]
    fn test_next_seed() {
        assert_eq!(next_seed(0), 1);
        assert_eq!(next_seed(3), 4);
    }

    #[test]
    fn test_next_bracket_number() {
        assert_eq!(next_bracket_number([1, 2]), 3);
        assert_eq!(next_bracket_number([2, 7, 3]), 8);
        assert_eq!(next_bracket_number([]), 1);
    }

    #[test]
    fn test_seeds_contiguous() {
        assert!(seeds_contiguous([1, 2, 3]));
        assert!(seeds_contiguous([]));
        assert!(!seeds_contiguous([1, 3]));
        assert!(!seeds_contiguous([1, 1, 2]));
        assert!(!seeds_contiguous([2, 1]));
    }
}
