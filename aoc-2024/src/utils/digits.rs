//! Decimal digit helpers

/// Number of decimal digits in `n`; zero has one digit.
#[inline]
pub fn digit_count(n: u64) -> u32 {
    match n.checked_ilog10() {
        Some(log) => log + 1,
        None => 1,
    }
}

/// Splits a number with an even digit count into its left and right halves.
///
/// Leading zeros of the right half disappear, as they would when parsing the
/// half back from text: `1000` splits into `10` and `0`.
///
/// ```
/// use aoc_2024::utils::digits::split_digits;
///
/// assert_eq!(split_digits(1000), Some((10, 0)));
/// assert_eq!(split_digits(253000), Some((253, 0)));
/// assert_eq!(split_digits(125), None);
/// ```
#[inline]
pub fn split_digits(n: u64) -> Option<(u64, u64)> {
    let digits = digit_count(n);
    if digits % 2 != 0 {
        return None;
    }
    let divisor = 10u64.pow(digits / 2);
    Some((n / divisor, n % divisor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn split_via_string(n: u64) -> Option<(u64, u64)> {
        let text = n.to_string();
        if text.len() % 2 != 0 {
            return None;
        }
        let (left, right) = text.split_at(text.len() / 2);
        Some((left.parse().ok()?, right.parse().ok()?))
    }

    #[test]
    fn test_digit_count_boundaries() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(99), 2);
        assert_eq!(digit_count(100), 3);
        assert_eq!(digit_count(u64::MAX), 20);
    }

    #[test]
    fn test_split_examples() {
        assert_eq!(split_digits(0), None);
        assert_eq!(split_digits(17), Some((1, 7)));
        assert_eq!(split_digits(2024), Some((20, 24)));
        assert_eq!(split_digits(1000), Some((10, 0)));
        assert_eq!(split_digits(100_001), Some((100, 1)));
        assert_eq!(split_digits(u64::MAX), Some((1_844_674_407, 3_709_551_615)));
    }

    proptest! {
        #[test]
        fn prop_digit_count_matches_decimal_length(n in any::<u64>()) {
            prop_assert_eq!(digit_count(n) as usize, n.to_string().len());
        }

        #[test]
        fn prop_split_matches_string_split(n in any::<u64>()) {
            prop_assert_eq!(split_digits(n), split_via_string(n));
        }

        #[test]
        fn prop_split_matches_string_split_small(n in 0u64..10_000_000) {
            prop_assert_eq!(split_digits(n), split_via_string(n));
        }
    }
}
