//! Distribution arithmetic
//!
//! Every split here is exact: the last element absorbs whatever rounding
//! left over, so the parts always sum to the requested total.

/// Width left for `count` parts once `count - 1` separators of `separator` are taken out.
pub fn available_between(total: f64, count: usize, separator: f64) -> f64 {
    if count == 0 {
        return total;
    }
    total - (count - 1) as f64 * separator
}

/// Split `total` into `count` equal parts, floored, the last taking the remainder.
pub fn even_split(total: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![total],
        _ => {
            let part = (total / count as f64).floor();
            let mut parts = vec![part; count];
            parts[count - 1] = total - part * (count - 1) as f64;
            parts
        }
    }
}

/// Split `total` in proportion to `weights`, rounded, the last taking the remainder.
///
/// Falls back to [`even_split`] when the weights do not sum to something positive.
pub fn proportional_split(weights: &[f64], total: f64) -> Vec<f64> {
    let sum: f64 = weights.iter().sum();
    if weights.is_empty() {
        return Vec::new();
    }
    if !(sum > 0.0) {
        return even_split(total, weights.len());
    }

    let mut parts: Vec<f64> = weights.iter().map(|w| (w / sum * total).round()).collect();
    let last = parts.len() - 1;
    let head: f64 = parts[..last].iter().sum();
    parts[last] = total - head;
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_even_split_remainder_on_last() {
        assert_eq!(even_split(710.0, 3), vec![236.0, 236.0, 238.0]);
        assert_eq!(even_split(794.0, 2), vec![397.0, 397.0]);
        assert_eq!(even_split(597.0, 1), vec![597.0]);
        assert!(even_split(100.0, 0).is_empty());
    }

    #[test]
    fn test_proportional_split() {
        assert_eq!(proportional_split(&[1.0, 1.0, 1.0], 710.0), vec![237.0, 237.0, 236.0]);
        assert_eq!(proportional_split(&[100.0, 200.0], 291.0), vec![97.0, 194.0]);
        assert_eq!(proportional_split(&[0.0, 0.0], 10.0), vec![5.0, 5.0]);
        assert!(proportional_split(&[], 10.0).is_empty());
    }

    #[test]
    fn test_available_between() {
        assert_eq!(available_between(746.0, 3, 18.0), 710.0);
        assert_eq!(available_between(746.0, 1, 18.0), 746.0);
        assert_eq!(available_between(746.0, 0, 18.0), 746.0);
    }

    proptest! {
        #[test]
        fn prop_even_split_is_exact(total in 1u32..5000, count in 1usize..12) {
            let parts = even_split(total as f64, count);
            prop_assert_eq!(parts.len(), count);
            prop_assert_eq!(parts.iter().sum::<f64>(), total as f64);
        }

        #[test]
        fn prop_proportional_split_is_exact(
            weights in proptest::collection::vec(1u32..1000, 1..8),
            total in 1u32..5000,
        ) {
            let weights: Vec<f64> = weights.into_iter().map(f64::from).collect();
            let parts = proportional_split(&weights, total as f64);
            prop_assert_eq!(parts.len(), weights.len());
            prop_assert_eq!(parts.iter().sum::<f64>(), total as f64);
        }
    }
}
