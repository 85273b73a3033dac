/// Calculates the Standard Deviation of the given array of numbers.
///
/// Since you cannot calculate a standard deviation from less than two
/// data points, returns `None` if `numbers` contains less than two numbers.
///
/// # Arguments
///
/// - `numbers` The numbers for which to calculate the standard deviation.
/// - `is_population` Whether the numbers represents the full population or a sample.
///
pub fn std_dev(numbers: &[f64], is_population: bool) -> Option<f64> {
    if numbers.len() < 2 {
        return None;
    }

    let len = numbers.len() as f64;
    let mean = mean(numbers)?;
    let squares: f64 = numbers.iter().map(|n| (n - mean).powi(2)).sum();

    let divisor = if is_population { len } else { len - 1.0 };
    Some((squares / divisor).sqrt())
}

/// Calculates the mean (average) for a given array of numbers.
///
/// Returns `None` for an empty array rather than dividing by zero.
pub fn mean(numbers: &[f64]) -> Option<f64> {
    if numbers.is_empty() {
        return None;
    }
    Some(numbers.iter().sum::<f64>() / numbers.len() as f64)
}

/// Calculates the mean amount for an array of `(amount, quantity)` tuple pairs,
/// where each `amount` is weighted by its `quantity`.
///
/// For example, an input of `[(5, 2), (4, 3)]` would effectively return the mean of
/// `[5, 5, 4, 4, 4]`.
///
/// # Return Values
///
/// * `Some(f64)` - `sum(amount * quantity) / sum(quantity)`.
/// * `None` - When the total quantity is `0`, including for an empty array.
///
/// # Example
///
/// ```rust
/// use tornwatch::stats::weighted_mean;
///
/// assert_eq!(Some(2.0), weighted_mean(&[(1.0, 4), (3.0, 2), (4.0, 1)]));
/// assert_eq!(None, weighted_mean(&[(100.0, 0)]));
/// ```
pub fn weighted_mean(amount_qty: &[(f64, u64)]) -> Option<f64> {
    let mut amount_sum: f64 = 0.0;
    let mut qty_sum: u128 = 0;
    amount_qty.iter().for_each(|(amount, qty)| {
        amount_sum += amount * *qty as f64;
        qty_sum += *qty as u128;
    });

    if qty_sum == 0 {
        return None;
    }
    Some(amount_sum / qty_sum as f64)
}

/// Calculates the median of an array of numbers.
///
/// The numbers do not need to be sorted. For an even number of values the median is
/// the mean of the two middle values.
///
/// Returns `None` for an empty array.
pub fn median(numbers: &[f64]) -> Option<f64> {
    if numbers.is_empty() {
        return None;
    }

    let mut v = numbers.to_vec();
    v.sort_unstable_by(|a, b| a.total_cmp(b));

    let mid = v.len() / 2;
    if v.len() % 2 == 0 {
        Some((v[mid - 1] + v[mid]) / 2.0)
    } else {
        Some(v[mid])
    }
}

/// The smallest of an array of numbers, or `None` for an empty array.
pub fn min(numbers: &[f64]) -> Option<f64> {
    numbers.iter().copied().reduce(f64::min)
}

/// The largest of an array of numbers, or `None` for an empty array.
pub fn max(numbers: &[f64]) -> Option<f64> {
    numbers.iter().copied().reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_RELATIVE_DIFF: f64 = 0.000000001;

    #[test]
    fn mean_simple_ordered() {
        assert_eq!(Some(2.0), mean(&[1.0, 2.0, 3.0]));
    }

    #[test]
    fn mean_non_integer_mean() {
        assert_eq!(Some(2.5), mean(&[4.0, 1.0, 3.0, 2.0]))
    }

    #[test]
    fn mean_empty_array() {
        assert!(mean(&[]).is_none());
    }

    #[test]
    fn weighted_mean_single_data_point() {
        assert_eq!(Some(5.0), weighted_mean(&[(5.0, 2)]));
    }

    #[test]
    fn weighted_mean_multiple_data_points() {
        assert_eq!(Some(2.0), weighted_mean(&[(1.0, 4), (3.0, 2), (4.0, 1)]));
    }

    #[test]
    fn weighted_mean_matches_sum_of_products() {
        let data: [(f64, u64); 5] = [
            (845_000.0, 3),
            (839_999.5, 12),
            (850_500.0, 1),
            (912_000.25, 40),
            (799_000.0, 7),
        ];
        let products: f64 = data.iter().map(|(c, q)| c * *q as f64).sum();
        let quantities: u64 = data.iter().map(|(_, q)| q).sum();
        assert_relative_eq!(
            products / quantities as f64,
            weighted_mean(&data).unwrap(),
            max_relative = MAX_RELATIVE_DIFF
        );
    }

    #[test]
    fn weighted_mean_ignores_zero_quantity_entries() {
        assert_eq!(Some(10.0), weighted_mean(&[(10.0, 3), (1_000_000.0, 0)]));
    }

    #[test]
    fn weighted_mean_zero_total_quantity() {
        assert!(weighted_mean(&[(5.0, 0), (6.0, 0)]).is_none());
        assert!(weighted_mean(&[]).is_none());
    }

    #[test]
    fn std_dev_population_odd_len() {
        assert_relative_eq!(
            0.81649658092,
            std_dev(&[1.0, 2.0, 3.0], true).unwrap(),
            max_relative = MAX_RELATIVE_DIFF
        );
    }

    #[test]
    fn std_dev_sample_odd_len() {
        assert_eq!(1.0, std_dev(&[1.0, 2.0, 3.0], false).unwrap())
    }

    #[test]
    fn std_dev_sample_even_len() {
        assert_relative_eq!(
            0.95742710775,
            std_dev(&[1.0, 2.0, 3.0, 3.0], false).unwrap(),
            max_relative = MAX_RELATIVE_DIFF
        );
    }

    #[test]
    fn std_dev_sample_four_tens() {
        assert_relative_eq!(
            12.909944487358,
            std_dev(&[10.0, 20.0, 30.0, 40.0], false).unwrap(),
            max_relative = MAX_RELATIVE_DIFF
        );
    }

    #[test]
    fn std_dev_sample_large_arr() {
        let arr: [f64; 20] = [
            9.0, 30.0, 51.0, 66.0, 139.0, 159.0, 179.0, 181.0, 196.0, 249.0, 282.0, 296.0,
            301.0, 356.0, 384.0, 410.0, 455.0, 461.0, 475.0, 481.0,
        ];
        let res = std_dev(&arr, false).unwrap();
        assert_relative_eq!(156.111296330, res, max_relative = MAX_RELATIVE_DIFF);
    }

    #[test]
    fn std_dev_invalid_array_size() {
        assert!(std_dev(&[], false).is_none());
        assert!(std_dev(&[1.0], false).is_none());
    }

    #[test]
    fn median_odd_len_unsorted() {
        assert_eq!(Some(30.0), median(&[50.0, 10.0, 30.0]));
    }

    #[test]
    fn median_even_len() {
        assert_eq!(Some(25.0), median(&[40.0, 10.0, 30.0, 20.0]));
    }

    #[test]
    fn median_fractional_values() {
        assert_eq!(Some(12.75), median(&[12.5, 13.0]));
    }

    #[test]
    fn median_single_and_empty() {
        assert_eq!(Some(7.0), median(&[7.0]));
        assert!(median(&[]).is_none());
    }

    #[test]
    fn min_and_max() {
        assert_eq!(Some(0.5), min(&[3.0, 0.5, 12.25]));
        assert_eq!(Some(12.25), max(&[3.0, 0.5, 12.25]));
        assert!(min(&[]).is_none());
        assert!(max(&[]).is_none());
    }
}
