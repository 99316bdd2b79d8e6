//! Rolling windows over nullable monthly series.
//!
//! All functions are positional: index `t` is one month after `t - 1`, and
//! the caller is responsible for the series being a contiguous panel for one
//! entity. A window containing a null yields a null.

use ndarray::ArrayView1;

/// Shift a series forward by `periods`, filling the head with nulls.
pub fn lag<T: Copy>(values: &[Option<T>], periods: usize) -> Vec<Option<T>> {
    let n = values.len();
    (0..n)
        .map(|t| if t >= periods { values[t - periods] } else { None })
        .collect()
}

fn full_window(window: &[Option<f64>]) -> Option<Vec<f64>> {
    window.iter().copied().collect()
}

/// Rolling standard deviation over the `window` observations ending at `t`.
///
/// Null until `window` non-null observations are available, and null when
/// `window <= ddof`.
pub fn rolling_std(values: &[Option<f64>], window: usize, ddof: usize) -> Vec<Option<f64>> {
    if window == 0 || window <= ddof {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|t| {
            if t + 1 < window {
                return None;
            }
            let obs = full_window(&values[t + 1 - window..=t])?;
            Some(ArrayView1::from(&obs[..]).std(ddof as f64))
        })
        .collect()
}

/// Compounded return over a lagged window.
///
/// The value at `t` is `prod(1 + r_k) - 1` for `k` in
/// `t - skip - window + 1 ..= t - skip`, i.e. `window` months ending `skip`
/// months before `t`. With `window = 11, skip = 2` this is the t-12..t-2
/// momentum ranking return.
pub fn rolling_product_return(
    values: &[Option<f64>],
    window: usize,
    skip: usize,
) -> Vec<Option<f64>> {
    let span = window + skip;
    (0..values.len())
        .map(|t| {
            if window == 0 || t + 1 < span {
                return None;
            }
            let end = t - skip;
            let obs = full_window(&values[end + 1 - window..=end])?;
            Some(obs.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_lag() {
        let x = [Some(1), Some(2), None, Some(4)];
        assert_eq!(lag(&x, 1), vec![None, Some(1), Some(2), None]);
        assert_eq!(lag(&x, 5), vec![None; 4]);
        assert_eq!(lag(&x, 0), x.to_vec());
    }

    #[test]
    fn test_rolling_std_warmup_and_values() {
        let x: Vec<Option<f64>> = [1.0, 2.0, 3.0, 5.0].into_iter().map(Some).collect();
        let out = rolling_std(&x, 3, 1);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert_relative_eq!(out[2].unwrap(), 1.0, epsilon = 1e-12);
        // [2, 3, 5]: mean 10/3, var = (16/9 + 1/9 + 25/9) / 2 = 7/3
        assert_relative_eq!(out[3].unwrap(), (7.0_f64 / 3.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_rolling_std_null_in_window() {
        let x = vec![Some(1.0), None, Some(3.0), Some(4.0), Some(5.0)];
        let out = rolling_std(&x, 2, 1);
        assert_eq!(out[1], None);
        assert_eq!(out[2], None);
        assert!(out[3].is_some());
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(2, 2)]
    fn test_rolling_std_degenerate_window(#[case] window: usize, #[case] ddof: usize) {
        let x = vec![Some(1.0); 4];
        assert!(rolling_std(&x, window, ddof).iter().all(Option::is_none));
    }

    #[test]
    fn test_rolling_product_return_skips_recent_months() {
        let x: Vec<Option<f64>> = [0.1, 0.2, -0.1, 0.5, 0.3].into_iter().map(Some).collect();
        let out = rolling_product_return(&x, 2, 2);
        assert_eq!(&out[..3], &[None, None, None]);
        // t = 3 covers months 0 and 1
        assert_relative_eq!(out[3].unwrap(), 1.1 * 1.2 - 1.0, epsilon = 1e-12);
        // t = 4 covers months 1 and 2
        assert_relative_eq!(out[4].unwrap(), 1.2 * 0.9 - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rolling_product_return_momentum_window() {
        let x = vec![Some(0.01); 13];
        let out = rolling_product_return(&x, 11, 2);
        assert!(out[..12].iter().all(Option::is_none));
        assert_relative_eq!(out[12].unwrap(), 1.01_f64.powi(11) - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rolling_product_return_null_breaks_window() {
        let mut x = vec![Some(0.01); 14];
        x[1] = None;
        let out = rolling_product_return(&x, 11, 2);
        assert_eq!(out[12], None);
        assert!(out[13].is_some());
    }
}
