//! Float ordering policies.
//!
//! Contour values and coordinates are plain `f64`; anything that sorts them
//! goes through here so ties and signed zeros order the same way every time.

use core::cmp::Ordering;

/// Canonicalize a floating-point value for deterministic ordering.
///
/// `-0.0` becomes `0.0` and every NaN becomes the canonical NaN.
pub fn canonical_f64(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

/// Deterministic total ordering for floats.
pub fn stable_total_cmp_f64(a: f64, b: f64) -> Ordering {
    canonical_f64(a).total_cmp(&canonical_f64(b))
}

/// Smallest and largest value of a sequence, ignoring NaN.
pub fn finite_min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::{canonical_f64, finite_min_max, stable_total_cmp_f64};
    use core::cmp::Ordering;

    #[test]
    fn canonicalizes_negative_zero() {
        assert_eq!(canonical_f64(-0.0), 0.0);
        assert_eq!(stable_total_cmp_f64(-0.0, 0.0), Ordering::Equal);
    }

    #[test]
    fn stable_cmp_orders_contours() {
        let mut v = vec![10.0, 5.0, 15.0, 5.0];
        v.sort_by(|a, b| stable_total_cmp_f64(*b, *a));
        assert_eq!(v, vec![15.0, 10.0, 5.0, 5.0]);
    }

    #[test]
    fn min_max_skips_nan() {
        assert_eq!(finite_min_max([3.0, f64::NAN, 1.0, 7.0]), Some((1.0, 7.0)));
        assert_eq!(finite_min_max([f64::NAN]), None);
        assert_eq!(finite_min_max(Vec::<f64>::new()), None);
    }
}
