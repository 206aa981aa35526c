//! Income compression and scaling.
//!
//! Incomes span many orders of magnitude once an economy gets going, so
//! raw values are useless as network inputs. The pipeline is a
//! sign-preserving log compression followed by abs-max scaling into
//! `[-1, 1]`.

/// Sign-preserving logarithmic compression.
///
/// `sign(v) * max(log10(|v|), 0)`, with `0 → 0` rather than `-inf`.
/// Magnitudes at or below 1 compress to zero; everything larger keeps
/// its sign and grows with the order of magnitude.
pub fn signed_log10(v: f64) -> f64 {
    if v == 0.0 {
        return 0.0;
    }
    v.signum() * v.abs().log10().max(0.0)
}

/// Scale a vector by its maximum absolute value, in place.
///
/// The result lies in `[-1, 1]`. When every element is zero the slice
/// is left untouched — dividing by a zero maximum would poison the
/// vector with NaN.
pub fn abs_max_scale(values: &mut [f64]) {
    let max = values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    if max > 0.0 {
        for v in values.iter_mut() {
            *v /= max;
        }
    }
}

/// The full income pipeline: compress each per-resource income, then
/// scale the vector into `[-1, 1]`.
pub fn scaled_income(income: &[f64]) -> Vec<f32> {
    let mut compressed: Vec<f64> = income.iter().map(|&v| signed_log10(v)).collect();
    abs_max_scale(&mut compressed);
    compressed.into_iter().map(|v| v as f32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_maps_to_zero() {
        assert_eq!(signed_log10(0.0), 0.0);
        assert_eq!(signed_log10(-0.0), 0.0);
    }

    #[test]
    fn sub_unit_magnitudes_compress_to_zero() {
        assert_eq!(signed_log10(0.5), 0.0);
        assert_eq!(signed_log10(-0.25).abs(), 0.0);
        assert_eq!(signed_log10(1.0), 0.0);
    }

    #[test]
    fn larger_magnitudes_keep_sign() {
        assert!((signed_log10(5.0) - 5.0f64.log10()).abs() < 1e-12);
        assert_eq!(signed_log10(100.0), 2.0);
        assert_eq!(signed_log10(-1000.0), -3.0);
    }

    #[test]
    fn abs_max_scale_normalizes_to_unit_range() {
        let mut v = vec![1.0, -4.0, 2.0];
        abs_max_scale(&mut v);
        assert_eq!(v, vec![0.25, -1.0, 0.5]);
    }

    #[test]
    fn abs_max_scale_all_zero_is_identity() {
        let mut v = vec![0.0, 0.0, 0.0];
        abs_max_scale(&mut v);
        assert_eq!(v, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn pipeline_matches_hand_computed_vector() {
        // log10: [1, -1, ~7, -log10(20), 0], then divided by ~7.
        let out = scaled_income(&[10.0, -10.0, 9_999_999.0, -20.0, 0.0]);
        let max = 9_999_999.0f64.log10();
        assert!((out[0] as f64 - 1.0 / max).abs() < 1e-6);
        assert!((out[1] as f64 + 1.0 / max).abs() < 1e-6);
        assert!((out[2] - 1.0).abs() < 1e-6);
        assert!((out[3] as f64 + 20.0f64.log10() / max).abs() < 1e-6);
        assert_eq!(out[4], 0.0);
    }

    proptest! {
        #[test]
        fn never_flips_sign(income in proptest::collection::vec(-1e12f64..1e12, 0..16)) {
            let out = scaled_income(&income);
            prop_assert_eq!(out.len(), income.len());
            for (raw, scaled) in income.iter().zip(&out) {
                // No opposite signs, zero stays zero, range is [-1, 1].
                prop_assert!(raw * (*scaled as f64) >= 0.0);
                if *raw == 0.0 {
                    prop_assert_eq!(*scaled, 0.0);
                }
                prop_assert!(scaled.abs() <= 1.0 + f32::EPSILON);
            }
        }

        #[test]
        fn strict_sign_above_unit_magnitude(v in 1.01f64..1e9) {
            prop_assert!(signed_log10(v) > 0.0);
            prop_assert!(signed_log10(-v) < 0.0);
        }
    }
}
