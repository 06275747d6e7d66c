//! Real dilogarithm and the softplus integral.
//!
//! The dilogarithm is defined as:
//!
//! Li₂(x) = Σ_{k=1}^∞ x^k / k²
//!
//! # Key Properties
//!
//! - Li₂(0) = 0
//! - Li₂(1) = π²/6
//! - Li₂(-1) = -π²/12
//! - d/dx Li₂(x) = -ln(1-x) / x
//!
//! The evaluation scheme substitutes t = -ln(1-x) and sums a short
//! Bernoulli-number series, valid for |t| ≤ ln 2; the reflection identity
//! Li₂(x) + Li₂(1-x) = π²/6 - ln(x)·ln(1-x) and the inversion identity
//! for x < -1 route every argument into that window.

/// π²/6, the value of Li₂ at 1.
const PI_SQUARED_OVER_6: f64 = 1.644_934_066_848_226_44;

/// Σ B_n t^(n+1) / (n+1)! with the fixed coefficient table; converges for
/// |t| ≤ ln 2.
fn bernoulli_series(t: f64) -> f64 {
    debug_assert!(t.abs() <= std::f64::consts::LN_2 + 1e-12);

    let t2 = t * t;
    let mut power = [0.0; 8];
    power[0] = t2 * t;
    for k in 1..8 {
        power[k] = t2 * power[k - 1];
    }

    let mut total = -power[7] * 1.993_929_586_072_107_57e-14;
    total += power[6] * 8.921_691_020_456_452_56e-13;
    total -= power[5] * 4.064_761_645_144_225_53e-11;
    total += power[4] * 1.897_886_998_897_099_91e-9;
    total -= power[3] * 9.185_773_074_661_963_55e-8;
    total += power[2] * 4.724_111_866_969_009_83e-6;
    total -= power[1] * 2.777_777_777_777_777_78e-4;
    total += power[0] * 2.777_777_777_777_777_78e-2;

    total - t2 / 4.0 + t
}

/// Real dilogarithm Li₂(x).
///
/// Defined on the real axis for x ≤ 1; arguments above 1 yield NaN (the
/// analytic continuation is complex there).
#[must_use]
pub fn dilog(x: f64) -> f64 {
    if x < -1.0 {
        return -dilog(x.recip()) - PI_SQUARED_OVER_6 - 0.5 * (-x).ln().powi(2);
    }
    if x <= 0.5 {
        return bernoulli_series(-(-x).ln_1p());
    }
    if x < 1.0 {
        return -dilog(1.0 - x) + PI_SQUARED_OVER_6 - x.ln() * (-x).ln_1p();
    }
    if x == 1.0 {
        return PI_SQUARED_OVER_6;
    }
    f64::NAN // reals only
}

/// Softplus integral: ∫₋∞^x ln(1 + eᵗ) dt = -Li₂(-eˣ).
///
/// The antiderivative of the softplus activation; its derivative is
/// `ln(1 + exp x)`.
#[must_use]
pub fn softpp(x: f64) -> f64 {
    if x > 0.0 {
        return x * x / 2.0 - softpp(-x) + PI_SQUARED_OVER_6;
    }
    -bernoulli_series(-x.exp().ln_1p())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const PI: f64 = std::f64::consts::PI;

    #[test]
    fn test_dilog_at_zero() {
        assert_eq!(dilog(0.0), 0.0);
    }

    #[test]
    fn test_dilog_at_one() {
        assert_relative_eq!(dilog(1.0), PI * PI / 6.0, max_relative = 1e-15);
    }

    #[test]
    fn test_dilog_at_minus_one() {
        assert_relative_eq!(dilog(-1.0), -PI * PI / 12.0, max_relative = 1e-14);
    }

    #[test]
    fn test_dilog_at_half() {
        // Li2(1/2) = pi^2/12 - ln(2)^2 / 2
        let expected = PI * PI / 12.0 - std::f64::consts::LN_2.powi(2) / 2.0;
        assert_relative_eq!(dilog(0.5), expected, max_relative = 1e-14);
    }

    #[test]
    fn test_dilog_matches_series_for_small_arguments() {
        for &x in &[-0.4, -0.2, 0.1, 0.3, 0.45] {
            let mut sum = 0.0;
            let mut power = x;
            for k in 1..200 {
                sum += power / (k as f64 * k as f64);
                power *= x;
            }
            assert_relative_eq!(dilog(x), sum, max_relative = 1e-13);
        }
    }

    #[test]
    fn test_dilog_inversion_identity() {
        // Li2(x) + Li2(1/x) = -pi^2/6 - ln(-x)^2 / 2 for x < -1
        let x = -3.0_f64;
        let lhs = dilog(x) + dilog(x.recip());
        let rhs = -PI * PI / 6.0 - 0.5 * (-x).ln().powi(2);
        assert_relative_eq!(lhs, rhs, max_relative = 1e-13);
    }

    #[test]
    fn test_dilog_above_one_is_nan() {
        assert!(dilog(1.5).is_nan());
    }

    #[test]
    fn test_softpp_at_zero() {
        // -Li2(-1) = pi^2/12
        assert_relative_eq!(softpp(0.0), PI * PI / 12.0, max_relative = 1e-14);
    }

    #[test]
    fn test_softpp_matches_dilog() {
        for &x in &[-2.0, -0.5, 0.0, 0.5, 2.0] {
            assert_relative_eq!(softpp(x), -dilog(-x.exp()), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_softpp_derivative_numerically() {
        // d/dx softpp = ln(1 + e^x)
        let h = 1e-6;
        for &x in &[-1.0, 0.0, 1.3] {
            let numeric = (softpp(x + h) - softpp(x - h)) / (2.0 * h);
            let analytic = x.exp().ln_1p();
            assert_relative_eq!(numeric, analytic, max_relative = 1e-6);
        }
    }
}
