/// Standard normal CDF.
pub fn normal_probability(a: f64) -> f64 {
    0.5 * (1.0 + libm::erf(a / (2.0f64).sqrt()))
}

/// Pooled two-proportion z statistic for `k1` successes out of `n1` trials
/// against `k2` out of `n2`.
///
/// Returns 0.0 when the pooled standard error degenerates (all successes or
/// all failures) or when either trial count is zero.
pub fn two_proportion_z(k1: u64, n1: u64, k2: u64, n2: u64) -> f64 {
    if n1 == 0 || n2 == 0 {
        return 0.0;
    }
    let (n1f, n2f) = (n1 as f64, n2 as f64);
    let p1 = k1 as f64 / n1f;
    let p2 = k2 as f64 / n2f;
    let pooled = (k1 + k2) as f64 / (n1f + n2f);
    let se = (pooled * (1.0 - pooled) * (1.0 / n1f + 1.0 / n2f)).sqrt();
    if se <= f64::EPSILON {
        return 0.0;
    }
    (p1 - p2) / se
}

/// Two-sided p-value of a z statistic under the standard normal.
pub fn two_sided_p_value(z: f64) -> f64 {
    2.0 * (1.0 - normal_probability(z.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_cdf_at_zero_is_half() {
        assert!((normal_probability(0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn normal_cdf_is_symmetric() {
        let p = normal_probability(1.3);
        let q = normal_probability(-1.3);
        assert!((p + q - 1.0).abs() < 1e-12);
    }

    #[test]
    fn z_is_zero_for_identical_proportions() {
        assert_eq!(two_proportion_z(8, 10, 8, 10), 0.0);
    }

    #[test]
    fn z_sign_follows_order() {
        let z = two_proportion_z(9, 10, 6, 10);
        assert!(z > 0.0);
        assert!((two_proportion_z(6, 10, 9, 10) + z).abs() < 1e-12);
    }

    #[test]
    fn z_degenerates_to_zero() {
        assert_eq!(two_proportion_z(10, 10, 10, 10), 0.0);
        assert_eq!(two_proportion_z(0, 0, 5, 10), 0.0);
    }

    #[test]
    fn two_sided_p_value_of_one_sigma() {
        // P(|Z| > 1) ~ 0.3173
        assert!((two_sided_p_value(1.0) - 0.317_310_507_862).abs() < 1e-9);
        assert!((two_sided_p_value(-1.0) - two_sided_p_value(1.0)).abs() < 1e-15);
    }

    #[test]
    fn p_value_shrinks_with_larger_z() {
        assert!(two_sided_p_value(3.0) < two_sided_p_value(1.0));
        assert!((two_sided_p_value(0.0) - 1.0).abs() < 1e-12);
    }
}
