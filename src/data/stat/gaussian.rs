#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::data::DataOrSuffStat;
use crate::dist::Gaussian;
use crate::traits::SuffStat;

/// Gaussian sufficient statistic.
///
/// Holds the number of observations, their mean, and the sum of squared
/// deviations from the mean, `Σ(x - x̄)²`. Both are updated with Welford's
/// method.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct GaussianSuffStat {
    /// Number of observations
    n: usize,
    /// Mean of `x`
    mean: f64,
    /// Sum of squared deviations from the mean
    sx: f64,
}

impl GaussianSuffStat {
    #[inline]
    pub fn new() -> Self {
        GaussianSuffStat {
            n: 0,
            mean: 0.0,
            sx: 0.0,
        }
    }

    /// Create a sufficient statistic from components without checking whether
    /// they are valid.
    #[inline]
    pub fn from_parts_unchecked(n: usize, mean: f64, sx: f64) -> Self {
        GaussianSuffStat { n, mean, sx }
    }

    /// Get the number of observations
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Get the sample mean
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sum of squared deviations from the mean, `Σ(x - x̄)²`
    #[inline]
    pub fn sum_sq_dev(&self) -> f64 {
        self.sx
    }

    /// Sum of `x`
    #[inline]
    pub fn sum_x(&self) -> f64 {
        self.mean * self.n as f64
    }

    /// Sum of `x^2`
    #[inline]
    pub fn sum_x_sq(&self) -> f64 {
        let nf = self.n as f64;
        self.mean.powi(2).mul_add(nf, self.sx)
    }
}

impl Default for GaussianSuffStat {
    fn default() -> Self {
        GaussianSuffStat::new()
    }
}

impl<'a> From<&'a GaussianSuffStat> for DataOrSuffStat<'a, f64, Gaussian> {
    fn from(stat: &'a GaussianSuffStat) -> Self {
        DataOrSuffStat::SuffStat(stat)
    }
}

impl<'a> From<&'a [f64]> for DataOrSuffStat<'a, f64, Gaussian> {
    fn from(xs: &'a [f64]) -> Self {
        DataOrSuffStat::Data(xs)
    }
}

impl<'a> From<&'a Vec<f64>> for DataOrSuffStat<'a, f64, Gaussian> {
    fn from(xs: &'a Vec<f64>) -> Self {
        DataOrSuffStat::Data(xs.as_slice())
    }
}

impl From<&[f64]> for GaussianSuffStat {
    fn from(xs: &[f64]) -> Self {
        let mut stat = GaussianSuffStat::new();
        stat.observe_many(xs);
        stat
    }
}

impl SuffStat<f64> for GaussianSuffStat {
    fn n(&self) -> usize {
        self.n
    }

    fn observe(&mut self, x: &f64) {
        let xf = *x;

        self.n += 1;

        let mean_xn =
            (xf - self.mean).mul_add((self.n as f64).recip(), self.mean);
        self.sx = (xf - self.mean).mul_add(xf - mean_xn, self.sx);
        self.mean = mean_xn;
    }

    fn forget(&mut self, x: &f64) {
        if self.n > 1 {
            let xf = *x;

            let n = self.n as f64;
            let nm1 = (self.n - 1) as f64;

            let old_mean = (n / nm1).mul_add(self.mean, -xf / nm1);

            self.sx -= (xf - old_mean) * (xf - self.mean);
            self.mean = old_mean;
            self.n -= 1;
        } else {
            self.n = 0;
            self.mean = 0.0;
            self.sx = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_unchecked() {
        let stat = GaussianSuffStat::from_parts_unchecked(10, 0.5, 1.2);
        assert_eq!(stat.n(), 10);
        assert_eq!(stat.mean(), 0.5);
        assert_eq!(stat.sum_sq_dev(), 1.2);
    }

    #[test]
    fn worked_example_stats() {
        let stat = GaussianSuffStat::from([1.0, 2.0, 3.0, 4.0].as_slice());
        assert_eq!(stat.n(), 4);
        assert::close(stat.mean(), 2.5, 1e-14);
        assert::close(stat.sum_sq_dev(), 5.0, 1e-14);
        assert::close(stat.sum_x(), 10.0, 1e-14);
        assert::close(stat.sum_x_sq(), 30.0, 1e-13);
    }

    #[test]
    fn suffstat_increments_correctly() {
        let xs: Vec<f64> = vec![0.0, 1.2, 2.3, 4.6];
        let mut suffstat = GaussianSuffStat::new();

        for x in xs {
            suffstat.observe(&x);
        }

        assert_eq!(suffstat.n(), 4);
        assert::close(suffstat.mean(), 2.025, 1e-14);
        assert::close(suffstat.sum_x(), 8.1, 1e-14);
        assert::close(suffstat.sum_x_sq(), 27.889_999_999_999_993, 1e-13);
    }

    #[test]
    fn forget_undoes_observe() {
        let xs: Vec<f64> = vec![0.0, 1.2, 2.3, 4.6];
        let mut suffstat = GaussianSuffStat::from(xs.as_slice());

        suffstat.observe(&5.0);
        suffstat.forget(&5.0);

        assert_eq!(suffstat.n(), 4);
        assert::close(suffstat.mean(), 2.025, 1e-14);
        assert::close(suffstat.sum_x(), 8.1, 1e-14);
        assert::close(suffstat.sum_x_sq(), 27.889_999_999_999_993, 1e-12);
    }

    #[test]
    fn forget_last_resets() {
        let mut stat = GaussianSuffStat::new();
        stat.observe(&3.3);
        stat.forget(&3.3);
        assert_eq!(stat, GaussianSuffStat::new());
    }

    #[test]
    fn large_offset_is_stable() {
        // naive sum of squares loses everything at this magnitude
        let xs: Vec<f64> = vec![1e9 + 1.0, 1e9 + 2.0, 1e9 + 3.0, 1e9 + 4.0];
        let stat = GaussianSuffStat::from(xs.as_slice());
        assert::close(stat.sum_sq_dev(), 5.0, 1e-6);
    }
}
