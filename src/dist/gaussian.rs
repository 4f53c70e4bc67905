//! Gaussian/Normal distribution over x in (-∞, ∞)
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use rand::Rng;
use rand_distr::Normal;
use special::Error as _;
use std::f64::consts::SQRT_2;
use std::fmt;

use crate::consts::HALF_LN_2PI;
use crate::data::GaussianSuffStat;
use crate::impl_display;
use crate::traits::{
    Cdf, ContinuousDistr, HasDensity, HasSuffStat, InverseCdf, Mean,
    Parameterized, Sampleable, SuffStat, Support, Variance,
};

/// Gaussian / [Normal distribution][wiki], N(μ, σ) over real values.
///
/// A draw from a [`NormalInvGamma`](crate::dist::NormalInvGamma) can be read
/// as a `Gaussian` whose mean and variance are the drawn `(x, σ²)`.
///
/// ```
/// use nig::dist::Gaussian;
///
/// let g = Gaussian::from_mean_var(1.5, 4.0).unwrap();
/// assert_eq!(g.sigma(), 2.0);
/// assert_eq!(g.var(), 4.0);
/// ```
///
/// [wiki]: https://en.wikipedia.org/wiki/Normal_distribution
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "serde1", serde(try_from = "GaussianParameters"))]
#[cfg_attr(feature = "serde1", serde(into = "GaussianParameters"))]
pub struct Gaussian {
    /// Mean
    mu: f64,
    /// Standard deviation
    sigma: f64,
    /// Cached log(sigma)
    ln_sigma: f64,
}

impl PartialEq for Gaussian {
    fn eq(&self, other: &Gaussian) -> bool {
        self.mu == other.mu && self.sigma == other.sigma
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct GaussianParameters {
    pub mu: f64,
    pub sigma: f64,
}

impl TryFrom<GaussianParameters> for Gaussian {
    type Error = GaussianError;

    fn try_from(params: GaussianParameters) -> Result<Self, Self::Error> {
        Gaussian::new(params.mu, params.sigma)
    }
}

impl From<Gaussian> for GaussianParameters {
    fn from(gauss: Gaussian) -> Self {
        GaussianParameters {
            mu: gauss.mu,
            sigma: gauss.sigma,
        }
    }
}

impl Parameterized for Gaussian {
    type Parameters = GaussianParameters;

    fn emit_params(&self) -> Self::Parameters {
        Self::Parameters {
            mu: self.mu(),
            sigma: self.sigma(),
        }
    }

    fn from_params(params: Self::Parameters) -> Self {
        Self::new_unchecked(params.mu, params.sigma)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum GaussianError {
    /// The mu parameter is infinite or NaN
    MuNotFinite { mu: f64 },
    /// The sigma parameter is less than or equal to zero
    SigmaTooLow { sigma: f64 },
    /// The sigma parameter is infinite or NaN
    SigmaNotFinite { sigma: f64 },
}

impl Gaussian {
    /// Create a new Gaussian distribution
    ///
    /// # Arguments
    /// - mu: mean
    /// - sigma: standard deviation
    pub fn new(mu: f64, sigma: f64) -> Result<Self, GaussianError> {
        if !mu.is_finite() {
            Err(GaussianError::MuNotFinite { mu })
        } else if sigma <= 0.0 {
            Err(GaussianError::SigmaTooLow { sigma })
        } else if !sigma.is_finite() {
            Err(GaussianError::SigmaNotFinite { sigma })
        } else {
            Ok(Gaussian {
                mu,
                sigma,
                ln_sigma: sigma.ln(),
            })
        }
    }

    /// Create a Gaussian from its mean and variance, σ²
    #[inline]
    pub fn from_mean_var(mu: f64, var: f64) -> Result<Self, GaussianError> {
        Gaussian::new(mu, var.sqrt())
    }

    /// Creates a new Gaussian without checking whether the parameters are
    /// valid.
    #[inline]
    #[must_use]
    pub fn new_unchecked(mu: f64, sigma: f64) -> Self {
        Gaussian {
            mu,
            sigma,
            ln_sigma: sigma.ln(),
        }
    }

    /// Standard normal
    ///
    /// # Example
    ///
    /// ```rust
    /// # use nig::dist::Gaussian;
    /// let gauss = Gaussian::standard();
    ///
    /// assert_eq!(gauss, Gaussian::new(0.0, 1.0).unwrap());
    /// ```
    #[inline]
    #[must_use]
    pub fn standard() -> Self {
        Gaussian {
            mu: 0.0,
            sigma: 1.0,
            ln_sigma: 0.0,
        }
    }

    /// Get mu parameter
    #[inline]
    #[must_use]
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Set the value of mu
    ///
    /// # Example
    ///
    /// ```rust
    /// # use nig::dist::Gaussian;
    /// let mut gauss = Gaussian::new(2.0, 1.5).unwrap();
    /// assert_eq!(gauss.mu(), 2.0);
    ///
    /// gauss.set_mu(1.3).unwrap();
    /// assert_eq!(gauss.mu(), 1.3);
    ///
    /// assert!(gauss.set_mu(f64::INFINITY).is_err());
    /// assert!(gauss.set_mu(f64::NAN).is_err());
    /// ```
    #[inline]
    pub fn set_mu(&mut self, mu: f64) -> Result<(), GaussianError> {
        if mu.is_finite() {
            self.set_mu_unchecked(mu);
            Ok(())
        } else {
            Err(GaussianError::MuNotFinite { mu })
        }
    }

    /// Set the value of mu without input validation
    #[inline]
    pub fn set_mu_unchecked(&mut self, mu: f64) {
        self.mu = mu;
    }

    /// Get sigma parameter
    #[inline]
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// The variance, σ²
    #[inline]
    #[must_use]
    pub fn var(&self) -> f64 {
        self.sigma * self.sigma
    }

    /// Set the value of sigma
    ///
    /// ```rust
    /// # use nig::dist::Gaussian;
    /// let mut gauss = Gaussian::standard();
    /// assert!(gauss.set_sigma(2.3).is_ok());
    /// assert!(gauss.set_sigma(0.0).is_err());
    /// assert!(gauss.set_sigma(-1.0).is_err());
    /// assert!(gauss.set_sigma(f64::INFINITY).is_err());
    /// ```
    #[inline]
    pub fn set_sigma(&mut self, sigma: f64) -> Result<(), GaussianError> {
        if sigma <= 0.0 {
            Err(GaussianError::SigmaTooLow { sigma })
        } else if !sigma.is_finite() {
            Err(GaussianError::SigmaNotFinite { sigma })
        } else {
            self.set_sigma_unchecked(sigma);
            Ok(())
        }
    }

    /// Set the value of sigma
    #[inline]
    pub fn set_sigma_unchecked(&mut self, sigma: f64) {
        self.sigma = sigma;
        self.ln_sigma = sigma.ln();
    }
}

impl Default for Gaussian {
    fn default() -> Self {
        Gaussian::standard()
    }
}

impl From<&Gaussian> for String {
    fn from(gauss: &Gaussian) -> String {
        format!("N(μ: {}, σ: {})", gauss.mu, gauss.sigma)
    }
}

impl_display!(Gaussian);

impl HasDensity<f64> for Gaussian {
    fn ln_f(&self, x: &f64) -> f64 {
        let k = (x - self.mu) / self.sigma;
        (0.5 * k).mul_add(-k, -self.ln_sigma) - HALF_LN_2PI
    }
}

impl Sampleable<f64> for Gaussian {
    fn draw<R: Rng>(&self, rng: &mut R) -> f64 {
        // sigma > 0 and finite for any validated Gaussian
        let g = Normal::new(self.mu, self.sigma).unwrap();
        rng.sample(g)
    }

    fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        let g = Normal::new(self.mu, self.sigma).unwrap();
        rng.sample_iter(g).take(n).collect()
    }
}

impl ContinuousDistr<f64> for Gaussian {}

impl Support<f64> for Gaussian {
    fn supports(&self, x: &f64) -> bool {
        x.is_finite()
    }
}

impl Cdf<f64> for Gaussian {
    fn cdf(&self, x: &f64) -> f64 {
        let errf = ((x - self.mu) / (self.sigma * SQRT_2)).error();
        0.5 * (1.0 + errf)
    }
}

impl InverseCdf<f64> for Gaussian {
    fn invcdf(&self, p: f64) -> f64 {
        assert!((0.0..=1.0).contains(&p), "P out of range");

        (self.sigma * SQRT_2)
            .mul_add(2.0_f64.mul_add(p, -1.0).inv_error(), self.mu)
    }
}

impl Mean<f64> for Gaussian {
    fn mean(&self) -> Option<f64> {
        Some(self.mu)
    }
}

impl Variance<f64> for Gaussian {
    fn variance(&self) -> Option<f64> {
        Some(self.var())
    }
}

impl HasSuffStat<f64> for Gaussian {
    type Stat = GaussianSuffStat;

    fn empty_suffstat(&self) -> Self::Stat {
        GaussianSuffStat::new()
    }

    fn ln_f_stat(&self, stat: &Self::Stat) -> f64 {
        let z = (2.0 * self.sigma * self.sigma).recip();
        let n = stat.n() as f64;
        let expterm = stat.sum_x_sq()
            + self.mu.mul_add(-2.0 * stat.sum_x(), n * self.mu * self.mu);
        -n.mul_add(self.ln_sigma + HALF_LN_2PI, z * expterm)
    }
}

impl std::error::Error for GaussianError {}

impl fmt::Display for GaussianError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MuNotFinite { mu } => write!(f, "non-finite mu: {mu}"),
            Self::SigmaTooLow { sigma } => {
                write!(f, "sigma ({sigma}) must be greater than zero")
            }
            Self::SigmaNotFinite { sigma } => {
                write!(f, "non-finite sigma: {sigma}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const TOL: f64 = 1E-12;

    use crate::test_basic_impls;
    test_basic_impls!(Gaussian::standard());

    #[test]
    fn new() {
        let gauss = Gaussian::new(1.2, 3.0).unwrap();
        assert::close(gauss.mu, 1.2, TOL);
        assert::close(gauss.sigma, 3.0, TOL);
    }

    #[test]
    fn new_rejects_bad_params() {
        assert!(Gaussian::new(f64::NAN, 1.0).is_err());
        assert_eq!(
            Gaussian::new(0.0, 0.0),
            Err(GaussianError::SigmaTooLow { sigma: 0.0 })
        );
        assert!(Gaussian::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn from_mean_var_rejects_nonpositive_var() {
        assert!(Gaussian::from_mean_var(0.0, 0.0).is_err());
        assert!(Gaussian::from_mean_var(0.0, -1.0).is_err());
    }

    #[test]
    fn variance_should_be_sigma_squared() {
        let sigma = 0.5;
        let gauss = Gaussian::new(3.4, sigma).unwrap();
        assert::close(gauss.variance().unwrap(), sigma * sigma, TOL);
    }

    #[test]
    fn sample_length() {
        let mut rng = crate::test::rng(1);
        let gauss = Gaussian::standard();
        let xs: Vec<f64> = gauss.sample(10, &mut rng);
        assert_eq!(xs.len(), 10);
        assert!(xs.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn standard_ln_pdf_at_zero() {
        let gauss = Gaussian::standard();
        assert::close(gauss.ln_pdf(&0.0_f64), -0.918_938_533_204_672_7, TOL);
    }

    #[test]
    fn standard_ln_pdf_off_zero() {
        let gauss = Gaussian::standard();
        assert::close(gauss.ln_pdf(&2.1_f64), -3.123_938_533_204_672_7, TOL);
    }

    #[test]
    fn nonstandard_ln_pdf_on_mean() {
        let gauss = Gaussian::new(-1.2, 0.33).unwrap();
        assert::close(gauss.ln_pdf(&-1.2_f64), 0.189_724_091_316_938_46, TOL);
    }

    #[test]
    fn ln_pdf_outside_support_is_neg_inf() {
        let gauss = Gaussian::standard();
        assert_eq!(gauss.ln_pdf(&f64::NAN), f64::NEG_INFINITY);
    }

    #[test]
    fn cdf_value_at_one() {
        let gauss = Gaussian::standard();
        assert::close(gauss.cdf(&1.0_f64), 0.841_344_746_068_542_9, TOL);
    }

    #[test]
    fn quantile_agree_with_cdf() {
        let mut rng = crate::test::rng(2);
        let gauss = Gaussian::standard();
        let xs: Vec<f64> = gauss.sample(100, &mut rng);

        for x in &xs {
            let p = gauss.cdf(x);
            let y: f64 = gauss.quantile(p);
            assert::close(y, *x, 1e-9);
        }
    }

    #[test]
    fn ln_f_stat() {
        let data: Vec<f64> = vec![0.1, 0.23, 1.4, 0.65, 0.22, 3.1];
        let mut stat = GaussianSuffStat::new();
        stat.observe_many(&data);

        let gauss = Gaussian::new(-0.3, 2.33).unwrap();

        let ln_f_base: f64 = data.iter().map(|x| gauss.ln_f(x)).sum();
        let ln_f_stat: f64 =
            <Gaussian as HasSuffStat<f64>>::ln_f_stat(&gauss, &stat);

        assert::close(ln_f_base, ln_f_stat, TOL);
    }
}
