//! A common conjugate prior for Gaussians with unknown mean and variance
//!
//! For a reference see section 6 of [Kevin Murphy's
//! whitepaper](https://www.cs.ubc.ca/~murphyk/Papers/bayesGauss.pdf). We use
//! the precision-scale form, in which the mean is drawn with variance σ²/ν.
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

mod gaussian_prior;
mod samples;

pub use samples::{
    empirical_interval, IntervalError, NigInterval, NigSamples,
    NigSamplesError, NigSamplesParts,
};

use rand::Rng;
use rand_distr::StandardNormal;
use special::Gamma as _;
use std::fmt;

use crate::consts::HALF_LN_2PI;
use crate::data::GaussianSuffStat;
use crate::dist::invgamma::recip_draw;
use crate::dist::{Gaussian, InvGamma, LocScaleT};
use crate::impl_display;
use crate::traits::{
    ContinuousDistr, HasDensity, InverseCdf, Parameterized, Sampleable,
    Support,
};

/// Normal-inverse-gamma distribution NIG(μ, ν, α, β) over pairs `(x, σ²)`.
///
/// ```math
/// σ² ~ InvGamma(α, β)
/// x | σ² ~ N(μ, σ²/ν)
/// ```
///
/// `x` is a candidate mean and `σ²` a candidate variance, so every draw can
/// be read as a [`Gaussian`]. As a prior on Gaussian data the NIG is
/// conjugate: the posterior after observing data is again a NIG.
///
/// # Example
///
/// ```
/// use nig::dist::NormalInvGamma;
///
/// let prior = NormalInvGamma::new(0.0, 0.054, 1.12, 0.4).unwrap();
/// let post = prior.posterior_from_data(&[1.0, 2.0, 3.0, 4.0]).unwrap();
///
/// assert!((post.m() - 2.466_699).abs() < 1e-6);
/// assert!((post.v() - 4.054).abs() < 1e-12);
/// assert!((post.a() - 3.12).abs() < 1e-12);
/// assert!((post.b() - 3.066_5).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "serde1", serde(try_from = "NormalInvGammaParameters"))]
#[cfg_attr(feature = "serde1", serde(into = "NormalInvGammaParameters"))]
pub struct NormalInvGamma {
    /// Location, μ
    m: f64,
    /// Precision scale, ν
    v: f64,
    /// Shape, α
    a: f64,
    /// Rate, β
    b: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct NormalInvGammaParameters {
    pub m: f64,
    pub v: f64,
    pub a: f64,
    pub b: f64,
}

impl TryFrom<NormalInvGammaParameters> for NormalInvGamma {
    type Error = NormalInvGammaError;

    fn try_from(params: NormalInvGammaParameters) -> Result<Self, Self::Error> {
        NormalInvGamma::new(params.m, params.v, params.a, params.b)
    }
}

impl From<NormalInvGamma> for NormalInvGammaParameters {
    fn from(nig: NormalInvGamma) -> Self {
        NormalInvGammaParameters {
            m: nig.m,
            v: nig.v,
            a: nig.a,
            b: nig.b,
        }
    }
}

impl Parameterized for NormalInvGamma {
    type Parameters = NormalInvGammaParameters;

    fn emit_params(&self) -> Self::Parameters {
        Self::Parameters {
            m: self.m(),
            v: self.v(),
            a: self.a(),
            b: self.b(),
        }
    }

    fn from_params(params: Self::Parameters) -> Self {
        Self::new_unchecked(params.m, params.v, params.a, params.b)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum NormalInvGammaError {
    /// The m parameter is infinite or NaN
    MNotFinite { m: f64 },
    /// The v parameter is less than or equal to zero
    VTooLow { v: f64 },
    /// The v parameter is infinite or NaN
    VNotFinite { v: f64 },
    /// The a parameter is less than or equal to zero
    ATooLow { a: f64 },
    /// The a parameter is infinite or NaN
    ANotFinite { a: f64 },
    /// The b parameter is less than or equal to zero
    BTooLow { b: f64 },
    /// The b parameter is infinite or NaN
    BNotFinite { b: f64 },
    /// The density was requested at σ² ≤ 0
    Sigma2TooLow { sigma2: f64 },
    /// The density was requested at a non-finite x or σ²
    PointNotFinite { x: f64, sigma2: f64 },
    /// Zero samples were requested
    NoSamples,
    /// An observation passed to the posterior update was infinite or NaN
    DataNotFinite { x: f64 },
}

#[inline]
fn validate(m: f64, v: f64, a: f64, b: f64) -> Result<(), NormalInvGammaError> {
    if !m.is_finite() {
        Err(NormalInvGammaError::MNotFinite { m })
    } else if !v.is_finite() {
        Err(NormalInvGammaError::VNotFinite { v })
    } else if !a.is_finite() {
        Err(NormalInvGammaError::ANotFinite { a })
    } else if !b.is_finite() {
        Err(NormalInvGammaError::BNotFinite { b })
    } else if v <= 0.0 {
        Err(NormalInvGammaError::VTooLow { v })
    } else if a <= 0.0 {
        Err(NormalInvGammaError::ATooLow { a })
    } else if b <= 0.0 {
        Err(NormalInvGammaError::BTooLow { b })
    } else {
        Ok(())
    }
}

impl NormalInvGamma {
    /// Create a new Normal Inverse Gamma distribution
    ///
    /// # Arguments
    /// - m: The prior mean
    /// - v: Precision scale; the mean has variance σ²/v
    /// - a: Shape of the inverse gamma on σ²
    /// - b: Scale of the inverse gamma on σ². The mean of σ² is b / (a - 1)
    pub fn new(
        m: f64,
        v: f64,
        a: f64,
        b: f64,
    ) -> Result<Self, NormalInvGammaError> {
        validate(m, v, a, b).map(|_| NormalInvGamma { m, v, a, b })
    }

    /// Creates a new NormalInvGamma without checking whether the parameters are
    /// valid.
    #[inline(always)]
    pub fn new_unchecked(m: f64, v: f64, a: f64, b: f64) -> Self {
        NormalInvGamma { m, v, a, b }
    }

    /// Returns (m, v, a, b)
    #[inline(always)]
    pub fn params(&self) -> (f64, f64, f64, f64) {
        (self.m, self.v, self.a, self.b)
    }

    /// Get the m parameter
    #[inline(always)]
    pub fn m(&self) -> f64 {
        self.m
    }

    /// Set the value of m
    ///
    /// # Example
    ///
    /// ```rust
    /// use nig::dist::NormalInvGamma;
    ///
    /// let mut nig = NormalInvGamma::new(0.0, 1.2, 2.3, 3.4).unwrap();
    /// assert_eq!(nig.m(), 0.0);
    ///
    /// nig.set_m(-1.1).unwrap();
    /// assert_eq!(nig.m(), -1.1);
    ///
    /// assert!(nig.set_m(f64::INFINITY).is_err());
    /// assert!(nig.set_m(f64::NAN).is_err());
    /// ```
    #[inline]
    pub fn set_m(&mut self, m: f64) -> Result<(), NormalInvGammaError> {
        if m.is_finite() {
            self.set_m_unchecked(m);
            Ok(())
        } else {
            Err(NormalInvGammaError::MNotFinite { m })
        }
    }

    /// Set the value of m without input validation
    #[inline(always)]
    pub fn set_m_unchecked(&mut self, m: f64) {
        self.m = m;
    }

    /// Get the v parameter
    #[inline]
    pub fn v(&self) -> f64 {
        self.v
    }

    /// Set the value of v
    ///
    /// ```rust
    /// # use nig::dist::NormalInvGamma;
    /// # let mut nig = NormalInvGamma::new(0.0, 1.2, 2.3, 3.4).unwrap();
    /// assert!(nig.set_v(2.1).is_ok());
    ///
    /// // must be greater than zero
    /// assert!(nig.set_v(0.0).is_err());
    /// assert!(nig.set_v(-1.0).is_err());
    ///
    /// assert!(nig.set_v(f64::INFINITY).is_err());
    /// assert!(nig.set_v(f64::NAN).is_err());
    /// ```
    #[inline]
    pub fn set_v(&mut self, v: f64) -> Result<(), NormalInvGammaError> {
        if !v.is_finite() {
            Err(NormalInvGammaError::VNotFinite { v })
        } else if v <= 0.0 {
            Err(NormalInvGammaError::VTooLow { v })
        } else {
            self.set_v_unchecked(v);
            Ok(())
        }
    }

    /// Set the value of v without input validation
    #[inline]
    pub fn set_v_unchecked(&mut self, v: f64) {
        self.v = v;
    }

    /// Get the a parameter
    #[inline]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Set the value of a
    ///
    /// ```rust
    /// # use nig::dist::NormalInvGamma;
    /// # let mut nig = NormalInvGamma::new(0.0, 1.2, 2.3, 3.4).unwrap();
    /// assert!(nig.set_a(2.1).is_ok());
    /// assert!(nig.set_a(0.0).is_err());
    /// assert!(nig.set_a(f64::NEG_INFINITY).is_err());
    /// ```
    #[inline]
    pub fn set_a(&mut self, a: f64) -> Result<(), NormalInvGammaError> {
        if !a.is_finite() {
            Err(NormalInvGammaError::ANotFinite { a })
        } else if a <= 0.0 {
            Err(NormalInvGammaError::ATooLow { a })
        } else {
            self.set_a_unchecked(a);
            Ok(())
        }
    }

    /// Set the value of a without input validation
    #[inline]
    pub fn set_a_unchecked(&mut self, a: f64) {
        self.a = a;
    }

    /// Get the b parameter
    #[inline]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Set the value of b
    ///
    /// ```rust
    /// # use nig::dist::NormalInvGamma;
    /// # let mut nig = NormalInvGamma::new(0.0, 1.2, 2.3, 3.4).unwrap();
    /// assert!(nig.set_b(2.1).is_ok());
    /// assert!(nig.set_b(-1.0).is_err());
    /// assert!(nig.set_b(f64::NAN).is_err());
    /// ```
    #[inline]
    pub fn set_b(&mut self, b: f64) -> Result<(), NormalInvGammaError> {
        if !b.is_finite() {
            Err(NormalInvGammaError::BNotFinite { b })
        } else if b <= 0.0 {
            Err(NormalInvGammaError::BTooLow { b })
        } else {
            self.set_b_unchecked(b);
            Ok(())
        }
    }

    /// Set the value of b without input validation
    #[inline(always)]
    pub fn set_b_unchecked(&mut self, b: f64) {
        self.b = b;
    }

    // log density without any checks on the point
    fn ln_f_unchecked(&self, x: f64, sigma2: f64) -> f64 {
        // N(x | m, σ²/v) InvGamma(σ² | a, b)
        let ln_z = self.a.mul_add(self.b.ln(), -self.a.ln_gamma().0)
            + 0.5_f64.mul_add(self.v.ln(), -HALF_LN_2PI);
        let dx = x - self.m;
        let kernel = (0.5 * self.v).mul_add(dx * dx, self.b) / sigma2;
        (self.a + 1.5).mul_add(-sigma2.ln(), ln_z) - kernel
    }

    /// Log joint density at the mean `x` and variance `sigma2`
    ///
    /// Points outside the support are a domain error rather than a
    /// meaningless number.
    ///
    /// ```
    /// use nig::dist::NormalInvGamma;
    ///
    /// let nig = NormalInvGamma::new(0.0, 1.0, 2.0, 1.0).unwrap();
    /// assert!(nig.ln_density(0.0, 0.5).unwrap().is_finite());
    /// assert!(nig.ln_density(0.0, 0.0).is_err());
    /// assert!(nig.ln_density(f64::NAN, 1.0).is_err());
    /// ```
    pub fn ln_density(
        &self,
        x: f64,
        sigma2: f64,
    ) -> Result<f64, NormalInvGammaError> {
        if !x.is_finite() || !sigma2.is_finite() {
            Err(NormalInvGammaError::PointNotFinite { x, sigma2 })
        } else if sigma2 <= 0.0 {
            Err(NormalInvGammaError::Sigma2TooLow { sigma2 })
        } else {
            Ok(self.ln_f_unchecked(x, sigma2))
        }
    }

    /// Joint density at the mean `x` and variance `sigma2`
    pub fn density(
        &self,
        x: f64,
        sigma2: f64,
    ) -> Result<f64, NormalInvGammaError> {
        self.ln_density(x, sigma2).map(f64::exp)
    }

    /// Marginal distribution of the mean, a location-scale Student's t with
    /// 2a degrees of freedom, location m, and scale sqrt(b / (a v)).
    pub fn mu_marginal(&self) -> LocScaleT {
        let scale = (self.b / (self.a * self.v)).sqrt();
        LocScaleT::new_unchecked(2.0 * self.a, self.m, scale)
    }

    /// Marginal distribution of the variance, InvGamma(a, b)
    pub fn sigma2_marginal(&self) -> InvGamma {
        InvGamma::new_unchecked(self.a, self.b)
    }

    /// Exact central interval of each marginal holding `coverage` of the
    /// probability mass.
    ///
    /// This is what [`NigSamples::interval`] converges to as the number of
    /// draws grows.
    pub fn marginal_interval(
        &self,
        coverage: f64,
    ) -> Result<NigInterval, IntervalError> {
        samples::check_coverage(coverage)?;
        Ok(NigInterval {
            mu: self.mu_marginal().interval(coverage),
            sigma2: self.sigma2_marginal().interval(coverage),
        })
    }

    /// Draw `n` i.i.d. `(x, σ²)` pairs as two parallel vectors.
    ///
    /// The variances are drawn as one batch; each mean is then drawn with
    /// the variance at the same index.
    ///
    /// ```
    /// use nig::dist::NormalInvGamma;
    /// use rand::SeedableRng;
    ///
    /// let mut rng = rand::rngs::SmallRng::seed_from_u64(1337);
    /// let nig = NormalInvGamma::new(0.0, 0.054, 1.12, 0.4).unwrap();
    ///
    /// let samples = nig.sample_batch(1_000, &mut rng).unwrap();
    /// assert_eq!(samples.len(), 1_000);
    /// assert!(samples.variances().iter().all(|&s2| s2 > 0.0));
    ///
    /// assert!(nig.sample_batch(0, &mut rng).is_err());
    /// ```
    pub fn sample_batch<R: Rng>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<NigSamples, NormalInvGammaError> {
        validate(self.m, self.v, self.a, self.b)?;
        if n == 0 {
            return Err(NormalInvGammaError::NoSamples);
        }

        log::debug!("drawing {n} samples from {self}");

        let gamma = self.sigma2_marginal().recip_sampler();
        let variances: Vec<f64> = (0..n)
            .map(|_| recip_draw(rng.sample(&gamma)))
            .collect();

        let means: Vec<f64> = variances
            .iter()
            .map(|&sigma2| self.draw_mu(sigma2, rng))
            .collect();

        Ok(NigSamples::from_parts_unchecked(means, variances))
    }

    /// Update the prior with the observations in `xs`.
    ///
    /// No data returns the prior unchanged.
    ///
    /// ```
    /// use nig::dist::NormalInvGamma;
    ///
    /// let prior = NormalInvGamma::new(0.0, 1.0, 1.0, 1.0).unwrap();
    /// assert_eq!(prior.posterior_from_data(&[]).unwrap(), prior);
    /// assert!(prior.posterior_from_data(&[1.0, f64::NAN]).is_err());
    /// ```
    pub fn posterior_from_data(
        &self,
        xs: &[f64],
    ) -> Result<Self, NormalInvGammaError> {
        if let Some(&x) = xs.iter().find(|x| !x.is_finite()) {
            return Err(NormalInvGammaError::DataNotFinite { x });
        }
        let stat = GaussianSuffStat::from(xs);
        let post = gaussian_prior::posterior_from_stat(self, &stat);
        validate(post.m, post.v, post.a, post.b)?;
        Ok(post)
    }

    // sqrt(σ²) / sqrt(v) stays finite for σ² up to f64::MAX
    #[inline]
    fn draw_mu<R: Rng>(&self, sigma2: f64, rng: &mut R) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        (sigma2.sqrt() / self.v.sqrt()).mul_add(z, self.m)
    }

    fn draw_pair<R: Rng>(&self, rng: &mut R) -> (f64, f64) {
        let sigma2 = self.sigma2_marginal().draw(rng);
        let x = self.draw_mu(sigma2, rng);
        (x, sigma2)
    }
}

impl From<&NormalInvGamma> for String {
    fn from(nig: &NormalInvGamma) -> String {
        format!(
            "Normal-Inverse-Gamma(m: {}, v: {}, a: {}, b: {})",
            nig.m, nig.v, nig.a, nig.b
        )
    }
}

impl_display!(NormalInvGamma);

impl HasDensity<(f64, f64)> for NormalInvGamma {
    fn ln_f(&self, x: &(f64, f64)) -> f64 {
        self.ln_f_unchecked(x.0, x.1)
    }
}

impl Support<(f64, f64)> for NormalInvGamma {
    fn supports(&self, x: &(f64, f64)) -> bool {
        x.0.is_finite() && x.1.is_finite() && x.1 > 0.0
    }
}

impl ContinuousDistr<(f64, f64)> for NormalInvGamma {}

impl Sampleable<(f64, f64)> for NormalInvGamma {
    fn draw<R: Rng>(&self, rng: &mut R) -> (f64, f64) {
        self.draw_pair(rng)
    }
}

impl HasDensity<Gaussian> for NormalInvGamma {
    fn ln_f(&self, x: &Gaussian) -> f64 {
        self.ln_f_unchecked(x.mu(), x.var())
    }
}

impl Sampleable<Gaussian> for NormalInvGamma {
    fn draw<R: Rng>(&self, rng: &mut R) -> Gaussian {
        let (mu, sigma2) = self.draw_pair(rng);
        Gaussian::new_unchecked(mu, sigma2.sqrt())
    }
}

impl std::error::Error for NormalInvGammaError {}

impl fmt::Display for NormalInvGammaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MNotFinite { m } => write!(f, "non-finite m: {m}"),
            Self::VNotFinite { v } => write!(f, "non-finite v: {v}"),
            Self::ANotFinite { a } => write!(f, "non-finite a: {a}"),
            Self::BNotFinite { b } => write!(f, "non-finite b: {b}"),
            Self::VTooLow { v } => {
                write!(f, "v ({v}) must be greater than zero")
            }
            Self::ATooLow { a } => {
                write!(f, "a ({a}) must be greater than zero")
            }
            Self::BTooLow { b } => {
                write!(f, "b ({b}) must be greater than zero")
            }
            Self::Sigma2TooLow { sigma2 } => {
                write!(f, "σ² ({sigma2}) must be greater than zero")
            }
            Self::PointNotFinite { x, sigma2 } => {
                write!(f, "non-finite point (x: {x}, σ²: {sigma2})")
            }
            Self::NoSamples => write!(f, "must request at least one sample"),
            Self::DataNotFinite { x } => {
                write!(f, "non-finite observation: {x}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_basic_impls;
    use proptest::prelude::*;

    const TOL: f64 = 1E-12;

    test_basic_impls!(NormalInvGamma::new(0.1, 1.2, 0.5, 1.8).unwrap());

    #[test]
    fn new_rejects_bad_params() {
        assert_eq!(
            NormalInvGamma::new(0.0, 0.0, 1.0, 1.0),
            Err(NormalInvGammaError::VTooLow { v: 0.0 })
        );
        assert_eq!(
            NormalInvGamma::new(0.0, 1.0, -1.0, 1.0),
            Err(NormalInvGammaError::ATooLow { a: -1.0 })
        );
        assert_eq!(
            NormalInvGamma::new(0.0, 1.0, 1.0, 0.0),
            Err(NormalInvGammaError::BTooLow { b: 0.0 })
        );
        assert!(NormalInvGamma::new(f64::NAN, 1.0, 1.0, 1.0).is_err());
        assert!(NormalInvGamma::new(0.0, f64::INFINITY, 1.0, 1.0).is_err());
    }

    // Product of the two factors, computed independently
    fn ln_f_ref(nig: &NormalInvGamma, x: f64, sigma2: f64) -> f64 {
        let (m, v, a, b) = nig.params();
        let normal = Gaussian::new(m, (sigma2 / v).sqrt()).unwrap();
        let ig = InvGamma::new(a, b).unwrap();
        normal.ln_f(&x) + ig.ln_f(&sigma2)
    }

    #[test]
    fn ln_f_is_product_of_normal_and_invgamma() {
        let nig = NormalInvGamma::new(0.3, 1.2, 2.3, 3.4).unwrap();
        let mut rng = crate::test::rng(10);
        for _ in 0..100 {
            let (x, sigma2): (f64, f64) = nig.draw(&mut rng);
            let ln_f = nig.ln_density(x, sigma2).unwrap();
            assert::close(ln_f, ln_f_ref(&nig, x, sigma2), 1e-10);
        }
    }

    #[test]
    fn gaussian_and_pair_densities_agree() {
        let nig = NormalInvGamma::new(-1.0, 0.5, 1.5, 2.0).unwrap();
        let gauss = Gaussian::new(0.4, 1.7).unwrap();
        let pair = (0.4, 1.7 * 1.7);
        assert::close(nig.ln_f(&gauss), nig.ln_f(&pair), TOL);
    }

    #[test]
    fn density_domain_errors() {
        let nig = NormalInvGamma::new(0.0, 1.0, 1.0, 1.0).unwrap();
        assert_eq!(
            nig.density(0.0, -1.0),
            Err(NormalInvGammaError::Sigma2TooLow { sigma2: -1.0 })
        );
        assert!(nig.density(f64::INFINITY, 1.0).is_err());
        assert!(nig.density(0.0, f64::INFINITY).is_err());
        assert_eq!(nig.ln_pdf(&(0.0, -1.0)), f64::NEG_INFINITY);
    }

    #[test]
    fn density_is_non_negative() {
        let nig = NormalInvGamma::new(0.0, 0.054, 1.12, 0.4).unwrap();
        for x in [-15.0, -3.0, 0.0, 7.0, 15.0] {
            for s2 in [1e-3, 0.1, 1.0, 10.0, 1e3] {
                assert!(nig.density(x, s2).unwrap() >= 0.0);
            }
        }
    }

    #[test]
    fn sample_batch_has_requested_size() {
        let mut rng = crate::test::rng(11);
        let nig = NormalInvGamma::new(0.0, 0.054, 1.12, 0.4).unwrap();
        let samples = nig.sample_batch(123, &mut rng).unwrap();
        assert_eq!(samples.len(), 123);
        assert_eq!(samples.means().len(), samples.variances().len());
    }

    #[test]
    fn sample_batch_rejects_zero() {
        let mut rng = crate::test::rng(12);
        let nig = NormalInvGamma::new(0.0, 1.0, 1.0, 1.0).unwrap();
        assert_eq!(
            nig.sample_batch(0, &mut rng),
            Err(NormalInvGammaError::NoSamples)
        );
    }

    #[test]
    fn sample_batch_rejects_unchecked_bad_params() {
        let mut rng = crate::test::rng(13);
        let nig = NormalInvGamma::new_unchecked(0.0, -1.0, 1.0, 1.0);
        assert_eq!(
            nig.sample_batch(10, &mut rng),
            Err(NormalInvGammaError::VTooLow { v: -1.0 })
        );
    }

    #[test]
    fn seeded_batches_are_reproducible() {
        let nig = NormalInvGamma::new(0.0, 0.054, 1.12, 0.4).unwrap();
        let s1 = nig.sample_batch(50, &mut crate::test::rng(99)).unwrap();
        let s2 = nig.sample_batch(50, &mut crate::test::rng(99)).unwrap();
        assert_eq!(s1, s2);
    }

    #[test]
    fn batch_moments_match_closed_form() {
        // a > 2 so the variance of σ² exists
        let nig = NormalInvGamma::new(1.5, 2.0, 4.0, 3.0).unwrap();
        let mut rng = crate::test::rng(14);
        let samples = nig.sample_batch(200_000, &mut rng).unwrap();
        let n = samples.len() as f64;

        let mean_x = samples.means().iter().sum::<f64>() / n;
        let mean_s2 = samples.variances().iter().sum::<f64>() / n;

        // E[x] = m, E[σ²] = b / (a - 1)
        assert::close(mean_x, 1.5, 0.01);
        assert::close(mean_s2, 1.0, 0.01);
    }

    #[test]
    fn gaussian_draws_carry_sigma() {
        let nig = NormalInvGamma::new(0.0, 1.0, 3.0, 2.0).unwrap();
        let mut rng = crate::test::rng(15);
        let gs: Vec<Gaussian> = nig.sample(100, &mut rng);
        assert!(gs.iter().all(|g| g.sigma() > 0.0 && g.mu().is_finite()));
    }

    #[test]
    fn marginals() {
        let nig = NormalInvGamma::new(0.0, 0.054, 1.12, 0.4).unwrap();
        let t = nig.mu_marginal();
        assert::close(t.v(), 2.24, TOL);
        assert::close(t.loc(), 0.0, TOL);
        assert::close(t.scale(), (0.4 / (1.12 * 0.054_f64)).sqrt(), TOL);
        assert_eq!(nig.sigma2_marginal(), InvGamma::new(1.12, 0.4).unwrap());
    }

    #[test]
    fn marginal_interval_of_worked_example() {
        let nig = NormalInvGamma::new(0.0, 0.054, 1.12, 0.4).unwrap();
        let interval = nig.marginal_interval(0.95).unwrap();
        assert::close(interval.mu.0, -10.003_276_807_066_17, 1e-7);
        assert::close(interval.mu.1, 10.003_276_807_066_17, 1e-7);
        assert::close(interval.sigma2.0, 0.101_607_604_168_315_2, 1e-9);
        assert::close(interval.sigma2.1, 10.067_603_074_593_53, 1e-7);
    }

    #[test]
    fn marginal_interval_rejects_bad_coverage() {
        let nig = NormalInvGamma::new(0.0, 1.0, 1.0, 1.0).unwrap();
        assert!(nig.marginal_interval(0.0).is_err());
        assert!(nig.marginal_interval(1.0).is_err());
    }

    #[test]
    fn marginal_interval_with_subnormal_b() {
        let nig = NormalInvGamma::new(0.0, 1.0, 1.0, 1e-310).unwrap();
        let interval = nig.marginal_interval(0.95).unwrap();

        let (lo, hi) = interval.sigma2;
        assert!(0.0 < lo && lo < hi && hi < 1e-300, "({lo}, {hi})");
        assert::close(lo, -1e-310 / 0.025_f64.ln(), 1e-8 * lo);
        assert::close(hi, -1e-310 / 0.975_f64.ln(), 1e-8 * hi);

        let (lo, hi) = interval.mu;
        assert!(lo < 0.0 && 0.0 < hi && hi < 1e-150, "({lo}, {hi})");
    }

    #[test]
    fn marginal_interval_with_small_a() {
        let nig = NormalInvGamma::new(0.0, 1.0, 0.01, 1.0).unwrap();
        let interval = nig.marginal_interval(0.95).unwrap();
        assert!(interval.mu.0 < 0.0 && 0.0 < interval.mu.1);
        assert!(interval.sigma2.0 > 0.0);
        assert!(interval.sigma2.1.is_finite());
    }

    #[test]
    fn small_shape_draws_stay_in_support() {
        // at a = 0.01 roughly one gamma draw in a thousand underflows
        let nig = NormalInvGamma::new(0.0, 1.0, 0.01, 1.0).unwrap();
        let mut rng = crate::test::rng(16);

        let samples = nig.sample_batch(100_000, &mut rng).unwrap();
        assert!(samples.iter().all(|pair| nig.supports(&pair)));

        let pairs: Vec<(f64, f64)> = nig.sample(20_000, &mut rng);
        assert!(pairs.iter().all(|pair| nig.supports(pair)));

        let gs: Vec<Gaussian> = nig.sample(20_000, &mut rng);
        assert!(gs.iter().all(|g| g.mu().is_finite() && g.var() > 0.0));
    }

    proptest! {
        #[test]
        fn draws_are_in_support(
            m in -10.0_f64..10.0,
            v in 1e-3_f64..100.0,
            a in 1e-2_f64..50.0,
            b in 1e-3_f64..100.0,
            seed in any::<u64>(),
        ) {
            let nig = NormalInvGamma::new(m, v, a, b).unwrap();
            let mut rng = crate::test::rng(seed);
            let samples = nig.sample_batch(2_000, &mut rng).unwrap();
            for (x, sigma2) in samples.iter() {
                prop_assert!(sigma2 > 0.0 && sigma2.is_finite());
                prop_assert!(x.is_finite());
                prop_assert!(nig.supports(&(x, sigma2)));
            }
        }

        #[test]
        fn density_matches_factorization(
            x in -20.0_f64..20.0,
            sigma2 in 1e-2_f64..50.0,
            v in 1e-2_f64..10.0,
            a in 0.1_f64..10.0,
            b in 0.1_f64..10.0,
        ) {
            let nig = NormalInvGamma::new(0.5, v, a, b).unwrap();
            let ln_f = nig.ln_density(x, sigma2).unwrap();
            let reference = ln_f_ref(&nig, x, sigma2);
            let tol = 1e-8 * reference.abs().max(1.0);
            prop_assert!((ln_f - reference).abs() < tol);
        }
    }
}
