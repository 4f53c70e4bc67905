//! Inverse Gamma distribution over x in (0, ∞)
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use rand::Rng;
use special::Gamma as _;
use std::fmt;

use crate::impl_display;
use crate::misc::bisection;
use crate::traits::{
    Cdf, ContinuousDistr, HasDensity, InverseCdf, Mean, Mode, Parameterized,
    Sampleable, Support, Variance,
};

/// [Inverse gamma distribution][wiki] IG(α, β) over x in (0, ∞).
///
/// [wiki]: https://en.wikipedia.org/wiki/Inverse-gamma_distribution
///
/// ```math
///             β^α
/// f(x|α, β) = ----  x^(-α-1) e^(-β/x)
///             Γ(α)
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct InvGamma {
    // shape parameter, α
    shape: f64,
    // scale parameter, β
    scale: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct InvGammaParameters {
    pub shape: f64,
    pub scale: f64,
}

impl Parameterized for InvGamma {
    type Parameters = InvGammaParameters;

    fn emit_params(&self) -> Self::Parameters {
        Self::Parameters {
            shape: self.shape(),
            scale: self.scale(),
        }
    }

    fn from_params(params: Self::Parameters) -> Self {
        Self::new_unchecked(params.shape, params.scale)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum InvGammaError {
    /// Shape parameter is less than or equal to zero
    ShapeTooLow { shape: f64 },
    /// Shape parameter is infinite or NaN
    ShapeNotFinite { shape: f64 },
    /// Scale parameter is less than or equal to zero
    ScaleTooLow { scale: f64 },
    /// Scale parameter is infinite or NaN
    ScaleNotFinite { scale: f64 },
}

impl InvGamma {
    /// Create a new `InvGamma` distribution with shape (α) and scale (β).
    pub fn new(shape: f64, scale: f64) -> Result<Self, InvGammaError> {
        if shape <= 0.0 {
            Err(InvGammaError::ShapeTooLow { shape })
        } else if scale <= 0.0 {
            Err(InvGammaError::ScaleTooLow { scale })
        } else if !shape.is_finite() {
            Err(InvGammaError::ShapeNotFinite { shape })
        } else if !scale.is_finite() {
            Err(InvGammaError::ScaleNotFinite { scale })
        } else {
            Ok(InvGamma { shape, scale })
        }
    }

    /// Creates a new InvGamma without checking whether the parameters are
    /// valid.
    #[inline]
    pub fn new_unchecked(shape: f64, scale: f64) -> Self {
        InvGamma { shape, scale }
    }

    /// Get the shape parameter
    #[inline]
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Get the scale parameter
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The gamma distribution whose reciprocal this is.
    ///
    /// `rand_distr` takes a gamma *scale*, which is the reciprocal of our β.
    #[inline]
    pub(crate) fn recip_sampler(&self) -> rand_distr::Gamma<f64> {
        // shape > 0 and the reciprocal of a finite, positive scale is
        // positive, so this only fails for an unchecked InvGamma
        rand_distr::Gamma::new(self.shape, self.scale.recip())
            .expect("invalid InvGamma parameters")
    }

    // CDF of IG(α, 1) at y. The quantile of IG(α, β) is β times the
    // quantile of IG(α, 1).
    #[inline]
    fn standard_cdf(&self, y: f64) -> f64 {
        if y <= 0.0 {
            0.0
        } else {
            // upper regularized incomplete gamma, Q(α, 1/y)
            1.0 - y.recip().inc_gamma(self.shape)
        }
    }
}

/// Map a gamma draw `g` to a draw from the inverse gamma, `1/g`, kept inside
/// (0, ∞).
///
/// For small shapes a gamma draw can underflow to zero, and a huge one can
/// have a reciprocal that rounds to zero. Both are clamped to the nearest
/// representable point of the support.
#[inline]
pub(crate) fn recip_draw(g: f64) -> f64 {
    let x = g.recip();
    if x == f64::INFINITY {
        log::trace!("inverse gamma draw overflowed (gamma draw {g})");
        f64::MAX
    } else if x <= 0.0 {
        log::trace!("inverse gamma draw underflowed (gamma draw {g})");
        f64::MIN_POSITIVE
    } else {
        x
    }
}

impl From<&InvGamma> for String {
    fn from(ig: &InvGamma) -> String {
        format!("IG(α: {}, β: {})", ig.shape, ig.scale)
    }
}

impl_display!(InvGamma);

impl HasDensity<f64> for InvGamma {
    fn ln_f(&self, x: &f64) -> f64 {
        // β^α / Γ(α) x^(-α-1) e^(-β/x)
        let z = self.shape.mul_add(self.scale.ln(), -self.shape.ln_gamma().0);
        (self.shape + 1.0).mul_add(-x.ln(), z) - self.scale / x
    }
}

impl Sampleable<f64> for InvGamma {
    fn draw<R: Rng>(&self, rng: &mut R) -> f64 {
        recip_draw(rng.sample(self.recip_sampler()))
    }

    fn sample<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        rng.sample_iter(self.recip_sampler())
            .take(n)
            .map(recip_draw)
            .collect()
    }
}

impl Support<f64> for InvGamma {
    fn supports(&self, x: &f64) -> bool {
        x.is_finite() && *x > 0.0
    }
}

impl ContinuousDistr<f64> for InvGamma {}

impl Cdf<f64> for InvGamma {
    fn cdf(&self, x: &f64) -> f64 {
        self.standard_cdf(x / self.scale)
    }
}

impl InverseCdf<f64> for InvGamma {
    fn invcdf(&self, p: f64) -> f64 {
        assert!((0.0..=1.0).contains(&p), "P out of range");
        if p == 0.0 {
            return 0.0;
        } else if p == 1.0 {
            return f64::INFINITY;
        }

        // Solve on the unit scale so the bracket does not depend on β.
        // Grow it from the mode of IG(α, 1) until it holds the quantile.
        let mode = (self.shape + 1.0).recip();
        let mut lower = mode;
        while self.standard_cdf(lower) > p {
            if lower < f64::MIN_POSITIVE {
                return 0.0;
            }
            lower /= 2.0;
        }
        let mut upper = mode;
        while self.standard_cdf(upper) < p {
            if upper > f64::MAX / 2.0 {
                return f64::INFINITY;
            }
            upper *= 2.0;
        }

        // cdf(lower) <= p <= cdf(upper), so the root is bracketed
        let y = bisection(
            |y| self.standard_cdf(y) - p,
            lower,
            upper,
            1e-13,
            2_000,
        )
        .expect("the InvGamma quantile is bracketed");
        y * self.scale
    }
}

impl Mean<f64> for InvGamma {
    fn mean(&self) -> Option<f64> {
        if self.shape > 1.0 {
            Some(self.scale / (self.shape - 1.0))
        } else {
            None
        }
    }
}

impl Mode<f64> for InvGamma {
    fn mode(&self) -> Option<f64> {
        Some(self.scale / (self.shape + 1.0))
    }
}

impl Variance<f64> for InvGamma {
    fn variance(&self) -> Option<f64> {
        if self.shape > 2.0 {
            let numer = self.scale * self.scale;
            let denom = (self.shape - 1.0).powi(2) * (self.shape - 2.0);
            Some(numer / denom)
        } else {
            None
        }
    }
}

impl std::error::Error for InvGammaError {}

impl fmt::Display for InvGammaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeTooLow { shape } => {
                write!(f, "shape ({shape}) must be greater than zero")
            }
            Self::ShapeNotFinite { shape } => {
                write!(f, "non-finite shape: {shape}")
            }
            Self::ScaleTooLow { scale } => {
                write!(f, "scale ({scale}) must be greater than zero")
            }
            Self::ScaleNotFinite { scale } => {
                write!(f, "non-finite scale: {scale}")
            }
        }
    }
}
