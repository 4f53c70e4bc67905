//! Probability distributions
//!
//! [`NormalInvGamma`] is the main model. The others are its marginals and
//! the likelihood it is conjugate to.
pub mod gaussian;
pub mod invgamma;
pub mod normal_inv_gamma;
pub mod students_t;

pub use self::gaussian::{Gaussian, GaussianError, GaussianParameters};
pub use self::invgamma::{InvGamma, InvGammaError, InvGammaParameters};
pub use self::normal_inv_gamma::{
    empirical_interval, IntervalError, NigInterval, NigSamples,
    NigSamplesError, NigSamplesParts, NormalInvGamma, NormalInvGammaError,
    NormalInvGammaParameters,
};
pub use self::students_t::{LocScaleT, LocScaleTError, LocScaleTParameters};
