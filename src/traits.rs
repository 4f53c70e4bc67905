//! Trait definitions
pub use crate::data::DataOrSuffStat;
use rand::Rng;

/// Convert a distribution to and from a plain parameter struct
pub trait Parameterized: Sized {
    type Parameters;

    fn emit_params(&self) -> Self::Parameters;

    fn from_params(params: Self::Parameters) -> Self;

    fn map_params(
        &self,
        f: impl Fn(Self::Parameters) -> Self::Parameters,
    ) -> Self {
        let params = self.emit_params();
        let new_params = f(params);
        Self::from_params(new_params)
    }
}

/// Evaluate the density of a distribution at `x`
pub trait HasDensity<X> {
    /// Probability function
    ///
    /// # Example
    ///
    /// ```
    /// use nig::dist::Gaussian;
    /// use nig::traits::HasDensity;
    ///
    /// let g = Gaussian::standard();
    /// assert!(g.f(&0.0_f64) > g.f(&0.1_f64));
    /// assert!(g.f(&0.0_f64) > g.f(&-0.1_f64));
    /// ```
    fn f(&self, x: &X) -> f64 {
        self.ln_f(x).exp()
    }

    /// Log of the probability function
    fn ln_f(&self, x: &X) -> f64;
}

/// Draw random values from a distribution
pub trait Sampleable<X> {
    /// Single draw from the distribution
    fn draw<R: Rng>(&self, rng: &mut R) -> X;

    /// Multiple draws
    ///
    /// # Example
    ///
    /// ```
    /// use nig::dist::InvGamma;
    /// use nig::traits::Sampleable;
    ///
    /// let mut rng = rand::thread_rng();
    /// let ig = InvGamma::new(2.0, 1.5).unwrap();
    ///
    /// let xs: Vec<f64> = ig.sample(22, &mut rng);
    /// assert_eq!(xs.len(), 22);
    /// ```
    fn sample<R: Rng>(&self, n: usize, mut rng: &mut R) -> Vec<X> {
        (0..n).map(|_| self.draw(&mut rng)).collect()
    }

    /// An infinite iterator of draws
    fn sample_stream<'r, R: Rng>(
        &'r self,
        rng: &'r mut R,
    ) -> Box<dyn Iterator<Item = X> + 'r>
    where
        X: 'r,
    {
        Box::new(std::iter::repeat_with(move || self.draw(rng)))
    }
}

/// Identifies the support of a distribution
pub trait Support<X> {
    /// Returns `true` if `x` is in the support
    fn supports(&self, x: &X) -> bool;
}

/// A continuous probability distribution
pub trait ContinuousDistr<X>: HasDensity<X> + Support<X> {
    /// The value of the Probability Density Function (PDF) at `x`
    fn pdf(&self, x: &X) -> f64 {
        self.ln_pdf(x).exp()
    }

    /// The log PDF at `x`. Points outside the support have zero density.
    fn ln_pdf(&self, x: &X) -> f64 {
        if self.supports(x) {
            self.ln_f(x)
        } else {
            f64::NEG_INFINITY
        }
    }
}

/// Cumulative distribution function
pub trait Cdf<X>: HasDensity<X> {
    /// The value of the Cumulative Density Function at `x`
    fn cdf(&self, x: &X) -> f64;

    /// Survival function, `1 - CDF(x)`
    fn sf(&self, x: &X) -> f64 {
        1.0 - self.cdf(x)
    }
}

/// Inverse of the cumulative distribution function
pub trait InverseCdf<X>: HasDensity<X> {
    /// The value of `x` at the given probability in the CDF
    fn invcdf(&self, p: f64) -> X;

    /// Alias for `invcdf`
    fn quantile(&self, p: f64) -> X {
        self.invcdf(p)
    }

    /// Central interval containing `p` of the probability mass
    fn interval(&self, p: f64) -> (X, X) {
        let pt = (1.0 - p) / 2.0;
        (self.quantile(pt), self.quantile(p + pt))
    }
}

pub trait Mean<X> {
    /// Returns `None` if the mean is undefined
    fn mean(&self) -> Option<X>;
}

pub trait Mode<X> {
    /// Returns `None` if the mode is undefined or not unique
    fn mode(&self) -> Option<X>;
}

pub trait Variance<X> {
    /// Returns `None` if the variance is undefined
    fn variance(&self) -> Option<X>;
}

/// Is a [sufficient statistic][wiki] for a distribution.
///
/// # Example
///
/// ```
/// use nig::data::GaussianSuffStat;
/// use nig::traits::SuffStat;
///
/// let mut stat = GaussianSuffStat::new();
/// stat.observe_many(&[1.0_f64, 2.0, 3.0]);
/// assert_eq!(stat.n(), 3);
///
/// stat.forget(&3.0_f64);
/// assert_eq!(stat.n(), 2);
/// assert!((stat.mean() - 1.5).abs() < 1e-14);
/// ```
///
/// [wiki]: https://en.wikipedia.org/wiki/Sufficient_statistic
pub trait SuffStat<X> {
    /// Returns the number of observations
    fn n(&self) -> usize;

    /// Assimilate the datum `x` into the statistic
    fn observe(&mut self, x: &X);

    /// Remove the datum `x` from the statistic
    fn forget(&mut self, x: &X);

    /// Assimilate several observations
    fn observe_many(&mut self, xs: &[X]) {
        xs.iter().for_each(|x| self.observe(x));
    }

    /// Forget several observations
    fn forget_many(&mut self, xs: &[X]) {
        xs.iter().for_each(|x| self.forget(x));
    }
}

/// The data for this distribution can be summarized by a statistic
pub trait HasSuffStat<X> {
    type Stat: SuffStat<X>;

    fn empty_suffstat(&self) -> Self::Stat;

    /// Return the log likelihood for the data represented by the sufficient
    /// statistic.
    fn ln_f_stat(&self, stat: &Self::Stat) -> f64;
}

/// A prior on `Fx` that induces a posterior of the same form as the prior
///
/// # Example
///
/// ```
/// use nig::prelude::*;
///
/// let prior = NormalInvGamma::new(0.0, 1.0, 2.0, 2.0).unwrap();
/// let xs: Vec<f64> = vec![-0.4, 0.1, 0.7];
/// let data: GaussianData<f64> = DataOrSuffStat::Data(&xs);
///
/// let post = prior.posterior(&data);
/// assert_eq!(post.v(), 4.0);
///
/// // more data means a more concentrated predictive
/// let pp_none = prior.pp(&0.1, &DataOrSuffStat::None);
/// let pp_data = prior.pp(&0.1, &data);
/// assert!(pp_data > pp_none);
/// ```
pub trait ConjugatePrior<X, Fx>: Sampleable<Fx>
where
    Fx: HasDensity<X> + HasSuffStat<X>,
{
    /// Type of the posterior distribution
    type Posterior: Sampleable<Fx>;
    /// Type of the cache for the marginal likelihood
    type LnMCache;
    /// Type of the cache for the posterior predictive
    type LnPpCache;

    /// Computes the posterior distribution from the data
    fn posterior(&self, x: &DataOrSuffStat<X, Fx>) -> Self::Posterior;

    /// Compute the cache for the log marginal likelihood.
    fn ln_m_cache(&self) -> Self::LnMCache;

    /// Log marginal likelihood with supplied cache.
    fn ln_m_with_cache(
        &self,
        cache: &Self::LnMCache,
        x: &DataOrSuffStat<X, Fx>,
    ) -> f64;

    /// The log marginal likelihood
    fn ln_m(&self, x: &DataOrSuffStat<X, Fx>) -> f64 {
        let cache = self.ln_m_cache();
        self.ln_m_with_cache(&cache, x)
    }

    /// Compute the cache for the log posterior predictive of y given x.
    fn ln_pp_cache(&self, x: &DataOrSuffStat<X, Fx>) -> Self::LnPpCache;

    /// Log posterior predictive of y given x with supplied ln(norm)
    fn ln_pp_with_cache(&self, cache: &Self::LnPpCache, y: &X) -> f64;

    /// Log posterior predictive of y given x
    fn ln_pp(&self, y: &X, x: &DataOrSuffStat<X, Fx>) -> f64 {
        let cache = self.ln_pp_cache(x);
        self.ln_pp_with_cache(&cache, y)
    }

    /// Marginal likelihood of x
    fn m(&self, x: &DataOrSuffStat<X, Fx>) -> f64 {
        self.ln_m(x).exp()
    }

    /// Posterior predictive of y given x
    fn pp(&self, y: &X, x: &DataOrSuffStat<X, Fx>) -> f64 {
        self.ln_pp(y, x).exp()
    }
}
