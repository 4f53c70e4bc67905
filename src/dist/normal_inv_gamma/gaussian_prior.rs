use special::Gamma as _;

use crate::consts::HALF_LN_2PI;
use crate::data::{
    extract_stat, extract_stat_then, DataOrSuffStat, GaussianSuffStat,
};
use crate::dist::{Gaussian, NormalInvGamma};
use crate::traits::*;

// Log normalizer, ln Γ(a) - a ln b - ½ ln v
#[inline]
fn ln_z(v: f64, a: f64, b: f64) -> f64 {
    let p1 = v.ln().mul_add(-0.5, a.ln_gamma().0);
    b.ln().mul_add(-a, p1)
}

#[allow(clippy::many_single_char_names)]
pub(super) fn posterior_from_stat(
    nig: &NormalInvGamma,
    stat: &GaussianSuffStat,
) -> NormalInvGamma {
    if stat.n() == 0 {
        return nig.clone();
    }

    let n = stat.n() as f64;
    let xbar = stat.mean();
    let (m, v, a, b) = nig.params();

    let vn = v + n;
    let mn = v.mul_add(m, n * xbar) / vn;
    let an = n.mul_add(0.5, a);

    let dm = xbar - m;
    let shrink = n * v * dm * dm / (2.0 * vn);
    let bn = stat.sum_sq_dev().mul_add(0.5, b) + shrink;

    log::debug!(
        "posterior from {} observations: ({mn}, {vn}, {an}, {bn})",
        stat.n()
    );

    NormalInvGamma::new_unchecked(mn, vn, an, bn)
}

impl ConjugatePrior<f64, Gaussian> for NormalInvGamma {
    type Posterior = Self;
    type LnMCache = f64;
    type LnPpCache = (GaussianSuffStat, f64);

    fn posterior(&self, x: &DataOrSuffStat<f64, Gaussian>) -> Self {
        extract_stat_then(x, GaussianSuffStat::new, |stat: GaussianSuffStat| {
            posterior_from_stat(self, &stat)
        })
    }

    #[inline]
    fn ln_m_cache(&self) -> Self::LnMCache {
        let (_, v, a, b) = self.params();
        ln_z(v, a, b)
    }

    fn ln_m_with_cache(
        &self,
        cache: &Self::LnMCache,
        x: &DataOrSuffStat<f64, Gaussian>,
    ) -> f64 {
        extract_stat_then(x, GaussianSuffStat::new, |stat: GaussianSuffStat| {
            let post = posterior_from_stat(self, &stat);
            let n = stat.n() as f64;
            let (_, vn, an, bn) = post.params();
            // n/2 ln 2π
            n.mul_add(-HALF_LN_2PI, ln_z(vn, an, bn) - cache)
        })
    }

    #[inline]
    fn ln_pp_cache(
        &self,
        x: &DataOrSuffStat<f64, Gaussian>,
    ) -> Self::LnPpCache {
        let stat = extract_stat(x, GaussianSuffStat::new);
        let (_, vn, an, bn) = posterior_from_stat(self, &stat).params();
        (stat, ln_z(vn, an, bn))
    }

    fn ln_pp_with_cache(&self, cache: &Self::LnPpCache, y: &f64) -> f64 {
        let mut stat = cache.0.clone();
        let lnz_n = cache.1;

        stat.observe(y);
        let (_, vm, am, bm) = posterior_from_stat(self, &stat).params();

        -HALF_LN_2PI + ln_z(vm, am, bm) - lnz_n
    }
}
