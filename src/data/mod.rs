//! Data utilities
mod stat;

pub use stat::GaussianSuffStat;

use crate::traits::{HasSuffStat, SuffStat};

/// Holds either a sufficient statistic or a slice of data.
#[derive(Debug, Clone)]
pub enum DataOrSuffStat<'a, X, Fx>
where
    X: 'a,
    Fx: 'a + HasSuffStat<X>,
{
    /// A slice of raw data
    Data(&'a [X]),
    /// A sufficient statistic
    SuffStat(&'a Fx::Stat),
    /// No data
    None,
}

impl<'a, X, Fx> DataOrSuffStat<'a, X, Fx>
where
    X: 'a,
    Fx: 'a + HasSuffStat<X>,
{
    /// Get the number of observations
    ///
    /// # Example
    ///
    /// ```
    /// use nig::prelude::*;
    ///
    /// let xs: Vec<f64> = vec![0.1, 0.2, 0.3];
    /// let data: GaussianData<f64> = DataOrSuffStat::Data(&xs);
    /// assert_eq!(data.n(), 3);
    ///
    /// let none: GaussianData<f64> = DataOrSuffStat::None;
    /// assert_eq!(none.n(), 0);
    /// ```
    pub fn n(&self) -> usize {
        match &self {
            DataOrSuffStat::Data(data) => data.len(),
            DataOrSuffStat::SuffStat(s) => s.n(),
            DataOrSuffStat::None => 0,
        }
    }

    /// Returns `true` if there are no observations
    pub fn is_empty(&self) -> bool {
        self.n() == 0
    }
}

/// Convert a `DataOrSuffStat` into a `Stat`
///
/// `f_none` builds the empty statistic used for `Data` and `None`.
#[inline]
pub fn extract_stat<X, Fx, Fnx>(
    x: &DataOrSuffStat<X, Fx>,
    f_none: Fnx,
) -> Fx::Stat
where
    Fx: HasSuffStat<X>,
    Fx::Stat: Clone,
    Fnx: Fn() -> Fx::Stat,
{
    match x {
        DataOrSuffStat::SuffStat(s) => (*s).clone(),
        DataOrSuffStat::Data(xs) => {
            let mut stat = f_none();
            stat.observe_many(xs);
            stat
        }
        DataOrSuffStat::None => f_none(),
    }
}

/// Convert a `DataOrSuffStat` into a `Stat` then do something with it
#[inline]
pub fn extract_stat_then<X, Fx, Fnx, Fny, Y>(
    x: &DataOrSuffStat<X, Fx>,
    f_none: Fnx,
    f_op: Fny,
) -> Y
where
    Fx: HasSuffStat<X>,
    Fx::Stat: Clone,
    Fnx: Fn() -> Fx::Stat,
    Fny: Fn(Fx::Stat) -> Y,
{
    f_op(extract_stat(x, f_none))
}
