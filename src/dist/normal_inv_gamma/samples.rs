//! Batches of NIG draws and their Monte Carlo intervals
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use std::fmt;

use crate::misc::{percentiles, PercentileError};

/// Errors from estimating an interval
#[derive(Debug, Clone, PartialEq)]
pub enum IntervalError {
    /// The coverage must be in (0, 1)
    CoverageOutOfRange { coverage: f64 },
    /// The percentiles could not be computed
    Percentile(PercentileError),
}

impl From<PercentileError> for IntervalError {
    fn from(err: PercentileError) -> Self {
        IntervalError::Percentile(err)
    }
}

impl std::error::Error for IntervalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Percentile(err) => Some(err),
            Self::CoverageOutOfRange { .. } => None,
        }
    }
}

impl fmt::Display for IntervalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoverageOutOfRange { coverage } => {
                write!(f, "coverage ({coverage}) must be in (0, 1)")
            }
            Self::Percentile(err) => write!(f, "percentile error: {err}"),
        }
    }
}

#[inline]
pub(crate) fn check_coverage(coverage: f64) -> Result<(), IntervalError> {
    if coverage > 0.0 && coverage < 1.0 {
        Ok(())
    } else {
        Err(IntervalError::CoverageOutOfRange { coverage })
    }
}

/// Empirical two-sided interval of `xs` covering `coverage` of the values.
///
/// The bounds are the 100(1 - c)/2 and 100(1 + c)/2 percentiles, e.g. the
/// 2.5th and 97.5th for c = 0.95.
///
/// ```
/// use nig::dist::empirical_interval;
///
/// let xs: Vec<f64> = (0..=100).map(f64::from).collect();
/// let (lo, hi) = empirical_interval(&xs, 0.9).unwrap();
/// assert!((lo - 5.0).abs() < 1e-12);
/// assert!((hi - 95.0).abs() < 1e-12);
/// ```
pub fn empirical_interval(
    xs: &[f64],
    coverage: f64,
) -> Result<(f64, f64), IntervalError> {
    check_coverage(coverage)?;
    let tail = 50.0 * (1.0 - coverage);
    let qs = percentiles(xs, &[tail, 100.0 - tail])?;
    Ok((qs[0], qs[1]))
}

/// Central intervals for the mean and variance components
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct NigInterval {
    /// (lower, upper) bounds on the mean, x
    pub mu: (f64, f64),
    /// (lower, upper) bounds on the variance, σ²
    pub sigma2: (f64, f64),
}

/// Error from building a [`NigSamples`] out of parallel vectors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NigSamplesError {
    /// The two vectors must have one entry per draw
    LengthMismatch { n_means: usize, n_variances: usize },
}

impl std::error::Error for NigSamplesError {}

impl fmt::Display for NigSamplesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                n_means,
                n_variances,
            } => write!(
                f,
                "{n_means} means and {n_variances} variances; the lengths \
                must match"
            ),
        }
    }
}

/// A batch of `(x, σ²)` draws stored as two parallel vectors in draw order
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(try_from = "NigSamplesParts"))]
#[cfg_attr(feature = "serde1", serde(into = "NigSamplesParts"))]
pub struct NigSamples {
    means: Vec<f64>,
    variances: Vec<f64>,
}

/// The unchecked parallel vectors of a [`NigSamples`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct NigSamplesParts {
    pub means: Vec<f64>,
    pub variances: Vec<f64>,
}

impl TryFrom<NigSamplesParts> for NigSamples {
    type Error = NigSamplesError;

    fn try_from(parts: NigSamplesParts) -> Result<Self, Self::Error> {
        NigSamples::from_parts(parts.means, parts.variances)
    }
}

impl From<NigSamples> for NigSamplesParts {
    fn from(samples: NigSamples) -> Self {
        NigSamplesParts {
            means: samples.means,
            variances: samples.variances,
        }
    }
}

impl NigSamples {
    /// Build from parallel vectors
    ///
    /// # Example
    ///
    /// ```
    /// # use nig::dist::{NigSamples, NigSamplesError};
    /// let samples = NigSamples::from_parts(vec![0.0], vec![1.0]).unwrap();
    /// assert_eq!(samples.len(), 1);
    ///
    /// let err = NigSamples::from_parts(vec![0.0, 1.0], vec![1.0]);
    /// assert_eq!(
    ///     err,
    ///     Err(NigSamplesError::LengthMismatch {
    ///         n_means: 2,
    ///         n_variances: 1
    ///     })
    /// );
    /// ```
    pub fn from_parts(
        means: Vec<f64>,
        variances: Vec<f64>,
    ) -> Result<Self, NigSamplesError> {
        if means.len() == variances.len() {
            Ok(NigSamples { means, variances })
        } else {
            Err(NigSamplesError::LengthMismatch {
                n_means: means.len(),
                n_variances: variances.len(),
            })
        }
    }

    #[inline]
    pub(crate) fn from_parts_unchecked(
        means: Vec<f64>,
        variances: Vec<f64>,
    ) -> Self {
        NigSamples { means, variances }
    }

    /// Number of draws
    #[inline]
    pub fn len(&self) -> usize {
        self.means.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// The mean component of every draw
    #[inline]
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// The variance component of every draw
    #[inline]
    pub fn variances(&self) -> &[f64] {
        &self.variances
    }

    /// Iterate over `(x, σ²)` pairs in draw order
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.means.iter().copied().zip(self.variances.iter().copied())
    }

    /// Returns `(means, variances)`
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.means, self.variances)
    }

    /// Monte Carlo estimate of the central interval of each component.
    ///
    /// The percentiles of the means and of the variances are taken
    /// independently.
    pub fn interval(
        &self,
        coverage: f64,
    ) -> Result<NigInterval, IntervalError> {
        Ok(NigInterval {
            mu: empirical_interval(&self.means, coverage)?,
            sigma2: empirical_interval(&self.variances, coverage)?,
        })
    }
}

impl FromIterator<(f64, f64)> for NigSamples {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let (means, variances) = iter.into_iter().unzip();
        NigSamples { means, variances }
    }
}
