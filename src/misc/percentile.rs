use std::fmt;

/// Errors from computing empirical percentiles
#[derive(Debug, Clone, PartialEq)]
pub enum PercentileError {
    /// There were no values to take a percentile of
    EmptyData,
    /// One of the values was NaN, so there is no ordering
    NanInData,
    /// The requested percentile is not in [0, 100]
    OutOfRange { p: f64 },
}

impl std::error::Error for PercentileError {}

impl fmt::Display for PercentileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyData => write!(f, "cannot take percentile of no data"),
            Self::NanInData => write!(f, "data contain NaN"),
            Self::OutOfRange { p } => {
                write!(f, "percentile ({p}) must be in [0, 100]")
            }
        }
    }
}

fn sorted(xs: &[f64]) -> Result<Vec<f64>, PercentileError> {
    if xs.is_empty() {
        return Err(PercentileError::EmptyData);
    }
    if xs.iter().any(|x| x.is_nan()) {
        return Err(PercentileError::NanInData);
    }
    let mut ys = xs.to_vec();
    ys.sort_unstable_by(f64::total_cmp);
    Ok(ys)
}

// Linear interpolation between the order statistics around rank
// p/100 * (n - 1).
fn percentile_sorted(ys: &[f64], p: f64) -> Result<f64, PercentileError> {
    if !(0.0..=100.0).contains(&p) {
        return Err(PercentileError::OutOfRange { p });
    }

    let rank = p / 100.0 * (ys.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;

    if lo == hi {
        Ok(ys[lo])
    } else {
        let q = (ys[hi] - ys[lo]).mul_add(frac, ys[lo]);
        Ok(q.clamp(ys[lo], ys[hi]))
    }
}

/// The `p`th percentile (0 to 100) of `xs`
///
/// # Example
///
/// ```rust
/// use nig::misc::percentile;
///
/// let xs = [4.0, 1.0, 3.0, 2.0];
/// assert_eq!(percentile(&xs, 0.0).unwrap(), 1.0);
/// assert_eq!(percentile(&xs, 50.0).unwrap(), 2.5);
/// assert_eq!(percentile(&xs, 100.0).unwrap(), 4.0);
///
/// assert!(percentile(&[], 50.0).is_err());
/// assert!(percentile(&xs, 101.0).is_err());
/// ```
pub fn percentile(xs: &[f64], p: f64) -> Result<f64, PercentileError> {
    let ys = sorted(xs)?;
    percentile_sorted(&ys, p)
}

/// Several percentiles of `xs`, sorting the data only once
pub fn percentiles(
    xs: &[f64],
    ps: &[f64],
) -> Result<Vec<f64>, PercentileError> {
    let ys = sorted(xs)?;
    ps.iter().map(|&p| percentile_sorted(&ys, p)).collect()
}
