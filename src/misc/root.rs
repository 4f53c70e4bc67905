//! Root finding
use std::fmt;

/// Errors from root finding
#[derive(Debug, Clone, PartialEq)]
pub enum RootError {
    /// f(lower) and f(upper) have the same sign, so no root is bracketed
    NotBracketed { lower: f64, upper: f64 },
    /// A bound or function value was NaN
    NotFinite,
    /// The bracket did not shrink below the tolerance in time
    MaxIterationReached,
}

impl std::error::Error for RootError {}

impl fmt::Display for RootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotBracketed { lower, upper } => {
                write!(f, "no sign change in [{lower}, {upper}]")
            }
            Self::NotFinite => write!(f, "encountered NaN"),
            Self::MaxIterationReached => {
                write!(f, "maximum number of iterations reached")
            }
        }
    }
}

/// Bisection root finding on `[lower, upper]`
///
/// Stops when the bracket width falls under `tol` relative to the magnitude
/// of the midpoint (or absolute when the midpoint is smaller than 1).
///
/// # Example
///
/// ```rust
/// use nig::misc::bisection;
///
/// let root = bisection(|x| x * x - 2.0, 0.0, 2.0, 1e-12, 200).unwrap();
/// assert!((root - 2.0_f64.sqrt()).abs() < 1e-10);
/// ```
pub fn bisection<F>(
    f: F,
    mut lower: f64,
    mut upper: f64,
    tol: f64,
    max_iter: usize,
) -> Result<f64, RootError>
where
    F: Fn(f64) -> f64,
{
    if lower.is_nan() || upper.is_nan() {
        return Err(RootError::NotFinite);
    }

    let mut f_lower = f(lower);
    let f_upper = f(upper);

    if f_lower.is_nan() || f_upper.is_nan() {
        return Err(RootError::NotFinite);
    } else if f_lower == 0.0 {
        return Ok(lower);
    } else if f_upper == 0.0 {
        return Ok(upper);
    } else if f_lower.signum() == f_upper.signum() {
        return Err(RootError::NotBracketed { lower, upper });
    }

    for iter in 0..max_iter {
        let mid = 0.5_f64.mul_add(upper - lower, lower);
        if (upper - lower).abs() <= tol * mid.abs().max(1.0) {
            log::trace!("bisection converged after {iter} iterations");
            return Ok(mid);
        }

        let f_mid = f(mid);
        if f_mid.is_nan() {
            return Err(RootError::NotFinite);
        } else if f_mid == 0.0 {
            return Ok(mid);
        } else if f_mid.signum() == f_lower.signum() {
            lower = mid;
            f_lower = f_mid;
        } else {
            upper = mid;
        }
    }

    Err(RootError::MaxIterationReached)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bisection_cubic() {
        let root = bisection(|x| x.powi(3) - x - 1.0, 1.0, 2.0, 1e-14, 200);
        assert::close(root.unwrap(), 1.324_717_957_244_746, 1e-12);
    }

    #[test]
    fn bisection_decreasing_function() {
        let root = bisection(|x| 1.0 - x, -3.0, 5.0, 1e-14, 200).unwrap();
        assert::close(root, 1.0, 1e-12);
    }

    #[test]
    fn bisection_root_at_bound() {
        assert_eq!(bisection(|x| x, 0.0, 1.0, 1e-12, 10), Ok(0.0));
    }

    #[test]
    fn bisection_not_bracketed() {
        match bisection(|x| x * x + 1.0, -1.0, 1.0, 1e-12, 100) {
            Err(RootError::NotBracketed { .. }) => (),
            other => panic!("expected NotBracketed, got {other:?}"),
        }
    }

    #[test]
    fn bisection_hits_max_iter() {
        let res = bisection(|x| x - 0.3, 0.0, 1.0, 1e-15, 3);
        assert_eq!(res, Err(RootError::MaxIterationReached));
    }
}
