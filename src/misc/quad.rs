const QUAD_EPS: f64 = 1E-8;
const MAX_DEPTH: u32 = 48;

fn simpsons_rule<F>(func: &F, a: f64, b: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let c = (a + b) / 2.0;
    let h3 = (b - a).abs() / 6.0;
    h3 * (4.0_f64.mul_add(func(c), func(a)) + func(b))
}

fn recursive_asr<F>(
    func: &F,
    a: f64,
    b: f64,
    eps: f64,
    whole: f64,
    depth: u32,
) -> f64
where
    F: Fn(f64) -> f64,
{
    let c = (a + b) / 2.0;
    let left = simpsons_rule(func, a, c);
    let right = simpsons_rule(func, c, b);
    let err = left + right - whole;
    if depth >= MAX_DEPTH || err.abs() <= 15.0 * eps {
        left + right + err / 15.0
    } else {
        recursive_asr(func, a, c, eps / 2.0, left, depth + 1)
            + recursive_asr(func, c, b, eps / 2.0, right, depth + 1)
    }
}

/// Adaptive Simpson's quadrature with a user-supplied tolerance
pub fn quad_eps<F>(func: F, a: f64, b: f64, eps: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    recursive_asr(&func, a, b, eps, simpsons_rule(&func, a, b), 0)
}

/// Adaptive Simpson's quadrature
///
/// # Example
///
/// Integrate f: x<sup>2</sup> over the interval [0, 1].
///
/// ```
/// use nig::misc::quad;
///
/// let func = |x: f64| x.powi(2);
/// let q = quad(func, 0.0, 1.0);
///
/// assert!((q - 1.0/3.0).abs() < 1E-8);
/// ```
pub fn quad<F>(func: F, a: f64, b: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    quad_eps(func, a, b, QUAD_EPS)
}

/// Nested two-dimensional quadrature of `func(x, y)`
///
/// `x` runs over `outer`; for each `x`, `y` runs over `inner(x)`. The inner
/// integrals are computed to a tighter tolerance than `eps` so their error
/// does not drive the outer refinement.
///
/// # Example
///
/// Area of the triangle under y = x on [0, 1].
///
/// ```
/// use nig::misc::quad2;
///
/// let area = quad2(|_x, _y| 1.0, (0.0, 1.0), |x| (0.0, x), 1e-8);
/// assert!((area - 0.5).abs() < 1e-8);
/// ```
pub fn quad2<F, B>(func: F, outer: (f64, f64), inner: B, eps: f64) -> f64
where
    F: Fn(f64, f64) -> f64,
    B: Fn(f64) -> (f64, f64),
{
    let inner_eps = eps * 1e-3;
    let g = |x: f64| {
        let (c, d) = inner(x);
        quad_eps(|y| func(x, y), c, d, inner_eps)
    };
    quad_eps(g, outer.0, outer.1, eps)
}
