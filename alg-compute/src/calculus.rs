//! Classical calculus by finite differences and numeric quadrature.
//!
//! These routines are the numeric counterparts of the symbolic rewrites in [`crate::symbolic`]:
//! they work on opaque `Fn(f64) -> f64` closures instead of expression trees, so anything
//! callable can be differentiated, integrated, or solved.

use crate::funcs::binomial;
use rand::Rng;

/// First derivative by central difference with step `h`.
pub fn derivative(f: impl Fn(f64) -> f64, x: f64, h: f64) -> f64 {
    (f(x + h) - f(x - h)) / (2.0 * h)
}

/// `n`-th derivative by the central difference formula with binomial weights. Order 0 is `f(x)`.
pub fn derivative_n(f: impl Fn(f64) -> f64, x: f64, n: u32, h: f64) -> f64 {
    if n == 0 {
        return f(x);
    }

    let mut result = 0.0;
    let mut sign = 1.0;
    for k in 0..=n {
        let offset = n as f64 - 2.0 * k as f64;
        result += sign * binomial(n, k) * f(x + offset * h);
        sign = -sign;
    }
    result / (2.0 * h).powi(n as i32)
}

/// Integrates `f` over `[a, b]` with the trapezoidal rule using `steps` subintervals.
pub fn integrate_trapezoidal(f: impl Fn(f64) -> f64, a: f64, b: f64, steps: usize) -> f64 {
    if steps == 0 {
        return 0.0;
    }

    let h = (b - a) / steps as f64;
    let mut sum = 0.5 * (f(a) + f(b));
    for i in 1..steps {
        sum += f(a + i as f64 * h);
    }
    sum * h
}

/// Integrates `f` over `[a, b]` with Simpson's rule. `steps` is rounded up to the next even
/// number, as the rule requires.
pub fn integrate_simpson(f: impl Fn(f64) -> f64, a: f64, b: f64, steps: usize) -> f64 {
    if steps == 0 {
        return 0.0;
    }

    let steps = steps + steps % 2;
    let h = (b - a) / steps as f64;
    let mut sum = f(a) + f(b);
    for i in 1..steps {
        sum += f(a + i as f64 * h) * if i % 2 == 1 { 4.0 } else { 2.0 };
    }
    sum * h / 3.0
}

/// Integrates `f` over `[a, b]` by uniform Monte-Carlo sampling.
pub fn integrate_monte_carlo(f: impl Fn(f64) -> f64, a: f64, b: f64, samples: usize) -> f64 {
    if samples == 0 {
        return 0.0;
    }

    let mut rng = rand::thread_rng();
    let mut sum = 0.0;
    for _ in 0..samples {
        let x = a + (b - a) * rng.gen::<f64>();
        sum += f(x);
    }
    (b - a) * sum / samples as f64
}

/// Two-sided limit estimate: the average of `f` just left and just right of `x`.
pub fn limit(f: impl Fn(f64) -> f64, x: f64, h: f64) -> f64 {
    (f(x + h) + f(x - h)) / 2.0
}

/// Newton-Raphson root finding from the starting guess `x0`, using the caller-supplied
/// derivative `df`. Stops early when the derivative is effectively zero.
pub fn root_newton(
    f: impl Fn(f64) -> f64,
    df: impl Fn(f64) -> f64,
    x0: f64,
    tol: f64,
    max_iter: usize,
) -> f64 {
    let mut x = x0;
    for _ in 0..max_iter {
        let y = f(x);
        let dy = df(x);
        if dy.abs() < 1e-12 {
            break;
        }

        let x_next = x - y / dy;
        if (x_next - x).abs() < tol {
            return x_next;
        }
        x = x_next;
    }
    x
}

/// Bisection root finding on `[a, b]`. Returns NaN when `f(a)` and `f(b)` have the same sign.
pub fn root_bisection(
    f: impl Fn(f64) -> f64,
    a: f64,
    b: f64,
    tol: f64,
    max_iter: usize,
) -> f64 {
    let (mut a, mut b) = (a, b);
    let mut fa = f(a);
    if fa * f(b) > 0.0 {
        return f64::NAN;
    }

    for _ in 0..max_iter {
        let c = 0.5 * (a + b);
        let fc = f(c);
        if fc.abs() < tol || (b - a) / 2.0 < tol {
            return c;
        }

        if fa * fc < 0.0 {
            b = c;
        } else {
            a = c;
            fa = fc;
        }
    }
    0.5 * (a + b)
}

/// Partial derivative of a scalar field along axis `i`, by central difference.
pub fn partial(f: impl Fn(&[f64]) -> f64, x: &[f64], i: usize, h: f64) -> f64 {
    let mut forward = x.to_vec();
    let mut backward = x.to_vec();
    forward[i] += h;
    backward[i] -= h;
    (f(&forward) - f(&backward)) / (2.0 * h)
}

/// Gradient of a scalar field: the partial derivative along every axis.
pub fn gradient(f: impl Fn(&[f64]) -> f64, x: &[f64], h: f64) -> Vec<f64> {
    (0..x.len()).map(|i| partial(&f, x, i, h)).collect()
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;
    use super::*;

    #[test]
    fn central_difference_derivative() {
        assert_float_absolute_eq!(derivative(|x| x * x, 2.0, 1e-6), 4.0, 1e-4);
        assert_float_absolute_eq!(derivative(f64::sin, 0.0, 1e-6), 1.0, 1e-4);
    }

    #[test]
    fn higher_order_derivatives() {
        assert_float_absolute_eq!(derivative_n(|x| x * x, 2.0, 0, 1e-3), 4.0, 1e-9);
        assert_float_absolute_eq!(derivative_n(|x| x * x, 2.0, 2, 1e-3), 2.0, 1e-3);
        assert_float_absolute_eq!(derivative_n(|x| x * x * x, 1.0, 2, 1e-3), 6.0, 1e-3);
    }

    #[test]
    fn trapezoidal_integration() {
        let result = integrate_trapezoidal(|x| x * x, 0.0, 1.0, 1000);
        assert_float_absolute_eq!(result, 1.0 / 3.0, 1e-3);
        assert_float_absolute_eq!(integrate_trapezoidal(|x| x, 0.0, 1.0, 0), 0.0);
    }

    #[test]
    fn simpson_integration() {
        let result = integrate_simpson(|x| x * x, 0.0, 1.0, 1000);
        assert_float_absolute_eq!(result, 1.0 / 3.0, 1e-6);

        // odd step counts are rounded up, not rejected
        let result = integrate_simpson(|x| x * x, 0.0, 1.0, 999);
        assert_float_absolute_eq!(result, 1.0 / 3.0, 1e-6);
    }

    #[test]
    fn monte_carlo_integration() {
        let result = integrate_monte_carlo(|x| x * x, 0.0, 1.0, 200_000);
        assert_float_absolute_eq!(result, 1.0 / 3.0, 0.05);
    }

    #[test]
    fn limit_estimate() {
        assert_float_absolute_eq!(limit(|x| x * x, 1.0, 1e-6), 1.0, 1e-6);
    }

    #[test]
    fn newton_finds_roots() {
        let root = root_newton(|x| x * x - 4.0, |x| 2.0 * x, 3.0, 1e-10, 100);
        assert_float_absolute_eq!(root, 2.0, 1e-8);
    }

    #[test]
    fn bisection_finds_roots() {
        let root = root_bisection(|x| x * x - 2.0, 0.0, 2.0, 1e-10, 200);
        assert_float_absolute_eq!(root, std::f64::consts::SQRT_2, 1e-8);
    }

    #[test]
    fn bisection_requires_a_sign_change() {
        assert!(root_bisection(|x| x * x + 1.0, -1.0, 1.0, 1e-10, 100).is_nan());
    }

    #[test]
    fn partials_and_gradients() {
        // f(x, y) = x^2 + 3y
        let f = |v: &[f64]| v[0] * v[0] + 3.0 * v[1];
        assert_float_absolute_eq!(partial(f, &[2.0, 1.0], 0, 1e-6), 4.0, 1e-4);
        assert_float_absolute_eq!(partial(f, &[2.0, 1.0], 1, 1e-6), 3.0, 1e-4);

        let grad = gradient(f, &[2.0, 1.0], 1e-6);
        assert_float_absolute_eq!(grad[0], 4.0, 1e-4);
        assert_float_absolute_eq!(grad[1], 3.0, 1e-4);
    }
}
