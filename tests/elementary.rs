//! Elementary functions checked against central differences.

use approx::assert_relative_eq;
use densead::{Dynamic, DynamicEvaluation64, Evaluation, FixedEvaluation};

type E1 = FixedEvaluation<f64, 1>;

const H: f64 = 1e-6;

fn fd(f: impl Fn(f64) -> f64, x: f64) -> f64 {
    (f(x + H) - f(x - H)) / (2.0 * H)
}

/// Seed `x` as the only variable and compare value and derivative of `ad`
/// with `plain` and its central difference.
fn check_unary(ad: impl Fn(&E1) -> E1, plain: impl Fn(f64) -> f64, x: f64) {
    let e = ad(&E1::variable(1, x, 0));
    assert_relative_eq!(e.value(), plain(x), max_relative = 1e-12);
    assert_relative_eq!(e.derivative(0), fd(&plain, x), epsilon = 1e-6, max_relative = 1e-6);
}

#[test]
fn powers() {
    for &x in &[0.3, 1.0, 2.5] {
        check_unary(|e| e.recip(), |x| x.recip(), x);
        check_unary(|e| e.sqrt(), |x| x.sqrt(), x);
        check_unary(|e| e.cbrt(), |x| x.cbrt(), x);
        check_unary(|e| e.powi(3), |x| x.powi(3), x);
        check_unary(|e| e.powi(-2), |x| x.powi(-2), x);
        check_unary(|e| e.powf(1.7), |x| x.powf(1.7), x);
    }
}

#[test]
fn exp_and_log() {
    for &x in &[0.2, 1.0, 3.0] {
        check_unary(|e| e.exp(), |x| x.exp(), x);
        check_unary(|e| e.exp2(), |x| x.exp2(), x);
        check_unary(|e| e.ln(), |x| x.ln(), x);
        check_unary(|e| e.log2(), |x| x.log2(), x);
        check_unary(|e| e.log10(), |x| x.log10(), x);
    }
}

#[test]
fn trigonometric() {
    for &x in &[-0.7, 0.1, 0.9] {
        check_unary(|e| e.sin(), |x| x.sin(), x);
        check_unary(|e| e.cos(), |x| x.cos(), x);
        check_unary(|e| e.tan(), |x| x.tan(), x);
        check_unary(|e| e.asin(), |x| x.asin(), x);
        check_unary(|e| e.acos(), |x| x.acos(), x);
        check_unary(|e| e.atan(), |x| x.atan(), x);
    }
}

#[test]
fn hyperbolic() {
    for &x in &[-0.5, 0.25, 0.8] {
        check_unary(|e| e.sinh(), |x| x.sinh(), x);
        check_unary(|e| e.cosh(), |x| x.cosh(), x);
        check_unary(|e| e.tanh(), |x| x.tanh(), x);
        check_unary(|e| e.asinh(), |x| x.asinh(), x);
        check_unary(|e| e.atanh(), |x| x.atanh(), x);
    }
    check_unary(|e| e.acosh(), |x| x.acosh(), 1.5);
    check_unary(|e| e.acosh(), |x| x.acosh(), 4.0);
}

#[test]
fn piecewise_functions() {
    check_unary(|e| e.abs(), |x| x.abs(), -2.0);
    check_unary(|e| e.abs(), |x| x.abs(), 2.0);
    check_unary(|e| e.fract(), |x| x.fract(), 2.25);

    let x = E1::variable(1, 2.7, 0);
    for e in [x.floor(), x.ceil(), x.round(), x.trunc(), x.signum()] {
        assert_eq!(e.derivative(0), 0.0);
    }
    assert_eq!(x.floor().value(), 2.0);
    assert_eq!(x.ceil().value(), 3.0);
    assert_eq!(x.signum().value(), 1.0);
}

#[test]
fn binary_functions() {
    // Two variables: check each partial against a difference in that argument.
    let (xv, yv) = (1.3, 0.6);
    let x = FixedEvaluation::<f64, 2>::variable(2, xv, 0);
    let y = FixedEvaluation::<f64, 2>::variable(2, yv, 1);

    let cases: [(FixedEvaluation<f64, 2>, fn(f64, f64) -> f64); 5] = [
        (x.pow(&y), |a, b| a.powf(b)),
        (y.atan2(&x), |a, b| b.atan2(a)),
        (x.hypot(&y), |a, b| a.hypot(b)),
        (x.log(&(y + 2.0)), |a, b| a.ln() / (b + 2.0).ln()),
        (x.mul_add(&y, &x), |a, b| a * b + a),
    ];
    for (e, f) in cases {
        assert_relative_eq!(e.value(), f(xv, yv), max_relative = 1e-12);
        assert_relative_eq!(e.derivative(0), fd(|a| f(a, yv), xv), max_relative = 1e-6);
        assert_relative_eq!(e.derivative(1), fd(|b| f(xv, b), yv), max_relative = 1e-6);
    }
}

#[test]
fn pow_with_constant_exponent_accepts_negative_base() {
    let x = E1::variable(1, -2.0, 0);
    let p = x.pow(&E1::constant(1, 3.0));
    assert_eq!(p.value(), -8.0);
    assert_relative_eq!(p.derivative(0), 12.0);
}

#[test]
fn composition_follows_chain_rule() {
    // f(x) = exp(sin(x)) * sqrt(x), both arities.
    let f = |x: f64| x.sin().exp() * x.sqrt();
    let x0 = 0.8;

    let fixed = {
        let x = E1::variable(1, x0, 0);
        x.sin().exp() * x.sqrt()
    };
    let dynamic = {
        let x = DynamicEvaluation64::variable(1, x0, 0);
        x.sin().exp() * x.sqrt()
    };
    assert_relative_eq!(fixed.value(), f(x0), max_relative = 1e-12);
    assert_relative_eq!(fixed.derivative(0), fd(f, x0), max_relative = 1e-6);
    assert_eq!(fixed.slots(), dynamic.slots());
}

#[test]
fn functions_preserve_arity() {
    let x: Evaluation<f64, Dynamic> = Evaluation::from_parts(0.5, &[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(x.exp().size(), 4);
    assert_eq!(x.floor().size(), 4);
    assert_eq!(x.atan2(&x).size(), 4);

    // Every derivative slot scales by the same f'(u).
    let s = x.sin();
    let c = 0.5_f64.cos();
    for i in 0..4 {
        assert_relative_eq!(s.derivative(i), c * (i as f64 + 1.0));
    }
}

#[test]
fn powi_at_extreme_exponents() {
    let one = E1::variable(1, 1.0, 0);
    let p = one.powi(i32::MIN);
    assert_eq!(p.value(), 1.0);
    assert_eq!(p.derivative(0), i32::MIN as f64);

    let two = E1::variable(1, 2.0, 0);
    let p = two.powi(i32::MIN);
    assert_eq!(p.value(), 0.0);
    assert!(p.is_defined());

    let p = one.powi(i32::MAX);
    assert_eq!(p.derivative(0), i32::MAX as f64);
}

#[test]
fn pow_at_zero_base_with_variable_exponent() {
    let x = FixedEvaluation::<f64, 2>::variable(2, 0.0, 0);
    let y = FixedEvaluation::<f64, 2>::variable(2, 2.0, 1);
    let p = x.pow(&y);
    assert_eq!(p.value(), 0.0);
    assert!(p.is_defined());
    // ∂/∂x = y x^(y-1) = 0, ∂/∂y = x^y ln x, flat at x = 0
    assert_eq!(p.derivatives(), &[0.0, 0.0]);
}
