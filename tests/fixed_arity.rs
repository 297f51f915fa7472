use approx::assert_relative_eq;
use densead::{constant, variable, Arity, Fixed, FixedEvaluation};

type Eval2 = FixedEvaluation<f64, 2>;

#[test]
fn product_of_two_variables() {
    let a = Eval2::variable(2, 3.0, 0);
    let b = Eval2::variable(2, 4.0, 1);

    let p = a * b;
    assert_eq!(p.value(), 12.0);
    assert_eq!(p.derivative(0), 4.0);
    assert_eq!(p.derivative(1), 3.0);
}

#[test]
fn sum_of_two_variables() {
    let a = Eval2::variable(2, 3.0, 0);
    let b = Eval2::variable(2, 4.0, 1);

    let s = a + b;
    assert_eq!(s.value(), 7.0);
    assert_eq!(s.derivatives(), &[1.0, 1.0]);
}

#[test]
fn quotient_of_two_variables() {
    let a = Eval2::variable(2, 3.0, 0);
    let b = Eval2::variable(2, 4.0, 1);

    let q = a / b;
    assert_eq!(q.value(), 0.75);
    assert_relative_eq!(q.derivative(0), 0.25);
    assert_relative_eq!(q.derivative(1), -0.1875);
}

#[test]
fn copy_semantics() {
    let a = Eval2::variable(2, 1.5, 1);
    let b = a;
    let c = a * b;
    // `a` is still usable: fixed-arity evaluations are Copy.
    assert_eq!(a.value(), 1.5);
    assert_eq!(c.derivatives(), &[0.0, 3.0]);
}

#[test]
fn new_and_from() {
    let x = Eval2::new(2.0, [0.5, -0.5]);
    assert_eq!(x.value(), 2.0);
    assert_eq!(x.derivatives(), &[0.5, -0.5]);

    let k = Eval2::from(6.0);
    assert_eq!(k, Eval2::constant(2, 6.0));
}

#[test]
fn default_is_zero() {
    let x = FixedEvaluation::<f64, 4>::default();
    assert_eq!(x.size(), 4);
    assert_eq!(x.value(), 0.0);
    assert!(x.derivatives().iter().all(|&d| d == 0.0));
}

#[test]
fn free_factories() {
    let k = constant::<f64, Fixed<3>>(3, 2.5);
    assert_eq!(k.slots(), &[2.5, 0.0, 0.0, 0.0]);

    let x = variable::<f32, Fixed<3>>(3, 2.5, 2);
    assert_eq!(x.slots(), &[2.5, 0.0, 0.0, 1.0]);
}

#[test]
fn fixed_size_is_known() {
    assert_eq!(<Fixed<5> as Arity>::FIXED_SIZE, Some(5));
    assert_eq!(FixedEvaluation::<f32, 5>::blank(5).size(), 5);
}

#[test]
fn zero_derivatives() {
    let x = FixedEvaluation::<f64, 0>::constant(0, 3.0);
    let y = x * x + x / 2.0;
    assert_eq!(y.value(), 10.5);
    assert!(y.derivatives().is_empty());
}

#[test]
fn single_precision() {
    let a = FixedEvaluation::<f32, 2>::variable(2, 3.0, 0);
    let b = FixedEvaluation::<f32, 2>::variable(2, 4.0, 1);
    let p = a * b + 1.0;
    assert_eq!(p.value(), 13.0);
    assert_eq!(p.derivatives(), &[4.0_f32, 3.0]);
}

#[test]
fn accessors() {
    let mut x = Eval2::variable(2, 1.0, 0);
    x.set_value(4.0);
    x.set_derivative(1, 2.0);
    assert_eq!(x.slots(), &[4.0, 1.0, 2.0]);

    let mut y = Eval2::constant(2, 9.0);
    y.copy_derivatives(&x);
    assert_eq!(y.slots(), &[9.0, 1.0, 2.0]);

    y.clear_derivatives();
    assert_eq!(y.slots(), &[9.0, 0.0, 0.0]);
}

#[test]
fn display_lists_value_then_derivatives() {
    let x = Eval2::new(3.0, [1.0, 2.5]);
    assert_eq!(format!("{}", x), "v: 3 / d: 1 2.5");
}

#[test]
fn debug_shows_fields() {
    let x = Eval2::new(3.0, [1.0, 0.0]);
    let s = format!("{:?}", x);
    assert!(s.contains("value: 3.0"));
    assert!(s.contains("derivatives: [1.0, 0.0]"));
}

#[test]
fn remainder_keeps_dividend_derivatives() {
    let x = Eval2::new(7.5, [1.0, 2.0]);
    let r = x % 2.0;
    assert_eq!(r.value(), 1.5);
    assert_eq!(r.derivatives(), &[1.0, 2.0]);

    let y = Eval2::new(2.0, [5.0, 5.0]);
    let r = x % y;
    assert_eq!(r.value(), 1.5);
    assert_eq!(r.derivatives(), &[1.0, 2.0]);

    let r = 7.5 % y;
    assert_eq!(r.value(), 1.5);
    assert_eq!(r.derivatives(), &[0.0, 0.0]);
}

#[test]
fn division_by_zero_follows_ieee() {
    let x = Eval2::variable(2, 1.0, 0);
    let zero = Eval2::constant(2, 0.0);
    let q = x / zero;
    // (0·1 - 1·0) / 0² is 0/0: no interception, just IEEE.
    assert!(q.value().is_infinite());
    assert!(q.derivative(0).is_nan());
    assert!(q.derivative(1).is_nan());
    assert!(!q.is_defined());
}
