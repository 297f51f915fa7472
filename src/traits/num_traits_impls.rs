//! `num_traits` impls for fixed-arity evaluations.
//!
//! Only [`Fixed<N>`] evaluations can be built from a bare literal (the arity
//! is in the type) and are `Copy`, so only they satisfy `num_traits::Float`.
//! Literals become constants.

use std::num::FpCategory;

use num_traits::{
    Float as NumFloat, FloatConst, FromPrimitive, Num, NumCast, One, Signed, ToPrimitive, Zero,
};

use crate::arity::Fixed;
use crate::evaluation::Evaluation;
use crate::Field;

type Fx<F, const N: usize> = Evaluation<F, Fixed<N>>;

#[inline(always)]
fn lift<F: Field, const N: usize>(value: F) -> Fx<F, N> {
    Evaluation::constant(N, value)
}

impl<F: Field, const N: usize> Zero for Fx<F, N> {
    #[inline]
    fn zero() -> Self {
        lift(F::zero())
    }
    /// Zero value; derivatives are not inspected.
    #[inline]
    fn is_zero(&self) -> bool {
        self.value().is_zero()
    }
}

impl<F: Field, const N: usize> One for Fx<F, N> {
    #[inline]
    fn one() -> Self {
        lift(F::one())
    }
}

impl<F: Field, const N: usize> Num for Fx<F, N> {
    type FromStrRadixErr = F::FromStrRadixErr;
    fn from_str_radix(str: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        F::from_str_radix(str, radix).map(lift)
    }
}

impl<F: Field, const N: usize> FromPrimitive for Fx<F, N> {
    #[inline]
    fn from_i64(n: i64) -> Option<Self> {
        F::from_i64(n).map(lift)
    }
    #[inline]
    fn from_u64(n: u64) -> Option<Self> {
        F::from_u64(n).map(lift)
    }
    #[inline]
    fn from_f32(n: f32) -> Option<Self> {
        <F as FromPrimitive>::from_f32(n).map(lift)
    }
    #[inline]
    fn from_f64(n: f64) -> Option<Self> {
        <F as FromPrimitive>::from_f64(n).map(lift)
    }
}

impl<F: Field, const N: usize> ToPrimitive for Fx<F, N> {
    #[inline]
    fn to_i64(&self) -> Option<i64> {
        self.value().to_i64()
    }
    #[inline]
    fn to_u64(&self) -> Option<u64> {
        self.value().to_u64()
    }
    #[inline]
    fn to_f32(&self) -> Option<f32> {
        self.value().to_f32()
    }
    #[inline]
    fn to_f64(&self) -> Option<f64> {
        self.value().to_f64()
    }
}

impl<F: Field, const N: usize> NumCast for Fx<F, N> {
    #[inline]
    fn from<T: ToPrimitive>(n: T) -> Option<Self> {
        <F as NumCast>::from(n).map(lift)
    }
}

impl<F: Field, const N: usize> Signed for Fx<F, N> {
    #[inline]
    fn abs(&self) -> Self {
        Evaluation::abs(self)
    }
    #[inline]
    fn abs_sub(&self, other: &Self) -> Self {
        if self.value() > other.value() {
            *self - *other
        } else {
            Self::zero()
        }
    }
    #[inline]
    fn signum(&self) -> Self {
        Evaluation::signum(self)
    }
    #[inline]
    fn is_positive(&self) -> bool {
        self.value().is_sign_positive()
    }
    #[inline]
    fn is_negative(&self) -> bool {
        self.value().is_sign_negative()
    }
}

macro_rules! float_consts {
    ($($name:ident),* $(,)?) => {
        impl<F: Field, const N: usize> FloatConst for Fx<F, N> {
            $(
                #[inline]
                fn $name() -> Self {
                    lift(F::$name())
                }
            )*
        }
    };
}

float_consts!(
    E,
    FRAC_1_PI,
    FRAC_1_SQRT_2,
    FRAC_2_PI,
    FRAC_2_SQRT_PI,
    FRAC_PI_2,
    FRAC_PI_3,
    FRAC_PI_4,
    FRAC_PI_6,
    FRAC_PI_8,
    LN_10,
    LN_2,
    LOG10_E,
    LOG2_E,
    PI,
    SQRT_2,
    TAU,
    LOG10_2,
    LOG2_10,
);

// Forwards `num_traits::Float` methods to the inherent ones, which take
// `&self`.
macro_rules! forward_unary {
    ($($name:ident),* $(,)?) => {
        $(
            #[inline]
            fn $name(self) -> Self {
                Evaluation::$name(&self)
            }
        )*
    };
}

macro_rules! forward_binary {
    ($($name:ident),* $(,)?) => {
        $(
            #[inline]
            fn $name(self, other: Self) -> Self {
                Evaluation::$name(&self, &other)
            }
        )*
    };
}

macro_rules! forward_predicate {
    ($($name:ident),* $(,)?) => {
        $(
            #[inline]
            fn $name(self) -> bool {
                self.value().$name()
            }
        )*
    };
}

impl<F: Field, const N: usize> NumFloat for Fx<F, N> {
    fn nan() -> Self {
        lift(F::nan())
    }
    fn infinity() -> Self {
        lift(F::infinity())
    }
    fn neg_infinity() -> Self {
        lift(F::neg_infinity())
    }
    fn neg_zero() -> Self {
        lift(F::neg_zero())
    }
    fn min_value() -> Self {
        lift(F::min_value())
    }
    fn min_positive_value() -> Self {
        lift(F::min_positive_value())
    }
    fn max_value() -> Self {
        lift(F::max_value())
    }
    fn epsilon() -> Self {
        lift(F::epsilon())
    }

    forward_predicate!(
        is_nan,
        is_infinite,
        is_finite,
        is_normal,
        is_sign_positive,
        is_sign_negative,
    );

    fn classify(self) -> FpCategory {
        self.value().classify()
    }

    forward_unary!(
        floor, ceil, round, trunc, fract, abs, signum, recip, sqrt, cbrt, exp, exp2, ln, log2,
        log10, sin, cos, tan, asin, acos, atan, sinh, cosh, tanh, asinh, acosh, atanh,
    );

    forward_binary!(log, atan2, hypot, max, min);

    fn mul_add(self, a: Self, b: Self) -> Self {
        Evaluation::mul_add(&self, &a, &b)
    }

    fn powi(self, n: i32) -> Self {
        Evaluation::powi(&self, n)
    }

    fn powf(self, n: Self) -> Self {
        Evaluation::pow(&self, &n)
    }

    fn exp_m1(self) -> Self {
        let u = self.value();
        self.chain(u.exp_m1(), u.exp())
    }

    fn ln_1p(self) -> Self {
        let u = self.value();
        self.chain(u.ln_1p(), F::one() / (F::one() + u))
    }

    fn sin_cos(self) -> (Self, Self) {
        let (s, c) = self.value().sin_cos();
        (self.chain(s, c), self.chain(c, -s))
    }

    fn abs_sub(self, other: Self) -> Self {
        Signed::abs_sub(&self, &other)
    }

    fn to_degrees(self) -> Self {
        let mut result = self;
        result.mul_assign_scalar(F::lit(180.0) / F::PI());
        result
    }

    fn to_radians(self) -> Self {
        let mut result = self;
        result.mul_assign_scalar(F::PI() / F::lit(180.0));
        result
    }

    fn integer_decode(self) -> (u64, i16, i8) {
        self.value().integer_decode()
    }
}
