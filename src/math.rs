//! Elementary functions on evaluations.
//!
//! Each function computes `f(u)` and `f'(u)` on the value and scales the
//! derivative slots by `f'(u)`. Functions of two evaluations combine the
//! partials of both operands slot by slot.

use crate::arity::Arity;
use crate::evaluation::Evaluation;
use crate::Field;

impl<F: Field, A: Arity> Evaluation<F, A> {
    /// Result with value `f_val` and derivatives `da * u'_i + db * v'_i`.
    #[inline]
    fn combine(&self, other: &Self, f_val: F, da: F, db: F) -> Self {
        debug_assert_eq!(self.size(), other.size(), "arity mismatch");
        let mut result = self.clone();
        let slots = result.slots_mut();
        slots[0] = f_val;
        for (a, &b) in slots[1..].iter_mut().zip(other.derivatives()) {
            *a = da * *a + db * b;
        }
        result
    }

    /// Same arity, value `c`, zero derivatives.
    #[inline]
    fn flat(&self, c: F) -> Self {
        let mut result = self.clone();
        result.assign(c);
        result
    }

    // -- Powers --

    #[inline]
    pub fn recip(&self) -> Self {
        let inv = F::one() / self.value();
        self.chain(inv, -inv * inv)
    }

    #[inline]
    pub fn sqrt(&self) -> Self {
        let s = self.value().sqrt();
        self.chain(s, F::one() / (F::lit(2.0) * s))
    }

    #[inline]
    pub fn cbrt(&self) -> Self {
        let c = self.value().cbrt();
        self.chain(c, F::one() / (F::lit(3.0) * c * c))
    }

    #[inline]
    pub fn powi(&self, n: i32) -> Self {
        let u = self.value();
        let nf = F::lit(n as f64);
        let deriv = if n == 0 {
            F::zero()
        } else {
            match n.checked_sub(1) {
                Some(m) => nf * u.powi(m),
                // i32::MIN
                None => nf * u.powf(nf - F::one()),
            }
        };
        self.chain(u.powi(n), deriv)
    }

    /// `u^c` for a constant exponent.
    #[inline]
    pub fn powf(&self, exponent: F) -> Self {
        let u = self.value();
        let deriv = if exponent.is_zero() {
            F::zero()
        } else {
            exponent * u.powf(exponent - F::one())
        };
        self.chain(u.powf(exponent), deriv)
    }

    /// `u^v` where both base and exponent carry derivatives.
    ///
    /// When the exponent has no derivatives this is [`powf`](Self::powf), so
    /// a negative base stays usable with a constant exponent.
    pub fn pow(&self, exponent: &Self) -> Self {
        if exponent.derivatives().iter().all(|d| d.is_zero()) {
            return self.powf(exponent.value());
        }
        let u = self.value();
        let v = exponent.value();
        let val = u.powf(v);
        // 0^v is flat in v; avoid 0 * ln(0).
        let db = if val.is_zero() { F::zero() } else { val * u.ln() };
        self.combine(exponent, val, v * u.powf(v - F::one()), db)
    }

    // -- Exp/Log --

    #[inline]
    pub fn exp(&self) -> Self {
        let e = self.value().exp();
        self.chain(e, e)
    }

    #[inline]
    pub fn exp2(&self) -> Self {
        let e = self.value().exp2();
        self.chain(e, e * F::LN_2())
    }

    #[inline]
    pub fn ln(&self) -> Self {
        let u = self.value();
        self.chain(u.ln(), F::one() / u)
    }

    #[inline]
    pub fn log2(&self) -> Self {
        let u = self.value();
        self.chain(u.log2(), F::one() / (u * F::LN_2()))
    }

    #[inline]
    pub fn log10(&self) -> Self {
        let u = self.value();
        self.chain(u.log10(), F::one() / (u * F::LN_10()))
    }

    #[inline]
    pub fn log(&self, base: &Self) -> Self {
        &self.ln() / &base.ln()
    }

    // -- Trig --

    #[inline]
    pub fn sin(&self) -> Self {
        let u = self.value();
        self.chain(u.sin(), u.cos())
    }

    #[inline]
    pub fn cos(&self) -> Self {
        let u = self.value();
        self.chain(u.cos(), -u.sin())
    }

    #[inline]
    pub fn tan(&self) -> Self {
        let u = self.value();
        let c = u.cos();
        self.chain(u.tan(), F::one() / (c * c))
    }

    #[inline]
    pub fn asin(&self) -> Self {
        let u = self.value();
        self.chain(u.asin(), F::one() / (F::one() - u * u).sqrt())
    }

    #[inline]
    pub fn acos(&self) -> Self {
        let u = self.value();
        self.chain(u.acos(), -F::one() / (F::one() - u * u).sqrt())
    }

    #[inline]
    pub fn atan(&self) -> Self {
        let u = self.value();
        self.chain(u.atan(), F::one() / (F::one() + u * u))
    }

    /// `atan2(self, x)`, the angle of the point `(x, self)`.
    #[inline]
    pub fn atan2(&self, x: &Self) -> Self {
        let yv = self.value();
        let xv = x.value();
        let denom = xv * xv + yv * yv;
        self.combine(x, yv.atan2(xv), xv / denom, -yv / denom)
    }

    // -- Hyperbolic --

    #[inline]
    pub fn sinh(&self) -> Self {
        let u = self.value();
        self.chain(u.sinh(), u.cosh())
    }

    #[inline]
    pub fn cosh(&self) -> Self {
        let u = self.value();
        self.chain(u.cosh(), u.sinh())
    }

    #[inline]
    pub fn tanh(&self) -> Self {
        let u = self.value();
        let c = u.cosh();
        self.chain(u.tanh(), F::one() / (c * c))
    }

    #[inline]
    pub fn asinh(&self) -> Self {
        let u = self.value();
        self.chain(u.asinh(), F::one() / (u * u + F::one()).sqrt())
    }

    #[inline]
    pub fn acosh(&self) -> Self {
        let u = self.value();
        self.chain(u.acosh(), F::one() / (u * u - F::one()).sqrt())
    }

    #[inline]
    pub fn atanh(&self) -> Self {
        let u = self.value();
        self.chain(u.atanh(), F::one() / (F::one() - u * u))
    }

    // -- Piecewise --

    /// `|u|`; at zero the derivatives are passed through unchanged.
    #[inline]
    pub fn abs(&self) -> Self {
        if self.value() < F::zero() {
            -self
        } else {
            self.clone()
        }
    }

    #[inline]
    pub fn signum(&self) -> Self {
        self.flat(self.value().signum())
    }

    #[inline]
    pub fn floor(&self) -> Self {
        self.flat(self.value().floor())
    }

    #[inline]
    pub fn ceil(&self) -> Self {
        self.flat(self.value().ceil())
    }

    #[inline]
    pub fn round(&self) -> Self {
        self.flat(self.value().round())
    }

    #[inline]
    pub fn trunc(&self) -> Self {
        self.flat(self.value().trunc())
    }

    #[inline]
    pub fn fract(&self) -> Self {
        let mut result = self.clone();
        result.set_value(self.value().fract());
        result
    }

    #[inline]
    pub fn hypot(&self, other: &Self) -> Self {
        let u = self.value();
        let v = other.value();
        let h = u.hypot(v);
        self.combine(other, h, u / h, v / h)
    }

    /// `self * a + b`
    #[inline]
    pub fn mul_add(&self, a: &Self, b: &Self) -> Self {
        let mut result = self * a;
        result += b;
        result
    }

    /// The operand with the larger value, derivatives included; ties pick `self`.
    /// A NaN operand loses, as with `f64::max`.
    #[inline]
    pub fn max(&self, other: &Self) -> Self {
        if self.value() >= other.value() || other.value().is_nan() {
            self.clone()
        } else {
            other.clone()
        }
    }

    /// The operand with the smaller value, derivatives included; ties pick `self`.
    /// A NaN operand loses, as with `f64::min`.
    #[inline]
    pub fn min(&self, other: &Self) -> Self {
        if self.value() <= other.value() || other.value().is_nan() {
            self.clone()
        } else {
            other.clone()
        }
    }

    /// `max(u, c)` against a constant: below `c` the result is the constant.
    #[inline]
    pub fn max_scalar(&self, c: F) -> Self {
        if self.value() >= c {
            self.clone()
        } else {
            self.flat(c)
        }
    }

    /// `min(u, c)` against a constant: above `c` the result is the constant.
    #[inline]
    pub fn min_scalar(&self, c: F) -> Self {
        if self.value() <= c {
            self.clone()
        } else {
            self.flat(c)
        }
    }
}
