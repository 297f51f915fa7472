//! The [`Scalar`] trait for code that works on plain floats and on
//! evaluations of either arity.
//!
//! Physics code written as `fn f<E: Scalar>(x: &E) -> E` must not assume a
//! derivative count: it reads [`value`](Scalar::value) and
//! [`derivative`](Scalar::derivative), and creates constants with
//! [`constant_like`](Scalar::constant_like) so they match the arity of the
//! inputs it was handed.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::arity::Arity;
use crate::evaluation::Evaluation;
use crate::Field;

/// Shared capability set of `f32`, `f64` and every [`Evaluation`].
pub trait Scalar:
    Clone
    + Debug
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// The underlying scalar field.
    type Field: Field;

    /// The primal value.
    fn value(&self) -> Self::Field;

    /// Number of tracked derivatives; zero for plain floats.
    fn size(&self) -> usize;

    /// `∂/∂x_var_idx`. Plain floats are constants, so this is zero for them.
    fn derivative(&self, var_idx: usize) -> Self::Field;

    /// A constant with the same arity as `self`.
    fn constant_like(&self, c: Self::Field) -> Self;

    /// `max(self, c)` against a constant.
    fn max_scalar(&self, c: Self::Field) -> Self {
        if self.value() >= c {
            self.clone()
        } else {
            self.constant_like(c)
        }
    }

    /// `min(self, c)` against a constant.
    fn min_scalar(&self, c: Self::Field) -> Self {
        if self.value() <= c {
            self.clone()
        } else {
            self.constant_like(c)
        }
    }
}

impl Scalar for f32 {
    type Field = f32;

    #[inline]
    fn value(&self) -> f32 {
        *self
    }

    #[inline]
    fn size(&self) -> usize {
        0
    }

    #[inline]
    fn derivative(&self, _var_idx: usize) -> f32 {
        0.0
    }

    #[inline]
    fn constant_like(&self, c: f32) -> Self {
        c
    }
}

impl Scalar for f64 {
    type Field = f64;

    #[inline]
    fn value(&self) -> f64 {
        *self
    }

    #[inline]
    fn size(&self) -> usize {
        0
    }

    #[inline]
    fn derivative(&self, _var_idx: usize) -> f64 {
        0.0
    }

    #[inline]
    fn constant_like(&self, c: f64) -> Self {
        c
    }
}

impl<F: Field, A: Arity> Scalar for Evaluation<F, A> {
    type Field = F;

    #[inline]
    fn value(&self) -> F {
        Evaluation::value(self)
    }

    #[inline]
    fn size(&self) -> usize {
        Evaluation::size(self)
    }

    #[inline]
    fn derivative(&self, var_idx: usize) -> F {
        Evaluation::derivative(self, var_idx)
    }

    #[inline]
    fn constant_like(&self, c: F) -> Self {
        Evaluation::constant_like(self, c)
    }

    #[inline]
    fn max_scalar(&self, c: F) -> Self {
        Evaluation::max_scalar(self, c)
    }

    #[inline]
    fn min_scalar(&self, c: F) -> Self {
        Evaluation::min_scalar(self, c)
    }
}
