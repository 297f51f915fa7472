use std::cmp::Ordering;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

use crate::arity::Arity;
use crate::evaluation::Evaluation;
use crate::Field;

// Evaluation ⊕ Evaluation in every ownership combination. Owned left-hand
// operands are updated in place; borrowed ones are cloned once.
macro_rules! impl_eval_binary_op {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $kernel:ident) => {
        impl<F: Field, A: Arity> $Op for Evaluation<F, A> {
            type Output = Self;
            #[inline]
            fn $op(mut self, rhs: Self) -> Self {
                self.$kernel(&rhs);
                self
            }
        }

        impl<'b, F: Field, A: Arity> $Op<&'b Evaluation<F, A>> for Evaluation<F, A> {
            type Output = Self;
            #[inline]
            fn $op(mut self, rhs: &'b Evaluation<F, A>) -> Self {
                self.$kernel(rhs);
                self
            }
        }

        impl<'a, F: Field, A: Arity> $Op<Evaluation<F, A>> for &'a Evaluation<F, A> {
            type Output = Evaluation<F, A>;
            #[inline]
            fn $op(self, rhs: Evaluation<F, A>) -> Evaluation<F, A> {
                let mut result = self.clone();
                result.$kernel(&rhs);
                result
            }
        }

        impl<'a, 'b, F: Field, A: Arity> $Op<&'b Evaluation<F, A>> for &'a Evaluation<F, A> {
            type Output = Evaluation<F, A>;
            #[inline]
            fn $op(self, rhs: &'b Evaluation<F, A>) -> Evaluation<F, A> {
                let mut result = self.clone();
                result.$kernel(rhs);
                result
            }
        }

        impl<F: Field, A: Arity> $OpAssign for Evaluation<F, A> {
            #[inline]
            fn $op_assign(&mut self, rhs: Self) {
                self.$kernel(&rhs);
            }
        }

        impl<'b, F: Field, A: Arity> $OpAssign<&'b Evaluation<F, A>> for Evaluation<F, A> {
            #[inline]
            fn $op_assign(&mut self, rhs: &'b Evaluation<F, A>) {
                self.$kernel(rhs);
            }
        }
    };
}

impl_eval_binary_op!(Add, add, AddAssign, add_assign, add_assign_eval);
impl_eval_binary_op!(Sub, sub, SubAssign, sub_assign, sub_assign_eval);
impl_eval_binary_op!(Mul, mul, MulAssign, mul_assign, mul_assign_eval);
impl_eval_binary_op!(Div, div, DivAssign, div_assign, div_assign_eval);
impl_eval_binary_op!(Rem, rem, RemAssign, rem_assign, rem_assign_eval);

impl<F: Field, A: Arity> Neg for Evaluation<F, A> {
    type Output = Self;
    #[inline]
    fn neg(mut self) -> Self {
        self.neg_in_place();
        self
    }
}

impl<'a, F: Field, A: Arity> Neg for &'a Evaluation<F, A> {
    type Output = Evaluation<F, A>;
    #[inline]
    fn neg(self) -> Evaluation<F, A> {
        -self.clone()
    }
}

// Mixed ops: Evaluation<$f, A> with primitive floats. A plain float is a
// constant, so only the kernels that touch the value slot differ from the
// scaling ones.
macro_rules! impl_eval_scalar_op {
    ($f:ty, $Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $kernel:ident, $rkernel:ident) => {
        impl<A: Arity> $Op<$f> for Evaluation<$f, A> {
            type Output = Evaluation<$f, A>;
            #[inline]
            fn $op(mut self, rhs: $f) -> Evaluation<$f, A> {
                self.$kernel(rhs);
                self
            }
        }

        impl<'a, A: Arity> $Op<$f> for &'a Evaluation<$f, A> {
            type Output = Evaluation<$f, A>;
            #[inline]
            fn $op(self, rhs: $f) -> Evaluation<$f, A> {
                let mut result = self.clone();
                result.$kernel(rhs);
                result
            }
        }

        impl<A: Arity> $Op<Evaluation<$f, A>> for $f {
            type Output = Evaluation<$f, A>;
            #[inline]
            fn $op(self, rhs: Evaluation<$f, A>) -> Evaluation<$f, A> {
                rhs.$rkernel(self)
            }
        }

        impl<'b, A: Arity> $Op<&'b Evaluation<$f, A>> for $f {
            type Output = Evaluation<$f, A>;
            #[inline]
            fn $op(self, rhs: &'b Evaluation<$f, A>) -> Evaluation<$f, A> {
                rhs.clone().$rkernel(self)
            }
        }

        impl<A: Arity> $OpAssign<$f> for Evaluation<$f, A> {
            #[inline]
            fn $op_assign(&mut self, rhs: $f) {
                self.$kernel(rhs);
            }
        }
    };
}

macro_rules! impl_eval_scalar_ops {
    ($f:ty) => {
        impl_eval_scalar_op!($f, Add, add, AddAssign, add_assign, add_assign_scalar, radd_scalar);
        impl_eval_scalar_op!($f, Sub, sub, SubAssign, sub_assign, sub_assign_scalar, rsub_scalar);
        impl_eval_scalar_op!($f, Mul, mul, MulAssign, mul_assign, mul_assign_scalar, rmul_scalar);
        impl_eval_scalar_op!($f, Div, div, DivAssign, div_assign, div_assign_scalar, rdiv_scalar);
        impl_eval_scalar_op!($f, Rem, rem, RemAssign, rem_assign, rem_assign_scalar, rrem_scalar);

        impl<A: Arity> PartialEq<$f> for Evaluation<$f, A> {
            #[inline]
            fn eq(&self, other: &$f) -> bool {
                self.value() == *other
            }
        }

        impl<A: Arity> PartialEq<Evaluation<$f, A>> for $f {
            #[inline]
            fn eq(&self, other: &Evaluation<$f, A>) -> bool {
                *self == other.value()
            }
        }

        impl<A: Arity> PartialOrd<$f> for Evaluation<$f, A> {
            #[inline]
            fn partial_cmp(&self, other: &$f) -> Option<Ordering> {
                self.value().partial_cmp(other)
            }
        }

        impl<A: Arity> PartialOrd<Evaluation<$f, A>> for $f {
            #[inline]
            fn partial_cmp(&self, other: &Evaluation<$f, A>) -> Option<Ordering> {
                self.partial_cmp(&other.value())
            }
        }
    };
}

impl_eval_scalar_ops!(f32);
impl_eval_scalar_ops!(f64);

/// Structural equality: value and every derivative.
///
/// Relational operators look at values only, so two evaluations with equal
/// values but different derivatives are neither `<` nor `>` each other and
/// still compare unequal here.
impl<F: Field, A: Arity> PartialEq for Evaluation<F, A> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        debug_assert_eq!(self.size(), other.size(), "arity mismatch");
        self.slots() == other.slots()
    }
}

impl<F: Field, A: Arity> PartialOrd for Evaluation<F, A> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        debug_assert_eq!(self.size(), other.size(), "arity mismatch");
        self.value().partial_cmp(&other.value())
    }
}
