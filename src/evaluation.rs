//! The dense forward-mode AD value type.
//!
//! [`Evaluation<F, A>`] represents `f(x)` together with `∂f/∂x_i` for every
//! tracked variable `i`. Variables are identified purely by position:
//! variable `i` is whatever the caller put in derivative slot `i`, and all
//! evaluations that meet in one computation must agree on that mapping and
//! on the derivative count.

use std::fmt::{self, Debug, Display};

use crate::arity::{Arity, Dynamic, Fixed, DEFAULT_INLINE_SLOTS};
use crate::diagnostics::check_defined;
use crate::Field;

/// A value and its first derivatives with respect to a fixed set of variables.
///
/// The derivative count ("arity") is chosen by the policy `A`: [`Fixed<N>`]
/// makes it part of the type, [`Dynamic`] picks it at construction. Either
/// way it never changes for the lifetime of the evaluation.
pub struct Evaluation<F: Field, A: Arity> {
    pub(crate) data: A::Slots<F>,
}

/// Evaluation with `N` derivatives known at compile time.
pub type FixedEvaluation<F, const N: usize> = Evaluation<F, Fixed<N>>;

/// Evaluation whose derivative count is chosen at run time, storing up to
/// `INLINE` slots (value included) without allocating.
pub type DynamicEvaluation<F, const INLINE: usize = { DEFAULT_INLINE_SLOTS }> =
    Evaluation<F, Dynamic<INLINE>>;

impl<F: Field, A: Arity> Evaluation<F, A> {
    #[inline]
    fn from_slots(data: A::Slots<F>) -> Self {
        Evaluation { data }
    }

    /// An evaluation with `num_derivatives` derivatives and every slot zero.
    #[inline]
    pub fn blank(num_derivatives: usize) -> Self {
        Self::from_slots(A::zeroed(num_derivatives))
    }

    /// A constant function `f(x) = c`: value `c`, all derivatives zero.
    #[inline]
    pub fn constant(num_derivatives: usize, c: F) -> Self {
        let mut result = Self::blank(num_derivatives);
        result.data.as_mut()[0] = c;
        check_defined(result.slots());
        result
    }

    /// The independent variable `var_idx` evaluated at `c`: value `c`,
    /// derivative `var_idx` one, all others zero.
    ///
    /// `var_idx` must be below `num_derivatives`.
    #[inline]
    pub fn variable(num_derivatives: usize, c: F, var_idx: usize) -> Self {
        debug_assert!(
            var_idx < num_derivatives,
            "variable index {} out of range for {} derivatives",
            var_idx,
            num_derivatives
        );
        let mut result = Self::constant(num_derivatives, c);
        result.data.as_mut()[var_idx + 1] = F::one();
        result
    }

    /// An evaluation with the same arity as `other`, every slot zero.
    #[inline]
    pub fn create_blank(other: &Self) -> Self {
        Self::blank(other.size())
    }

    /// An evaluation with the same arity as `self` representing the constant `c`.
    #[inline]
    pub fn constant_like(&self, c: F) -> Self {
        Self::constant(self.size(), c)
    }

    /// Build from an explicit value and derivative vector.
    ///
    /// The arity is `derivatives.len()`; for [`Fixed<N>`] it must equal `N`.
    pub fn from_parts(value: F, derivatives: &[F]) -> Self {
        let mut result = Self::blank(derivatives.len());
        let slots = result.data.as_mut();
        slots[0] = value;
        slots[1..].copy_from_slice(derivatives);
        check_defined(result.slots());
        result
    }

    /// Number of derivatives.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.as_ref().len() - 1
    }

    /// Value followed by the derivatives, contiguous.
    #[inline]
    pub fn slots(&self) -> &[F] {
        self.data.as_ref()
    }

    #[inline]
    pub(crate) fn slots_mut(&mut self) -> &mut [F] {
        self.data.as_mut()
    }

    #[inline]
    pub fn value(&self) -> F {
        self.data.as_ref()[0]
    }

    #[inline]
    pub fn set_value(&mut self, value: F) {
        self.data.as_mut()[0] = value;
    }

    /// `∂f/∂x_var_idx`.
    #[inline]
    pub fn derivative(&self, var_idx: usize) -> F {
        debug_assert!(
            var_idx < self.size(),
            "derivative index {} out of range for {} derivatives",
            var_idx,
            self.size()
        );
        self.data.as_ref()[var_idx + 1]
    }

    #[inline]
    pub fn set_derivative(&mut self, var_idx: usize, derivative: F) {
        debug_assert!(
            var_idx < self.size(),
            "derivative index {} out of range for {} derivatives",
            var_idx,
            self.size()
        );
        self.data.as_mut()[var_idx + 1] = derivative;
        check_defined(self.slots());
    }

    /// All derivatives in variable order.
    #[inline]
    pub fn derivatives(&self) -> &[F] {
        &self.data.as_ref()[1..]
    }

    /// Set every derivative to zero, keeping the value.
    #[inline]
    pub fn clear_derivatives(&mut self) {
        for d in &mut self.data.as_mut()[1..] {
            *d = F::zero();
        }
    }

    /// Overwrite the derivatives with those of `other`, keeping the value.
    #[inline]
    pub fn copy_derivatives(&mut self, other: &Self) {
        debug_assert_eq!(self.size(), other.size(), "arity mismatch");
        self.data.as_mut()[1..].copy_from_slice(other.derivatives());
    }

    /// Replace this quantity with the constant `c`, keeping the arity.
    #[inline]
    pub fn assign(&mut self, c: F) {
        self.set_value(c);
        self.clear_derivatives();
    }

    /// True if no derivative is NaN.
    pub fn is_defined(&self) -> bool {
        crate::diagnostics::first_undefined(self.slots()).is_none()
    }

    /// Compare values only, ignoring derivatives.
    #[inline]
    pub fn value_eq(&self, other: &Self) -> bool {
        debug_assert_eq!(self.size(), other.size(), "arity mismatch");
        self.value() == other.value()
    }

    /// Apply the chain rule: the result has value `f_val` and derivatives
    /// `f_deriv * self.derivative(i)`.
    #[inline]
    pub(crate) fn chain(&self, f_val: F, f_deriv: F) -> Self {
        let mut result = self.clone();
        let slots = result.slots_mut();
        slots[0] = f_val;
        for d in &mut slots[1..] {
            *d = *d * f_deriv;
        }
        result
    }

    // -- In-place kernels shared by every operator form --

    #[inline]
    pub(crate) fn add_assign_eval(&mut self, other: &Self) {
        debug_assert_eq!(self.size(), other.size(), "arity mismatch");
        for (a, &b) in self.slots_mut().iter_mut().zip(other.slots()) {
            *a = *a + b;
        }
    }

    #[inline]
    pub(crate) fn sub_assign_eval(&mut self, other: &Self) {
        debug_assert_eq!(self.size(), other.size(), "arity mismatch");
        for (a, &b) in self.slots_mut().iter_mut().zip(other.slots()) {
            *a = *a - b;
        }
    }

    /// `(uv)' = u'v + uv'`, with `u` and `v` read before the value is overwritten.
    #[inline]
    pub(crate) fn mul_assign_eval(&mut self, other: &Self) {
        debug_assert_eq!(self.size(), other.size(), "arity mismatch");
        let u = self.value();
        let v = other.value();
        let slots = self.slots_mut();
        slots[0] = u * v;
        for (a, &b) in slots[1..].iter_mut().zip(&other.slots()[1..]) {
            *a = *a * v + b * u;
        }
    }

    /// `(u/v)' = (vu' - uv') / v²`, derivatives first, value last.
    #[inline]
    pub(crate) fn div_assign_eval(&mut self, other: &Self) {
        debug_assert_eq!(self.size(), other.size(), "arity mismatch");
        let u = self.value();
        let v = other.value();
        let v2 = v * v;
        let slots = self.slots_mut();
        for (a, &b) in slots[1..].iter_mut().zip(&other.slots()[1..]) {
            *a = (v * *a - u * b) / v2;
        }
        slots[0] = u / v;
    }

    /// Value is the remainder; derivatives stay those of the dividend.
    #[inline]
    pub(crate) fn rem_assign_eval(&mut self, other: &Self) {
        debug_assert_eq!(self.size(), other.size(), "arity mismatch");
        let v = other.value();
        let slots = self.slots_mut();
        slots[0] = slots[0] % v;
    }

    #[inline]
    pub(crate) fn neg_in_place(&mut self) {
        for a in self.slots_mut() {
            *a = -*a;
        }
    }

    #[inline]
    pub(crate) fn add_assign_scalar(&mut self, c: F) {
        let slots = self.slots_mut();
        slots[0] = slots[0] + c;
    }

    #[inline]
    pub(crate) fn sub_assign_scalar(&mut self, c: F) {
        let slots = self.slots_mut();
        slots[0] = slots[0] - c;
    }

    /// `(cu)' = cu'`
    #[inline]
    pub(crate) fn mul_assign_scalar(&mut self, c: F) {
        for a in self.slots_mut() {
            *a = *a * c;
        }
    }

    /// One division, then `n + 1` multiplications.
    #[inline]
    pub(crate) fn div_assign_scalar(&mut self, c: F) {
        self.mul_assign_scalar(F::one() / c);
    }

    #[inline]
    pub(crate) fn rem_assign_scalar(&mut self, c: F) {
        let slots = self.slots_mut();
        slots[0] = slots[0] % c;
    }

    #[inline]
    pub(crate) fn radd_scalar(mut self, c: F) -> Self {
        self.add_assign_scalar(c);
        self
    }

    #[inline]
    pub(crate) fn rmul_scalar(mut self, c: F) -> Self {
        self.mul_assign_scalar(c);
        self
    }

    /// `c - self`
    #[inline]
    pub(crate) fn rsub_scalar(mut self, c: F) -> Self {
        self.neg_in_place();
        self.add_assign_scalar(c);
        self
    }

    /// `c / self`: `(c/v)' = -c v' / v²`
    #[inline]
    pub(crate) fn rdiv_scalar(mut self, c: F) -> Self {
        let v = self.value();
        let factor = -c / (v * v);
        let slots = self.slots_mut();
        for a in &mut slots[1..] {
            *a = *a * factor;
        }
        slots[0] = c / v;
        self
    }

    /// `c % self`: a constant dividend has no derivatives.
    #[inline]
    pub(crate) fn rrem_scalar(mut self, c: F) -> Self {
        let v = self.value();
        self.assign(c % v);
        self
    }
}

impl<F: Field, const N: usize> Evaluation<F, Fixed<N>> {
    /// Build from a value and a derivative array; the arity is implied.
    #[inline]
    pub fn new(value: F, derivatives: [F; N]) -> Self {
        Self::from_parts(value, &derivatives)
    }
}

/// `constant(n, c)` for any arity policy.
#[inline]
pub fn constant<F: Field, A: Arity>(num_derivatives: usize, c: F) -> Evaluation<F, A> {
    Evaluation::constant(num_derivatives, c)
}

/// `variable(n, c, i)` for any arity policy.
#[inline]
pub fn variable<F: Field, A: Arity>(num_derivatives: usize, c: F, var_idx: usize) -> Evaluation<F, A> {
    Evaluation::variable(num_derivatives, c, var_idx)
}

impl<F: Field, A: Arity> Clone for Evaluation<F, A> {
    #[inline]
    fn clone(&self) -> Self {
        Evaluation {
            data: self.data.clone(),
        }
    }

    #[inline]
    fn clone_from(&mut self, source: &Self) {
        if self.size() == source.size() {
            self.slots_mut().copy_from_slice(source.slots());
        } else {
            *self = source.clone();
        }
    }
}

impl<F: Field, const N: usize> Copy for Evaluation<F, Fixed<N>> {}

impl<F: Field, A: Arity> Default for Evaluation<F, A> {
    #[inline]
    fn default() -> Self {
        Self::blank(A::default_size())
    }
}

impl<F: Field, const N: usize> From<F> for Evaluation<F, Fixed<N>> {
    #[inline]
    fn from(value: F) -> Self {
        Self::constant(N, value)
    }
}

impl<F: Field, A: Arity> Debug for Evaluation<F, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluation")
            .field("value", &self.value())
            .field("derivatives", &self.derivatives())
            .finish()
    }
}

/// `v: <value> / d: <d0> <d1> ...`
impl<F: Field, A: Arity> Display for Evaluation<F, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v: {} / d:", self.value())?;
        for d in self.derivatives() {
            write!(f, " {}", d)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod evaluation_serde {
    use super::Evaluation;
    use crate::arity::Arity;
    use crate::diagnostics::DefinedValueChecks;
    use crate::Field;
    use serde::ser::SerializeStruct;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl<F: Field + Serialize, A: Arity> Serialize for Evaluation<F, A> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut s = serializer.serialize_struct("Evaluation", 2)?;
            s.serialize_field("value", &self.value())?;
            s.serialize_field("derivatives", self.derivatives())?;
            s.end()
        }
    }

    impl<'de, F: Field + Deserialize<'de>, A: Arity> Deserialize<'de> for Evaluation<F, A> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            #[derive(Deserialize)]
            struct EvaluationData<F> {
                value: F,
                derivatives: Vec<F>,
            }

            let data = EvaluationData::<F>::deserialize(deserializer)?;
            if let Some(n) = A::FIXED_SIZE {
                if data.derivatives.len() != n {
                    return Err(serde::de::Error::invalid_length(
                        data.derivatives.len(),
                        &&*format!("{n} derivatives"),
                    ));
                }
            }
            if DefinedValueChecks::ACTIVE.is_enabled() {
                if let Some(var_idx) = data.derivatives.iter().position(|d| d.is_nan()) {
                    return Err(serde::de::Error::custom(format_args!(
                        "derivative {} is not a defined value (NaN)",
                        var_idx
                    )));
                }
            }
            Ok(Evaluation::from_parts(data.value, &data.derivatives))
        }
    }
}
