//! Derivative-count policies and the slot storage behind them.
//!
//! An [`Evaluation`](crate::Evaluation) stores `n + 1` scalars contiguously:
//! slot 0 is the value, slots `1..=n` are the derivatives in variable order.
//! The policy decides where `n` comes from and where the slots live:
//!
//! | policy | `n` decided | storage |
//! |---|---|---|
//! | [`Fixed<N>`] | compile time | inline `[F; N + 1]` (see [`FixedSlots`]) |
//! | [`Dynamic<INLINE>`] | construction time | [`SmallVec`], inline up to `INLINE` slots |

use std::fmt::Debug;

use smallvec::SmallVec;

use crate::Field;

/// Inline slot capacity of [`Dynamic`] when none is given: the value plus
/// eight derivatives fit without touching the heap.
pub const DEFAULT_INLINE_SLOTS: usize = 9;

/// A derivative-count policy.
///
/// Implemented by the marker types [`Fixed`] and [`Dynamic`]; not meant to be
/// implemented outside this crate.
pub trait Arity: Copy + Debug + Default + Send + Sync + 'static {
    /// Contiguous storage for the value followed by the derivatives.
    type Slots<F: Field>: Clone + Debug + AsRef<[F]> + AsMut<[F]>;

    /// `Some(N)` when the derivative count is part of the type.
    const FIXED_SIZE: Option<usize>;

    /// Storage for `num_derivatives` derivatives, every slot zero.
    fn zeroed<F: Field>(num_derivatives: usize) -> Self::Slots<F>;

    /// Derivative count used by `Default`.
    fn default_size() -> usize;
}

/// Compile-time derivative count `N`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Fixed<const N: usize>;

/// Run-time derivative count, with up to `INLINE` slots (value included)
/// stored inline before spilling to the heap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dynamic<const INLINE: usize = { DEFAULT_INLINE_SLOTS }>;

/// Inline storage for a [`Fixed<N>`] evaluation.
///
/// `#[repr(C)]` with a homogeneous element type lays `value` and
/// `derivatives` out back to back, which is what lets the whole thing be
/// viewed as one `[F]` of length `N + 1`.
#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct FixedSlots<F: Field, const N: usize> {
    value: F,
    derivatives: [F; N],
}

impl<F: Field, const N: usize> FixedSlots<F, N> {
    #[inline]
    fn zeroed() -> Self {
        FixedSlots {
            value: F::zero(),
            derivatives: [F::zero(); N],
        }
    }
}

impl<F: Field, const N: usize> AsRef<[F]> for FixedSlots<F, N> {
    #[inline]
    fn as_ref(&self) -> &[F] {
        // SAFETY: `repr(C)` places `derivatives` directly after `value`; both
        // have type `F`, whose size is a multiple of its alignment, so there
        // is no padding and the struct is `N + 1` consecutive `F`s.
        unsafe { std::slice::from_raw_parts(self as *const Self as *const F, N + 1) }
    }
}

impl<F: Field, const N: usize> AsMut<[F]> for FixedSlots<F, N> {
    #[inline]
    fn as_mut(&mut self) -> &mut [F] {
        // SAFETY: see `as_ref`; `&mut self` guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self as *mut Self as *mut F, N + 1) }
    }
}

impl<const N: usize> Arity for Fixed<N> {
    type Slots<F: Field> = FixedSlots<F, N>;

    const FIXED_SIZE: Option<usize> = Some(N);

    #[inline]
    fn zeroed<F: Field>(num_derivatives: usize) -> FixedSlots<F, N> {
        debug_assert_eq!(
            num_derivatives, N,
            "fixed-arity evaluation has {} derivatives, {} requested",
            N, num_derivatives
        );
        FixedSlots::zeroed()
    }

    #[inline]
    fn default_size() -> usize {
        N
    }
}

impl<const INLINE: usize> Arity for Dynamic<INLINE> {
    type Slots<F: Field> = SmallVec<[F; INLINE]>;

    const FIXED_SIZE: Option<usize> = None;

    #[inline]
    fn zeroed<F: Field>(num_derivatives: usize) -> SmallVec<[F; INLINE]> {
        SmallVec::from_elem(F::zero(), num_derivatives + 1)
    }

    #[inline]
    fn default_size() -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_slots_are_contiguous() {
        assert_eq!(
            std::mem::size_of::<FixedSlots<f64, 3>>(),
            4 * std::mem::size_of::<f64>()
        );
        assert_eq!(
            std::mem::size_of::<FixedSlots<f32, 5>>(),
            6 * std::mem::size_of::<f32>()
        );

        let mut slots = Fixed::<3>::zeroed::<f64>(3);
        slots.as_mut()[0] = 1.0;
        slots.as_mut()[3] = 4.0;
        assert_eq!(slots.value, 1.0);
        assert_eq!(slots.derivatives, [0.0, 0.0, 4.0]);
        assert_eq!(slots.as_ref().len(), 4);
    }

    #[test]
    fn fixed_zero_derivatives() {
        let slots = Fixed::<0>::zeroed::<f64>(0);
        assert_eq!(slots.as_ref(), &[0.0]);
    }

    #[test]
    fn dynamic_spills_past_inline_capacity() {
        let small = Dynamic::<4>::zeroed::<f64>(3);
        assert!(!small.spilled());
        assert_eq!(small.len(), 4);

        let big = Dynamic::<4>::zeroed::<f64>(10);
        assert!(big.spilled());
        assert_eq!(big.len(), 11);
        assert!(big.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn default_inline_capacity() {
        assert_eq!(DEFAULT_INLINE_SLOTS, 9);
        let slots = <Dynamic as Arity>::zeroed::<f64>(8);
        assert!(!slots.spilled());
        assert_eq!(slots.inline_size(), DEFAULT_INLINE_SLOTS);
    }
}
