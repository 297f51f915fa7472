//! Defined-value checks for derivative slots.
//!
//! The scan catches NaNs that enter an evaluation through external input
//! (`from_parts`, `set_derivative`, the factories) close to where they
//! appear, instead of many operations later. It is compiled in for debug
//! builds and for release builds with the `defined-value-checks` feature;
//! otherwise [`check_defined`] is a no-op the optimiser removes.

use crate::Field;

/// Whether derivative slots are scanned after construction from external input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DefinedValueChecks {
    /// Every derivative slot is checked; a NaN panics.
    Enabled,
    /// No checks are performed.
    Disabled,
}

impl DefinedValueChecks {
    /// The mode this build was compiled with.
    pub const ACTIVE: DefinedValueChecks =
        if cfg!(any(debug_assertions, feature = "defined-value-checks")) {
            DefinedValueChecks::Enabled
        } else {
            DefinedValueChecks::Disabled
        };

    #[inline]
    pub const fn is_enabled(self) -> bool {
        matches!(self, DefinedValueChecks::Enabled)
    }
}

/// Position of the first NaN among the derivative slots, if any.
///
/// `slots` is the full value-then-derivatives layout; the returned index is a
/// variable index (slot minus one).
pub fn first_undefined<F: Field>(slots: &[F]) -> Option<usize> {
    slots.iter().skip(1).position(|d| d.is_nan())
}

/// Scan the derivative slots when [`DefinedValueChecks::ACTIVE`] is enabled.
#[inline]
#[track_caller]
pub(crate) fn check_defined<F: Field>(slots: &[F]) {
    if DefinedValueChecks::ACTIVE.is_enabled() {
        if let Some(var_idx) = first_undefined(slots) {
            log::error!(
                "undefined derivative {} of {} (value {})",
                var_idx,
                slots.len() - 1,
                slots[0]
            );
            panic!(
                "derivative {} is not a defined value (NaN) in an evaluation with {} derivatives",
                var_idx,
                slots.len() - 1
            );
        }
    }
}
