use std::fmt::{Debug, Display};

use num_traits::{Float as NumFloat, FloatConst, FromPrimitive};

/// The scalar field an [`Evaluation`](crate::Evaluation) is built over.
///
/// Bundles the numeric and utility traits the arithmetic engine relies on.
/// Only the primitive IEEE-754 types implement this; evaluations themselves
/// do not, so a field can never be an evaluation in disguise.
pub trait Field:
    NumFloat + FloatConst + FromPrimitive + Copy + Send + Sync + Default + Debug + Display + 'static
{
    /// Convert an `f64` literal into this field.
    ///
    /// Every constant used by the chain-rule code is representable in `f32`.
    #[inline]
    fn lit(x: f64) -> Self {
        <Self as FromPrimitive>::from_f64(x).unwrap_or_else(Self::nan)
    }
}

impl Field for f32 {}
impl Field for f64 {}
