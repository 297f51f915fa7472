//! Dense forward-mode automatic differentiation.
//!
//! An [`Evaluation`] carries a value together with its partial derivatives
//! with respect to a small, fixed set of independent variables, and
//! propagates them through arithmetic by the chain rule. The derivative
//! count is either part of the type ([`Fixed<N>`]) or chosen at
//! construction ([`Dynamic`]); both share one operation set.
//!
//! ```
//! use densead::FixedEvaluation;
//!
//! let a = FixedEvaluation::<f64, 2>::variable(2, 3.0, 0);
//! let b = FixedEvaluation::<f64, 2>::variable(2, 4.0, 1);
//! let p = a * b;
//! assert_eq!(p.value(), 12.0);
//! assert_eq!(p.derivatives(), &[4.0, 3.0]);
//! ```

pub mod arity;
pub mod diagnostics;
pub mod evaluation;
pub mod field;
pub mod material;
mod math;
pub mod registry;
pub mod scalar;
mod traits;

pub use arity::{Arity, Dynamic, Fixed, DEFAULT_INLINE_SLOTS};
pub use diagnostics::DefinedValueChecks;
pub use evaluation::{constant, variable, DynamicEvaluation, Evaluation, FixedEvaluation};
pub use field::Field;
pub use registry::{RegistryError, VariableRegistry};
pub use scalar::Scalar;

/// Run-time arity evaluation over `f64`.
pub type DynamicEvaluation64 = DynamicEvaluation<f64>;
/// Run-time arity evaluation over `f32`.
pub type DynamicEvaluation32 = DynamicEvaluation<f32>;
