//! Two-phase capillary pressure and relative permeability laws.
//!
//! These are consumers of the AD engine: they are written against
//! [`Scalar`] only and work unchanged for plain floats and for evaluations of
//! either arity. Tabulated curves are supplied by the caller as opaque
//! functions of the wetting saturation.

use std::fmt;

use crate::scalar::Scalar;
use crate::Field;

/// Index of the wetting phase, the pressure reference.
pub const WETTING_PHASE: usize = 0;
/// Index of the non-wetting phase.
pub const NON_WETTING_PHASE: usize = 1;

/// Errors from material laws.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaterialError {
    /// The law cannot perform the named operation.
    NotImplemented(&'static str),
}

impl fmt::Display for MaterialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialError::NotImplemented(op) => write!(f, "not implemented: {}", op),
        }
    }
}

impl std::error::Error for MaterialError {}

/// Parameters of [`LinearMaterial`]: the capillary pressure of each phase at
/// zero and at full saturation. Both default to zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearMaterialParams<F: Field, const P: usize> {
    pc_min_sat: [F; P],
    pc_max_sat: [F; P],
}

impl<F: Field, const P: usize> Default for LinearMaterialParams<F, P> {
    fn default() -> Self {
        LinearMaterialParams {
            pc_min_sat: [F::zero(); P],
            pc_max_sat: [F::zero(); P],
        }
    }
}

impl<F: Field, const P: usize> LinearMaterialParams<F, P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capillary pressure of `phase` at zero saturation.
    pub fn pc_min_sat(&self, phase: usize) -> F {
        self.pc_min_sat[phase]
    }

    pub fn set_pc_min_sat(&mut self, phase: usize, value: F) {
        self.pc_min_sat[phase] = value;
    }

    /// Capillary pressure of `phase` at full saturation.
    pub fn pc_max_sat(&self, phase: usize) -> F {
        self.pc_max_sat[phase]
    }

    pub fn set_pc_max_sat(&mut self, phase: usize, value: F) {
        self.pc_max_sat[phase] = value;
    }
}

/// Capillary pressure linear in each phase's own saturation.
pub struct LinearMaterial;

impl LinearMaterial {
    /// `pc_α = pc_min_sat(α) + S_α (pc_max_sat(α) - pc_min_sat(α))` for every phase.
    pub fn capillary_pressures<E: Scalar, const P: usize>(
        params: &LinearMaterialParams<E::Field, P>,
        saturations: &[E; P],
    ) -> [E; P] {
        std::array::from_fn(|phase| {
            let lo = params.pc_min_sat(phase);
            let hi = params.pc_max_sat(phase);
            let s = &saturations[phase];
            s.clone() * s.constant_like(hi - lo) + s.constant_like(lo)
        })
    }
}

/// Tabulated two-phase law over curves of the wetting saturation.
///
/// The curves are typically spline interpolants; this type only composes
/// them and clamps relative permeabilities into `[0, 1]`.
pub struct TabulatedTwoPhaseMaterial<Pc, Krw, Krn> {
    pcnw: Pc,
    krw: Krw,
    krn: Krn,
}

impl<Pc, Krw, Krn> TabulatedTwoPhaseMaterial<Pc, Krw, Krn> {
    pub fn new(pcnw: Pc, krw: Krw, krn: Krn) -> Self {
        TabulatedTwoPhaseMaterial { pcnw, krw, krn }
    }

    /// Capillary pressure `p_n - p_w` at wetting saturation `sw`.
    pub fn pcnw<E>(&self, sw: &E) -> E
    where
        E: Scalar,
        Pc: Fn(&E) -> E,
    {
        (self.pcnw)(sw)
    }

    /// `[0, pcnw]`: the wetting phase is the reference.
    pub fn capillary_pressures<E>(&self, sw: &E) -> [E; 2]
    where
        E: Scalar,
        Pc: Fn(&E) -> E,
    {
        let zero = sw.constant_like(<E::Field as num_traits::Zero>::zero());
        [zero, self.pcnw(sw)]
    }

    pub fn krw<E>(&self, sw: &E) -> E
    where
        E: Scalar,
        Krw: Fn(&E) -> E,
    {
        clamp_unit((self.krw)(sw))
    }

    /// Non-wetting relative permeability, still tabulated over `sw`.
    pub fn krn<E>(&self, sw: &E) -> E
    where
        E: Scalar,
        Krn: Fn(&E) -> E,
    {
        clamp_unit((self.krn)(sw))
    }

    /// `[krw, krn]` from the non-wetting saturation.
    pub fn relative_permeabilities<E>(&self, sn: &E) -> [E; 2]
    where
        E: Scalar,
        Krw: Fn(&E) -> E,
        Krn: Fn(&E) -> E,
    {
        let one = sn.constant_like(<E::Field as num_traits::One>::one());
        let sw = one - sn.clone();
        [self.krw(&sw), self.krn(&sw)]
    }

    /// Inverting the tabulated capillary pressure curve is not supported.
    pub fn sw_from_pc<E: Scalar>(&self, _pc: &E) -> Result<E, MaterialError> {
        Err(MaterialError::NotImplemented("wetting saturation from capillary pressure"))
    }

    pub fn sn_from_pc<E: Scalar>(&self, pc: &E) -> Result<E, MaterialError> {
        let sw = self.sw_from_pc(pc)?;
        let one = sw.constant_like(<E::Field as num_traits::One>::one());
        Ok(one - sw)
    }
}

fn clamp_unit<E: Scalar>(kr: E) -> E {
    let zero = <E::Field as num_traits::Zero>::zero();
    let one = <E::Field as num_traits::One>::one();
    kr.min_scalar(one).max_scalar(zero)
}
