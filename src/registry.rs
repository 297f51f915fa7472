//! Slot bookkeeping for the physics layer.
//!
//! Evaluations identify variables only by slot index. A [`VariableRegistry`]
//! hands out those indices for named quantities and keeps them stable, so
//! every evaluation built through it agrees on which slot means what.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::arity::Arity;
use crate::evaluation::Evaluation;
use crate::Field;

/// Errors from [`VariableRegistry`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// The key already owns a slot.
    Duplicate {
        /// Slot already assigned to the key.
        index: usize,
    },
    /// The key was never registered.
    Unknown,
    /// The registry has reached its slot limit.
    Full {
        /// Maximum number of variables.
        limit: usize,
    },
    /// The registry arity does not match the fixed arity of the requested
    /// evaluation type.
    ArityMismatch {
        /// Number of registered variables.
        registered: usize,
        /// Derivative count of the evaluation type.
        expected: usize,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Duplicate { index } => {
                write!(f, "variable already registered at slot {}", index)
            }
            RegistryError::Unknown => write!(f, "variable is not registered"),
            RegistryError::Full { limit } => {
                write!(f, "variable registry is full ({} variables)", limit)
            }
            RegistryError::ArityMismatch {
                registered,
                expected,
            } => write!(
                f,
                "registry tracks {} variables but the evaluation type has {} derivatives",
                registered, expected
            ),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Assigns consecutive derivative slots to keys, in registration order.
///
/// The registry's [`len`](Self::len) is the arity of every evaluation it
/// builds.
#[derive(Clone, Debug)]
pub struct VariableRegistry<K> {
    slots: HashMap<K, usize>,
    keys: Vec<K>,
    limit: Option<usize>,
}

impl<K> Default for VariableRegistry<K> {
    fn default() -> Self {
        VariableRegistry {
            slots: HashMap::new(),
            keys: Vec::new(),
            limit: None,
        }
    }
}

impl<K: Eq + Hash + Clone + fmt::Debug> VariableRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that refuses to grow past `limit` variables, e.g. the `N`
    /// of the fixed-arity evaluations it feeds.
    pub fn with_capacity_limit(limit: usize) -> Self {
        VariableRegistry {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Assign the next free slot to `key`.
    pub fn register(&mut self, key: K) -> Result<usize, RegistryError> {
        if let Some(&index) = self.slots.get(&key) {
            return Err(RegistryError::Duplicate { index });
        }
        if let Some(limit) = self.limit {
            if self.keys.len() >= limit {
                return Err(RegistryError::Full { limit });
            }
        }
        let index = self.keys.len();
        log::debug!("registered variable {:?} at slot {}", key, index);
        self.slots.insert(key.clone(), index);
        self.keys.push(key);
        Ok(index)
    }

    /// Slot of `key`, if registered.
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.slots.get(key).copied()
    }

    /// Number of registered variables.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Registered keys in slot order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    fn check_arity<A: Arity>(&self) -> Result<(), RegistryError> {
        match A::FIXED_SIZE {
            Some(expected) if expected != self.len() => Err(RegistryError::ArityMismatch {
                registered: self.len(),
                expected,
            }),
            _ => Ok(()),
        }
    }

    /// The evaluation that *is* variable `key`, valued `value`.
    pub fn variable<F: Field, A: Arity>(
        &self,
        key: &K,
        value: F,
    ) -> Result<Evaluation<F, A>, RegistryError> {
        self.check_arity::<A>()?;
        let index = self.index_of(key).ok_or(RegistryError::Unknown)?;
        Ok(Evaluation::variable(self.len(), value, index))
    }

    /// A constant with this registry's arity.
    pub fn constant<F: Field, A: Arity>(&self, value: F) -> Result<Evaluation<F, A>, RegistryError> {
        self.check_arity::<A>()?;
        Ok(Evaluation::constant(self.len(), value))
    }
}
