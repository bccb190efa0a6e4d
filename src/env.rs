//! The variable environment.
//!
//! Variables are stable, boxed cells keyed by name. The name bytes are a
//! single `Rc<[u8]>` allocation shared between the map key and the cell.
//! Cells are never moved or dropped before the environment itself: values
//! encode variables by pointer, so `lookup` must return the same address for
//! the same name every time.
//!
//! The environment also owns the string interner and the RNG backing the
//! `R` operator. Every value produced by an environment must be dropped
//! before the environment is.

use std::cell::Cell;
use std::ptr::NonNull;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::intern::Interner;
use crate::value::{Integer, Value};

/// A named cell holding a value, or the undefined sentinel before the first
/// assignment.
pub struct Variable {
    name: Rc<[u8]>,
    value: Cell<Value>,
}

const _: () = assert!(std::mem::align_of::<Variable>() >= 8);

impl Variable {
    /// The variable's name.
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// Read the cell; `None` until the first assignment.
    pub fn fetch(&self) -> Option<Value> {
        let value = self.value.get();
        if value.is_undefined() {
            None
        } else {
            Some(value)
        }
    }

    /// Store `value`, adopting the caller's reference and releasing the
    /// previous occupant.
    pub fn assign(&self, value: Value) {
        let previous = self.value.replace(value);
        if !previous.is_undefined() {
            previous.decrement();
        }
    }
}

/// Owns all variables, the interner, and the RNG for one interpreter.
pub struct Environment {
    variables: FxHashMap<Rc<[u8]>, Box<Variable>>,
    pub(crate) interner: Interner,
    rng: fastrand::Rng,
}

impl Environment {
    /// Create an empty environment with an OS-seeded RNG.
    pub fn new() -> Self {
        Environment {
            variables: FxHashMap::default(),
            interner: Interner::new(),
            rng: fastrand::Rng::new(),
        }
    }

    /// Fetch the cell for `name`, creating an undefined one on first sight.
    /// The returned pointer is stable for the environment's lifetime.
    pub fn lookup(&mut self, name: &[u8]) -> NonNull<Variable> {
        if let Some(variable) = self.variables.get(name) {
            return NonNull::from(&**variable);
        }

        tracing::trace!(name = %String::from_utf8_lossy(name), "new variable");
        let shared: Rc<[u8]> = name.into();
        let variable = Box::new(Variable {
            name: Rc::clone(&shared),
            value: Cell::new(Value::UNDEFINED),
        });
        let ptr = NonNull::from(&*variable);
        self.variables.insert(shared, variable);
        ptr
    }

    /// A non-negative random integer for the `R` operator. Seeded once at
    /// construction; not a security primitive.
    pub fn random(&mut self) -> Integer {
        self.rng.i64(0..=i32::MAX as i64)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

impl Drop for Environment {
    fn drop(&mut self) {
        // Release every held value before the interner tears down the pool.
        for variable in self.variables.values() {
            if let Some(value) = variable.fetch() {
                value.decrement();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_pointer_identity() {
        let mut env = Environment::new();
        let a = env.lookup(b"counter");
        let b = env.lookup(b"counter");
        assert_eq!(a, b, "same name must yield the same cell");
        let c = env.lookup(b"other");
        assert_ne!(a, c);
    }

    #[test]
    fn test_lookup_pointer_survives_growth() {
        let mut env = Environment::new();
        let first = env.lookup(b"pinned");
        for i in 0..256 {
            env.lookup(format!("filler_{}", i).as_bytes());
        }
        assert_eq!(first, env.lookup(b"pinned"));
    }

    #[test]
    fn test_fresh_variable_is_undefined() {
        let mut env = Environment::new();
        let var = env.lookup(b"nothing");
        assert!(unsafe { var.as_ref() }.fetch().is_none());
    }

    #[test]
    fn test_assign_and_fetch() {
        let mut env = Environment::new();
        let var = env.lookup(b"x");
        let var = unsafe { var.as_ref() };
        var.assign(Value::integer(7));
        assert_eq!(var.fetch().unwrap().as_integer(), Some(7));
        var.assign(Value::TRUE);
        assert_eq!(var.fetch().unwrap().as_boolean(), Some(true));
    }

    #[test]
    fn test_assign_releases_previous_string() {
        let mut env = Environment::new();
        let var = env.lookup(b"s");
        let text = env.interner.fetch(b"held by the cell");
        unsafe { var.as_ref() }.assign(Value::string(text));
        assert_eq!(unsafe { text.as_ref() }.refcount(), 2);
        unsafe { var.as_ref() }.assign(Value::NULL);
        // Only the pool reference remains.
        assert_eq!(unsafe { text.as_ref() }.refcount(), 1);
    }

    #[test]
    fn test_variable_name() {
        let mut env = Environment::new();
        let var = env.lookup(b"named");
        assert_eq!(unsafe { var.as_ref() }.name(), b"named");
    }

    #[test]
    fn test_random_is_non_negative() {
        let mut env = Environment::new();
        for _ in 0..64 {
            assert!(env.random() >= 0);
        }
    }
}
