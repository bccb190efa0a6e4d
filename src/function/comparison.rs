//! Comparison operators: `< > ?`.
//!
//! Ordering follows the left side's type: integer order, boolean order
//! (false < true), or lexicographic byte order; the right side is coerced
//! to match. Equality never coerces.

use std::cmp::Ordering;

use super::{run_to_boolean, run_to_integer, run_to_text};
use crate::env::Environment;
use crate::error::{Error, Result};
use crate::value::{Value, ValueKind};

pub(super) fn less(args: &[Value], env: &mut Environment) -> Result<Value> {
    let lhs = args[0].run(env)?;
    let order = compare('<', lhs, args[1], env);
    lhs.decrement();
    Ok(Value::boolean(order? == Ordering::Less))
}

pub(super) fn greater(args: &[Value], env: &mut Environment) -> Result<Value> {
    let lhs = args[0].run(env)?;
    let order = compare('>', lhs, args[1], env);
    lhs.decrement();
    Ok(Value::boolean(order? == Ordering::Greater))
}

fn compare(func: char, lhs: Value, rhs: Value, env: &mut Environment) -> Result<Ordering> {
    match lhs.classify() {
        ValueKind::Integer(l) => Ok(l.cmp(&run_to_integer(rhs, env)?)),
        ValueKind::Boolean(l) => Ok(l.cmp(&run_to_boolean(rhs, env)?)),
        ValueKind::String(s) => {
            let r = run_to_text(rhs, env)?;
            Ok(s.as_bytes().cmp(r.as_bytes()))
        }
        _ => Err(Error::invalid_type(func, lhs.type_name())),
    }
}

pub(super) fn equals(args: &[Value], env: &mut Environment) -> Result<Value> {
    let lhs = args[0].run(env)?;
    let rhs = match args[1].run(env) {
        Ok(value) => value,
        Err(err) => {
            lhs.decrement();
            return Err(err);
        }
    };
    let equal = lhs.equals(rhs);
    lhs.decrement();
    rhs.decrement();
    Ok(Value::boolean(equal))
}
