//! Boolean operators: `! & |`.
//!
//! `&` and `|` short-circuit: the left side is evaluated and returned
//! unchanged when it decides the result; only then is the right side
//! evaluated and returned.

use super::run_to_boolean;
use crate::env::Environment;
use crate::error::Result;
use crate::value::Value;

pub(super) fn not(args: &[Value], env: &mut Environment) -> Result<Value> {
    Ok(Value::boolean(!run_to_boolean(args[0], env)?))
}

pub(super) fn and(args: &[Value], env: &mut Environment) -> Result<Value> {
    let lhs = args[0].run(env)?;
    match lhs.to_boolean() {
        Ok(true) => {
            lhs.decrement();
            args[1].run(env)
        }
        Ok(false) => Ok(lhs),
        Err(err) => {
            lhs.decrement();
            Err(err)
        }
    }
}

pub(super) fn or(args: &[Value], env: &mut Environment) -> Result<Value> {
    let lhs = args[0].run(env)?;
    match lhs.to_boolean() {
        Ok(true) => Ok(lhs),
        Ok(false) => {
            lhs.decrement();
            args[1].run(env)
        }
        Err(err) => {
            lhs.decrement();
            Err(err)
        }
    }
}
