//! Arithmetic operators: `+ - * / % ^`.
//!
//! All of them are integer operators with checked 61-bit results; `+` also
//! concatenates when its left side is a string, and `*` repeats one.

use super::{run_to_integer, run_to_text};
use crate::env::Environment;
use crate::error::{Error, Result};
use crate::string;
use crate::value::{Integer, Value, ValueKind, INT_MAX, INT_MIN};

/// Narrow a checked i64 result to the 61-bit integer range.
fn checked(result: Option<Integer>) -> Result<Integer> {
    match result {
        Some(n) if (INT_MIN..=INT_MAX).contains(&n) => Ok(n),
        _ => Err(Error::Overflow),
    }
}

pub(super) fn add(args: &[Value], env: &mut Environment) -> Result<Value> {
    let lhs = args[0].run(env)?;
    match lhs.classify() {
        ValueKind::Integer(l) => {
            let r = run_to_integer(args[1], env)?;
            Ok(Value::integer(checked(l.checked_add(r))?))
        }
        ValueKind::String(s) => {
            let rhs = match run_to_text(args[1], env) {
                Ok(text) => text,
                Err(err) => {
                    lhs.decrement();
                    return Err(err);
                }
            };
            // Concatenation with an empty side returns the other side.
            if s.is_empty() {
                lhs.decrement();
                return Ok(rhs.into_value(&mut env.interner));
            }
            if rhs.is_empty() {
                return Ok(lhs);
            }
            let out = env.interner.concat(s.as_bytes(), rhs.as_bytes());
            lhs.decrement();
            Ok(Value::string(out))
        }
        _ => {
            let got = lhs.type_name();
            lhs.decrement();
            Err(Error::invalid_type('+', got))
        }
    }
}

pub(super) fn subtract(args: &[Value], env: &mut Environment) -> Result<Value> {
    let l = integer_lhs('-', args[0], env)?;
    let r = run_to_integer(args[1], env)?;
    Ok(Value::integer(checked(l.checked_sub(r))?))
}

pub(super) fn multiply(args: &[Value], env: &mut Environment) -> Result<Value> {
    let lhs = args[0].run(env)?;
    match lhs.classify() {
        ValueKind::Integer(l) => {
            let r = run_to_integer(args[1], env)?;
            Ok(Value::integer(checked(l.checked_mul(r))?))
        }
        ValueKind::String(s) => {
            let count = match run_to_integer(args[1], env) {
                Ok(n) => n,
                Err(err) => {
                    lhs.decrement();
                    return Err(err);
                }
            };
            if count < 0 {
                lhs.decrement();
                return Err(Error::domain("negative repeat count"));
            }
            if count == 0 {
                lhs.decrement();
                return Ok(Value::literal(&string::EMPTY));
            }
            if count == 1 {
                return Ok(lhs);
            }
            // The result must stay addressable by a Knight integer.
            let total = (s.len() as Integer).checked_mul(count);
            if !matches!(total, Some(n) if n <= INT_MAX) {
                lhs.decrement();
                return Err(Error::Overflow);
            }
            let out = env.interner.repeat(s.as_bytes(), count as usize);
            lhs.decrement();
            Ok(Value::string(out))
        }
        _ => {
            let got = lhs.type_name();
            lhs.decrement();
            Err(Error::invalid_type('*', got))
        }
    }
}

pub(super) fn divide(args: &[Value], env: &mut Environment) -> Result<Value> {
    let l = integer_lhs('/', args[0], env)?;
    let r = run_to_integer(args[1], env)?;
    if r == 0 {
        return Err(Error::DivisionByZero);
    }
    Ok(Value::integer(checked(l.checked_div(r))?))
}

pub(super) fn modulo(args: &[Value], env: &mut Environment) -> Result<Value> {
    let l = integer_lhs('%', args[0], env)?;
    let r = run_to_integer(args[1], env)?;
    if r == 0 {
        return Err(Error::DivisionByZero);
    }
    if r < 0 {
        return Err(Error::NegativeDenominator);
    }
    Ok(Value::integer(checked(l.checked_rem(r))?))
}

pub(super) fn power(args: &[Value], env: &mut Environment) -> Result<Value> {
    let base = integer_lhs('^', args[0], env)?;
    let exponent = run_to_integer(args[1], env)?;
    if exponent < 0 {
        return Err(Error::domain("negative exponent"));
    }
    let result = match base {
        0 => Some(if exponent == 0 { 1 } else { 0 }),
        1 => Some(1),
        -1 => Some(if exponent % 2 == 0 { 1 } else { -1 }),
        // Any other base overflows 61 bits long before the exponent does.
        _ if exponent > 61 => None,
        _ => base.checked_pow(exponent as u32),
    };
    Ok(Value::integer(checked(result)?))
}

/// Evaluate the left side of an integers-only operator.
fn integer_lhs(func: char, arg: Value, env: &mut Environment) -> Result<Integer> {
    let lhs = arg.run(env)?;
    match lhs.as_integer() {
        Some(n) => Ok(n),
        None => {
            let got = lhs.type_name();
            lhs.decrement();
            Err(Error::invalid_type(func, got))
        }
    }
}
