//! String operators: `L A G S`.

use super::{run_to_integer, run_to_text};
use crate::env::Environment;
use crate::error::{Error, Result};
use crate::string::{self, KnString};
use crate::value::{Integer, Value, ValueKind};

/// `L`: length of the coerced string.
pub(super) fn length(args: &[Value], env: &mut Environment) -> Result<Value> {
    let text = run_to_text(args[0], env)?;
    Ok(Value::integer(text.as_bytes().len() as Integer))
}

/// `A`: integer to one-byte string, or string to its first byte.
pub(super) fn ascii(args: &[Value], env: &mut Environment) -> Result<Value> {
    let value = args[0].run(env)?;
    let result = ascii_inner(value, env);
    value.decrement();
    result
}

fn ascii_inner(value: Value, env: &mut Environment) -> Result<Value> {
    match value.classify() {
        ValueKind::Integer(n) => {
            if !(0..=255).contains(&n) {
                return Err(Error::NotAnAsciiInteger { value: n });
            }
            Ok(Value::string(env.interner.fetch(&[n as u8])))
        }
        ValueKind::String(s) => match s.as_bytes().first() {
            Some(&byte) => Ok(Value::integer(byte as Integer)),
            None => Err(Error::EmptyString),
        },
        _ => Err(Error::invalid_type('A', value.type_name())),
    }
}

/// `G`: substring. Zero-copy when the source is already a string; an
/// empty window is the empty literal.
pub(super) fn get(args: &[Value], env: &mut Environment) -> Result<Value> {
    let source = args[0].run(env)?;
    let result = get_inner(source, args, env);
    source.decrement();
    result
}

fn get_inner(source: Value, args: &[Value], env: &mut Environment) -> Result<Value> {
    let (start, length) = window(args, env)?;

    if let Some(s) = source.as_string() {
        if start + length > s.len() {
            return Err(Error::out_of_bounds(start + length, s.len()));
        }
        return Ok(Value::string(env.interner.substring(s, start, length)));
    }

    let text = source.to_text()?;
    let bytes = text.as_bytes();
    if start + length > bytes.len() {
        return Err(Error::out_of_bounds(start + length, bytes.len()));
    }
    Ok(Value::string(env.interner.fetch(&bytes[start..start + length])))
}

/// `S`: replace the `[start, start + length)` window with the coerced
/// replacement, concatenating the three pieces into one fresh string.
pub(super) fn set(args: &[Value], env: &mut Environment) -> Result<Value> {
    let source = args[0].run(env)?;
    let result = set_inner(source, args, env);
    source.decrement();
    result
}

fn set_inner(source: Value, args: &[Value], env: &mut Environment) -> Result<Value> {
    let (start, length) = window(args, env)?;
    let text = source.to_text()?;
    let replacement = run_to_text(args[3], env)?;

    let bytes = text.as_bytes();
    if start + length > bytes.len() {
        return Err(Error::out_of_bounds(start + length, bytes.len()));
    }

    let repl = replacement.as_bytes();
    let total = bytes.len() - length + repl.len();
    if total == 0 {
        return Ok(Value::literal(&string::EMPTY));
    }

    let mut out = KnString::with_capacity(total);
    let buf = out.as_mut_bytes();
    buf[..start].copy_from_slice(&bytes[..start]);
    buf[start..start + repl.len()].copy_from_slice(repl);
    buf[start + repl.len()..].copy_from_slice(&bytes[start + length..]);

    let ptr = out.into_raw();
    env.interner.register(ptr);
    Ok(Value::string(ptr))
}

/// Evaluate the start and length arguments of `G`/`S`; both must be
/// non-negative.
fn window(args: &[Value], env: &mut Environment) -> Result<(usize, usize)> {
    let start = run_to_integer(args[1], env)?;
    let length = run_to_integer(args[2], env)?;
    if start < 0 || length < 0 {
        return Err(Error::domain("negative substring bounds"));
    }
    Ok((start as usize, length as usize))
}
