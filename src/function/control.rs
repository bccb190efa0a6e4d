//! Control-flow operators: `; W I = B C E Q`.

use super::{run_to_boolean, run_to_integer, run_to_text};
use crate::env::Environment;
use crate::error::{Error, Result};
use crate::value::Value;

/// `;`: evaluate and discard the left side, return the right.
pub(super) fn then(args: &[Value], env: &mut Environment) -> Result<Value> {
    let lhs = args[0].run(env)?;
    lhs.decrement();
    args[1].run(env)
}

/// `W`: re-evaluate the body while the condition coerces true. Yields null.
pub(super) fn while_loop(args: &[Value], env: &mut Environment) -> Result<Value> {
    while run_to_boolean(args[0], env)? {
        let body = args[1].run(env)?;
        body.decrement();
    }
    Ok(Value::NULL)
}

/// `I`: evaluate and return the branch the condition selects.
pub(super) fn if_else(args: &[Value], env: &mut Environment) -> Result<Value> {
    if run_to_boolean(args[0], env)? {
        args[1].run(env)
    } else {
        args[2].run(env)
    }
}

/// `=`: assign into the (unevaluated) left-side variable, returning the
/// assigned value. One reference goes to the cell, one to the caller.
pub(super) fn assign(args: &[Value], env: &mut Environment) -> Result<Value> {
    let Some(variable) = args[0].as_variable() else {
        return Err(Error::invalid_type('=', args[0].type_name()));
    };
    let value = args[1].run(env)?;
    value.increment();
    variable.assign(value);
    Ok(value)
}

/// `B`: return the argument without evaluating it.
pub(super) fn block(args: &[Value], _env: &mut Environment) -> Result<Value> {
    args[0].increment();
    Ok(args[0])
}

/// `C`: evaluate the argument, then evaluate its result. Calling a
/// non-block is just a second (idempotent) evaluation.
pub(super) fn call(args: &[Value], env: &mut Environment) -> Result<Value> {
    let value = args[0].run(env)?;
    let result = value.run(env);
    value.decrement();
    result
}

/// `E`: coerce to a string and play it as a fresh program.
pub(super) fn evaluate(args: &[Value], env: &mut Environment) -> Result<Value> {
    let source = run_to_text(args[0], env)?;
    crate::play(source.as_bytes(), env)
}

/// `Q`: exit the process with the given status.
pub(super) fn quit(args: &[Value], env: &mut Environment) -> Result<Value> {
    let status = run_to_integer(args[0], env)?;
    if !(0..=255).contains(&status) {
        return Err(Error::domain("exit status outside 0..=255"));
    }
    tracing::debug!(status, "quit");
    std::process::exit(status as i32)
}
