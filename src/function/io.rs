//! I/O operators: `P O D \` R`.
//!
//! These block the single interpreter thread; there is no asynchrony
//! anywhere in the evaluator.

use std::io::{self, Write};
use std::process::Command;

use super::run_to_text;
use crate::env::Environment;
use crate::error::Result;
use crate::value::Value;

/// `P`: read one line from stdin. EOF yields null; a trailing LF and a
/// CR before it are trimmed.
pub(super) fn prompt(_args: &[Value], env: &mut Environment) -> Result<Value> {
    let mut line = String::new();
    let read = io::stdin().read_line(&mut line)?;
    if read == 0 {
        return Ok(Value::NULL);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Value::string(env.interner.fetch(line.as_bytes())))
}

/// `O`: print the coerced string and a newline, unless the string ends
/// with a backslash: then neither the backslash nor a newline is written.
pub(super) fn output(args: &[Value], env: &mut Environment) -> Result<Value> {
    let text = run_to_text(args[0], env)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match text.as_bytes() {
        [head @ .., b'\\'] => out.write_all(head)?,
        bytes => {
            out.write_all(bytes)?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()?;
    Ok(Value::NULL)
}

/// `D`: print the evaluated argument's debug form and pass it through.
pub(super) fn dump(args: &[Value], env: &mut Environment) -> Result<Value> {
    let value = args[0].run(env)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = write!(out, "{:?}", value).and_then(|()| out.flush()) {
        value.decrement();
        return Err(err.into());
    }
    Ok(value)
}

/// `` ` ``: run the coerced string as a shell command, returning its
/// captured stdout.
pub(super) fn system(args: &[Value], env: &mut Environment) -> Result<Value> {
    let text = run_to_text(args[0], env)?;
    let command = String::from_utf8_lossy(text.as_bytes()).into_owned();
    tracing::debug!(command = %command, "shell");
    let output = Command::new("sh").arg("-c").arg(&command).output()?;
    Ok(Value::string(env.interner.fetch(&output.stdout)))
}

/// `R`: a non-negative random integer.
pub(super) fn random(_args: &[Value], env: &mut Environment) -> Result<Value> {
    Ok(Value::integer(env.random()))
}
