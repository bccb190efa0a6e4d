//! Shared helpers for running Knight programs in tests.
//!
//! Each helper builds a fresh environment, plays one program, and extracts
//! the result into an owned Rust value before the environment drops.

#![allow(dead_code)]

use knight::{play, Environment, Error, Integer, Value};

/// Evaluate a program expected to yield an integer.
pub fn eval_int(source: &str) -> Integer {
    with_result(source, |value| {
        value
            .as_integer()
            .unwrap_or_else(|| panic!("expected an integer from {:?}, got {:?}", source, value))
    })
}

/// Evaluate a program expected to yield a boolean.
pub fn eval_bool(source: &str) -> bool {
    with_result(source, |value| {
        value
            .as_boolean()
            .unwrap_or_else(|| panic!("expected a boolean from {:?}, got {:?}", source, value))
    })
}

/// Evaluate a program expected to yield a string; returns an owned copy.
pub fn eval_string(source: &str) -> String {
    with_result(source, |value| {
        let s = value
            .as_string()
            .unwrap_or_else(|| panic!("expected a string from {:?}, got {:?}", source, value));
        String::from_utf8_lossy(s.as_bytes()).into_owned()
    })
}

/// Evaluate a program expected to yield null.
pub fn eval_null(source: &str) {
    with_result(source, |value| {
        assert!(value.is_null(), "expected null from {:?}, got {:?}", source, value);
    });
}

/// Evaluate a program and return its dump form.
pub fn eval_dump(source: &str) -> String {
    with_result(source, |value| format!("{:?}", value))
}

/// Evaluate a program expected to fail.
pub fn eval_err(source: &str) -> Error {
    let mut env = Environment::new();
    match play(source.as_bytes(), &mut env) {
        Ok(value) => {
            let dump = format!("{:?}", value);
            value.decrement();
            panic!("expected {:?} to fail, got {}", source, dump)
        }
        Err(err) => err,
    }
}

fn with_result<T>(source: &str, extract: impl FnOnce(Value) -> T) -> T {
    let mut env = Environment::new();
    let value = play(source.as_bytes(), &mut env)
        .unwrap_or_else(|err| panic!("program {:?} failed: {}", source, err));
    let out = extract(value);
    value.decrement();
    out
}
