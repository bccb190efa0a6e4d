//! # Knight
//!
//! A tree-walking interpreter for the Knight programming language: a tiny
//! dynamically typed language whose every construct is a single-character
//! operator of arity 0 to 4.
//!
//! ## Quick Start
//!
//! ```
//! use knight::{play, Environment};
//!
//! let mut env = Environment::new();
//! let result = play(b"; = i 0 ; WHILE < i 5 = i + i 1 : i", &mut env).unwrap();
//! assert_eq!(result.as_integer(), Some(5));
//! ```
//!
//! ## Architecture
//!
//! Evaluation flows through four subsystems:
//!
//! 1. **Value** - a tagged 64-bit word packing constants, 61-bit integers,
//!    and pointers to strings, variables and blocks
//! 2. **String / Interner** - immutable refcounted byte strings with four
//!    storage variants, pooled by content
//! 3. **Environment** - stable named variable cells plus the RNG
//! 4. **Functions** - the 29 built-in operators, dispatched through
//!    refcounted `Block` call nodes
//!
//! ## Memory
//!
//! Strings and blocks are reference counted; everything else is an
//! immediate. The value graph is acyclic by construction (values are
//! immutable and assignment replaces cell contents), so counting alone
//! reclaims everything. Values must not outlive the environment that
//! produced them.

pub mod env;
pub mod error;
pub mod function;
pub mod intern;
pub mod parser;
pub mod string;
pub mod value;

pub use env::{Environment, Variable};
pub use error::{Error, Result};
pub use function::{Block, Function, MAX_ARITY};
pub use intern::Interner;
pub use parser::Parser;
pub use string::{KnString, MAX_EMBED_LENGTH};
pub use value::{Integer, Tag, Text, Value, ValueKind, INT_MAX, INT_MIN};

/// Parse one expression out of `source` and evaluate it.
///
/// Anything after the first expression is ignored; the parsed tree is
/// released once evaluation finishes. The caller owns the returned value
/// and must `decrement` it when done.
pub fn play(source: &[u8], env: &mut Environment) -> Result<Value> {
    tracing::trace!(bytes = source.len(), "play");
    let mut parser = Parser::new(source);
    let expr = parser.next(env)?;
    let result = expr.run(env);
    expr.decrement();
    result
}
