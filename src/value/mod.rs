//! Runtime values: coercions, evaluation, equality, refcounting.
//!
//! The word-level representation lives in [`repr`]; this module layers
//! Knight's semantics on top of it. Coercions follow the language's table:
//!
//! | source    | integer        | boolean    | string            |
//! |-----------|----------------|------------|-------------------|
//! | null      | 0              | false      | "null"            |
//! | boolean   | 0 / 1          | itself     | "false" / "true"  |
//! | integer n | n              | n != 0     | base-10 decimal   |
//! | string s  | leading digits | non-empty  | itself            |
//!
//! Variables and blocks coerce to nothing.

pub mod repr;

pub use repr::{Integer, Tag, Value, ValueKind, INT_MAX, INT_MIN};

use std::fmt;
use std::mem::ManuallyDrop;
use std::ptr::NonNull;

use crate::env::Environment;
use crate::error::{Error, Result};
use crate::function::Block;
use crate::intern::Interner;
use crate::string::{self, KnString};

/// Room for the base-10 form of the minimum integer, sign included.
const INTEGER_BUFFER_LEN: usize = 20;

// =============================================================================
// Text: the to-string intermediate
// =============================================================================

/// The result of coercing a value to a string: either a strong reference to
/// a [`KnString`], or the digits of an integer formatted into a stack
/// buffer. Holders of the string form own one reference, dropped with the
/// `Text`; [`Text::into_value`] interns the buffered form instead.
pub struct Text(TextRepr);

enum TextRepr {
    Str(NonNull<KnString>),
    Digits { buf: [u8; INTEGER_BUFFER_LEN], start: u8 },
}

impl Text {
    fn literal(string: &'static KnString) -> Text {
        Text(TextRepr::Str(NonNull::from(string)))
    }

    fn digits(n: Integer) -> Text {
        let mut buf = [0u8; INTEGER_BUFFER_LEN];
        let negative = n < 0;
        let mut magnitude = n.unsigned_abs();
        let mut start = INTEGER_BUFFER_LEN;
        loop {
            start -= 1;
            buf[start] = b'0' + (magnitude % 10) as u8;
            magnitude /= 10;
            if magnitude == 0 {
                break;
            }
        }
        if negative {
            start -= 1;
            buf[start] = b'-';
        }
        Text(TextRepr::Digits {
            buf,
            start: start as u8,
        })
    }

    /// The coerced bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.0 {
            TextRepr::Str(ptr) => unsafe { ptr.as_ref() }.as_bytes(),
            TextRepr::Digits { buf, start } => &buf[*start as usize..],
        }
    }

    /// Whether the coerced form is empty.
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Turn the intermediate into a string value, interning the digit form.
    /// The string form transfers its reference to the returned value.
    pub(crate) fn into_value(self, interner: &mut Interner) -> Value {
        let this = ManuallyDrop::new(self);
        match &this.0 {
            TextRepr::Str(ptr) => Value::string(*ptr),
            TextRepr::Digits { .. } => Value::string(interner.fetch(this.as_bytes())),
        }
    }
}

impl Drop for Text {
    fn drop(&mut self) {
        if let TextRepr::Str(ptr) = self.0 {
            unsafe { KnString::release(ptr) };
        }
    }
}

// =============================================================================
// Coercions, evaluation, refcounting
// =============================================================================

impl Value {
    /// Coerce to an integer.
    pub fn to_integer(&self) -> Result<Integer> {
        match self.classify() {
            ValueKind::Null | ValueKind::Boolean(false) => Ok(0),
            ValueKind::Boolean(true) => Ok(1),
            ValueKind::Integer(n) => Ok(n),
            ValueKind::String(s) => Ok(s.to_integer()),
            _ => Err(Error::invalid_conversion(self.type_name(), "integer")),
        }
    }

    /// Coerce to a boolean.
    pub fn to_boolean(&self) -> Result<bool> {
        match self.classify() {
            ValueKind::Null => Ok(false),
            ValueKind::Boolean(b) => Ok(b),
            ValueKind::Integer(n) => Ok(n != 0),
            ValueKind::String(s) => Ok(!s.is_empty()),
            _ => Err(Error::invalid_conversion(self.type_name(), "boolean")),
        }
    }

    /// Coerce to a string intermediate. Constant sources and the integers
    /// zero and one come back as shared literals without allocating.
    pub fn to_text(&self) -> Result<Text> {
        match self.classify() {
            ValueKind::Null => Ok(Text::literal(&string::NULL)),
            ValueKind::Boolean(true) => Ok(Text::literal(&string::TRUE)),
            ValueKind::Boolean(false) => Ok(Text::literal(&string::FALSE)),
            ValueKind::Integer(0) => Ok(Text::literal(&string::ZERO)),
            ValueKind::Integer(1) => Ok(Text::literal(&string::ONE)),
            ValueKind::Integer(n) => Ok(Text::digits(n)),
            ValueKind::String(s) => {
                s.increment();
                Ok(Text(TextRepr::Str(NonNull::from(s))))
            }
            _ => Err(Error::invalid_conversion(self.type_name(), "string")),
        }
    }

    /// Evaluate this value.
    ///
    /// Constants and integers are themselves; strings are themselves with a
    /// fresh reference; variables dereference their cell; blocks invoke
    /// their function, which evaluates arguments as its contract dictates.
    pub fn run(self, env: &mut Environment) -> Result<Value> {
        match self.classify() {
            ValueKind::Null | ValueKind::Boolean(_) | ValueKind::Integer(_) => Ok(self),
            ValueKind::String(s) => {
                s.increment();
                Ok(self)
            }
            ValueKind::Variable(variable) => match variable.fetch() {
                Some(value) => {
                    value.increment();
                    Ok(value)
                }
                None => Err(Error::undefined_variable(variable.name())),
            },
            ValueKind::Block(block) => block.run(env),
        }
    }

    /// Equality as used by the `?` operator: bit equality, except that two
    /// strings compare their bytes. Variables and blocks are identity.
    pub fn equals(self, other: Value) -> bool {
        if self == other {
            return true;
        }
        match (self.as_string(), other.as_string()) {
            (Some(lhs), Some(rhs)) => lhs.as_bytes() == rhs.as_bytes(),
            _ => false,
        }
    }

    /// Take a strong reference. A no-op for everything but strings and
    /// blocks.
    pub fn increment(self) {
        if let Some(s) = self.as_string() {
            s.increment();
        } else if let Some(block) = self.as_block() {
            block.increment();
        }
    }

    /// Drop a strong reference, releasing recursively at zero. A no-op for
    /// everything but strings and blocks.
    pub fn decrement(self) {
        if let Some(ptr) = self.string_pointer() {
            unsafe { KnString::release(ptr) };
        } else if let Some(ptr) = self.block_pointer() {
            unsafe { Block::release(ptr) };
        }
    }
}

/// The `D` dump format.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            return write!(f, "Undefined()");
        }
        match self.classify() {
            ValueKind::Null => write!(f, "Null()"),
            ValueKind::Boolean(b) => write!(f, "Boolean({})", b),
            ValueKind::Integer(n) => write!(f, "Integer({})", n),
            ValueKind::String(s) => {
                write!(f, "String({})", String::from_utf8_lossy(s.as_bytes()))
            }
            ValueKind::Variable(variable) => {
                write!(f, "Variable({})", String::from_utf8_lossy(variable.name()))
            }
            ValueKind::Block(block) => write!(f, "Block({})", block.function().name as char),
        }
    }
}
