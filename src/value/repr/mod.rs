//! Tagged-word value representation.
//!
//! Every runtime value is a single 64-bit word. The bottom 3 bits are the
//! tag; pointees are aligned to at least 8 bytes, so pointer payloads keep
//! their low bits free:
//!
//! Constant:  0b000 tag, payload selects false / null / true / undefined
//! Integer:   0b001 tag, signed 61-bit payload in the upper bits
//! String:    0b010 tag, pointer to a `KnString`
//! Variable:  0b011 tag, pointer to an environment `Variable`
//! Block:     0b100 tag, pointer to a `Block` call node
//!
//! `FALSE` is the all-zero word. `UNDEFINED` is the sentinel stored in
//! unassigned variable cells; it never escapes a variable read.

mod accessors;
mod constructors;


pub use accessors::ValueKind;

/// The integer type of the interpreter: 61 bits, sign-extended on read.
pub type Integer = i64;

/// Maximum 61-bit signed integer (2^60 - 1).
pub const INT_MAX: Integer = (1 << 60) - 1;

/// Minimum 61-bit signed integer (-2^60).
pub const INT_MIN: Integer = -(1 << 60);

// =============================================================================
// Tag Constants
// =============================================================================

/// Number of low bits used by the tag.
pub(crate) const TAG_BITS: u32 = 3;

/// Mask covering the tag bits.
pub(crate) const TAG_MASK: u64 = (1 << TAG_BITS) - 1;

pub(crate) const TAG_CONSTANT: u64 = 0b000;
pub(crate) const TAG_INTEGER: u64 = 0b001;
pub(crate) const TAG_STRING: u64 = 0b010;
pub(crate) const TAG_VARIABLE: u64 = 0b011;
pub(crate) const TAG_BLOCK: u64 = 0b100;

// Constant payloads, pre-shifted past the tag.
pub(crate) const BITS_FALSE: u64 = TAG_CONSTANT;
pub(crate) const BITS_NULL: u64 = (1 << TAG_BITS) | TAG_CONSTANT;
pub(crate) const BITS_TRUE: u64 = (2 << TAG_BITS) | TAG_CONSTANT;
pub(crate) const BITS_UNDEFINED: u64 = (3 << TAG_BITS) | TAG_CONSTANT;

/// Discriminant view of the tag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Constant,
    Integer,
    String,
    Variable,
    Block,
}

// =============================================================================
// Value Struct
// =============================================================================

/// A Knight runtime value: one tagged machine word.
///
/// Copying a `Value` does not touch refcounts; `increment` / `decrement`
/// are explicit and apply only to the string and block tags.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Value(pub(crate) u64);

// Compile-time layout assertions: the word must stay word-sized and the
// pointees must leave the tag bits free.
const _: () = assert!(std::mem::size_of::<Value>() == 8);
const _: () = assert!(std::mem::align_of::<crate::string::KnString>() >= 8);
const _: () = assert!(std::mem::align_of::<crate::env::Variable>() >= 8);
const _: () = assert!(std::mem::align_of::<crate::function::Block>() >= 8);

impl Value {
    // =========================================================================
    // Constants
    // =========================================================================

    pub const FALSE: Value = Value(BITS_FALSE);
    pub const NULL: Value = Value(BITS_NULL);
    pub const TRUE: Value = Value(BITS_TRUE);

    /// Sentinel for a variable cell that has never been assigned.
    /// Distinguishable from every valid value; never a result of evaluation.
    pub const UNDEFINED: Value = Value(BITS_UNDEFINED);

    // =========================================================================
    // Type Predicates
    // =========================================================================

    /// The tag bits of this value.
    #[inline]
    pub fn tag(self) -> Tag {
        match self.0 & TAG_MASK {
            TAG_CONSTANT => Tag::Constant,
            TAG_INTEGER => Tag::Integer,
            TAG_STRING => Tag::String,
            TAG_VARIABLE => Tag::Variable,
            TAG_BLOCK => Tag::Block,
            _ => unreachable!("invalid tag bits"),
        }
    }

    /// Check if this is the null value.
    #[inline]
    pub fn is_null(self) -> bool {
        self.0 == BITS_NULL
    }

    /// Check if this is a boolean.
    #[inline]
    pub fn is_boolean(self) -> bool {
        self.0 == BITS_TRUE || self.0 == BITS_FALSE
    }

    /// Check if this is the undefined sentinel.
    #[inline]
    pub fn is_undefined(self) -> bool {
        self.0 == BITS_UNDEFINED
    }

    /// Check if this is an integer.
    #[inline]
    pub fn is_integer(self) -> bool {
        self.0 & TAG_MASK == TAG_INTEGER
    }

    /// Check if this is a string.
    #[inline]
    pub fn is_string(self) -> bool {
        self.0 & TAG_MASK == TAG_STRING
    }

    /// Check if this is a variable.
    #[inline]
    pub fn is_variable(self) -> bool {
        self.0 & TAG_MASK == TAG_VARIABLE
    }

    /// Check if this is a block.
    #[inline]
    pub fn is_block(self) -> bool {
        self.0 & TAG_MASK == TAG_BLOCK
    }

    /// The name of this value's type, for error messages.
    pub fn type_name(self) -> &'static str {
        match self.0 & TAG_MASK {
            TAG_CONSTANT => match self.0 {
                BITS_NULL => "null",
                BITS_UNDEFINED => "undefined",
                _ => "boolean",
            },
            TAG_INTEGER => "integer",
            TAG_STRING => "string",
            TAG_VARIABLE => "variable",
            _ => "block",
        }
    }

    /// Get the raw bits (for debugging).
    #[inline]
    pub fn to_bits(self) -> u64 {
        self.0
    }
}
