//! Value constructors for immediates and the three pointer flavors.

use std::ptr::NonNull;

use super::{
    Integer, Value, INT_MAX, INT_MIN, TAG_BITS, TAG_BLOCK, TAG_MASK, TAG_STRING, TAG_VARIABLE,
};
use crate::env::Variable;
use crate::function::Block;
use crate::string::KnString;

impl Value {
    /// Create an integer value.
    ///
    /// Out-of-range integers are a caller bug; arithmetic operators
    /// range-check before constructing and report overflow themselves.
    #[inline]
    pub fn integer(n: Integer) -> Self {
        debug_assert!(
            (INT_MIN..=INT_MAX).contains(&n),
            "integer {} out of 61-bit range",
            n
        );
        Value(((n << TAG_BITS) as u64) | super::TAG_INTEGER)
    }

    /// Create a boolean value.
    #[inline]
    pub fn boolean(b: bool) -> Self {
        if b {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }

    /// Tag a string pointer, adopting one strong reference from the caller.
    #[inline]
    pub fn string(ptr: NonNull<KnString>) -> Self {
        Value::tag_pointer(ptr.as_ptr() as u64, TAG_STRING)
    }

    /// Tag one of the static literal strings.
    #[inline]
    pub fn literal(string: &'static KnString) -> Self {
        Value::tag_pointer(string as *const KnString as u64, TAG_STRING)
    }

    /// Tag a variable pointer. Variables are owned by the environment and
    /// carry no refcount.
    #[inline]
    pub fn variable(ptr: NonNull<Variable>) -> Self {
        Value::tag_pointer(ptr.as_ptr() as u64, TAG_VARIABLE)
    }

    /// Tag a block pointer, adopting one strong reference from the caller.
    #[inline]
    pub fn block(ptr: NonNull<Block>) -> Self {
        Value::tag_pointer(ptr.as_ptr() as u64, TAG_BLOCK)
    }

    #[inline]
    fn tag_pointer(addr: u64, tag: u64) -> Self {
        debug_assert_eq!(addr & TAG_MASK, 0, "pointer is not 8-byte aligned");
        Value(addr | tag)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::boolean(b)
    }
}

impl From<Integer> for Value {
    fn from(n: Integer) -> Self {
        Value::integer(n)
    }
}

impl From<&'static KnString> for Value {
    fn from(string: &'static KnString) -> Self {
        Value::literal(string)
    }
}
