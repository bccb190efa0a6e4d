//! Typed accessors for extracting payloads out of the tagged word.

use std::ptr::NonNull;

use super::{Integer, Value, BITS_FALSE, BITS_NULL, BITS_TRUE, TAG_BITS, TAG_MASK};
use crate::env::Variable;
use crate::function::Block;
use crate::string::KnString;

/// A safe discriminated view of a [`Value`], borrowed from the word that
/// produced it.
pub enum ValueKind<'a> {
    Null,
    Boolean(bool),
    Integer(Integer),
    String(&'a KnString),
    Variable(&'a Variable),
    Block(&'a Block),
}

impl Value {
    /// Extract as boolean if this is a bool.
    #[inline]
    pub fn as_boolean(self) -> Option<bool> {
        match self.0 {
            BITS_TRUE => Some(true),
            BITS_FALSE => Some(false),
            _ => None,
        }
    }

    /// Extract as integer if this is an integer. The arithmetic shift
    /// sign-extends the 61-bit payload.
    #[inline]
    pub fn as_integer(self) -> Option<Integer> {
        if self.is_integer() {
            Some((self.0 as i64) >> TAG_BITS)
        } else {
            None
        }
    }

    /// Borrow the string if this is a string.
    #[inline]
    pub fn as_string(&self) -> Option<&KnString> {
        if self.is_string() {
            Some(unsafe { &*(self.payload_pointer() as *const KnString) })
        } else {
            None
        }
    }

    /// Borrow the variable cell if this is a variable.
    #[inline]
    pub fn as_variable(&self) -> Option<&Variable> {
        if self.is_variable() {
            Some(unsafe { &*(self.payload_pointer() as *const Variable) })
        } else {
            None
        }
    }

    /// Borrow the block if this is a block.
    #[inline]
    pub fn as_block(&self) -> Option<&Block> {
        if self.is_block() {
            Some(unsafe { &*(self.payload_pointer() as *const Block) })
        } else {
            None
        }
    }

    /// The raw string pointer, for refcount bookkeeping.
    #[inline]
    pub(crate) fn string_pointer(self) -> Option<NonNull<KnString>> {
        if self.is_string() {
            NonNull::new(self.payload_pointer() as *mut KnString)
        } else {
            None
        }
    }

    /// The raw block pointer, for refcount bookkeeping.
    #[inline]
    pub(crate) fn block_pointer(self) -> Option<NonNull<Block>> {
        if self.is_block() {
            NonNull::new(self.payload_pointer() as *mut Block)
        } else {
            None
        }
    }

    /// Classify this value into a safe view over its payload.
    ///
    /// The undefined sentinel is not a value; it must be filtered out by
    /// the variable read path before anything classifies it.
    pub fn classify(&self) -> ValueKind<'_> {
        debug_assert!(!self.is_undefined(), "undefined leaked out of a variable");
        if let Some(b) = self.as_boolean() {
            ValueKind::Boolean(b)
        } else if let Some(n) = self.as_integer() {
            ValueKind::Integer(n)
        } else if let Some(s) = self.as_string() {
            ValueKind::String(s)
        } else if let Some(var) = self.as_variable() {
            ValueKind::Variable(var)
        } else if let Some(block) = self.as_block() {
            ValueKind::Block(block)
        } else {
            debug_assert_eq!(self.0, BITS_NULL);
            ValueKind::Null
        }
    }

    #[inline]
    fn payload_pointer(self) -> u64 {
        self.0 & !TAG_MASK
    }
}
