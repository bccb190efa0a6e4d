//! Immutable, reference-counted byte strings.
//!
//! Knight strings are ASCII byte sequences that never change after their
//! single initializing write. One of four storage variants is picked at
//! construction and fixed for the string's lifetime:
//!
//! - `Embed`: up to [`MAX_EMBED_LENGTH`] bytes stored inline in the struct.
//! - `Literal`: borrows `'static` bytes; the refcount is advisory and the
//!   struct is never freed.
//! - `Owned`: a heap buffer, used only when the bytes do not fit inline.
//! - `Substring`: a zero-copy view into another string, holding a strong
//!   reference on its owner.
//!
//! Strings are handed around as raw [`NonNull`] pointers tagged into
//! [`crate::value::Value`] words; the refcount protocol (`increment` /
//! `release`) is what keeps those pointers valid.

use std::cell::Cell;
use std::ptr::NonNull;

use crate::value::{Integer, INT_MIN};

/// Longest byte sequence stored inline. Chosen so the embed payload matches
/// the largest pointer-bearing variant (substring: pointer + start + len).
pub const MAX_EMBED_LENGTH: usize = 23;

/// The canonical empty string.
pub static EMPTY: KnString = KnString::literal(b"");

/// Shared literals for constant-to-string coercions.
pub static TRUE: KnString = KnString::literal(b"true");
pub static FALSE: KnString = KnString::literal(b"false");
pub static NULL: KnString = KnString::literal(b"null");
pub static ZERO: KnString = KnString::literal(b"0");
pub static ONE: KnString = KnString::literal(b"1");

/// Storage variant. The length of a non-embed string is derived from the
/// variant payload rather than stored redundantly.
enum Repr {
    Embed {
        len: u8,
        buf: [u8; MAX_EMBED_LENGTH],
    },
    Literal(&'static [u8]),
    Owned(Box<[u8]>),
    Substring {
        owner: NonNull<KnString>,
        start: usize,
        len: usize,
    },
}

/// A refcounted immutable Knight string.
pub struct KnString {
    rc: Cell<u32>,
    repr: Repr,
}

// The interpreter is single-threaded. Sync exists solely so the literal
// singletons above can be statics; literal refcounts are never written.
unsafe impl Sync for KnString {}

// Tagged values steal the low three pointer bits.
const _: () = assert!(std::mem::align_of::<KnString>() >= 8);

/// Bytes Knight's integer parser treats as leading whitespace.
pub(crate) fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

impl KnString {
    /// Create a never-freed string borrowing static bytes.
    pub const fn literal(bytes: &'static [u8]) -> KnString {
        KnString {
            rc: Cell::new(1),
            repr: Repr::Literal(bytes),
        }
    }

    /// Adopt a heap buffer that is too long to embed.
    pub(crate) fn owned(buf: Box<[u8]>) -> Box<KnString> {
        debug_assert!(buf.len() > MAX_EMBED_LENGTH);
        Box::new(KnString {
            rc: Cell::new(1),
            repr: Repr::Owned(buf),
        })
    }

    /// Copy `bytes` into a fresh string, embedding when they fit.
    pub(crate) fn from_bytes(bytes: &[u8]) -> Box<KnString> {
        if bytes.len() <= MAX_EMBED_LENGTH {
            let mut buf = [0u8; MAX_EMBED_LENGTH];
            buf[..bytes.len()].copy_from_slice(bytes);
            Box::new(KnString {
                rc: Cell::new(1),
                repr: Repr::Embed {
                    len: bytes.len() as u8,
                    buf,
                },
            })
        } else {
            KnString::owned(bytes.into())
        }
    }

    /// Allocate a zeroed string of exactly `len` bytes, to be filled once
    /// through [`KnString::as_mut_bytes`] before it is shared.
    pub(crate) fn with_capacity(len: usize) -> Box<KnString> {
        if len <= MAX_EMBED_LENGTH {
            Box::new(KnString {
                rc: Cell::new(1),
                repr: Repr::Embed {
                    len: len as u8,
                    buf: [0u8; MAX_EMBED_LENGTH],
                },
            })
        } else {
            KnString::owned(vec![0u8; len].into_boxed_slice())
        }
    }

    /// Create a zero-copy view of `owner[start..start + len]`, bumping the
    /// owner's refcount.
    ///
    /// Preconditions: `len > 0` and `start + len <= owner.len()`.
    pub(crate) fn substring(owner: &KnString, start: usize, len: usize) -> Box<KnString> {
        debug_assert!(len > 0);
        debug_assert!(start + len <= owner.len());
        owner.increment();
        Box::new(KnString {
            rc: Cell::new(1),
            repr: Repr::Substring {
                owner: NonNull::from(owner),
                start,
                len,
            },
        })
    }

    /// Hand the string over to pointer-based refcount management.
    pub(crate) fn into_raw(self: Box<KnString>) -> NonNull<KnString> {
        NonNull::from(Box::leak(self))
    }

    /// The one mutable window: fill the bytes of a freshly allocated string.
    /// Callable only while the string is still uniquely owned.
    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8] {
        debug_assert_eq!(self.rc.get(), 1);
        match &mut self.repr {
            Repr::Embed { len, buf } => &mut buf[..*len as usize],
            Repr::Owned(buf) => buf,
            Repr::Literal(_) | Repr::Substring { .. } => {
                unreachable!("literal and substring bytes are never writable")
            }
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Embed { len, .. } => *len as usize,
            Repr::Literal(bytes) => bytes.len(),
            Repr::Owned(buf) => buf.len(),
            Repr::Substring { len, .. } => *len,
        }
    }

    /// Whether the string is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The string's bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.repr {
            Repr::Embed { len, buf } => &buf[..*len as usize],
            Repr::Literal(bytes) => bytes,
            Repr::Owned(buf) => buf,
            Repr::Substring { owner, start, len } => {
                // The strong reference taken at construction keeps the owner
                // alive for at least as long as this view.
                let owner = unsafe { owner.as_ref() };
                &owner.as_bytes()[*start..*start + *len]
            }
        }
    }

    /// Knight's string-to-integer rule: optional leading whitespace, an
    /// optional sign, then the maximal digit run. No digits, or a value
    /// outside the 61-bit range, yields 0.
    pub fn to_integer(&self) -> Integer {
        let bytes = self.as_bytes();
        let mut pos = 0;
        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }

        let negative = match bytes.get(pos) {
            Some(b'-') => {
                pos += 1;
                true
            }
            Some(b'+') => {
                pos += 1;
                false
            }
            _ => false,
        };

        // Accumulate negated so the minimum integer parses without overflow.
        let mut seen_digit = false;
        let mut value: Integer = 0;
        while let Some(&byte) = bytes.get(pos) {
            if !byte.is_ascii_digit() {
                break;
            }
            seen_digit = true;
            pos += 1;
            value = match value
                .checked_mul(10)
                .and_then(|v| v.checked_sub((byte - b'0') as Integer))
            {
                Some(v) if v >= INT_MIN => v,
                _ => return 0,
            };
        }

        if !seen_digit {
            0
        } else if negative {
            value
        } else if value == INT_MIN {
            // The magnitude of the minimum integer exceeds the maximum.
            0
        } else {
            -value
        }
    }

    /// Current refcount. Literal refcounts are frozen at 1.
    pub fn refcount(&self) -> u32 {
        self.rc.get()
    }

    /// Take another strong reference. A no-op for literals.
    pub fn increment(&self) {
        if matches!(self.repr, Repr::Literal(_)) {
            return;
        }
        self.rc.set(self.rc.get() + 1);
    }

    pub(crate) fn is_embedded(&self) -> bool {
        matches!(self.repr, Repr::Embed { .. })
    }

    pub(crate) fn is_literal(&self) -> bool {
        matches!(self.repr, Repr::Literal(_))
    }

    pub(crate) fn is_substring(&self) -> bool {
        matches!(self.repr, Repr::Substring { .. })
    }

    /// Drop one strong reference, freeing the string when the last one
    /// goes away. Owned buffers are released with the node; substrings
    /// release their owner. Literals are exempt from the whole protocol.
    ///
    /// # Safety
    ///
    /// `ptr` must have come from [`KnString::into_raw`] (or point at a
    /// literal) and carry a reference the caller owns.
    pub(crate) unsafe fn release(ptr: NonNull<KnString>) {
        let string = ptr.as_ref();
        if matches!(string.repr, Repr::Literal(_)) {
            return;
        }

        let rc = string.rc.get();
        debug_assert!(rc > 0);
        if rc > 1 {
            string.rc.set(rc - 1);
            return;
        }

        let inner = *Box::from_raw(ptr.as_ptr());
        if let Repr::Substring { owner, .. } = inner.repr {
            KnString::release(owner);
        }
    }
}
