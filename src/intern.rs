//! String interning.
//!
//! The interner owns every heap-allocated [`KnString`]: the pool maps byte
//! contents to a string carrying one strong reference held by the pool
//! itself. That reference is dropped when the interner is torn down, which
//! is when otherwise-unreferenced strings are actually freed.
//!
//! Deduplication is an optimization, not an invariant: only [`Interner::fetch`]
//! promises pointer equality for equal contents. Strings that lose a
//! registration race stay valid, they are just never handed out again.

use std::collections::hash_map::Entry;
use std::ptr::NonNull;

use rustc_hash::FxHashMap;

use crate::string::{self, KnString};

/// Content-addressed pool of heap strings.
pub struct Interner {
    pool: FxHashMap<Box<[u8]>, NonNull<KnString>>,
}

impl Interner {
    pub fn new() -> Self {
        Interner {
            pool: FxHashMap::default(),
        }
    }

    /// Fetch the pooled string for `bytes`, allocating a copy on first
    /// sight. The returned reference belongs to the caller.
    pub fn fetch(&mut self, bytes: &[u8]) -> NonNull<KnString> {
        if bytes.is_empty() {
            return NonNull::from(&string::EMPTY);
        }
        if let Some(&ptr) = self.pool.get(bytes) {
            unsafe { ptr.as_ref() }.increment();
            return ptr;
        }
        let ptr = KnString::from_bytes(bytes).into_raw();
        let registered = self.register(ptr);
        debug_assert!(registered);
        ptr
    }

    /// Concatenate two byte sequences into a fresh registered string.
    pub fn concat(&mut self, lhs: &[u8], rhs: &[u8]) -> NonNull<KnString> {
        let total = lhs.len() + rhs.len();
        if total == 0 {
            return NonNull::from(&string::EMPTY);
        }
        let mut out = KnString::with_capacity(total);
        let buf = out.as_mut_bytes();
        buf[..lhs.len()].copy_from_slice(lhs);
        buf[lhs.len()..].copy_from_slice(rhs);
        let ptr = out.into_raw();
        self.register(ptr);
        ptr
    }

    /// Repeat `src` `count` times into a fresh registered string.
    /// The caller is responsible for keeping `src.len() * count` within the
    /// language's integer range.
    pub fn repeat(&mut self, src: &[u8], count: usize) -> NonNull<KnString> {
        let total = src.len() * count;
        if total == 0 {
            return NonNull::from(&string::EMPTY);
        }
        let mut out = KnString::with_capacity(total);
        let buf = out.as_mut_bytes();
        for chunk in buf.chunks_exact_mut(src.len()) {
            chunk.copy_from_slice(src);
        }
        let ptr = out.into_raw();
        self.register(ptr);
        ptr
    }

    /// Register a zero-copy substring of `owner`. An empty window is the
    /// canonical empty string.
    pub fn substring(&mut self, owner: &KnString, start: usize, len: usize) -> NonNull<KnString> {
        if len == 0 {
            return NonNull::from(&string::EMPTY);
        }
        let ptr = KnString::substring(owner, start, len).into_raw();
        self.register(ptr);
        ptr
    }

    /// Insert a pre-built string into the pool, returning whether it was
    /// new. On a content collision the caller simply keeps an unshared
    /// string; nothing is freed here.
    pub fn register(&mut self, ptr: NonNull<KnString>) -> bool {
        let string = unsafe { ptr.as_ref() };
        match self.pool.entry(string.as_bytes().into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                string.increment();
                slot.insert(ptr);
                true
            }
        }
    }
}

impl Default for Interner {
    fn default() -> Self {
        Interner::new()
    }
}

impl Drop for Interner {
    fn drop(&mut self) {
        for (_, ptr) in self.pool.drain() {
            unsafe { KnString::release(ptr) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_same_bytes_returns_same_pointer() {
        let mut interner = Interner::new();
        let a = interner.fetch(b"hello");
        let b = interner.fetch(b"hello");
        assert_eq!(a, b, "same content should return the same string");
        // One pool reference plus one per fetch.
        assert_eq!(unsafe { a.as_ref() }.refcount(), 3);
        unsafe { KnString::release(a) };
        unsafe { KnString::release(b) };
    }

    #[test]
    fn test_fetch_different_bytes_differ() {
        let mut interner = Interner::new();
        let a = interner.fetch(b"hello");
        let b = interner.fetch(b"world");
        assert_ne!(a, b);
        unsafe { KnString::release(a) };
        unsafe { KnString::release(b) };
    }

    #[test]
    fn test_fetch_empty_is_the_literal() {
        let mut interner = Interner::new();
        let e = interner.fetch(b"");
        assert_eq!(e, NonNull::from(&string::EMPTY));
        assert_eq!(unsafe { e.as_ref() }.refcount(), 1);
    }

    #[test]
    fn test_concat() {
        let mut interner = Interner::new();
        let ab = interner.concat(b"foo", b"bar");
        assert_eq!(unsafe { ab.as_ref() }.as_bytes(), b"foobar");
        assert_eq!(interner.concat(b"", b""), NonNull::from(&string::EMPTY));
        unsafe { KnString::release(ab) };
    }

    #[test]
    fn test_repeat() {
        let mut interner = Interner::new();
        let s = interner.repeat(b"ab", 3);
        assert_eq!(unsafe { s.as_ref() }.as_bytes(), b"ababab");
        assert_eq!(interner.repeat(b"ab", 0), NonNull::from(&string::EMPTY));
        assert_eq!(interner.repeat(b"", 10), NonNull::from(&string::EMPTY));
        unsafe { KnString::release(s) };
    }

    #[test]
    fn test_substring_is_zero_copy() {
        let mut interner = Interner::new();
        let owner = interner.fetch(b"an owner string that is long enough");
        let sub = interner.substring(unsafe { owner.as_ref() }, 3, 5);
        let sub_ref = unsafe { sub.as_ref() };
        assert_eq!(sub_ref.as_bytes(), b"owner");
        assert!(sub_ref.is_substring());
        unsafe { KnString::release(sub) };
        unsafe { KnString::release(owner) };
    }

    #[test]
    fn test_substring_empty_window() {
        let mut interner = Interner::new();
        let owner = interner.fetch(b"text");
        let sub = interner.substring(unsafe { owner.as_ref() }, 2, 0);
        assert_eq!(sub, NonNull::from(&string::EMPTY));
        unsafe { KnString::release(owner) };
    }

    #[test]
    fn test_register_collision_is_non_fatal() {
        let mut interner = Interner::new();
        let pooled = interner.fetch(b"clash");
        let fresh = KnString::from_bytes(b"clash").into_raw();
        assert!(!interner.register(fresh));
        // The loser stays valid and unshared.
        let fresh_ref = unsafe { fresh.as_ref() };
        assert_eq!(fresh_ref.refcount(), 1);
        assert_eq!(fresh_ref.as_bytes(), b"clash");
        // And the pool still hands out the original.
        let again = interner.fetch(b"clash");
        assert_eq!(again, pooled);
        unsafe { KnString::release(fresh) };
        unsafe { KnString::release(pooled) };
        unsafe { KnString::release(again) };
    }

    #[test]
    fn test_drop_releases_pool_references() {
        let mut interner = Interner::new();
        let s = interner.fetch(b"outlives the pool");
        drop(interner);
        // Our reference is now the only one.
        assert_eq!(unsafe { s.as_ref() }.refcount(), 1);
        unsafe { KnString::release(s) };
    }
}
