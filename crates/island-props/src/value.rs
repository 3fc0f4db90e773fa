// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory prop values.
//!
//! Composite values live behind [`Shared`] handles: clones of a handle point
//! at the same container, which is what lets a props tree reuse a value in two
//! places (or, by mistake, contain itself).

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use num_bigint::BigInt;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use regex::Regex;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Keyed record, insertion ordered.
pub type Record = IndexMap<String, PropValue>;

/// Identity-bearing handle to a mutable composite.
pub struct Shared<T>(Arc<RwLock<T>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }

    /// Identity of the underlying container (stable while any handle lives).
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    /// Returns true if both handles point at the same container.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write()
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: PartialEq> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.read() == *other.read()
    }
}

thread_local! {
    static FORMATTING: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id();
        let entered = FORMATTING.with(|set| set.borrow_mut().insert(id));
        if !entered {
            return write!(f, "<cycle {:#x}>", id);
        }
        let result = fmt::Debug::fmt(&*self.read(), f);
        FORMATTING.with(|set| set.borrow_mut().remove(&id));
        result
    }
}

/// Pattern matcher, identified by its source text.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    compiled: Option<Regex>,
}

impl Pattern {
    /// Wrap a pattern source. Sources outside the `regex` dialect are kept
    /// verbatim but have no compiled matcher.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let compiled = Regex::new(&source).ok();
        Self { source, compiled }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn regex(&self) -> Option<&Regex> {
        self.compiled.as_ref()
    }

    /// Test a haystack. `None` if the source did not compile.
    pub fn is_match(&self, haystack: &str) -> Option<bool> {
        self.compiled.as_ref().map(|re| re.is_match(haystack))
    }
}

impl From<Regex> for Pattern {
    fn from(re: Regex) -> Self {
        Self {
            source: re.as_str().to_string(),
            compiled: Some(re),
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source)
    }
}

/// A prop value.
#[derive(Debug, Clone)]
pub enum PropValue {
    // Primitives
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),

    // Typed scalars
    Date(DateTime<Utc>),
    RegExp(Pattern),
    BigInt(BigInt),
    Url(Url),
    Uint8Array(Vec<u8>),
    Uint16Array(Vec<u16>),
    Uint32Array(Vec<u32>),

    // Composites
    Array(Shared<Vec<PropValue>>),
    Object(Shared<Record>),
    Map(Shared<Vec<(PropValue, PropValue)>>),
    Set(Shared<Vec<PropValue>>),

    /// Decoded from a tag number with no registered reconstruction.
    Unrepresentable(u64),
}

impl PropValue {
    /// Build an array from values.
    pub fn array(values: impl IntoIterator<Item = PropValue>) -> Self {
        Self::Array(Shared::new(values.into_iter().collect()))
    }

    /// Build a record from `(key, value)` entries.
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, PropValue)>) -> Self {
        Self::Object(Shared::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Build a map. A later entry replaces an earlier one with the same key
    /// (see [`PropValue::same_value`]).
    pub fn map(entries: impl IntoIterator<Item = (PropValue, PropValue)>) -> Self {
        let mut pairs: Vec<(PropValue, PropValue)> = Vec::new();
        for (key, value) in entries {
            match pairs.iter_mut().find(|(k, _)| k.same_value(&key)) {
                Some(slot) => slot.1 = value,
                None => pairs.push((key, value)),
            }
        }
        Self::Map(Shared::new(pairs))
    }

    /// Build a set. Elements that are the same value as an earlier one are
    /// dropped; distinct composites are all kept, even when equal.
    pub fn set(values: impl IntoIterator<Item = PropValue>) -> Self {
        let mut elements: Vec<PropValue> = Vec::new();
        for value in values {
            if !elements.iter().any(|e| e.same_value(&value)) {
                elements.push(value);
            }
        }
        Self::Set(Shared::new(elements))
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::RegExp(_) => "regexp",
            Self::BigInt(_) => "bigint",
            Self::Url(_) => "url",
            Self::Uint8Array(_) => "uint8array",
            Self::Uint16Array(_) => "uint16array",
            Self::Uint32Array(_) => "uint32array",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Map(_) => "map",
            Self::Set(_) => "set",
            Self::Unrepresentable(_) => "unrepresentable",
        }
    }

    /// Identity of the composite container, `None` for scalars.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Self::Array(v) | Self::Set(v) => Some(v.id()),
            Self::Object(r) => Some(r.id()),
            Self::Map(m) => Some(m.id()),
            _ => None,
        }
    }

    /// Set-membership equality: composites by identity, scalars by value,
    /// with NaN equal to itself.
    pub fn same_value(&self, other: &PropValue) -> bool {
        match (self.identity(), other.identity()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => match (self, other) {
                (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
                _ => self == other,
            },
            _ => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    pub fn is_unrepresentable(&self) -> bool {
        matches!(self, Self::Unrepresentable(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Shared<Vec<PropValue>>> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Shared<Record>> {
        match self {
            Self::Object(r) => Some(r),
            _ => None,
        }
    }

    /// Clone of a record field.
    pub fn get_field(&self, name: &str) -> Option<PropValue> {
        match self {
            Self::Object(r) => r.read().get(name).cloned(),
            _ => None,
        }
    }

    /// Set a record field in place. Returns false if this is not a record.
    pub fn set_field(&mut self, name: impl Into<String>, value: PropValue) -> bool {
        match self {
            Self::Object(r) => {
                r.write().insert(name.into(), value);
                true
            }
            _ => false,
        }
    }

    /// Item of an array (cloned).
    pub fn get_index(&self, index: usize) -> Option<PropValue> {
        match self {
            Self::Array(v) => v.read().get(index).cloned(),
            _ => None,
        }
    }
}

/// Multiset comparison: each element of `b` matches at most one of `a`.
fn unordered_eq<T>(a: &[T], b: &[T], eq: impl Fn(&T, &T) -> bool) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut used = vec![false; b.len()];
    a.iter().all(|x| {
        match (0..b.len()).find(|&i| !used[i] && eq(x, &b[i])) {
            Some(i) => {
                used[i] = true;
                true
            }
            None => false,
        }
    })
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::RegExp(a), Self::RegExp(b)) => a == b,
            (Self::BigInt(a), Self::BigInt(b)) => a == b,
            (Self::Url(a), Self::Url(b)) => a == b,
            (Self::Uint8Array(a), Self::Uint8Array(b)) => a == b,
            (Self::Uint16Array(a), Self::Uint16Array(b)) => a == b,
            (Self::Uint32Array(a), Self::Uint32Array(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => {
                a.ptr_eq(b) || unordered_eq(&a.read(), &b.read(), |x, y| x == y)
            }
            (Self::Set(a), Self::Set(b)) => {
                a.ptr_eq(b) || unordered_eq(&a.read(), &b.read(), |x, y| x == y)
            }
            (Self::Unrepresentable(a), Self::Unrepresentable(b)) => a == b,
            _ => false,
        }
    }
}

// Conversion traits
impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for PropValue {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<DateTime<Utc>> for PropValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Date(v)
    }
}

impl From<Pattern> for PropValue {
    fn from(v: Pattern) -> Self {
        Self::RegExp(v)
    }
}

impl From<Regex> for PropValue {
    fn from(v: Regex) -> Self {
        Self::RegExp(v.into())
    }
}

impl From<BigInt> for PropValue {
    fn from(v: BigInt) -> Self {
        Self::BigInt(v)
    }
}

impl From<Url> for PropValue {
    fn from(v: Url) -> Self {
        Self::Url(v)
    }
}

impl From<Vec<PropValue>> for PropValue {
    fn from(v: Vec<PropValue>) -> Self {
        Self::Array(Shared::new(v))
    }
}

impl From<Record> for PropValue {
    fn from(v: Record) -> Self {
        Self::Object(Shared::new(v))
    }
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
