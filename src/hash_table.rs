//! HashTable: a fixed array of chains routed by per-domain hash functions.

use crate::chain::Chain;
use crate::datum::{Datum, DatumKind, Field};
use crate::error::{Error, Result};
use crate::hashing::HashFns;
use core::fmt;
use log::{debug, trace, warn};
use std::rc::Rc;

/// Separate-chaining table with a bucket count fixed at construction.
///
/// Keys are borrowed only to pick a bucket and are never stored. Values are
/// shared `Rc<Datum>` handles compared by identity, so the same handle can
/// be stored at most once per bucket while equal-looking values in distinct
/// handles coexist.
///
/// Canonical enumeration order is bucket index ascending, then insertion
/// order within a bucket. `first`/`remove_first` follow it and
/// `last`/`remove_last` mirror it.
pub struct HashTable {
    key_kind: DatumKind,
    value_kind: DatumKind,
    buckets: Vec<Chain<Datum>>,
    hash_fns: HashFns,
}

impl HashTable {
    pub fn new(size: usize, key_kind: DatumKind, value_kind: DatumKind) -> Result<Self> {
        Self::with_hash_fns(size, key_kind, value_kind, HashFns::default())
    }

    /// Build a table that routes keys with `hash_fns` instead of the
    /// built-in functions.
    pub fn with_hash_fns(
        size: usize,
        key_kind: DatumKind,
        value_kind: DatumKind,
        hash_fns: HashFns,
    ) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidSize(0));
        }
        let buckets = (0..size).map(Chain::new).collect();
        debug!(
            "created hash table: {} buckets, key {}, value {}",
            size, key_kind, value_kind
        );
        Ok(Self {
            key_kind,
            value_kind,
            buckets,
            hash_fns,
        })
    }

    /// Untyped constructor taking a signed size and raw type tags
    /// (1 = integer, 2 = character, 3 = text).
    pub fn from_raw(size: i64, key_tag: i32, value_tag: i32) -> Result<Self> {
        if size <= 0 {
            return Err(Error::InvalidSize(size));
        }
        let key_kind = DatumKind::try_from(key_tag)?;
        let value_kind = DatumKind::try_from(value_tag)?;
        let size = usize::try_from(size).map_err(|_| Error::InvalidSize(size))?;
        Self::new(size, key_kind, value_kind)
    }

    /// Number of buckets.
    pub fn size(&self) -> usize {
        self.buckets.len()
    }

    pub fn key_kind(&self) -> DatumKind {
        self.key_kind
    }

    pub fn value_kind(&self) -> DatumKind {
        self.value_kind
    }

    /// Number of stored values across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Chain::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Chain::is_empty)
    }

    pub fn bucket(&self, index: usize) -> Option<&Chain<Datum>> {
        self.buckets.get(index)
    }

    pub fn buckets(&self) -> impl DoubleEndedIterator<Item = &Chain<Datum>> {
        self.buckets.iter()
    }

    /// Overwrite the key or value tag. Stored entries stay in the buckets
    /// they were placed in; nothing is rehashed or revalidated.
    pub fn set_kind(&mut self, field: Field, kind: DatumKind) {
        let slot = match field {
            Field::Key => &mut self.key_kind,
            Field::Value => &mut self.value_kind,
        };
        let old = core::mem::replace(slot, kind);
        debug!("{} kind changed from {} to {}", field, old, kind);
        if old != kind && !self.is_empty() {
            warn!(
                "{} kind changed on a table holding {} values; entries are not rehashed",
                field,
                self.len()
            );
        }
    }

    /// Bucket index `key` routes to under the current key kind.
    pub fn bucket_of(&self, key: &Datum) -> Result<usize> {
        if key.kind() != self.key_kind {
            return Err(Error::KindMismatch {
                field: Field::Key,
                expected: self.key_kind,
                found: key.kind(),
            });
        }
        Ok(self.hash_fns.bucket(key, self.size()))
    }

    pub fn add(&mut self, key: &Datum, value: Rc<Datum>) -> Result<()> {
        let index = self.bucket_of(key)?;
        if value.kind() != self.value_kind {
            return Err(Error::KindMismatch {
                field: Field::Value,
                expected: self.value_kind,
                found: value.kind(),
            });
        }
        trace!("add: key {} -> bucket {}", key, index);
        self.buckets[index].append(value)?;
        Ok(())
    }

    pub fn first(&self) -> Option<&Rc<Datum>> {
        self.buckets.iter().find_map(Chain::first)
    }

    pub fn last(&self) -> Option<&Rc<Datum>> {
        self.buckets.iter().rev().find_map(Chain::last)
    }

    /// Remove `value` from the bucket `key` routes to.
    pub fn remove(&mut self, key: &Datum, value: &Rc<Datum>) -> Result<Rc<Datum>> {
        let index = self.bucket_of(key)?;
        trace!("remove: key {} -> bucket {}", key, index);
        self.buckets[index].remove(value)
    }

    /// Remove the value `first` would return.
    pub fn remove_first(&mut self) -> Result<Rc<Datum>> {
        self.buckets
            .iter_mut()
            .find_map(Chain::remove_first)
            .ok_or(Error::Empty)
    }

    /// Remove the value `last` would return.
    pub fn remove_last(&mut self) -> Result<Rc<Datum>> {
        self.buckets
            .iter_mut()
            .rev()
            .find_map(Chain::remove_last)
            .ok_or(Error::Empty)
    }

    /// Whether `value` is stored in the bucket `key` routes to. A key of the
    /// wrong kind is reported as [`Error::KindMismatch`], not as a miss.
    pub fn contains(&self, key: &Datum, value: &Rc<Datum>) -> Result<bool> {
        let index = self.bucket_of(key)?;
        Ok(self.buckets[index].contains(value))
    }

    /// Drop every stored value, keeping the buckets.
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
    }

    /// `(bucket index, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Rc<Datum>)> {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter().map(move |v| (chain.index(), v)))
    }
}

/// One header line, then one line per bucket: `[index] (len) v1 -> v2`.
impl fmt::Display for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "hash table: {} buckets, {} values, key {}, value {}",
            self.size(),
            self.len(),
            self.key_kind,
            self.value_kind
        )?;
        for chain in &self.buckets {
            write!(f, "[{}] ({})", chain.index(), chain.len())?;
            for (i, v) in chain.iter().enumerate() {
                f.write_str(if i == 0 { " " } else { " -> " })?;
                write!(f, "{}", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("size", &self.size())
            .field("len", &self.len())
            .field("key_kind", &self.key_kind)
            .field("value_kind", &self.value_kind)
            .finish()
    }
}
