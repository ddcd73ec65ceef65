//! chained-hashtable: a fixed-size, single-threaded hash table whose
//! buckets are doubly-linked chains of shared value handles.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a separate-chaining table where each layer has a small,
//!   checkable contract.
//! - Layers:
//!   - Node<T>: one value slot (`Option<Rc<T>>`) plus prev/next handles.
//!   - Chain<T, P>: a doubly-linked list stored in a `slotmap` arena with
//!     two permanent sentinels; tracks its length, its bucket index and an
//!     optional auxiliary payload.
//!   - HashTable: a `Vec` of chains fixed at construction, the key and value
//!     kinds, and the per-kind hash functions.
//!
//! Constraints
//! - Single-threaded: values are `Rc`, so tables are `!Send`/`!Sync`.
//! - Fixed bucket count; there is no resizing or rehashing.
//! - Values are compared by identity (`Rc::ptr_eq`). Keys are borrowed only
//!   to choose a bucket and are never stored.
//! - A value handle appears at most once per bucket; duplicate appends fail
//!   and leave the chain unchanged.
//! - Node handles are generational: a removed node's handle never resolves
//!   to a node appended later.
//! - Node handles carry the id of the chain that issued them; another chain
//!   rejects them.
//! - Keyed operations (`add`, `remove`, `contains`) report a key of the
//!   wrong kind as an error.
//!
//! Ordering
//! - Within a chain: insertion order, head to tail.
//! - Across the table: bucket index ascending, then chain order.
//!   `first`/`remove_first` follow it; `last`/`remove_last` mirror it.
//!
//! Kinds and rehashing
//! - The key kind selects the hash function and must match the key's
//!   variant; the value kind must match the value's variant on `add`.
//! - `set_kind` rewrites a tag without moving stored entries. Entries placed
//!   under the old key kind stay in their buckets and are only reachable by
//!   enumeration (`first`, `iter`, `remove_first`, ...) until the kind is
//!   switched back.
//!
//! Errors and logging
//! - Every fallible operation returns [`Result`] with the crate [`Error`].
//! - Routing and chain mutations log through the `log` facade at `trace`,
//!   construction and kind changes at `debug`, and a kind change on a
//!   non-empty table at `warn`.

pub mod chain;
mod chain_proptest;
pub mod datum;
pub mod error;
pub mod hash_table;
pub mod hashing;
pub mod node;

// Public surface
pub use chain::Chain;
pub use datum::{Datum, DatumKind, Field};
pub use error::{Error, Result};
pub use hash_table::HashTable;
pub use hashing::HashFns;
pub use node::{Node, NodeHandle};
