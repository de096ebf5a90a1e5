//! probe-map: a single-threaded hash map built on open addressing with
//! linear probing and tombstone deletion.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: reconcile three concerns that pull against each other
//!   (collision-resolution correctness, deletion that does not break probe
//!   chains, and capacity changes that preserve every live mapping) in
//!   small, verifiable layers.
//! - Layers:
//!   - ProbeSeq: bounded modular probe cursor. Starts at `hash mod
//!     capacity`, advances one slot with wraparound, and yields every slot
//!     index exactly once. The only place index arithmetic happens.
//!   - ProbeTable<K, V>: fixed-capacity structural layer. Owns the slots
//!     (`Empty | Tombstone | Occupied`) and implements find / placement /
//!     rehash-placement. Never resizes itself.
//!   - OpenAddressingMap<K, V, S>: public policy layer. Hashing, length
//!     accounting, the 2/3 load-factor growth trigger, shrink-on-remove at
//!     quarter occupancy, and rehashing into fresh tables.
//!
//! Constraints
//! - Single-threaded: exactly one owner issues all mutations; hosts that
//!   need sharing serialize access externally.
//! - O(1) expected per operation, O(capacity) worst case; rehashing is the
//!   only operation whose cost is proportional to table size.
//! - Capacity is a power of two, never below 8; occupancy stays strictly
//!   under 2/3 after every insert.
//!
//! Slot state machine
//! - Empty -> Occupied: insert of a new key.
//! - Occupied -> Tombstone: remove. Never back to Empty in place: an
//!   empty slot would terminate probes for keys placed past it.
//! - Tombstone -> Occupied: a later insert reuses the slot, without
//!   passing through Empty.
//! - A rehash rebuilds the table from live entries only; tombstones do
//!   not survive it.
//!
//! Why this split?
//! - Localize invariants: the cursor is checkable in isolation, the table
//!   can be driven with raw hashes in its tests, and the map layer only
//!   decides policy.
//! - Slot state is an explicit tag, not a sentinel key value, so any key
//!   is storable, including empty strings and `None`-like values.
//!
//! Hasher and rehashing invariants
//! - Each occupied slot stores the entry's `u64` hash; probing compares
//!   stored hashes before calling `Eq`, and a rehash re-derives the home
//!   slot as `hash mod new_capacity` without ever re-invoking `K: Hash`.
//! - Lookups are generic over `Q: Hash + Eq` with `K: Borrow<Q>`; the
//!   `Borrow` contract keeps borrowed and owned hashes equal.
//!
//! Notes and non-goals
//! - Iteration order is unspecified; every live entry is yielded exactly
//!   once.
//! - No persistence and no concurrent access.
//! - Tombstones are reclaimed only by a rehash (growth or shrink), never
//!   in place; every probe loop is bounded to one full cycle, so a
//!   tombstone-saturated table still terminates lookups.

mod map;
mod map_proptest;
mod probe;
#[cfg(feature = "bench_internal")]
pub mod table;
#[cfg(not(feature = "bench_internal"))]
mod table;

/// Hash builder used when none is specified.
#[cfg(feature = "ahash")]
pub type DefaultHashBuilder = core::hash::BuildHasherDefault<ahash::AHasher>;
#[cfg(not(feature = "ahash"))]
pub type DefaultHashBuilder = std::collections::hash_map::RandomState;

// Public surface
pub use map::{KeyNotFound, OpenAddressingMap};
