//! OpenAddressingMap: policy layer adding hashing, length accounting and
//! load-factor driven growth/shrink on top of `ProbeTable`.

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;

use crate::table::{Placement, ProbeTable, Slot};
use crate::DefaultHashBuilder;

/// Capacity of a freshly created map. Growth doubles and shrinking halves,
/// so capacity stays a power of two and never drops below this floor.
const INITIAL_CAPACITY: usize = 8;

/// Maximum load factor 2/3, kept as an integer ratio so the bound check
/// never touches floating point: grow when `len * LOAD_DEN >= capacity *
/// LOAD_NUM`.
const LOAD_NUM: usize = 2;
const LOAD_DEN: usize = 3;

/// Lookup failure: `get`/`get_mut`/`remove` on a key that is not in the map.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct KeyNotFound;

/// A hash map built on open addressing with linear probing.
///
/// Collisions are resolved by probing the next slot (wrapping); removal
/// leaves a tombstone so probe chains through the slot stay intact; the
/// table rehashes into double the capacity once occupancy reaches 2/3, and
/// into half the capacity once it falls to 1/4. Exactly one owner issues
/// all mutations; there is no internal synchronization.
pub struct OpenAddressingMap<K, V, S = DefaultHashBuilder> {
    hasher: S,
    table: ProbeTable<K, V>,
    len: usize,
}

impl<K, V> OpenAddressingMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// A map that can hold roughly `capacity * 2/3` entries before its
    /// first growth. The backing capacity is rounded up to a power of two,
    /// floor 8.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V> Default for OpenAddressingMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> OpenAddressingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(INITIAL_CAPACITY, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        let capacity = capacity.max(INITIAL_CAPACITY).next_power_of_two();
        Self {
            hasher,
            table: ProbeTable::with_capacity(capacity),
            len: 0,
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current backing-table capacity (a power of two, at least 8).
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Insert `key -> value`. Returns the previous value when the key was
    /// already present (an in-place update; the length is unchanged), or
    /// `None` for a new key. Any key value is accepted: slot state is an
    /// explicit tag, so no key is reserved as an empty or deleted marker.
    ///
    /// A new entry takes the first tombstone on its probe path, or the
    /// empty slot that terminated it. When the insert lifts occupancy to
    /// the 2/3 bound, the table grows to double capacity before returning.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.make_hash(&key);
        match self.table.locate(hash, &key) {
            Placement::Existing(index) => {
                let slot_value = self
                    .table
                    .slot_mut(index)
                    .value_mut()
                    .expect("existing placement refers to an occupied slot");
                Some(mem::replace(slot_value, value))
            }
            Placement::Vacant(index) => {
                *self.table.slot_mut(index) = Slot::Occupied { hash, key, value };
                self.len += 1;
                if self.len * LOAD_DEN >= self.capacity() * LOAD_NUM {
                    self.resize(self.capacity() * 2);
                }
                None
            }
            Placement::Full => unreachable!("load factor bound keeps an empty slot in the table"),
        }
    }

    /// Look up `key`. Probes from the key's home slot through any
    /// tombstones until an occupied match or an empty slot.
    pub fn get<Q>(&self, key: &Q) -> Result<&V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(key);
        self.table
            .find(hash, key)
            .and_then(|index| self.table.slot(index).value())
            .ok_or(KeyNotFound)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(key);
        match self.table.find(hash, key) {
            Some(index) => self
                .table
                .slot_mut(index)
                .value_mut()
                .ok_or(KeyNotFound),
            None => Err(KeyNotFound),
        }
    }

    /// Remove `key`, returning its value. The slot becomes a tombstone,
    /// never `Empty`: an empty slot would wrongly terminate later probes
    /// for keys placed past this one. The table may shrink afterwards.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(key);
        let index = self.table.find(hash, key).ok_or(KeyNotFound)?;
        let slot = mem::replace(self.table.slot_mut(index), Slot::Tombstone);
        self.len -= 1;
        self.maybe_shrink();
        Ok(slot
            .into_value()
            .expect("found index refers to an occupied slot"))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(key);
        self.table.find(hash, key).is_some()
    }

    /// Every live entry exactly once, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.table.entries()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.table.entries_mut()
    }

    /// Shrink policy: halve the table once occupancy falls to a quarter of
    /// capacity, but never below the initial capacity, and only when the
    /// halved table keeps the load factor strictly under the growth bound.
    fn maybe_shrink(&mut self) {
        let capacity = self.capacity();
        if capacity <= INITIAL_CAPACITY || self.len * 4 > capacity {
            return;
        }
        let halved = capacity / 2;
        if self.len * LOAD_DEN < halved * LOAD_NUM {
            self.resize(halved);
        }
    }

    /// Rehash every live entry into a fresh table of `new_capacity` slots.
    /// Tombstones do not survive. Placement restarts from `hash mod
    /// new_capacity` using the stored hash, so `K: Hash` is never invoked
    /// here. The old table is swapped out whole; no partial-resize state is
    /// ever observable.
    fn resize(&mut self, new_capacity: usize) {
        debug_assert!(self.len * LOAD_DEN < new_capacity * LOAD_NUM);
        let old = mem::replace(&mut self.table, ProbeTable::with_capacity(new_capacity));
        for (hash, key, value) in old.into_entries() {
            self.table.place_rehashed(hash, key, value);
        }
    }

    /// Test hook: walk the table and check the structural invariants the
    /// public API cannot observe.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let capacity = self.capacity();
        assert!(capacity.is_power_of_two() && capacity >= INITIAL_CAPACITY);

        let mut occupied = 0;
        for index in 0..capacity {
            if let Slot::Occupied { hash, key, .. } = self.table.slot(index) {
                occupied += 1;
                assert_eq!(*hash, self.make_hash(key), "stored hash is stale");
                assert_eq!(
                    self.table.find(*hash, key),
                    Some(index),
                    "occupied slot is not reachable from its home slot"
                );
            }
        }
        assert_eq!(occupied, self.len, "length does not match occupied slots");
    }
}

impl<K, V, S> fmt::Debug for OpenAddressingMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.table.entries()).finish()
    }
}
