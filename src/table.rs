//! ProbeTable: fixed-capacity structural layer that does the actual probing.
//!
//! The table never grows or shrinks on its own; the policy layer
//! (`OpenAddressingMap`) decides when to rehash into a table of a different
//! capacity. Probing is always bounded to one full cycle, so lookups
//! terminate even when no `Empty` slot is left.

use core::borrow::Borrow;

use crate::probe::ProbeSeq;

/// One cell of the backing table. `Tombstone` marks a removed entry and
/// keeps probe chains that ran through the cell intact; only `Empty`
/// terminates a lookup. The explicit tag makes every key value storable;
/// no key is reserved as a marker.
///
/// Occupied slots carry the entry's full hash so probing can compare
/// hashes before keys and rehashing never re-invokes `K: Hash`.
#[derive(Clone, Debug)]
pub enum Slot<K, V> {
    Empty,
    Tombstone,
    Occupied { hash: u64, key: K, value: V },
}

impl<K, V> Slot<K, V> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// Value of an occupied slot.
    pub fn value(&self) -> Option<&V> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Owned value of an occupied slot, dropping the key.
    pub fn into_value(self) -> Option<V> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Where a placement probe for a key ended up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Placement {
    /// A slot already occupied by this key.
    Existing(usize),
    /// Key absent; the slot a new entry should take: the first tombstone
    /// on the probe path, or the empty slot that terminated it.
    Vacant(usize),
    /// Key absent and the full cycle found neither a tombstone nor an
    /// empty slot. Unreachable while a load-factor bound holds.
    Full,
}

/// Fixed-capacity open-addressing table.
pub struct ProbeTable<K, V> {
    slots: Box<[Slot<K, V>]>,
}

impl<K, V> ProbeTable<K, V> {
    /// An all-empty table of exactly `capacity` slots. `capacity` must be
    /// non-zero.
    pub fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot::Empty);
        Self {
            slots: slots.into_boxed_slice(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, index: usize) -> &Slot<K, V> {
        &self.slots[index]
    }

    pub fn slot_mut(&mut self, index: usize) -> &mut Slot<K, V> {
        &mut self.slots[index]
    }

    /// Find the slot holding `key`, probing from `hash mod capacity`.
    /// Tombstones do not stop the probe: a live key may sit past a removed
    /// predecessor. An empty slot does: the key cannot be further along.
    pub fn find<Q>(&self, hash: u64, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        for index in ProbeSeq::new(hash, self.capacity()) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Tombstone => {}
                Slot::Occupied {
                    hash: slot_hash,
                    key: slot_key,
                    ..
                } => {
                    if *slot_hash == hash && slot_key.borrow() == key {
                        return Some(index);
                    }
                }
            }
        }
        None
    }

    /// Placement probe for an insert. The whole chain up to the first empty
    /// slot is searched for `key` before any tombstone is reused, so a
    /// tombstone earlier in the chain can never shadow a live entry deeper
    /// in it.
    pub fn locate<Q>(&self, hash: u64, key: &Q) -> Placement
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut first_tombstone = None;
        for index in ProbeSeq::new(hash, self.capacity()) {
            match &self.slots[index] {
                Slot::Empty => return Placement::Vacant(first_tombstone.unwrap_or(index)),
                Slot::Tombstone => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Slot::Occupied {
                    hash: slot_hash,
                    key: slot_key,
                    ..
                } => {
                    if *slot_hash == hash && slot_key.borrow() == key {
                        return Placement::Existing(index);
                    }
                }
            }
        }
        match first_tombstone {
            Some(index) => Placement::Vacant(index),
            None => Placement::Full,
        }
    }

    /// Place an entry while rehashing into this table. The target table is
    /// freshly built: no tombstones, and no duplicate of `key`, so the
    /// first empty slot on the probe path is the right one and `Eq` is
    /// never consulted.
    pub fn place_rehashed(&mut self, hash: u64, key: K, value: V) {
        for index in ProbeSeq::new(hash, self.capacity()) {
            if self.slots[index].is_empty() {
                self.slots[index] = Slot::Occupied { hash, key, value };
                return;
            }
        }
        unreachable!("rehash target table has no empty slot");
    }

    /// Live entries in table order.
    pub fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        })
    }

    /// Live entries with mutable values, in table order.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.slots.iter_mut().filter_map(|slot| match slot {
            Slot::Occupied { key, value, .. } => Some((&*key, value)),
            _ => None,
        })
    }

    /// Consume the table, yielding every live entry with its stored hash.
    /// Tombstones and empty slots are dropped.
    pub fn into_entries(self) -> impl Iterator<Item = (u64, K, V)> {
        self.slots.into_vec().into_iter().filter_map(|slot| match slot {
            Slot::Occupied { hash, key, value } => Some((hash, key, value)),
            _ => None,
        })
    }
}
