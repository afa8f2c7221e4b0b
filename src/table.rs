use std::{
    iter::{self, FusedIterator},
    mem,
    ptr::{self, NonNull},
    vec,
};

use log::{debug, trace};

use crate::{
    error::{Error, Result},
    fnv,
};

/// Slot count of a freshly created table
pub const INITIAL_CAPACITY: usize = 16;

/// An occupied slot
#[derive(Debug, Clone)]
struct Entry<V> {
    /// Copy of the caller's key, owned by the table
    key: Box<[u8]>,
    /// The value associated with the key
    value: V,
}

/// A hash table keyed by byte strings, using open addressing with linear probing.
///
/// Keys are hashed with 64-bit FNV-1a and copied into table-owned storage on first insert.
/// The slot array is a power of two in length and is doubled before an insert would push the
/// load factor past one half. Entries are never removed and the table never shrinks.
///
/// Note: This implementation is not thread-safe. Wrap it in a lock to share it.
#[derive(Debug, Clone)]
pub struct Table<V> {
    /// The slots; `None` marks an empty slot
    slots: Vec<Option<Entry<V>>>,
    /// Number of occupied slots
    len: usize,
}

impl<V> Default for Table<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Index at which the probe sequence for `key` starts in a table of `capacity` slots
#[allow(clippy::cast_possible_truncation)]
fn home_slot(key: &[u8], capacity: usize) -> usize {
    (fnv::hash(key) as usize) & capacity.wrapping_sub(1)
}

/// Scans forward from the key's home slot, wrapping at the end, and returns the index that
/// holds `key` or the first empty index, whichever comes first. Returns `None` only when every
/// slot holds some other key.
fn probe<V>(slots: &[Option<Entry<V>>], key: &[u8]) -> Option<usize> {
    let mask = slots.len().wrapping_sub(1);
    let home = home_slot(key, slots.len());

    (0..slots.len()).map(|step| home.wrapping_add(step) & mask).find(|&index| {
        match slots.get(index) {
            Some(Some(entry)) => *entry.key == *key,
            None | Some(None) => true,
        }
    })
}

/// Allocates `capacity` empty slots, reporting allocation failure instead of aborting
fn allocate_slots<V>(capacity: usize) -> Result<Vec<Option<Entry<V>>>> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(capacity)?;
    slots.resize_with(capacity, || None);
    Ok(slots)
}

/// Copies `key` into storage owned by the table
fn duplicate(key: &[u8]) -> Result<Box<[u8]>> {
    let mut owned = Vec::new();
    owned.try_reserve_exact(key.len())?;
    owned.extend_from_slice(key);
    Ok(owned.into_boxed_slice())
}

impl<V> Table<V> {
    /// Creates an empty table with [`INITIAL_CAPACITY`] slots
    #[must_use]
    pub fn new() -> Self {
        Self { slots: iter::repeat_with(|| None).take(INITIAL_CAPACITY).collect(), len: 0 }
    }

    /// Creates an empty table with [`INITIAL_CAPACITY`] slots, reporting allocation failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the slot array cannot be allocated.
    pub fn try_new() -> Result<Self> {
        Ok(Self { slots: allocate_slots(INITIAL_CAPACITY)?, len: 0 })
    }

    /// Creates an empty table with at least `capacity` slots.
    ///
    /// The slot count is rounded up to a power of two and is never below [`INITIAL_CAPACITY`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] if rounding up overflows `usize`, and
    /// [`Error::OutOfMemory`] if the slot array cannot be allocated.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let slots = capacity
            .max(INITIAL_CAPACITY)
            .checked_next_power_of_two()
            .ok_or(Error::CapacityOverflow { capacity })?;
        Ok(Self { slots: allocate_slots(slots)?, len: 0 })
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the fraction of slots that are occupied
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.slots.len() as f64
    }

    /// Returns the value stored under `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let index = probe(&self.slots, key.as_ref())?;
        self.slots.get(index)?.as_ref().map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value stored under `key`
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let index = probe(&self.slots, key.as_ref())?;
        self.slots.get_mut(index)?.as_mut().map(|entry| &mut entry.value)
    }

    /// Returns how many slots a lookup of `key` examines, counting the home slot as one.
    ///
    /// `None` if the key is not stored.
    pub fn probe_length<Q>(&self, key: &Q) -> Option<usize>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let key = key.as_ref();
        let index = probe(&self.slots, key)?;
        if self.slots.get(index)?.is_none() {
            return None;
        }
        let home = home_slot(key, self.capacity());
        Some((index.wrapping_sub(home) & self.capacity().wrapping_sub(1)).saturating_add(1))
    }

    /// Stores `value` under `key` and returns the table's own copy of the key.
    ///
    /// An existing entry keeps its key copy and has its value replaced; otherwise the key is
    /// copied into a new slot. The table grows first when it is already half full.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] or [`Error::CapacityOverflow`] if growing or copying the
    /// key fails. No entry is added or changed in that case.
    #[allow(clippy::indexing_slicing)]
    pub fn set<Q>(&mut self, key: &Q, value: V) -> Result<&[u8]>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let key = key.as_ref();
        if self.len >= self.capacity() / 2 {
            self.expand()?;
        }

        let index = loop {
            match probe(&self.slots, key) {
                Some(index) => break index,
                None => self.expand()?,
            }
        };

        // `probe` only yields indices below `slots.len()`
        let slot = &mut self.slots[index];
        let entry = match slot.take() {
            Some(entry) => Entry { value, ..entry },
            None => {
                let entry = Entry { key: duplicate(key)?, value };
                self.len = self.len.saturating_add(1);
                entry
            }
        };

        Ok(&*slot.insert(entry).key)
    }

    /// Doubles the slot count and moves every entry to its slot in the new array.
    ///
    /// Keys are moved, not copied. The new array is allocated before anything is moved, so a
    /// failed expansion leaves the table untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] if doubling overflows `usize`, and
    /// [`Error::OutOfMemory`] if the new slot array cannot be allocated.
    pub fn expand(&mut self) -> Result<()> {
        let capacity = self.capacity();
        let new_capacity = capacity.checked_mul(2).ok_or(Error::CapacityOverflow { capacity })?;
        let slots = allocate_slots(new_capacity)?;

        let old = mem::replace(&mut self.slots, slots);
        self.len = 0;
        for entry in old.into_iter().flatten() {
            self.insert_entry(entry);
        }

        debug!("table grew from {capacity} to {new_capacity} slots, {} entries moved", self.len);
        Ok(())
    }

    /// Moves an entry whose key is already owned into the first empty slot of its probe sequence
    fn insert_entry(&mut self, entry: Entry<V>) {
        if let Some(slot) =
            probe(&self.slots, &entry.key).and_then(|index| self.slots.get_mut(index))
        {
            *slot = Some(entry);
            self.len = self.len.saturating_add(1);
        }
    }

    /// Returns an iterator over the entries in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: &self.slots, position: 0, remaining: self.len }
    }
}

impl<T> Table<NonNull<T>> {
    /// Stores a raw pointer under `key`, rejecting null.
    ///
    /// The table never dereferences or frees the pointer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullValue`] for a null pointer, leaving the table unchanged, and
    /// otherwise fails as [`Table::set`] does.
    pub fn set_ptr<Q>(&mut self, key: &Q, value: *mut T) -> Result<&[u8]>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        let Some(value) = NonNull::new(value) else {
            trace!("rejected null value for key {:?}", String::from_utf8_lossy(key.as_ref()));
            return Err(Error::NullValue);
        };
        self.set(key, value)
    }

    /// Returns the pointer stored under `key`, or null if there is none
    #[must_use]
    pub fn get_ptr<Q>(&self, key: &Q) -> *mut T
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.get(key).map_or(ptr::null_mut(), |value| value.as_ptr())
    }
}

/// Cursor over the entries of a [`Table`], in slot order.
///
/// Slot order depends on the hashes and the capacity, not on insertion order.
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Slots of the table being walked
    slots: &'a [Option<Entry<V>>],
    /// Next slot to examine
    position: usize,
    /// Entries not yet yielded
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.position) {
            self.position = self.position.saturating_add(1);
            if let Some(entry) = slot {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((&*entry.key, &entry.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

impl<'a, V> IntoIterator for &'a Table<V> {
    type Item = (&'a [u8], &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Consuming iterator over the entries of a [`Table`], in slot order
#[derive(Debug)]
pub struct IntoIter<V> {
    /// Remaining slots
    slots: vec::IntoIter<Option<Entry<V>>>,
    /// Entries not yet yielded
    remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (Box<[u8]>, V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.by_ref().flatten().next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some((entry.key, entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> FusedIterator for IntoIter<V> {}

impl<V> IntoIterator for Table<V> {
    type Item = (Box<[u8]>, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { slots: self.slots.into_iter(), remaining: self.len }
    }
}
