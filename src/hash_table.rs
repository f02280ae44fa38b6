//! The open-addressing slot table underneath [`HashMap`](crate::HashMap).
//!
//! [`HashTable<V>`] stores values in a power-of-two array of slots. Each slot
//! is empty, occupied, or a tombstone left behind by a removal. Lookups start
//! at the home slot `hash & (capacity - 1)` and walk forward one slot at a
//! time, wrapping around, until they hit a matching value or an empty slot.
//! Tombstones never stop a probe, so a removal cannot hide entries that were
//! inserted further along the same chain.
//!
//! Growth is driven by insert attempts rather than by the live entry count:
//! every call to [`HashTable::entry`] counts, and once twice that count
//! reaches the capacity the table is rebuilt into at least double the slots,
//! which also drops every tombstone.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::Enumerate;
use core::marker::PhantomData;
use core::mem;

/// Smallest power-of-two slot count that keeps `2 * inserted < slots`.
#[inline(always)]
fn slots_for(inserted: usize) -> usize {
    inserted
        .checked_mul(2)
        .and_then(|n| n.checked_add(1))
        .and_then(usize::checked_next_power_of_two)
        .expect("capacity overflow")
}

#[inline(always)]
fn over_load_factor(inserted: usize, slots: usize) -> bool {
    inserted.saturating_mul(2) >= slots
}

fn empty_slots<V>(count: usize) -> Vec<Slot<V>> {
    let mut slots = Vec::with_capacity(count);
    slots.resize_with(count, || Slot::Empty);
    slots
}

/// A single position in the slot array.
///
/// Slots move `Empty -> Occupied -> Tombstone`. Only a rebuild hands out
/// fresh `Empty` slots again; insert never reclaims a tombstone.
#[derive(Clone)]
enum Slot<V> {
    Empty,
    Occupied { hash: u64, value: V },
    Tombstone,
}

impl<V> Slot<V> {
    #[inline(always)]
    fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }
}

enum Probe {
    Found(usize),
    Vacant(usize),
    Exhausted,
}

/// Debug statistics for slot table analysis.
///
/// Available with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of live entries
    pub populated: usize,
    /// Insert attempts since the last rebuild
    pub inserted: usize,
    /// Total number of slots
    pub capacity: usize,
    /// Slots holding a tombstone
    pub tombstones: usize,
    /// Slots that have never been claimed since the last rebuild
    pub empty: usize,
    /// Load factor (populated / capacity)
    pub load_factor: f64,
    /// Longest distance of any live entry from its home slot
    pub longest_probe: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Slot Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.populated,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Slots: {} empty, {} tombstoned",
            self.empty, self.tombstones
        );
        println!(
            "Insert attempts since rebuild: {} (rebuild at {})",
            self.inserted,
            self.capacity.div_ceil(2)
        );
        println!("Longest probe: {}", self.longest_probe);
    }
}

/// Distribution of live entries by distance from their home slot.
///
/// `bins()[d]` is the number of entries stored `d` slots past the slot their
/// hash maps to. Available with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHistogram {
    bins: Vec<usize>,
}

#[cfg(any(test, feature = "stats"))]
impl ProbeHistogram {
    /// Entry counts indexed by probe distance.
    pub fn bins(&self) -> &[usize] {
        &self.bins
    }

    /// Total number of entries counted.
    pub fn total(&self) -> usize {
        self.bins.iter().sum()
    }

    /// Pretty-prints the histogram horizontally using stdout.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let max = self.bins.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        println!("probe histogram ({} entries):", self.total());
        for (distance, &count) in self.bins.iter().enumerate() {
            let width = (count * max_bar).div_ceil(max);
            println!("{:>3} | {} ({})", distance, "█".repeat(width), count);
        }
    }
}

/// An open-addressing hash table using linear probing and tombstones.
///
/// `HashTable<V>` stores values of type `V` and leaves hashing and equality
/// to the caller: every operation takes the value's hash and a predicate
/// that recognises the value being looked for. [`HashMap`](crate::HashMap)
/// is built on top of this by storing key/value records.
///
/// A new table has a single slot. Capacity is always a power of two, only
/// grows through a full rebuild, and is reset by [`clear`](Self::clear).
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use probe_hash::hash_table::HashTable;
/// # use siphasher::sip::SipHasher;
/// #
/// # #[derive(Debug, PartialEq)]
/// # struct Person {
/// #     id: u64,
/// #     name: String,
/// # }
/// #
/// # fn hash_id(id: u64) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     id.hash(&mut hasher);
/// #     hasher.finish()
/// # }
///
/// let mut table = HashTable::new();
/// let hash = hash_id(123);
///
/// match table.entry(hash, |p: &Person| p.id == 123) {
///     probe_hash::hash_table::Entry::Vacant(entry) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     probe_hash::hash_table::Entry::Occupied(_) => {
///         println!("Person already exists");
///     }
/// }
///
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Clone)]
pub struct HashTable<V> {
    slots: Vec<Slot<V>>,
    populated: usize,
    inserted: usize,
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::string::String;

        let slots: String = self
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Empty => '.',
                Slot::Occupied { .. } => '#',
                Slot::Tombstone => 'x',
            })
            .collect();

        f.debug_struct("HashTable")
            .field("slots", &slots)
            .field("populated", &self.populated)
            .field("inserted", &self.inserted)
            .field("capacity", &self.slots.len())
            .finish()
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HashTable<V> {
    /// Creates an empty table with a single slot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<u64> = HashTable::new();
    /// assert_eq!(table.capacity(), 1);
    /// assert!(table.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty table that accepts at least `capacity` inserts
    /// before it has to rebuild.
    ///
    /// The slot count is the smallest power of two strictly greater than
    /// `2 * capacity`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<String> = HashTable::with_capacity(100);
    /// assert!(table.capacity() > 200);
    /// assert!(table.capacity().is_power_of_two());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: empty_slots(slots_for(capacity)),
            populated: 0,
            inserted: 0,
        }
    }

    /// Returns an iterator over all values in the table.
    ///
    /// Values are yielded in slot order, which depends on hash values and
    /// on the history of inserts since the last rebuild. It is not insertion
    /// order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use probe_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::new();
    /// table
    ///     .entry(hash_str("key1"), |s: &String| s == "key1")
    ///     .or_insert("key1".to_string());
    /// table
    ///     .entry(hash_str("key2"), |s: &String| s == "key2")
    ///     .or_insert("key2".to_string());
    ///
    /// assert_eq!(table.iter().count(), 2);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: RawIter::new(self.slots.iter(), self.populated),
        }
    }

    /// Returns an iterator yielding mutable references to all values.
    ///
    /// Mutating a value must not change its hash or how the lookup predicate
    /// sees it, otherwise it can no longer be found.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            inner: RawIter::new(self.slots.iter_mut(), self.populated),
        }
    }

    /// Returns an iterator that removes and yields all values from the table.
    ///
    /// The table is reset to its initial single-slot state as soon as this is
    /// called; values not consumed by the iterator are dropped with it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(7, |&n: &u64| n == 7).or_insert(7);
    ///
    /// let values: Vec<u64> = table.drain().collect();
    /// assert!(table.is_empty());
    /// assert_eq!(values, vec![7]);
    /// ```
    pub fn drain(&mut self) -> Drain<'_, V> {
        let remaining = self.populated;
        let slots = mem::replace(&mut self.slots, empty_slots(1));
        self.populated = 0;
        self.inserted = 0;

        Drain {
            inner: RawIter::new(slots.into_iter(), remaining),
            _table: PhantomData,
        }
    }

    /// Returns `true` if the table contains no elements.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of elements in the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// assert_eq!(table.len(), 0);
    ///
    /// table.entry(1, |&n: &u64| n == 1).or_insert(1);
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns the number of slots in the table.
    ///
    /// This is always a power of two. The table rebuilds before the number
    /// of insert attempts since the last rebuild reaches half of it.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Removes all elements and returns the table to a single empty slot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// for n in 0..10u64 {
    ///     table.entry(n, |&v: &u64| v == n).or_insert(n);
    /// }
    /// assert!(table.capacity() > 1);
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 1);
    /// ```
    pub fn clear(&mut self) {
        event!(
            TRACE,
            capacity = self.slots.len(),
            live = self.populated,
            "clearing slot table"
        );

        self.slots = empty_slots(1);
        self.populated = 0;
        self.inserted = 0;
    }

    /// Reserves room for at least `additional` more inserts without a
    /// rebuild.
    ///
    /// If growth is needed the table is rebuilt immediately, at least
    /// doubling its capacity, which also clears all tombstones.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::hash_table::HashTable;
    /// #
    /// let mut table: HashTable<i32> = HashTable::new();
    /// table.reserve(50);
    /// assert!(table.capacity() > 100);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        if over_load_factor(self.inserted.saturating_add(additional), self.slots.len()) {
            event!(TRACE, additional, "reserving slots");
            let target = slots_for(self.populated.saturating_add(additional))
                .max(self.grown_capacity());
            self.rebuild(target);
        }
    }

    /// Removes and returns a value from the table.
    ///
    /// The slot is turned into a tombstone so later entries on the same probe
    /// chain stay reachable. Returns `None`, leaving the table untouched, if
    /// no value matches.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(42, |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.remove(42, |&n| n == 42), Some(42));
    /// assert!(table.is_empty());
    /// assert_eq!(table.remove(42, |&n| n == 42), None);
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        let index = self.find_index(hash, eq)?;
        Some(self.take(index))
    }

    /// Gets an entry for the given hash and equality predicate.
    ///
    /// This counts as an insert attempt whatever the outcome: if the attempt
    /// pushes the table to half occupancy it is rebuilt before probing.
    /// A vacant entry always refers to the first empty slot on the probe
    /// chain; tombstones passed on the way are not reused.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use probe_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::new();
    /// let hash = hash_str("hello");
    ///
    /// match table.entry(hash, |s: &String| s.starts_with("hello")) {
    ///     probe_hash::hash_table::Entry::Vacant(entry) => {
    ///         entry.insert("hello world".to_string());
    ///     }
    ///     probe_hash::hash_table::Entry::Occupied(mut entry) => {
    ///         *entry.get_mut() = "hello again".to_string();
    ///     }
    /// }
    ///
    /// assert_eq!(
    ///     table.find(hash, |s| s.starts_with("hello")),
    ///     Some(&"hello world".to_string())
    /// );
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        self.record_insert();

        match self.probe(hash, eq) {
            Probe::Found(index) => Entry::Occupied(OccupiedEntry { table: self, index }),
            Probe::Vacant(index) => Entry::Vacant(VacantEntry {
                table: self,
                hash,
                index,
            }),
            Probe::Exhausted => unreachable!("load factor keeps at least one empty slot"),
        }
    }

    /// Gets an entry for the given hash and equality predicate, counting an
    /// insert attempt only when no value matches.
    ///
    /// A hit never triggers a rebuild. A miss behaves exactly like
    /// [`entry`](Self::entry).
    pub fn lookup_entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        if let Probe::Found(index) = self.probe(hash, &eq) {
            return Entry::Occupied(OccupiedEntry { table: self, index });
        }

        self.entry(hash, eq)
    }

    /// Returns the value matching `eq`, inserting `default()` first if there
    /// is none.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::hash_table::HashTable;
    /// #
    /// let mut table: HashTable<(u64, u32)> = HashTable::new();
    /// for _ in 0..3 {
    ///     table.find_or_insert_with(8, |&(k, _)| k == 8, || (8, 0)).1 += 1;
    /// }
    /// assert_eq!(table.find(8, |&(k, _)| k == 8), Some(&(8, 3)));
    /// ```
    pub fn find_or_insert_with(
        &mut self,
        hash: u64,
        eq: impl Fn(&V) -> bool,
        default: impl FnOnce() -> V,
    ) -> &mut V {
        self.lookup_entry(hash, eq).or_insert_with(default)
    }

    /// Finds a value in the table by hash and equality predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(42, |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.find(42, |&n| n == 42), Some(&42));
    /// assert_eq!(table.find(99, |&n| n == 99), None);
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        self.find_index(hash, eq).map(|index| self.value(index))
    }

    /// Finds a value in the table by hash and equality predicate, returning a
    /// mutable reference.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        let index = self.find_index(hash, eq)?;
        Some(self.value_mut(index))
    }

    /// Returns the slot index holding the value matching `eq`.
    ///
    /// The index stays valid until the table is rebuilt, cleared, drained,
    /// or the value at it is removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use probe_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::new();
    /// table.entry(5, |&n: &u64| n == 5).or_insert(5);
    ///
    /// let index = table.find_index(5, |&n| n == 5).unwrap();
    /// assert_eq!(table.get_index(index), Some(&5));
    /// assert_eq!(table.find_index(6, |&n| n == 6), None);
    /// ```
    pub fn find_index(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<usize> {
        if self.populated == 0 {
            return None;
        }

        match self.probe(hash, eq) {
            Probe::Found(index) => Some(index),
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    /// Returns the value stored at slot `index`, if that slot is occupied.
    pub fn get_index(&self, index: usize) -> Option<&V> {
        match self.slots.get(index)? {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Returns a mutable reference to the value stored at slot `index`, if
    /// that slot is occupied.
    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut V> {
        match self.slots.get_mut(index)? {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Walks the probe chain from the home slot of `hash`.
    ///
    /// Stops at the first occupied slot whose value matches, or at the first
    /// empty slot. At most `capacity` slots are visited.
    #[inline]
    fn probe(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Probe {
        let mask = self.slots.len() - 1;
        let mut index = hash as usize & mask;

        for _ in 0..self.slots.len() {
            match &self.slots[index] {
                Slot::Empty => return Probe::Vacant(index),
                Slot::Occupied { hash: stored, value } if *stored == hash && eq(value) => {
                    return Probe::Found(index);
                }
                Slot::Occupied { .. } | Slot::Tombstone => {}
            }
            index = (index + 1) & mask;
        }

        Probe::Exhausted
    }

    /// Counts an insert attempt, rebuilding first if it would reach half
    /// occupancy.
    ///
    /// The rebuild target is at least double the current capacity and large
    /// enough that `2 * inserted < capacity` still holds once the pending
    /// insert lands.
    #[inline]
    fn record_insert(&mut self) {
        let inserted = self.inserted + 1;
        if over_load_factor(inserted, self.slots.len()) {
            let target = slots_for(self.populated + 1).max(self.grown_capacity());
            self.rebuild(target);
            self.inserted = self.populated + 1;
        } else {
            self.inserted = inserted;
        }

        debug_assert!(self.populated <= self.inserted);
        debug_assert!(!over_load_factor(self.inserted, self.slots.len()));
    }

    fn grown_capacity(&self) -> usize {
        self.slots.len().checked_mul(2).expect("capacity overflow")
    }

    /// Moves every live entry into a fresh array of `capacity` slots.
    ///
    /// Entries are re-homed from their stored hash, so the hasher is never
    /// consulted. Tombstones are dropped and the attempt counter restarts at
    /// the live count.
    #[cold]
    #[inline(never)]
    fn rebuild(&mut self, capacity: usize) {
        debug_assert!(capacity.is_power_of_two());
        debug_assert!(!over_load_factor(self.populated, capacity));

        let previous = mem::replace(&mut self.slots, empty_slots(capacity));
        event!(
            DEBUG,
            from = previous.len(),
            to = capacity,
            live = self.populated,
            "rebuilding slot table"
        );

        let mask = capacity - 1;
        for slot in previous {
            if let Slot::Occupied { hash, value } = slot {
                let mut index = hash as usize & mask;
                while !self.slots[index].is_empty() {
                    index = (index + 1) & mask;
                }
                self.slots[index] = Slot::Occupied { hash, value };
            }
        }

        self.inserted = self.populated;
    }

    fn value(&self, index: usize) -> &V {
        match &self.slots[index] {
            Slot::Occupied { value, .. } => value,
            Slot::Empty | Slot::Tombstone => unreachable!("slot {index} is not occupied"),
        }
    }

    fn value_mut(&mut self, index: usize) -> &mut V {
        match &mut self.slots[index] {
            Slot::Occupied { value, .. } => value,
            Slot::Empty | Slot::Tombstone => unreachable!("slot {index} is not occupied"),
        }
    }

    /// Replaces the occupied slot at `index` with a tombstone.
    fn take(&mut self, index: usize) -> V {
        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied { value, .. } => {
                self.populated -= 1;
                value
            }
            Slot::Empty | Slot::Tombstone => unreachable!("slot {index} is not occupied"),
        }
    }

    /// Returns the number of tombstoned slots.
    #[cfg(any(test, feature = "stats"))]
    pub fn tombstones(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Tombstone))
            .count()
    }

    /// Computes how far each live entry sits from its home slot.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> ProbeHistogram {
        let mask = self.slots.len() - 1;
        let mut bins = Vec::new();

        for (index, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied { hash, .. } = slot {
                let distance = index.wrapping_sub(*hash as usize & mask) & mask;
                if bins.len() <= distance {
                    bins.resize(distance + 1, 0);
                }
                bins[distance] += 1;
            }
        }

        ProbeHistogram { bins }
    }

    /// Returns occupancy and probe statistics for debugging.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let tombstones = self.tombstones();
        let empty = self.slots.len() - self.populated - tombstones;

        DebugStats {
            populated: self.populated,
            inserted: self.inserted,
            capacity: self.slots.len(),
            tombstones,
            empty,
            load_factor: self.populated as f64 / self.slots.len() as f64,
            longest_probe: self.probe_histogram().bins().len().saturating_sub(1),
        }
    }
}

/// A view into a single entry in the hash table, which may be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashTable`].
///
/// [`entry`]: HashTable::entry
///
/// # Examples
///
/// ```rust
/// # use probe_hash::hash_table::Entry;
/// # use probe_hash::hash_table::HashTable;
/// #
/// let mut table = HashTable::new();
///
/// match table.entry(3, |&n: &u32| n == 3) {
///     Entry::Vacant(entry) => {
///         entry.insert(3);
///     }
///     Entry::Occupied(entry) => {
///         println!("Value already present: {}", entry.get());
///     }
/// }
/// ```
pub enum Entry<'a, V> {
    /// A vacant entry - no matching value is in the table
    Vacant(VacantEntry<'a, V>),
    /// An occupied entry - a matching value is in the table
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value in the entry.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the result of `default` if the entry is vacant and returns a
    /// mutable reference to the value in the entry.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Self {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns the slot index this entry refers to.
    pub fn index(&self) -> usize {
        match self {
            Entry::Occupied(entry) => entry.index,
            Entry::Vacant(entry) => entry.index,
        }
    }
}

impl<'a, V> Entry<'a, V>
where
    V: Default,
{
    /// Inserts `V::default()` if the entry is vacant and returns a mutable
    /// reference to the value in the entry.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in a [`HashTable`].
///
/// Refers to the first empty slot on the probe chain.
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    hash: u64,
    index: usize,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Claims the empty slot for `value` and returns a mutable reference to
    /// it.
    pub fn insert(self, value: V) -> &'a mut V {
        let table = self.table;
        debug_assert!(table.slots[self.index].is_empty());

        table.slots[self.index] = Slot::Occupied {
            hash: self.hash,
            value,
        };
        table.populated += 1;
        table.value_mut(self.index)
    }
}

/// A view into an occupied entry in a [`HashTable`].
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    index: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        self.table.value(self.index)
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        self.table.value_mut(self.index)
    }

    /// Converts the entry into a mutable reference to the value with the
    /// lifetime of the table borrow.
    pub fn into_mut(self) -> &'a mut V {
        self.table.value_mut(self.index)
    }

    /// Replaces the value in the entry, returning the old one.
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    /// Removes the value from the table, leaving a tombstone in its slot.
    pub fn remove(self) -> V {
        self.table.take(self.index)
    }
}

/// Read or write access to the value held by a slot.
///
/// Implemented for shared, exclusive and owned slots so a single raw
/// iterator serves every iteration flavour.
trait SlotAccess {
    type Value;

    fn into_value(self) -> Option<Self::Value>;
}

impl<'a, V> SlotAccess for &'a Slot<V> {
    type Value = &'a V;

    #[inline(always)]
    fn into_value(self) -> Option<Self::Value> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Empty | Slot::Tombstone => None,
        }
    }
}

impl<'a, V> SlotAccess for &'a mut Slot<V> {
    type Value = &'a mut V;

    #[inline(always)]
    fn into_value(self) -> Option<Self::Value> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Empty | Slot::Tombstone => None,
        }
    }
}

impl<V> SlotAccess for Slot<V> {
    type Value = V;

    #[inline(always)]
    fn into_value(self) -> Option<Self::Value> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Empty | Slot::Tombstone => None,
        }
    }
}

/// Forward scan over slots that skips everything but occupied slots.
struct RawIter<I> {
    slots: Enumerate<I>,
    remaining: usize,
}

impl<I: Iterator> RawIter<I> {
    fn new(slots: I, remaining: usize) -> Self {
        Self {
            slots: slots.enumerate(),
            remaining,
        }
    }
}

impl<I> Iterator for RawIter<I>
where
    I: Iterator,
    I::Item: SlotAccess,
{
    type Item = (usize, <I::Item as SlotAccess>::Value);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        for (index, slot) in self.slots.by_ref() {
            if let Some(value) = slot.into_value() {
                self.remaining -= 1;
                return Some((index, value));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// An iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`iter`] method on [`HashTable`].
///
/// [`iter`]: HashTable::iter
pub struct Iter<'a, V> {
    inner: RawIter<core::slice::Iter<'a, Slot<V>>>,
}

impl<'a, V> Iter<'a, V> {
    /// Yields `(slot index, value)` pairs instead of bare values.
    pub fn indexed(self) -> impl Iterator<Item = (usize, &'a V)> {
        self.inner
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// A mutable iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`iter_mut`] method on [`HashTable`].
///
/// [`iter_mut`]: HashTable::iter_mut
pub struct IterMut<'a, V> {
    inner: RawIter<core::slice::IterMut<'a, Slot<V>>>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

/// An owning iterator over the values of a [`HashTable`].
pub struct IntoIter<V> {
    inner: RawIter<alloc::vec::IntoIter<Slot<V>>>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

/// A draining iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`drain`] method on [`HashTable`].
///
/// [`drain`]: HashTable::drain
pub struct Drain<'a, V> {
    inner: RawIter<alloc::vec::IntoIter<Slot<V>>>,
    _table: PhantomData<&'a mut HashTable<V>>,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Drain<'_, V> {}

impl<V> IntoIterator for HashTable<V> {
    type Item = V;
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: RawIter::new(self.slots.into_iter(), self.populated),
        }
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V> IntoIterator for &'a mut HashTable<V> {
    type Item = &'a mut V;
    type IntoIter = IterMut<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
