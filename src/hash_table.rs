use alloc::alloc::handle_alloc_error;
use core::alloc::Layout;
use core::fmt::Debug;
use core::mem::MaybeUninit;
use core::ptr::NonNull;

/// Baseline allocation unit for new tables. A fresh table always starts at
/// `GROWTH_SIZE * GROWTH_FACTOR` slots.
const GROWTH_SIZE: usize = 1024;

/// Capacity multiplier applied on every resize. Must keep the slot count a
/// power of two.
const GROWTH_FACTOR: usize = 2;

/// Control byte of an empty slot. The occupied flag lives in the top bit, so
/// any byte with the top bit clear marks a free slot and the whole control
/// region can be initialized with a single `write_bytes`.
const EMPTY: u8 = 0x00;

/// Occupied flag OR'd into every fingerprint.
const BIT_OCCUPIED: u8 = 0b1000_0000;

/// Maximum number of elements a table with `slots` slots may hold before the
/// next insert triggers a resize (70% load).
#[inline(always)]
fn max_load(slots: usize) -> usize {
    debug_assert!(slots <= usize::MAX / 7);
    slots * 7 / 10
}

/// Control byte for an occupied slot holding an element with this hash.
///
/// The top seven bits of the 64-bit hash become the fingerprint. They are
/// independent of the index bits at the bottom of the hash, so a fingerprint
/// match is meaningful even inside a collision cluster. If this is ever
/// ported to a hash narrower than 64 bits the shift has to be re-derived
/// rather than silently truncated.
#[inline(always)]
fn control_byte(hash: u64) -> u8 {
    (hash >> 57) as u8 | BIT_OCCUPIED
}

#[inline(always)]
fn is_empty_byte(ctrl: u8) -> bool {
    ctrl & BIT_OCCUPIED == 0
}

#[derive(Debug)]
struct DataLayout {
    layout: Layout,
    ctrl_offset: usize,
    hashes_offset: usize,
    slots_offset: usize,
}

impl DataLayout {
    fn new<V>(slots: usize) -> Self {
        let ctrl_layout = Layout::array::<u8>(slots).expect("allocation size overflow");
        let hashes_layout =
            Layout::array::<MaybeUninit<u64>>(slots).expect("allocation size overflow");
        let slots_layout =
            Layout::array::<MaybeUninit<V>>(slots).expect("allocation size overflow");

        let (layout, ctrl_offset) = Layout::new::<()>()
            .extend(ctrl_layout)
            .expect("allocation size overflow");
        let (layout, hashes_offset) = layout
            .extend(hashes_layout)
            .expect("allocation size overflow");
        let (layout, slots_offset) = layout
            .extend(slots_layout)
            .expect("allocation size overflow");

        DataLayout {
            layout,
            ctrl_offset,
            hashes_offset,
            slots_offset,
        }
    }
}

/// An open-addressing hash table using fingerprint-filtered linear probing
/// and backward-shift deletion.
///
/// `HashTable<V>` stores values of type `V` and provides fast insertion,
/// lookup, and removal operations. Unlike standard hash maps, this
/// implementation requires you to provide both the hash value and an equality
/// predicate for each operation.
///
/// Capacity is always a power of two, so the probe sequence advances with a
/// masked increment and wraps around the end of the slot array. Each slot has
/// a one-byte control word holding an occupied flag and a 7-bit fingerprint
/// of the element's hash; probing only calls the equality predicate after the
/// fingerprint matches. Removal closes the vacated hole by shifting the
/// following cluster members backward, so the table never accumulates
/// tombstones.
///
/// ## Performance Characteristics
///
/// - **Memory**: 9 bytes of metadata per slot (control byte plus cached
///   hash), plus the size of `V` per slot.
/// - **Lookup/insert**: O(1) expected, O(cluster length) worst case.
/// - **Remove**: O(cluster length) including the backward shift.
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use backshift_hash::hash_table::Entry;
/// # use backshift_hash::hash_table::HashTable;
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
/// let mut table = HashTable::with_capacity(100);
/// let hash = hash_id(123);
///
/// match table.entry(hash, |p: &Person| p.id == 123) {
///     Entry::Vacant(entry) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     Entry::Occupied(_) => {
///         println!("Person already exists");
///     }
/// }
/// ```
pub struct HashTable<V> {
    layout: DataLayout,
    alloc: NonNull<u8>,

    /// Slot count minus one. The slot count is a power of two, so this is
    /// also the index mask for the probe sequence.
    mask: usize,
    filled: usize,

    _phantom: core::marker::PhantomData<V>,
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashTable")
            .field("filled", &self.filled)
            .field("capacity", &(self.mask + 1))
            .finish_non_exhaustive()
    }
}

impl<V> Clone for HashTable<V>
where
    V: Clone,
{
    fn clone(&self) -> Self {
        let slots = self.mask + 1;
        let layout = DataLayout::new::<V>(slots);
        // SAFETY: The layout size is non-zero (at least one control byte per
        // slot) and allocation failure is handled.
        let alloc = unsafe {
            let raw_alloc = alloc::alloc::alloc(layout.layout);
            if raw_alloc.is_null() {
                handle_alloc_error(layout.layout);
            }
            core::ptr::write_bytes(raw_alloc.add(layout.ctrl_offset), EMPTY, slots);
            NonNull::new_unchecked(raw_alloc)
        };

        let mut new_table = Self {
            layout,
            alloc,
            mask: self.mask,
            filled: 0,
            _phantom: core::marker::PhantomData,
        };

        // Elements are duplicated at their original indices, so reachability
        // carries over unchanged. The control byte is only written after the
        // clone succeeds; a panicking `V::clone` leaves the new table
        // consistent.
        //
        // SAFETY: Both tables have the same slot count, occupied indices are
        // identified by control bytes, and the corresponding hashes and
        // values are initialized.
        unsafe {
            for index in 0..slots {
                let state = *self.ctrl_ptr().as_ref().get_unchecked(index);
                if is_empty_byte(state) {
                    continue;
                }

                let hash = self
                    .hashes_ptr()
                    .as_ref()
                    .get_unchecked(index)
                    .assume_init_read();
                let value = self
                    .slots_ptr()
                    .as_ref()
                    .get_unchecked(index)
                    .assume_init_ref()
                    .clone();

                new_table
                    .slots_ptr()
                    .as_mut()
                    .get_unchecked_mut(index)
                    .write(value);
                new_table
                    .hashes_ptr()
                    .as_mut()
                    .get_unchecked_mut(index)
                    .write(hash);
                *new_table.ctrl_ptr().as_mut().get_unchecked_mut(index) = state;
                new_table.filled += 1;
            }
        }

        debug_assert_eq!(new_table.filled, self.filled);
        new_table
    }
}

impl<V> Drop for HashTable<V> {
    fn drop(&mut self) {
        // SAFETY: Occupied control bytes identify initialized values; the
        // allocation was produced by `alloc` with `self.layout.layout`.
        unsafe {
            if core::mem::needs_drop::<V>() && self.filled > 0 {
                for index in 0..=self.mask {
                    if !is_empty_byte(*self.ctrl_ptr().as_ref().get_unchecked(index)) {
                        self.slots_ptr()
                            .as_mut()
                            .get_unchecked_mut(index)
                            .assume_init_drop();
                    }
                }
            }

            alloc::alloc::dealloc(self.alloc.as_ptr(), self.layout.layout);
        }
    }
}

impl<V> HashTable<V> {
    /// Creates a new hash table able to hold at least `capacity` elements
    /// without resizing.
    ///
    /// The slot count is rounded up to a power of two and never drops below
    /// the baseline of 2048 slots, so the actual capacity is usually larger
    /// than requested.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<String> = HashTable::with_capacity(100);
    /// assert!(table.capacity() >= 100);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = GROWTH_SIZE * GROWTH_FACTOR;
        while max_load(slots) <= capacity {
            slots *= GROWTH_FACTOR;
        }

        let layout = DataLayout::new::<V>(slots);
        // SAFETY: The layout size is non-zero (at least one control byte per
        // slot). The control region is initialized to EMPTY; hash and slot
        // regions stay uninitialized until their control byte is set.
        let alloc = unsafe {
            let raw_alloc = alloc::alloc::alloc(layout.layout);
            if raw_alloc.is_null() {
                handle_alloc_error(layout.layout);
            }
            core::ptr::write_bytes(raw_alloc.add(layout.ctrl_offset), EMPTY, slots);
            NonNull::new_unchecked(raw_alloc)
        };

        Self {
            layout,
            alloc,
            mask: slots - 1,
            filled: 0,
            _phantom: core::marker::PhantomData,
        }
    }

    fn ctrl_ptr(&self) -> NonNull<[u8]> {
        // SAFETY: Allocation is valid and properly sized for the control
        // slice.
        unsafe {
            NonNull::slice_from_raw_parts(
                self.alloc.add(self.layout.ctrl_offset).cast(),
                self.mask + 1,
            )
        }
    }

    fn hashes_ptr(&self) -> NonNull<[MaybeUninit<u64>]> {
        // SAFETY: Allocation is valid and properly sized for the hashes
        // slice.
        unsafe {
            NonNull::slice_from_raw_parts(
                self.alloc.add(self.layout.hashes_offset).cast(),
                self.mask + 1,
            )
        }
    }

    fn slots_ptr(&self) -> NonNull<[MaybeUninit<V>]> {
        // SAFETY: Allocation is valid and properly sized for the slots slice.
        unsafe {
            NonNull::slice_from_raw_parts(
                self.alloc.add(self.layout.slots_offset).cast(),
                self.mask + 1,
            )
        }
    }

    #[inline(always)]
    fn home_index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    /// Walk the probe sequence for `hash`. Returns `Ok(index)` of the first
    /// occupied slot whose control byte and equality predicate both match, or
    /// `Err(index)` of the first empty slot.
    ///
    /// Terminates because the load factor cap guarantees at least one empty
    /// slot.
    #[inline]
    fn probe_slot(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Result<usize, usize> {
        let ctrl = control_byte(hash);
        let mut index = self.home_index(hash);

        // SAFETY: `index` stays masked to the slot range; occupied control
        // bytes identify initialized values.
        unsafe {
            loop {
                let state = *self.ctrl_ptr().as_ref().get_unchecked(index);
                if is_empty_byte(state) {
                    return Err(index);
                }

                if state == ctrl
                    && eq(self
                        .slots_ptr()
                        .as_ref()
                        .get_unchecked(index)
                        .assume_init_ref())
                {
                    return Ok(index);
                }

                index = (index + 1) & self.mask;
            }
        }
    }

    /// Gets an entry for the given hash and equality predicate.
    ///
    /// This method returns an `Entry` enum that allows for efficient
    /// insertion or modification of values. A resize runs up front when the
    /// table is at its load limit, so the returned entry always has a slot to
    /// insert into.
    ///
    /// # Arguments
    ///
    /// * `hash` - The hash value for the entry
    /// * `eq` - A predicate function that returns `true` for matching values
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::hash_table::Entry;
    /// # use backshift_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(10);
    ///
    /// // Insert or update pattern
    /// match table.entry(42, |&(id, _): &(u64, &str)| id == 42) {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert((42, "answer"));
    ///     }
    ///     Entry::Occupied(mut entry) => {
    ///         entry.get_mut().1 = "updated";
    ///     }
    /// }
    ///
    /// // Or use the convenience method
    /// table
    ///     .entry(42, |&(id, _)| id == 42)
    ///     .or_insert((42, "unused"));
    /// assert_eq!(table.len(), 1);
    /// ```
    #[inline]
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        if self.filled >= max_load(self.mask + 1) {
            self.grow();
        }

        match self.probe_slot(hash, eq) {
            Ok(index) => Entry::Occupied(OccupiedEntry { table: self, index }),
            Err(index) => Entry::Vacant(VacantEntry {
                table: self,
                hash,
                index,
            }),
        }
    }

    /// Finds a value in the table by hash and equality predicate.
    ///
    /// Returns a reference to the value if found, or `None` if no matching
    /// value exists. The search stops at the first empty slot on the probe
    /// sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(42, |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.find(42, |&n| n == 42), Some(&42));
    /// assert_eq!(table.find(99, |&n| n == 99), None);
    /// ```
    #[inline]
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        if self.filled == 0 {
            return None;
        }

        let index = self.probe_slot(hash, eq).ok()?;
        // SAFETY: `probe_slot` only returns `Ok` for occupied slots, which
        // hold initialized values.
        Some(unsafe {
            self.slots_ptr()
                .as_ref()
                .get_unchecked(index)
                .assume_init_ref()
        })
    }

    /// Finds a value in the table by hash and equality predicate, returning a
    /// mutable reference.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(42, |&(id, _): &(u64, u64)| id == 42).or_insert((42, 0));
    ///
    /// if let Some(value) = table.find_mut(42, |&(id, _)| id == 42) {
    ///     value.1 = 100;
    /// }
    /// assert_eq!(table.find(42, |&(id, _)| id == 42), Some(&(42, 100)));
    /// ```
    #[inline]
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        if self.filled == 0 {
            return None;
        }

        let index = self.probe_slot(hash, eq).ok()?;
        // SAFETY: `probe_slot` only returns `Ok` for occupied slots, which
        // hold initialized values.
        Some(unsafe {
            self.slots_ptr()
                .as_mut()
                .get_unchecked_mut(index)
                .assume_init_mut()
        })
    }

    /// Removes and returns a value from the table.
    ///
    /// After the value is taken out, the hole is closed by shifting the
    /// following cluster members backward, so every remaining element stays
    /// reachable from its home slot and no tombstone is left behind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(42, |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.remove(42, |&n| n == 42), Some(42));
    /// assert!(table.is_empty());
    /// assert_eq!(table.remove(42, |&n| n == 42), None);
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        if self.filled == 0 {
            return None;
        }

        let index = self.probe_slot(hash, eq).ok()?;
        // SAFETY: `probe_slot` only returns `Ok` for occupied slots.
        Some(unsafe { self.remove_at(index) })
    }

    /// Read out the value at `index` and close the hole by backward-shift.
    ///
    /// Walks the contiguous occupied run after the hole. A visited element
    /// moves into the hole only when its home slot is not ahead of the hole
    /// on the probe path, i.e. when `dist(home, hole) <= dist(home, current)`
    /// with circular distances. Moving such an element never makes it
    /// unreachable, and every element left in place is still reachable
    /// because the hole sits behind its home.
    ///
    /// # Safety
    ///
    /// The caller must ensure the slot at `index` is occupied.
    unsafe fn remove_at(&mut self, index: usize) -> V {
        let mask = self.mask;
        let capacity = mask + 1;

        // SAFETY: Caller guarantees `index` is occupied; the shift only reads
        // control bytes, stored hashes, and values of occupied slots, and
        // `current` stays masked to the slot range. The run is shorter than
        // the table because the load factor cap guarantees an empty slot.
        unsafe {
            let value = self
                .slots_ptr()
                .as_ref()
                .get_unchecked(index)
                .assume_init_read();

            let mut hole = index;
            let mut current = (hole + 1) & mask;
            loop {
                let state = *self.ctrl_ptr().as_ref().get_unchecked(current);
                if is_empty_byte(state) {
                    break;
                }

                let hash = self
                    .hashes_ptr()
                    .as_ref()
                    .get_unchecked(current)
                    .assume_init_read();
                let home = (hash as usize) & mask;

                let hole_distance = (hole + capacity - home) & mask;
                let current_distance = (current + capacity - home) & mask;
                if hole_distance <= current_distance {
                    let slots = self.slots_ptr().as_mut().as_mut_ptr();
                    core::ptr::copy_nonoverlapping(slots.add(current), slots.add(hole), 1);
                    self.hashes_ptr()
                        .as_mut()
                        .get_unchecked_mut(hole)
                        .write(hash);
                    *self.ctrl_ptr().as_mut().get_unchecked_mut(hole) = state;

                    hole = current;
                }

                current = (current + 1) & mask;
            }

            *self.ctrl_ptr().as_mut().get_unchecked_mut(hole) = EMPTY;
            self.filled -= 1;

            value
        }
    }

    #[cold]
    fn grow(&mut self) {
        self.grow_to((self.mask + 1) * GROWTH_FACTOR);
    }

    fn grow_to(&mut self, new_slots: usize) {
        debug_assert!(new_slots.is_power_of_two());
        debug_assert!(new_slots > self.mask + 1);

        let new_layout = DataLayout::new::<V>(new_slots);
        // SAFETY: The layout size is non-zero; allocation failure diverges
        // through `handle_alloc_error` before any table state changes, so a
        // failed resize cannot leave a half-moved table behind.
        let new_alloc = unsafe {
            let raw_alloc = alloc::alloc::alloc(new_layout.layout);
            if raw_alloc.is_null() {
                handle_alloc_error(new_layout.layout);
            }
            core::ptr::write_bytes(raw_alloc.add(new_layout.ctrl_offset), EMPTY, new_slots);
            NonNull::new_unchecked(raw_alloc)
        };

        let old_layout = core::mem::replace(&mut self.layout, new_layout);
        let old_alloc = core::mem::replace(&mut self.alloc, new_alloc);
        let old_slots = self.mask + 1;
        self.mask = new_slots - 1;

        // SAFETY: The old regions are described by `old_layout` and stay
        // alive until the dealloc below. Values and hashes are moved bitwise
        // into the new allocation; only the new table drops them. The new
        // table starts empty, so probing for the first empty slot is a plain
        // insertion without a duplicate check, and every re-inserted element
        // is reachable from its home by construction.
        unsafe {
            let old_ctrl: NonNull<[u8]> = NonNull::slice_from_raw_parts(
                old_alloc.add(old_layout.ctrl_offset).cast(),
                old_slots,
            );
            let old_hashes: NonNull<[MaybeUninit<u64>]> = NonNull::slice_from_raw_parts(
                old_alloc.add(old_layout.hashes_offset).cast(),
                old_slots,
            );
            let old_values: NonNull<[MaybeUninit<V>]> = NonNull::slice_from_raw_parts(
                old_alloc.add(old_layout.slots_offset).cast(),
                old_slots,
            );

            for old_index in 0..old_slots {
                let state = *old_ctrl.as_ref().get_unchecked(old_index);
                if is_empty_byte(state) {
                    continue;
                }

                let hash = old_hashes
                    .as_ref()
                    .get_unchecked(old_index)
                    .assume_init_read();

                let mut index = self.home_index(hash);
                while !is_empty_byte(*self.ctrl_ptr().as_ref().get_unchecked(index)) {
                    index = (index + 1) & self.mask;
                }

                // The fingerprint only depends on the high hash bits, so the
                // control byte carries over unchanged.
                *self.ctrl_ptr().as_mut().get_unchecked_mut(index) = state;
                self.hashes_ptr()
                    .as_mut()
                    .get_unchecked_mut(index)
                    .write(hash);
                core::ptr::copy_nonoverlapping(
                    old_values.as_ref().get_unchecked(old_index).as_ptr(),
                    self.slots_ptr()
                        .as_mut()
                        .get_unchecked_mut(index)
                        .as_mut_ptr(),
                    1,
                );
            }

            alloc::alloc::dealloc(old_alloc.as_ptr(), old_layout.layout);
        }
    }

    /// Reserves capacity for at least `additional` more elements.
    ///
    /// Does nothing if the current capacity is already sufficient. The table
    /// never shrinks.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::hash_table::HashTable;
    /// #
    /// let mut table: HashTable<u64> = HashTable::with_capacity(0);
    /// let original = table.capacity();
    ///
    /// table.reserve(original + 1);
    /// assert!(table.capacity() > original);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        let required = self.filled.saturating_add(additional);
        let mut new_slots = self.mask + 1;
        while max_load(new_slots) <= required {
            new_slots *= GROWTH_FACTOR;
        }

        if new_slots > self.mask + 1 {
            self.grow_to(new_slots);
        }
    }

    /// Returns an iterator over all values in the table.
    ///
    /// The iterator yields `&V` references in storage order, which is neither
    /// insertion order nor hash order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(1, |&n: &u64| n == 1).or_insert(1);
    /// table.entry(2, |&n: &u64| n == 2).or_insert(2);
    ///
    /// let sum: u64 = table.iter().sum();
    /// assert_eq!(sum, 3);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            table: self,
            index: 0,
        }
    }

    /// Returns an iterator that removes and yields all values from the table.
    ///
    /// After calling `drain()`, the table is empty. Dropping the iterator
    /// before exhaustion removes and drops the remaining values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(1, |&n: &u64| n == 1).or_insert(1);
    ///
    /// let values: Vec<u64> = table.drain().collect();
    /// assert!(table.is_empty());
    /// assert_eq!(values, vec![1]);
    /// ```
    pub fn drain(&mut self) -> Drain<'_, V> {
        Drain {
            table: self,
            index: 0,
        }
    }

    /// Returns `true` if the table contains no elements.
    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Returns the number of elements in the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// assert_eq!(table.len(), 0);
    ///
    /// table.entry(1, |&n: &u64| n == 1).or_insert(1);
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.filled
    }

    /// Returns the slot count of the table.
    ///
    /// This is the raw power-of-two slot count; the table resizes once the
    /// number of elements reaches 70% of it.
    pub fn capacity(&self) -> usize {
        self.mask + 1
    }

    /// Removes all elements from the table.
    ///
    /// This operation preserves the table's allocated capacity. All values
    /// are properly dropped if they implement `Drop`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(1, |&n: &u64| n == 1).or_insert(1);
    /// table.entry(2, |&n: &u64| n == 2).or_insert(2);
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// ```
    pub fn clear(&mut self) {
        // SAFETY: Occupied control bytes identify initialized values; after
        // dropping them, resetting the control region marks every slot
        // uninitialized again.
        unsafe {
            if core::mem::needs_drop::<V>() && self.filled > 0 {
                for index in 0..=self.mask {
                    if !is_empty_byte(*self.ctrl_ptr().as_ref().get_unchecked(index)) {
                        self.slots_ptr()
                            .as_mut()
                            .get_unchecked_mut(index)
                            .assume_init_drop();
                    }
                }
            }

            core::ptr::write_bytes(
                self.alloc.as_ptr().add(self.layout.ctrl_offset),
                EMPTY,
                self.mask + 1,
            );
        }

        self.filled = 0;
    }

    /// Verifies that every occupied slot is reachable by probing from its
    /// home index without crossing an empty slot, and that the element count
    /// matches the control array.
    #[cfg(test)]
    pub fn assert_probe_invariant(&self) {
        // SAFETY: All accesses stay within the slot range; occupied control
        // bytes identify initialized hashes.
        unsafe {
            let mut occupied = 0;
            for index in 0..=self.mask {
                if is_empty_byte(*self.ctrl_ptr().as_ref().get_unchecked(index)) {
                    continue;
                }
                occupied += 1;

                let hash = self
                    .hashes_ptr()
                    .as_ref()
                    .get_unchecked(index)
                    .assume_init_read();
                let mut probe = self.home_index(hash);
                while probe != index {
                    assert!(
                        !is_empty_byte(*self.ctrl_ptr().as_ref().get_unchecked(probe)),
                        "slot {index} is cut off from its home slot {}",
                        self.home_index(hash)
                    );
                    probe = (probe + 1) & self.mask;
                }
            }

            assert_eq!(occupied, self.filled);
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
/// # use backshift_hash::hash_table::Entry;
/// # use backshift_hash::hash_table::HashTable;
/// #
/// let mut table = HashTable::with_capacity(10);
///
/// match table.entry(7, |&n: &u64| n == 7) {
///     Entry::Vacant(entry) => {
///         entry.insert(7);
///     }
///     Entry::Occupied(entry) => {
///         println!("already present: {}", entry.get());
///     }
/// }
/// ```
pub enum Entry<'a, V> {
    /// A vacant entry - the key is not present in the table
    Vacant(VacantEntry<'a, V>),
    /// An occupied entry - the key is present in the table
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts a default value if the entry is vacant and returns a mutable
    /// reference.
    ///
    /// If the entry is occupied, returns a mutable reference to the existing
    /// value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(10);
    ///
    /// let value = table.entry(7, |&n: &u64| n == 7).or_insert(7);
    /// assert_eq!(*value, 7);
    ///
    /// // A second insert with the same hash and predicate is a no-op.
    /// table.entry(7, |&n: &u64| n == 7).or_insert(99);
    /// assert_eq!(table.find(7, |&n| n == 7), Some(&7));
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    ///
    /// If the entry is occupied, the closure is not called.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry.
    ///
    /// If the entry is vacant, returns `None` without inserting anything.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(10);
    ///
    /// assert!(table.entry(7, |&n: &u64| n == 7).and_modify(|v| *v += 1).is_none());
    ///
    /// table.entry(7, |&n: &u64| n == 7).or_insert(7);
    /// assert_eq!(
    ///     table.entry(7, |&n: &u64| n == 7).and_modify(|v| *v += 1),
    ///     Some(&mut 8)
    /// );
    /// ```
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Option<&'a mut V> {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Some(entry.into_mut())
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Inserts `V::default()` if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the hash table.
///
/// This struct is created by the [`entry`] method on [`HashTable`] when no
/// matching value is present.
///
/// [`entry`]: HashTable::entry
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    hash: u64,
    index: usize,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Inserts a value into the vacant slot and returns a mutable reference
    /// to it.
    pub fn insert(self, value: V) -> &'a mut V {
        // SAFETY: `index` was located by the probe as the first empty slot on
        // the sequence for `hash`, and no mutation has happened since the
        // entry was created (it holds the exclusive table borrow). Writing
        // the element at the first empty slot of its own probe sequence
        // keeps every existing element reachable.
        unsafe {
            *self
                .table
                .ctrl_ptr()
                .as_mut()
                .get_unchecked_mut(self.index) = control_byte(self.hash);
            self.table
                .hashes_ptr()
                .as_mut()
                .get_unchecked_mut(self.index)
                .write(self.hash);
            self.table.filled += 1;

            self.table
                .slots_ptr()
                .as_mut()
                .get_unchecked_mut(self.index)
                .write(value)
        }
    }
}

/// A view into an occupied entry in the hash table.
///
/// This struct is created by the [`entry`] method on [`HashTable`] when a
/// matching value is present.
///
/// [`entry`]: HashTable::entry
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    index: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        // SAFETY: `index` was validated as occupied during the lookup.
        unsafe {
            self.table
                .slots_ptr()
                .as_ref()
                .get_unchecked(self.index)
                .assume_init_ref()
        }
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        // SAFETY: `index` was validated as occupied during the lookup.
        unsafe {
            self.table
                .slots_ptr()
                .as_mut()
                .get_unchecked_mut(self.index)
                .assume_init_mut()
        }
    }

    /// Converts the entry into a mutable reference to the value with the
    /// lifetime of the table borrow.
    pub fn into_mut(self) -> &'a mut V {
        // SAFETY: `index` was validated as occupied during the lookup.
        unsafe {
            self.table
                .slots_ptr()
                .as_mut()
                .get_unchecked_mut(self.index)
                .assume_init_mut()
        }
    }

    /// Removes the entry from the table and returns the value.
    ///
    /// The vacated hole is closed by the backward-shift pass, so the
    /// remaining elements stay reachable from their home slots.
    pub fn remove(self) -> V {
        // SAFETY: `index` was validated as occupied during the lookup.
        unsafe { self.table.remove_at(self.index) }
    }
}

/// An iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`iter`] method on [`HashTable`]. It yields
/// `&V` references in storage order.
///
/// [`iter`]: HashTable::iter
pub struct Iter<'a, V> {
    table: &'a HashTable<V>,
    index: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.table.filled == 0 {
            return None;
        }

        // SAFETY: `index` is bounds-checked against the slot count; occupied
        // control bytes identify initialized values.
        unsafe {
            while self.index <= self.table.mask {
                let index = self.index;
                self.index += 1;

                if !is_empty_byte(*self.table.ctrl_ptr().as_ref().get_unchecked(index)) {
                    return Some(
                        self.table
                            .slots_ptr()
                            .as_ref()
                            .get_unchecked(index)
                            .assume_init_ref(),
                    );
                }
            }

            None
        }
    }
}

/// A draining iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`drain`] method on [`HashTable`]. It yields
/// owned `V` values and empties the table as it goes; dropping it removes the
/// values that were not yet yielded.
///
/// [`drain`]: HashTable::drain
pub struct Drain<'a, V> {
    table: &'a mut HashTable<V>,
    index: usize,
}

impl<V> Drop for Drain<'_, V> {
    fn drop(&mut self) {
        for _ in &mut *self {}
    }
}

impl<'a, V> Iterator for Drain<'a, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.table.filled == 0 {
            return None;
        }

        // SAFETY: `index` is bounds-checked against the slot count; occupied
        // control bytes identify initialized values, and clearing the byte
        // before reading the value out ensures it is neither dropped by the
        // table nor yielded twice.
        unsafe {
            while self.index <= self.table.mask {
                let index = self.index;
                self.index += 1;

                if !is_empty_byte(*self.table.ctrl_ptr().as_ref().get_unchecked(index)) {
                    *self.table.ctrl_ptr().as_mut().get_unchecked_mut(index) = EMPTY;
                    self.table.filled -= 1;
                    return Some(
                        self.table
                            .slots_ptr()
                            .as_ref()
                            .get_unchecked(index)
                            .assume_init_read(),
                    );
                }
            }

            None
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use core::cell::Cell;
    use core::hash::Hasher;
    use core::sync::atomic::AtomicUsize;
    use core::sync::atomic::Ordering;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    struct HashState {
        k0: u64,
        k1: u64,
    }

    impl HashState {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k0: rng.try_next_u64().unwrap(),
                k1: rng.try_next_u64().unwrap(),
            }
        }

        fn hash_key(&self, key: u64) -> u64 {
            let mut h = SipHasher::new_with_keys(self.k0, self.k1);
            h.write_u64(key);
            h.finish()
        }
    }

    #[derive(Debug, PartialEq, Eq, Clone)]
    struct Item {
        key: u64,
        value: i32,
    }

    fn insert_forced(table: &mut HashTable<Item>, hash: u64, key: u64, value: i32) {
        match table.entry(hash, |v| v.key == key) {
            Entry::Vacant(entry) => {
                entry.insert(Item { key, value });
            }
            Entry::Occupied(_) => panic!("unexpected occupied entry for key {key}"),
        }
    }

    #[test]
    fn insert_and_find() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::with_capacity(0);

        for k in 0..32u64 {
            let hash = state.hash_key(k);
            insert_forced(&mut table, hash, k, (k as i32) * 2);
        }
        assert_eq!(table.len(), 32);

        for k in 0..32u64 {
            let hash = state.hash_key(k);
            assert_eq!(
                table.find(hash, |v| v.key == k),
                Some(&Item {
                    key: k,
                    value: (k as i32) * 2
                })
            );
        }

        let miss = state.hash_key(999);
        assert!(table.find(miss, |v| v.key == 999).is_none());
        table.assert_probe_invariant();
    }

    #[test]
    fn overwrite_keeps_len() {
        let mut table: HashTable<Item> = HashTable::with_capacity(0);
        insert_forced(&mut table, 10, 1, 100);

        match table.entry(10, |v| v.key == 1) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().value = 101;
            }
            Entry::Vacant(_) => panic!("expected occupied entry"),
        }

        assert_eq!(table.len(), 1);
        assert_eq!(table.find(10, |v| v.key == 1).map(|v| v.value), Some(101));
    }

    #[test]
    fn remove_missing_returns_none() {
        let mut table: HashTable<Item> = HashTable::with_capacity(0);
        assert_eq!(table.remove(7, |v| v.key == 7), None);

        insert_forced(&mut table, 7, 7, 70);
        assert_eq!(table.remove(8, |v| v.key == 8), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn remove_backshifts_cluster() {
        let mut table: HashTable<Item> = HashTable::with_capacity(0);

        // A(home=2) lands at 2, B(home=2) at 3, D(home=3) wants 3 and lands
        // at 4. Removing A must shift B back into 2 and D back into 3.
        insert_forced(&mut table, 2, 1, 100);
        insert_forced(&mut table, 2, 2, 200);
        insert_forced(&mut table, 3, 3, 300);

        assert_eq!(
            table.remove(2, |v| v.key == 1),
            Some(Item { key: 1, value: 100 })
        );
        assert_eq!(table.len(), 2);

        assert_eq!(table.find(2, |v| v.key == 2).map(|v| v.value), Some(200));
        assert_eq!(table.find(3, |v| v.key == 3).map(|v| v.value), Some(300));
        assert_eq!(table.remove(2, |v| v.key == 1), None);
        table.assert_probe_invariant();
    }

    #[test]
    fn remove_backshifts_across_wraparound() {
        let mut table: HashTable<Item> = HashTable::with_capacity(0);
        let capacity = table.capacity() as u64;
        let home = capacity - 2;

        // Four entries with the same forced home near the end of the slot
        // array; they land at home, home+1, 0, and 1.
        for (key, value) in [(10, 10), (11, 20), (12, 30), (13, 40)] {
            insert_forced(&mut table, home, key, value);
        }
        assert_eq!(table.len(), 4);

        assert!(table.remove(home, |v| v.key == 10).is_some());
        table.assert_probe_invariant();
        for key in [11, 12, 13] {
            assert!(table.find(home, |v| v.key == key).is_some());
        }

        assert!(table.remove(home, |v| v.key == 12).is_some());
        table.assert_probe_invariant();
        assert_eq!(table.find(home, |v| v.key == 11).map(|v| v.value), Some(20));
        assert_eq!(table.find(home, |v| v.key == 13).map(|v| v.value), Some(40));
    }

    #[test]
    fn fingerprint_mismatch_does_not_mask_collisions() {
        let mut table: HashTable<Item> = HashTable::with_capacity(0);

        // Same home index, different high bits: the control bytes differ, so
        // the probe must skip over the first entry by fingerprint alone and
        // still find the second.
        let low = 5u64;
        let high = 5u64 | (3 << 57);
        insert_forced(&mut table, low, 1, 100);
        insert_forced(&mut table, high, 2, 200);

        assert_eq!(table.find(low, |v| v.key == 1).map(|v| v.value), Some(100));
        assert_eq!(table.find(high, |v| v.key == 2).map(|v| v.value), Some(200));

        assert!(table.remove(low, |v| v.key == 1).is_some());
        assert_eq!(table.find(high, |v| v.key == 2).map(|v| v.value), Some(200));
        table.assert_probe_invariant();
    }

    #[test]
    fn growth_preserves_elements() {
        let mut table: HashTable<Item> = HashTable::with_capacity(0);
        let initial_capacity = table.capacity();
        let count = max_load(initial_capacity) as u64 + 50;

        // Identity hashes exercise dense clusters during the rehash.
        for key in 0..count {
            insert_forced(&mut table, key, key, (key as i32) * 10);
        }

        assert!(table.capacity() > initial_capacity);
        assert_eq!(table.len(), count as usize);
        table.assert_probe_invariant();

        for key in 0..count {
            assert_eq!(
                table.find(key, |v| v.key == key).map(|v| v.value),
                Some((key as i32) * 10)
            );
        }
    }

    #[test]
    fn growth_triggers_at_load_limit() {
        let mut table: HashTable<Item> = HashTable::with_capacity(0);
        let capacity = table.capacity();
        let limit = max_load(capacity) as u64;

        for key in 0..limit {
            insert_forced(&mut table, key, key, 0);
        }
        assert_eq!(table.len(), limit as usize);
        assert_eq!(table.capacity(), capacity);

        // One element past 70% load doubles the slot count.
        insert_forced(&mut table, limit, limit, 0);
        assert_eq!(table.capacity(), capacity * GROWTH_FACTOR);
        table.assert_probe_invariant();
    }

    #[test]
    fn churn_keeps_survivors_findable() {
        let state = HashState::default();
        let mut table: HashTable<Item> = HashTable::with_capacity(0);

        for k in 0..1000u64 {
            let hash = state.hash_key(k);
            insert_forced(&mut table, hash, k, k as i32);
        }
        for k in (0..1000u64).step_by(2) {
            let hash = state.hash_key(k);
            assert!(table.remove(hash, |v| v.key == k).is_some());
        }
        for k in 1000..1500u64 {
            let hash = state.hash_key(k);
            insert_forced(&mut table, hash, k, k as i32);
        }

        table.assert_probe_invariant();
        assert_eq!(table.len(), 1000);
        for k in (1..1000u64).step_by(2).chain(1000..1500) {
            let hash = state.hash_key(k);
            assert_eq!(
                table.find(hash, |v| v.key == k).map(|v| v.value),
                Some(k as i32)
            );
        }
        for k in (0..1000u64).step_by(2) {
            let hash = state.hash_key(k);
            assert!(table.find(hash, |v| v.key == k).is_none());
        }
    }

    #[test]
    fn clone_is_deep_and_clones_each_element_once() {
        static CLONES: AtomicUsize = AtomicUsize::new(0);

        #[derive(Debug, PartialEq, Eq)]
        struct Tracked {
            key: u64,
        }

        impl Clone for Tracked {
            fn clone(&self) -> Self {
                CLONES.fetch_add(1, Ordering::Relaxed);
                Tracked { key: self.key }
            }
        }

        let mut table: HashTable<Tracked> = HashTable::with_capacity(0);
        for key in [1u64, 2, 3] {
            match table.entry(key, |v| v.key == key) {
                Entry::Vacant(entry) => {
                    entry.insert(Tracked { key });
                }
                Entry::Occupied(_) => unreachable!(),
            }
        }

        CLONES.store(0, Ordering::Relaxed);
        let mut copy = table.clone();
        assert_eq!(CLONES.load(Ordering::Relaxed), 3);
        assert_eq!(copy.len(), 3);

        // Mutating the copy must not affect the original.
        assert!(copy.remove(1, |v| v.key == 1).is_some());
        assert_eq!(copy.len(), 2);
        assert_eq!(table.len(), 3);
        assert!(table.find(1, |v| v.key == 1).is_some());
        copy.assert_probe_invariant();
        table.assert_probe_invariant();
    }

    #[test]
    fn move_preserves_contents_without_cloning() {
        static CLONES: AtomicUsize = AtomicUsize::new(0);

        #[derive(Debug)]
        struct Tracked {
            key: u64,
        }

        impl Clone for Tracked {
            fn clone(&self) -> Self {
                CLONES.fetch_add(1, Ordering::Relaxed);
                Tracked { key: self.key }
            }
        }

        let mut table: HashTable<Tracked> = HashTable::with_capacity(0);
        for key in [1u64, 2, 3] {
            table
                .entry(key, |v| v.key == key)
                .or_insert_with(|| Tracked { key });
        }

        CLONES.store(0, Ordering::Relaxed);
        let moved = table;
        assert_eq!(moved.len(), 3);
        assert!(moved.find(2, |v| v.key == 2).is_some());
        assert_eq!(CLONES.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn drop_and_clear_run_destructors() {
        struct Tally {
            key: u64,
            drops: Rc<Cell<usize>>,
        }

        impl Drop for Tally {
            fn drop(&mut self) {
                self.drops.set(self.drops.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        let mut table: HashTable<Tally> = HashTable::with_capacity(0);
        let count = 3000u64; // forces at least one resize along the way
        for key in 0..count {
            let drops = Rc::clone(&drops);
            table
                .entry(key, |v| v.key == key)
                .or_insert_with(|| Tally { key, drops });
        }
        assert_eq!(drops.get(), 0, "resize must move, not drop");

        table.clear();
        assert_eq!(drops.get(), count as usize);
        assert!(table.is_empty());

        let drops2 = Rc::new(Cell::new(0));
        let mut table2: HashTable<Tally> = HashTable::with_capacity(0);
        for key in 0..10 {
            let drops = Rc::clone(&drops2);
            table2
                .entry(key, |v| v.key == key)
                .or_insert_with(|| Tally { key, drops });
        }
        let removed = table2.remove(4, |v| v.key == 4).unwrap();
        drop(removed);
        assert_eq!(drops2.get(), 1);
        drop(table2);
        assert_eq!(drops2.get(), 10);
    }

    #[test]
    fn iter_visits_each_element_once() {
        let mut table: HashTable<Item> = HashTable::with_capacity(0);
        for key in 0..100u64 {
            insert_forced(&mut table, key, key, key as i32);
        }

        let mut seen: Vec<u64> = table.iter().map(|v| v.key).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn drain_empties_table() {
        let mut table: HashTable<Item> = HashTable::with_capacity(0);
        for key in 0..50u64 {
            insert_forced(&mut table, key, key, key as i32);
        }

        let mut drained: Vec<u64> = table.drain().map(|v| v.key).collect();
        drained.sort_unstable();
        assert_eq!(drained, (0..50).collect::<Vec<_>>());
        assert!(table.is_empty());
        table.assert_probe_invariant();

        // A partially consumed drain still empties the table on drop.
        for key in 0..50u64 {
            insert_forced(&mut table, key, key, key as i32);
        }
        {
            let mut drain = table.drain();
            let _ = drain.next();
            let _ = drain.next();
        }
        assert!(table.is_empty());
        table.assert_probe_invariant();
    }

    #[test]
    fn clear_then_reinsert() {
        let mut table: HashTable<String> = HashTable::with_capacity(0);
        table
            .entry(1, |s: &String| s == "one")
            .or_insert("one".to_string());
        table
            .entry(2, |s: &String| s == "two")
            .or_insert("two".to_string());

        let capacity = table.capacity();
        table.clear();
        assert_eq!(table.capacity(), capacity);

        table
            .entry(1, |s: &String| s == "uno")
            .or_insert("uno".to_string());
        assert_eq!(table.len(), 1);
        assert_eq!(table.find(1, |s| s == "uno"), Some(&"uno".to_string()));
        assert!(table.find(2, |s| s == "two").is_none());
    }

    #[test]
    fn reserve_grows_capacity() {
        let mut table: HashTable<Item> = HashTable::with_capacity(0);
        let original = table.capacity();

        table.reserve(original * 2);
        assert!(table.capacity() > original);
        assert!(max_load(table.capacity()) > original * 2);

        // Reserving less than the current headroom is a no-op.
        let grown = table.capacity();
        table.reserve(1);
        assert_eq!(table.capacity(), grown);
    }

    #[test]
    fn entry_combinators() {
        let mut table: HashTable<(u64, Vec<i32>)> = HashTable::with_capacity(0);

        table
            .entry(9, |&(key, _)| key == 9)
            .or_insert_with(|| (9, Vec::new()))
            .1
            .push(1);
        table
            .entry(9, |&(key, _)| key == 9)
            .and_modify(|v| v.1.push(2));

        assert_eq!(
            table.find(9, |&(key, _)| key == 9),
            Some(&(9, alloc::vec![1, 2]))
        );
        assert!(
            table
                .entry(10, |&(key, _)| key == 10)
                .and_modify(|v| v.1.push(3))
                .is_none()
        );
    }
}
