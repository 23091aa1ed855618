use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::DefaultHashBuilder;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;

/// A hash set built on the fingerprint-probing [`HashTable`].
///
/// `HashSet<T, S>` stores values of type `T` where `T` implements
/// `Hash + Eq` and uses a configurable hasher builder `S` to hash values.
/// The element itself doubles as the key; membership checks probe by
/// fingerprint before comparing elements, and removals close holes by
/// backward-shift instead of leaving tombstones.
///
/// By default `S` is [`DefaultHashBuilder`]; use [`with_hasher`] to supply a
/// different one.
///
/// [`with_hasher`]: HashSet::with_hasher
#[derive(Clone)]
pub struct HashSet<T, S = DefaultHashBuilder> {
    table: HashTable<T>,
    hash_builder: S,
}

impl<T, S> PartialEq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> Eq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
}

impl<T, S> Debug for HashSet<T, S>
where
    T: Debug + Hash + Eq,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(feature = "foldhash")]
impl<T> HashSet<T>
where
    T: Hash + Eq,
{
    /// Creates a new hash set using the default hasher builder.
    ///
    /// Only available with the `foldhash` feature; without it there is no
    /// default hasher and one must be supplied through
    /// [`with_hasher`](HashSet::with_hasher).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashSet;
    /// #
    /// let mut set = HashSet::new();
    /// set.insert("gold");
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates a new hash set able to hold at least `capacity` elements
    /// before resizing, using the default hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashSet;
    /// #
    /// let set: HashSet<i32> = HashSet::with_capacity(100);
    /// assert!(set.capacity() >= 100);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a new hash set with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashSet;
    /// # use backshift_hash::DefaultHashBuilder;
    /// #
    /// let set: HashSet<i32> = HashSet::with_hasher(DefaultHashBuilder::default());
    /// assert!(set.is_empty());
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates a new hash set with the specified capacity and hasher builder.
    ///
    /// The actual capacity may be larger than requested because the
    /// underlying table rounds its slot count up to a power of two.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashSet;
    /// #
    /// let mut set = HashSet::new();
    /// assert_eq!(set.len(), 0);
    /// set.insert('q');
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the slot count of the set's table.
    ///
    /// The table resizes once the number of elements reaches 70% of this
    /// figure.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes all elements from the set.
    ///
    /// This operation preserves the set's allocated capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashSet;
    /// #
    /// let mut set = HashSet::new();
    /// set.insert("stale");
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Reserves capacity for at least `additional` more elements. The set
    /// never shrinks.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the set did not previously contain this value, `true` is
    ///   returned.
    /// - If the set already contained this value, `false` is returned and
    ///   the stored element is left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashSet;
    /// #
    /// let mut set = HashSet::new();
    /// assert!(set.insert("green"));
    /// assert!(!set.insert("green"));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let hash = self.hash_builder.hash_one(&value);
        match self.table.entry(hash, |v| v == &value) {
            TableEntry::Occupied(_) => false,
            TableEntry::Vacant(entry) => {
                entry.insert(value);
                true
            }
        }
    }

    /// Adds a value to the set, replacing the existing value, if any, that
    /// is equal to the given one. Returns the replaced value.
    ///
    /// Unlike [`insert`](HashSet::insert), this swaps in the new element
    /// even when an equal one is already stored, which matters for types
    /// whose equality ignores part of their data.
    pub fn replace(&mut self, value: T) -> Option<T> {
        let hash = self.hash_builder.hash_one(&value);
        match self.table.entry(hash, |v| v == &value) {
            TableEntry::Occupied(mut entry) => Some(core::mem::replace(entry.get_mut(), value)),
            TableEntry::Vacant(entry) => {
                entry.insert(value);
                None
            }
        }
    }

    /// Returns `true` if the set contains a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashSet;
    /// #
    /// let mut set = HashSet::new();
    /// set.insert(12);
    /// assert!(set.contains(&12));
    /// assert!(!set.contains(&13));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        let hash = self.hash_builder.hash_one(value);
        self.table.find(hash, |v| v == value).is_some()
    }

    /// Returns a reference to the value in the set, if any, that is equal to
    /// the given value.
    pub fn get(&self, value: &T) -> Option<&T> {
        let hash = self.hash_builder.hash_one(value);
        self.table.find(hash, |v| v == value)
    }

    /// Removes a value from the set. Returns whether the value was present
    /// in the set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashSet;
    /// #
    /// let mut set = HashSet::new();
    /// set.insert("done");
    /// assert!(set.remove(&"done"));
    /// assert!(!set.remove(&"done"));
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        let hash = self.hash_builder.hash_one(value);
        self.table.remove(hash, |v| v == value).is_some()
    }

    /// Removes and returns the value in the set, if any, that is equal to
    /// the given one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashSet;
    /// #
    /// let mut set = HashSet::new();
    /// set.insert(31);
    /// assert_eq!(set.take(&31), Some(31));
    /// assert_eq!(set.take(&31), None);
    /// ```
    pub fn take(&mut self, value: &T) -> Option<T> {
        let hash = self.hash_builder.hash_one(value);
        self.table.remove(hash, |v| v == value)
    }

    /// Returns an iterator over the values of the set, in arbitrary order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator that removes and yields all values from the set.
    ///
    /// After calling `drain()`, the set is empty. Dropping the iterator
    /// before exhaustion removes and drops the remaining values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashSet;
    /// #
    /// let mut set = HashSet::new();
    /// set.insert(4);
    /// set.insert(5);
    ///
    /// let sum: i32 = set.drain().sum();
    /// assert_eq!(sum, 9);
    /// assert!(set.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain {
            inner: self.table.drain(),
        }
    }
}

impl<T, S> Default for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

/// An iterator over the values of a `HashSet`, created by
/// [`iter`](HashSet::iter).
pub struct Iter<'a, T> {
    inner: crate::hash_table::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// A draining iterator over the values of a `HashSet`, created by
/// [`drain`](HashSet::drain).
///
/// Dropping the iterator early removes the values it never yielded.
pub struct Drain<'a, T> {
    inner: crate::hash_table::Drain<'a, T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        for _ in self {}
    }
}

impl<'a, T, S> IntoIterator for &'a HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> FromIterator<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<T, S> Extend<T> for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}
