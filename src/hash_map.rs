use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::DefaultHashBuilder;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;

/// A hash map built on the fingerprint-probing [`HashTable`].
///
/// `HashMap<K, V, S>` stores key-value pairs where keys implement `Hash + Eq`
/// and uses a configurable hasher builder `S` to hash keys. Pairs live
/// directly in the table slots as `(K, V)`; lookups probe by fingerprint
/// before ever touching the key, and removals close holes by backward-shift
/// instead of leaving tombstones.
///
/// By default `S` is [`DefaultHashBuilder`]; use [`with_hasher`] to supply a
/// different one.
///
/// [`with_hasher`]: HashMap::with_hasher
#[derive(Clone)]
pub struct HashMap<K, V, S = DefaultHashBuilder> {
    table: HashTable<(K, V)>,
    hash_builder: S,
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug + Hash + Eq,
    V: Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            map.entry(k, v);
        }
        map.finish()
    }
}

#[cfg(feature = "foldhash")]
impl<K, V> HashMap<K, V>
where
    K: Hash + Eq,
{
    /// Creates a new hash map using the default hasher builder.
    ///
    /// Only available with the `foldhash` feature; without it there is no
    /// default hasher and one must be supplied through
    /// [`with_hasher`](HashMap::with_hasher).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert("answer", 42);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates a new hash map able to hold at least `capacity` elements
    /// before resizing, using the default hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashMap;
    /// #
    /// let map: HashMap<i32, String> = HashMap::with_capacity(100);
    /// assert!(map.capacity() >= 100);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a new hash map with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashMap;
    /// # use backshift_hash::DefaultHashBuilder;
    /// #
    /// let map: HashMap<i32, String> = HashMap::with_hasher(DefaultHashBuilder::default());
    /// assert!(map.is_empty());
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates a new hash map with the specified capacity and hasher builder.
    ///
    /// The actual capacity may be larger than requested because the
    /// underlying table rounds its slot count up to a power of two.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert("watts", 60);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the slot count of the map's table.
    ///
    /// The table resizes once the number of elements reaches 70% of this
    /// figure.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes all elements from the map.
    ///
    /// This operation preserves the map's allocated capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert("pending", 3);
    /// map.clear();
    /// assert!(map.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Reserves capacity for at least `additional` more elements. The map
    /// never shrinks.
    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned. If the
    /// map did have this key present, the value is updated and the old value
    /// is returned; the stored key is left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// assert_eq!(map.insert("watts", 60), None);
    /// assert_eq!(map.insert("watts", 75), Some(60));
    /// assert_eq!(map.get(&"watts"), Some(&75));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(mut entry) => {
                let old_value = core::mem::replace(&mut entry.get_mut().1, value);
                Some(old_value)
            }
            TableEntry::Vacant(entry) => {
                entry.insert((key, value));
                None
            }
        }
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert('x', 1.5);
    /// assert_eq!(map.get(&'x'), Some(&1.5));
    /// assert_eq!(map.get(&'y'), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = self.hash_builder.hash_one(key);
        self.table.find(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert("hits", 0);
    /// if let Some(hits) = map.get_mut(&"hits") {
    ///     *hits += 1;
    /// }
    /// assert_eq!(map.get(&"hits"), Some(&1));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hash_builder.hash_one(key);
        self.table.find_mut(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert(2, "two");
    /// assert_eq!(map.remove(&2), Some("two"));
    /// assert_eq!(map.remove(&2), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let hash = self.hash_builder.hash_one(key);
        self.table.remove(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.hash_builder.hash_one(key);
        self.table.remove(hash, |(k, _)| k == key)
    }

    /// Gets the given key's corresponding entry in the map for in-place
    /// manipulation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashMap;
    /// #
    /// let mut tallies = HashMap::new();
    /// for team in ["red", "blue", "red"] {
    ///     *tallies.entry(team).or_insert(0) += 1;
    /// }
    ///
    /// assert_eq!(tallies.get(&"red"), Some(&2));
    /// assert_eq!(tallies.get(&"blue"), Some(&1));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(entry) => Entry::Occupied(OccupiedEntry { entry }),
            TableEntry::Vacant(entry) => Entry::Vacant(VacantEntry { entry, key }),
        }
    }

    /// Returns an iterator over the key-value pairs of the map.
    ///
    /// The iterator yields `(&K, &V)` pairs in an arbitrary order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the keys of the map.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the map.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator that removes and yields all key-value pairs from
    /// the map.
    ///
    /// After calling `drain()`, the map is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.insert("mon", 1);
    /// map.insert("tue", 2);
    ///
    /// let total: i32 = map.drain().map(|(_, day)| day).sum();
    /// assert_eq!(total, 3);
    /// assert!(map.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.drain(),
        }
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

/// A view into a single entry in the map, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashMap`].
///
/// [`entry`]: HashMap::entry
pub enum Entry<'a, K, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Inserts `default` if the entry is vacant, then returns a mutable
    /// reference to the value either way.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashMap;
    /// #
    /// let mut votes = HashMap::new();
    /// *votes.entry("ada").or_insert(0) += 1;
    /// *votes.entry("ada").or_insert(0) += 1;
    /// assert_eq!(votes.get(&"ada"), Some(&2));
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Like [`or_insert`](Entry::or_insert), but the fallback value is only
    /// computed when the entry is vacant.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Applies `f` to the value if the entry is occupied, leaving a vacant
    /// entry untouched. Returns the entry for chaining.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashMap;
    /// #
    /// let mut map = HashMap::new();
    /// map.entry("total").and_modify(|v| *v += 10).or_insert(1);
    /// assert_eq!(map.get(&"total"), Some(&1));
    ///
    /// map.entry("total").and_modify(|v| *v += 10).or_insert(1);
    /// assert_eq!(map.get(&"total"), Some(&11));
    /// ```
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    V: Default,
{
    /// Inserts `V::default()` if the entry is vacant, then returns a mutable
    /// reference to the value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use backshift_hash::HashMap;
    /// #
    /// let mut groups: HashMap<usize, Vec<&str>> = HashMap::new();
    /// for word in ["ore", "iron", "tin"] {
    ///     groups.entry(word.len()).or_default().push(word);
    /// }
    /// assert_eq!(groups.get(&3), Some(&vec!["ore", "tin"]));
    /// ```
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the map.
///
/// Holds the probed slot and the not-yet-stored key, so an insert through it
/// skips the second probe a plain [`insert`](HashMap::insert) would do.
pub struct VacantEntry<'a, K, V> {
    entry: crate::hash_table::VacantEntry<'a, (K, V)>,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Gets a reference to the key that would be used when inserting a value.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Takes ownership of the key without inserting anything.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the value into the map and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        &mut self.entry.insert((self.key, value)).1
    }
}

/// A view into an occupied entry in the map.
pub struct OccupiedEntry<'a, K, V> {
    entry: crate::hash_table::OccupiedEntry<'a, (K, V)>,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// Gets a reference to the key in the entry.
    pub fn key(&self) -> &K {
        &self.entry.get().0
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.entry.get().1
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.entry.get_mut().1
    }

    /// Converts the entry into a mutable reference to the value, with the
    /// map's lifetime.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.entry.into_mut().1
    }

    /// Replaces the entry's value, returning the old one. The stored key is
    /// left untouched.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(&mut self.entry.get_mut().1, value)
    }

    /// Removes the entry from the map and returns the value.
    ///
    /// The vacated slot is reclaimed immediately by the backward-shift pass.
    pub fn remove(self) -> V {
        self.entry.remove().1
    }

    /// Removes the entry from the map and returns the key and value.
    pub fn remove_entry(self) -> (K, V) {
        self.entry.remove()
    }
}

/// An iterator over the key-value pairs of a `HashMap`, created by
/// [`iter`](HashMap::iter).
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }
}

/// An iterator over the keys of a `HashMap`, created by
/// [`keys`](HashMap::keys).
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over the values of a `HashMap`, created by
/// [`values`](HashMap::values).
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// A draining iterator over the key-value pairs of a `HashMap`, created by
/// [`drain`](HashMap::drain).
///
/// Dropping the iterator early removes the pairs it never yielded.
pub struct Drain<'a, K, V> {
    inner: crate::hash_table::Drain<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Drain<'a, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<'a, K, V> Drop for Drain<'a, K, V> {
    fn drop(&mut self) {
        for _ in self {}
    }
}
