//! Chained hash map with optional dynamic load-factor-based rehashing.
//!
//! Buckets are optional doubly linked chains; colliding entries are
//! prepended to their bucket's chain. Keys are normalized to strings before
//! storage (see [`Key`]), digested by a pluggable function, and reduced to
//! a bucket index by modulo division or the multiplication method.
//!
//! When dynamic rehashing is configured, every post-construction insert and
//! delete first checks whether the would-be load factor leaves the
//! configured bounds; if it does, the map rebuilds its bucket array sized
//! for the bounds midpoint before mutating. Reinsertion during a rebuild
//! runs with rehash evaluation suppressed, so a rehash can never trigger
//! itself.

use core::ops::RangeInclusive;
use std::mem;

use crate::error::{Error, Result};
use crate::guard::RehashState;
use crate::hashing::{self, DigestFn, HashingMethod, DEFAULT_MULTIPLICATION_FACTOR};
use crate::key::Key;
use crate::linked_list::{self, LinkedList, NodeRef};

/// Default lower bound when dynamic rehashing is enabled without bounds.
pub const DEFAULT_MIN_LOAD_FACTOR: f64 = 0.6;
/// Default upper bound when dynamic rehashing is enabled without bounds.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// One stored key/value pair.
#[derive(Debug, Clone)]
struct Entry<T> {
    key: String,
    value: T,
}

type Bucket<T> = Option<LinkedList<Entry<T>>>;

#[derive(Copy, Clone, Debug, PartialEq)]
struct LoadFactorBounds {
    min: f64,
    max: f64,
}

impl LoadFactorBounds {
    fn validated(min: f64, max: f64) -> Result<Self> {
        if min >= 0.0 && min < max {
            Ok(Self { min, max })
        } else {
            Err(Error::InvalidLoadFactorBounds { min, max })
        }
    }

    fn contains(&self, load_factor: f64) -> bool {
        load_factor >= self.min && load_factor <= self.max
    }

    fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Construction-time configuration for [`ChainedHashMap`]; a consuming
/// builder validated by [`ChainedHashMap::with_config`].
pub struct MapConfig<T> {
    initial_keys: Vec<Key>,
    initial_values: Vec<T>,
    digest_fn: Option<DigestFn>,
    bucket_count: Option<usize>,
    dynamic_rehashing: bool,
    min_load_factor: Option<f64>,
    max_load_factor: Option<f64>,
    hashing_method: HashingMethod,
    multiplication_factor: Option<f64>,
}

impl<T> Default for MapConfig<T> {
    fn default() -> Self {
        Self {
            initial_keys: Vec::new(),
            initial_values: Vec::new(),
            digest_fn: None,
            bucket_count: None,
            dynamic_rehashing: false,
            min_load_factor: None,
            max_load_factor: None,
            hashing_method: HashingMethod::default(),
            multiplication_factor: None,
        }
    }
}

impl<T> MapConfig<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial key/value batch, inserted sequentially at construction with
    /// rehash evaluation suppressed. The two sequences must be the same
    /// length.
    pub fn initial<K, I>(mut self, keys: I, values: Vec<T>) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = K>,
    {
        self.initial_keys = keys.into_iter().map(Into::into).collect();
        self.initial_values = values;
        self
    }

    /// Replaces the default digest with a caller-supplied function.
    pub fn digest_fn(mut self, digest: impl Fn(&str) -> i32 + 'static) -> Self {
        self.digest_fn = Some(Box::new(digest));
        self
    }

    /// Explicit initial bucket count. When absent the count is derived from
    /// the initial batch size (see [`ChainedHashMap::with_config`]).
    pub fn bucket_count(mut self, count: usize) -> Self {
        self.bucket_count = Some(count);
        self
    }

    /// Enables or disables dynamic rehashing.
    pub fn dynamic_rehashing(mut self, enabled: bool) -> Self {
        self.dynamic_rehashing = enabled;
        self
    }

    /// Load factor bounds for dynamic rehashing. Defaults to
    /// [`DEFAULT_MIN_LOAD_FACTOR`]/[`DEFAULT_MAX_LOAD_FACTOR`] when dynamic
    /// rehashing is enabled without explicit bounds.
    pub fn load_factor_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_load_factor = Some(min);
        self.max_load_factor = Some(max);
        self
    }

    pub fn hashing_method(mut self, method: HashingMethod) -> Self {
        self.hashing_method = method;
        self
    }

    /// Multiplication-method constant; only valid with
    /// [`HashingMethod::Multiplication`]. Defaults to
    /// [`DEFAULT_MULTIPLICATION_FACTOR`].
    pub fn multiplication_factor(mut self, factor: f64) -> Self {
        self.multiplication_factor = Some(factor);
        self
    }
}

/// A chained hash map storing values of type `T` under string-normalized
/// keys.
pub struct ChainedHashMap<T> {
    buckets: Vec<Bucket<T>>,
    elements: usize,
    rehashes: usize,
    bounds: Option<LoadFactorBounds>,
    method: HashingMethod,
    multiplication_factor: Option<f64>,
    digest_fn: DigestFn,
    rehash_state: RehashState,
}

fn empty_buckets<T>(count: usize) -> Vec<Bucket<T>> {
    std::iter::repeat_with(|| None).take(count).collect()
}

fn ceil_to_count(value: f64) -> usize {
    (value.ceil() as usize).max(1)
}

impl<T> ChainedHashMap<T> {
    /// An empty map with default configuration: modulo hashing, default
    /// digest, one bucket, dynamic rehashing disabled.
    pub fn new() -> Self {
        Self {
            buckets: empty_buckets(1),
            elements: 0,
            rehashes: 0,
            bounds: None,
            method: HashingMethod::default(),
            multiplication_factor: None,
            digest_fn: Box::new(hashing::default_digest),
            rehash_state: RehashState::new(),
        }
    }

    /// Builds a map from `config`, validating it and seeding the initial
    /// batch with rehash evaluation suppressed.
    ///
    /// Derived bucket counts: `ceil(1.5 * n)` without dynamic rehashing,
    /// `ceil(2n / (min + max))` with it, clamped to at least one bucket.
    pub fn with_config(config: MapConfig<T>) -> Result<Self> {
        let MapConfig {
            initial_keys,
            initial_values,
            digest_fn,
            bucket_count,
            dynamic_rehashing,
            min_load_factor,
            max_load_factor,
            hashing_method,
            multiplication_factor,
        } = config;

        if initial_keys.len() != initial_values.len() {
            return Err(Error::LengthMismatch {
                keys: initial_keys.len(),
                values: initial_values.len(),
            });
        }

        let bounds = if dynamic_rehashing {
            Some(LoadFactorBounds::validated(
                min_load_factor.unwrap_or(DEFAULT_MIN_LOAD_FACTOR),
                max_load_factor.unwrap_or(DEFAULT_MAX_LOAD_FACTOR),
            )?)
        } else if min_load_factor.is_some() || max_load_factor.is_some() {
            return Err(Error::UnexpectedBoundsWithoutDynamicRehashing);
        } else {
            None
        };

        let multiplication_factor = match hashing_method {
            HashingMethod::Modulo => {
                if let Some(factor) = multiplication_factor {
                    return Err(Error::InvalidConfig {
                        reason: format!(
                            "multiplication factor {} supplied with the modulo method",
                            factor
                        ),
                    });
                }
                None
            }
            HashingMethod::Multiplication => {
                let factor = multiplication_factor.unwrap_or(DEFAULT_MULTIPLICATION_FACTOR);
                if !(factor > 0.0 && factor < 1.0) {
                    return Err(Error::InvalidConfig {
                        reason: format!("multiplication factor {} outside (0, 1)", factor),
                    });
                }
                Some(factor)
            }
        };

        let count = match bucket_count {
            Some(0) => return Err(Error::InvalidBucketCount { requested: 0 }),
            Some(n) => n,
            None => {
                let n = initial_keys.len() as f64;
                match &bounds {
                    Some(b) => ceil_to_count(2.0 * n / (b.min + b.max)),
                    None => ceil_to_count(1.5 * n),
                }
            }
        };

        let mut map = Self {
            buckets: empty_buckets(count),
            elements: 0,
            rehashes: 0,
            bounds,
            method: hashing_method,
            multiplication_factor,
            digest_fn: digest_fn.unwrap_or_else(|| Box::new(hashing::default_digest)),
            rehash_state: RehashState::new(),
        };

        {
            // Seeding runs suppressed so a large initial batch cannot
            // rehash once per insert.
            let guard = map.rehash_state.begin();
            for (key, value) in initial_keys.into_iter().zip(initial_values) {
                let entry = Entry {
                    key: key.normalized(),
                    value,
                };
                Self::insert_entry(
                    &mut map.buckets,
                    &mut map.elements,
                    &map.digest_fn,
                    map.method,
                    map.multiplication_factor,
                    entry,
                )?;
            }
            drop(guard);
        }

        Ok(map)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements == 0
    }

    /// Current bucket array length; fixed until a rehash.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of completed rehash events.
    pub fn rehashes(&self) -> usize {
        self.rehashes
    }

    pub fn hashing_method(&self) -> HashingMethod {
        self.method
    }

    /// `elements / bucketCount`.
    pub fn load_factor(&self) -> f64 {
        if self.buckets.is_empty() {
            0.0
        } else {
            self.elements as f64 / self.buckets.len() as f64
        }
    }

    /// Configured bounds as `(min, max)` when dynamic rehashing is enabled.
    pub fn load_factor_bounds(&self) -> Option<(f64, f64)> {
        self.bounds.map(|b| (b.min, b.max))
    }

    /// Inclusive entry-count range keeping the load factor within bounds at
    /// the current bucket count; `None` when dynamic rehashing is disabled.
    pub fn valid_elements_range(&self) -> Option<RangeInclusive<usize>> {
        let bounds = self.bounds?;
        let n = self.buckets.len() as f64;
        Some((n * bounds.min).ceil() as usize..=(n * bounds.max).floor() as usize)
    }

    /// Inserts `value` under `key`, prepending to the target bucket's
    /// chain. Does not deduplicate: a repeated key shadows older entries
    /// during lookup.
    ///
    /// With dynamic rehashing enabled, first rebuilds the bucket array when
    /// the would-be load factor leaves the configured bounds.
    pub fn insert<K: Into<Key>>(&mut self, key: K, value: T) -> Result<()> {
        let key = key.into().normalized();
        if self.bounds.is_some() && !self.rehash_state.in_progress() {
            self.rebalance_for(self.elements + 1)?;
        }
        Self::insert_entry(
            &mut self.buckets,
            &mut self.elements,
            &self.digest_fn,
            self.method,
            self.multiplication_factor,
            Entry { key, value },
        )
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// Fails with [`Error::KeyNotFound`] when the bucket is empty or no
    /// chain node matches.
    pub fn access<K: Into<Key>>(&self, key: K) -> Result<&T> {
        let key = key.into().normalized();
        let (index, node) = self.locate(&key)?;
        let chain = self.buckets[index]
            .as_ref()
            .expect("bucket must be occupied after locate");
        Ok(&chain.get(node).expect("node must be live after locate").value)
    }

    /// Mutable counterpart of [`access`](Self::access).
    pub fn access_mut<K: Into<Key>>(&mut self, key: K) -> Result<&mut T> {
        let key = key.into().normalized();
        let (index, node) = self.locate(&key)?;
        let chain = self.buckets[index]
            .as_mut()
            .expect("bucket must be occupied after locate");
        Ok(&mut chain
            .get_mut(node)
            .expect("node must be live after locate")
            .value)
    }

    pub fn contains_key<K: Into<Key>>(&self, key: K) -> bool {
        let key = key.into().normalized();
        self.locate(&key).is_ok()
    }

    /// Removes the entry stored under `key` and returns its value. The
    /// bucket transitions back to empty when its last node is removed.
    ///
    /// Presence is verified before the dynamic-rehash evaluation, so a
    /// failed delete observes no state change.
    pub fn delete<K: Into<Key>>(&mut self, key: K) -> Result<T> {
        let key = key.into().normalized();
        self.locate(&key)?;
        if self.bounds.is_some() && !self.rehash_state.in_progress() {
            self.rebalance_for(self.elements - 1)?;
        }
        // Re-locate: a triggered rehash moves entries between buckets.
        let (index, node) = self.locate(&key)?;
        let chain = self.buckets[index]
            .as_mut()
            .expect("bucket must be occupied after locate");
        let entry = chain.remove(node).expect("node must be live after locate");
        if chain.is_empty() {
            self.buckets[index] = None;
        }
        self.elements -= 1;
        Ok(entry.value)
    }

    /// Rebuilds the bucket array sized for `target_load_factor`
    /// (`ceil(elements / target)` buckets) and redistributes every entry.
    ///
    /// Fails with [`Error::OutOfLoadFactorBounds`] when bounds are
    /// configured and the target falls outside them, or when the target is
    /// not a positive finite number.
    pub fn rehash(&mut self, target_load_factor: f64) -> Result<()> {
        if !target_load_factor.is_finite() || target_load_factor <= 0.0 {
            return Err(Error::OutOfLoadFactorBounds {
                target: target_load_factor,
            });
        }
        if let Some(bounds) = &self.bounds {
            if !bounds.contains(target_load_factor) {
                return Err(Error::OutOfLoadFactorBounds {
                    target: target_load_factor,
                });
            }
        }
        let count = ceil_to_count(self.elements as f64 / target_load_factor);
        self.rehash_to_bucket_count(count)
    }

    /// Rebuilds the bucket array at exactly `bucket_count` buckets and
    /// redistributes every entry. No bounds check; fails with
    /// [`Error::InvalidBucketCount`] for a zero count.
    pub fn rehash_to_bucket_count(&mut self, bucket_count: usize) -> Result<()> {
        if bucket_count == 0 {
            return Err(Error::InvalidBucketCount { requested: 0 });
        }
        let _guard = self.rehash_state.begin();
        let old = mem::replace(&mut self.buckets, empty_buckets(bucket_count));
        let old_count = old.len();
        self.elements = 0;
        for chain in old.into_iter().flatten() {
            for entry in chain {
                Self::insert_entry(
                    &mut self.buckets,
                    &mut self.elements,
                    &self.digest_fn,
                    self.method,
                    self.multiplication_factor,
                    entry,
                )?;
            }
        }
        self.rehashes += 1;
        log::debug!(
            "rehash #{}: {} -> {} buckets, {} entries",
            self.rehashes,
            old_count,
            bucket_count,
            self.elements
        );
        Ok(())
    }

    /// Iterates all live entries in bucket order, then chain order within
    /// each bucket (newest first).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
        }
    }

    /// Rebuilds the bucket array at the bounds midpoint when `would_be`
    /// elements would put the load factor outside bounds. Sizing from the
    /// would-be count keeps the post-mutation load factor inside bounds.
    fn rebalance_for(&mut self, would_be: usize) -> Result<()> {
        let bounds = self.bounds.ok_or(Error::DynamicRehashingNotEnabled)?;
        let would_be_load = would_be as f64 / self.buckets.len() as f64;
        if !bounds.contains(would_be_load) {
            let count = ceil_to_count(would_be as f64 / bounds.midpoint());
            self.rehash_to_bucket_count(count)?;
        }
        Ok(())
    }

    /// Finds the bucket index and chain node holding `key`.
    fn locate(&self, key: &str) -> Result<(usize, NodeRef)> {
        let index = self.bucket_for(key)?;
        let chain = self.buckets[index].as_ref().ok_or_else(|| Error::KeyNotFound {
            key: key.to_string(),
        })?;
        chain
            .iter()
            .find(|(_, entry)| entry.key == key)
            .map(|(node, _)| (index, node))
            .ok_or_else(|| Error::KeyNotFound {
                key: key.to_string(),
            })
    }

    fn bucket_for(&self, key: &str) -> Result<usize> {
        let digest = (self.digest_fn)(key);
        hashing::bucket_index(
            digest,
            self.buckets.len(),
            self.method,
            self.multiplication_factor,
        )
    }

    // Associated fn rather than a method so construction and rehash can
    // call it while holding disjoint borrows of the map's fields.
    fn insert_entry(
        buckets: &mut [Bucket<T>],
        elements: &mut usize,
        digest_fn: &DigestFn,
        method: HashingMethod,
        multiplication_factor: Option<f64>,
        entry: Entry<T>,
    ) -> Result<()> {
        let digest = digest_fn(&entry.key);
        let index = hashing::bucket_index(digest, buckets.len(), method, multiplication_factor)?;
        buckets[index]
            .get_or_insert_with(LinkedList::new)
            .push_front(entry);
        *elements += 1;
        Ok(())
    }
}

impl<T> Default for ChainedHashMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for ChainedHashMap<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over all live entries of a [`ChainedHashMap`].
pub struct Iter<'a, T> {
    buckets: std::slice::Iter<'a, Bucket<T>>,
    chain: Option<linked_list::Iter<'a, Entry<T>>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a str, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(chain) = &mut self.chain {
                if let Some((_, entry)) = chain.next() {
                    return Some((entry.key.as_str(), &entry.value));
                }
            }
            self.chain = self.buckets.next()?.as_ref().map(LinkedList::iter);
        }
    }
}
