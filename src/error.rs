//! Crate-wide error type.
//!
//! Every fallible operation returns [`Result`]; errors are raised
//! synchronously and are fatal to the call. Nothing is retried internally,
//! and a failed call must not leave partial mutation behind.

use thiserror::Error;

/// Errors raised by the structures in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Initial keys and values arrays differ in length.
    #[error("initial keys and values must have the same length (keys: {keys}, values: {values})")]
    LengthMismatch {
        /// Number of initial keys supplied.
        keys: usize,
        /// Number of initial values supplied.
        values: usize,
    },

    /// An explicit bucket count must be a positive integer.
    #[error("bucket count must be a positive integer, got {requested}")]
    InvalidBucketCount {
        /// The rejected bucket count.
        requested: usize,
    },

    /// Lookup or deletion of a key that is not in the map.
    #[error("key not found: {key:?}")]
    KeyNotFound {
        /// Normalized form of the missing key.
        key: String,
    },

    /// Hashing was attempted against a zero-length bucket array.
    #[error("cannot derive a bucket index with zero buckets")]
    NoBuckets,

    /// Load factor bounds must satisfy `0 <= min < max`.
    #[error("invalid load factor bounds: min {min}, max {max}")]
    InvalidLoadFactorBounds {
        /// Rejected lower bound.
        min: f64,
        /// Rejected upper bound.
        max: f64,
    },

    /// An explicit rehash target fell outside the configured bounds.
    #[error("rehash target {target} outside load factor bounds")]
    OutOfLoadFactorBounds {
        /// The rejected target load factor.
        target: f64,
    },

    /// Load factor bounds were supplied while dynamic rehashing is disabled.
    #[error("load factor bounds supplied but dynamic rehashing is disabled")]
    UnexpectedBoundsWithoutDynamicRehashing,

    /// Dynamic rehash evaluation was invoked without configured bounds.
    #[error("dynamic rehashing is not enabled on this map")]
    DynamicRehashingNotEnabled,

    /// Invalid hashing configuration: a multiplication factor supplied with
    /// the modulo method, or a factor outside the open interval (0, 1).
    #[error("invalid hashing configuration: {reason}")]
    InvalidConfig {
        /// Description of the rejected configuration.
        reason: String,
    },

    /// A node handle did not resolve to a live node of this structure.
    #[error("node not present in this structure")]
    NodeNotFound,

    /// A positional index walked past the end of a list.
    #[error("index out of range: {index} (length {len})")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the list at the time of the call.
        len: usize,
    },

    /// `pop` on an empty stack.
    #[error("stack is empty")]
    EmptyStack,

    /// `dequeue` on an empty queue.
    #[error("dequeueing empty queue")]
    EmptyQueue,

    /// `enqueue` on a queue whose capacity is exhausted.
    #[error("queue at maximum capacity ({capacity})")]
    QueueAtCapacity {
        /// The configured capacity.
        capacity: usize,
    },

    /// Queue capacity must be ≥ 1 and ≥ the number of initial items.
    #[error("queue capacity {capacity} is invalid for {items} initial item(s)")]
    InvalidQueueCapacity {
        /// The rejected capacity.
        capacity: usize,
        /// Number of initial items supplied.
        items: usize,
    },

    /// Exponential sampler rate must be strictly positive.
    #[error("exponential rate must be positive, got {rate}")]
    InvalidRate {
        /// The rejected rate.
        rate: f64,
    },

    /// Normal sampler standard deviation must not be negative.
    #[error("standard deviation must not be negative, got {std_dev}")]
    InvalidStdDev {
        /// The rejected standard deviation.
        std_dev: f64,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
