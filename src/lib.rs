//! classic-collections: classic data structures and basic statistics
//! utilities, built in small, independently testable layers.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a chained hash map with optional dynamic load-factor-based
//!   rehashing and a pluggable hashing strategy, plus the classic
//!   structures it sits on.
//! - Layers:
//!   - LinkedList<T>: doubly linked list over a slotmap arena with stable
//!     generational node handles; O(1) head insertion and O(1) removal by
//!     handle. Serves as the map's bucket chain and the queue's storage.
//!   - hashing: default Java-`hashCode`-compatible digest over UTF-16 code
//!     units, plus bucket-index derivation by modulo division or the
//!     multiplication method.
//!   - ChainedHashMap<T>: bucket array of optional chains, string-normalized
//!     keys, running element count, and (when configured) load-factor
//!     monitoring that rebuilds the bucket array before a mutation would
//!     push the load factor out of bounds.
//!
//! Constraints
//! - Single-threaded: the map's rehash state is `!Send`/`!Sync`; callers
//!   must serialize access externally if sharing across threads.
//! - Rehash recursion is impossible by construction: reinsertion during a
//!   rebuild (and initial seeding) runs with rehash evaluation suppressed
//!   via an instance-scoped RAII flag.
//! - Errors are explicit: every fallible operation returns [`Result`], and
//!   a failed call leaves no partial mutation behind.
//!
//! The crate also carries the surrounding classics ([`Queue`], [`Stack`],
//! [`Tree`]) and basic statistics utilities with exponential and normal
//! samplers in [`stats`].

pub mod chained_hash_map;
mod error;
mod guard;
pub mod hashing;
mod key;
pub mod linked_list;
mod queue;
mod stack;
pub mod stats;
mod tree;

// Public surface
pub use chained_hash_map::{
    ChainedHashMap, MapConfig, DEFAULT_MAX_LOAD_FACTOR, DEFAULT_MIN_LOAD_FACTOR,
};
pub use error::{Error, Result};
pub use hashing::{HashingMethod, DEFAULT_MULTIPLICATION_FACTOR};
pub use key::Key;
pub use linked_list::{LinkedList, NodeRef};
pub use queue::Queue;
pub use stack::Stack;
pub use stats::{ExponentialGenerator, Generator, NormalGenerator, NormalMethod};
pub use tree::{Tree, TreeNodeRef};
