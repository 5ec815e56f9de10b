#![no_std]

//! `ChunkList`: an indexable sequence container built as a chain of
//! fixed-capacity nodes.
//!
//! A `ChunkList<T, N>` hybridizes a resizable array and a doubly linked
//! list: elements live in nodes of at most `N` contiguous slots, and the
//! nodes are linked into a chain that behaves as one logical sequence. This
//! gives positional insert/remove anywhere, O(1)-amortized push/pop at both
//! ends, and index-based access that only walks nodes, not elements.
//!
//! This crate is `no_std` compatible (it allocates through `alloc`).
//!
//! # Overview
//!
//! - A full node is **split** on insertion: a new successor node receives the
//!   upper half of its elements.
//! - A node left under half capacity by a removal is **rebalanced**: merged
//!   with a neighbor when the combined contents fit in one node, otherwise
//!   topped up by borrowing a single element from the fuller neighbor.
//! - [`ChunkList::compact`] reflows the whole chain so every node except
//!   possibly the last is full, reclaiming fragmentation after many removals.
//!
//! Index lookups accumulate real per-node counts while walking the chain;
//! splits and merges leave nodes with unequal counts, so positions cannot be
//! computed by dividing by the nominal capacity.
//!
//! # Example
//!
//! ```
//! use chunklist::ChunkList;
//!
//! let mut list: ChunkList<u32, 4> = ChunkList::new();
//! for v in 1..=10 {
//!     list.push_back(v);
//! }
//!
//! assert_eq!(list.len(), 10);
//! assert_eq!(list[0], 1);
//! assert_eq!(list[9], 10);
//!
//! list.insert(5, 42).unwrap();
//! assert_eq!(list[5], 42);
//!
//! assert_eq!(list.remove(0).unwrap(), 1);
//! assert_eq!(list[0], 2);
//! assert_eq!(list.find(&42), 4);
//! ```
//!
//! # Deque usage
//!
//! ```
//! use chunklist::ChunkList;
//!
//! let mut deque: ChunkList<&str, 8> = ChunkList::new();
//! deque.push_back("middle");
//! deque.push_front("first");
//! deque.push_back("last");
//!
//! assert_eq!(deque.front().unwrap(), &"first");
//! assert_eq!(deque.back().unwrap(), &"last");
//! assert_eq!(deque.pop_front().unwrap(), "first");
//! assert_eq!(deque.pop_back().unwrap(), "last");
//! assert_eq!(deque.len(), 1);
//! ```
//!
//! # Errors
//!
//! Fallible operations return [`ChunkListError`]: positions outside the
//! valid range report `IndexOutOfBounds`, pop/front/back on an empty list
//! report `Empty`, and an internal bookkeeping inconsistency surfaces as
//! `CorruptChain` instead of panicking. [`ChunkList::find`] returning
//! `len()` is a defined "absent" result, not an error.
//!
//! # Diagnostics
//!
//! When `T: Display`, formatting a list renders each node's count and
//! contents in chain order — a debugging aid, not a stable format:
//!
//! ```
//! use chunklist::ChunkList;
//!
//! let mut list: ChunkList<u32, 2> = ChunkList::new();
//! list.push_back(7);
//! let dump = list.to_string();
//! assert!(dump.contains("node (count 1)"));
//! assert!(dump.contains("0 -> 7"));
//! ```

extern crate alloc;

mod core;
mod dump;
mod error;
mod node;

// Re-export public types
pub use crate::core::ChunkList;
pub use crate::error::ChunkListError;
