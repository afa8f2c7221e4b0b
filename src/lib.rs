//! # strtable
//!
//! An open-addressing hash table keyed by byte strings.
//!
//! - Keys are hashed with 64-bit FNV-1a and located by linear probing with wrap-around.
//! - The table copies each key on first insert and owns the copy; values are stored as given.
//! - The slot array starts at 16 slots and doubles before the load factor would exceed one
//!   half. Growth either fully succeeds or leaves the table as it was.
//! - Allocation failures are returned as [`Error`] values rather than aborting.
//!
//! ## Basic Usage
//!
//! ```rust
//! use strtable::Table;
//!
//! // Create a new table
//! let mut table = Table::new();
//!
//! // Insert values; `set` hands back the table's own copy of the key
//! let stored = table.set("apple", 1).unwrap();
//! assert_eq!(stored, b"apple");
//! table.set("banana", 2).unwrap();
//!
//! // Retrieve values
//! assert_eq!(table.get("apple"), Some(&1));
//! assert_eq!(table.get("cherry"), None);
//!
//! // Overwrite in place
//! table.set("apple", 10).unwrap();
//! assert_eq!(table.get("apple"), Some(&10));
//! assert_eq!(table.len(), 2);
//! ```
//!
//! ## Counting
//!
//! ```rust
//! use strtable::tally;
//!
//! let counts = tally("foo bar the bar bar bar the".split(' ')).unwrap();
//! assert_eq!(counts.get("foo"), Some(&1));
//! assert_eq!(counts.get("bar"), Some(&4));
//! assert_eq!(counts.get("the"), Some(&2));
//! assert_eq!(counts.len(), 3);
//! ```
//!
//! ## Raw pointers
//!
//! A `Table<NonNull<T>>` holds caller-owned pointers. Null is rejected rather than being
//! confused with a missing entry.
//!
//! ```rust
//! use std::ptr::{self, NonNull};
//! use strtable::{Error, Table};
//!
//! let mut value = 42_u32;
//! let pointer: *mut u32 = &mut value;
//!
//! let mut table: Table<NonNull<u32>> = Table::new();
//! table.set_ptr("answer", pointer).unwrap();
//! assert_eq!(table.set_ptr("nothing", ptr::null_mut()), Err(Error::NullValue));
//! assert_eq!(table.get_ptr("answer"), pointer);
//! assert!(table.get_ptr("nothing").is_null());
//! ```

/// Error type shared by all table operations
mod error;
/// 64-bit FNV-1a hashing
pub mod fnv;
/// The open-addressing table and its iterators
mod table;
/// Utility functions and traits built on the table
mod utils;

pub use error::{Error, Result};
pub use table::{INITIAL_CAPACITY, IntoIter, Iter, Table};
pub use utils::{TableExtensions, tally, tally_into, try_from_iter};
