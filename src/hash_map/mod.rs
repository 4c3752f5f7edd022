//! Hash table that resolves collisions by chaining entries off an index of buckets and grows when
//! its load factor exceeds two thirds.

mod map;

pub use self::map::{HashMap, Iter, Keys, INITIAL_CAPACITY};

use std::error;
use std::fmt;
use std::result;

/// Errors reported by `HashMap` operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The key is already present in the map.
    KeyAlreadyExists,
    /// The key is not present in the map.
    KeyNotFound,
    /// The requested capacity is zero or cannot hold the current entries.
    CapacityTooSmall,
    /// The bucket index for the requested capacity could not be allocated.
    OutOfMemory,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::KeyAlreadyExists => write!(f, "key already exists"),
            Error::KeyNotFound => write!(f, "key not found"),
            Error::CapacityTooSmall => write!(f, "capacity is smaller than the number of entries"),
            Error::OutOfMemory => write!(f, "unable to allocate bucket index"),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
