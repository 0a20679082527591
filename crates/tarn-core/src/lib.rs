//! Tarn Core
//!
//! Core value model and keyed-container accessors for the Tarn runtime:
//! - Dynamic values ([`Value`]) and mapping keys ([`Key`])
//! - Keyed containers: the insertion-ordered mapping ([`OrderedMap`]) and
//!   the named-field record ([`Record`])
//! - The generic accessor ([`KeyedAccess`]) giving uniform access over
//!   both container kinds

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod access;
pub mod map;
pub mod record;
pub mod value;

pub use access::{get_or, get_or_null, KeyedAccess};
pub use map::OrderedMap;
pub use record::Record;
pub use value::{Key, Value};
