//! # deepstore
//!
//! In-memory nested store addressed by dotted paths (`"a.b.c"`).
//!
//! ## Architecture
//! - **Store**: AHash map from segment to entry, one per nesting level
//! - **Entry**: leaf value or nested store
//! - **Path primitives**: reader (`path::get`) and writer (`path::set`) that
//!   walk segments, creating intermediate maps on write
//!
//! Writes are lenient: a leaf value sitting where a map is needed gets
//! replaced. Use `try_set` to reject that case instead.

#![warn(missing_docs)]

mod error;
pub mod path;
mod store;

pub use error::{Error, Result};
pub use store::{Entry, SharedStore, Store};
