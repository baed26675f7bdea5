//! In-process state containers.
//!
//! The remote sheet is the source of truth; these containers hold the
//! in-memory mirror used for rendering. All shared mutable state sits behind
//! the entry points defined here - handlers never touch the collections
//! directly.

mod catalog;
mod reservations;

pub use catalog::{CatalogStore, search};
pub use reservations::ReservationLog;
