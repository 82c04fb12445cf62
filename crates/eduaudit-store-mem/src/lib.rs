//! [`MemStore`] — the in-memory implementation of
//! [`GrievanceStore`](eduaudit_core::store::GrievanceStore).
//!
//! All state lives in ordered maps behind one `RwLock`; nothing is durable.
//! The reference deployment is single-process, so this is the only backend.

mod stats;
mod store;


pub use store::{MemStore, SEED_DISTRICTS};
