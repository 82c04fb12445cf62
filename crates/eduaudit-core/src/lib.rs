//! Core types and trait definitions for the EduAudit grievance service.
//!
//! This crate is deliberately free of HTTP and storage dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod alumni;
pub mod complaint;
pub mod district;
pub mod error;
pub mod school;
pub mod store;
pub mod user;
pub mod vocab;

pub use error::{Error, Result};
