//! One handler module per API resource.

pub mod alumni;
pub mod auth;
pub mod complaints;
pub mod connections;
pub mod districts;
pub mod metadata;
pub mod users;
