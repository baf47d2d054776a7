//! Data Transfer Objects for API requests and responses.
//!
//! Response bodies use camelCase keys, matching the single-page client.

pub mod health;
pub mod links;
pub mod shorten;
