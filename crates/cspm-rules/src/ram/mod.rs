//! # RAM Rules
//!
//! Checks over Resource Access Management principals and their credentials.

pub mod access_keys_rotation;
pub mod models;

pub use access_keys_rotation::AccessKeysRotation;
