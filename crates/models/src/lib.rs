//! `sea-orm` entities for cookhub plus small per-entity helpers.
//!
//! Each entity module exposes its `Model`, a `*Fields` struct with every
//! client-writable column (used for both create and full-replace update),
//! and a `create` helper that assigns a fresh UUID.

pub mod errors;
pub mod db;
pub mod serde_ext;
pub mod recipe;
pub mod cooking_challenge;
pub mod review;
pub mod favorite;
pub mod reminder;

#[cfg(test)]
mod tests;
