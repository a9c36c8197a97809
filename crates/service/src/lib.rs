//! Service layer providing the CRUD operations behind each HTTP resource.
//! - Keeps handlers free of persistence and file handling details.
//! - Reuses entity definitions and field types from the `models` crate.
//! - Owns the image file lifecycle for recipes and challenges.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod recipe_service;
pub mod challenge_service;
pub mod review_service;
pub mod favorite_service;
pub mod reminder_service;
#[cfg(test)]
pub mod test_support;
