
/// Wire-format (serde) checks for entity models and field types
pub mod serde_tests;
