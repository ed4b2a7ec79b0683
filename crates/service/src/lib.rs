//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Validates catalog items before anything reaches storage.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod pagination;
pub mod catalog;
#[cfg(test)]
pub mod test_support;
