//! Storage seam for fleet records.
//!
//! Call sites receive a `Repository` instead of reaching for shared module
//! state; the in-memory implementation backs the dashboard session and tests.

use std::fmt::{Debug, Display};

use thiserror::Error;

pub mod alert_store;
pub mod memory;

pub use alert_store::AlertStore;
pub use memory::InMemoryRepository;

pub trait Entity: Clone {
    type Key: Clone + PartialEq + Debug + Display;

    fn key(&self) -> Self::Key;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("record {0} not found")]
    NotFound(String),
    #[error("record {0} already exists")]
    Duplicate(String),
}

pub trait Repository<T: Entity> {
    fn get(&self, key: &T::Key) -> Option<&T>;

    /// All records in insertion order.
    fn list(&self) -> &[T];

    fn add(&mut self, item: T) -> Result<(), RepositoryError>;

    /// Replaces the record with the same key.
    fn update(&mut self, item: T) -> Result<(), RepositoryError>;

    fn delete(&mut self, key: &T::Key) -> Result<T, RepositoryError>;
}
