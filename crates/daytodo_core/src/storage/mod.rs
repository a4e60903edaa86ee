pub(crate) mod file_store;
pub mod json_store;
mod memory_store;

pub use file_store::{FileStore, store_dir};
pub use json_store::{Persistence, TODOS_SLOT};
pub use memory_store::MemoryStore;

use crate::error::AppError;

/// A flat string-keyed slot store. Each slot holds one opaque value.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError>;

    fn remove(&mut self, key: &str) -> Result<(), AppError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), AppError> {
        (**self).remove(key)
    }
}
