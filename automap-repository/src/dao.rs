use core::future::Future;

use crate::{Error, Query, Update};

/// Persistence for entities of type `E`, addressed by string ids.
///
/// Implementations report a duplicate id as [`ErrorKind::Conflict`] and a missing
/// one as [`ErrorKind::NotFound`].
///
/// [`ErrorKind::Conflict`]: crate::ErrorKind::Conflict
/// [`ErrorKind::NotFound`]: crate::ErrorKind::NotFound
pub trait Dao<E>: Send + Sync {
    /// Stores a new entity under `id`.
    fn create(&self, id: &str, entity: E) -> impl Future<Output = Result<(), Error>> + Send;

    /// Loads the entity stored under `id`.
    fn read(&self, id: &str) -> impl Future<Output = Result<E, Error>> + Send;

    /// Applies a partial update to the entity stored under `id`.
    fn update(&self, id: &str, update: Update) -> impl Future<Output = Result<(), Error>> + Send;

    /// Removes the entity stored under `id`.
    fn delete(&self, id: &str) -> impl Future<Output = Result<(), Error>> + Send;

    /// Loads every entity matching all of `queries`.
    fn search(&self, queries: &[Query]) -> impl Future<Output = Result<Vec<E>, Error>> + Send;
}
