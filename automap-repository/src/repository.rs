use core::future::Future;
use core::marker::PhantomData;

use automap::{Automap, Mapper};

use crate::{Dao, Error, Query, Update};

/// Access to models of type `M`, whatever they are stored as.
pub trait Repository<M>: Send + Sync {
    /// Stores a new model under `id`.
    fn create(&self, id: &str, model: M) -> impl Future<Output = Result<(), Error>> + Send;

    /// Loads the model stored under `id`.
    fn read(&self, id: &str) -> impl Future<Output = Result<M, Error>> + Send;

    /// Applies a partial update to the model stored under `id`.
    fn update(&self, id: &str, update: Update) -> impl Future<Output = Result<(), Error>> + Send;

    /// Removes the model stored under `id`.
    fn delete(&self, id: &str) -> impl Future<Output = Result<(), Error>> + Send;

    /// Loads every model matching all of `queries`.
    fn search(&self, queries: &[Query]) -> impl Future<Output = Result<Vec<M>, Error>> + Send;
}

/// A [`Repository`] of models `M`, persisted as entities `E` through the [`Dao`] `D`.
///
/// Models and entities are converted by tag with a [`Mapper`]; a failed conversion
/// is an [`ErrorKind::Internal`](crate::ErrorKind::Internal) error.
pub struct DefaultRepository<M, E, D> {
    dao: D,
    mapper: Mapper,
    _types: PhantomData<fn() -> (M, E)>,
}

impl<M, E, D> DefaultRepository<M, E, D>
where
    D: Dao<E>,
{
    /// A repository over `dao`, mapping by the default tag key.
    pub fn new(dao: D) -> Self {
        Self::with_mapper(dao, Mapper::new())
    }

    /// A repository over `dao`, mapping with `mapper`.
    pub fn with_mapper(dao: D, mapper: Mapper) -> Self {
        Self {
            dao,
            mapper,
            _types: PhantomData,
        }
    }

    /// The underlying DAO.
    pub fn dao(&self) -> &D {
        &self.dao
    }

    fn convert<S: Automap, T: Automap + Default>(&self, source: &S) -> Result<T, Error> {
        self.mapper.map::<T>(source).map_err(|err| {
            tracing::warn!(
                source = %S::SHAPE,
                target = %T::SHAPE,
                %err,
                "mapping failed"
            );
            Error::from(err)
        })
    }
}

impl<M, E, D> Repository<M> for DefaultRepository<M, E, D>
where
    M: Automap + Default + Send + Sync,
    E: Automap + Default + Send + Sync,
    D: Dao<E>,
{
    async fn create(&self, id: &str, model: M) -> Result<(), Error> {
        tracing::debug!(id, "create");
        let entity: E = self.convert(&model)?;
        self.dao.create(id, entity).await
    }

    async fn read(&self, id: &str) -> Result<M, Error> {
        tracing::debug!(id, "read");
        let entity = self.dao.read(id).await?;
        self.convert(&entity)
    }

    async fn update(&self, id: &str, update: Update) -> Result<(), Error> {
        if update.is_empty() {
            tracing::debug!(id, "update has no values, skipping");
            return Ok(());
        }
        tracing::debug!(id, values = update.len(), "update");
        self.dao.update(id, update).await
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        tracing::debug!(id, "delete");
        self.dao.delete(id).await
    }

    async fn search(&self, queries: &[Query]) -> Result<Vec<M>, Error> {
        tracing::debug!(queries = queries.len(), "search");
        let entities = self.dao.search(queries).await?;
        entities.iter().map(|entity| self.convert(entity)).collect()
    }
}
