use automap::{Automap, Peek, Poke, Reflect, TAG_KEY, TagIndex};
use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::{Dao, Error, ErrorKind, Operator, Query, Update, Value};

/// A [`Dao`] keeping entities in memory, in insertion order.
///
/// Updates and queries address fields by their tags under `tag_key`, which is
/// [`TAG_KEY`] unless changed with [`MemoryDao::with_tag_key`].
pub struct MemoryDao<E> {
    entities: RwLock<IndexMap<String, E>>,
    tag_key: &'static str,
}

impl<E> Default for MemoryDao<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> MemoryDao<E> {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(IndexMap::new()),
            tag_key: TAG_KEY,
        }
    }

    /// Addresses fields by their tags under `tag_key` instead.
    pub fn with_tag_key(mut self, tag_key: &'static str) -> Self {
        self.tag_key = tag_key;
        self
    }

    /// Number of stored entities.
    pub fn len(&self) -> usize {
        self.entities.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entities.read().is_empty()
    }
}

fn not_found(id: &str) -> Error {
    Error::new(ErrorKind::NotFound).wrap(format!("id({id}) not found"))
}

/// Writes `value` into the field of `entity` tagged `key`, through any `Option`
/// and `Box` layers.
fn assign(index: &TagIndex, entity: &mut dyn Reflect, key: &str, value: &Value) -> Result<(), Error> {
    let bad_request = |reason: String| Error::new(ErrorKind::BadRequest).wrap(reason);

    let Some(position) = index.get(key) else {
        return Err(bad_request(format!("key({key}) cannot be updated")));
    };
    let Poke::Struct(st) = entity.poke() else {
        return Err(bad_request(format!("key({key}) cannot be updated")));
    };
    let Some(field) = st.field_mut(position) else {
        return Err(bad_request(format!("key({key}) cannot be updated")));
    };

    if write(field, value) {
        Ok(())
    } else {
        Err(bad_request(format!("value({value}) does not fit key({key})")))
    }
}

fn write(target: &mut dyn Reflect, value: &Value) -> bool {
    match target.poke() {
        Poke::Option(option) => write(option.get_or_insert_default(), value),
        Poke::Pointer(pointee) => write(pointee, value),
        Poke::Value(leaf) => leaf.set_from(value.as_reflect()),
        Poke::Struct(_) => false,
    }
}

/// Returns true if `entity` satisfies every query.
fn matches_all(index: &TagIndex, entity: &dyn Reflect, queries: &[Query]) -> Result<bool, Error> {
    let Some(st) = automap::peel(entity).and_then(|entity| match entity.peek() {
        Peek::Struct(st) => Some(st),
        _ => None,
    }) else {
        return Ok(false);
    };

    for query in queries {
        let Some(position) = index.get(&query.key) else {
            return Err(Error::new(ErrorKind::BadRequest)
                .wrap(format!("key({}) cannot be searched", query.key)));
        };
        let stored = st.field(position).and_then(Value::from_reflect);
        let matched = match &stored {
            Some(stored) => query.matches(stored),
            // an absent field only differs from everything
            None => query.operator == Operator::Ne,
        };
        if !matched {
            return Ok(false);
        }
    }
    Ok(true)
}

impl<E> Dao<E> for MemoryDao<E>
where
    E: Automap + Clone + Send + Sync,
{
    async fn create(&self, id: &str, entity: E) -> Result<(), Error> {
        tracing::debug!(id, entity = %E::SHAPE, "storing");
        let mut entities = self.entities.write();
        if entities.contains_key(id) {
            return Err(Error::new(ErrorKind::Conflict).wrap(format!("id({id}) already exists")));
        }
        entities.insert(id.to_owned(), entity);
        Ok(())
    }

    async fn read(&self, id: &str) -> Result<E, Error> {
        tracing::debug!(id, entity = %E::SHAPE, "loading");
        self.entities
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn update(&self, id: &str, update: Update) -> Result<(), Error> {
        tracing::debug!(id, entity = %E::SHAPE, values = update.len(), "updating");
        let index = TagIndex::build(self.tag_key, E::SHAPE);
        let mut entities = self.entities.write();
        let Some(stored) = entities.get_mut(id) else {
            return Err(not_found(id));
        };

        // all or nothing: a rejected value leaves the stored entity untouched
        let mut updated = stored.clone();
        for (key, value) in update.iter() {
            assign(&index, &mut updated, key, value)?;
        }
        *stored = updated;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        tracing::debug!(id, entity = %E::SHAPE, "deleting");
        self.entities
            .write()
            .shift_remove(id)
            .map(drop)
            .ok_or_else(|| not_found(id))
    }

    async fn search(&self, queries: &[Query]) -> Result<Vec<E>, Error> {
        tracing::debug!(entity = %E::SHAPE, queries = queries.len(), "searching");
        let index = TagIndex::build(self.tag_key, E::SHAPE);
        let entities = self.entities.read();
        let mut found = Vec::new();
        for entity in entities.values() {
            if matches_all(&index, entity, queries)? {
                found.push(entity.clone());
            }
        }
        Ok(found)
    }
}
