use automap::{Peek, Reflect, primary_segment};
use indexmap::IndexMap;

use crate::{Error, ErrorKind, Value};

/// The tag key [`Update::from_tagged`] reads.
pub const UPDATE_TAG_KEY: &str = "update";

/// A partial update: the values to write, keyed by tag.
///
/// Keys keep the order in which they were inserted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Update {
    values: IndexMap<String, Value>,
}

impl Update {
    /// An empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the fields of `input` tagged under [`UPDATE_TAG_KEY`].
    ///
    /// See [`Update::from_tagged_with_key`].
    pub fn from_tagged(input: &dyn Reflect) -> Result<Self, Error> {
        Self::from_tagged_with_key(UPDATE_TAG_KEY, input)
    }

    /// Collects the fields of `input` tagged under `tag_key`.
    ///
    /// `input` may be wrapped in `Option`s and `Box`es. Fields holding an absent
    /// `Option` are left out, and so are fields whose value is not a [`Value`]
    /// (nested structs, collections).
    ///
    /// # Errors
    ///
    /// [`ErrorKind::BadRequest`] when `input` is an absent `Option` or not a struct.
    pub fn from_tagged_with_key(tag_key: &str, input: &dyn Reflect) -> Result<Self, Error> {
        let Some(input) = automap::peel(input) else {
            return Err(Error::new(ErrorKind::BadRequest)
                .wrap(format!("invalid update: input was an empty {}", input.shape())));
        };
        let (Peek::Struct(st), Some(struct_type)) = (input.peek(), input.shape().as_struct())
        else {
            return Err(Error::new(ErrorKind::BadRequest)
                .wrap(format!("invalid update: input was not a struct, got {}", input.shape())));
        };

        let mut update = Update::new();
        for (position, field) in struct_type.fields.iter().enumerate() {
            let Some(key) = field.tag(tag_key).and_then(primary_segment) else {
                continue;
            };
            if let Some(value) = st.field(position).and_then(Value::from_reflect) {
                update.insert(key, value);
            }
        }
        Ok(update)
    }

    /// Sets `key` to `value`, returning the value it replaces.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// The value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Keys and values, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there is nothing to update.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Update {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut update = Update::new();
        for (key, value) in iter {
            update.insert(key, value);
        }
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automap::Automap;

    #[derive(Automap, Default)]
    struct Inner {
        #[tag(update = "x")]
        x: u8,
    }

    #[derive(Automap, Default)]
    struct User {
        #[tag(update = "id", json = "id")]
        id: String,
        #[tag(update = "name")]
        name: String,
        #[tag(update = "mail", json = "mail,omitempty")]
        mail: Option<String>,
        #[tag(update = "age")]
        age: Option<Box<u8>>,
        #[tag(update = "inner")]
        inner: Inner,
        #[tag(json = "secret")]
        secret: String,
    }

    fn jeff() -> User {
        User {
            id: "1337".into(),
            name: "Jeff".into(),
            mail: None,
            age: Some(Box::new(42)),
            inner: Inner { x: 1 },
            secret: "hunter2".into(),
        }
    }

    #[automap_testhelpers::test]
    fn collects_present_tagged_values() {
        let update = Update::from_tagged(&jeff()).unwrap();
        let entries: Vec<_> = update.iter().map(|(k, v)| (k, v.clone())).collect();
        assert_eq!(
            entries,
            [
                ("id", Value::from("1337")),
                ("name", Value::from("Jeff")),
                ("age", Value::U8(42)),
            ]
        );
    }

    #[automap_testhelpers::test]
    fn accepts_wrapped_input_and_other_keys() {
        let update = Update::from_tagged_with_key("json", &Some(Box::new(jeff()))).unwrap();
        let keys: Vec<_> = update.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["id", "secret"]);
    }

    #[automap_testhelpers::test]
    fn rejects_absent_and_non_struct_input() {
        let err = Update::from_tagged(&None::<User>).unwrap_err();
        assert!(err.is(ErrorKind::BadRequest));
        insta::assert_snapshot!(err, @"[invalid update: input was an empty Option<User>] -> [BAD REQUEST]");

        let err = Update::from_tagged(&42u32).unwrap_err();
        insta::assert_snapshot!(err, @"[invalid update: input was not a struct, got u32] -> [BAD REQUEST]");
    }

    #[automap_testhelpers::test]
    fn builds_from_pairs() {
        let update: Update = [("a", 1u32), ("b", 2u32), ("a", 3u32)].into_iter().collect();
        assert_eq!(update.len(), 2);
        assert_eq!(update.get("a"), Some(&Value::U32(3)));
        assert!(Update::new().is_empty());
    }
}
