use crate::Shape;

/// Describes a field in a struct
#[derive(Clone, Copy, Debug)]
pub struct Field {
    /// name of the field, as declared
    pub name: &'static str,

    /// shape of the inner type
    ///
    /// the layer of indirection allows for self-referential types
    pub shape: fn() -> &'static Shape,

    /// tags attached with `#[tag(key = "value")]`, in declaration order
    pub tags: &'static [Tag],
}

impl Field {
    /// Returns the shape of the inner type
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }

    /// Returns a builder for Field
    pub const fn builder() -> FieldBuilder {
        FieldBuilder::new()
    }

    /// Returns the raw tag value stored under `key`, if any.
    ///
    /// When the same key appears more than once, the first occurrence wins, like a
    /// struct tag lookup would.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags.iter().find(|tag| tag.key == key).map(|tag| tag.value)
    }
}

/// A `key = "value"` pair attached to a field.
///
/// The value is kept verbatim, options included (`"name,omitempty"`); splitting it
/// is the business of whoever interprets the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tag {
    /// the key, e.g. `automap`
    pub key: &'static str,
    /// the raw value, e.g. `info,omitempty`
    pub value: &'static str,
}

impl Tag {
    /// Const ctor.
    pub const fn new(key: &'static str, value: &'static str) -> Self {
        Self { key, value }
    }
}

/// Builder for Field
pub struct FieldBuilder {
    name: Option<&'static str>,
    shape: Option<fn() -> &'static Shape>,
    tags: &'static [Tag],
}

impl FieldBuilder {
    /// Creates a new FieldBuilder
    #[allow(clippy::new_without_default)]
    pub const fn new() -> Self {
        Self {
            name: None,
            shape: None,
            tags: &[],
        }
    }

    /// Sets the name for the Field
    pub const fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets the shape for the Field
    pub const fn shape(mut self, shape: fn() -> &'static Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Sets the tags for the Field
    pub const fn tags(mut self, tags: &'static [Tag]) -> Self {
        self.tags = tags;
        self
    }

    /// Builds the Field
    ///
    /// # Panics
    ///
    /// Panics (at compile time, when used in a const) if the name or shape is missing.
    pub const fn build(self) -> Field {
        let Some(name) = self.name else {
            panic!("Field::builder() requires a name")
        };
        let Some(shape) = self.shape else {
            panic!("Field::builder() requires a shape")
        };
        Field {
            name,
            shape,
            tags: self.tags,
        }
    }
}
