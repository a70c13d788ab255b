use core::fmt;

use crate::{ConstTypeId, Field, Kind};

/// Schema for a type: what it is, and for structs, which fields it has and how they
/// are tagged.
///
/// Shapes are `'static` and built in const context, either by the `Automap`
/// implementations in this crate or by `#[derive(Automap)]`.
#[derive(Clone, Copy, Debug)]
pub struct Shape {
    /// Unique type identifier, used to check that two leaves can be assigned to
    /// one another.
    pub id: ConstTypeId,

    /// Name of the type without generic parameters, e.g. `Option` or `User`.
    pub type_identifier: &'static str,

    /// What kind of type this is.
    pub def: Def,
}

impl Shape {
    /// Returns a builder for the shape of a sized type
    pub const fn builder_for_sized<T: 'static>(type_identifier: &'static str) -> ShapeBuilder {
        ShapeBuilder {
            id: ConstTypeId::of::<T>(),
            type_identifier,
            def: Def::Opaque,
        }
    }

    /// Returns true if this shape describes `T`.
    #[inline]
    pub fn is_type<T: 'static>(&self) -> bool {
        self.id == ConstTypeId::of::<T>()
    }

    /// Returns true if both shapes describe the same type.
    #[inline]
    pub fn is(&self, other: &Shape) -> bool {
        self.id == other.id
    }

    /// The compatibility category of this shape.
    pub fn kind(&self) -> Kind {
        match self.def {
            Def::Scalar(scalar) => Kind::Scalar(scalar),
            Def::Struct(_) => Kind::Struct,
            Def::Option(_) => Kind::Option,
            Def::Pointer(_) => Kind::Pointer,
            Def::List(_) => Kind::List,
            Def::Map(_) => Kind::Map,
            Def::Opaque => Kind::Opaque,
        }
    }

    /// Returns the shape found after peeling every `Option` and `Box` layer.
    ///
    /// `Option<Box<Option<u32>>>` peels down to `u32`.
    pub fn underlying(&'static self) -> &'static Shape {
        let mut shape = self;
        loop {
            shape = match shape.def {
                Def::Option(def) => def.t(),
                Def::Pointer(def) => def.pointee(),
                _ => return shape,
            };
        }
    }

    /// Returns the struct definition if this shape is a struct.
    pub fn as_struct(&self) -> Option<&StructType> {
        match &self.def {
            Def::Struct(st) => Some(st),
            _ => None,
        }
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.is(other)
    }
}

impl Eq for Shape {}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.def {
            Def::Option(def) => write!(f, "{}<{}>", self.type_identifier, def.t()),
            Def::Pointer(def) => write!(f, "{}<{}>", self.type_identifier, def.pointee()),
            Def::List(def) => write!(f, "{}<{}>", self.type_identifier, def.t()),
            Def::Map(def) => write!(f, "{}<{}, {}>", self.type_identifier, def.k(), def.v()),
            _ => f.write_str(self.type_identifier),
        }
    }
}

/// Builder for [`Shape`], usable in const context.
pub struct ShapeBuilder {
    id: ConstTypeId,
    type_identifier: &'static str,
    def: Def,
}

impl ShapeBuilder {
    /// Sets the definition of the shape
    pub const fn def(mut self, def: Def) -> Self {
        self.def = def;
        self
    }

    /// Builds the shape
    pub const fn build(self) -> Shape {
        Shape {
            id: self.id,
            type_identifier: self.type_identifier,
            def: self.def,
        }
    }
}

/// The definition of a shape: scalar, struct, option, pointer, list, map or opaque.
#[derive(Clone, Copy, Debug)]
pub enum Def {
    /// A primitive, or a `String`.
    Scalar(crate::ScalarType),

    /// A struct with named fields.
    Struct(StructType),

    /// `Option<T>`: a value that may be absent.
    Option(OptionDef),

    /// `Box<T>`: an owned reference that is always present.
    Pointer(PointerDef),

    /// `Vec<T>`, copied as a whole.
    List(ListDef),

    /// `HashMap<K, V>` or `BTreeMap<K, V>`, copied as a whole.
    Map(MapDef),

    /// A leaf that is only ever copied as a whole, like a timestamp or a UUID.
    Opaque,
}

/// Fields of a struct, in declaration order.
///
/// Only fields carrying at least one `#[tag(...)]` attribute are described; the
/// position of a field is its index in this slice.
#[derive(Clone, Copy, Debug)]
pub struct StructType {
    /// all described fields
    pub fields: &'static [Field],
}

impl StructType {
    /// Const ctor.
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }
}

/// Describes an `Option<T>`.
#[derive(Clone, Copy, Debug)]
pub struct OptionDef {
    /// shape of the `T` in `Option<T>`
    pub t: fn() -> &'static Shape,
}

impl OptionDef {
    /// Const ctor.
    pub const fn new(t: fn() -> &'static Shape) -> Self {
        Self { t }
    }

    /// Returns the inner type shape of the option
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}

/// Describes a `Box<T>`.
#[derive(Clone, Copy, Debug)]
pub struct PointerDef {
    /// shape of the pointee
    pub pointee: fn() -> &'static Shape,
}

impl PointerDef {
    /// Const ctor.
    pub const fn new(pointee: fn() -> &'static Shape) -> Self {
        Self { pointee }
    }

    /// Returns the shape of the pointee
    pub fn pointee(&self) -> &'static Shape {
        (self.pointee)()
    }
}

/// Describes a `Vec<T>`.
#[derive(Clone, Copy, Debug)]
pub struct ListDef {
    /// shape of the items
    pub t: fn() -> &'static Shape,
}

impl ListDef {
    /// Const ctor.
    pub const fn new(t: fn() -> &'static Shape) -> Self {
        Self { t }
    }

    /// Returns the shape of the items
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}

/// Describes a map from `K` to `V`.
#[derive(Clone, Copy, Debug)]
pub struct MapDef {
    /// shape of the keys
    pub k: fn() -> &'static Shape,
    /// shape of the values
    pub v: fn() -> &'static Shape,
}

impl MapDef {
    /// Const ctor.
    pub const fn new(k: fn() -> &'static Shape, v: fn() -> &'static Shape) -> Self {
        Self { k, v }
    }

    /// Returns the shape of the keys
    pub fn k(&self) -> &'static Shape {
        (self.k)()
    }

    /// Returns the shape of the values
    pub fn v(&self) -> &'static Shape {
        (self.v)()
    }
}
