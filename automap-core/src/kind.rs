use core::fmt;

/// All scalar types supported out of the box.
///
/// Two scalar fields are compatible only when their `ScalarType`s are equal: a `u32`
/// never maps onto a `u64`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ScalarType {
    /// Primitive type `bool`.
    Bool,
    /// Primitive type `char`.
    Char,
    /// `alloc::string::String`.
    String,
    /// Primitive type `f32`.
    F32,
    /// Primitive type `f64`.
    F64,
    /// Primitive type `u8`.
    U8,
    /// Primitive type `u16`.
    U16,
    /// Primitive type `u32`.
    U32,
    /// Primitive type `u64`.
    U64,
    /// Primitive type `u128`.
    U128,
    /// Primitive type `usize`.
    USize,
    /// Primitive type `i8`.
    I8,
    /// Primitive type `i16`.
    I16,
    /// Primitive type `i32`.
    I32,
    /// Primitive type `i64`.
    I64,
    /// Primitive type `i128`.
    I128,
    /// Primitive type `isize`.
    ISize,
}

impl ScalarType {
    /// Lowercase name of the scalar, as used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::Char => "char",
            ScalarType::String => "string",
            ScalarType::F32 => "f32",
            ScalarType::F64 => "f64",
            ScalarType::U8 => "u8",
            ScalarType::U16 => "u16",
            ScalarType::U32 => "u32",
            ScalarType::U64 => "u64",
            ScalarType::U128 => "u128",
            ScalarType::USize => "usize",
            ScalarType::I8 => "i8",
            ScalarType::I16 => "i16",
            ScalarType::I32 => "i32",
            ScalarType::I64 => "i64",
            ScalarType::I128 => "i128",
            ScalarType::ISize => "isize",
        }
    }
}

/// The underlying data category of a shape, used for compatibility checks.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
    /// A scalar; carries which one.
    Scalar(ScalarType),
    /// A struct with named fields.
    Struct,
    /// An `Option<T>`.
    Option,
    /// A `Box<T>`.
    Pointer,
    /// A `Vec<T>`.
    List,
    /// A map.
    Map,
    /// An opaque leaf.
    Opaque,
}

impl Kind {
    /// Lowercase name of the kind, as used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Scalar(scalar) => scalar.name(),
            Kind::Struct => "struct",
            Kind::Option => "option",
            Kind::Pointer => "pointer",
            Kind::List => "list",
            Kind::Map => "map",
            Kind::Opaque => "opaque",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
