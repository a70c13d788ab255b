use core::cmp::Ordering;
use core::fmt;

use automap::{Reflect, Shape};
use chrono::NaiveDateTime;

/// Format of timestamps in queries, for `chrono`'s parser.
pub const QUERY_TIME_FORMAT: &str = "%Y-%m-%d_%H:%M";

/// [`QUERY_TIME_FORMAT`], the way it's explained to people.
pub const QUERY_TIME_HINT: &str = "YYYY-MM-DD_hh:mm";

macro_rules! values {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// A scalar or timestamp lifted out of a struct field, or parsed from a query.
        ///
        /// Values of different variants never compare: a `U32(1)` is neither equal to,
        /// nor less than, an `I64(1)`.
        #[derive(Clone, Debug, PartialEq)]
        pub enum Value {
            $(
                #[allow(missing_docs)]
                $variant($ty),
            )*
            /// A timestamp without a time zone.
            DateTime(NaiveDateTime),
        }

        impl Value {
            /// Reads a field value, stripping `Option` and `Box` layers.
            ///
            /// Returns `None` for absent options, structs, collections, and leaves that
            /// have no [`Value`] counterpart.
            pub fn from_reflect(value: &dyn Reflect) -> Option<Self> {
                let value = automap::peel(value)?;
                $(
                    if let Some(inner) = value.downcast_ref::<$ty>() {
                        return Some(Value::$variant(inner.clone()));
                    }
                )*
                value.downcast_ref::<NaiveDateTime>().copied().map(Value::DateTime)
            }

            /// The value as a reflected leaf, ready to be written into a field of the
            /// same type.
            pub fn as_reflect(&self) -> &dyn Reflect {
                match self {
                    $(Value::$variant(inner) => inner,)*
                    Value::DateTime(inner) => inner,
                }
            }

            /// Parses `text` as a value of the type described by `shape`.
            ///
            /// `Option` and `Box` layers are stripped from `shape` first. Timestamps are
            /// read in the [`QUERY_TIME_FORMAT`].
            pub fn parse_as(shape: &'static Shape, text: &str) -> Result<Self, ParseValueError> {
                let shape = shape.underlying();
                $(
                    if shape.is_type::<$ty>() {
                        return text
                            .parse::<$ty>()
                            .map(Value::$variant)
                            .map_err(|err| ParseValueError::new(shape, text, err.to_string()));
                    }
                )*
                if shape.is_type::<NaiveDateTime>() {
                    return NaiveDateTime::parse_from_str(text, QUERY_TIME_FORMAT)
                        .map(Value::DateTime)
                        .map_err(|err| {
                            ParseValueError::new(
                                shape,
                                text,
                                format!("valid form is: {QUERY_TIME_HINT}, {err}"),
                            )
                        });
                }
                Err(ParseValueError::new(shape, text, "unsupported type".to_string()))
            }
        }

        impl PartialOrd for Value {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                match (self, other) {
                    $((Value::$variant(a), Value::$variant(b)) => a.partial_cmp(b),)*
                    (Value::DateTime(a), Value::DateTime(b)) => a.partial_cmp(b),
                    _ => None,
                }
            }
        }

        impl fmt::Display for Value {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Value::$variant(inner) => fmt::Display::fmt(inner, f),)*
                    Value::DateTime(inner) => write!(f, "{}", inner.format(QUERY_TIME_FORMAT)),
                }
            }
        }

        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

values! {
    Bool(bool),
    Char(char),
    String(String),
    F32(f32),
    F64(f64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    USize(usize),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    ISize(isize),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

/// Text that does not parse as the type it was meant for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseValueError {
    /// The type the text was parsed as.
    pub expected: &'static Shape,
    /// The offending text.
    pub text: String,
    /// Why it did not parse.
    pub reason: String,
}

impl ParseValueError {
    fn new(expected: &'static Shape, text: &str, reason: String) -> Self {
        Self {
            expected,
            text: text.to_owned(),
            reason,
        }
    }
}

impl fmt::Display for ParseValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "value({}) is not a valid {}, info: ({})",
            self.text, self.expected, self.reason
        )
    }
}

impl core::error::Error for ParseValueError {}
