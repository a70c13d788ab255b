//! Scalar type implementations: bool, char, integers, floats, `String`

use alloc::string::String;

use crate::{Automap, Def, ScalarType, Shape};

macro_rules! impl_automap_for_scalar {
    ($type:ty, $name:literal, $scalar:ident) => {
        impl Automap for $type {
            const SHAPE: &'static Shape = &const {
                Shape::builder_for_sized::<$type>($name)
                    .def(Def::Scalar(ScalarType::$scalar))
                    .build()
            };
        }

        impl_leaf_reflect!($type);
    };
}

impl_automap_for_scalar!(bool, "bool", Bool);
impl_automap_for_scalar!(char, "char", Char);
impl_automap_for_scalar!(String, "String", String);

impl_automap_for_scalar!(f32, "f32", F32);
impl_automap_for_scalar!(f64, "f64", F64);

impl_automap_for_scalar!(u8, "u8", U8);
impl_automap_for_scalar!(u16, "u16", U16);
impl_automap_for_scalar!(u32, "u32", U32);
impl_automap_for_scalar!(u64, "u64", U64);
impl_automap_for_scalar!(u128, "u128", U128);
impl_automap_for_scalar!(usize, "usize", USize);

impl_automap_for_scalar!(i8, "i8", I8);
impl_automap_for_scalar!(i16, "i16", I16);
impl_automap_for_scalar!(i32, "i32", I32);
impl_automap_for_scalar!(i64, "i64", I64);
impl_automap_for_scalar!(i128, "i128", I128);
impl_automap_for_scalar!(isize, "isize", ISize);

#[cfg(test)]
mod tests {
    use crate::{Automap, Kind, Peek, Poke, Reflect, ScalarType};

    #[automap_testhelpers::test]
    fn scalars_are_leaves() {
        assert_eq!(String::SHAPE.kind(), Kind::Scalar(ScalarType::String));
        assert_eq!(i64::SHAPE.kind().name(), "i64");
        assert!(matches!(42_u8.peek(), Peek::Value(_)));
    }

    #[automap_testhelpers::test]
    fn set_from_requires_the_same_type() {
        let mut target = 1_u32;
        let Poke::Value(slot) = target.poke() else {
            panic!("u32 should poke as a value");
        };
        assert!(!slot.set_from(&2_u64));
        assert!(slot.set_from(&3_u32));
        assert_eq!(target, 3);
    }

    #[automap_testhelpers::test]
    fn downcast_through_dyn_reflect() {
        let value = String::from("hello");
        let reflect: &dyn Reflect = &value;
        assert_eq!(reflect.downcast_ref::<String>().map(String::as_str), Some("hello"));
        assert!(reflect.downcast_ref::<u8>().is_none());
    }
}
