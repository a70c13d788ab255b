/// Implements [`Reflect`](crate::Reflect) and [`ReflectValue`](crate::ReflectValue)
/// for a non-generic leaf type that is `Clone`.
macro_rules! impl_leaf_reflect {
    ($type:ty) => {
        impl $crate::Reflect for $type {
            #[inline]
            fn shape(&self) -> &'static $crate::Shape {
                <Self as $crate::Automap>::SHAPE
            }

            #[inline]
            fn peek(&self) -> $crate::Peek<'_> {
                $crate::Peek::Value(self)
            }

            #[inline]
            fn poke(&mut self) -> $crate::Poke<'_> {
                $crate::Poke::Value(self)
            }
        }

        impl $crate::ReflectValue for $type {
            #[inline]
            fn set_from(&mut self, source: &dyn $crate::Reflect) -> bool {
                $crate::assign_cloned(self, source)
            }
        }
    };
}

/// Implements [`Automap`](crate::Automap) for an opaque leaf, plus its reflection.
macro_rules! impl_automap_for_opaque {
    ($type:ty, $name:literal) => {
        impl $crate::Automap for $type {
            const SHAPE: &'static $crate::Shape = &const {
                $crate::Shape::builder_for_sized::<$type>($name)
                    .def($crate::Def::Opaque)
                    .build()
            };
        }

        impl_leaf_reflect!($type);
    };
}
