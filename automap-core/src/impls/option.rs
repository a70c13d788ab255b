use crate::{Automap, Def, OptionDef, Peek, Poke, Reflect, ReflectOption, Shape};

/// `Option<T>` requires `T: Default`: writing through an absent option first stores a
/// default `T`, the way a nil pointer is given fresh zeroed storage.
impl<T: Automap + Default> Automap for Option<T> {
    const SHAPE: &'static Shape = &const {
        Shape::builder_for_sized::<Option<T>>("Option")
            .def(Def::Option(OptionDef::new(|| T::SHAPE)))
            .build()
    };
}

impl<T: Automap + Default> Reflect for Option<T> {
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn peek(&self) -> Peek<'_> {
        Peek::Option(ReflectOption::get(self))
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Option(self)
    }
}

impl<T: Automap + Default> ReflectOption for Option<T> {
    fn get(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    fn get_or_insert_default(&mut self) -> &mut dyn Reflect {
        Option::<T>::get_or_insert_with(self, T::default)
    }
}
