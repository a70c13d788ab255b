use alloc::boxed::Box;

use crate::{Automap, Def, Peek, PointerDef, Poke, Reflect, Shape};

impl<T: Automap> Automap for Box<T> {
    const SHAPE: &'static Shape = &const {
        Shape::builder_for_sized::<Box<T>>("Box")
            .def(Def::Pointer(PointerDef::new(|| T::SHAPE)))
            .build()
    };
}

impl<T: Automap> Reflect for Box<T> {
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn peek(&self) -> Peek<'_> {
        Peek::Pointer(&**self)
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Pointer(&mut **self)
    }
}
