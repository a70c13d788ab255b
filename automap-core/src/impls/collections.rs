//! Lists and maps. These are leaves: they are cloned as a whole, never walked.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::hash::Hash;
use std::collections::HashMap;

use crate::{
    Automap, Def, ListDef, MapDef, Peek, Poke, Reflect, ReflectValue, Shape, assign_cloned,
};

impl<T: Automap + Clone> Automap for Vec<T> {
    const SHAPE: &'static Shape = &const {
        Shape::builder_for_sized::<Vec<T>>("Vec")
            .def(Def::List(ListDef::new(|| T::SHAPE)))
            .build()
    };
}

impl<T: Automap + Clone> Reflect for Vec<T> {
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn peek(&self) -> Peek<'_> {
        Peek::Value(self)
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Value(self)
    }
}

impl<T: Automap + Clone> ReflectValue for Vec<T> {
    fn set_from(&mut self, source: &dyn Reflect) -> bool {
        assign_cloned(self, source)
    }
}

impl<K, V> Automap for HashMap<K, V>
where
    K: Automap + Clone + Eq + Hash,
    V: Automap + Clone,
{
    const SHAPE: &'static Shape = &const {
        Shape::builder_for_sized::<HashMap<K, V>>("HashMap")
            .def(Def::Map(MapDef::new(|| K::SHAPE, || V::SHAPE)))
            .build()
    };
}

impl<K, V> Reflect for HashMap<K, V>
where
    K: Automap + Clone + Eq + Hash,
    V: Automap + Clone,
{
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn peek(&self) -> Peek<'_> {
        Peek::Value(self)
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Value(self)
    }
}

impl<K, V> ReflectValue for HashMap<K, V>
where
    K: Automap + Clone + Eq + Hash,
    V: Automap + Clone,
{
    fn set_from(&mut self, source: &dyn Reflect) -> bool {
        assign_cloned(self, source)
    }
}

impl<K, V> Automap for BTreeMap<K, V>
where
    K: Automap + Clone + Ord,
    V: Automap + Clone,
{
    const SHAPE: &'static Shape = &const {
        Shape::builder_for_sized::<BTreeMap<K, V>>("BTreeMap")
            .def(Def::Map(MapDef::new(|| K::SHAPE, || V::SHAPE)))
            .build()
    };
}

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: Automap + Clone + Ord,
    V: Automap + Clone,
{
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn peek(&self) -> Peek<'_> {
        Peek::Value(self)
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Value(self)
    }
}

impl<K, V> ReflectValue for BTreeMap<K, V>
where
    K: Automap + Clone + Ord,
    V: Automap + Clone,
{
    fn set_from(&mut self, source: &dyn Reflect) -> bool {
        assign_cloned(self, source)
    }
}
