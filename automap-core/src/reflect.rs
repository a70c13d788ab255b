use core::any::Any;

use crate::Shape;

/// Allows mapping a type by tag.
///
/// The associated [`Shape`] describes the type statically; the [`Reflect`]
/// supertrait gives access to values of the type through `dyn` views.
///
/// Implement it with `#[derive(Automap)]` from the `automap` crate. For structs, the
/// derive also implements [`Reflect`] and [`ReflectStruct`].
pub trait Automap: Reflect + Sized {
    /// Static description of the type
    const SHAPE: &'static Shape;
}

/// Object-safe access to a value whose type implements [`Automap`].
pub trait Reflect: Any {
    /// The shape of the value's type
    fn shape(&self) -> &'static Shape;

    /// A read-only view of the value
    fn peek(&self) -> Peek<'_>;

    /// A mutable view of the value
    fn poke(&mut self) -> Poke<'_>;
}

/// Read-only view of a reflected value.
pub enum Peek<'mem> {
    /// A leaf: a scalar, a list, a map or an opaque value.
    Value(&'mem dyn Reflect),

    /// An `Option`, with its contents if present.
    Option(Option<&'mem dyn Reflect>),

    /// A `Box`, with its pointee.
    Pointer(&'mem dyn Reflect),

    /// A struct.
    Struct(&'mem dyn ReflectStruct),
}

/// Mutable view of a reflected value.
pub enum Poke<'mem> {
    /// A leaf that can be overwritten with [`ReflectValue::set_from`].
    Value(&'mem mut dyn ReflectValue),

    /// An `Option`.
    Option(&'mem mut dyn ReflectOption),

    /// A `Box`, with its pointee.
    Pointer(&'mem mut dyn Reflect),

    /// A struct.
    Struct(&'mem mut dyn ReflectStruct),
}

/// Field access for structs, by position in [`StructType::fields`](crate::StructType).
pub trait ReflectStruct: Reflect {
    /// Returns the field at `index`, if the struct describes that many fields.
    fn field(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the field at `index` mutably.
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;
}

/// Access to the contents of an `Option<T>`.
pub trait ReflectOption: Reflect {
    /// Returns the contents, if present.
    fn get(&self) -> Option<&dyn Reflect>;

    /// Returns the contents, first storing `T::default()` if the option was `None`.
    fn get_or_insert_default(&mut self) -> &mut dyn Reflect;
}

/// Overwriting leaves.
pub trait ReflectValue: Reflect {
    /// Overwrites `self` with a clone of `source`.
    ///
    /// Returns false, leaving `self` untouched, when `source` is not of the same type.
    fn set_from(&mut self, source: &dyn Reflect) -> bool;
}

impl dyn Reflect {
    /// Returns the value as `T`, if that is its type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }

    /// Returns the value as `&mut T`, if that is its type.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut::<T>()
    }
}

/// Clone-assigns `source` into `target` when both are `T`.
///
/// This is the [`ReflectValue::set_from`] of every leaf implementation in this crate.
pub fn assign_cloned<T: Clone + Any>(target: &mut T, source: &dyn Reflect) -> bool {
    match source.downcast_ref::<T>() {
        Some(value) => {
            target.clone_from(value);
            true
        }
        None => false,
    }
}
