use automap_core::{Automap, Def, Peek, Poke, Reflect, ReflectStruct, Shape};

use crate::reconcile::{Reconciled, peel, reconcile};
use crate::{MapError, TAG_KEY, TagIndex, trace};

/// Builds `T` out of `source`, matching fields tagged under [`TAG_KEY`].
///
/// Shorthand for `Mapper::new().map(source)`; see [`Mapper::map`].
pub fn map<T: Automap + Default>(source: &dyn Reflect) -> Result<T, MapError> {
    Mapper::new().map(source)
}

/// Maps values between struct types by matching field tags.
///
/// A `Mapper` only holds the tag key it reads, so it is cheap to copy and can be
/// shared freely between threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mapper {
    tag_key: &'static str,
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Mapper {
    /// A mapper reading the [`TAG_KEY`] tags.
    pub const fn new() -> Self {
        Self { tag_key: TAG_KEY }
    }

    /// Reads tags under `tag_key` instead.
    pub const fn with_tag_key(self, tag_key: &'static str) -> Self {
        Self { tag_key }
    }

    /// The tag key this mapper reads.
    pub const fn tag_key(&self) -> &'static str {
        self.tag_key
    }

    /// Builds `T` out of `source`.
    ///
    /// The target starts out as `T::default()`. For every tag present on both sides,
    /// the source field is cloned into the target field, with `Option` and `Box`
    /// layers peeled on both sides, and nested structs mapped recursively. A source
    /// field that is an absent `Option` leaves the target field untouched.
    ///
    /// # Errors
    ///
    /// - [`MapError::InvalidTargetType`] if `T` is an `Option` or a `Box`, or not a
    ///   struct
    /// - [`MapError::InvalidSourceType`] if `source`, with its `Option` and `Box`
    ///   layers stripped, is not a struct
    /// - [`MapError::KindMismatch`] as soon as two fields sharing a tag hold
    ///   different kinds or different leaf types; there is no coercion
    ///
    /// Nothing is returned on error.
    ///
    /// Recursion follows the source value, so mapping a very deep chain (say, a linked
    /// list of `Option<Box<Node>>` with millions of nodes) can overflow the stack.
    pub fn map<T: Automap + Default>(&self, source: &dyn Reflect) -> Result<T, MapError> {
        if matches!(T::SHAPE.def, Def::Option(_) | Def::Pointer(_)) {
            return Err(MapError::InvalidTargetType { shape: T::SHAPE });
        }

        let source = match peel(source) {
            Some(peeled) => match peeled.peek() {
                Peek::Struct(st) => st,
                _ => {
                    return Err(MapError::InvalidSourceType {
                        shape: peeled.shape(),
                    });
                }
            },
            None => {
                return Err(MapError::InvalidSourceType {
                    shape: source.shape(),
                });
            }
        };

        let mut target = T::default();
        let Poke::Struct(target_struct) = target.poke() else {
            return Err(MapError::InvalidTargetType { shape: T::SHAPE });
        };

        trace!(
            "mapping {} into {} with tag key {:?}",
            source.shape(),
            T::SHAPE,
            self.tag_key
        );
        self.map_struct(source, target_struct)?;
        Ok(target)
    }

    fn map_struct(
        &self,
        source: &dyn ReflectStruct,
        target: &mut dyn ReflectStruct,
    ) -> Result<(), MapError> {
        let source_index = TagIndex::build(self.tag_key, source.shape());
        let target_index = TagIndex::build(self.tag_key, target.shape());
        let target_fields = target
            .shape()
            .as_struct()
            .map(|st| st.fields)
            .unwrap_or_default();

        for (tag, source_position) in source_index.iter() {
            let Some(target_position) = target_index.get(tag) else {
                trace!("tag {tag:?} only exists on {}, skipping", source.shape());
                continue;
            };
            let (Some(source_field), Some(target_field)) = (
                source.field(source_position),
                target_fields.get(target_position),
            ) else {
                continue;
            };

            match reconcile(tag, source_field, target_field.shape())? {
                Reconciled::Skip => {
                    trace!("source field for tag {tag:?} is absent, skipping");
                }
                action => {
                    if let Some(slot) = target.field_mut(target_position) {
                        self.write(tag, slot, action)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Writes through `target`'s `Option` and `Box` layers, filling in empty options.
    fn write(
        &self,
        tag: &'static str,
        target: &mut dyn Reflect,
        action: Reconciled<'_>,
    ) -> Result<(), MapError> {
        let target_shape = target.shape();
        let mismatch = |source: &'static Shape| MapError::KindMismatch {
            tag,
            source,
            target: target_shape,
        };

        match (target.poke(), action) {
            (_, Reconciled::Skip) => Ok(()),
            (Poke::Option(option), action) => {
                self.write(tag, option.get_or_insert_default(), action)
            }
            (Poke::Pointer(pointee), action) => self.write(tag, pointee, action),
            (Poke::Struct(target), Reconciled::Recurse(source)) => {
                trace!("recursing into {} for tag {tag:?}", target.shape());
                self.map_struct(source, target)
            }
            (Poke::Value(value), Reconciled::Assign(source)) => {
                if value.set_from(source) {
                    Ok(())
                } else {
                    Err(mismatch(source.shape()))
                }
            }
            (_, Reconciled::Assign(source)) => Err(mismatch(source.shape())),
            (_, Reconciled::Recurse(source)) => Err(mismatch(source.shape())),
        }
    }
}
