use automap_core::{Peek, Reflect, ReflectStruct, Shape};

use crate::MapError;

/// What to do with one matched field, decided before the target is touched.
pub(crate) enum Reconciled<'src> {
    /// The source is an absent `Option`: leave the target field alone.
    Skip,
    /// Clone this leaf into the target.
    Assign(&'src dyn Reflect),
    /// Map this struct into the target struct.
    Recurse(&'src dyn ReflectStruct),
}

/// Strips every `Option` and `Box` layer off a value.
///
/// Returns `None` as soon as an absent `Option` is found. What comes out is either a
/// struct or a leaf.
pub fn peel(mut value: &dyn Reflect) -> Option<&dyn Reflect> {
    loop {
        match value.peek() {
            Peek::Option(None) => return None,
            Peek::Option(Some(inner)) | Peek::Pointer(inner) => value = inner,
            Peek::Value(_) | Peek::Struct(_) => return Some(value),
        }
    }
}

/// Aligns a source field with the declared shape of its target field.
///
/// Only the static shape of the target is consulted, so a mismatch is reported before
/// any `Option` on the target side gets filled in.
pub(crate) fn reconcile<'src>(
    tag: &'static str,
    source: &'src dyn Reflect,
    target: &'static Shape,
) -> Result<Reconciled<'src>, MapError> {
    let Some(source) = peel(source) else {
        return Ok(Reconciled::Skip);
    };

    let source_shape = source.shape();
    let target_shape = target.underlying();
    let mismatch = MapError::KindMismatch {
        tag,
        source: source_shape,
        target: target_shape,
    };

    if source_shape.kind() != target_shape.kind() {
        return Err(mismatch);
    }

    match source.peek() {
        Peek::Struct(inner) => Ok(Reconciled::Recurse(inner)),
        // leaves of the same kind may still differ, e.g. `Vec<u8>` and `Vec<u16>`
        _ if source_shape.is(target_shape) => Ok(Reconciled::Assign(source)),
        _ => Err(mismatch),
    }
}
