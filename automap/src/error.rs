use automap_core::{Kind, Shape};

/// Errors that abort a mapping call.
///
/// Nothing is returned alongside an error: the partially built target is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// The source, once its `Option` and `Box` layers are stripped, is not a struct,
    /// or is an absent `Option`.
    InvalidSourceType {
        /// Shape of the offending source value: the stripped value, or the whole
        /// source as declared when an `Option` in it is absent.
        shape: &'static Shape,
    },

    /// The target type is an `Option` or a `Box`, or not a struct.
    InvalidTargetType {
        /// Shape of the requested target type.
        shape: &'static Shape,
    },

    /// Two fields sharing a tag resolve to incompatible kinds.
    KindMismatch {
        /// The shared tag.
        tag: &'static str,
        /// Underlying shape of the source field.
        source: &'static Shape,
        /// Underlying shape of the target field.
        target: &'static Shape,
    },
}

impl core::fmt::Display for MapError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            // stripped sources are never wrappers, so a wrapper here held an absent option
            MapError::InvalidSourceType { shape } => match shape.kind() {
                Kind::Option | Kind::Pointer => {
                    write!(f, "source must be a struct, got an empty {shape}")
                }
                kind => write!(f, "source must be a struct, got '{kind}' ({shape})"),
            },
            MapError::InvalidTargetType { shape } => match shape.kind() {
                Kind::Option | Kind::Pointer => write!(
                    f,
                    "target must be a struct, not a pointer or an option, got {shape}"
                ),
                kind => write!(f, "target must be a struct, got '{kind}' ({shape})"),
            },
            MapError::KindMismatch {
                tag,
                source,
                target,
            } => write!(
                f,
                "source and target kind mismatch for tag '{tag}' - source: '{}' ({source}), target: '{}' ({target})",
                source.kind(),
                target.kind(),
            ),
        }
    }
}

impl core::error::Error for MapError {}
