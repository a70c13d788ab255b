use automap_core::Shape;
use indexmap::IndexMap;

/// The tag key the mapper reads unless told otherwise.
pub const TAG_KEY: &str = "automap";

/// Tag value marking a field as excluded, as in `#[tag(automap = "-")]`.
pub const SKIP_TAG: &str = "-";

/// Maps tag names to field positions for one struct type.
///
/// Positions index into [`StructType::fields`](automap_core::StructType), which is also
/// what [`ReflectStruct::field`](automap_core::ReflectStruct::field) takes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagIndex {
    positions: IndexMap<&'static str, usize>,
}

impl TagIndex {
    /// Indexes the fields of `shape` tagged under `tag_key`.
    ///
    /// Leading `Option` and `Box` layers are stripped first. A shape that is not a
    /// struct yields an empty index. When two fields share a tag, the one declared
    /// last wins.
    ///
    /// Tags are keyed by their [`primary_segment`], whitespace trimmed: a field
    /// tagged `" name ,omitempty"` is found under `"name"`, never under `" name "`.
    pub fn build(tag_key: &str, shape: &'static Shape) -> Self {
        let Some(st) = shape.underlying().as_struct() else {
            return Self::default();
        };

        let mut positions = IndexMap::with_capacity(st.fields.len());
        for (position, field) in st.fields.iter().enumerate() {
            if let Some(tag) = field.tag(tag_key).and_then(primary_segment) {
                positions.insert(tag, position);
            }
        }
        Self { positions }
    }

    /// Position of the field tagged `tag`.
    pub fn get(&self, tag: &str) -> Option<usize> {
        self.positions.get(tag).copied()
    }

    /// Returns true if a field is tagged `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.positions.contains_key(tag)
    }

    /// Tags and positions, in the order tags were first seen.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.positions.iter().map(|(tag, position)| (*tag, *position))
    }

    /// Number of indexed tags.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if no field is indexed.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Extracts the name part of a raw tag value: `" info ,omitempty"` gives `"info"`.
///
/// Returns `None` for tags that exclude the field, which are the empty ones and
/// [`SKIP_TAG`].
pub fn primary_segment(raw: &str) -> Option<&str> {
    let primary = match raw.split_once(',') {
        Some((primary, _options)) => primary,
        None => raw,
    }
    .trim();

    if primary.is_empty() || primary == SKIP_TAG {
        None
    } else {
        Some(primary)
    }
}

/// Maps each tag under `tag_key` to the shape of the field carrying it.
///
/// Returns `None` when `shape` is not a struct. Unlike [`TagIndex::build`], no
/// `Option` or `Box` layer is stripped from `shape`; the field shapes are returned as
/// declared, layers included.
pub fn tag_to_type(
    tag_key: &str,
    shape: &'static Shape,
) -> Option<IndexMap<&'static str, &'static Shape>> {
    let st = shape.as_struct()?;
    Some(
        st.fields
            .iter()
            .filter_map(|field| Some((primary_segment(field.tag(tag_key)?)?, field.shape())))
            .collect(),
    )
}
