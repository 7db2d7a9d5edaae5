use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt::Display;

use crate::common::{Value, FIELD_SEPARATOR};
use crate::record::Record;

type Segments = SmallVec<[String; 4]>;

/// A dotted field path split into its segments.
///
/// Parsing never fails: `""` has no segments and `"model..name"` keeps its empty
/// segment, and both simply resolve to nothing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldPath {
    path: String,
    segments: Segments,
}

impl FieldPath {
    pub fn parse(path: &str) -> FieldPath {
        let segments = if path.is_empty() {
            Segments::new()
        } else {
            path.split(FIELD_SEPARATOR).map(str::to_string).collect()
        };

        FieldPath {
            path: path.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments; `1` for a top level field.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        FieldPath::parse(path)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let path = String::deserialize(deserializer)?;
        Ok(FieldPath::parse(&path))
    }
}

/// Resolves `path` against `record`.
///
/// Returns `None` when any segment is missing, when a segment is empty, or when
/// the traversal reaches a scalar before the path ends. Array values are
/// indexed by canonical decimal segments (`crew.0.name`).
pub fn resolve<'a>(record: &'a Record, path: &FieldPath) -> Option<&'a Value> {
    let (first, rest) = path.segments().split_first()?;
    if first.is_empty() {
        return None;
    }

    let mut current = record.field(first)?;
    for segment in rest {
        current = step(current, segment)?;
    }
    Some(current)
}

/// Resolves `path` against an arbitrary value. A record root behaves like
/// [`resolve`]; any other root resolves only the empty path.
pub fn resolve_value<'a>(value: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    if path.depth() == 0 {
        return Some(value);
    }
    match value {
        Value::Record(record) => resolve(record, path),
        _ => None,
    }
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    if segment.is_empty() {
        return None;
    }

    match value {
        Value::Record(record) => record.field(segment),
        Value::Array(items) => array_index(segment).and_then(|index| items.get(index)),
        _ => None,
    }
}

// only canonical indexes address array elements: "0", "12", never "01" or "+1"
fn array_index(segment: &str) -> Option<usize> {
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if segment.len() > 1 && segment.starts_with('0') {
        return None;
    }
    segment.parse::<usize>().ok()
}
