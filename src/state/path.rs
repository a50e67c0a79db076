//! Field paths and resolution against a nested value tree
//!
//! Supported syntax:
//! - `a.b.c` (dot notation)
//! - `a.b[0].c` (bracket index)
//! - `a.b.0.c` (numeric key, indexes arrays)

use crate::error::FormError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Largest array index a path may address
pub const MAX_INDEX: usize = 10_000;

/// A parsed path segment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object key: `.name`
    Key(String),
    /// Array index: `[0]`
    Index(usize),
}

impl Segment {
    /// Numeric view of the segment, used when a key meets an array
    fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Key(k) => k.parse().ok().filter(|i| *i <= MAX_INDEX),
            Segment::Index(i) => Some(*i),
        }
    }

    /// Key view of the segment, used when an index meets an object
    fn as_key(&self) -> String {
        match self {
            Segment::Key(k) => k.clone(),
            Segment::Index(i) => i.to_string(),
        }
    }
}

/// A validated, non-empty path locating a value inside the tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath {
    raw: String,
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Parse a path string
    ///
    /// - "email" → [Key("email")]
    /// - "items[0].name" → [Key("items"), Index(0), Key("name")]
    pub fn parse(path: &str) -> Result<Self, FormError> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(FormError::EmptyPath);
        }

        let mut segments = Vec::new();
        for part in trimmed.split('.') {
            if part.is_empty() {
                return Err(FormError::invalid_path(trimmed, "empty segment"));
            }

            let (key, mut rest) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };
            if !key.is_empty() {
                segments.push(Segment::Key(key.to_string()));
            } else if rest.is_empty() {
                return Err(FormError::invalid_path(trimmed, "empty segment"));
            }

            while !rest.is_empty() {
                let Some(inner) = rest.strip_prefix('[') else {
                    return Err(FormError::invalid_path(
                        trimmed,
                        format!("unexpected '{rest}' after index"),
                    ));
                };
                let Some(end) = inner.find(']') else {
                    return Err(FormError::invalid_path(trimmed, "unterminated bracket"));
                };
                let index = inner[..end].parse::<usize>().map_err(|_| {
                    FormError::invalid_path(trimmed, format!("'{}' is not an index", &inner[..end]))
                })?;
                if index > MAX_INDEX {
                    return Err(FormError::invalid_path(
                        trimmed,
                        format!("index {index} exceeds {MAX_INDEX}"),
                    ));
                }
                segments.push(Segment::Index(index));
                rest = &inner[end + 1..];
            }
        }

        Ok(Self {
            raw: trimmed.to_string(),
            segments,
        })
    }

    /// The path as written by the caller
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Spelling-independent form: `items[0]` and `items.0` share one key
    pub fn canonical(&self) -> String {
        self.segments
            .iter()
            .map(Segment::as_key)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// True when `self` equals `other` or one contains the other
    pub fn overlaps(&self, other: &FieldPath) -> bool {
        let n = self.segments.len().min(other.segments.len());
        self.segments[..n]
            .iter()
            .zip(&other.segments[..n])
            .all(|(a, b)| a.as_key() == b.as_key())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for FieldPath {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = FormError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.raw
    }
}

/// Borrow the value at `path`, if every segment is present.
///
/// Falls back to treating the whole raw path as a literal top-level key,
/// so flat maps like `{"user.name": ..}` resolve too.
pub fn lookup<'a>(tree: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    nested(tree, path).or_else(|| tree.as_object().and_then(|map| map.get(path.as_str())))
}

/// Mutable counterpart of [`lookup`], with the same flat-key fallback
pub fn lookup_mut<'a>(tree: &'a mut Value, path: &FieldPath) -> Option<&'a mut Value> {
    if nested(tree, path).is_some() {
        return nested_mut(tree, path);
    }
    tree.as_object_mut()
        .and_then(|map| map.get_mut(path.as_str()))
}

fn nested<'a>(tree: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(tree, |node, segment| match node {
            Value::Object(map) => map.get(&segment.as_key()),
            Value::Array(items) => segment.as_index().and_then(|i| items.get(i)),
            _ => None,
        })
}

fn nested_mut<'a>(tree: &'a mut Value, path: &FieldPath) -> Option<&'a mut Value> {
    path.segments()
        .iter()
        .try_fold(tree, |node, segment| match node {
            Value::Object(map) => map.get_mut(&segment.as_key()),
            Value::Array(items) => match segment.as_index() {
                Some(i) => items.get_mut(i),
                None => None,
            },
            _ => None,
        })
}

/// Value at `path`, or `fallback` when any segment is absent.
///
/// A present `null` is returned as `null`.
pub fn resolve(tree: &Value, path: &FieldPath, fallback: Value) -> Value {
    lookup(tree, path).cloned().unwrap_or(fallback)
}

/// Write `value` at `path`, creating intermediate containers.
///
/// Missing containers become arrays when the next segment is an
/// `Index`, objects otherwise. A scalar standing in the way is replaced.
pub fn assign(tree: &mut Value, path: &FieldPath, value: Value) {
    *slot_mut(tree, path) = value;
}

/// Slot at `path`, creating intermediate containers the way [`assign`] does
pub fn slot_mut<'a>(tree: &'a mut Value, path: &FieldPath) -> &'a mut Value {
    let segments = path.segments();
    let mut node = tree;

    for (i, segment) in segments.iter().enumerate() {
        node = child_slot(node, segment);
        if let Some(next) = segments.get(i + 1) {
            ensure_container(node, matches!(next, Segment::Index(_)));
        }
    }
    node
}

/// Remove the value at `path`. Returns the removed value, if any.
pub fn remove(tree: &mut Value, path: &FieldPath) -> Option<Value> {
    let (last, parents) = path.segments().split_last()?;
    let mut node = tree;
    for segment in parents {
        node = match node {
            Value::Object(map) => map.get_mut(&segment.as_key())?,
            Value::Array(items) => items.get_mut(segment.as_index()?)?,
            _ => return None,
        };
    }
    match node {
        Value::Object(map) => map.shift_remove(&last.as_key()),
        Value::Array(items) => {
            let slot = items.get_mut(last.as_index()?)?;
            Some(std::mem::replace(slot, Value::Null))
        }
        _ => None,
    }
}

/// Slot for `segment` under `node`, created if missing
fn child_slot<'a>(node: &'a mut Value, segment: &Segment) -> &'a mut Value {
    match (node, segment.as_index()) {
        (Value::Array(items), Some(index)) => {
            if items.len() <= index {
                items.resize(index + 1, Value::Null);
            }
            &mut items[index]
        }
        (node, _) => {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            match node {
                Value::Object(map) => map.entry(segment.as_key()).or_insert(Value::Null),
                _ => unreachable!("node was just replaced with an object"),
            }
        }
    }
}

fn ensure_container(slot: &mut Value, as_array: bool) {
    match slot {
        Value::Object(_) | Value::Array(_) => {}
        _ if as_array => *slot = Value::Array(Vec::new()),
        _ => *slot = Value::Object(Map::new()),
    }
}
