//! Dot/index addresses into an element tree.
//!
//! `route.from.steps.0.log` addresses the first step of a route; integer
//! segments index arrays, every other segment names a field. There is no
//! escaping, so field names cannot contain dots.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Literal segment used for the insertion point of an empty branch.
pub const PLACEHOLDER: &str = "placeholder";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Field(String),
    Index(usize),
}

impl Segment {
    pub fn as_field(&self) -> Option<&str> {
        match self {
            Segment::Field(name) => Some(name),
            Segment::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Index(index) => Some(*index),
            Segment::Field(_) => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => f.write_str(name),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathParseError {
    #[error("path is empty")]
    Empty,
    #[error("path '{0}' contains an empty segment")]
    EmptySegment(String),
}

/// Typed path: a sequence of field-or-index segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(Vec<Segment>);

/// How the tail of a path is interpreted by the structural editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// `a.b.0`: the member at `index` of the array at `array`.
    ArrayItem { array: Path, index: usize },
    /// `a.0.b`: field `field` on the member at `index` of the array at `array`.
    IndexedMember {
        array: Path,
        index: usize,
        field: String,
    },
    /// `a.b`: field `field` on the object at `object`.
    ObjectField { object: Path, field: String },
}

impl Path {
    pub fn new(segments: Vec<Segment>) -> Self {
        Path(segments)
    }

    pub fn root(name: &str) -> Self {
        Path(vec![Segment::Field(name.to_string())])
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    pub fn field(&self, name: &str) -> Path {
        let mut segments = self.0.clone();
        segments.push(Segment::Field(name.to_string()));
        Path(segments)
    }

    pub fn index(&self, index: usize) -> Path {
        let mut segments = self.0.clone();
        segments.push(Segment::Index(index));
        Path(segments)
    }

    pub fn parent(&self) -> Option<Path> {
        if self.0.is_empty() {
            return None;
        }
        Some(Path(self.0[..self.0.len() - 1].to_vec()))
    }

    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.last(), Some(Segment::Field(name)) if name == PLACEHOLDER)
    }

    /// Classifies the path by its last two segments.
    pub fn resolve(&self) -> Option<Resolution> {
        let (last, rest) = self.0.split_last()?;
        match last {
            Segment::Index(index) => Some(Resolution::ArrayItem {
                array: Path(rest.to_vec()),
                index: *index,
            }),
            Segment::Field(field) => match rest.split_last() {
                Some((Segment::Index(index), array)) => Some(Resolution::IndexedMember {
                    array: Path(array.to_vec()),
                    index: *index,
                    field: field.clone(),
                }),
                _ => Some(Resolution::ObjectField {
                    object: Path(rest.to_vec()),
                    field: field.clone(),
                }),
            },
        }
    }

    /// Re-addresses this path after the member `removed_index` of `array` was spliced out.
    pub fn rebased_after_removal(&self, array: &Path, removed_index: usize) -> Path {
        if !self.starts_with(array) || self.0.len() <= array.len() {
            return self.clone();
        }
        let mut segments = self.0.clone();
        if let Segment::Index(index) = &mut segments[array.len()] {
            if *index > removed_index {
                *index -= 1;
            }
        }
        Path(segments)
    }
}

impl FromStr for Path {
    type Err = PathParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err(PathParseError::Empty);
        }
        value
            .split('.')
            .map(|part| {
                if part.is_empty() {
                    Err(PathParseError::EmptySegment(value.to_string()))
                } else if let Ok(index) = part.parse::<usize>() {
                    Ok(Segment::Index(index))
                } else {
                    Ok(Segment::Field(part.to_string()))
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Path)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.0.iter().enumerate() {
            if position > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
