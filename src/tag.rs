//! Defines [Tags], the labels attached to a transaction.
//!
//! Tags are stored in a single column as a JSON array of strings. The array
//! keeps insertion order, but only membership matters: filtering matches a
//! transaction if any of its tags is wanted, and aggregation counts a
//! transaction once for each of its tags.

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Deserializer, Serialize};

/// An ordered set of tag names.
///
/// Construction trims each name, drops blank names and removes duplicates
/// (the first occurrence wins), so a tag never appears twice on the same
/// transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tags(Vec<String>);

impl Tags {
    /// Create a tag set from any collection of names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags: Vec<String> = Vec::new();

        for name in names {
            let name = name.as_ref().trim();

            if name.is_empty() || tags.iter().any(|tag| tag == name) {
                continue;
            }

            tags.push(name.to_owned());
        }

        Self(tags)
    }

    /// Whether `name` is one of the tags.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|tag| tag == name)
    }

    /// Whether the set shares at least one tag with `names`.
    pub fn intersects<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|name| self.contains(name.as_ref()))
    }

    /// The tags in insertion order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// The number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<String>::deserialize(deserializer).map(Tags::new)
    }
}

impl ToSql for Tags {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        serde_json::to_string(&self.0)
            .map(ToSqlOutput::from)
            .map_err(|error| rusqlite::Error::ToSqlConversionFailure(Box::new(error)))
    }
}

impl FromSql for Tags {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Ok(Tags::default()),
            value => serde_json::from_str::<Vec<String>>(value.as_str()?)
                .map(Tags::new)
                .map_err(|error| FromSqlError::Other(Box::new(error))),
        }
    }
}
