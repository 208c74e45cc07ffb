use crate::error::QueryError;
use serde::{Serialize, Serializer, ser::SerializeMap};

///
/// ParameterMap
///
/// Parameter name → literal value, kept in binding order. Names are unique
/// within one map; literals for `contains` predicates are already wildcarded.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParameterMap {
    entries: Vec<(String, String)>,
}

impl ParameterMap {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Bind a value. Re-binding a name to the same value is a no-op;
    /// re-binding it to a different value is a conflict.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), QueryError> {
        let name = name.into();
        let value = value.into();

        match self.get(&name) {
            Some(existing) if existing == value => Ok(()),
            Some(_) => Err(QueryError::ParameterConflict { name }),
            None => {
                self.entries.push((name, value));
                Ok(())
            }
        }
    }

    /// Merge every binding of `other` into `self`.
    pub fn extend_from(&mut self, other: &Self) -> Result<(), QueryError> {
        for (name, value) in other.iter() {
            self.insert(name, value)?;
        }

        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for ParameterMap {
    /// Later duplicates of a name are dropped.
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            let name = name.into();
            if !map.contains(&name) {
                map.entries.push((name, value.into()));
            }
        }
        map
    }
}

// Serialize as a map in binding order.
impl Serialize for ParameterMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
