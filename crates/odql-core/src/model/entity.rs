use crate::{
    error::{ErrorOrigin, QueryError},
    model::RelationDescriptor,
};

///
/// EntityModel
///
/// Table-level metadata for one entity: its name, backing table, primary key
/// column, non-virtual columns (the default projection) and declared relations.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntityModel {
    pub name: String,
    pub table: String,
    pub key_column: String,
    pub columns: Vec<String>,
    pub relations: Vec<RelationDescriptor>,
}

impl EntityModel {
    #[must_use]
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            key_column: "id".to_string(),
            columns: vec!["id".to_string()],
            relations: Vec::new(),
        }
    }

    /// Replace the key column; the previous key leaves the column list.
    #[must_use]
    pub fn with_key(mut self, column: impl Into<String>) -> Self {
        let column = column.into();
        self.columns.retain(|c| *c != self.key_column && *c != column);
        self.columns.insert(0, column.clone());
        self.key_column = column;
        self
    }

    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for column in columns {
            let column = column.into();
            if !self.columns.contains(&column) {
                self.columns.push(column);
            }
        }
        self
    }

    #[must_use]
    pub fn with_relation(mut self, relation: RelationDescriptor) -> Self {
        self.relations.push(relation);
        self
    }

    /// Find a declared relation by navigation property name.
    #[must_use]
    pub fn relation(&self, property: &str) -> Option<&RelationDescriptor> {
        self.relations.iter().find(|r| r.property == property)
    }

    /// Like [`Self::relation`], but a miss is an `UnknownRelation` error
    /// attributed to `origin`.
    pub fn require_relation(
        &self,
        property: &str,
        origin: ErrorOrigin,
    ) -> Result<&RelationDescriptor, QueryError> {
        self.relation(property)
            .ok_or_else(|| QueryError::unknown_relation(&self.name, property, origin))
    }

    /// Every non-virtual column qualified by `alias`.
    #[must_use]
    pub fn qualified_columns(&self, alias: &str) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| format!("{alias}.{column}"))
            .collect()
    }
}
