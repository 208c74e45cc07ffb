use crate::model::EntityModel;

///
/// RelationDescriptor
///
/// Lightweight relation descriptor for one navigation property.
/// `target_*` describe the related entity; `inverse_*` describe the side
/// that points back at the declaring entity.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RelationDescriptor {
    pub property: String,
    pub target_entity_name: String,
    pub target_table: String,
    pub target_entity_key_column: String,
    pub inverse_foreign_key_column: String,
    pub inverse_entity_name: String,
}

impl RelationDescriptor {
    /// Build a one-to-many descriptor where the target rows carry the foreign key.
    #[must_use]
    pub fn one_to_many(
        property: impl Into<String>,
        declaring_entity: impl Into<String>,
        target_entity: impl Into<String>,
        target_table: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Self {
        Self {
            property: property.into(),
            target_entity_name: target_entity.into(),
            target_table: target_table.into(),
            target_entity_key_column: "id".to_string(),
            inverse_foreign_key_column: foreign_key.into(),
            inverse_entity_name: declaring_entity.into(),
        }
    }

    /// Override the key column of the target entity.
    #[must_use]
    pub fn with_target_key(mut self, column: impl Into<String>) -> Self {
        self.target_entity_key_column = column.into();
        self
    }
}

///
/// RelationProvider
///
/// Resolves entity names to their metadata. Relation lookups then go through
/// [`EntityModel::relation`] / [`RelationProvider::get_relation`].
///

pub trait RelationProvider {
    fn entity(&self, name: &str) -> Option<&EntityModel>;

    /// Look up a navigation property on a named entity.
    fn get_relation(&self, entity: &str, property: &str) -> Option<&RelationDescriptor> {
        self.entity(entity)?.relation(property)
    }
}
