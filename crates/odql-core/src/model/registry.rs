use crate::model::{EntityModel, RelationProvider};
use std::collections::BTreeMap;

///
/// ModelRegistry
///
/// In-memory [`RelationProvider`] keyed by entity name.
///

#[derive(Clone, Debug, Default)]
pub struct ModelRegistry {
    entities: BTreeMap<String, EntityModel>,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity, replacing any previous model with the same name.
    pub fn register(&mut self, model: EntityModel) -> &mut Self {
        self.entities.insert(model.name.clone(), model);
        self
    }

    #[must_use]
    pub fn with(mut self, model: EntityModel) -> Self {
        self.register(model);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl RelationProvider for ModelRegistry {
    fn entity(&self, name: &str) -> Option<&EntityModel> {
        self.entities.get(name)
    }
}
