//! Entity and relation metadata consumed by the resolvers.
//!
//! Metadata is a fixed-shape descriptor reached through one narrow capability
//! ([`RelationProvider`]); the core never inspects an ORM's own metadata.

mod entity;
mod registry;
mod relation;


pub use entity::EntityModel;
pub use registry::ModelRegistry;
pub use relation::{RelationDescriptor, RelationProvider};
