//! Shared entity models for unit tests.

use crate::model::{EntityModel, ModelRegistry, RelationDescriptor};

/// Blog-shaped registry: posts with tags, comments and a category tree.
pub(crate) fn blog_registry() -> ModelRegistry {
    ModelRegistry::new()
        .with(post_model())
        .with(EntityModel::new("Tag", "tag").with_columns(["name", "active"]))
        .with(
            EntityModel::new("Comment", "comment")
                .with_columns(["text", "postId", "authorId"])
                .with_relation(RelationDescriptor::one_to_many(
                    "author", "Comment", "User", "user", "id",
                )),
        )
        .with(EntityModel::new("User", "user").with_columns(["name", "email"]))
        .with(category_model())
}

pub(crate) fn post_model() -> EntityModel {
    EntityModel::new("Post", "post")
        .with_columns(["title", "body", "categoryId"])
        .with_relation(RelationDescriptor::one_to_many(
            "tags", "Post", "Tag", "tag", "postId",
        ))
        .with_relation(RelationDescriptor::one_to_many(
            "comments", "Post", "Comment", "comment", "postId",
        ))
        .with_relation(RelationDescriptor::one_to_many(
            "category", "Post", "Category", "category", "id",
        ))
}

pub(crate) fn category_model() -> EntityModel {
    EntityModel::new("Category", "category")
        .with_columns(["name", "parentId"])
        .with_relation(RelationDescriptor::one_to_many(
            "children", "Category", "Category", "category", "parentId",
        ))
}
