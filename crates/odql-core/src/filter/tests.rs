use crate::{
    config::{DialectConfig, IdentQuote},
    error::{ErrorOrigin, QueryError},
    filter::{FilterNode, find_lambda, resolve_filter, resolve_lambda},
    lambda::Connective,
    model::{EntityModel, RelationDescriptor},
    test_fixtures::post_model,
};

fn tagged_entity() -> EntityModel {
    EntityModel::new("Post", "tags_table").with_relation(RelationDescriptor::one_to_many(
        "tags",
        "Post",
        "Tag",
        "tag_table",
        "parent_id",
    ))
}

#[test]
fn lambda_filter_lowers_to_correlated_subquery() {
    let details = resolve_lambda(
        "tags/any(t: t/name eq 'red' and t/active eq 'true')",
        "Post",
        &tagged_entity(),
        &DialectConfig::default(),
    )
    .expect("lambda filter should resolve");

    assert_eq!(
        details.fragment,
        "Post.id IN (SELECT DISTINCT parent.id FROM tags_table AS parent \
         JOIN tag_table AS child ON parent.id = child.parent_id \
         WHERE child.name = :param_0 and child.active = :param_1)"
    );
    assert_eq!(details.params.get("param_0"), Some("red"));
    assert_eq!(details.params.get("param_1"), Some("true"));
    assert_eq!(details.params.len(), 2);
}

#[test]
fn details_carry_join_context() {
    let details = resolve_lambda(
        "tags/any(t: contains(t/name,'re'))",
        "post",
        &post_model(),
        &DialectConfig::default(),
    )
    .expect("lambda filter should resolve");

    assert_eq!(details.navigation_property, "tags");
    assert_eq!(details.target, "post");
    assert_eq!(details.parent_table, "post");
    assert_eq!(details.child_table, "tag");
    assert_eq!(details.foreign_key, "postId");
    assert_eq!(details.condition, "child.name LIKE :param_0");
    assert_eq!(details.params.get("param_0"), Some("%re%"));
}

#[test]
fn grouped_lambda_body_keeps_parentheses() {
    let details = resolve_lambda(
        "tags/any(t: (t/name eq 'a' or t/name eq 'b') and t/active eq 'true')",
        "post",
        &post_model(),
        &DialectConfig::default(),
    )
    .expect("lambda filter should resolve");

    assert_eq!(
        details.condition,
        "(child.name = :param_0 or child.name = :param_1) and child.active = :param_2"
    );
}

#[test]
fn quoting_applies_to_every_identifier() {
    let config = DialectConfig {
        quote: IdentQuote::Backtick,
        ..DialectConfig::default()
    };

    let details = resolve_lambda("tags/any(t: t/name eq 'red')", "Post", &tagged_entity(), &config)
        .expect("lambda filter should resolve");

    assert_eq!(
        details.fragment,
        "`Post`.`id` IN (SELECT DISTINCT `parent`.`id` FROM `tags_table` AS `parent` \
         JOIN `tag_table` AS `child` ON `parent`.`id` = `child`.`parent_id` \
         WHERE `child`.`name` = :param_0)"
    );
}

#[test]
fn unknown_navigation_property_is_unknown_relation() {
    let err = resolve_lambda(
        "likes/any(l: l/user eq 'bob')",
        "post",
        &post_model(),
        &DialectConfig::default(),
    )
    .expect_err("undeclared relation should fail");

    assert_eq!(
        err,
        QueryError::UnknownRelation {
            entity: "Post".into(),
            property: "likes".into(),
            origin: ErrorOrigin::Filter,
        }
    );
}

#[test]
fn unterminated_lambda_is_malformed_expression() {
    let err = resolve_lambda(
        "tags/any(t: t/name eq 'red'",
        "post",
        &post_model(),
        &DialectConfig::default(),
    )
    .expect_err("unterminated lambda should fail");

    assert!(matches!(err, QueryError::MalformedExpression { .. }), "{err:?}");
}

#[test]
fn lambda_without_variable_is_malformed_expression() {
    let err = resolve_lambda(
        "tags/any(t/name eq 'red')",
        "post",
        &post_model(),
        &DialectConfig::default(),
    )
    .expect_err("missing bound variable should fail");

    assert!(matches!(err, QueryError::MalformedExpression { .. }), "{err:?}");
}

#[test]
fn malformed_body_aborts_resolution() {
    let err = resolve_lambda(
        "tags/any(t: t/rank gt 3)",
        "post",
        &post_model(),
        &DialectConfig::default(),
    )
    .expect_err("unsupported operator should fail");

    assert!(matches!(err, QueryError::MalformedPredicate { .. }), "{err:?}");
}

#[test]
fn detection_walks_left_before_right() {
    let ast = FilterNode::binary(
        Connective::And,
        FilterNode::leaf("title eq 'x'"),
        FilterNode::binary(
            Connective::Or,
            FilterNode::group(FilterNode::leaf("tags/any(t: t/name eq 'a')")),
            FilterNode::leaf("comments/any(c: c/text eq 'b')"),
        ),
    );

    assert_eq!(find_lambda(Some(&ast)), Some("tags/any(t: t/name eq 'a')"));
}

#[test]
fn filter_without_lambda_resolves_to_nothing() {
    let ast = FilterNode::binary(
        Connective::And,
        FilterNode::leaf("title eq 'x'"),
        FilterNode::leaf("body eq 'y'"),
    );

    let resolved = resolve_filter(Some(&ast), "post", &post_model(), &DialectConfig::default())
        .expect("plain filter should not fail");

    assert!(resolved.is_none());
    assert!(
        resolve_filter(None, "post", &post_model(), &DialectConfig::default())
            .expect("absent filter should not fail")
            .is_none()
    );
}

#[test]
fn leaf_wrapped_in_parenthesis_still_names_the_property() {
    let ast = FilterNode::leaf("(tags/any(t: t/name eq 'a'))");

    let details = resolve_filter(Some(&ast), "post", &post_model(), &DialectConfig::default())
        .expect("lambda should resolve")
        .expect("lambda should be found");

    assert_eq!(details.navigation_property, "tags");
}
