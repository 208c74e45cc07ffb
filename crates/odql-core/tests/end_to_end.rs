use odql_core::{
    config::DialectConfig,
    error::QueryError,
    filter::FilterNode,
    include::IncludeRequest,
    lambda::{Connective, compile},
    model::{EntityModel, ModelRegistry, RelationDescriptor},
    query::{JoinKind, ParsedQuery, PlanBuilder, QueryExecutor, QueryRequest, QueryResult},
};
use std::collections::BTreeSet;

fn registry() -> ModelRegistry {
    ModelRegistry::new()
        .with(
            EntityModel::new("RecordEntity", "record_entity")
                .with_columns(["name", "parentId"])
                .with_relation(RelationDescriptor::one_to_many(
                    "children",
                    "RecordEntity",
                    "RecordEntity",
                    "record_entity",
                    "parentId",
                )),
        )
}

fn children(depth: usize) -> IncludeRequest {
    let node = IncludeRequest::new("children").select_all();
    if depth <= 1 {
        node
    } else {
        node.with_include(children(depth - 1))
    }
}

#[tokio::test]
async fn self_referencing_tree_with_lambda_filter_and_count() {
    let config = DialectConfig::from_toml_str(
        r#"
        quote = "backtick"
        param_prefix = "lf_"
        "#,
    )
    .expect("dialect config should parse");

    let filter = FilterNode::binary(
        Connective::And,
        FilterNode::leaf("name eq 'root'"),
        FilterNode::leaf("children/any(c: c/id eq '52' or contains(c/name,'leaf'))"),
    );
    let parser = move |query: &str, alias: &str| -> Result<ParsedQuery, QueryError> {
        assert_eq!(alias, "RecordEntity");
        assert!(query.starts_with("$filter="));

        let mut parameters = odql_core::lambda::ParameterMap::new();
        parameters.insert("p0", "root")?;

        Ok(ParsedQuery {
            select: "*".into(),
            where_clause: "RecordEntity.name = :p0 AND".into(),
            parameters,
            orderby: "RecordEntity.name desc".into(),
            includes: vec![children(3)],
            filter: Some(filter.clone()),
        })
    };

    let mut builder = PlanBuilder::new("RecordEntity").with_rows(vec!["a", "b", "c"]);
    let request: QueryRequest = serde_json::from_str(
        r#"{
            "$filter": "children/any(c: c/id eq '52' or contains(c/name,'leaf'))",
            "$expand": "children($expand=children($expand=children))",
            "$orderby": "name desc",
            "$top": 2,
            "$count": "true"
        }"#,
    )
    .expect("request should deserialize");

    let result = QueryExecutor::new(&registry(), &parser)
        .with_config(config)
        .execute(&mut builder, &request)
        .await
        .expect("request should execute");

    assert_eq!(
        result,
        QueryResult::Counted {
            items: vec!["a", "b"],
            count: 3,
        }
    );

    let plan = builder.plan();
    assert_eq!(
        plan.select,
        vec!["RecordEntity.id", "RecordEntity.name", "RecordEntity.parentId"]
    );

    assert_eq!(plan.wheres.len(), 2);
    assert_eq!(plan.wheres[0].sql, "RecordEntity.name = :p0");
    assert_eq!(
        plan.wheres[1].sql,
        "`RecordEntity`.`id` IN (SELECT DISTINCT `parent`.`id` FROM `record_entity` AS `parent` \
         JOIN `record_entity` AS `child` ON `parent`.`id` = `child`.`parentId` \
         WHERE `child`.`id` = :lf_0 or `child`.`name` LIKE :lf_1)"
    );
    assert_eq!(plan.wheres[1].params.get("lf_0"), Some("52"));
    assert_eq!(plan.wheres[1].params.get("lf_1"), Some("%leaf%"));

    let aliases: BTreeSet<_> = plan.joins.iter().map(|j| j.alias.as_str()).collect();
    assert_eq!(plan.joins.len(), 3);
    assert_eq!(aliases.len(), 3);
    assert!(plan.joins.iter().all(|j| j.kind == JoinKind::LeftJoinAndSelect));
    assert_eq!(plan.joins[0].path, "RecordEntity.children");
    assert_eq!(plan.joins[1].path, format!("{}.children", plan.joins[0].alias));
    assert_eq!(plan.joins[2].path, format!("{}.children", plan.joins[1].alias));

    assert_eq!(plan.offset, Some(0));
    assert_eq!(plan.limit, Some(2));
    assert_eq!(plan.bound_parameters().expect("no conflicts").len(), 3);

    let explain = plan.explain();
    assert!(explain.contains("ORDER BY RecordEntity.name DESC"), "{explain}");
}

#[test]
fn compiled_body_matches_documented_shape() {
    let (tree, params) =
        compile("(a/name eq 'x' and a/age eq '5') or a/city eq 'y'").expect("should compile");

    assert_eq!(tree.len(), 3);
    assert_eq!(tree.predicate_count(), 3);
    assert_eq!(params.get("param_0"), Some("x"));
    assert_eq!(params.get("param_2"), Some("y"));
}

#[test]
fn malformed_body_surfaces_before_any_sql() {
    let err = compile("(a/name eq 'x'").expect_err("unbalanced group should fail");

    assert!(matches!(err, QueryError::MalformedExpression { .. }), "{err:?}");
    assert!(err.display_with_class().starts_with("lambda:malformed:"));
}
