use crate::{
    LAMBDA_MARKER,
    config::DialectConfig,
    error::{ErrorOrigin, QueryError},
    filter::FilterNode,
    lambda::{ConditionTree, ParameterMap, compile_with, render_with, scan::matching_paren},
    model::EntityModel,
};

///
/// LambdaFilterDetails
///
/// Resolved join and compile context for one `/any(...)` occurrence.
/// Built per query and handed straight to query assembly.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LambdaFilterDetails {
    pub navigation_property: String,
    pub target: String,
    pub key_column: String,
    pub parent_table: String,
    pub child_table: String,
    pub foreign_key: String,
    pub tree: ConditionTree,
    pub condition: String,
    pub params: ParameterMap,
    pub fragment: String,
}

/// Raw text of the first lambda-filter leaf, if the filter has one.
#[must_use]
pub fn find_lambda(filter: Option<&FilterNode>) -> Option<&str> {
    filter?.first_lambda()
}

/// Resolve the lambda filter of `filter`, if any.
///
/// Absence of a filter or of a lambda leaf is not an error.
pub fn resolve_filter(
    filter: Option<&FilterNode>,
    root_alias: &str,
    root: &EntityModel,
    config: &DialectConfig,
) -> Result<Option<LambdaFilterDetails>, QueryError> {
    find_lambda(filter)
        .map(|raw| resolve_lambda(raw, root_alias, root, config))
        .transpose()
}

/// Lower one `nav/any(x: ...)` leaf into a correlated `IN (SELECT ...)` fragment.
pub fn resolve_lambda(
    raw: &str,
    root_alias: &str,
    root: &EntityModel,
    config: &DialectConfig,
) -> Result<LambdaFilterDetails, QueryError> {
    let (property, body) = split_lambda(raw)?;
    let relation = root.require_relation(property, ErrorOrigin::Filter)?;

    let (tree, params) = compile_with(body, config)?;

    let quote = config.quote;
    let parent = config.parent_alias.as_str();
    let child = config.child_alias.as_str();
    let key = root.key_column.as_str();

    let condition = render_with(&tree, child, config);
    let fragment = format!(
        "{target} IN (SELECT DISTINCT {parent_key} FROM {parent_table} AS {parent_alias} \
         JOIN {child_table} AS {child_alias} ON {parent_key} = {child_fk} WHERE {condition})",
        target = quote.qualify(root_alias, key),
        parent_key = quote.qualify(parent, key),
        parent_table = quote.quote(&root.table),
        parent_alias = quote.quote(parent),
        child_table = quote.quote(&relation.target_table),
        child_alias = quote.quote(child),
        child_fk = quote.qualify(child, &relation.inverse_foreign_key_column),
    );

    tracing::debug!(
        property,
        child_table = %relation.target_table,
        params = params.len(),
        "resolved lambda filter"
    );

    Ok(LambdaFilterDetails {
        navigation_property: property.to_string(),
        target: root_alias.to_string(),
        key_column: key.to_string(),
        parent_table: root.table.clone(),
        child_table: relation.target_table.clone(),
        foreign_key: relation.inverse_foreign_key_column.clone(),
        tree,
        condition,
        params,
        fragment,
    })
}

// Split `nav/any(x: body)` into the navigation property and the lambda body
// with its bound-variable prefix removed.
fn split_lambda(raw: &str) -> Result<(&str, &str), QueryError> {
    let marker = raw
        .find(LAMBDA_MARKER)
        .ok_or_else(|| QueryError::malformed_expression(raw, "missing /any( marker"))?;

    let property = raw[..marker].trim().trim_start_matches('(').trim();
    if property.is_empty() {
        return Err(QueryError::malformed_expression(
            raw,
            "missing navigation property before /any(",
        ));
    }

    let open = marker + LAMBDA_MARKER.len() - 1;
    let close = matching_paren(raw, open)
        .ok_or_else(|| QueryError::malformed_expression(raw, "unterminated lambda body"))?;

    let lambda = &raw[open + 1..close];
    let colon = lambda
        .find(':')
        .ok_or_else(|| QueryError::malformed_expression(raw, "missing lambda variable"))?;

    Ok((property, lambda[colon + 1..].trim()))
}
