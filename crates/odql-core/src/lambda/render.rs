use crate::{
    config::{DialectConfig, IdentQuote},
    lambda::{ConditionNode, ConditionTree},
};

/// Render a condition tree with the default dialect.
#[must_use]
pub fn render(tree: &ConditionTree, alias: &str) -> String {
    render_with(tree, alias, &DialectConfig::default())
}

/// Render a condition tree as a SQL boolean expression scoped to `alias`.
///
/// Output order is exactly tree order; groups become parentheses.
#[must_use]
pub fn render_with(tree: &ConditionTree, alias: &str, config: &DialectConfig) -> String {
    render_sequence(tree, alias, config.quote)
}

fn render_sequence(nodes: &[ConditionNode], alias: &str, quote: IdentQuote) -> String {
    nodes
        .iter()
        .map(|node| render_node(node, alias, quote))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_node(node: &ConditionNode, alias: &str, quote: IdentQuote) -> String {
    match node {
        ConditionNode::Predicate {
            column,
            operator,
            param_name,
        } => format!(
            "{} {} :{param_name}",
            quote.qualify(alias, column),
            operator.sql()
        ),
        ConditionNode::Operator { kind } => kind.keyword().to_string(),
        ConditionNode::Group { children } => {
            format!("({})", render_sequence(children, alias, quote))
        }
    }
}
