use crate::lambda::{ConditionNode, compile, render};
use proptest::prelude::*;

///
/// Generated lambda bodies
///
/// Expressions are built from a small grammar so every generated string is
/// well-formed; the properties then check what compilation guarantees.
///

fn arb_column() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,6}".prop_map(String::from)
}

fn arb_literal() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9]{0,8}".prop_map(|s| format!("'{s}'")),
        (0u32..1000).prop_map(|n| n.to_string()),
        Just("'and or'".to_string()),
        Just("'(x)'".to_string()),
    ]
}

fn arb_leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        (arb_column(), arb_literal()).prop_map(|(c, v)| format!("x/{c} eq {v}")),
        (arb_column(), "[a-z]{0,5}").prop_map(|(c, v)| format!("contains(x/{c},'{v}')")),
        (arb_column(), "[a-z]{0,5}")
            .prop_map(|(c, v)| format!("x/{c} contains(x/{c},'{v}')")),
    ]
}

fn arb_expression() -> impl Strategy<Value = String> {
    arb_leaf().prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            (inner.clone(), prop_oneof![Just(" and "), Just(" or ")], inner.clone())
                .prop_map(|(l, op, r)| format!("{l}{op}{r}")),
            (inner.clone(), prop_oneof![Just(" and "), Just(" or ")], inner)
                .prop_map(|(l, op, r)| format!("({l}){op}{r}")),
        ]
    })
}

fn count_leaves(text: &str) -> usize {
    // every leaf carries exactly one `eq` or one `contains(` call
    text.matches(" eq ").count() + text.matches("contains(").count()
}

proptest! {
    #[test]
    fn compile_is_deterministic(text in arb_expression()) {
        let first = compile(&text);
        let second = compile(&text);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn compiled_tree_satisfies_alternation(text in arb_expression()) {
        let (tree, _) = compile(&text).expect("generated expression should compile");

        prop_assert!(tree.validate().is_ok());
    }

    #[test]
    fn every_predicate_has_a_unique_binding(text in arb_expression()) {
        let (tree, params) = compile(&text).expect("generated expression should compile");

        prop_assert_eq!(tree.predicate_count(), params.len());
        prop_assert_eq!(params.len(), count_leaves(&text));
    }

    #[test]
    fn rendered_parentheses_balance(text in arb_expression()) {
        let (tree, _) = compile(&text).expect("generated expression should compile");
        let sql = render(&tree, "child");

        let opens = sql.matches('(').count();
        let closes = sql.matches(')').count();
        let groups = count_groups(&tree);

        prop_assert_eq!(opens, closes);
        prop_assert_eq!(opens, groups);
    }
}

fn count_groups(nodes: &[ConditionNode]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            ConditionNode::Group { children } => 1 + count_groups(children),
            _ => 0,
        })
        .sum()
}
