use crate::{
    config::{DialectConfig, IdentQuote},
    lambda::{ConditionNode, ConditionTree, Connective, PredicateOp, compile, render, render_with},
};

#[test]
fn equality_renders_with_named_parameter() {
    let (tree, _) = compile("t/name eq 'red'").expect("should compile");

    assert_eq!(render(&tree, "child"), "child.name = :param_0");
}

#[test]
fn contains_renders_as_like() {
    let (tree, _) = compile("contains(t/name,'re')").expect("should compile");

    assert_eq!(render(&tree, "child"), "child.name LIKE :param_0");
}

#[test]
fn grouping_is_reproduced_exactly() {
    let (tree, _) = compile("(a/name eq 'x' and a/age eq '5') or a/city eq 'y'")
        .expect("should compile");

    assert_eq!(
        render(&tree, "child"),
        "(child.name = :param_0 and child.age = :param_1) or child.city = :param_2"
    );
}

#[test]
fn render_does_not_reorder_by_precedence() {
    let tree = ConditionTree::new(vec![
        ConditionNode::predicate("a", PredicateOp::Eq, "p0"),
        ConditionNode::operator(Connective::Or),
        ConditionNode::predicate("b", PredicateOp::Eq, "p1"),
        ConditionNode::operator(Connective::And),
        ConditionNode::predicate("c", PredicateOp::Contains, "p2"),
    ]);

    assert_eq!(
        render(&tree, "x"),
        "x.a = :p0 or x.b = :p1 and x.c LIKE :p2"
    );
}

#[test]
fn nested_groups_render_nested_parentheses() {
    let (tree, _) = compile("((a/x eq '1' or a/y eq '2') and a/z eq '3') or a/w eq '4'")
        .expect("should compile");

    assert_eq!(
        render(&tree, "c"),
        "((c.x = :param_0 or c.y = :param_1) and c.z = :param_2) or c.w = :param_3"
    );
}

#[test]
fn identifier_quoting_follows_dialect() {
    let config = DialectConfig {
        quote: IdentQuote::Backtick,
        ..DialectConfig::default()
    };
    let (tree, _) = compile("t/name eq 'red'").expect("should compile");

    assert_eq!(
        render_with(&tree, "child", &config),
        "`child`.`name` = :param_0"
    );
}
