use derive_more::{Deref, Display, IntoIterator};

///
/// Condition AST
///
/// A flat, ordered sequence of operands and connectives. Nesting is explicit
/// through `Group`; there is no precedence to recover at render time.
///

///
/// PredicateOp
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum PredicateOp {
    #[display("eq")]
    Eq,
    #[display("contains")]
    Contains,
}

impl PredicateOp {
    /// SQL operator this predicate renders with.
    #[must_use]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Contains => "LIKE",
        }
    }
}

///
/// Connective
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Connective {
    #[display("and")]
    And,
    #[display("or")]
    Or,
}

impl Connective {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

///
/// ConditionNode
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConditionNode {
    Predicate {
        column: String,
        operator: PredicateOp,
        param_name: String,
    },
    Operator {
        kind: Connective,
    },
    Group {
        children: Vec<Self>,
    },
}

impl ConditionNode {
    #[must_use]
    pub fn predicate(
        column: impl Into<String>,
        operator: PredicateOp,
        param_name: impl Into<String>,
    ) -> Self {
        Self::Predicate {
            column: column.into(),
            operator,
            param_name: param_name.into(),
        }
    }

    #[must_use]
    pub const fn operator(kind: Connective) -> Self {
        Self::Operator { kind }
    }

    #[must_use]
    pub const fn group(children: Vec<Self>) -> Self {
        Self::Group { children }
    }

    /// Operands are predicates and groups; connectives sit between them.
    #[must_use]
    pub const fn is_operand(&self) -> bool {
        !matches!(self, Self::Operator { .. })
    }

    /// Number of predicates in this node and all nested groups.
    #[must_use]
    pub fn predicate_count(&self) -> usize {
        match self {
            Self::Predicate { .. } => 1,
            Self::Operator { .. } => 0,
            Self::Group { children } => children.iter().map(Self::predicate_count).sum(),
        }
    }
}

///
/// ConditionTree
///
/// Top-level node sequence of one compiled lambda body.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct ConditionTree(#[into_iterator(owned, ref)] Vec<ConditionNode>);

impl ConditionTree {
    #[must_use]
    pub const fn new(nodes: Vec<ConditionNode>) -> Self {
        Self(nodes)
    }

    #[must_use]
    pub fn into_nodes(self) -> Vec<ConditionNode> {
        self.0
    }

    #[must_use]
    pub fn predicate_count(&self) -> usize {
        self.0.iter().map(ConditionNode::predicate_count).sum()
    }

    /// Check the alternation invariant at every nesting level.
    ///
    /// On failure, returns a short description of the first violation.
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_sequence(&self.0)
    }
}

// operand (connective operand)*: never empty, never two adjacent kinds.
fn validate_sequence(nodes: &[ConditionNode]) -> Result<(), &'static str> {
    if nodes.is_empty() {
        return Err("empty condition");
    }

    for (i, node) in nodes.iter().enumerate() {
        let expect_operand = i % 2 == 0;
        match (expect_operand, node.is_operand()) {
            (true, false) => return Err("connective without a left operand"),
            (false, true) => return Err("two operands without a connective"),
            _ => {}
        }
        if let ConditionNode::Group { children } = node {
            validate_sequence(children)?;
        }
    }

    if nodes.len() % 2 == 0 {
        return Err("connective without a right operand");
    }

    Ok(())
}
