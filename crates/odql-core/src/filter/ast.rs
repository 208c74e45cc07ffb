use crate::{LAMBDA_MARKER, lambda::Connective};

///
/// FilterNode
///
/// Binary-shaped filter AST handed over by the OData parser. Leaves keep
/// their raw source text; only that text is inspected here.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FilterNode {
    Leaf {
        raw: String,
    },
    Binary {
        op: Connective,
        left: Box<Self>,
        right: Box<Self>,
    },
    Group {
        value: Box<Self>,
    },
}

impl FilterNode {
    #[must_use]
    pub fn leaf(raw: impl Into<String>) -> Self {
        Self::Leaf { raw: raw.into() }
    }

    #[must_use]
    pub fn binary(op: Connective, left: Self, right: Self) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn group(value: Self) -> Self {
        Self::Group {
            value: Box::new(value),
        }
    }

    /// Raw text of the first leaf (left before right) that holds a lambda marker.
    #[must_use]
    pub fn first_lambda(&self) -> Option<&str> {
        match self {
            Self::Leaf { raw } => raw.contains(LAMBDA_MARKER).then_some(raw.as_str()),
            Self::Binary { left, right, .. } => {
                left.first_lambda().or_else(|| right.first_lambda())
            }
            Self::Group { value } => value.first_lambda(),
        }
    }
}
