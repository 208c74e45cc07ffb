use std::fmt;
use thiserror::Error as ThisError;

///
/// QueryError
///
/// Every failure the core can report. All of them are synchronous and
/// deterministic; callers must not retry them.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error("malformed expression '{expression}': {reason}")]
    MalformedExpression { expression: String, reason: String },

    #[error("malformed predicate '{predicate}': expected `<path> eq <value>` or `contains(<path>, <value>)`")]
    MalformedPredicate { predicate: String },

    #[error("unknown relation '{property}' on entity '{entity}'")]
    UnknownRelation {
        entity: String,
        property: String,
        origin: ErrorOrigin,
    },

    #[error("unknown entity '{entity}'")]
    UnknownEntity { entity: String },

    #[error("unable to find a free join alias for '{alias}'")]
    DuplicateAliasUnresolved { alias: String },

    #[error("parameter '{name}' is already bound to a different value")]
    ParameterConflict { name: String },

    #[error("invalid paging value for {key}: '{value}'")]
    InvalidPaging { key: &'static str, value: String },

    #[error("query parse failed: {0}")]
    Parse(String),

    #[error("query execution failed: {0}")]
    Execute(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl QueryError {
    pub(crate) fn malformed_expression(
        expression: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedExpression {
            expression: expression.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_predicate(predicate: impl Into<String>) -> Self {
        Self::MalformedPredicate {
            predicate: predicate.into(),
        }
    }

    pub(crate) fn unknown_relation(
        entity: impl Into<String>,
        property: impl Into<String>,
        origin: ErrorOrigin,
    ) -> Self {
        Self::UnknownRelation {
            entity: entity.into(),
            property: property.into(),
            origin,
        }
    }

    pub(crate) fn unknown_entity(entity: impl Into<String>) -> Self {
        Self::UnknownEntity {
            entity: entity.into(),
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MalformedExpression { .. }
            | Self::MalformedPredicate { .. }
            | Self::InvalidPaging { .. }
            | Self::Config(_) => ErrorClass::Malformed,
            Self::UnknownRelation { .. } | Self::UnknownEntity { .. } => ErrorClass::NotFound,
            Self::ParameterConflict { .. } => ErrorClass::Conflict,
            Self::DuplicateAliasUnresolved { .. } => ErrorClass::InvariantViolation,
            Self::Parse(_) | Self::Execute(_) => ErrorClass::External,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::MalformedExpression { .. }
            | Self::MalformedPredicate { .. }
            | Self::ParameterConflict { .. } => ErrorOrigin::Lambda,
            Self::UnknownRelation { origin, .. } => *origin,
            Self::DuplicateAliasUnresolved { .. } => ErrorOrigin::Include,
            Self::UnknownEntity { .. }
            | Self::InvalidPaging { .. }
            | Self::Parse(_)
            | Self::Execute(_) => ErrorOrigin::Query,
            Self::Config(_) => ErrorOrigin::Config,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin(), self.class(), self)
    }
}

///
/// ErrorClass
/// Error taxonomy for classification at the query boundary.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Malformed,
    NotFound,
    Conflict,
    InvariantViolation,
    External,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Malformed => "malformed",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::InvariantViolation => "invariant_violation",
            Self::External => "external",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Which stage of query resolution produced the error.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Lambda,
    Filter,
    Include,
    Query,
    Config,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Lambda => "lambda",
            Self::Filter => "filter",
            Self::Include => "include",
            Self::Query => "query",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
