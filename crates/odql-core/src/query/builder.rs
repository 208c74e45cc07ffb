use crate::{error::QueryError, lambda::ParameterMap};
use derive_more::Display;

///
/// WhereFragment
///
/// One AND-ed WHERE condition with its own parameter bindings.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhereFragment {
    pub sql: String,
    pub params: ParameterMap,
}

impl WhereFragment {
    #[must_use]
    pub fn new(sql: impl Into<String>, params: ParameterMap) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

///
/// JoinKind
///
/// All include joins are left joins; the kind only decides whether the
/// joined entity's columns are projected automatically.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum JoinKind {
    #[display("LEFT JOIN")]
    LeftJoin,
    #[display("LEFT JOIN (SELECT)")]
    LeftJoinAndSelect,
}

///
/// JoinSpec
///
/// `path` is the relation path (`<parent alias>.<navigation property>`),
/// `alias` the unique name the joined entity is reachable under.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JoinSpec {
    pub kind: JoinKind,
    pub path: String,
    pub alias: String,
    pub condition: Option<String>,
    pub params: ParameterMap,
}

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
pub enum OrderDirection {
    #[default]
    #[display("ASC")]
    Asc,
    #[display("DESC")]
    Desc,
}

impl OrderDirection {
    fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }
}

///
/// OrderClause
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderClause {
    pub column: String,
    pub direction: OrderDirection,
}

impl OrderClause {
    #[must_use]
    pub fn new(column: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    /// Parse `column [ASC|DESC], ...`.
    ///
    /// Text equal to `sentinel` means "no explicit order" and yields nothing.
    pub fn parse_list(text: &str, sentinel: &str) -> Result<Vec<Self>, QueryError> {
        let text = text.trim();
        if text.is_empty() || text == sentinel {
            return Ok(Vec::new());
        }

        text.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| Self::parse_entry(entry, text))
            .collect()
    }

    fn parse_entry(entry: &str, source: &str) -> Result<Self, QueryError> {
        let mut tokens = entry.split_whitespace();
        let column = tokens.next().unwrap_or_default();

        let direction = match tokens.next() {
            None => OrderDirection::Asc,
            Some(token) => OrderDirection::parse(token).ok_or_else(|| {
                QueryError::malformed_expression(
                    source,
                    format!("unknown order direction '{token}'"),
                )
            })?,
        };

        if tokens.next().is_some() {
            return Err(QueryError::malformed_expression(
                source,
                format!("unexpected tokens in order entry '{entry}'"),
            ));
        }

        Ok(Self::new(column, direction))
    }
}

///
/// QueryBuilder
///
/// Capability boundary to the relational query builder that actually runs
/// SQL. Calls accumulate; `execute*` runs the accumulated query once.
///

#[allow(async_fn_in_trait)]
pub trait QueryBuilder {
    type Row;

    /// Alias of the root entity inside the query.
    fn alias(&self) -> &str;

    /// Entity name used for metadata lookups; defaults to the alias.
    fn entity_name(&self) -> &str {
        self.alias()
    }

    fn select(&mut self, columns: Vec<String>);

    fn and_where(&mut self, fragment: WhereFragment);

    fn join(&mut self, join: JoinSpec);

    fn add_order_by(&mut self, order: OrderClause);

    fn skip(&mut self, offset: u64);

    fn take(&mut self, limit: u64);

    async fn execute(&mut self) -> Result<Vec<Self::Row>, QueryError>;

    async fn execute_with_count(&mut self) -> Result<(Vec<Self::Row>, u64), QueryError>;
}

///
/// QuerySource
///
/// Anything that can open a fresh builder for an alias (a repository or
/// relation handle).
///

pub trait QuerySource {
    type Builder: QueryBuilder;

    fn create_query_builder(&self, alias: &str) -> Self::Builder;
}
