use crate::{
    error::QueryError,
    lambda::ParameterMap,
    query::{JoinSpec, OrderClause, QueryBuilder, WhereFragment},
};
use std::fmt::Write as _;

///
/// QueryPlan
///
/// Every builder call of one assembled query, in call order per clause.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QueryPlan {
    pub select: Vec<String>,
    pub wheres: Vec<WhereFragment>,
    pub joins: Vec<JoinSpec>,
    pub orders: Vec<OrderClause>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl QueryPlan {
    /// All parameters bound by WHERE fragments and join conditions.
    pub fn bound_parameters(&self) -> Result<ParameterMap, QueryError> {
        let mut params = ParameterMap::new();
        for fragment in &self.wheres {
            params.extend_from(&fragment.params)?;
        }
        for join in &self.joins {
            params.extend_from(&join.params)?;
        }

        Ok(params)
    }

    /// Human-readable, line-oriented rendering of the plan.
    #[must_use]
    pub fn explain(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "SELECT {}", self.select.join(", "));
        for join in &self.joins {
            let _ = write!(out, "{} {} AS {}", join.kind, join.path, join.alias);
            if let Some(condition) = &join.condition {
                let _ = write!(out, " ON {condition}");
            }
            out.push('\n');
        }
        if !self.wheres.is_empty() {
            let wheres: Vec<_> = self.wheres.iter().map(|w| w.sql.as_str()).collect();
            let _ = writeln!(out, "WHERE {}", wheres.join(" AND "));
        }
        if !self.orders.is_empty() {
            let orders: Vec<_> = self
                .orders
                .iter()
                .map(|o| format!("{} {}", o.column, o.direction))
                .collect();
            let _ = writeln!(out, "ORDER BY {}", orders.join(", "));
        }
        if let Some(offset) = self.offset {
            let _ = writeln!(out, "OFFSET {offset}");
        }
        if let Some(limit) = self.limit {
            let _ = writeln!(out, "LIMIT {limit}");
        }

        out
    }
}

///
/// PlanBuilder
///
/// Recording [`QueryBuilder`]. Execution pages through a fixed row set
/// instead of running SQL, so assembly can be checked without a database.
///

#[derive(Clone, Debug)]
pub struct PlanBuilder<R> {
    alias: String,
    entity: Option<String>,
    plan: QueryPlan,
    rows: Vec<R>,
    total: Option<u64>,
    failure: Option<String>,
    executions: u32,
}

impl<R> PlanBuilder<R> {
    #[must_use]
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            entity: None,
            plan: QueryPlan::default(),
            rows: Vec::new(),
            total: None,
            failure: None,
            executions: 0,
        }
    }

    /// Resolve metadata under `entity` instead of the alias.
    #[must_use]
    pub fn for_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    #[must_use]
    pub fn with_rows(mut self, rows: Vec<R>) -> Self {
        self.rows = rows;
        self
    }

    /// Override the reported total count (defaults to the row-set size).
    #[must_use]
    pub const fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    /// Make every execution fail with `message`.
    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    #[must_use]
    pub const fn plan(&self) -> &QueryPlan {
        &self.plan
    }

    #[must_use]
    pub fn into_plan(self) -> QueryPlan {
        self.plan
    }

    #[must_use]
    pub const fn executions(&self) -> u32 {
        self.executions
    }
}

impl<R: Clone> PlanBuilder<R> {
    fn run(&mut self) -> Result<Vec<R>, QueryError> {
        self.executions += 1;
        if let Some(message) = &self.failure {
            return Err(QueryError::Execute(message.clone()));
        }

        let offset = usize::try_from(self.plan.offset.unwrap_or(0)).unwrap_or(usize::MAX);
        let limit = self
            .plan
            .limit
            .map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX));

        Ok(self.rows.iter().skip(offset).take(limit).cloned().collect())
    }
}

impl<R: Clone> QueryBuilder for PlanBuilder<R> {
    type Row = R;

    fn alias(&self) -> &str {
        &self.alias
    }

    fn entity_name(&self) -> &str {
        self.entity.as_deref().unwrap_or(&self.alias)
    }

    fn select(&mut self, columns: Vec<String>) {
        self.plan.select = columns;
    }

    fn and_where(&mut self, fragment: WhereFragment) {
        self.plan.wheres.push(fragment);
    }

    fn join(&mut self, join: JoinSpec) {
        self.plan.joins.push(join);
    }

    fn add_order_by(&mut self, order: OrderClause) {
        self.plan.orders.push(order);
    }

    fn skip(&mut self, offset: u64) {
        self.plan.offset = Some(offset);
    }

    fn take(&mut self, limit: u64) {
        self.plan.limit = Some(limit);
    }

    async fn execute(&mut self) -> Result<Vec<R>, QueryError> {
        self.run()
    }

    async fn execute_with_count(&mut self) -> Result<(Vec<R>, u64), QueryError> {
        let rows = self.run()?;
        let total = self
            .total
            .unwrap_or_else(|| u64::try_from(self.rows.len()).unwrap_or(u64::MAX));

        Ok((rows, total))
    }
}

///
/// TESTS
///
