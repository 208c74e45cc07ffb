use crate::{
    config::DialectConfig,
    error::QueryError,
    filter::resolve_filter,
    include::{AliasRegistry, plan_includes},
    model::{EntityModel, RelationProvider},
    obs::{QueryTraceSink, TracePhase, TraceScope, start_query_trace},
    query::{
        OrderClause, ParsedQuery, QueryBuilder, QueryParser, QueryRequest, QueryResult,
        QuerySource, WhereFragment,
    },
};
use tracing::Instrument;

///
/// QueryExecutor
///
/// Sequences one request against a query builder:
/// projection → parser WHERE → lambda filter → includes → ordering →
/// paging → execution. Holds no per-request state; every call gets a fresh
/// alias registry and parameter maps.
///

pub struct QueryExecutor<'a, P: ?Sized, Q: ?Sized> {
    provider: &'a P,
    parser: &'a Q,
    config: DialectConfig,
    trace: Option<&'static dyn QueryTraceSink>,
}

impl<'a, P, Q> QueryExecutor<'a, P, Q>
where
    P: RelationProvider + ?Sized,
    Q: QueryParser + ?Sized,
{
    #[must_use]
    pub fn new(provider: &'a P, parser: &'a Q) -> Self {
        Self {
            provider,
            parser,
            config: DialectConfig::default(),
            trace: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: DialectConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_trace(mut self, sink: &'static dyn QueryTraceSink) -> Self {
        self.trace = Some(sink);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &DialectConfig {
        &self.config
    }

    /// Assemble `request` onto `builder` and run it once.
    pub async fn execute<B>(
        &self,
        builder: &mut B,
        request: &QueryRequest,
    ) -> Result<QueryResult<B::Row>, QueryError>
    where
        B: QueryBuilder,
    {
        let entity = builder.entity_name().to_string();
        let span = tracing::debug_span!(
            "execute_query",
            entity = %entity,
            alias = %builder.alias()
        );
        let trace = start_query_trace(self.trace, &entity);

        let result = self
            .assemble(builder, request, trace.as_ref())
            .instrument(span)
            .await;

        match (&result, trace) {
            (Ok(result), Some(trace)) => trace.finish(result.len()),
            (Err(err), Some(trace)) => trace.error(err),
            (_, None) => {}
        }

        result
    }

    async fn assemble<B>(
        &self,
        builder: &mut B,
        request: &QueryRequest,
        trace: Option<&TraceScope>,
    ) -> Result<QueryResult<B::Row>, QueryError>
    where
        B: QueryBuilder,
    {
        let phase = |phase: TracePhase, items: usize| {
            if let Some(trace) = trace {
                trace.phase(phase, items);
            }
        };

        let alias = builder.alias().to_string();
        let root = self
            .provider
            .entity(builder.entity_name())
            .ok_or_else(|| QueryError::unknown_entity(builder.entity_name()))?;

        let skip = request.skip_value()?;
        let top = request.top_value()?;

        let odata = request.to_odata_string();
        let parsed = if odata.is_empty() {
            None
        } else {
            Some(self.parser.parse(&odata, &alias)?)
        };

        // projection
        let columns = projection(parsed.as_ref(), root, &alias);
        phase(TracePhase::Projection, columns.len());
        builder.select(columns);

        // parser WHERE, only when it bound anything; `bound` tracks every
        // binding of the query so a shadowed name fails before execution
        let mut bound = parsed
            .as_ref()
            .map(|parsed| parsed.parameters.clone())
            .unwrap_or_default();
        let mut wheres = 0;
        if let Some(parsed) = parsed.as_ref().filter(|parsed| !parsed.parameters.is_empty()) {
            builder.and_where(WhereFragment::new(
                parsed.where_text(),
                parsed.parameters.clone(),
            ));
            wheres += 1;
        }
        phase(TracePhase::Filter, wheres);

        // lambda filter
        let filter = parsed.as_ref().and_then(|parsed| parsed.filter.as_ref());
        let lambda = resolve_filter(filter, &alias, root, &self.config)?;
        phase(TracePhase::LambdaFilter, usize::from(lambda.is_some()));
        if let Some(details) = lambda {
            bound.extend_from(&details.params)?;
            builder.and_where(WhereFragment::new(details.fragment, details.params));
        }

        // includes
        let includes = parsed
            .as_ref()
            .map_or(&[][..], |parsed| parsed.includes.as_slice());
        let mut registry = AliasRegistry::new(&alias);
        let plan = plan_includes(
            includes,
            &alias,
            root,
            self.provider,
            &mut registry,
            &self.config,
        )?;
        for join in &plan.joins {
            bound.extend_from(&join.params)?;
        }
        let joins = plan.joins.len();
        plan.apply(&mut *builder);
        phase(TracePhase::Include, joins);

        // ordering
        let orders = match parsed.as_ref() {
            Some(parsed) => {
                OrderClause::parse_list(&parsed.orderby, &self.config.no_order_sentinel)?
            }
            None => Vec::new(),
        };
        phase(TracePhase::Order, orders.len());
        for order in orders {
            builder.add_order_by(order);
        }

        // paging
        builder.skip(skip);
        if let Some(top) = top {
            builder.take(top);
        }
        phase(TracePhase::Page, usize::from(top.is_some()) + 1);

        tracing::debug!(
            params = bound.len(),
            joins,
            skip,
            top = ?top,
            count = request.wants_count(),
            "query assembled"
        );

        // execution
        let result = if request.wants_count() {
            let (items, count) = builder.execute_with_count().await?;
            QueryResult::Counted { items, count }
        } else {
            QueryResult::Rows(builder.execute().await?)
        };
        phase(TracePhase::Execute, result.len());

        Ok(result)
    }
}

/// Run `request` against `builder` with the default dialect and no trace sink.
pub async fn execute_query<B, P, Q>(
    builder: &mut B,
    provider: &P,
    parser: &Q,
    request: &QueryRequest,
) -> Result<QueryResult<B::Row>, QueryError>
where
    B: QueryBuilder,
    P: RelationProvider + ?Sized,
    Q: QueryParser + ?Sized,
{
    QueryExecutor::new(provider, parser)
        .execute(builder, request)
        .await
}

/// Open a fresh builder for `alias` on `source`, then run `request` on it.
pub async fn execute_query_on<S, P, Q>(
    source: &S,
    alias: &str,
    provider: &P,
    parser: &Q,
    request: &QueryRequest,
) -> Result<QueryResult<<S::Builder as QueryBuilder>::Row>, QueryError>
where
    S: QuerySource + ?Sized,
    P: RelationProvider + ?Sized,
    Q: QueryParser + ?Sized,
{
    let mut builder = source.create_query_builder(alias);

    execute_query(&mut builder, provider, parser, request).await
}

// `*`, an empty list or no parsed query at all select every root column.
fn projection(parsed: Option<&ParsedQuery>, root: &EntityModel, alias: &str) -> Vec<String> {
    let select = parsed.map_or("", |parsed| parsed.select.trim());
    if select.is_empty() || select == "*" {
        return root.qualified_columns(alias);
    }

    select
        .split(',')
        .map(str::trim)
        .filter(|column| !column.is_empty())
        .map(str::to_string)
        .collect()
}
