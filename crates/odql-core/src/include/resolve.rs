use crate::{
    config::DialectConfig,
    error::{ErrorOrigin, QueryError},
    include::{AliasRegistry, IncludeRequest, Selection},
    model::{EntityModel, RelationProvider},
    query::{JoinKind, JoinSpec, OrderClause, QueryBuilder},
};

///
/// IncludePlan
///
/// Joins and per-include ordering in emission order.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IncludePlan {
    pub joins: Vec<JoinSpec>,
    pub orders: Vec<OrderClause>,
}

impl IncludePlan {
    /// Hand every join, then every order clause, to the builder.
    pub fn apply<B: QueryBuilder + ?Sized>(self, builder: &mut B) {
        for join in self.joins {
            builder.join(join);
        }
        for order in self.orders {
            builder.add_order_by(order);
        }
    }
}

/// Resolve `includes` and apply the resulting joins to `builder`.
///
/// Returns the number of joins emitted.
pub fn resolve_includes<B, P>(
    builder: &mut B,
    includes: &[IncludeRequest],
    parent_alias: &str,
    parent: &EntityModel,
    provider: &P,
    registry: &mut AliasRegistry,
    config: &DialectConfig,
) -> Result<usize, QueryError>
where
    B: QueryBuilder + ?Sized,
    P: RelationProvider + ?Sized,
{
    let plan = plan_includes(includes, parent_alias, parent, provider, registry, config)?;
    let joins = plan.joins.len();
    plan.apply(builder);

    Ok(joins)
}

/// Resolve an include tree into joins without touching a builder.
pub fn plan_includes<P>(
    includes: &[IncludeRequest],
    parent_alias: &str,
    parent: &EntityModel,
    provider: &P,
    registry: &mut AliasRegistry,
    config: &DialectConfig,
) -> Result<IncludePlan, QueryError>
where
    P: RelationProvider + ?Sized,
{
    let mut plan = IncludePlan::default();
    let mut walker = IncludeWalker {
        provider,
        registry,
        config,
        plan: &mut plan,
    };
    walker.walk(includes, parent_alias, parent)?;

    Ok(plan)
}

///
/// IncludeWalker
///

struct IncludeWalker<'a, P: ?Sized> {
    provider: &'a P,
    registry: &'a mut AliasRegistry,
    config: &'a DialectConfig,
    plan: &'a mut IncludePlan,
}

impl<P: RelationProvider + ?Sized> IncludeWalker<'_, P> {
    fn walk(
        &mut self,
        includes: &[IncludeRequest],
        parent_alias: &str,
        parent: &EntityModel,
    ) -> Result<(), QueryError> {
        for include in includes {
            self.visit(include, parent_alias, parent)?;
        }

        Ok(())
    }

    fn visit(
        &mut self,
        include: &IncludeRequest,
        parent_alias: &str,
        parent: &EntityModel,
    ) -> Result<(), QueryError> {
        let property = include.navigation_property.as_str();
        let relation = parent.require_relation(property, ErrorOrigin::Include)?;

        let kind = match include.select {
            Some(Selection::All) => JoinKind::LeftJoinAndSelect,
            _ => JoinKind::LeftJoin,
        };

        let alias = self
            .registry
            .claim(property, parent_alias, self.config.max_alias_attempts)?;

        let condition = include
            .where_clause
            .as_deref()
            .map(|clause| self.scoped(clause, &alias))
            .filter(|clause| !clause.trim().is_empty());

        tracing::debug!(
            path = %format!("{parent_alias}.{property}"),
            alias = %alias,
            kind = %kind,
            "resolved include join"
        );

        self.plan.joins.push(JoinSpec {
            kind,
            path: format!("{parent_alias}.{property}"),
            alias: alias.clone(),
            condition,
            params: include.parameters.clone(),
        });

        if let Some(orderby) = include.orderby.as_deref() {
            let orderby = self.scoped(orderby, &alias);
            let orders = OrderClause::parse_list(&orderby, &self.config.no_order_sentinel)?;
            self.plan.orders.extend(orders);
        }

        if include.includes.is_empty() {
            return Ok(());
        }

        let provider = self.provider;
        let target = provider
            .entity(&relation.target_entity_name)
            .ok_or_else(|| QueryError::unknown_entity(&relation.target_entity_name))?;

        self.walk(&include.includes, &alias, target)
    }

    // Point placeholder references at the alias this join actually got.
    fn scoped(&self, text: &str, alias: &str) -> String {
        let placeholder = self.config.include_placeholder.as_str();
        if placeholder.is_empty() {
            return text.to_string();
        }

        text.replace(placeholder, alias)
    }
}
