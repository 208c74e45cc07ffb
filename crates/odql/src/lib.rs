//! ## Crate layout
//! - `core`: lambda-filter compilation, WHERE rendering, include resolution,
//!   query assembly and observability.
//!
//! The `prelude` module mirrors the surface a host needs to run OData
//! requests against its own query builder.

pub use odql_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use odql_core::{LAMBDA_MARKER, error::QueryError as Error};

///
/// Host Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        config::{DialectConfig, IdentQuote},
        error::{ErrorClass, ErrorOrigin, QueryError},
        model::{ModelRegistry, RelationProvider as _},
        obs::{QueryTraceEvent, QueryTraceSink, TracePhase},
        prelude::*,
        query::{
            JoinKind, JoinSpec, OrderClause, OrderDirection, ParsedQuery, PlanBuilder,
            QueryBuilder as _, QueryExecutor, QueryParser, QuerySource, WhereFragment,
            execute_query, execute_query_on,
        },
    };
}

///
/// TESTS
///
