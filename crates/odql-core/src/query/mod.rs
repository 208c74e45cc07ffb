//! Query assembly.
//!
//! Sequences projection → filter → lambda filter → includes → ordering →
//! paging → execution against an external [`QueryBuilder`]. Everything up to
//! execution is synchronous; execution is awaited exactly once.

mod assemble;
mod builder;
mod parser;
mod plan;
mod request;
mod result;


pub use assemble::{QueryExecutor, execute_query, execute_query_on};
pub use builder::{
    JoinKind, JoinSpec, OrderClause, OrderDirection, QueryBuilder, QuerySource, WhereFragment,
};
pub use parser::{ParsedQuery, QueryParser};
pub use plan::{PlanBuilder, QueryPlan};
pub use request::QueryRequest;
pub use result::QueryResult;
