//! Core runtime for odql: lambda-filter compilation, WHERE-fragment rendering,
//! include resolution, and query assembly against an abstract query builder.
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod filter;
pub mod include;
pub mod lambda;
pub mod model;
pub mod obs;
pub mod query;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Marker that introduces a lambda filter on a collection navigation property.
pub const LAMBDA_MARKER: &str = "/any(";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, executors, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        filter::FilterNode,
        include::{IncludeRequest, Selection},
        lambda::{ConditionNode, ConditionTree, Connective, ParameterMap, PredicateOp},
        model::{EntityModel, RelationDescriptor, RelationProvider},
        query::{QueryRequest, QueryResult},
    };
}
