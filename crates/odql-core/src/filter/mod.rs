//! Filter resolver: finds the lambda filter inside an externally parsed
//! filter AST and lowers it into a correlated-subquery WHERE fragment.
//!
//! Only the first `/any(` occurrence in a filter is resolved.

mod ast;
mod resolve;

#[cfg(test)]
mod tests;

pub use ast::FilterNode;
pub use resolve::{LambdaFilterDetails, find_lambda, resolve_filter, resolve_lambda};
