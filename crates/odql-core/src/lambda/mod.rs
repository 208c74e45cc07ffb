//! Lambda-filter compiler.
//!
//! Turns the body of an `any(x: ...)` lambda into a [`ConditionTree`] plus a
//! [`ParameterMap`], and renders that tree back out as a parameterized SQL
//! boolean expression. Compilation is a single left-to-right scan; grouping
//! lives in the tree shape, so rendering never reorders anything.

mod ast;
mod compile;
mod params;
mod render;
pub(crate) mod scan;

#[cfg(test)]
mod tests;

pub use ast::{ConditionNode, ConditionTree, Connective, PredicateOp};
pub use compile::{compile, compile_with};
pub use params::ParameterMap;
pub use render::{render, render_with};
