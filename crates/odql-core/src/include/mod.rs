//! Include resolver.
//!
//! Walks the requested include tree and emits one left join per node. Join
//! aliases are unique across the whole traversal: a navigation property that
//! shows up again at another depth gets a disambiguated alias instead of
//! silently colliding with the first join.

mod alias;
mod request;
mod resolve;


pub use alias::AliasRegistry;
pub use request::{IncludeRequest, Selection};
pub use resolve::{IncludePlan, plan_includes, resolve_includes};
