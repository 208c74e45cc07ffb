//! Observability: optional, caller-injected query tracing.
//!
//! Tracing never affects resolution semantics. Structured `tracing` events
//! are emitted alongside the sink events for hosts that install a subscriber.

pub(crate) mod trace;

// re-exports
pub use trace::{QueryTraceEvent, QueryTraceSink, TracePhase};
pub(crate) use trace::{TraceScope, start_query_trace};
