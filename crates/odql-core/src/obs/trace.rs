//! Query assembly tracing boundary.

use crate::error::{ErrorClass, ErrorOrigin, QueryError};

///
/// QueryTraceSink
///

pub trait QueryTraceSink: Send + Sync {
    fn on_event(&self, event: QueryTraceEvent);
}

///
/// TracePhase
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TracePhase {
    Projection,
    Filter,
    LambdaFilter,
    Include,
    Order,
    Page,
    Execute,
}

///
/// QueryTraceEvent
///
/// `items` counts whatever the phase produced: selected columns, where
/// fragments, joins, order clauses or returned rows.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum QueryTraceEvent {
    Start {
        entity: String,
    },
    Phase {
        entity: String,
        phase: TracePhase,
        items: u64,
    },
    Finish {
        entity: String,
        rows: u64,
    },
    Error {
        entity: String,
        class: ErrorClass,
        origin: ErrorOrigin,
    },
}

///
/// TraceScope
///

pub(crate) struct TraceScope {
    sink: &'static dyn QueryTraceSink,
    entity: String,
}

impl TraceScope {
    fn new(sink: &'static dyn QueryTraceSink, entity: &str) -> Self {
        sink.on_event(QueryTraceEvent::Start {
            entity: entity.to_string(),
        });
        Self {
            sink,
            entity: entity.to_string(),
        }
    }

    pub(crate) fn phase(&self, phase: TracePhase, items: usize) {
        self.sink.on_event(QueryTraceEvent::Phase {
            entity: self.entity.clone(),
            phase,
            items: saturating_u64(items),
        });
    }

    pub(crate) fn finish(self, rows: usize) {
        self.sink.on_event(QueryTraceEvent::Finish {
            entity: self.entity,
            rows: saturating_u64(rows),
        });
    }

    pub(crate) fn error(self, err: &QueryError) {
        self.sink.on_event(QueryTraceEvent::Error {
            entity: self.entity,
            class: err.class(),
            origin: err.origin(),
        });
    }
}

/// Open a trace scope for one query when a sink is installed.
pub(crate) fn start_query_trace(
    sink: Option<&'static dyn QueryTraceSink>,
    entity: &str,
) -> Option<TraceScope> {
    let sink = sink?;

    Some(TraceScope::new(sink, entity))
}

fn saturating_u64(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

///
/// TESTS
///
