use serde::Serialize;

///
/// QueryResult
///
/// Rows of one executed query; `Counted` when the request asked for the
/// total match count alongside the page.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResult<R> {
    Rows(Vec<R>),
    Counted { items: Vec<R>, count: u64 },
}

impl<R> QueryResult<R> {
    /// Rows of the current page.
    #[must_use]
    pub fn items(&self) -> &[R] {
        match self {
            Self::Rows(items) | Self::Counted { items, .. } => items,
        }
    }

    #[must_use]
    pub fn into_items(self) -> Vec<R> {
        match self {
            Self::Rows(items) | Self::Counted { items, .. } => items,
        }
    }

    /// Total match count, when it was requested.
    #[must_use]
    pub const fn count(&self) -> Option<u64> {
        match self {
            Self::Rows(_) => None,
            Self::Counted { count, .. } => Some(*count),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

///
/// TESTS
///
