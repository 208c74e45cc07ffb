use crate::lambda::ParameterMap;

///
/// Selection
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Selection {
    All,
    Columns(Vec<String>),
}

impl Selection {
    /// `*` selects everything; anything else is a comma-separated column list.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text == "*" {
            return Self::All;
        }

        Self::Columns(
            text.split(',')
                .map(str::trim)
                .filter(|column| !column.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

///
/// IncludeRequest
///
/// One node of the requested include tree, as produced by the OData parser.
/// `where_clause` and `orderby` are scoped to this navigation property and may
/// reference it through the configured placeholder token.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IncludeRequest {
    pub navigation_property: String,
    pub select: Option<Selection>,
    pub where_clause: Option<String>,
    pub parameters: ParameterMap,
    pub orderby: Option<String>,
    pub includes: Vec<Self>,
}

impl IncludeRequest {
    #[must_use]
    pub fn new(navigation_property: impl Into<String>) -> Self {
        Self {
            navigation_property: navigation_property.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn select_all(mut self) -> Self {
        self.select = Some(Selection::All);
        self
    }

    #[must_use]
    pub fn with_select(mut self, select: &str) -> Self {
        self.select = Some(Selection::parse(select));
        self
    }

    #[must_use]
    pub fn with_where(mut self, clause: impl Into<String>, parameters: ParameterMap) -> Self {
        self.where_clause = Some(clause.into());
        self.parameters = parameters;
        self
    }

    #[must_use]
    pub fn with_orderby(mut self, orderby: impl Into<String>) -> Self {
        self.orderby = Some(orderby.into());
        self
    }

    #[must_use]
    pub fn with_include(mut self, child: Self) -> Self {
        self.includes.push(child);
        self
    }

    /// Total number of nodes below (and including) this one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.includes.iter().map(Self::node_count).sum::<usize>()
    }
}
