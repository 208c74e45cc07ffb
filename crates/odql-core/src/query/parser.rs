use crate::{error::QueryError, filter::FilterNode, include::IncludeRequest, lambda::ParameterMap};

///
/// ParsedQuery
///
/// Output of the external OData parser. `where_clause` is already SQL text
/// bound through `parameters`; `filter` is the raw filter AST that still
/// carries any lambda leaf the parser left untranslated.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParsedQuery {
    pub select: String,
    pub where_clause: String,
    pub parameters: ParameterMap,
    pub orderby: String,
    pub includes: Vec<IncludeRequest>,
    pub filter: Option<FilterNode>,
}

impl ParsedQuery {
    /// Parser WHERE text with a dangling trailing `AND` removed.
    #[must_use]
    pub fn where_text(&self) -> &str {
        let text = self.where_clause.trim_end();
        let Some(head) = text.len().checked_sub(3).and_then(|at| text.get(..at)) else {
            return text;
        };

        let tail = &text[head.len()..];
        if tail.eq_ignore_ascii_case("and") && head.ends_with(char::is_whitespace) {
            head.trim_end()
        } else {
            text
        }
    }
}

///
/// QueryParser
///
/// Capability boundary to the OData query-string parser.
///

pub trait QueryParser {
    fn parse(&self, query: &str, alias: &str) -> Result<ParsedQuery, QueryError>;
}

impl<F> QueryParser for F
where
    F: Fn(&str, &str) -> Result<ParsedQuery, QueryError>,
{
    fn parse(&self, query: &str, alias: &str) -> Result<ParsedQuery, QueryError> {
        self(query, alias)
    }
}

///
/// TESTS
///
