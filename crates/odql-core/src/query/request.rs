use crate::error::QueryError;
use serde::{Deserialize, Deserializer, Serialize};

///
/// QueryRequest
///
/// The recognized `$`-prefixed OData keys of one request, kept as raw text.
/// Paging and count values may arrive as JSON numbers or strings.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct QueryRequest {
    #[serde(rename = "$select", skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,

    #[serde(rename = "$filter", skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    #[serde(rename = "$expand", skip_serializing_if = "Option::is_none")]
    pub expand: Option<String>,

    #[serde(rename = "$orderby", skip_serializing_if = "Option::is_none")]
    pub orderby: Option<String>,

    #[serde(
        rename = "$top",
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub top: Option<String>,

    #[serde(
        rename = "$skip",
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub skip: Option<String>,

    #[serde(
        rename = "$count",
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub count: Option<String>,
}

impl QueryRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    #[must_use]
    pub fn with_expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    #[must_use]
    pub fn with_orderby(mut self, orderby: impl Into<String>) -> Self {
        self.orderby = Some(orderby.into());
        self
    }

    #[must_use]
    pub fn with_top(mut self, top: u64) -> Self {
        self.top = Some(top.to_string());
        self
    }

    #[must_use]
    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip.to_string());
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: impl Into<String>) -> Self {
        self.count = Some(count.into());
        self
    }

    /// Render the present keys as `$key=value` pairs joined by `&`.
    ///
    /// Keys appear in a fixed order so the same request always produces the
    /// same string.
    #[must_use]
    pub fn to_odata_string(&self) -> String {
        let pairs = [
            ("$select", &self.select),
            ("$filter", &self.filter),
            ("$expand", &self.expand),
            ("$orderby", &self.orderby),
            ("$top", &self.top),
            ("$skip", &self.skip),
            ("$count", &self.count),
        ];

        pairs
            .into_iter()
            .filter_map(|(key, value)| value.as_deref().map(|value| format!("{key}={value}")))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// `$top`, when present.
    pub fn top_value(&self) -> Result<Option<u64>, QueryError> {
        self.top
            .as_deref()
            .map(|value| parse_paging("$top", value))
            .transpose()
    }

    /// `$skip`, defaulting to zero.
    pub fn skip_value(&self) -> Result<u64, QueryError> {
        self.skip
            .as_deref()
            .map_or(Ok(0), |value| parse_paging("$skip", value))
    }

    /// `$count` is present, non-empty and not the literal `false`.
    #[must_use]
    pub fn wants_count(&self) -> bool {
        self.count
            .as_deref()
            .is_some_and(|count| !count.is_empty() && count != "false")
    }
}

fn parse_paging(key: &'static str, value: &str) -> Result<u64, QueryError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| QueryError::InvalidPaging {
            key,
            value: value.to_string(),
        })
}

// Accept `"10"`, `10` or `true` and keep the textual form.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Flag(bool),
    }

    let value = Option::<Scalar>::deserialize(deserializer)?;

    Ok(value.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Flag(flag) => flag.to_string(),
    }))
}

///
/// TESTS
///
