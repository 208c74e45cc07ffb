//! Dialect configuration for rendered SQL fragments.
//!
//! Every field has a default, so an empty TOML document is a valid config.

use crate::error::QueryError;
use serde::Deserialize;
use std::{fs, path::Path};

///
/// IdentQuote
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum IdentQuote {
    #[default]
    None,
    Backtick,
    Double,
}

impl IdentQuote {
    /// Quote a single identifier segment.
    #[must_use]
    pub fn quote(self, ident: &str) -> String {
        match self {
            Self::None => ident.to_string(),
            Self::Backtick => format!("`{ident}`"),
            Self::Double => format!("\"{ident}\""),
        }
    }

    /// Quote an `alias.column` pair.
    #[must_use]
    pub fn qualify(self, alias: &str, column: &str) -> String {
        format!("{}.{}", self.quote(alias), self.quote(column))
    }
}

///
/// DialectConfig
///
/// Knobs for parameter naming, wildcarding, identifier quoting and the
/// fixed aliases used by the correlated lambda subquery.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DialectConfig {
    pub param_prefix: String,
    pub wildcard: String,
    pub quote: IdentQuote,
    pub parent_alias: String,
    pub child_alias: String,
    pub include_placeholder: String,
    pub max_alias_attempts: u32,
    pub no_order_sentinel: String,
}

impl DialectConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, QueryError> {
        let config: Self =
            toml::from_str(text).map_err(|err| QueryError::Config(err.to_string()))?;
        config.validate()?;

        Ok(config)
    }

    /// Load a config from a TOML file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, QueryError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|err| QueryError::Config(format!("{}: {err}", path.display())))?;

        Self::from_toml_str(&text)
    }

    // Reject configs that would render unusable SQL.
    fn validate(&self) -> Result<(), QueryError> {
        if self.param_prefix.is_empty() {
            return Err(QueryError::Config("param_prefix must not be empty".into()));
        }
        if self.parent_alias.is_empty() || self.child_alias.is_empty() {
            return Err(QueryError::Config(
                "parent_alias and child_alias must not be empty".into(),
            ));
        }
        if self.parent_alias == self.child_alias {
            return Err(QueryError::Config(format!(
                "parent_alias and child_alias must differ (both '{}')",
                self.parent_alias
            )));
        }

        Ok(())
    }

    #[must_use]
    pub fn param_name(&self, index: usize) -> String {
        format!("{}{index}", self.param_prefix)
    }

    #[must_use]
    pub fn wrap_wildcard(&self, value: &str) -> String {
        format!("{w}{value}{w}", w = self.wildcard)
    }
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            param_prefix: "param_".to_string(),
            wildcard: "%".to_string(),
            quote: IdentQuote::None,
            parent_alias: "parent".to_string(),
            child_alias: "child".to_string(),
            include_placeholder: "typeorm_query".to_string(),
            max_alias_attempts: 32,
            no_order_sentinel: "1".to_string(),
        }
    }
}

///
/// TESTS
///
