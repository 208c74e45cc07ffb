use crate::error::QueryError;

///
/// AliasRegistry
///
/// Aliases already claimed in one query (the root alias included).
/// Created fresh per query and threaded through the include traversal by
/// `&mut`; never shared between queries.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AliasRegistry {
    used: Vec<String>,
}

impl AliasRegistry {
    /// Start a registry that already holds the root alias.
    #[must_use]
    pub fn new(root_alias: &str) -> Self {
        Self {
            used: vec![root_alias.to_string()],
        }
    }

    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.used.iter().any(|used| used == alias)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.used.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.used.iter().map(String::as_str)
    }

    /// Claim an alias for `name` joined under `parent_alias`.
    ///
    /// Tries `name`, then `<parent_alias>_<name>`, then `<name>_2`,
    /// `<name>_3`, ... up to `max_attempts` candidates in total.
    pub fn claim(
        &mut self,
        name: &str,
        parent_alias: &str,
        max_attempts: u32,
    ) -> Result<String, QueryError> {
        let alias = candidates(name, parent_alias)
            .take(max_attempts.max(1) as usize)
            .find(|candidate| !self.contains(candidate))
            .ok_or_else(|| QueryError::DuplicateAliasUnresolved {
                alias: name.to_string(),
            })?;

        self.used.push(alias.clone());

        Ok(alias)
    }
}

fn candidates<'a>(name: &'a str, parent_alias: &'a str) -> impl Iterator<Item = String> + 'a {
    [name.to_string(), format!("{parent_alias}_{name}")]
        .into_iter()
        .chain((2u32..).map(move |n| format!("{name}_{n}")))
}
