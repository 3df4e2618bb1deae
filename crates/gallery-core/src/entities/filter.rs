//! Guest photo filter - "my likes" / "my favorites" combinations

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterOperator {
    #[default]
    And,
    Or,
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::And => "AND",
            Self::Or => "OR",
        })
    }
}

impl FromStr for FilterOperator {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            other => Err(DomainError::ValidationError(format!(
                "unknown filter operator: {other}"
            ))),
        }
    }
}

/// Which of the guest's own feedback to filter the gallery by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhotoFilter {
    pub liked: bool,
    pub favorited: bool,
    pub operator: FilterOperator,
}

impl PhotoFilter {
    /// No filter means "every photo in the event"
    pub fn is_active(&self) -> bool {
        self.liked || self.favorited
    }

    /// Combine the id sets fetched for each active filter.
    ///
    /// Sets for inactive filters are ignored. The result is de-duplicated and
    /// sorted by id.
    pub fn combine(&self, liked: &[Snowflake], favorited: &[Snowflake]) -> Vec<Snowflake> {
        match (self.liked, self.favorited) {
            (false, false) => Vec::new(),
            (true, false) => sorted(liked.iter().copied()),
            (false, true) => sorted(favorited.iter().copied()),
            (true, true) => match self.operator {
                FilterOperator::Or => sorted(liked.iter().chain(favorited).copied()),
                FilterOperator::And => {
                    let favorited: HashSet<_> = favorited.iter().copied().collect();
                    sorted(liked.iter().copied().filter(|id| favorited.contains(id)))
                }
            },
        }
    }
}

fn sorted(ids: impl Iterator<Item = Snowflake>) -> Vec<Snowflake> {
    ids.collect::<BTreeSet<_>>().into_iter().collect()
}
