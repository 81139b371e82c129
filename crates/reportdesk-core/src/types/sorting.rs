//! Sort keys for the report list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The four orderings the report list can be shown in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Most recently written first.
    #[default]
    Latest,
    /// Most recent document date first.
    Date,
    /// Name and surname, A to Z.
    Name,
    /// Largest amount first.
    Amount,
}

impl SortKey {
    /// All keys, in the order the list view offers them.
    pub const ALL: [SortKey; 4] = [Self::Latest, Self::Date, Self::Name, Self::Amount];

    /// Wire name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Date => "date",
            Self::Name => "name",
            Self::Amount => "amount",
        }
    }

    /// Whether this key orders ascending. Only `name` does.
    pub fn is_ascending(&self) -> bool {
        matches!(self, Self::Name)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(Self::Latest),
            "date" => Ok(Self::Date),
            "name" => Ok(Self::Name),
            "amount" => Ok(Self::Amount),
            other => Err(AppError::validation(format!(
                "Unknown sort key '{other}', expected one of latest, date, name, amount"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_names() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().expect("parse"), key);
        }
        assert_eq!(" Amount ".parse::<SortKey>().expect("parse"), SortKey::Amount);
    }

    #[test]
    fn test_unknown_key_is_validation_error() {
        let err = "size".parse::<SortKey>().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Validation);
    }

    #[test]
    fn test_only_name_is_ascending() {
        assert!(SortKey::Name.is_ascending());
        assert!(!SortKey::Latest.is_ascending());
        assert!(!SortKey::Date.is_ascending());
        assert!(!SortKey::Amount.is_ascending());
    }
}
