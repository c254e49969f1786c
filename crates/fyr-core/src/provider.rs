//! Identifiers for the legislator lookup services the widget can query.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A legislator lookup provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Sunlight Congress API: members of the U.S. Congress.
    Congress,
    /// Open States API: state legislators.
    OpenStates,
}

impl ProviderId {
    pub const ALL: [ProviderId; 2] = [ProviderId::Congress, ProviderId::OpenStates];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderId::Congress => "congress",
            ProviderId::OpenStates => "openstates",
        }
    }

    /// CSS class of the results section this provider renders into.
    #[must_use]
    pub fn section_class(self) -> String {
        format!("fyr-{}", self.as_str())
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "congress" => Ok(ProviderId::Congress),
            "openstates" => Ok(ProviderId::OpenStates),
            other => Err(CoreError::UnknownProvider(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_ids() {
        assert_eq!("congress".parse::<ProviderId>(), Ok(ProviderId::Congress));
        assert_eq!(
            "openstates".parse::<ProviderId>(),
            Ok(ProviderId::OpenStates)
        );
    }

    #[test]
    fn unknown_id_is_an_error() {
        assert_eq!(
            "parliament".parse::<ProviderId>(),
            Err(CoreError::UnknownProvider("parliament".to_string()))
        );
    }

    #[test]
    fn section_class_is_prefixed() {
        assert_eq!(ProviderId::OpenStates.section_class(), "fyr-openstates");
    }
}
