//! Lead pipeline vocabulary.
//!
//! Status and source values are client-facing strings and are stored verbatim
//! in the `leads` table, so the serialized forms here must match the CHECK
//! constraints in the leads migration.

use serde::{Deserialize, Serialize};

/// Where a lead entered the pipeline from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeadSource {
    Website,
    Referral,
    SocialMedia,
}

impl LeadSource {
    pub const ALL: [LeadSource; 3] = [
        LeadSource::Website,
        LeadSource::Referral,
        LeadSource::SocialMedia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::Website => "website",
            LeadSource::Referral => "referral",
            LeadSource::SocialMedia => "socialMedia",
        }
    }

    /// Parse the client-facing string form. Case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl std::fmt::Display for LeadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stage of a lead in the sales pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Lost,
    Won,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Lost,
        LeadStatus::Won,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::Lost => "Lost",
            LeadStatus::Won => "Won",
        }
    }

    /// Parse the client-facing string form. Case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_round_trips_through_string_form() {
        for source in LeadSource::ALL {
            assert_eq!(LeadSource::parse(source.as_str()), Some(source));
        }
    }

    #[test]
    fn source_parse_is_case_sensitive() {
        assert_eq!(LeadSource::parse("socialMedia"), Some(LeadSource::SocialMedia));
        assert_eq!(LeadSource::parse("socialmedia"), None);
        assert_eq!(LeadSource::parse("Website"), None);
    }

    #[test]
    fn status_round_trips_through_string_form() {
        for status in LeadStatus::ALL {
            assert_eq!(LeadStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn status_rejects_values_outside_the_pipeline() {
        assert_eq!(LeadStatus::parse("Done"), None);
        assert_eq!(LeadStatus::parse("new"), None);
        assert_eq!(LeadStatus::parse(""), None);
    }

    #[test]
    fn serde_forms_match_as_str() {
        let json = serde_json::to_string(&LeadSource::SocialMedia).unwrap();
        assert_eq!(json, "\"socialMedia\"");

        let json = serde_json::to_string(&LeadStatus::Qualified).unwrap();
        assert_eq!(json, "\"Qualified\"");

        let parsed: LeadStatus = serde_json::from_str("\"Won\"").unwrap();
        assert_eq!(parsed, LeadStatus::Won);
    }
}
