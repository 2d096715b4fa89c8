use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FallacyError;

// --- Fallacy Categories ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FallacyCategory {
    AdHominem,
    StrawMan,
    FalseDichotomy,
    AppealToAuthority,
    SlipperySlope,
}

impl FallacyCategory {
    /// Declaration order. Classifier ties resolve to the earliest entry.
    pub const ALL: [FallacyCategory; 5] = [
        FallacyCategory::AdHominem,
        FallacyCategory::StrawMan,
        FallacyCategory::FalseDichotomy,
        FallacyCategory::AppealToAuthority,
        FallacyCategory::SlipperySlope,
    ];

    /// Stable identifier, e.g. `AD_HOMINEM`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdHominem => "AD_HOMINEM",
            Self::StrawMan => "STRAW_MAN",
            Self::FalseDichotomy => "FALSE_DICHOTOMY",
            Self::AppealToAuthority => "APPEAL_TO_AUTHORITY",
            Self::SlipperySlope => "SLIPPERY_SLOPE",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::AdHominem => "Ad Hominem",
            Self::StrawMan => "Straw Man",
            Self::FalseDichotomy => "False Dichotomy",
            Self::AppealToAuthority => "Appeal to Authority",
            Self::SlipperySlope => "Slippery Slope",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::AdHominem => "Attacking the person instead of addressing their argument",
            Self::StrawMan => "Misrepresenting an argument to make it easier to attack",
            Self::FalseDichotomy => "Presenting only two options when others exist",
            Self::AppealToAuthority => {
                "Using an authority figure as evidence without addressing the argument"
            }
            Self::SlipperySlope => "Asserting that a small step will lead to extreme consequences",
        }
    }

    /// Lower-case keywords the classifier scores against. Order is fixed.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::AdHominem => &["attack", "person", "character", "insulting", "credentials"],
            Self::StrawMan => &["misrepresent", "distort", "exaggerate", "position", "claim"],
            Self::FalseDichotomy => &["either", "or", "only two", "black and white", "false choice"],
            Self::AppealToAuthority => &["expert", "authority", "scientist", "professor", "doctor"],
            Self::SlipperySlope => &["lead to", "eventually", "next thing", "if we allow", "snowball"],
        }
    }

    /// Identifier lower-cased with underscores replaced, e.g. `appeal to authority`.
    pub fn label(&self) -> String {
        self.as_str().to_lowercase().replace('_', " ")
    }

    /// Position in [`FallacyCategory::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Self::AdHominem => 0,
            Self::StrawMan => 1,
            Self::FalseDichotomy => 2,
            Self::AppealToAuthority => 3,
            Self::SlipperySlope => 4,
        }
    }
}

impl std::fmt::Display for FallacyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FallacyCategory {
    type Err = FallacyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| FallacyError::UnknownCategory(s.to_string()))
    }
}

// --- Corpus Types ---

/// A snippet as returned by a source, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    pub text: String,
    pub source: String,
    pub url: String,
}

impl RawItem {
    pub fn new(text: impl Into<String>, source: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            url: url.into(),
        }
    }
}

/// A classified snippet held in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub text: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub fallacy_type: FallacyCategory,
    pub explanation: String,
}

impl Example {
    /// Build an example from a fetched item and its classified category.
    /// The explanation is derived from the category alone.
    pub fn classified(item: RawItem, fallacy_type: FallacyCategory) -> Self {
        Self {
            text: item.text,
            source: item.source,
            url: Some(item.url),
            fallacy_type,
            explanation: explanation_for(fallacy_type),
        }
    }
}

pub fn explanation_for(category: FallacyCategory) -> String {
    format!(
        "This appears to be a {} fallacy based on the content and context.",
        category.label()
    )
}

/// Read-only status view served alongside the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusStatus {
    pub example_count: usize,
    pub last_update_time: Option<DateTime<Utc>>,
    pub next_update_time: Option<DateTime<Utc>>,
}
