use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Set-aside designations used on federal solicitations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetAside {
    #[serde(rename = "SDVOSB")]
    Sdvosb,
    #[serde(rename = "VOSB")]
    Vosb,
    #[serde(rename = "SB")]
    SmallBusiness,
    #[serde(rename = "WOSB")]
    Wosb,
    #[serde(rename = "HUBZone")]
    HubZone,
    #[serde(rename = "8(a)")]
    EightA,
    #[serde(rename = "Open")]
    Open,
}

impl SetAside {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sdvosb => "SDVOSB",
            Self::Vosb => "VOSB",
            Self::SmallBusiness => "SB",
            Self::Wosb => "WOSB",
            Self::HubZone => "HUBZone",
            Self::EightA => "8(a)",
            Self::Open => "Open",
        }
    }
}

/// Opportunity facts evaluated by the scoring engine. Immutable for the
/// duration of one scoring call; optional fields degrade to neutral scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    pub solicitation_number: String,
    pub title: String,
    pub description: Option<String>,
    pub agency: String,
    pub set_aside: Option<SetAside>,
    pub naics_code: Option<String>,
    pub psc_code: Option<String>,
    /// NAICS alignment against company capabilities, 0.0 to 1.0.
    pub naics_match: Option<f64>,
    /// PSC alignment against company capabilities, 0.0 to 1.0.
    pub psc_match: Option<f64>,
    pub posted_date: DateTime<Utc>,
    pub response_deadline: Option<DateTime<Utc>>,
    pub estimated_value: Option<f64>,
    pub place_of_performance: Option<String>,
    /// Sources Sought / RFI opportunities where requirements can still be shaped.
    pub shapeable: bool,
}

/// Pursuit recommendation derived from the weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Bid,
    NoBid,
    Review,
}

impl Recommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bid => "BID",
            Self::NoBid => "NO_BID",
            Self::Review => "REVIEW",
        }
    }
}

/// One factor's contribution, retained for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub score: f64,
    pub notes: Vec<String>,
}

impl FactorScore {
    pub(crate) fn new(score: f64) -> Self {
        Self {
            score,
            notes: Vec::new(),
        }
    }

    pub(crate) fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// Bid/no-bid scoring result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidScore {
    pub set_aside_score: f64,
    pub scope_score: f64,
    pub timeline_score: f64,
    pub competition_score: f64,
    pub staffing_score: f64,
    pub pricing_score: f64,
    pub strategic_score: f64,
    /// Weighted total on the 0-100 scale.
    pub total_score: f64,
    pub recommendation: Recommendation,
    /// Deterministic digest of the per-factor notes. Narrative prose is an
    /// external summarizer concern and never feeds back into the numbers.
    pub rationale: String,
    pub is_va_procurement: bool,
    pub requires_vetcert: bool,
    pub high_priority: bool,
}
