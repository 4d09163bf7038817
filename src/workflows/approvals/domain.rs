use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two leadership review boards in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateName {
    PinkTeam,
    GoldTeam,
}

impl GateName {
    pub const fn key(self) -> &'static str {
        match self {
            Self::PinkTeam => "pink_team",
            Self::GoldTeam => "gold_team",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PinkTeam => "Pink Team",
            Self::GoldTeam => "Gold Team",
        }
    }
}

/// Possible decisions for an approval gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalDecision {
    Approved,
    Revise,
    Rejected,
}

impl ApprovalDecision {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Revise => "revise",
            Self::Rejected => "rejected",
        }
    }
}

/// Readiness signals the gate rule engines read. Remediation can only raise
/// signals named here, which keeps rework from inventing content the gates
/// never check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateCriterion {
    // Pink Team
    CompositeBidScore,
    TimelineRunway,
    StrategicAlignment,
    RiskMitigations,
    CapturePlan,
    ComplianceOutline,
    StaffingPlan,
    KickoffSchedule,
    // Gold Team
    ProposalQuality,
    ComplianceCoverage,
    PricingConfidence,
    ComplianceGap,
    RedTeamFinding,
    SubmissionPackage,
    ExecutiveReview,
    PastPerformance,
    ColorTeamTrend,
}

/// A remediation instruction tied to the criterion that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredAction {
    pub criterion: GateCriterion,
    pub instruction: String,
}

impl RequiredAction {
    pub(crate) fn new(criterion: GateCriterion, instruction: impl Into<String>) -> Self {
        Self {
            criterion,
            instruction: instruction.into(),
        }
    }
}

/// Result from an approval evaluation. Created fresh on every call and never
/// mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalOutcome {
    pub gate: GateName,
    pub decision: ApprovalDecision,
    pub approver: String,
    pub decided_at: DateTime<Utc>,
    pub comments: Vec<String>,
    pub required_actions: Vec<RequiredAction>,
}

/// Bid scorecard snapshot the Pink Team inspects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BidScorecard {
    pub total_score: f64,
    pub timeline_score: f64,
    pub strategic_score: f64,
}

/// Capture readiness signals evaluated at the Pink Team gate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PinkTeamContext {
    pub scorecard: BidScorecard,
    pub capture_plan_ready: bool,
    pub risk_register: Vec<String>,
    pub mitigations: Vec<String>,
    pub compliance_outline_ready: bool,
    pub staffing_plan_ready: bool,
    pub kickoff_schedule_confirmed: bool,
}

/// Direction of confidence across color-team reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTeamTrend {
    Improving,
    Stable,
    Declining,
}

/// Proposal readiness snapshot the Gold Team inspects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalReadiness {
    pub quality_score: f64,
    pub compliance_score: f64,
    pub color_team_trend: Option<ColorTeamTrend>,
}

/// Pricing readiness snapshot the Gold Team inspects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingReadiness {
    pub total_cost: Option<f64>,
    pub confidence: f64,
    pub review_completed: bool,
}

/// Final pre-submission readiness signals evaluated at the Gold Team gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldTeamContext {
    pub proposal: ProposalReadiness,
    pub pricing: PricingReadiness,
    pub compliance_gaps: Vec<String>,
    pub red_team_findings_open: Vec<String>,
    pub submission_package_ready: bool,
    pub executive_reviewed: bool,
    pub past_performance_updated: bool,
}
