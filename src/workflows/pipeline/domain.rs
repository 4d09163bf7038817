use super::collaborators::{
    CommunicationDraft, PricingEstimate, ProposalDraft, SolicitationAnalysis,
};
use crate::workflows::approvals::{ApprovalDecision, ApprovalOutcome, GateName};
use crate::workflows::scoring::BidScore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Stages of the proposal pipeline, in execution order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    Screening,
    PinkTeam,
    SolicitationReview,
    ProposalDrafting,
    Pricing,
    GoldTeam,
    Submission,
}

impl WorkflowStage {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Screening,
            Self::PinkTeam,
            Self::SolicitationReview,
            Self::ProposalDrafting,
            Self::Pricing,
            Self::GoldTeam,
            Self::Submission,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Screening => "Screening",
            Self::PinkTeam => "Pink Team",
            Self::SolicitationReview => "Solicitation Review",
            Self::ProposalDrafting => "Proposal Drafting",
            Self::Pricing => "Pricing",
            Self::GoldTeam => "Gold Team",
            Self::Submission => "Submission",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Screening => "screening",
            Self::PinkTeam => "pink_team",
            Self::SolicitationReview => "solicitation_review",
            Self::ProposalDrafting => "proposal_drafting",
            Self::Pricing => "pricing",
            Self::GoldTeam => "gold_team",
            Self::Submission => "submission",
        }
    }
}

/// Capture readiness signals supplied by the caller at run start. These seed
/// the Pink Team context; the screening stage never fabricates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureReadiness {
    pub capture_plan_ready: bool,
    pub compliance_outline_ready: bool,
    pub staffing_plan_ready: bool,
    pub kickoff_schedule_confirmed: bool,
    pub risk_register: Vec<String>,
    pub mitigations: Vec<String>,
}

/// Options for one workflow run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Skip approval gates and the NO_BID abort; intended for automated runs.
    pub auto_approve: bool,
    /// Stage to begin or resume from; earlier stages are trusted as done.
    pub start_from: Option<WorkflowStage>,
    pub readiness: CaptureReadiness,
}

/// Screening stage output: the scorecard plus the readiness signals the Pink
/// Team will evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningArtifact {
    pub bid_score: BidScore,
    pub readiness: CaptureReadiness,
}

/// Record of a gate's final outcome and how many attempts it took.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateArtifact {
    pub outcome: ApprovalOutcome,
    pub attempts: u32,
}

/// Drafting stage output plus the review state the Gold Team tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalArtifact {
    pub draft: ProposalDraft,
    pub executive_reviewed: bool,
    pub past_performance_updated: bool,
}

/// Pricing stage output plus its review state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingArtifact {
    pub estimate: PricingEstimate,
    pub review_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionArtifact {
    pub email: CommunicationDraft,
}

/// Stage outputs, tagged by producing stage. Values may be overwritten by
/// gate rework but the map itself only grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageArtifact {
    Screening(ScreeningArtifact),
    PinkTeam(GateArtifact),
    SolicitationReview(SolicitationAnalysis),
    ProposalDrafting(ProposalArtifact),
    Pricing(PricingArtifact),
    GoldTeam(GateArtifact),
    Submission(SubmissionArtifact),
}

/// Audit entry for one denied gate attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReworkRecord {
    pub gate: GateName,
    pub attempt: u32,
    pub decision: ApprovalDecision,
    pub required_actions: Vec<String>,
    pub comments: Vec<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Mutable record of one orchestration run. Owned exclusively by its run;
/// callers are responsible for never running the same opportunity twice
/// concurrently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    pub opportunity_id: String,
    pub current_stage: WorkflowStage,
    pub stages_completed: Vec<WorkflowStage>,
    pub stages_failed: Vec<WorkflowStage>,
    pub approval_gates_pending: Vec<GateName>,
    pub errors: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub artifacts: BTreeMap<WorkflowStage, StageArtifact>,
    pub rework_history: Vec<ReworkRecord>,
}

impl WorkflowState {
    pub(crate) fn new(opportunity_id: String, start_stage: WorkflowStage) -> Self {
        let now = Utc::now();
        Self {
            opportunity_id,
            current_stage: start_stage,
            stages_completed: Vec::new(),
            stages_failed: Vec::new(),
            approval_gates_pending: Vec::new(),
            errors: Vec::new(),
            started_at: now,
            updated_at: now,
            artifacts: BTreeMap::new(),
            rework_history: Vec::new(),
        }
    }

    pub fn screening(&self) -> Option<&ScreeningArtifact> {
        match self.artifacts.get(&WorkflowStage::Screening) {
            Some(StageArtifact::Screening(artifact)) => Some(artifact),
            _ => None,
        }
    }

    pub fn solicitation_review(&self) -> Option<&SolicitationAnalysis> {
        match self.artifacts.get(&WorkflowStage::SolicitationReview) {
            Some(StageArtifact::SolicitationReview(analysis)) => Some(analysis),
            _ => None,
        }
    }

    pub fn proposal(&self) -> Option<&ProposalArtifact> {
        match self.artifacts.get(&WorkflowStage::ProposalDrafting) {
            Some(StageArtifact::ProposalDrafting(artifact)) => Some(artifact),
            _ => None,
        }
    }

    pub fn pricing(&self) -> Option<&PricingArtifact> {
        match self.artifacts.get(&WorkflowStage::Pricing) {
            Some(StageArtifact::Pricing(artifact)) => Some(artifact),
            _ => None,
        }
    }

    pub(crate) fn mark_completed(&mut self, stage: WorkflowStage) {
        if !self.stages_completed.contains(&stage) {
            self.stages_completed.push(stage);
        }
        self.touch();
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Terminal snapshot of a workflow run. Immutable once returned; stage
/// errors are folded into `errors` rather than thrown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowResult {
    pub opportunity_id: String,
    pub success: bool,
    pub final_stage: WorkflowStage,
    pub stages_completed: Vec<WorkflowStage>,
    pub errors: Vec<String>,
    pub execution_time: Duration,
    pub summary: String,
}
