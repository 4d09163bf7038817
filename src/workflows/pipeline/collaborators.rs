//! Narrow interfaces to the systems the orchestrator delegates to.
//!
//! Document parsing, retrieval, LLM prompting, and rate lookups all live
//! behind these traits; the engine only depends on their output shapes.
//! Timeouts are each collaborator's responsibility and must surface as a
//! [`CollaboratorError`] so the orchestrator's fail-fast stage rule applies
//! uniformly.

use crate::workflows::approvals::ColorTeamTrend;
use crate::workflows::scoring::SetAside;
use serde::{Deserialize, Serialize};

/// Failure from an external collaborator; fatal to the current stage.
#[derive(Debug, thiserror::Error)]
#[error("{collaborator} collaborator failed: {reason}")]
pub struct CollaboratorError {
    pub collaborator: &'static str,
    pub reason: String,
}

impl CollaboratorError {
    pub fn new(collaborator: &'static str, reason: impl Into<String>) -> Self {
        Self {
            collaborator,
            reason: reason.into(),
        }
    }
}

/// Sign-off state of a compliance matrix row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Pending,
    InProgress,
    Approved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceMatrixEntry {
    pub requirement_id: String,
    pub requirement_text: String,
    pub proposal_section: Option<String>,
    pub status: ComplianceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub id: String,
    pub text: String,
}

/// Output of the solicitation review collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolicitationAnalysis {
    pub requirements: Vec<Requirement>,
    pub compliance_matrix: Vec<ComplianceMatrixEntry>,
    pub total_requirements: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalVolume {
    pub name: String,
    pub page_count: u32,
}

/// A labor category and hour estimate the drafter recommends for delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborLine {
    pub category: String,
    pub estimated_hours: f64,
}

/// Output of the proposal drafting collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalDraft {
    pub volumes: Vec<ProposalVolume>,
    pub quality_score: f64,
    pub compliance_score: f64,
    pub color_team_trend: Option<ColorTeamTrend>,
    pub red_team_findings: Vec<String>,
    pub staffing_plan: Vec<LaborLine>,
}

/// Inputs for the pricing collaborator, assembled from prior stage artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub labor: Vec<LaborLine>,
    pub locality: Option<String>,
}

/// Output of the pricing collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingEstimate {
    pub total_cost: f64,
    /// Confidence in the estimate, 0.0 to 1.0.
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationKind {
    SubmissionEmail,
}

/// Context handed to the communications collaborator at submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionContext {
    pub solicitation_number: String,
    pub opportunity_title: String,
    pub agency: String,
    pub volume_names: Vec<String>,
}

/// Output of the communications collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicationDraft {
    pub subject: String,
    pub content: String,
}

/// Run snapshot handed to the summarizer at the end of a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDigest {
    pub opportunity_id: String,
    pub success: bool,
    pub current_stage: String,
    pub stages_completed: Vec<String>,
    pub stages_failed: Vec<String>,
    pub approval_gates_pending: Vec<String>,
    pub errors: Vec<String>,
}

#[allow(async_fn_in_trait)]
pub trait SolicitationReviewer {
    /// Analyze a solicitation body, producing requirements and a compliance
    /// matrix.
    async fn analyze(
        &self,
        document_text: &str,
        set_aside: Option<SetAside>,
    ) -> Result<SolicitationAnalysis, CollaboratorError>;
}

#[allow(async_fn_in_trait)]
pub trait ProposalDrafter {
    async fn generate(
        &self,
        opportunity_title: &str,
        requirements: &[Requirement],
        set_aside: Option<SetAside>,
        agency: &str,
    ) -> Result<ProposalDraft, CollaboratorError>;
}

#[allow(async_fn_in_trait)]
pub trait PricingEstimator {
    async fn price(&self, request: &PricingRequest) -> Result<PricingEstimate, CollaboratorError>;
}

#[allow(async_fn_in_trait)]
pub trait CommunicationsDrafter {
    async fn draft(
        &self,
        kind: CommunicationKind,
        context: &SubmissionContext,
    ) -> Result<CommunicationDraft, CollaboratorError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkflowSummarizer {
    /// Produce a leadership-facing run summary. Failure here is tolerated:
    /// the orchestrator degrades to a placeholder and never aborts the run.
    async fn summarize(&self, digest: &WorkflowDigest) -> Result<String, CollaboratorError>;
}
