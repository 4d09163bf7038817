//! End-to-end proposal pipeline orchestration.
//!
//! The orchestrator executes the fixed stage sequence, persisting per-stage
//! artifacts on the workflow state and enforcing the approval gates with
//! bounded rework. External systems participate through the collaborator
//! traits.

pub mod collaborators;
mod domain;
mod orchestrator;
mod remediation;

pub use domain::{
    CaptureReadiness, GateArtifact, PricingArtifact, ProposalArtifact, ReworkRecord, RunOptions,
    ScreeningArtifact, StageArtifact, SubmissionArtifact, WorkflowResult, WorkflowStage,
    WorkflowState,
};
pub use orchestrator::{StageError, WorkflowOrchestrator};
