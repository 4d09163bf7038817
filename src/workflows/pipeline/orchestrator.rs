use super::collaborators::{
    CollaboratorError, CommunicationKind, CommunicationsDrafter, PricingEstimator, PricingRequest,
    ProposalDrafter, SolicitationReviewer, SubmissionContext, WorkflowDigest, WorkflowSummarizer,
};
use super::domain::{
    GateArtifact, PricingArtifact, ProposalArtifact, ReworkRecord, RunOptions, ScreeningArtifact,
    StageArtifact, SubmissionArtifact, WorkflowResult, WorkflowStage, WorkflowState,
};
use super::remediation;
use crate::config::GatePolicy;
use crate::workflows::approvals::{
    ApprovalDecision, ApprovalOutcome, BidScorecard, ColorTeamTrend, GateName, GoldTeamContext,
    GoldTeamGate, PinkTeamContext, PinkTeamGate, PricingReadiness, ProposalReadiness,
    RequiredAction,
};
use crate::workflows::scoring::{BidScoringEngine, Opportunity, Recommendation};
use chrono::Utc;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{info, warn};

// Assumed readiness baselines for runs resumed past the stages that would
// have produced the real artifacts.
const ASSUMED_QUALITY_SCORE: f64 = 78.0;
const ASSUMED_COMPLIANCE_SCORE: f64 = 90.0;
const ASSUMED_PRICING_CONFIDENCE: f64 = 0.82;

/// Reason a stage aborted the run. Never escapes [`WorkflowOrchestrator::run_workflow`];
/// surfaced through `WorkflowResult.errors` instead.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("bid/no-bid recommendation: NO_BID (score: {score:.2})")]
    NoBid { score: f64 },
    #[error("{gate} approval rejected. Outstanding actions: {actions}")]
    GateRejected { gate: &'static str, actions: String },
    #[error("{gate} approval attempts exhausted after {attempts}. Outstanding actions: {actions}")]
    GateAttemptsExhausted {
        gate: &'static str,
        attempts: u32,
        actions: String,
    },
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

/// Drives an opportunity through the fixed pipeline, invoking the scoring
/// engine at screening and the gate evaluators at Pink and Gold Team, with
/// bounded rework between gate attempts.
///
/// Each run owns its `WorkflowState` exclusively; callers must serialize runs
/// per opportunity. Different opportunities may run on independent
/// orchestrators concurrently.
pub struct WorkflowOrchestrator<R, D, P, C, S> {
    scoring: BidScoringEngine,
    pink_team: PinkTeamGate,
    gold_team: GoldTeamGate,
    reviewer: R,
    drafter: D,
    pricer: P,
    communications: C,
    summarizer: S,
    policy: GatePolicy,
    workflows: HashMap<String, WorkflowState>,
}

impl<R, D, P, C, S> WorkflowOrchestrator<R, D, P, C, S>
where
    R: SolicitationReviewer,
    D: ProposalDrafter,
    P: PricingEstimator,
    C: CommunicationsDrafter,
    S: WorkflowSummarizer,
{
    pub fn new(
        scoring: BidScoringEngine,
        policy: GatePolicy,
        reviewer: R,
        drafter: D,
        pricer: P,
        communications: C,
        summarizer: S,
    ) -> Self {
        Self {
            scoring,
            pink_team: PinkTeamGate,
            gold_team: GoldTeamGate,
            reviewer,
            drafter,
            pricer,
            communications,
            summarizer,
            policy,
            workflows: HashMap::new(),
        }
    }

    /// Execute the pipeline for one opportunity. Stage failures are folded
    /// into the returned result; this method never returns an error.
    pub async fn run_workflow(
        &mut self,
        opportunity: &Opportunity,
        options: RunOptions,
    ) -> WorkflowResult {
        let started = Instant::now();
        let start_stage = options.start_from.unwrap_or(WorkflowStage::Screening);

        info!(
            opportunity_id = %opportunity.id,
            start_stage = start_stage.key(),
            "starting workflow"
        );

        let mut state = WorkflowState::new(opportunity.id.clone(), start_stage);

        let order = WorkflowStage::ordered();
        let start_index = order
            .iter()
            .position(|stage| *stage == start_stage)
            .unwrap_or(0);

        // Resume semantics: prior stages are trusted as done, not verified.
        for stage in &order[..start_index] {
            state.mark_completed(*stage);
        }

        let mut run_error = None;
        for stage in &order[start_index..] {
            let step = match stage {
                WorkflowStage::Screening => {
                    self.execute_screening(&mut state, opportunity, &options)
                }
                WorkflowStage::PinkTeam => {
                    if options.auto_approve {
                        state.mark_completed(WorkflowStage::PinkTeam);
                        continue;
                    }
                    self.execute_pink_team(&mut state)
                }
                WorkflowStage::SolicitationReview => {
                    self.execute_solicitation_review(&mut state, opportunity)
                        .await
                }
                WorkflowStage::ProposalDrafting => {
                    self.execute_proposal_drafting(&mut state, opportunity).await
                }
                WorkflowStage::Pricing => self.execute_pricing(&mut state, opportunity).await,
                WorkflowStage::GoldTeam => {
                    if options.auto_approve {
                        state.mark_completed(WorkflowStage::GoldTeam);
                        continue;
                    }
                    self.execute_gold_team(&mut state)
                }
                WorkflowStage::Submission => self.execute_submission(&mut state, opportunity).await,
            };

            if let Err(err) = step {
                warn!(
                    opportunity_id = %state.opportunity_id,
                    stage = state.current_stage.key(),
                    error = %err,
                    "workflow aborted"
                );
                state.errors.push(err.to_string());
                run_error = Some(err);
                break;
            }
        }

        let success = run_error.is_none();
        let summary = self.summarize(&state, success).await;
        let result = WorkflowResult {
            opportunity_id: state.opportunity_id.clone(),
            success,
            final_stage: state.current_stage,
            stages_completed: state.stages_completed.clone(),
            errors: state.errors.clone(),
            execution_time: started.elapsed(),
            summary,
        };

        self.workflows.insert(state.opportunity_id.clone(), state);
        result
    }

    /// Current workflow state for an opportunity, if a run has recorded one.
    pub fn state(&self, opportunity_id: &str) -> Option<&WorkflowState> {
        self.workflows.get(opportunity_id)
    }

    fn execute_screening(
        &self,
        state: &mut WorkflowState,
        opportunity: &Opportunity,
        options: &RunOptions,
    ) -> Result<(), StageError> {
        info!(opportunity_id = %state.opportunity_id, "executing screening");
        state.current_stage = WorkflowStage::Screening;

        let bid_score = self.scoring.score(opportunity, Utc::now());
        let recommendation = bid_score.recommendation;
        let total_score = bid_score.total_score;

        state.artifacts.insert(
            WorkflowStage::Screening,
            StageArtifact::Screening(ScreeningArtifact {
                bid_score,
                readiness: options.readiness.clone(),
            }),
        );

        if recommendation == Recommendation::NoBid && !options.auto_approve {
            return Err(StageError::NoBid { score: total_score });
        }

        state.mark_completed(WorkflowStage::Screening);
        Ok(())
    }

    fn execute_pink_team(&self, state: &mut WorkflowState) -> Result<(), StageError> {
        info!(opportunity_id = %state.opportunity_id, "pink team approval required");
        state.current_stage = WorkflowStage::PinkTeam;
        push_pending_gate(state, GateName::PinkTeam);

        let mut context = build_pink_context(state);
        let max_attempts = self.policy.pink_team_max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let outcome = self.pink_team.evaluate(&context);
            state.touch();

            if outcome.decision == ApprovalDecision::Approved
                || !self.policy.require_pink_team_approval
            {
                info!(attempt, "pink team approved");
                clear_pending_gate(state, GateName::PinkTeam);
                state.artifacts.insert(
                    WorkflowStage::PinkTeam,
                    StageArtifact::PinkTeam(GateArtifact {
                        outcome,
                        attempts: attempt,
                    }),
                );
                state.mark_completed(WorkflowStage::PinkTeam);
                return Ok(());
            }

            let actions = join_actions(&outcome.required_actions);
            state.stages_failed.push(WorkflowStage::PinkTeam);
            state
                .errors
                .push(format!("Pink Team feedback (attempt {attempt}): {actions}"));
            record_rework(state, &outcome, attempt);
            warn!(
                attempt,
                decision = outcome.decision.label(),
                "pink team denied"
            );

            if outcome.decision == ApprovalDecision::Rejected {
                clear_pending_gate(state, GateName::PinkTeam);
                return Err(StageError::GateRejected {
                    gate: GateName::PinkTeam.key(),
                    actions,
                });
            }
            if attempt >= max_attempts {
                clear_pending_gate(state, GateName::PinkTeam);
                return Err(StageError::GateAttemptsExhausted {
                    gate: GateName::PinkTeam.key(),
                    attempts: attempt,
                    actions,
                });
            }

            context = remediation::remediate_pink(&context, &outcome);
            persist_pink_context(state, &context);
        }
    }

    async fn execute_solicitation_review(
        &self,
        state: &mut WorkflowState,
        opportunity: &Opportunity,
    ) -> Result<(), StageError> {
        info!(opportunity_id = %state.opportunity_id, "executing solicitation review");
        state.current_stage = WorkflowStage::SolicitationReview;

        // The discovery layer stores the solicitation body on the opportunity.
        let document_text = opportunity.description.as_deref().unwrap_or("");
        let analysis = self
            .reviewer
            .analyze(document_text, opportunity.set_aside)
            .await?;

        info!(
            requirements = analysis.total_requirements,
            compliance_items = analysis.compliance_matrix.len(),
            "solicitation analyzed"
        );

        state.artifacts.insert(
            WorkflowStage::SolicitationReview,
            StageArtifact::SolicitationReview(analysis),
        );
        state.mark_completed(WorkflowStage::SolicitationReview);
        Ok(())
    }

    async fn execute_proposal_drafting(
        &self,
        state: &mut WorkflowState,
        opportunity: &Opportunity,
    ) -> Result<(), StageError> {
        info!(opportunity_id = %state.opportunity_id, "executing proposal drafting");
        state.current_stage = WorkflowStage::ProposalDrafting;

        let requirements = state
            .solicitation_review()
            .map(|analysis| analysis.requirements.clone())
            .unwrap_or_default();

        let draft = self
            .drafter
            .generate(
                &opportunity.title,
                &requirements,
                opportunity.set_aside,
                &opportunity.agency,
            )
            .await?;

        info!(volumes = draft.volumes.len(), "proposal drafted");

        state.artifacts.insert(
            WorkflowStage::ProposalDrafting,
            StageArtifact::ProposalDrafting(ProposalArtifact {
                draft,
                executive_reviewed: false,
                past_performance_updated: false,
            }),
        );
        state.mark_completed(WorkflowStage::ProposalDrafting);
        Ok(())
    }

    async fn execute_pricing(
        &self,
        state: &mut WorkflowState,
        opportunity: &Opportunity,
    ) -> Result<(), StageError> {
        info!(opportunity_id = %state.opportunity_id, "executing pricing");
        state.current_stage = WorkflowStage::Pricing;

        let labor = state
            .proposal()
            .map(|artifact| artifact.draft.staffing_plan.clone())
            .unwrap_or_default();
        let request = PricingRequest {
            labor,
            locality: opportunity.place_of_performance.clone(),
        };

        let estimate = self.pricer.price(&request).await?;
        info!(total_cost = estimate.total_cost, "pricing generated");

        state.artifacts.insert(
            WorkflowStage::Pricing,
            StageArtifact::Pricing(PricingArtifact {
                estimate,
                review_completed: false,
            }),
        );
        state.mark_completed(WorkflowStage::Pricing);
        Ok(())
    }

    fn execute_gold_team(&self, state: &mut WorkflowState) -> Result<(), StageError> {
        info!(opportunity_id = %state.opportunity_id, "gold team approval required");
        state.current_stage = WorkflowStage::GoldTeam;
        push_pending_gate(state, GateName::GoldTeam);

        let mut context = build_gold_context(state);
        let max_attempts = self.policy.gold_team_max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let outcome = self.gold_team.evaluate(&context);
            state.touch();

            if outcome.decision == ApprovalDecision::Approved
                || !self.policy.require_gold_team_approval
            {
                info!(attempt, "gold team approved");
                clear_pending_gate(state, GateName::GoldTeam);
                state.artifacts.insert(
                    WorkflowStage::GoldTeam,
                    StageArtifact::GoldTeam(GateArtifact {
                        outcome,
                        attempts: attempt,
                    }),
                );
                state.mark_completed(WorkflowStage::GoldTeam);
                return Ok(());
            }

            let actions = join_actions(&outcome.required_actions);
            state.stages_failed.push(WorkflowStage::GoldTeam);
            state
                .errors
                .push(format!("Gold Team feedback (attempt {attempt}): {actions}"));
            record_rework(state, &outcome, attempt);
            warn!(
                attempt,
                decision = outcome.decision.label(),
                "gold team denied"
            );

            if outcome.decision == ApprovalDecision::Rejected {
                clear_pending_gate(state, GateName::GoldTeam);
                return Err(StageError::GateRejected {
                    gate: GateName::GoldTeam.key(),
                    actions,
                });
            }
            if attempt >= max_attempts {
                clear_pending_gate(state, GateName::GoldTeam);
                return Err(StageError::GateAttemptsExhausted {
                    gate: GateName::GoldTeam.key(),
                    attempts: attempt,
                    actions,
                });
            }

            context = remediation::remediate_gold(&context, &outcome);
            persist_gold_context(state, &context);
        }
    }

    async fn execute_submission(
        &self,
        state: &mut WorkflowState,
        opportunity: &Opportunity,
    ) -> Result<(), StageError> {
        info!(opportunity_id = %state.opportunity_id, "preparing submission");
        state.current_stage = WorkflowStage::Submission;

        let volume_names = state
            .proposal()
            .map(|artifact| {
                artifact
                    .draft
                    .volumes
                    .iter()
                    .map(|volume| volume.name.clone())
                    .collect()
            })
            .unwrap_or_default();

        let context = SubmissionContext {
            solicitation_number: opportunity.solicitation_number.clone(),
            opportunity_title: opportunity.title.clone(),
            agency: opportunity.agency.clone(),
            volume_names,
        };

        let email = self
            .communications
            .draft(CommunicationKind::SubmissionEmail, &context)
            .await?;
        info!(subject = %email.subject, "submission package prepared");

        state.artifacts.insert(
            WorkflowStage::Submission,
            StageArtifact::Submission(SubmissionArtifact { email }),
        );
        state.mark_completed(WorkflowStage::Submission);
        Ok(())
    }

    async fn summarize(&self, state: &WorkflowState, success: bool) -> String {
        let digest = WorkflowDigest {
            opportunity_id: state.opportunity_id.clone(),
            success,
            current_stage: state.current_stage.key().to_string(),
            stages_completed: state
                .stages_completed
                .iter()
                .map(|stage| stage.key().to_string())
                .collect(),
            stages_failed: state
                .stages_failed
                .iter()
                .map(|stage| stage.key().to_string())
                .collect(),
            approval_gates_pending: state
                .approval_gates_pending
                .iter()
                .map(|gate| gate.key().to_string())
                .collect(),
            errors: state.errors.clone(),
        };

        match self.summarizer.summarize(&digest).await {
            Ok(summary) => summary,
            Err(err) => {
                warn!(error = %err, "failed to summarize workflow");
                format!("Workflow summary unavailable (error: {err})")
            }
        }
    }
}

fn join_actions(actions: &[RequiredAction]) -> String {
    if actions.is_empty() {
        return "No actions supplied".to_string();
    }
    actions
        .iter()
        .map(|action| action.instruction.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn push_pending_gate(state: &mut WorkflowState, gate: GateName) {
    if !state.approval_gates_pending.contains(&gate) {
        state.approval_gates_pending.push(gate);
    }
}

fn clear_pending_gate(state: &mut WorkflowState, gate: GateName) {
    state.approval_gates_pending.retain(|pending| *pending != gate);
}

fn record_rework(state: &mut WorkflowState, outcome: &ApprovalOutcome, attempt: u32) {
    state.rework_history.push(ReworkRecord {
        gate: outcome.gate,
        attempt,
        decision: outcome.decision,
        required_actions: outcome
            .required_actions
            .iter()
            .map(|action| action.instruction.clone())
            .collect(),
        comments: outcome.comments.clone(),
        recorded_at: outcome.decided_at,
    });
}

fn build_pink_context(state: &WorkflowState) -> PinkTeamContext {
    match state.screening() {
        Some(artifact) => PinkTeamContext {
            scorecard: BidScorecard {
                total_score: artifact.bid_score.total_score,
                timeline_score: artifact.bid_score.timeline_score,
                strategic_score: artifact.bid_score.strategic_score,
            },
            capture_plan_ready: artifact.readiness.capture_plan_ready,
            risk_register: artifact.readiness.risk_register.clone(),
            mitigations: artifact.readiness.mitigations.clone(),
            compliance_outline_ready: artifact.readiness.compliance_outline_ready,
            staffing_plan_ready: artifact.readiness.staffing_plan_ready,
            kickoff_schedule_confirmed: artifact.readiness.kickoff_schedule_confirmed,
        },
        // No screening artifact on resumed runs: an all-zero scorecard fails
        // the gate rather than inventing readiness.
        None => PinkTeamContext::default(),
    }
}

fn persist_pink_context(state: &mut WorkflowState, context: &PinkTeamContext) {
    if let Some(StageArtifact::Screening(artifact)) =
        state.artifacts.get_mut(&WorkflowStage::Screening)
    {
        artifact.bid_score.total_score = context.scorecard.total_score;
        artifact.bid_score.timeline_score = context.scorecard.timeline_score;
        artifact.bid_score.strategic_score = context.scorecard.strategic_score;
        artifact.readiness.capture_plan_ready = context.capture_plan_ready;
        artifact.readiness.compliance_outline_ready = context.compliance_outline_ready;
        artifact.readiness.staffing_plan_ready = context.staffing_plan_ready;
        artifact.readiness.kickoff_schedule_confirmed = context.kickoff_schedule_confirmed;
        artifact.readiness.risk_register = context.risk_register.clone();
        artifact.readiness.mitigations = context.mitigations.clone();
    }
    state.touch();
}

fn build_gold_context(state: &WorkflowState) -> GoldTeamContext {
    let proposal = state.proposal();
    let pricing = state.pricing();

    let proposal_readiness = ProposalReadiness {
        quality_score: proposal
            .map(|artifact| artifact.draft.quality_score)
            .unwrap_or(ASSUMED_QUALITY_SCORE),
        compliance_score: proposal
            .map(|artifact| artifact.draft.compliance_score)
            .unwrap_or(ASSUMED_COMPLIANCE_SCORE),
        color_team_trend: proposal
            .and_then(|artifact| artifact.draft.color_team_trend)
            .or(Some(ColorTeamTrend::Declining)),
    };

    let pricing_readiness = PricingReadiness {
        total_cost: pricing.map(|artifact| artifact.estimate.total_cost),
        confidence: pricing
            .map(|artifact| artifact.estimate.confidence)
            .unwrap_or(ASSUMED_PRICING_CONFIDENCE),
        review_completed: pricing
            .map(|artifact| artifact.review_completed)
            .unwrap_or(false),
    };

    let mut compliance_gaps: Vec<String> = state
        .solicitation_review()
        .map(|analysis| {
            analysis
                .compliance_matrix
                .iter()
                .filter(|entry| {
                    entry.status != super::collaborators::ComplianceStatus::Approved
                })
                .map(|entry| entry.requirement_id.clone())
                .collect()
        })
        .unwrap_or_default();
    if compliance_gaps.is_empty() {
        // No explicit gap tracking means open items remain prior to Gold Team.
        compliance_gaps.push("Finalize compliance matrix sign-off".to_string());
    }

    let red_team_findings_open = proposal
        .map(|artifact| artifact.draft.red_team_findings.clone())
        .unwrap_or_else(|| vec!["Narrative clarity".to_string(), "Win themes".to_string()]);

    GoldTeamContext {
        proposal: proposal_readiness,
        pricing: pricing_readiness,
        compliance_gaps,
        red_team_findings_open,
        submission_package_ready: false,
        executive_reviewed: proposal
            .map(|artifact| artifact.executive_reviewed)
            .unwrap_or(false),
        past_performance_updated: proposal
            .map(|artifact| artifact.past_performance_updated)
            .unwrap_or(false),
    }
}

fn persist_gold_context(state: &mut WorkflowState, context: &GoldTeamContext) {
    if let Some(StageArtifact::ProposalDrafting(artifact)) =
        state.artifacts.get_mut(&WorkflowStage::ProposalDrafting)
    {
        artifact.draft.quality_score = context.proposal.quality_score;
        artifact.draft.compliance_score = context.proposal.compliance_score;
        artifact.draft.color_team_trend = context.proposal.color_team_trend;
        artifact.draft.red_team_findings = context.red_team_findings_open.clone();
        artifact.executive_reviewed = context.executive_reviewed;
        artifact.past_performance_updated = context.past_performance_updated;
    }
    if let Some(StageArtifact::Pricing(artifact)) =
        state.artifacts.get_mut(&WorkflowStage::Pricing)
    {
        artifact.estimate.confidence = context.pricing.confidence;
        artifact.review_completed = context.pricing.review_completed;
    }
    state.touch();
}
