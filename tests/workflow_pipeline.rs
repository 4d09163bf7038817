//! Full pipeline runs against stub collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Duration, Utc};
use govcon_pipeline::config::GatePolicy;
use govcon_pipeline::workflows::approvals::{ColorTeamTrend, GateName};
use govcon_pipeline::workflows::pipeline::collaborators::{
    CollaboratorError, CommunicationDraft, CommunicationKind, CommunicationsDrafter,
    ComplianceMatrixEntry, ComplianceStatus, LaborLine, PricingEstimate, PricingEstimator,
    PricingRequest, ProposalDraft, ProposalDrafter, ProposalVolume, Requirement,
    SolicitationAnalysis, SolicitationReviewer, SubmissionContext, WorkflowDigest,
    WorkflowSummarizer,
};
use govcon_pipeline::workflows::pipeline::{
    CaptureReadiness, RunOptions, StageArtifact, WorkflowOrchestrator, WorkflowStage,
};
use govcon_pipeline::workflows::scoring::{
    BidScoringEngine, Opportunity, ScoringConfig, SetAside,
};

struct StubReviewer {
    calls: Arc<AtomicUsize>,
}

impl SolicitationReviewer for StubReviewer {
    async fn analyze(
        &self,
        _document_text: &str,
        _set_aside: Option<SetAside>,
    ) -> Result<SolicitationAnalysis, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(SolicitationAnalysis {
            requirements: vec![Requirement {
                id: "R-1".to_string(),
                text: "Provide enterprise zero trust support".to_string(),
            }],
            compliance_matrix: vec![ComplianceMatrixEntry {
                requirement_id: "R-1".to_string(),
                requirement_text: "Provide enterprise zero trust support".to_string(),
                proposal_section: Some("Technical Volume".to_string()),
                status: ComplianceStatus::Approved,
            }],
            total_requirements: 1,
        })
    }
}

struct StubDrafter {
    calls: Arc<AtomicUsize>,
}

impl ProposalDrafter for StubDrafter {
    async fn generate(
        &self,
        _opportunity_title: &str,
        _requirements: &[Requirement],
        _set_aside: Option<SetAside>,
        _agency: &str,
    ) -> Result<ProposalDraft, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ProposalDraft {
            volumes: vec![
                ProposalVolume {
                    name: "Technical Volume".to_string(),
                    page_count: 30,
                },
                ProposalVolume {
                    name: "Price Volume".to_string(),
                    page_count: 10,
                },
            ],
            quality_score: 88.0,
            compliance_score: 97.0,
            color_team_trend: Some(ColorTeamTrend::Improving),
            red_team_findings: Vec::new(),
            staffing_plan: vec![LaborLine {
                category: "Systems Engineer".to_string(),
                estimated_hours: 1920.0,
            }],
        })
    }
}

struct StubPricer {
    calls: Arc<AtomicUsize>,
}

impl PricingEstimator for StubPricer {
    async fn price(
        &self,
        _request: &PricingRequest,
    ) -> Result<PricingEstimate, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PricingEstimate {
            total_cost: 2_400_000.0,
            confidence: 0.95,
        })
    }
}

struct StubComms;

impl CommunicationsDrafter for StubComms {
    async fn draft(
        &self,
        _kind: CommunicationKind,
        context: &SubmissionContext,
    ) -> Result<CommunicationDraft, CollaboratorError> {
        Ok(CommunicationDraft {
            subject: format!("Proposal Submission - {}", context.solicitation_number),
            content: "Please find our proposal attached.".to_string(),
        })
    }
}

struct StubSummarizer;

impl WorkflowSummarizer for StubSummarizer {
    async fn summarize(&self, digest: &WorkflowDigest) -> Result<String, CollaboratorError> {
        Ok(format!(
            "Workflow for {} completed {} stages.",
            digest.opportunity_id,
            digest.stages_completed.len()
        ))
    }
}

struct FailingSummarizer;

impl WorkflowSummarizer for FailingSummarizer {
    async fn summarize(&self, _digest: &WorkflowDigest) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::new("summarizer", "model unavailable"))
    }
}

struct Counters {
    reviewer: Arc<AtomicUsize>,
    drafter: Arc<AtomicUsize>,
    pricer: Arc<AtomicUsize>,
}

fn orchestrator(
    policy: GatePolicy,
    scoring: ScoringConfig,
) -> (
    WorkflowOrchestrator<StubReviewer, StubDrafter, StubPricer, StubComms, StubSummarizer>,
    Counters,
) {
    let counters = Counters {
        reviewer: Arc::new(AtomicUsize::new(0)),
        drafter: Arc::new(AtomicUsize::new(0)),
        pricer: Arc::new(AtomicUsize::new(0)),
    };
    let engine = BidScoringEngine::new(scoring).expect("scoring config is valid");
    let orchestrator = WorkflowOrchestrator::new(
        engine,
        policy,
        StubReviewer {
            calls: counters.reviewer.clone(),
        },
        StubDrafter {
            calls: counters.drafter.clone(),
        },
        StubPricer {
            calls: counters.pricer.clone(),
        },
        StubComms,
        StubSummarizer,
    );
    (orchestrator, counters)
}

fn bid_opportunity() -> Opportunity {
    let now = Utc::now();
    Opportunity {
        id: "opp-001".to_string(),
        solicitation_number: "36C10B25R0042".to_string(),
        title: "Enterprise Cybersecurity Support Services".to_string(),
        description: Some(
            "Zero trust architecture implementation and help desk support. \
             Remote work authorized."
                .to_string(),
        ),
        agency: "VA".to_string(),
        set_aside: Some(SetAside::Sdvosb),
        naics_code: Some("541512".to_string()),
        psc_code: Some("D310".to_string()),
        naics_match: Some(1.0),
        psc_match: Some(1.0),
        posted_date: now - Duration::days(5),
        response_deadline: Some(now + Duration::days(45)),
        estimated_value: Some(3_500_000.0),
        place_of_performance: Some("Washington, DC".to_string()),
        shapeable: false,
    }
}

fn ready_readiness() -> CaptureReadiness {
    CaptureReadiness {
        capture_plan_ready: true,
        compliance_outline_ready: true,
        staffing_plan_ready: true,
        kickoff_schedule_confirmed: true,
        risk_register: Vec::new(),
        mitigations: Vec::new(),
    }
}

#[tokio::test]
async fn full_pipeline_completes_with_gold_team_rework() {
    let (mut orchestrator, counters) =
        orchestrator(GatePolicy::default(), ScoringConfig::default());
    let opportunity = bid_opportunity();

    let result = orchestrator
        .run_workflow(
            &opportunity,
            RunOptions {
                readiness: ready_readiness(),
                ..RunOptions::default()
            },
        )
        .await;

    assert!(result.success, "errors: {:?}", result.errors);
    assert_eq!(result.final_stage, WorkflowStage::Submission);
    assert_eq!(
        result.stages_completed,
        WorkflowStage::ordered().to_vec()
    );
    assert_eq!(counters.reviewer.load(Ordering::SeqCst), 1);
    assert_eq!(counters.drafter.load(Ordering::SeqCst), 1);
    assert_eq!(counters.pricer.load(Ordering::SeqCst), 1);

    let state = orchestrator.state("opp-001").expect("state recorded");
    match state.artifacts.get(&WorkflowStage::PinkTeam) {
        Some(StageArtifact::PinkTeam(gate)) => assert_eq!(gate.attempts, 1),
        other => panic!("expected pink team artifact, got {other:?}"),
    }
    // First Gold Team pass always finds the final-readiness flags unset, so
    // one rework round is expected even for a clean draft.
    match state.artifacts.get(&WorkflowStage::GoldTeam) {
        Some(StageArtifact::GoldTeam(gate)) => assert_eq!(gate.attempts, 2),
        other => panic!("expected gold team artifact, got {other:?}"),
    }
    assert_eq!(state.rework_history.len(), 1);
    assert_eq!(state.rework_history[0].gate, GateName::GoldTeam);
    assert!(state.approval_gates_pending.is_empty());
}

#[tokio::test]
async fn no_bid_aborts_before_any_collaborator_runs() {
    let mut scoring = ScoringConfig::default();
    scoring.certifications = vec![SetAside::Wosb];
    let (mut orchestrator, counters) = orchestrator(GatePolicy::default(), scoring);

    let result = orchestrator
        .run_workflow(&bid_opportunity(), RunOptions::default())
        .await;

    assert!(!result.success);
    assert_eq!(result.final_stage, WorkflowStage::Screening);
    assert!(result.stages_completed.is_empty());
    assert!(result
        .errors
        .iter()
        .any(|error| error.contains("NO_BID")));
    assert_eq!(counters.reviewer.load(Ordering::SeqCst), 0);
    assert_eq!(counters.drafter.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn no_bid_screening_is_overridden_by_auto_approve() {
    let mut scoring = ScoringConfig::default();
    scoring.certifications = vec![SetAside::Wosb];
    let (mut orchestrator, _counters) = orchestrator(GatePolicy::default(), scoring);

    let result = orchestrator
        .run_workflow(
            &bid_opportunity(),
            RunOptions {
                auto_approve: true,
                ..RunOptions::default()
            },
        )
        .await;

    assert!(result.success, "errors: {:?}", result.errors);
    assert_eq!(result.stages_completed.len(), 7);
}

#[tokio::test]
async fn pink_team_revise_aborts_when_attempts_are_exhausted() {
    let policy = GatePolicy {
        pink_team_max_attempts: 1,
        ..GatePolicy::default()
    };
    let (mut orchestrator, counters) = orchestrator(policy, ScoringConfig::default());

    let mut readiness = ready_readiness();
    readiness.capture_plan_ready = false;

    let result = orchestrator
        .run_workflow(
            &bid_opportunity(),
            RunOptions {
                readiness,
                ..RunOptions::default()
            },
        )
        .await;

    assert!(!result.success);
    assert_eq!(result.final_stage, WorkflowStage::PinkTeam);
    assert!(result
        .errors
        .iter()
        .any(|error| error.contains("pink_team")));
    assert_eq!(counters.reviewer.load(Ordering::SeqCst), 0);

    let state = orchestrator.state("opp-001").expect("state recorded");
    assert!(state.stages_failed.contains(&WorkflowStage::PinkTeam));
    assert_eq!(state.rework_history.len(), 1);
}

#[tokio::test]
async fn pink_team_rework_converges_within_the_attempt_budget() {
    let (mut orchestrator, _counters) =
        orchestrator(GatePolicy::default(), ScoringConfig::default());

    let mut readiness = ready_readiness();
    readiness.staffing_plan_ready = false;

    let result = orchestrator
        .run_workflow(
            &bid_opportunity(),
            RunOptions {
                readiness,
                ..RunOptions::default()
            },
        )
        .await;

    assert!(result.success, "errors: {:?}", result.errors);

    let state = orchestrator.state("opp-001").expect("state recorded");
    match state.artifacts.get(&WorkflowStage::PinkTeam) {
        Some(StageArtifact::PinkTeam(gate)) => assert_eq!(gate.attempts, 2),
        other => panic!("expected pink team artifact, got {other:?}"),
    }
    assert_eq!(state.rework_history[0].gate, GateName::PinkTeam);
    assert_eq!(state.rework_history[0].attempt, 1);
    // Remediation is reflected back into the screening artifact.
    let screening = state.screening().expect("screening artifact");
    assert!(screening.readiness.staffing_plan_ready);
}

#[tokio::test]
async fn resume_from_pricing_trusts_earlier_stages() {
    let (mut orchestrator, counters) =
        orchestrator(GatePolicy::default(), ScoringConfig::default());

    let result = orchestrator
        .run_workflow(
            &bid_opportunity(),
            RunOptions {
                start_from: Some(WorkflowStage::Pricing),
                ..RunOptions::default()
            },
        )
        .await;

    assert!(result.success, "errors: {:?}", result.errors);
    assert_eq!(result.stages_completed.len(), 7);
    // Trusted stages are marked complete without re-running collaborators.
    assert_eq!(counters.reviewer.load(Ordering::SeqCst), 0);
    assert_eq!(counters.drafter.load(Ordering::SeqCst), 0);
    assert_eq!(counters.pricer.load(Ordering::SeqCst), 1);

    let state = orchestrator.state("opp-001").expect("state recorded");
    assert!(state.screening().is_none());
    assert!(state.proposal().is_none());
    assert!(state.pricing().is_some());
    // Gold Team falls back to assumed readiness and needs one rework round.
    match state.artifacts.get(&WorkflowStage::GoldTeam) {
        Some(StageArtifact::GoldTeam(gate)) => assert_eq!(gate.attempts, 2),
        other => panic!("expected gold team artifact, got {other:?}"),
    }
}

#[tokio::test]
async fn auto_approve_skips_gate_evaluation_entirely() {
    let (mut orchestrator, counters) =
        orchestrator(GatePolicy::default(), ScoringConfig::default());

    let result = orchestrator
        .run_workflow(
            &bid_opportunity(),
            RunOptions {
                auto_approve: true,
                start_from: Some(WorkflowStage::GoldTeam),
                ..RunOptions::default()
            },
        )
        .await;

    assert!(result.success, "errors: {:?}", result.errors);
    assert!(result.errors.is_empty());
    assert_eq!(counters.drafter.load(Ordering::SeqCst), 0);

    let state = orchestrator.state("opp-001").expect("state recorded");
    assert!(!state.artifacts.contains_key(&WorkflowStage::GoldTeam));
    assert!(state.artifacts.contains_key(&WorkflowStage::Submission));
    assert!(state.rework_history.is_empty());
}

#[tokio::test]
async fn summarizer_failure_degrades_to_a_placeholder() {
    let engine =
        BidScoringEngine::new(ScoringConfig::default()).expect("scoring config is valid");
    let mut orchestrator = WorkflowOrchestrator::new(
        engine,
        GatePolicy::default(),
        StubReviewer {
            calls: Arc::new(AtomicUsize::new(0)),
        },
        StubDrafter {
            calls: Arc::new(AtomicUsize::new(0)),
        },
        StubPricer {
            calls: Arc::new(AtomicUsize::new(0)),
        },
        StubComms,
        FailingSummarizer,
    );

    let result = orchestrator
        .run_workflow(
            &bid_opportunity(),
            RunOptions {
                readiness: ready_readiness(),
                ..RunOptions::default()
            },
        )
        .await;

    assert!(result.success, "errors: {:?}", result.errors);
    assert!(result.summary.contains("Workflow summary unavailable"));
}
