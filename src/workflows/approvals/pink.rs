use super::domain::{
    ApprovalDecision, ApprovalOutcome, GateCriterion, GateName, PinkTeamContext, RequiredAction,
};
use chrono::Utc;

/// Evaluates capture readiness before solicitation work begins.
///
/// Evaluation is deterministic and side-effect-free: identical context yields
/// identical comments, actions, and decision, differing only in `decided_at`.
pub struct PinkTeamGate;

impl PinkTeamGate {
    pub const APPROVER_ROLE: &'static str = "Capture Director";

    pub fn evaluate(&self, context: &PinkTeamContext) -> ApprovalOutcome {
        let mut comments = Vec::new();
        let mut required_actions = Vec::new();

        let scorecard = context.scorecard;

        if scorecard.total_score < 70.0 {
            comments.push(
                "Composite bid score below Pink Team threshold (70). Additional capture rigor required."
                    .to_string(),
            );
            required_actions.push(RequiredAction::new(
                GateCriterion::CompositeBidScore,
                "Revisit capture strategy to raise bid score above 70.",
            ));
        }

        if scorecard.timeline_score < 60.0 {
            comments.push(
                "Response timeline risk identified; insufficient runway for execution.".to_string(),
            );
            required_actions.push(RequiredAction::new(
                GateCriterion::TimelineRunway,
                "Produce a compressed execution schedule with clear decision gates.",
            ));
        }

        if scorecard.strategic_score < 60.0 {
            comments.push("Strategic alignment is weak against portfolio priorities.".to_string());
            required_actions.push(RequiredAction::new(
                GateCriterion::StrategicAlignment,
                "Document clear differentiators and executive sponsorship commitment.",
            ));
        }

        if !context.risk_register.is_empty() && context.mitigations.is_empty() {
            comments.push("Risks logged without mitigation plans.".to_string());
            required_actions.push(RequiredAction::new(
                GateCriterion::RiskMitigations,
                "Add mitigation owners and due dates to risk register.",
            ));
        }

        if !context.capture_plan_ready {
            comments.push("Capture plan not baselined.".to_string());
            required_actions.push(RequiredAction::new(
                GateCriterion::CapturePlan,
                "Publish capture plan with approved pursuit strategy.",
            ));
        }

        if !context.compliance_outline_ready {
            comments.push("Compliance outline not prepared for proposal team.".to_string());
            required_actions.push(RequiredAction::new(
                GateCriterion::ComplianceOutline,
                "Draft compliance outline covering Sections C, L, and M.",
            ));
        }

        if !context.staffing_plan_ready {
            comments.push("Staffing plan incomplete; key personnel coverage unclear.".to_string());
            required_actions.push(RequiredAction::new(
                GateCriterion::StaffingPlan,
                "Finalize staffing plan with named leads and availability.",
            ));
        }

        if !context.kickoff_schedule_confirmed {
            comments.push("Kickoff schedule not confirmed with stakeholders.".to_string());
            required_actions.push(RequiredAction::new(
                GateCriterion::KickoffSchedule,
                "Lock Pink Team to Gold Team calendar with key deliverable dates.",
            ));
        }

        let decision = if scorecard.total_score < 55.0 || required_actions.len() >= 4 {
            ApprovalDecision::Rejected
        } else if !required_actions.is_empty() {
            ApprovalDecision::Revise
        } else {
            comments
                .push("Capture is ready to proceed to detailed solicitation review.".to_string());
            ApprovalDecision::Approved
        };

        ApprovalOutcome {
            gate: GateName::PinkTeam,
            decision,
            approver: Self::APPROVER_ROLE.to_string(),
            decided_at: Utc::now(),
            comments,
            required_actions,
        }
    }
}
