//! Deterministic remediation applied between gate attempts.
//!
//! The transform models leadership acting on gate feedback without a human in
//! the loop: it raises exactly the readiness signals the outcome named, using
//! the floors below, and never invents new content. Rule-based gates would
//! otherwise re-evaluate an unchanged context forever.

use crate::workflows::approvals::{
    ApprovalOutcome, ColorTeamTrend, GateCriterion, GoldTeamContext, PinkTeamContext,
};

const PINK_TOTAL_FLOOR: f64 = 82.0;
const PINK_TIMELINE_FLOOR: f64 = 65.0;
const PINK_STRATEGIC_FLOOR: f64 = 72.0;

const GOLD_QUALITY_FLOOR: f64 = 85.0;
const GOLD_COMPLIANCE_FLOOR: f64 = 98.0;
const GOLD_CONFIDENCE_FLOOR: f64 = 0.95;

/// Produce the Pink Team context for the next attempt.
pub(crate) fn remediate_pink(
    context: &PinkTeamContext,
    outcome: &ApprovalOutcome,
) -> PinkTeamContext {
    let mut next = context.clone();

    for action in &outcome.required_actions {
        match action.criterion {
            GateCriterion::CompositeBidScore => {
                next.scorecard.total_score = next.scorecard.total_score.max(PINK_TOTAL_FLOOR);
            }
            GateCriterion::TimelineRunway => {
                next.scorecard.timeline_score =
                    next.scorecard.timeline_score.max(PINK_TIMELINE_FLOOR);
            }
            GateCriterion::StrategicAlignment => {
                next.scorecard.strategic_score =
                    next.scorecard.strategic_score.max(PINK_STRATEGIC_FLOOR);
            }
            GateCriterion::RiskMitigations => {
                // Mitigations absorb the gate's own instructions so every
                // logged risk has a recorded response.
                if !next.mitigations.contains(&action.instruction) {
                    next.mitigations.push(action.instruction.clone());
                }
            }
            GateCriterion::CapturePlan => next.capture_plan_ready = true,
            GateCriterion::ComplianceOutline => next.compliance_outline_ready = true,
            GateCriterion::StaffingPlan => next.staffing_plan_ready = true,
            GateCriterion::KickoffSchedule => next.kickoff_schedule_confirmed = true,
            _ => {}
        }
    }

    next
}

/// Produce the Gold Team context for the next attempt.
pub(crate) fn remediate_gold(
    context: &GoldTeamContext,
    outcome: &ApprovalOutcome,
) -> GoldTeamContext {
    let mut next = context.clone();

    for action in &outcome.required_actions {
        match action.criterion {
            GateCriterion::ProposalQuality => {
                next.proposal.quality_score = next.proposal.quality_score.max(GOLD_QUALITY_FLOOR);
            }
            GateCriterion::ComplianceCoverage => {
                next.proposal.compliance_score =
                    next.proposal.compliance_score.max(GOLD_COMPLIANCE_FLOOR);
            }
            GateCriterion::PricingConfidence => {
                next.pricing.confidence = next.pricing.confidence.max(GOLD_CONFIDENCE_FLOOR);
                next.pricing.review_completed = true;
            }
            GateCriterion::ComplianceGap => next.compliance_gaps.clear(),
            GateCriterion::RedTeamFinding => next.red_team_findings_open.clear(),
            GateCriterion::SubmissionPackage => next.submission_package_ready = true,
            GateCriterion::ExecutiveReview => next.executive_reviewed = true,
            GateCriterion::PastPerformance => next.past_performance_updated = true,
            GateCriterion::ColorTeamTrend => {
                next.proposal.color_team_trend = Some(ColorTeamTrend::Improving);
            }
            _ => {}
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::approvals::{
        BidScorecard, GoldTeamGate, PinkTeamGate, PricingReadiness, ProposalReadiness,
    };

    #[test]
    fn pink_remediation_raises_only_named_signals() {
        let context = PinkTeamContext {
            scorecard: BidScorecard {
                total_score: 72.0,
                timeline_score: 58.0,
                strategic_score: 68.0,
            },
            capture_plan_ready: true,
            risk_register: Vec::new(),
            mitigations: Vec::new(),
            compliance_outline_ready: true,
            staffing_plan_ready: false,
            kickoff_schedule_confirmed: true,
        };
        let outcome = PinkTeamGate.evaluate(&context);
        let next = remediate_pink(&context, &outcome);

        assert_eq!(next.scorecard.timeline_score, 65.0);
        assert!(next.staffing_plan_ready);
        // Untouched signals keep their values.
        assert_eq!(next.scorecard.total_score, 72.0);
        assert_eq!(next.scorecard.strategic_score, 68.0);
        assert!(next.capture_plan_ready);

        assert_eq!(
            PinkTeamGate.evaluate(&next).decision,
            crate::workflows::approvals::ApprovalDecision::Approved
        );
    }

    #[test]
    fn gold_remediation_closes_gaps_and_findings() {
        let context = GoldTeamContext {
            proposal: ProposalReadiness {
                quality_score: 78.0,
                compliance_score: 90.0,
                color_team_trend: Some(ColorTeamTrend::Declining),
            },
            pricing: PricingReadiness {
                total_cost: Some(1_000_000.0),
                confidence: 0.82,
                review_completed: false,
            },
            compliance_gaps: vec!["Finalize compliance matrix sign-off".to_string()],
            red_team_findings_open: vec!["Narrative clarity".to_string()],
            submission_package_ready: false,
            executive_reviewed: false,
            past_performance_updated: false,
        };
        let outcome = GoldTeamGate.evaluate(&context);
        let next = remediate_gold(&context, &outcome);

        assert_eq!(next.proposal.quality_score, 85.0);
        assert_eq!(next.proposal.compliance_score, 98.0);
        assert_eq!(next.pricing.confidence, 0.95);
        assert!(next.pricing.review_completed);
        assert!(next.compliance_gaps.is_empty());
        assert!(next.red_team_findings_open.is_empty());
        assert_eq!(next.proposal.color_team_trend, Some(ColorTeamTrend::Improving));

        assert_eq!(
            GoldTeamGate.evaluate(&next).decision,
            crate::workflows::approvals::ApprovalDecision::Approved
        );
    }
}
