use super::domain::{
    ApprovalDecision, ApprovalOutcome, ColorTeamTrend, GateCriterion, GateName, GoldTeamContext,
    RequiredAction,
};
use chrono::Utc;

/// Final pre-submission readiness review.
pub struct GoldTeamGate;

impl GoldTeamGate {
    pub const APPROVER_ROLE: &'static str = "Executive Review Board";

    pub fn evaluate(&self, context: &GoldTeamContext) -> ApprovalOutcome {
        let mut comments = Vec::new();
        let mut required_actions = Vec::new();

        let quality = context.proposal.quality_score;
        let compliance = context.proposal.compliance_score;
        let confidence = context.pricing.confidence;

        if quality < 80.0 {
            comments.push("Proposal narrative quality below Gold Team expectation (80).".to_string());
            required_actions.push(RequiredAction::new(
                GateCriterion::ProposalQuality,
                "Address executive summary and discriminators based on color-team input.",
            ));
        }

        if compliance < 95.0 {
            comments.push("Compliance traceability below 95% coverage.".to_string());
            required_actions.push(RequiredAction::new(
                GateCriterion::ComplianceCoverage,
                "Close compliance gaps and update matrix sign-off.",
            ));
        }

        if confidence < 0.9 {
            comments.push("Pricing confidence below target (90%).".to_string());
            required_actions.push(RequiredAction::new(
                GateCriterion::PricingConfidence,
                "Validate pricing model with pricing lead and refresh cost realism analysis.",
            ));
        }

        if !context.compliance_gaps.is_empty() {
            comments.push("Open compliance gaps detected.".to_string());
            required_actions.extend(context.compliance_gaps.iter().map(|gap| {
                RequiredAction::new(
                    GateCriterion::ComplianceGap,
                    format!("Resolve compliance gap: {gap}"),
                )
            }));
        }

        if !context.red_team_findings_open.is_empty() {
            comments.push("Outstanding red team findings remain open.".to_string());
            required_actions.extend(context.red_team_findings_open.iter().map(|finding| {
                RequiredAction::new(
                    GateCriterion::RedTeamFinding,
                    format!("Close red team finding: {finding}"),
                )
            }));
        }

        if !context.submission_package_ready {
            comments.push(
                "Submission package incomplete (forms, attachments, portal readiness).".to_string(),
            );
            required_actions.push(RequiredAction::new(
                GateCriterion::SubmissionPackage,
                "Complete submission checklist and validate upload credentials.",
            ));
        }

        if !context.executive_reviewed {
            comments.push("Executive sponsor has not signed off on final content.".to_string());
            required_actions.push(RequiredAction::new(
                GateCriterion::ExecutiveReview,
                "Secure executive approval for pricing, staffing, and risks.",
            ));
        }

        if !context.past_performance_updated {
            comments.push("Past performance references not refreshed.".to_string());
            required_actions.push(RequiredAction::new(
                GateCriterion::PastPerformance,
                "Update past performance narratives and customer POCs.",
            ));
        }

        if context.proposal.color_team_trend == Some(ColorTeamTrend::Declining) {
            comments.push("Color-team trend indicates declining confidence.".to_string());
            required_actions.push(RequiredAction::new(
                GateCriterion::ColorTeamTrend,
                "Review color-team findings and incorporate remediation actions.",
            ));
        }

        let decision = if compliance < 85.0 || quality < 70.0 {
            ApprovalDecision::Rejected
        } else if !required_actions.is_empty() {
            ApprovalDecision::Revise
        } else {
            comments.push(
                "Proposal package is ready for submission pending final production.".to_string(),
            );
            ApprovalDecision::Approved
        };

        ApprovalOutcome {
            gate: GateName::GoldTeam,
            decision,
            approver: Self::APPROVER_ROLE.to_string(),
            decided_at: Utc::now(),
            comments,
            required_actions,
        }
    }
}
