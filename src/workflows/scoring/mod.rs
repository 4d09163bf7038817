//! Deterministic bid/no-bid scoring for screened opportunities.

mod config;
mod domain;
mod factors;

pub use config::{ScoreWeights, ScoringConfig, ScoringConfigError};
pub use domain::{BidScore, FactorScore, Opportunity, Recommendation, SetAside};

use chrono::{DateTime, Utc};
use tracing::info;

/// Stateless engine applying the configured rubric to opportunity facts.
///
/// Scoring is a total function over its input: malformed or missing optional
/// fields degrade to the neutral defaults documented per factor, never to an
/// error.
pub struct BidScoringEngine {
    config: ScoringConfig,
}

impl BidScoringEngine {
    /// Build an engine, validating the weight sum once up front.
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score an opportunity as of the supplied instant. The clock is an
    /// explicit input so identical facts always produce identical scores.
    pub fn score(&self, opportunity: &Opportunity, as_of: DateTime<Utc>) -> BidScore {
        info!(
            solicitation = %opportunity.solicitation_number,
            "scoring opportunity"
        );

        let (set_aside, signals) =
            factors::score_set_aside_eligibility(opportunity, &self.config);
        let scope = factors::score_scope_alignment(opportunity, &self.config);
        let timeline = factors::score_timeline_feasibility(opportunity, as_of);
        let competition = factors::score_competition(opportunity);
        let staffing = factors::score_staffing_realism(opportunity);
        let pricing = factors::score_pricing_realism(opportunity);
        let strategic = factors::score_strategic_fit(opportunity, &self.config);

        let weights = &self.config.weights;
        let total_score = set_aside.score * f64::from(weights.set_aside) / 100.0
            + scope.score * f64::from(weights.scope) / 100.0
            + timeline.score * f64::from(weights.timeline) / 100.0
            + competition.score * f64::from(weights.competition) / 100.0
            + staffing.score * f64::from(weights.staffing) / 100.0
            + pricing.score * f64::from(weights.pricing) / 100.0
            + strategic.score * f64::from(weights.strategic) / 100.0;

        // Hard blockers short-circuit regardless of the weighted total.
        let hard_blocker = set_aside.score == 0.0 || timeline.score == 0.0;
        let recommendation = if hard_blocker || timeline.score < 30.0 {
            Recommendation::NoBid
        } else if total_score >= 80.0 {
            Recommendation::Bid
        } else {
            Recommendation::Review
        };

        let rationale = compose_rationale(&[
            ("Set-aside", &set_aside),
            ("Scope", &scope),
            ("Timeline", &timeline),
            ("Competition", &competition),
            ("Staffing", &staffing),
            ("Pricing", &pricing),
            ("Strategic", &strategic),
        ]);

        info!(
            total_score,
            recommendation = recommendation.label(),
            "scoring complete"
        );

        BidScore {
            set_aside_score: set_aside.score,
            scope_score: scope.score,
            timeline_score: timeline.score,
            competition_score: competition.score,
            staffing_score: staffing.score,
            pricing_score: pricing.score,
            strategic_score: strategic.score,
            total_score,
            recommendation,
            rationale,
            is_va_procurement: signals.is_va_procurement,
            requires_vetcert: signals.requires_vetcert,
            high_priority: total_score >= 85.0,
        }
    }
}

fn compose_rationale(entries: &[(&str, &FactorScore)]) -> String {
    entries
        .iter()
        .map(|(name, factor)| {
            if factor.notes.is_empty() {
                format!("{name} {:.0}", factor.score)
            } else {
                format!("{name} {:.0}: {}", factor.score, factor.notes.join("; "))
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
