use super::config::ScoringConfig;
use super::domain::{FactorScore, Opportunity, SetAside};
use chrono::{DateTime, Utc};

/// Flags surfaced by the set-aside factor and carried onto the final score.
pub(crate) struct SetAsideSignals {
    pub is_va_procurement: bool,
    pub requires_vetcert: bool,
}

fn clamp(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

fn is_va_agency(agency: &str) -> bool {
    let upper = agency.to_uppercase();
    upper.contains("VA") || upper.contains("VETERAN")
}

/// Set-aside eligibility. An uncertified SDVOSB/VOSB requirement scores zero
/// and acts as a hard blocker downstream.
pub(crate) fn score_set_aside_eligibility(
    opportunity: &Opportunity,
    config: &ScoringConfig,
) -> (FactorScore, SetAsideSignals) {
    let is_va = is_va_agency(&opportunity.agency);
    let certified = |set_aside: SetAside| config.certifications.contains(&set_aside);

    let factor = match opportunity.set_aside {
        None => FactorScore::new(40.0).note("Open competition - no set-aside preference"),
        Some(SetAside::Sdvosb) => {
            if certified(SetAside::Sdvosb) {
                let factor = FactorScore::new(100.0).note("SDVOSB set-aside - perfect match");
                if is_va {
                    factor.note("VA procurement - Vets First applies")
                } else {
                    factor
                }
            } else {
                FactorScore::new(0.0).note("SDVOSB required but certification is not held")
            }
        }
        Some(SetAside::Vosb) => {
            if certified(SetAside::Vosb) || certified(SetAside::Sdvosb) {
                let factor = FactorScore::new(90.0).note("VOSB set-aside - strong match");
                if is_va {
                    factor.note("VA procurement - Vets First applies")
                } else {
                    factor
                }
            } else {
                FactorScore::new(0.0).note("VOSB required but certification is not held")
            }
        }
        Some(SetAside::SmallBusiness) => {
            if certified(SetAside::SmallBusiness) {
                FactorScore::new(75.0).note("Small Business set-aside - good match")
            } else {
                FactorScore::new(30.0).note("SB set-aside without certification")
            }
        }
        Some(other) => {
            FactorScore::new(50.0).note(format!("Other set-aside type: {}", other.label()))
        }
    };

    let requires_vetcert = is_va
        && matches!(
            opportunity.set_aside,
            Some(SetAside::Sdvosb) | Some(SetAside::Vosb)
        );

    (
        factor,
        SetAsideSignals {
            is_va_procurement: is_va,
            requires_vetcert,
        },
    )
}

/// Scope alignment from NAICS/PSC match ratios plus a capped keyword boost.
pub(crate) fn score_scope_alignment(
    opportunity: &Opportunity,
    config: &ScoringConfig,
) -> FactorScore {
    let naics_match = opportunity.naics_match.unwrap_or(0.0);
    let psc_match = opportunity.psc_match.unwrap_or(0.0);
    let base_score = naics_match * 60.0 + psc_match * 40.0;

    let combined_text = format!(
        "{} {}",
        opportunity.title,
        opportunity.description.as_deref().unwrap_or("")
    )
    .to_lowercase();

    let keyword_matches: Vec<&str> = config
        .capability_keywords
        .iter()
        .map(String::as_str)
        .filter(|keyword| combined_text.contains(*keyword))
        .collect();

    let score = if keyword_matches.is_empty() {
        base_score
    } else {
        let boost = (keyword_matches.len() as f64 * 5.0).min(20.0);
        (base_score + boost).min(100.0)
    };

    let mut factor = FactorScore::new(clamp(score))
        .note(format!("NAICS match: {naics_match:.2}"))
        .note(format!("PSC match: {psc_match:.2}"));
    if !keyword_matches.is_empty() {
        factor = factor.note(format!("Keyword matches: {}", keyword_matches.join(", ")));
    }
    factor
}

/// Timeline feasibility banded by days remaining until the response deadline.
pub(crate) fn score_timeline_feasibility(
    opportunity: &Opportunity,
    as_of: DateTime<Utc>,
) -> FactorScore {
    let Some(deadline) = opportunity.response_deadline else {
        return FactorScore::new(50.0).note("No deadline specified - unknown timeline");
    };

    let days_until_deadline = (deadline - as_of).num_days();
    let days_open = (deadline - opportunity.posted_date).num_days();

    let factor = if days_until_deadline < 0 {
        FactorScore::new(0.0).note("Deadline has passed")
    } else if days_until_deadline < 7 {
        FactorScore::new(20.0).note(format!(
            "Only {days_until_deadline} days until deadline - very tight"
        ))
    } else if days_until_deadline < 14 {
        FactorScore::new(50.0).note(format!(
            "{days_until_deadline} days until deadline - tight but doable"
        ))
    } else if days_until_deadline < 30 {
        FactorScore::new(80.0).note(format!(
            "{days_until_deadline} days until deadline - reasonable"
        ))
    } else {
        FactorScore::new(100.0).note(format!(
            "{days_until_deadline} days until deadline - ample time"
        ))
    };

    factor.note(format!("Open for {days_open} days total"))
}

/// Competition and vehicle outlook from the set-aside pool and contract size.
pub(crate) fn score_competition(opportunity: &Opportunity) -> FactorScore {
    let mut score = 50.0;
    let mut notes = Vec::new();

    match opportunity.set_aside {
        Some(SetAside::Sdvosb) | Some(SetAside::Vosb) => {
            score += 30.0;
            let label = opportunity
                .set_aside
                .map(SetAside::label)
                .unwrap_or_default();
            notes.push(format!("{label} set-aside reduces competition pool"));
        }
        Some(SetAside::SmallBusiness) => {
            score += 20.0;
            notes.push("Small Business set-aside somewhat reduces competition".to_string());
        }
        _ => {}
    }

    if let Some(value) = opportunity.estimated_value {
        if value < 250_000.0 {
            score += 20.0;
            notes.push(format!("Smaller contract (${value:.0}) - less competition"));
        } else if value > 10_000_000.0 {
            score -= 20.0;
            notes.push(format!("Large contract (${value:.0}) - more competition"));
        } else {
            notes.push(format!(
                "Mid-size contract (${value:.0}) - moderate competition"
            ));
        }
    }

    let mut factor = FactorScore::new(clamp(score));
    factor.notes = notes;
    factor
}

/// Staffing realism from location signals and a rough FTE estimate.
pub(crate) fn score_staffing_realism(opportunity: &Opportunity) -> FactorScore {
    let mut score = 70.0;
    let mut notes = Vec::new();

    if let Some(place) = opportunity.place_of_performance.as_deref() {
        let place = place.to_lowercase();
        if ["remote", "telework", "virtual"]
            .iter()
            .any(|term| place.contains(term))
        {
            score += 20.0;
            notes.push("Remote work - easier to staff".to_string());
        } else if ["dc", "washington", "virginia", "maryland"]
            .iter()
            .any(|term| place.contains(term))
        {
            score += 10.0;
            notes.push("DMV area - good talent pool".to_string());
        } else if place.contains("cleared") || place.contains("security clearance") {
            score -= 20.0;
            notes.push("Clearance required - harder to staff".to_string());
        }
    }

    if let Some(value) = opportunity.estimated_value {
        let estimated_ftes = value / 200_000.0;
        if estimated_ftes < 5.0 {
            score += 10.0;
            notes.push(format!("Small team (~{estimated_ftes:.1} FTE) - easy to staff"));
        } else if estimated_ftes > 20.0 {
            score -= 15.0;
            notes.push(format!(
                "Large team (~{estimated_ftes:.1} FTE) - challenging to staff"
            ));
        } else {
            notes.push(format!("Medium team (~{estimated_ftes:.1} FTE) - manageable"));
        }
    }

    let mut factor = FactorScore::new(clamp(score));
    factor.notes = notes;
    factor
}

/// Pricing realism banded on the estimated contract value.
pub(crate) fn score_pricing_realism(opportunity: &Opportunity) -> FactorScore {
    let Some(value) = opportunity.estimated_value else {
        return FactorScore::new(75.0).note("No estimate provided - pricing TBD");
    };

    let factor = if value < 50_000.0 {
        FactorScore::new(40.0).note(format!("Low value (${value:.0}) - may not be worth pursuing"))
    } else if value > 50_000_000.0 {
        FactorScore::new(50.0).note(format!(
            "High value (${value:.0}) - need strong past performance"
        ))
    } else {
        FactorScore::new(85.0).note(format!("Reasonable value (${value:.0}) - within our range"))
    };

    match opportunity.naics_code.as_deref() {
        Some(code) => factor.note(format!("Evaluated against typical ranges for NAICS {code}")),
        None => factor,
    }
}

/// Strategic fit from agency targeting and shapeability.
pub(crate) fn score_strategic_fit(
    opportunity: &Opportunity,
    config: &ScoringConfig,
) -> FactorScore {
    let mut score: f64 = 50.0;
    let mut notes = Vec::new();

    let agency_upper = opportunity.agency.to_uppercase();
    if config
        .target_agencies
        .iter()
        .any(|target| agency_upper.contains(&target.to_uppercase()))
    {
        score += 30.0;
        notes.push(format!("Target agency: {}", opportunity.agency));
    }

    if opportunity.shapeable {
        score += 20.0;
        notes.push("Shapeable opportunity - can influence requirements".to_string());
    }

    if let Some(code) = opportunity.naics_code.as_deref() {
        notes.push(format!("NAICS alignment noted: {code}"));
    }

    let mut factor = FactorScore::new(score.min(100.0));
    factor.notes = notes;
    factor
}
