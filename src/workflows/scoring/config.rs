use super::domain::SetAside;
use serde::{Deserialize, Serialize};

/// Factor weights as whole percentages. The seven weights must sum to 100;
/// [`ScoringConfig::validate`] enforces this once at engine construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub set_aside: u8,
    pub scope: u8,
    pub timeline: u8,
    pub competition: u8,
    pub staffing: u8,
    pub pricing: u8,
    pub strategic: u8,
}

impl ScoreWeights {
    pub(crate) fn sum(&self) -> u32 {
        u32::from(self.set_aside)
            + u32::from(self.scope)
            + u32::from(self.timeline)
            + u32::from(self.competition)
            + u32::from(self.staffing)
            + u32::from(self.pricing)
            + u32::from(self.strategic)
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            set_aside: 25,
            scope: 25,
            timeline: 15,
            competition: 10,
            staffing: 10,
            pricing: 10,
            strategic: 5,
        }
    }
}

/// Company posture the scoring rubric evaluates opportunities against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    /// Set-aside certifications the company currently holds.
    pub certifications: Vec<SetAside>,
    /// Agencies the portfolio strategy targets, matched against agency names.
    pub target_agencies: Vec<String>,
    /// Capability keywords that boost scope alignment when they appear in the
    /// title or description.
    pub capability_keywords: Vec<String>,
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        let sum = self.weights.sum();
        if sum != 100 {
            return Err(ScoringConfigError::WeightSum { sum });
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            certifications: vec![SetAside::Sdvosb, SetAside::Vosb, SetAside::SmallBusiness],
            target_agencies: ["VA", "DoD", "DHS", "HHS", "DOJ", "USDA"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            capability_keywords: [
                "zero trust",
                "icam",
                "rmf",
                "cmmc",
                "cybersecurity",
                "information security",
                "data management",
                "translation",
                "interpretation",
                "asl",
                "sign language",
                "transcription",
                "it services",
                "help desk",
                "pmo",
                "program management",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("factor weights must sum to 100, got {sum}")]
    WeightSum { sum: u32 },
}
