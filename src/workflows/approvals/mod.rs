//! Pink Team and Gold Team approval gate rule engines.

mod domain;
mod gold;
mod pink;

pub use domain::{
    ApprovalDecision, ApprovalOutcome, BidScorecard, ColorTeamTrend, GateCriterion, GateName,
    GoldTeamContext, PinkTeamContext, PricingReadiness, ProposalReadiness, RequiredAction,
};
pub use gold::GoldTeamGate;
pub use pink::PinkTeamGate;
