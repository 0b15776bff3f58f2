//! Credit-decision scoring engine: affordability math, survey signal
//! extraction, the recommendation synthesizer, and the committee's risk
//! screening pass. Everything in here is pure computation over in-memory
//! values; persistence and transport live with the callers.

pub mod capacity;
pub mod recommendation;
pub mod risk;
pub mod signals;

pub use capacity::{
    affordability_ratio, compute_affordability, AffordabilityResult, CapacityError,
    CapacityPolicy, IncomeExpenseRecord,
};
pub use recommendation::{
    format_rupiah, CharacterSurvey, PlannedLoan, Recommendation, RecommendationEngine,
    RecommendationOutcome, ScoreBand, SynthesisInput, RATING_VOCABULARY,
};
pub use risk::{analyze_application, RiskAssessment, RiskInput, RiskLevel};
pub use signals::{SignalCounts, SignalExtractor, SignalLexicon};
