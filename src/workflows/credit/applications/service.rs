use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::domain::{
    ApplicationId, CreditApplicationStatus, DecisionRecord, LoanApplicationSubmission,
};
use super::intake::{IntakeGuard, IntakeViolation};
use super::repository::{
    ApplicationRecord, ApplicationRepository, DecisionNotice, NotificationError,
    NotificationPublisher, RepositoryError,
};
use crate::workflows::credit::analysis::{
    analyze_application, compute_affordability, AffordabilityResult, CapacityError,
    CapacityPolicy, CharacterSurvey, IncomeExpenseRecord, PlannedLoan, RecommendationEngine,
    RecommendationOutcome, RiskAssessment, RiskInput, SignalExtractor, SignalLexicon,
    SynthesisInput,
};

/// Analysis request as the review screens post it. `applicationId` is
/// optional: analysts can run ad-hoc what-if analyses before an application
/// exists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub average_score: f64,
    pub character_survey: CharacterSurvey,
    pub sub_analysis: Option<AffordabilityResult>,
    pub assessments: Option<Vec<f64>>,
    pub application_id: Option<String>,
    pub survey_ratings: Option<Vec<String>>,
}

/// Service composing the intake guard, repository, scoring engine, and
/// decision notifications.
pub struct CreditApplicationService<R, N> {
    guard: IntakeGuard,
    repository: Arc<R>,
    notifier: Arc<N>,
    engine: Arc<RecommendationEngine>,
    capacity_policy: CapacityPolicy,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("kr-{id:06}"))
}

impl<R, N> CreditApplicationService<R, N>
where
    R: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, lexicon: SignalLexicon) -> Self {
        Self {
            guard: IntakeGuard,
            repository,
            notifier,
            engine: Arc::new(RecommendationEngine::new(SignalExtractor::new(lexicon))),
            capacity_policy: CapacityPolicy::committee(),
        }
    }

    /// Override the affordability profile the stored sub-analysis uses.
    pub fn with_capacity_policy(mut self, policy: CapacityPolicy) -> Self {
        self.capacity_policy = policy;
        self
    }

    /// Submit a new application, returning the repository-backed record.
    pub fn submit(
        &self,
        submission: LoanApplicationSubmission,
    ) -> Result<ApplicationRecord, CreditServiceError> {
        let mut dossier = self.guard.dossier_from_submission(submission)?;
        dossier.application_id = next_application_id();

        let record = ApplicationRecord {
            dossier,
            status: CreditApplicationStatus::Submitted,
            sub_capacity: None,
            analysis: None,
            risk: None,
            decision: None,
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Run the affordability sub-analysis and persist the snapshot on the
    /// record. The worksheet may be supplied inline (fresh survey data) or
    /// fall back to the one captured at intake.
    pub fn run_capacity(
        &self,
        application_id: &ApplicationId,
        worksheet: Option<IncomeExpenseRecord>,
    ) -> Result<AffordabilityResult, CreditServiceError> {
        let mut record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;

        let worksheet = worksheet
            .or_else(|| record.dossier.income_expense.clone())
            .ok_or(CreditServiceError::MissingWorksheet)?;

        let result = compute_affordability(
            &worksheet,
            i64::from(record.dossier.term_months),
            self.capacity_policy,
        )?;

        record.dossier.income_expense = Some(worksheet);
        record.sub_capacity = Some(result);
        if record.status == CreditApplicationStatus::Submitted {
            record.status = CreditApplicationStatus::UnderReview;
        }
        self.repository.update(record)?;

        Ok(result)
    }

    /// Synthesize a recommendation for the posted survey data.
    ///
    /// When an application id is supplied, the stored record contributes the
    /// planned-loan figures and (absent an inline override) the sub-analysis
    /// snapshot. A missing or unreachable record only degrades the analysis
    /// to survey-only; it never fails the call.
    pub fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<RecommendationOutcome, CreditServiceError> {
        let record = match &request.application_id {
            Some(raw) => {
                let id = ApplicationId(raw.clone());
                match self.repository.fetch(&id) {
                    Ok(found) => found,
                    Err(error) => {
                        tracing::warn!(
                            application_id = %id.0,
                            %error,
                            "record source unavailable, analyzing survey data only"
                        );
                        None
                    }
                }
            }
            None => None,
        };

        let sub_capacity = request
            .sub_analysis
            .or_else(|| record.as_ref().and_then(|record| record.sub_capacity));
        let planned_loan = record.as_ref().map(|record| PlannedLoan {
            amount: record.dossier.requested_amount,
            term_months: record.dossier.term_months,
            installment: record.dossier.requested_amount
                / f64::from(record.dossier.term_months),
        });

        let outcome = self.engine.synthesize(&SynthesisInput {
            average_score: request.average_score,
            survey: &request.character_survey,
            survey_ratings: request.survey_ratings.as_deref(),
            assessment_scores: request.assessments.as_deref(),
            sub_capacity: sub_capacity.as_ref(),
            planned_loan: planned_loan.as_ref(),
        });

        if let Some(mut record) = record {
            record.analysis = Some(outcome.clone());
            record.status = CreditApplicationStatus::AwaitingDecision;
            if let Err(error) = self.repository.update(record) {
                tracing::warn!(%error, "could not persist analysis outcome");
            }
        }

        Ok(outcome)
    }

    /// Run the committee's risk screening; persists onto the record when an
    /// application id is supplied.
    pub fn assess_risk(
        &self,
        application_id: Option<&ApplicationId>,
        input: &RiskInput,
    ) -> Result<RiskAssessment, CreditServiceError> {
        let assessment = analyze_application(input);

        if let Some(id) = application_id {
            let mut record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
            record.risk = Some(assessment.clone());
            self.repository.update(record)?;
        }

        Ok(assessment)
    }

    /// Record the committee's final decision. Approval publishes a member
    /// notice through the configured transport.
    pub fn decide(
        &self,
        application_id: &ApplicationId,
        decision: DecisionRecord,
    ) -> Result<ApplicationRecord, CreditServiceError> {
        let mut record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;

        record.status = if decision.approved {
            CreditApplicationStatus::Approved
        } else {
            CreditApplicationStatus::Rejected
        };
        record.decision = Some(decision.clone());

        self.repository.update(record.clone())?;

        if decision.approved {
            let mut details = std::collections::BTreeMap::new();
            details.insert("decision".to_string(), "approved".to_string());
            details.insert("decided_by".to_string(), decision.decided_by);
            self.notifier.publish(DecisionNotice {
                template: "pembiayaan_disetujui".to_string(),
                application_id: record.dossier.application_id.clone(),
                details,
            })?;
        }

        Ok(record)
    }

    /// Fetch an application and current status for API responses.
    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, CreditServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum CreditServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    #[error("lembar pendapatan dan pengeluaran belum tersedia")]
    MissingWorksheet,
}
