use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::domain::{ApplicantDossier, ApplicationId, CreditApplicationStatus, DecisionRecord};
use crate::workflows::credit::analysis::{
    AffordabilityResult, Recommendation, RecommendationOutcome, RiskAssessment,
};

/// Repository record: the dossier plus everything the review has produced so
/// far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub dossier: ApplicantDossier,
    pub status: CreditApplicationStatus,
    pub sub_capacity: Option<AffordabilityResult>,
    pub analysis: Option<RecommendationOutcome>,
    pub risk: Option<RiskAssessment>,
    pub decision: Option<DecisionRecord>,
}

impl ApplicationRecord {
    pub fn decision_rationale(&self) -> String {
        match (&self.decision, &self.analysis) {
            (Some(decision), _) => {
                let verdict = if decision.approved {
                    "disetujui"
                } else {
                    "ditolak"
                };
                match &decision.notes {
                    Some(notes) => format!("{verdict} oleh {}: {notes}", decision.decided_by),
                    None => format!("{verdict} oleh {}", decision.decided_by),
                }
            }
            (None, Some(analysis)) => {
                format!("rekomendasi analis: {}", analysis.recommendation.label())
            }
            (None, None) => "menunggu analisis".to_string(),
        }
    }

    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.dossier.application_id.clone(),
            status: self.status.label(),
            decision_rationale: self.decision_rationale(),
            recommendation: self
                .analysis
                .as_ref()
                .map(|analysis| analysis.recommendation),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation;
/// durable persistence lives outside this crate.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn pending(&self, limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound decision notices (SMS gateway, e-mail adapter,
/// front-office printout).
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notice: DecisionNotice) -> Result<(), NotificationError>;
}

/// Simple notice payload so routes/tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionNotice {
    pub template: String,
    pub application_id: ApplicationId,
    pub details: BTreeMap<String, String>,
}

/// Notice dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized representation of an application's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub status: &'static str,
    pub decision_rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
}

/// Default repository backing the server when no external store is wired in.
#[derive(Default, Clone)]
pub struct InMemoryRepository {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for InMemoryRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.dossier.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.dossier.application_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.dossier.application_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.status == CreditApplicationStatus::Submitted)
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Default publisher: writes every notice to the service log.
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

impl NotificationPublisher for TracingNotifier {
    fn publish(&self, notice: DecisionNotice) -> Result<(), NotificationError> {
        tracing::info!(
            template = %notice.template,
            application_id = %notice.application_id.0,
            "decision notice"
        );
        Ok(())
    }
}
