use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::credit::analysis::{IncomeExpenseRecord, SignalLexicon};
use crate::workflows::credit::applications::domain::{
    DocumentCategory, DocumentDescriptor, LoanApplicationSubmission, MemberSnapshot,
};
use crate::workflows::credit::applications::repository::{
    ApplicationRecord, ApplicationRepository, DecisionNotice, InMemoryRepository,
    NotificationError, NotificationPublisher, RepositoryError,
};
use crate::workflows::credit::applications::service::AnalysisRequest;
use crate::workflows::credit::applications::{application_router, CreditApplicationService};

pub(super) fn member() -> MemberSnapshot {
    MemberSnapshot {
        member_number: "AGT-0117".to_string(),
        full_name: "Siti Rahmawati".to_string(),
        occupation: "Pedagang sembako".to_string(),
        address: "Dusun Krajan RT 03/RW 01".to_string(),
        phone: Some("0812-3456-7890".to_string()),
    }
}

pub(super) fn documents() -> Vec<DocumentDescriptor> {
    vec![
        DocumentDescriptor {
            name: "KTP Pemohon".to_string(),
            category: DocumentCategory::Identification,
            storage_key: "docs/agt-0117/ktp.pdf".to_string(),
        },
        DocumentDescriptor {
            name: "Buku Anggota".to_string(),
            category: DocumentCategory::MembershipProof,
            storage_key: "docs/agt-0117/buku-anggota.pdf".to_string(),
        },
    ]
}

pub(super) fn worksheet() -> IncomeExpenseRecord {
    IncomeExpenseRecord {
        applicant_income: 3_500_000.0,
        spouse_income: 1_500_000.0,
        applicant_expense: 500_000.0,
        spouse_expense: 300_000.0,
        food_expense: 1_200_000.0,
        utilities_expense: 400_000.0,
        social_expense: 100_000.0,
        child_count: 1,
        school_expense: 300_000.0,
        allowance_expense: 200_000.0,
        ..IncomeExpenseRecord::default()
    }
}

pub(super) fn submission() -> LoanApplicationSubmission {
    LoanApplicationSubmission {
        member: member(),
        requested_amount: 6_000_000.0,
        term_months: 12,
        purpose: "Tambahan modal dagang".to_string(),
        dependents: 2,
        supporting_documents: documents(),
        income_expense: Some(worksheet()),
    }
}

pub(super) fn analysis_request(application_id: Option<String>) -> AnalysisRequest {
    let mut request = AnalysisRequest {
        average_score: 4.5,
        application_id,
        ..AnalysisRequest::default()
    };
    request.character_survey.religion_note = Some("Aktif di kegiatan masjid".to_string());
    request.character_survey.experience_note =
        Some("Usaha sembako lancar sejak 2018".to_string());
    request
}

pub(super) fn build_service() -> (
    CreditApplicationService<InMemoryRepository, CollectingNotifier>,
    Arc<InMemoryRepository>,
    Arc<CollectingNotifier>,
) {
    let repository = Arc::new(InMemoryRepository::default());
    let notifier = Arc::new(CollectingNotifier::default());
    let service = CreditApplicationService::new(
        repository.clone(),
        notifier.clone(),
        SignalLexicon::standard(),
    );
    (service, repository, notifier)
}

#[derive(Default, Clone)]
pub(super) struct CollectingNotifier {
    events: Arc<Mutex<Vec<DecisionNotice>>>,
}

impl CollectingNotifier {
    pub(super) fn events(&self) -> Vec<DecisionNotice> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl NotificationPublisher for CollectingNotifier {
    fn publish(&self, notice: DecisionNotice) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(
        &self,
        _id: &super::super::domain::ApplicationId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn pending(&self, _limit: usize) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn application_router_with_service(
    service: CreditApplicationService<InMemoryRepository, CollectingNotifier>,
) -> axum::Router {
    application_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
