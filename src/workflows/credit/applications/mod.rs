//! Financing application intake, scoring, and decision workflow.

pub mod domain;
pub(crate) mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantDossier, ApplicationId, CreditApplicationStatus, DecisionRecord, DocumentCategory,
    DocumentDescriptor, LoanApplicationSubmission, MemberSnapshot,
};
pub use intake::IntakeViolation;
pub use repository::{
    ApplicationRecord, ApplicationRepository, ApplicationStatusView, DecisionNotice,
    InMemoryRepository, NotificationError, NotificationPublisher, RepositoryError,
    TracingNotifier,
};
pub use router::application_router;
pub use service::{AnalysisRequest, CreditApplicationService, CreditServiceError};
