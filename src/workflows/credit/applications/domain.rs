use serde::{Deserialize, Serialize};

use crate::workflows::credit::analysis::IncomeExpenseRecord;

/// Identifier wrapper for submitted financing applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Member identity snapshot taken at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSnapshot {
    pub member_number: String,
    pub full_name: String,
    pub occupation: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Inbound financing application as the member (or a teller on their behalf)
/// submits it. The income/expense worksheet usually arrives later with the
/// field survey, so it is optional here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplicationSubmission {
    pub member: MemberSnapshot,
    #[serde(rename = "pengajuan")]
    pub requested_amount: f64,
    #[serde(rename = "jangkaWaktu")]
    pub term_months: i64,
    #[serde(rename = "tujuan")]
    pub purpose: String,
    #[serde(default)]
    pub dependents: u32,
    #[serde(default)]
    pub supporting_documents: Vec<DocumentDescriptor>,
    #[serde(default)]
    pub income_expense: Option<IncomeExpenseRecord>,
}

/// Metadata for submitted proof so repositories can keep an audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    pub name: String,
    pub category: DocumentCategory,
    pub storage_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentCategory {
    Identification,
    IncomeProof,
    CollateralProof,
    MembershipProof,
    Misc,
}

/// Validated application the review pipeline works from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantDossier {
    pub application_id: ApplicationId,
    pub member: MemberSnapshot,
    pub requested_amount: f64,
    pub term_months: u32,
    pub purpose: String,
    pub dependents: u32,
    pub supporting_documents: Vec<DocumentDescriptor>,
    pub income_expense: Option<IncomeExpenseRecord>,
}

/// High level status tracked throughout the application workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditApplicationStatus {
    Submitted,
    UnderReview,
    AwaitingDecision,
    Approved,
    Rejected,
}

impl CreditApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CreditApplicationStatus::Submitted => "submitted",
            CreditApplicationStatus::UnderReview => "under_review",
            CreditApplicationStatus::AwaitingDecision => "awaiting_decision",
            CreditApplicationStatus::Approved => "approved",
            CreditApplicationStatus::Rejected => "rejected",
        }
    }
}

/// Final committee decision, recorded separately from the analyst's
/// recommendation so the two roles stay auditable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRecord {
    pub approved: bool,
    pub decided_by: String,
    #[serde(default)]
    pub notes: Option<String>,
}
