use super::domain::{
    ApplicantDossier, ApplicationId, DocumentCategory, LoanApplicationSubmission,
};

/// Validation errors raised by the intake guard.
#[derive(Debug, thiserror::Error)]
pub enum IntakeViolation {
    #[error("jumlah pengajuan harus positif, diterima {0}")]
    NonPositiveAmount(f64),
    #[error("jangka pembiayaan harus minimal satu bulan, diterima {0}")]
    InvalidTerm(i64),
    #[error("nomor anggota wajib diisi")]
    MissingMemberNumber,
    #[error("tujuan pembiayaan wajib diisi")]
    MissingPurpose,
    #[error("dokumen identitas wajib dilampirkan")]
    MissingIdentification,
}

/// Guard responsible for producing `ApplicantDossier` instances from raw
/// submissions. Rejections here never reach the repository.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    /// Convert an inbound submission into a validated dossier.
    ///
    /// The term check is the service-side half of the invalid-term rejection;
    /// the capacity calculator repeats it for callers that bypass intake.
    pub fn dossier_from_submission(
        &self,
        submission: LoanApplicationSubmission,
    ) -> Result<ApplicantDossier, IntakeViolation> {
        if submission.requested_amount <= 0.0 {
            return Err(IntakeViolation::NonPositiveAmount(
                submission.requested_amount,
            ));
        }

        if submission.term_months <= 0 {
            return Err(IntakeViolation::InvalidTerm(submission.term_months));
        }

        if submission.member.member_number.trim().is_empty() {
            return Err(IntakeViolation::MissingMemberNumber);
        }

        if submission.purpose.trim().is_empty() {
            return Err(IntakeViolation::MissingPurpose);
        }

        let has_identification = submission
            .supporting_documents
            .iter()
            .any(|document| document.category == DocumentCategory::Identification);
        if !has_identification {
            return Err(IntakeViolation::MissingIdentification);
        }

        Ok(ApplicantDossier {
            application_id: ApplicationId("pending".to_string()),
            member: submission.member,
            requested_amount: submission.requested_amount,
            term_months: submission.term_months as u32,
            purpose: submission.purpose,
            dependents: submission.dependents,
            supporting_documents: submission.supporting_documents,
            income_expense: submission.income_expense,
        })
    }
}
