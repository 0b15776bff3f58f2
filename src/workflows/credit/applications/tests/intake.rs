use super::common::*;
use crate::workflows::credit::applications::domain::CreditApplicationStatus;
use crate::workflows::credit::applications::{
    ApplicationRepository, CreditServiceError, IntakeViolation,
};

#[test]
fn valid_submission_is_stored_as_submitted() {
    let (service, repository, _) = build_service();
    let record = service.submit(submission()).expect("submission succeeds");

    assert_eq!(record.status, CreditApplicationStatus::Submitted);
    assert!(record.dossier.application_id.0.starts_with("kr-"));
    assert!(record.sub_capacity.is_none());
    assert!(record.analysis.is_none());

    let stored = repository
        .fetch(&record.dossier.application_id)
        .expect("repo fetch")
        .expect("record present");
    assert_eq!(stored.dossier.member.member_number, "AGT-0117");
}

#[test]
fn non_positive_amounts_are_rejected() {
    let (service, _, _) = build_service();
    let mut bad = submission();
    bad.requested_amount = 0.0;

    match service.submit(bad) {
        Err(CreditServiceError::Intake(IntakeViolation::NonPositiveAmount(_))) => {}
        other => panic!("expected amount violation, got {other:?}"),
    }
}

#[test]
fn non_positive_terms_are_rejected_before_any_math() {
    let (service, _, _) = build_service();
    for term in [0_i64, -6] {
        let mut bad = submission();
        bad.term_months = term;

        match service.submit(bad) {
            Err(CreditServiceError::Intake(IntakeViolation::InvalidTerm(got))) => {
                assert_eq!(got, term);
            }
            other => panic!("expected term violation, got {other:?}"),
        }
    }
}

#[test]
fn blank_member_number_is_rejected() {
    let (service, _, _) = build_service();
    let mut bad = submission();
    bad.member.member_number = "   ".to_string();

    match service.submit(bad) {
        Err(CreditServiceError::Intake(IntakeViolation::MissingMemberNumber)) => {}
        other => panic!("expected member number violation, got {other:?}"),
    }
}

#[test]
fn missing_identification_document_is_rejected() {
    let (service, _, _) = build_service();
    let mut bad = submission();
    bad.supporting_documents
        .retain(|document| document.name != "KTP Pemohon");

    match service.submit(bad) {
        Err(CreditServiceError::Intake(IntakeViolation::MissingIdentification)) => {}
        other => panic!("expected identification violation, got {other:?}"),
    }
}

#[test]
fn blank_purpose_is_rejected() {
    let (service, _, _) = build_service();
    let mut bad = submission();
    bad.purpose = String::new();

    match service.submit(bad) {
        Err(CreditServiceError::Intake(IntakeViolation::MissingPurpose)) => {}
        other => panic!("expected purpose violation, got {other:?}"),
    }
}
