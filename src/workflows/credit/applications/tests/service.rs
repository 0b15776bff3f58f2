use std::sync::Arc;

use super::common::*;
use crate::workflows::credit::analysis::{Recommendation, RiskInput, RiskLevel};
use crate::workflows::credit::applications::domain::{
    ApplicationId, CreditApplicationStatus, DecisionRecord,
};
use crate::workflows::credit::applications::{
    ApplicationRepository, CreditApplicationService, CreditServiceError, RepositoryError,
};
use crate::workflows::credit::analysis::SignalLexicon;

#[test]
fn capacity_run_stores_the_snapshot_and_moves_to_under_review() {
    let (service, repository, _) = build_service();
    let record = service.submit(submission()).expect("submission succeeds");

    let result = service
        .run_capacity(&record.dossier.application_id, None)
        .expect("worksheet captured at intake");

    // 5,000,000 income - 3,000,000 expense on the fixture worksheet.
    assert_eq!(result.net_income, 2_000_000.0);
    assert_eq!(result.max_installment, 800_000.0);
    assert!(result.max_principal < 800_000.0 * 12.0);
    assert_eq!(result.term_months, 12);

    let stored = repository
        .fetch(&record.dossier.application_id)
        .expect("repo fetch")
        .expect("record present");
    assert_eq!(stored.status, CreditApplicationStatus::UnderReview);
    assert_eq!(stored.sub_capacity, Some(result));
}

#[test]
fn field_survey_policy_switches_to_the_flat_quick_check() {
    let repository = Arc::new(crate::workflows::credit::applications::InMemoryRepository::default());
    let notifier = Arc::new(CollectingNotifier::default());
    let service = CreditApplicationService::new(
        repository,
        notifier,
        SignalLexicon::standard(),
    )
    .with_capacity_policy(crate::workflows::credit::analysis::CapacityPolicy::field_survey());

    let record = service.submit(submission()).expect("submission succeeds");
    let result = service
        .run_capacity(&record.dossier.application_id, None)
        .expect("capacity run succeeds");

    assert_eq!(result.max_installment, 2_000_000.0 * 0.7);
    assert_eq!(result.max_principal, 2_000_000.0 * 0.7 * 12.0);
}

#[test]
fn pending_lists_only_unprocessed_applications() {
    let (service, repository, _) = build_service();
    let first = service.submit(submission()).expect("submission succeeds");
    let second = service.submit(submission()).expect("submission succeeds");
    service
        .run_capacity(&second.dossier.application_id, None)
        .expect("capacity run succeeds");

    let pending = repository.pending(10).expect("pending listing");
    assert_eq!(pending.len(), 1);
    assert_eq!(
        pending[0].dossier.application_id,
        first.dossier.application_id
    );
}

#[test]
fn capacity_run_without_any_worksheet_fails_cleanly() {
    let (service, _, _) = build_service();
    let mut bare = submission();
    bare.income_expense = None;
    let record = service.submit(bare).expect("submission succeeds");

    match service.run_capacity(&record.dossier.application_id, None) {
        Err(CreditServiceError::MissingWorksheet) => {}
        other => panic!("expected missing worksheet error, got {other:?}"),
    }
}

#[test]
fn analysis_uses_stored_capacity_and_planned_loan_figures() {
    let (service, repository, _) = build_service();
    let record = service.submit(submission()).expect("submission succeeds");
    service
        .run_capacity(&record.dossier.application_id, None)
        .expect("capacity run succeeds");

    let request = analysis_request(Some(record.dossier.application_id.0.clone()));
    let outcome = service.analyze(&request).expect("analysis succeeds");

    // 6,000,000 over 12 months is a 500,000 installment against 2,000,000
    // net income: a 25% ratio, comfortably inside the layak region.
    assert_eq!(outcome.recommendation, Recommendation::Layak);
    assert!(outcome
        .factors
        .contains(&"pendapatanBersih=2000000".to_string()));

    let stored = repository
        .fetch(&record.dossier.application_id)
        .expect("repo fetch")
        .expect("record present");
    assert_eq!(stored.status, CreditApplicationStatus::AwaitingDecision);
    assert!(stored.analysis.is_some());
}

#[test]
fn analysis_tolerates_a_missing_application_record() {
    let (service, _, _) = build_service();
    let request = analysis_request(Some("kr-999999".to_string()));

    let outcome = service.analyze(&request).expect("analysis still succeeds");

    assert_eq!(outcome.recommendation, Recommendation::Layak);
    // No record means no capacity figures in the audit trail.
    assert_eq!(outcome.factors.len(), 3);
}

#[test]
fn analysis_tolerates_an_unavailable_record_source() {
    let repository = Arc::new(UnavailableRepository);
    let notifier = Arc::new(CollectingNotifier::default());
    let service =
        CreditApplicationService::new(repository, notifier, SignalLexicon::standard());

    let request = analysis_request(Some("kr-000001".to_string()));
    let outcome = service.analyze(&request).expect("analysis still succeeds");

    assert_eq!(outcome.recommendation, Recommendation::Layak);
}

#[test]
fn risk_assessment_persists_when_an_application_is_named() {
    let (service, repository, _) = build_service();
    let record = service.submit(submission()).expect("submission succeeds");

    let input = RiskInput {
        karakter1: Some(5.0),
        karakter2: Some(5.0),
        karakter3: Some(5.0),
        karakter4: Some(5.0),
        karakter5: Some(5.0),
        pengajuan: 10_000_000.0,
        jangka_waktu: 12.0,
        ..RiskInput::default()
    };

    let assessment = service
        .assess_risk(Some(&record.dossier.application_id), &input)
        .expect("risk run succeeds");
    assert_eq!(assessment.risk_level, RiskLevel::Critical);

    let stored = repository
        .fetch(&record.dossier.application_id)
        .expect("repo fetch")
        .expect("record present");
    assert_eq!(stored.risk, Some(assessment));
}

#[test]
fn risk_assessment_for_an_unknown_application_is_not_found() {
    let (service, _, _) = build_service();

    match service.assess_risk(Some(&ApplicationId("kr-404404".to_string())), &RiskInput::default())
    {
        Err(CreditServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn approval_updates_status_and_notifies_the_member() {
    let (service, repository, notifier) = build_service();
    let record = service.submit(submission()).expect("submission succeeds");

    let decided = service
        .decide(
            &record.dossier.application_id,
            DecisionRecord {
                approved: true,
                decided_by: "Ketua Komite".to_string(),
                notes: Some("Plafon sesuai pengajuan".to_string()),
            },
        )
        .expect("decision succeeds");

    assert_eq!(decided.status, CreditApplicationStatus::Approved);
    assert!(decided.decision_rationale().contains("disetujui"));

    let stored = repository
        .fetch(&record.dossier.application_id)
        .expect("repo fetch")
        .expect("record present");
    assert_eq!(stored.status, CreditApplicationStatus::Approved);

    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].template, "pembiayaan_disetujui");
}

#[test]
fn rejection_updates_status_without_notifying() {
    let (service, _, notifier) = build_service();
    let record = service.submit(submission()).expect("submission succeeds");

    let decided = service
        .decide(
            &record.dossier.application_id,
            DecisionRecord {
                approved: false,
                decided_by: "Ketua Komite".to_string(),
                notes: None,
            },
        )
        .expect("decision succeeds");

    assert_eq!(decided.status, CreditApplicationStatus::Rejected);
    assert!(decided.decision_rationale().contains("ditolak"));
    assert!(notifier.events().is_empty());
}

#[test]
fn get_propagates_not_found() {
    let (service, _, _) = build_service();

    match service.get(&ApplicationId("kr-hilang".to_string())) {
        Err(CreditServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn status_view_reflects_the_analysis_recommendation() {
    let (service, _, _) = build_service();
    let record = service.submit(submission()).expect("submission succeeds");
    service
        .run_capacity(&record.dossier.application_id, None)
        .expect("capacity run succeeds");
    service
        .analyze(&analysis_request(Some(record.dossier.application_id.0.clone())))
        .expect("analysis succeeds");

    let stored = service
        .get(&record.dossier.application_id)
        .expect("record present");
    let view = stored.status_view();

    assert_eq!(view.status, "awaiting_decision");
    assert_eq!(view.recommendation, Some(Recommendation::Layak));
    assert!(view.decision_rationale.contains("rekomendasi analis"));
}
