use chrono::{Duration, NaiveDate};
use kredit_ai::workflows::credit::{
    domain::{ComplianceSeverity, ReviewError, ReviewStage, ReviewerRole, TaskStatus},
    ReviewWorkflowBlueprint, ReviewWorkflowInstance,
};

fn review_dates() -> (NaiveDate, NaiveDate) {
    let submitted_on = NaiveDate::from_ymd_opt(2025, 11, 3).expect("valid submission date");
    let target_decision = submitted_on + Duration::days(10);
    (submitted_on, target_decision)
}

#[test]
fn blueprint_captures_the_five_c_structure() {
    let blueprint = ReviewWorkflowBlueprint::standard();

    let character_tasks = blueprint.tasks_for_stage(ReviewStage::Character);
    assert_eq!(
        character_tasks.len(),
        2,
        "character stage should include the visit and the rating form"
    );

    let survey_visit = character_tasks
        .iter()
        .find(|task| task.key == "character_survey_visit")
        .expect("survey visit task present");
    assert_eq!(survey_visit.primary_role, ReviewerRole::FieldSurveyor);
    assert!(survey_visit
        .deliverables
        .iter()
        .any(|step: &&str| step.contains("dua sumber independen")));

    let capacity_tasks = blueprint.tasks_for_stage(ReviewStage::Capacity);
    let sub_analysis = capacity_tasks
        .iter()
        .find(|task| task.key == "capacity_sub_analysis")
        .expect("sub-analysis task present");
    assert!(sub_analysis
        .compliance
        .iter()
        .any(|note| note.topic.contains("Permenkop")));

    let conclusion_tasks = blueprint.tasks_for_stage(ReviewStage::Conclusion);
    assert!(conclusion_tasks
        .iter()
        .any(|task| task.key == "conclusion_committee_decision"
            && task.primary_role == ReviewerRole::CommitteeApprover));
    assert!(conclusion_tasks
        .iter()
        .any(|task| task.compliance.iter().any(|note| note
            .topic
            .contains("Pemisahan tugas"))));
}

#[test]
fn reporting_flags_overdue_and_compliance_gaps() {
    let blueprint = ReviewWorkflowBlueprint::standard();
    let (submitted_on, target_decision) = review_dates();
    let mut instance = ReviewWorkflowInstance::new(&blueprint, submitted_on, target_decision);

    instance
        .set_status(
            "character_rating_form",
            TaskStatus::Completed,
            Some(submitted_on + Duration::days(2)),
        )
        .expect("able to mark task complete");
    instance
        .set_status("capacity_worksheet", TaskStatus::InProgress, None)
        .expect("able to mark task in progress");

    let today = target_decision - Duration::days(1);
    let report = instance.report(today);

    assert!(report
        .overdue_tasks
        .iter()
        .any(|task| task.key == "character_survey_visit"));

    assert!(report
        .compliance_alerts
        .iter()
        .any(|alert| alert.task_key == "capacity_sub_analysis"
            && alert.severity == ComplianceSeverity::Critical));
}

#[test]
fn report_includes_stage_progress_and_role_load() {
    let blueprint = ReviewWorkflowBlueprint::standard();
    let (submitted_on, target_decision) = review_dates();
    let mut instance = ReviewWorkflowInstance::new(&blueprint, submitted_on, target_decision);

    instance
        .set_status(
            "character_survey_visit",
            TaskStatus::Completed,
            Some(submitted_on),
        )
        .expect("mark survey visit complete");
    instance
        .set_status(
            "character_rating_form",
            TaskStatus::Completed,
            Some(submitted_on),
        )
        .expect("mark rating form complete");

    let report = instance.report(submitted_on + Duration::days(1));

    let character_stage = report
        .stage_progress
        .get(&ReviewStage::Character)
        .expect("character stage in report");
    assert_eq!(character_stage.completed, 2);
    assert_eq!(character_stage.total, 2);

    let analyst_load = report
        .role_load
        .get(&ReviewerRole::CreditAnalyst)
        .expect("credit analyst role load tracked");
    assert!(analyst_load.open >= 1);
}

#[test]
fn summary_produces_human_readable_views() {
    let blueprint = ReviewWorkflowBlueprint::standard();
    let (submitted_on, target_decision) = review_dates();
    let instance = ReviewWorkflowInstance::new(&blueprint, submitted_on, target_decision);

    let summary = instance.report(submitted_on).summary();

    assert_eq!(summary.stage_progress.len(), 5);
    assert_eq!(summary.stage_progress[0].stage, ReviewStage::Character);
    assert_eq!(summary.stage_progress[0].stage_label, "Survei Karakter");

    assert_eq!(summary.role_load.len(), 4);
    assert_eq!(summary.role_load[0].role, ReviewerRole::FieldSurveyor);
    assert_eq!(summary.role_load[0].role_label, "Surveyor Lapangan");

    assert!(summary.overdue_tasks.is_empty());
    assert!(summary
        .compliance_alerts
        .iter()
        .any(|alert| alert.severity_label == "Warning"));
}

#[test]
fn due_date_rules_instantiate_expected_offsets() {
    let submitted_on = NaiveDate::from_ymd_opt(2025, 11, 3).expect("valid");
    let target_decision = NaiveDate::from_ymd_opt(2025, 11, 17).expect("valid");
    let blueprint = ReviewWorkflowBlueprint::standard();
    let instance = ReviewWorkflowInstance::new(&blueprint, submitted_on, target_decision);

    let survey_visit = instance
        .tasks()
        .iter()
        .find(|task| task.template.key == "character_survey_visit")
        .expect("survey visit task");
    assert_eq!(survey_visit.due_date, submitted_on + Duration::days(2));

    let analyst_memo = instance
        .tasks()
        .iter()
        .find(|task| task.template.key == "conclusion_analyst_memo")
        .expect("analyst memo task");
    assert_eq!(analyst_memo.due_date, target_decision - Duration::days(2));

    let committee_decision = instance
        .tasks()
        .iter()
        .find(|task| task.template.key == "conclusion_committee_decision")
        .expect("committee decision task");
    assert_eq!(committee_decision.due_date, target_decision);
}

#[test]
fn task_details_sorted_by_due_date_and_include_labels() {
    let blueprint = ReviewWorkflowBlueprint::standard();
    let (submitted_on, target_decision) = review_dates();
    let instance = ReviewWorkflowInstance::new(&blueprint, submitted_on, target_decision);

    let details = instance.task_details();
    assert!(!details.is_empty());
    assert!(details
        .windows(2)
        .all(|pair| pair[0].due_date <= pair[1].due_date));
    assert!(details
        .iter()
        .any(|task| task.stage_label.contains("Jaminan")
            && task.role_label.contains("Administrasi")));
}

#[test]
fn set_status_returns_error_for_unknown_task_key() {
    let blueprint = ReviewWorkflowBlueprint::standard();
    let (submitted_on, target_decision) = review_dates();
    let mut instance = ReviewWorkflowInstance::new(&blueprint, submitted_on, target_decision);

    let result = instance.set_status("tugas_tidak_ada", TaskStatus::Completed, None);
    match result {
        Err(ReviewError::TaskNotFound(key)) => assert_eq!(key, "tugas_tidak_ada"),
        other => panic!("expected task not found error, got {other:?}"),
    }
}
