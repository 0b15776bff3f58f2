use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Stages of the 5C review every financing application walks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStage {
    Character,
    Capacity,
    Capital,
    Collateral,
    Conclusion,
}

impl ReviewStage {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Character,
            Self::Capacity,
            Self::Capital,
            Self::Collateral,
            Self::Conclusion,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Character => "Survei Karakter",
            Self::Capacity => "Analisis Kapasitas",
            Self::Capital => "Verifikasi Modal",
            Self::Collateral => "Penilaian Jaminan",
            Self::Conclusion => "Kesimpulan & Keputusan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewerRole {
    FieldSurveyor,
    CreditAnalyst,
    CommitteeApprover,
    Administration,
}

impl ReviewerRole {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::FieldSurveyor,
            Self::CreditAnalyst,
            Self::CommitteeApprover,
            Self::Administration,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FieldSurveyor => "Surveyor Lapangan",
            Self::CreditAnalyst => "Analis Kredit",
            Self::CommitteeApprover => "Komite Persetujuan",
            Self::Administration => "Administrasi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
    Blocked,
}

impl TaskStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Blocked => "Blocked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceSeverity {
    Warning,
    Critical,
}

impl ComplianceSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

/// Due-date policy for a template, resolved against the submission date and
/// the committee's target decision date.
#[derive(Debug, Clone, Copy)]
pub enum DueDateRule {
    DaysFromSubmission(i64),
    DaysBeforeDecision(u32),
    OnDecision,
}

impl DueDateRule {
    pub(crate) fn resolve(&self, submitted_on: NaiveDate, target_decision: NaiveDate) -> NaiveDate {
        match self {
            DueDateRule::DaysFromSubmission(offset) => submitted_on + Duration::days(*offset),
            DueDateRule::DaysBeforeDecision(days) => {
                target_decision - Duration::days(*days as i64)
            }
            DueDateRule::OnDecision => target_decision,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceNote {
    pub topic: &'static str,
    pub detail: &'static str,
}

#[derive(Debug, Clone)]
pub struct TaskTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub stage: ReviewStage,
    pub primary_role: ReviewerRole,
    pub due: DueDateRule,
    pub deliverables: Vec<&'static str>,
    pub compliance: Vec<ComplianceNote>,
}

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("task with key {0} not found")]
    TaskNotFound(String),
}
