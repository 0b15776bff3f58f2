//! Import of the committee's task-tracker CSV export, used to hydrate a 5C
//! review instance with real progress instead of a blank blueprint.

mod mapping;
mod normalizer;
mod parser;

use crate::workflows::credit::{
    domain::{ReviewError, TaskStatus},
    ReviewWorkflowBlueprint, ReviewWorkflowInstance,
};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use parser::TrackerRecord;

#[derive(Debug, thiserror::Error)]
pub enum TrackerImportError {
    #[error("failed to read tracker export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tracker CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("could not apply tracker data to review workflow: {0}")]
    Review(#[from] ReviewError),
}

pub struct TrackerReviewImporter;

impl TrackerReviewImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        submitted_on: NaiveDate,
        target_decision: NaiveDate,
    ) -> Result<ReviewWorkflowInstance, TrackerImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, submitted_on, target_decision)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        submitted_on: NaiveDate,
        target_decision: NaiveDate,
    ) -> Result<ReviewWorkflowInstance, TrackerImportError> {
        let blueprint = ReviewWorkflowBlueprint::standard();
        let mut instance = ReviewWorkflowInstance::new(&blueprint, submitted_on, target_decision);
        let mut applied: HashSet<&'static str> = HashSet::new();

        for record in parser::parse_records(reader)? {
            if let Some(task_key) = mapping::task_key_for_normalized(&record.normalized_name) {
                if applied.contains(task_key) {
                    continue;
                }

                apply_record(task_key, record, &mut instance, &mut applied)?;
            }
        }

        Ok(instance)
    }
}

fn apply_record(
    task_key: &'static str,
    record: TrackerRecord,
    instance: &mut ReviewWorkflowInstance,
    applied: &mut HashSet<&'static str>,
) -> Result<(), ReviewError> {
    if let Some(completed_on) = record.completed_on {
        instance.set_status(task_key, TaskStatus::Completed, Some(completed_on))?;
        applied.insert(task_key);
    } else if record.touched {
        instance.set_status(task_key, TaskStatus::InProgress, None)?;
        applied.insert(task_key);
    }

    Ok(())
}
