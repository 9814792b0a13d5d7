use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::lifecycle::InternshipStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipPosition {
    pub id: i64,
    #[serde(default)]
    pub internship_code: String,
    pub job_title: String,
    #[serde(default)]
    pub status: InternshipStatus,
    pub batch_id: i64,
    #[serde(default)]
    pub company_id: Option<i64>,
    #[serde(default)]
    pub teacher_id: Option<i64>,
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub mentor_id: Option<i64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub working_hours_per_week: Option<u32>,
}

/// Shared fields of every position produced by one bulk creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionTemplate {
    pub job_title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub batch_id: i64,
    pub company_id: i64,
    #[serde(default)]
    pub teacher_id: Option<i64>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub working_hours_per_week: Option<u32>,
}

impl PositionTemplate {
    /// Copy of the template titled `"{job_title} {index}"`.
    pub fn numbered(&self, index: u32) -> CreatePositionRequest {
        CreatePositionRequest {
            job_title: format!("{} {}", self.job_title, index),
            description: self.description.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            batch_id: self.batch_id,
            company_id: self.company_id,
            teacher_id: self.teacher_id,
            salary: self.salary,
            working_hours_per_week: self.working_hours_per_week,
            status: InternshipStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePositionRequest {
    pub job_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub batch_id: i64,
    pub company_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_hours_per_week: Option<u32>,
    pub status: InternshipStatus,
}

/// Payload of the assignment update call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentCommand {
    pub student_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentor_id: Option<i64>,
}
