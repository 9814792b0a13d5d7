use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::QueryMap;
use crate::lifecycle::InternshipStatus;
use crate::models::{Batch, Company, InternshipPosition, Mentor, Student, Teacher};

/// A single filter field value as held by a criteria object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterValue<'a> {
    Text(Option<&'a str>),
    Bool(Option<bool>),
    Int(Option<i64>),
    Date(Option<NaiveDate>),
    Status(Option<InternshipStatus>),
}

impl FilterValue<'_> {
    /// Wire value, or `None` when the field does not filter anything.
    /// `false` and `0` are explicit filters and are kept.
    pub fn to_json(&self) -> Option<Value> {
        match *self {
            FilterValue::Text(text) => text
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(Value::from),
            FilterValue::Bool(flag) => flag.map(Value::from),
            FilterValue::Int(n) => n.map(Value::from),
            FilterValue::Date(date) => date.map(|d| Value::from(d.format("%Y-%m-%d").to_string())),
            FilterValue::Status(status) => status.map(|s| Value::from(s.to_string())),
        }
    }
}

/// Filter object of one entity list.
pub trait SearchCriteria: Default {
    /// Path segment of the entity's search endpoint.
    const RESOURCE: &'static str;

    type Entity: DeserializeOwned;

    /// Every filter field with its wire key, in a stable order.
    fn fields(&self) -> Vec<(&'static str, FilterValue<'_>)>;

    fn to_query(&self) -> QueryMap {
        self.fields()
            .into_iter()
            .filter_map(|(key, value)| value.to_json().map(|v| (key.to_string(), v)))
            .collect()
    }

    fn has_filters(&self) -> bool {
        self.fields().iter().any(|(_, value)| value.to_json().is_some())
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentCriteria {
    pub keyword: String,
    pub major: Option<String>,
    pub class_name: Option<String>,
    pub is_available: Option<bool>,
}

impl SearchCriteria for StudentCriteria {
    const RESOURCE: &'static str = "students";
    type Entity = Student;

    fn fields(&self) -> Vec<(&'static str, FilterValue<'_>)> {
        vec![
            ("keyword", FilterValue::Text(Some(self.keyword.as_str()))),
            ("major", FilterValue::Text(self.major.as_deref())),
            ("className", FilterValue::Text(self.class_name.as_deref())),
            ("isAvailable", FilterValue::Bool(self.is_available)),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeacherCriteria {
    pub keyword: String,
    pub department: Option<String>,
}

impl SearchCriteria for TeacherCriteria {
    const RESOURCE: &'static str = "teachers";
    type Entity = Teacher;

    fn fields(&self) -> Vec<(&'static str, FilterValue<'_>)> {
        vec![
            ("keyword", FilterValue::Text(Some(self.keyword.as_str()))),
            ("department", FilterValue::Text(self.department.as_deref())),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyCriteria {
    pub keyword: String,
    pub industry: Option<String>,
    pub is_active: Option<bool>,
}

impl SearchCriteria for CompanyCriteria {
    const RESOURCE: &'static str = "companies";
    type Entity = Company;

    fn fields(&self) -> Vec<(&'static str, FilterValue<'_>)> {
        vec![
            ("keyword", FilterValue::Text(Some(self.keyword.as_str()))),
            ("industry", FilterValue::Text(self.industry.as_deref())),
            ("isActive", FilterValue::Bool(self.is_active)),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MentorCriteria {
    pub keyword: String,
    pub company_id: Option<i64>,
}

impl SearchCriteria for MentorCriteria {
    const RESOURCE: &'static str = "mentors";
    type Entity = Mentor;

    fn fields(&self) -> Vec<(&'static str, FilterValue<'_>)> {
        vec![
            ("keyword", FilterValue::Text(Some(self.keyword.as_str()))),
            ("companyId", FilterValue::Int(self.company_id)),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchCriteria {
    pub keyword: String,
    pub is_active: Option<bool>,
    pub start_from: Option<NaiveDate>,
    pub start_to: Option<NaiveDate>,
}

impl SearchCriteria for BatchCriteria {
    const RESOURCE: &'static str = "batches";
    type Entity = Batch;

    fn fields(&self) -> Vec<(&'static str, FilterValue<'_>)> {
        vec![
            ("keyword", FilterValue::Text(Some(self.keyword.as_str()))),
            ("isActive", FilterValue::Bool(self.is_active)),
            ("startFrom", FilterValue::Date(self.start_from)),
            ("startTo", FilterValue::Date(self.start_to)),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InternshipCriteria {
    pub keyword: String,
    pub status: Option<InternshipStatus>,
    pub batch_id: Option<i64>,
    pub company_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub student_id: Option<i64>,
}

impl SearchCriteria for InternshipCriteria {
    const RESOURCE: &'static str = "internships";
    type Entity = InternshipPosition;

    fn fields(&self) -> Vec<(&'static str, FilterValue<'_>)> {
        vec![
            ("keyword", FilterValue::Text(Some(self.keyword.as_str()))),
            ("status", FilterValue::Status(self.status)),
            ("batchId", FilterValue::Int(self.batch_id)),
            ("companyId", FilterValue::Int(self.company_id)),
            ("teacherId", FilterValue::Int(self.teacher_id)),
            ("studentId", FilterValue::Int(self.student_id)),
        ]
    }
}
