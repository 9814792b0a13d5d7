#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use async_trait::async_trait;
use chrono::NaiveDate;
use internship_admin::AppError;
use internship_admin::client::InternshipApi;
use internship_admin::lifecycle::InternshipStatus;
use internship_admin::models::{
    AssignmentCommand, Batch, CreatePositionRequest, InternshipPosition, Mentor, PositionTemplate, Student,
};
use internship_admin::query::{PageResponse, QueryMap};
use serde_json::Value;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn batch(id: i64, max_students: u32, current_students: u32) -> Batch {
    Batch {
        id,
        name: format!("Batch {id}"),
        max_students,
        current_students: Some(current_students),
        registration_end_date: date(2026, 5, 1),
        start_date: date(2026, 6, 1),
        end_date: date(2026, 8, 31),
        is_active: true,
        company_id: None,
    }
}

pub fn template(batch_id: i64) -> PositionTemplate {
    PositionTemplate {
        job_title: "Backend Intern".to_string(),
        description: Some("Rust services".to_string()),
        start_date: date(2026, 6, 1),
        end_date: date(2026, 8, 31),
        batch_id,
        company_id: 7,
        teacher_id: Some(3),
        salary: None,
        working_hours_per_week: Some(40),
    }
}

pub fn position(id: i64, status: InternshipStatus, company_id: Option<i64>, student_id: Option<i64>) -> InternshipPosition {
    InternshipPosition {
        id,
        internship_code: format!("INT-{id:04}"),
        job_title: format!("Intern {id}"),
        status,
        batch_id: 1,
        company_id,
        teacher_id: None,
        student_id,
        mentor_id: None,
        start_date: date(2026, 6, 1),
        end_date: date(2026, 8, 31),
        salary: None,
        working_hours_per_week: None,
    }
}

pub fn mentor(id: i64, company_id: i64) -> Mentor {
    Mentor {
        id,
        full_name: format!("Mentor {id}"),
        company_id: Some(company_id),
    }
}

#[derive(Default)]
pub struct FakeState {
    pub batches: HashMap<i64, Batch>,
    pub positions: HashMap<i64, InternshipPosition>,
    pub mentors: Vec<Mentor>,
    pub students: Vec<Student>,
    /// Creation calls in the order they started, with their start time.
    pub create_calls: Vec<(String, Instant)>,
    /// 1-based index of the creation call that fails.
    pub fail_create_at: Option<usize>,
    /// Slots the backend will still accept, independent of the batch snapshot.
    pub backend_slots: Option<usize>,
    /// Status the backend reports after an assignment call.
    pub assign_result_status: Option<InternshipStatus>,
    pub status_updates: Vec<(i64, InternshipStatus)>,
    pub assignments: Vec<(i64, AssignmentCommand)>,
    pub searches: Vec<(String, QueryMap)>,
    next_id: i64,
}

#[derive(Default)]
pub struct FakeApi {
    pub state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn with_batch(batch: Batch) -> Self {
        let api = FakeApi::default();
        api.state.lock().unwrap().batches.insert(batch.id, batch);
        api
    }

    pub fn insert_position(&self, position: InternshipPosition) {
        self.state.lock().unwrap().positions.insert(position.id, position);
    }

    pub fn created_titles(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .create_calls
            .iter()
            .map(|(title, _)| title.clone())
            .collect()
    }

    pub fn persisted_positions(&self) -> usize {
        self.state.lock().unwrap().positions.len()
    }
}

fn not_found(what: &str) -> AppError {
    AppError::ExternalRejection {
        status: 404,
        message: format!("{what} not found"),
    }
}

#[async_trait]
impl InternshipApi for FakeApi {
    async fn search(&self, resource: &str, query: &QueryMap) -> Result<PageResponse<Value>, AppError> {
        let mut state = self.state.lock().unwrap();
        state.searches.push((resource.to_string(), query.clone()));
        let content: Vec<Value> = match resource {
            "internships" => state
                .positions
                .values()
                .map(|p| serde_json::to_value(p).unwrap())
                .collect(),
            "mentors" => state.mentors.iter().map(|m| serde_json::to_value(m).unwrap()).collect(),
            _ => Vec::new(),
        };
        let number = query.get("page").and_then(Value::as_u64).unwrap_or(0) as u32;
        Ok(PageResponse {
            total_elements: content.len() as u64,
            total_pages: 1,
            number,
            size: query.get("size").and_then(Value::as_u64).map(|s| s as u32),
            first: number == 0,
            last: true,
            sort_by: None,
            sort_dir: None,
            content,
        })
    }

    async fn fetch_batch(&self, batch_id: i64) -> Result<Batch, AppError> {
        let state = self.state.lock().unwrap();
        state.batches.get(&batch_id).cloned().ok_or_else(|| not_found("batch"))
    }

    async fn fetch_active_batches(&self) -> Result<Vec<Batch>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.batches.values().filter(|b| b.is_active).cloned().collect())
    }

    async fn fetch_position(&self, position_id: i64) -> Result<InternshipPosition, AppError> {
        let state = self.state.lock().unwrap();
        state.positions.get(&position_id).cloned().ok_or_else(|| not_found("internship"))
    }

    async fn create_position(&self, request: &CreatePositionRequest) -> Result<InternshipPosition, AppError> {
        let mut state = self.state.lock().unwrap();
        state.create_calls.push((request.job_title.clone(), Instant::now()));
        let call = state.create_calls.len();

        if state.fail_create_at == Some(call) {
            return Err(AppError::ExternalRejection {
                status: 500,
                message: format!("create call {call} failed"),
            });
        }
        if let Some(slots) = state.backend_slots {
            if slots == 0 {
                return Err(AppError::ExternalRejection {
                    status: 409,
                    message: "Batch is full".to_string(),
                });
            }
            state.backend_slots = Some(slots - 1);
        }

        state.next_id += 1;
        let id = 1000 + state.next_id;
        let position = InternshipPosition::create(id, format!("INT-{id}"), request);
        state.positions.insert(id, position.clone());
        Ok(position)
    }

    async fn update_status(&self, position_id: i64, status: InternshipStatus) -> Result<InternshipPosition, AppError> {
        let mut state = self.state.lock().unwrap();
        state.status_updates.push((position_id, status));
        let position = state
            .positions
            .get_mut(&position_id)
            .ok_or_else(|| not_found("internship"))?;
        position.status = status;
        Ok(position.clone())
    }

    async fn assign_position(
        &self,
        position_id: i64,
        command: &AssignmentCommand,
    ) -> Result<InternshipPosition, AppError> {
        let mut state = self.state.lock().unwrap();
        state.assignments.push((position_id, *command));
        let result_status = state.assign_result_status.unwrap_or(InternshipStatus::Assigned);
        let position = state
            .positions
            .get_mut(&position_id)
            .ok_or_else(|| not_found("internship"))?;
        position.student_id = Some(command.student_id);
        position.mentor_id = command.mentor_id;
        position.status = result_status;
        Ok(position.clone())
    }

    async fn fetch_mentors(&self, company_id: Option<i64>) -> Result<Vec<Mentor>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .mentors
            .iter()
            .filter(|m| company_id.is_none() || m.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn fetch_available_students(&self) -> Result<Vec<Student>, AppError> {
        Ok(self.state.lock().unwrap().students.clone())
    }
}
