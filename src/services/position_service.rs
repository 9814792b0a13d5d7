use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::client::InternshipApi;
use crate::error::AppError;
use crate::lifecycle::{InternshipStatus, LifecycleEvent};
use crate::models::{Batch, InternshipPosition, Mentor, PositionTemplate, Student};
use crate::query::{PageResponse, PaginationRequest, SearchCriteria, build_query};
use crate::services::assignment;
use crate::services::bulk::{self, BulkSubmitter};
use crate::services::capacity::BatchCapacity;

pub struct PositionService {
    api: Arc<dyn InternshipApi>,
    submitter: BulkSubmitter,
}

impl PositionService {
    pub fn new(api: Arc<dyn InternshipApi>, submitter: BulkSubmitter) -> Self {
        Self { api, submitter }
    }

    pub async fn search<C: SearchCriteria>(
        &self,
        criteria: &C,
        pagination: &PaginationRequest,
    ) -> Result<PageResponse<C::Entity>, AppError> {
        let query = build_query(criteria, pagination);
        let page = self.api.search(C::RESOURCE, &query).await?;
        page.try_map(|item| {
            serde_json::from_value(item).map_err(|e| AppError::Decode(format!("{}: {}", C::RESOURCE, e)))
        })
    }

    pub async fn remaining_slots(&self, batch_id: i64) -> Result<u32, AppError> {
        let batch = self.api.fetch_batch(batch_id).await?;
        Ok(BatchCapacity::of(&batch).remaining_slots())
    }

    /// Active batches still accepting registrations at `now`.
    pub async fn open_batches(&self, now: DateTime<Utc>) -> Result<Vec<Batch>, AppError> {
        let batches = self.api.fetch_active_batches().await?;
        Ok(batches.into_iter().filter(|b| b.is_open_at(now)).collect())
    }

    /// Creates `quantity` numbered copies of `template` in `batch_id`.
    ///
    /// Capacity is checked against a freshly fetched batch; nothing is sent
    /// when the check fails. The backend may still refuse a creation (another
    /// client consumed slots meanwhile), which ends the run with
    /// [`AppError::BulkInterrupted`].
    pub async fn create_positions(
        &self,
        batch_id: i64,
        template: &PositionTemplate,
        quantity: u32,
    ) -> Result<usize, AppError> {
        let batch = self.api.fetch_batch(batch_id).await?;
        let capacity = BatchCapacity::of(&batch);
        capacity.validate_quantity(quantity)?;

        info!(
            "Creating {} positions '{}' in batch {} ({} slots remaining)",
            quantity,
            template.job_title,
            batch_id,
            capacity.remaining_slots()
        );

        let template = PositionTemplate {
            batch_id,
            ..template.clone()
        };
        let api = self.api.clone();
        let created = self
            .submitter
            .submit(bulk::generate(&template, quantity), |request| {
                let api = api.clone();
                async move { api.create_position(&request).await }
            })
            .await?;

        info!("Created {} positions in batch {}", created, batch_id);
        Ok(created)
    }

    pub async fn approve(&self, position_id: i64) -> Result<InternshipPosition, AppError> {
        self.transition(position_id, LifecycleEvent::Approve).await
    }

    pub async fn reject(&self, position_id: i64) -> Result<InternshipPosition, AppError> {
        self.transition(position_id, LifecycleEvent::Reject).await
    }

    pub async fn start(&self, position_id: i64) -> Result<InternshipPosition, AppError> {
        self.transition(position_id, LifecycleEvent::Start).await
    }

    pub async fn complete(&self, position_id: i64) -> Result<InternshipPosition, AppError> {
        self.transition(position_id, LifecycleEvent::Complete).await
    }

    pub async fn cancel(&self, position_id: i64) -> Result<InternshipPosition, AppError> {
        self.transition(position_id, LifecycleEvent::Cancel).await
    }

    pub async fn eligible_mentors(&self, position_id: i64) -> Result<Vec<Mentor>, AppError> {
        let position = self.api.fetch_position(position_id).await?;
        let Some(company_id) = position.company_id else {
            return Ok(Vec::new());
        };
        let mentors = self.api.fetch_mentors(Some(company_id)).await?;
        Ok(assignment::eligible_mentors(&position, &mentors)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn available_students(&self) -> Result<Vec<Student>, AppError> {
        let students = self.api.fetch_available_students().await?;
        Ok(assignment::eligible_students(&students)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Resolves and submits an assignment. `student_id` may be omitted when a
    /// student already applied to the position.
    pub async fn assign(
        &self,
        position_id: i64,
        student_id: Option<i64>,
        mentor_id: Option<i64>,
    ) -> Result<InternshipPosition, AppError> {
        let position = self.api.fetch_position(position_id).await?;
        // unfiltered so a mentor of another company is reported as a mismatch
        let mentors = match mentor_id {
            Some(_) => self.api.fetch_mentors(None).await?,
            None => Vec::new(),
        };
        let command = assignment::resolve_assignment(&position, student_id, mentor_id, &mentors)?;

        let updated = self.api.assign_position(position_id, &command).await?;
        if updated.status != InternshipStatus::Assigned {
            warn!(
                "Assignment of position {} returned status {}",
                position_id, updated.status
            );
            return Err(AppError::ExternalRejection {
                status: 200,
                message: format!("position {} is {} after assignment", position_id, updated.status),
            });
        }

        info!(
            "Assigned student {} to position {} ({})",
            command.student_id, position_id, updated.internship_code
        );
        Ok(updated)
    }

    async fn transition(&self, position_id: i64, event: LifecycleEvent) -> Result<InternshipPosition, AppError> {
        let position = self.api.fetch_position(position_id).await?;
        let target = position.status.transition(event)?;

        let updated = self.api.update_status(position_id, target).await?;
        info!(
            "Position {} {}: {} -> {}",
            position_id, event, position.status, updated.status
        );
        Ok(updated)
    }
}
