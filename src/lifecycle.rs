use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppError;
use crate::models::{AssignmentCommand, CreatePositionRequest, InternshipPosition};

/// Status of an internship position as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InternshipStatus {
    /// Initial state of every created position
    #[default]
    Pending,
    Approved,
    Rejected,
    /// A student (and optionally a mentor) is bound to the position
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl InternshipStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Cancelled)
    }

    /// Full transition table. `Assign` is additionally guarded per position,
    /// see [`InternshipPosition::check_assignable`].
    pub fn transition(self, event: LifecycleEvent) -> Result<InternshipStatus, AppError> {
        let target = match (self, event) {
            (Self::Pending, LifecycleEvent::Approve) => Self::Approved,
            (Self::Pending, LifecycleEvent::Reject) => Self::Rejected,

            (Self::Pending | Self::Approved | Self::Assigned, LifecycleEvent::Assign) => {
                Self::Assigned
            }

            (Self::Assigned, LifecycleEvent::Start) => Self::InProgress,
            (Self::InProgress, LifecycleEvent::Complete) => Self::Completed,

            (from, LifecycleEvent::Cancel) if !from.is_terminal() => Self::Cancelled,

            (from, event) => return Err(AppError::InvalidTransition { from, event }),
        };

        Ok(target)
    }
}

impl fmt::Display for InternshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Approved => write!(f, "APPROVED"),
            Self::Rejected => write!(f, "REJECTED"),
            Self::Assigned => write!(f, "ASSIGNED"),
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl std::str::FromStr for InternshipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "ASSIGNED" => Ok(Self::Assigned),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(format!("Invalid internship status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Approve,
    Reject,
    Assign,
    /// Start date reached
    Start,
    /// Evaluation finished
    Complete,
    Cancel,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Assign => "assign",
            Self::Start => "start",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
        };
        f.write_str(name)
    }
}

impl InternshipPosition {
    /// Position as the backend creates it: always `PENDING`, nobody assigned.
    pub fn create(id: i64, internship_code: String, req: &CreatePositionRequest) -> Self {
        Self {
            id,
            internship_code,
            job_title: req.job_title.clone(),
            status: InternshipStatus::Pending,
            batch_id: req.batch_id,
            company_id: Some(req.company_id),
            teacher_id: req.teacher_id,
            student_id: None,
            mentor_id: None,
            start_date: req.start_date,
            end_date: req.end_date,
            salary: req.salary,
            working_hours_per_week: req.working_hours_per_week,
        }
    }

    /// Assignment is offered when the position is approved, or when no student
    /// has attached to it yet regardless of approval.
    pub fn check_assignable(&self) -> Result<(), AppError> {
        self.status.transition(LifecycleEvent::Assign)?;
        if self.status == InternshipStatus::Approved || self.student_id.is_none() {
            return Ok(());
        }
        debug!(position_id = self.id, status = %self.status, "assign refused: student already attached");
        Err(AppError::InvalidTransition {
            from: self.status,
            event: LifecycleEvent::Assign,
        })
    }

    pub fn approve(&mut self) -> Result<InternshipStatus, AppError> {
        self.apply(LifecycleEvent::Approve)
    }

    pub fn reject(&mut self) -> Result<InternshipStatus, AppError> {
        self.apply(LifecycleEvent::Reject)
    }

    pub fn start(&mut self) -> Result<InternshipStatus, AppError> {
        self.apply(LifecycleEvent::Start)
    }

    pub fn complete(&mut self) -> Result<InternshipStatus, AppError> {
        self.apply(LifecycleEvent::Complete)
    }

    pub fn cancel(&mut self) -> Result<InternshipStatus, AppError> {
        self.apply(LifecycleEvent::Cancel)
    }

    /// Binds the student (and mentor) of a resolved command.
    pub fn assign(&mut self, command: AssignmentCommand) -> Result<InternshipStatus, AppError> {
        self.check_assignable()?;
        self.student_id = Some(command.student_id);
        self.mentor_id = command.mentor_id;
        self.status = InternshipStatus::Assigned;
        Ok(self.status)
    }

    fn apply(&mut self, event: LifecycleEvent) -> Result<InternshipStatus, AppError> {
        let target = self.status.transition(event)?;
        debug!(position_id = self.id, from = %self.status, to = %target, "position transition");
        self.status = target;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn position(status: InternshipStatus, student_id: Option<i64>) -> InternshipPosition {
        InternshipPosition {
            id: 1,
            internship_code: "INT-0001".to_string(),
            job_title: "Backend Intern 1".to_string(),
            status,
            batch_id: 10,
            company_id: Some(7),
            teacher_id: None,
            student_id,
            mentor_id: None,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            salary: None,
            working_hours_per_week: None,
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(InternshipStatus::Rejected.is_terminal());
        assert!(InternshipStatus::Completed.is_terminal());
        assert!(InternshipStatus::Cancelled.is_terminal());
        assert!(!InternshipStatus::Pending.is_terminal());
        assert!(!InternshipStatus::Approved.is_terminal());
        assert!(!InternshipStatus::Assigned.is_terminal());
        assert!(!InternshipStatus::InProgress.is_terminal());
    }

    #[test]
    fn test_approve_and_reject_only_from_pending() {
        let mut p = position(InternshipStatus::Pending, None);
        assert_eq!(p.approve().unwrap(), InternshipStatus::Approved);
        assert!(matches!(
            p.approve(),
            Err(AppError::InvalidTransition { from: InternshipStatus::Approved, event: LifecycleEvent::Approve })
        ));
        assert!(p.reject().is_err());
        assert_eq!(p.status, InternshipStatus::Approved);
    }

    #[test]
    fn test_reject_twice_fails_without_state_change() {
        let mut p = position(InternshipStatus::Pending, None);
        p.reject().unwrap();
        for _ in 0..2 {
            assert!(matches!(
                p.reject(),
                Err(AppError::InvalidTransition { from: InternshipStatus::Rejected, .. })
            ));
            assert_eq!(p.status, InternshipStatus::Rejected);
        }
    }

    #[test]
    fn test_assign_pending_position_without_student() {
        let mut p = position(InternshipStatus::Pending, None);
        let status = p
            .assign(AssignmentCommand { student_id: 42, mentor_id: None })
            .unwrap();
        assert_eq!(status, InternshipStatus::Assigned);
        assert_eq!(p.student_id, Some(42));
    }

    #[test]
    fn test_assign_approved_position_with_self_applied_student() {
        let mut p = position(InternshipStatus::Approved, Some(5));
        p.assign(AssignmentCommand { student_id: 5, mentor_id: Some(3) }).unwrap();
        assert_eq!(p.status, InternshipStatus::Assigned);
        assert_eq!(p.mentor_id, Some(3));
    }

    #[test]
    fn test_assign_refused_for_pending_position_with_student() {
        let mut p = position(InternshipStatus::Pending, Some(5));
        assert!(p.assign(AssignmentCommand { student_id: 6, mentor_id: None }).is_err());
        assert_eq!(p.status, InternshipStatus::Pending);
        assert_eq!(p.student_id, Some(5));
    }

    #[test]
    fn test_assign_refused_from_terminal_and_in_progress() {
        for status in [
            InternshipStatus::Rejected,
            InternshipStatus::Cancelled,
            InternshipStatus::Completed,
            InternshipStatus::InProgress,
        ] {
            let p = position(status, None);
            assert!(p.check_assignable().is_err(), "{status} should not be assignable");
        }
    }

    #[test]
    fn test_full_happy_path() {
        let mut p = position(InternshipStatus::Pending, None);
        p.approve().unwrap();
        p.assign(AssignmentCommand { student_id: 1, mentor_id: None }).unwrap();
        assert_eq!(p.start().unwrap(), InternshipStatus::InProgress);
        assert_eq!(p.complete().unwrap(), InternshipStatus::Completed);
        assert!(p.cancel().is_err());
    }

    #[test]
    fn test_start_and_complete_guards() {
        assert!(InternshipStatus::Approved.transition(LifecycleEvent::Start).is_err());
        assert!(InternshipStatus::Assigned.transition(LifecycleEvent::Complete).is_err());
        assert!(InternshipStatus::Pending.transition(LifecycleEvent::Complete).is_err());
    }

    #[test]
    fn test_cancel_from_any_non_terminal_state() {
        for status in [
            InternshipStatus::Pending,
            InternshipStatus::Approved,
            InternshipStatus::Assigned,
            InternshipStatus::InProgress,
        ] {
            assert_eq!(
                status.transition(LifecycleEvent::Cancel).unwrap(),
                InternshipStatus::Cancelled
            );
        }
        assert!(InternshipStatus::Rejected.transition(LifecycleEvent::Cancel).is_err());
    }

    #[test]
    fn test_status_string_conversion() {
        assert_eq!(InternshipStatus::InProgress.to_string(), "IN_PROGRESS");
        assert_eq!("CANCELLED".parse::<InternshipStatus>().unwrap(), InternshipStatus::Cancelled);
        assert!("cancelled".parse::<InternshipStatus>().is_err());

        let json = serde_json::to_string(&InternshipStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
    }

    #[test]
    fn test_create_is_pending_without_assignment() {
        let template = crate::models::PositionTemplate {
            job_title: "QA Intern".to_string(),
            description: None,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            batch_id: 10,
            company_id: 7,
            teacher_id: Some(2),
            salary: None,
            working_hours_per_week: Some(40),
        };
        let p = InternshipPosition::create(99, "INT-0099".to_string(), &template.numbered(1));
        assert_eq!(p.status, InternshipStatus::Pending);
        assert_eq!(p.job_title, "QA Intern 1");
        assert_eq!(p.company_id, Some(7));
        assert_eq!(p.student_id, None);
    }
}
