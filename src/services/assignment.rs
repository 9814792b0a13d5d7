use crate::error::AppError;
use crate::models::{AssignmentCommand, InternshipPosition, Mentor, Student};

/// Mentors employed by the position's company. Empty when the position has
/// no company or nobody matches; that is not an error.
pub fn eligible_mentors<'a>(position: &InternshipPosition, mentors: &'a [Mentor]) -> Vec<&'a Mentor> {
    let Some(company_id) = position.company_id else {
        return Vec::new();
    };
    mentors
        .iter()
        .filter(|m| m.company_id == Some(company_id))
        .collect()
}

/// The roster is already limited to students without an active position;
/// any of them may apply to any company.
pub fn eligible_students(available: &[Student]) -> Vec<&Student> {
    available.iter().collect()
}

/// Validates an assignment against the position and the mentor roster and
/// builds the update payload.
pub fn resolve_assignment(
    position: &InternshipPosition,
    student_id: Option<i64>,
    mentor_id: Option<i64>,
    mentors: &[Mentor],
) -> Result<AssignmentCommand, AppError> {
    position.check_assignable()?;

    let student_id = student_id
        .or(position.student_id)
        .ok_or(AppError::MissingStudent)?;

    if let Some(mentor_id) = mentor_id {
        let mentor = mentors
            .iter()
            .find(|m| m.id == mentor_id)
            .ok_or(AppError::MentorNotFound(mentor_id))?;
        if position.company_id.is_none() || mentor.company_id != position.company_id {
            return Err(AppError::MentorCompanyMismatch {
                mentor_id,
                mentor_company: mentor.company_id,
                position_company: position.company_id,
            });
        }
    }

    Ok(AssignmentCommand { student_id, mentor_id })
}
