use crate::error::AppError;
use crate::models::Batch;

/// Capacity view of one batch snapshot. Only a pre-check: the backend owns
/// the authoritative count and may still refuse a creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchCapacity {
    pub max_students: u32,
    pub current_students: u32,
}

impl BatchCapacity {
    pub fn of(batch: &Batch) -> Self {
        Self {
            max_students: batch.max_students,
            current_students: batch.current_students.unwrap_or(0),
        }
    }

    pub fn remaining_slots(&self) -> u32 {
        self.max_students.saturating_sub(self.current_students)
    }

    pub fn validate_quantity(&self, requested: u32) -> Result<(), AppError> {
        if requested < 1 {
            return Err(AppError::InvalidQuantity(requested));
        }
        let remaining = self.remaining_slots();
        if requested > remaining {
            return Err(AppError::CapacityExceeded { requested, remaining });
        }
        Ok(())
    }
}
