use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub max_students: u32,
    #[serde(default)]
    pub current_students: Option<u32>,
    pub registration_end_date: NaiveDate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub company_id: Option<i64>,
}

impl Batch {
    /// Registration is open only while today (UTC) is before
    /// `registration_end_date`; it closes at the start of that date.
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.registration_end_date > now.date_naive()
    }
}
