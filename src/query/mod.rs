pub mod criteria;
pub mod pagination;

pub use criteria::{
    BatchCriteria, CompanyCriteria, FilterValue, InternshipCriteria, MentorCriteria,
    SearchCriteria, StudentCriteria, TeacherCriteria,
};
pub use pagination::{PageResponse, PaginationRequest, SortDirection, WirePagination};

use serde_json::{Map, Value};

/// Flat query parameters as sent to the search endpoints.
pub type QueryMap = Map<String, Value>;

/// Criteria and pagination combined into the single parameter map of a list call.
pub fn build_query<C: SearchCriteria>(criteria: &C, pagination: &PaginationRequest) -> QueryMap {
    let mut query = criteria.to_query();
    pagination.to_wire().append_to(&mut query);
    query
}
