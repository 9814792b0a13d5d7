use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::QueryMap;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SORT_BY: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// 1-based pagination state of a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationRequest {
    pub page: u32,
    pub size: u32,
    pub sort_by: String,
    pub sort_dir: SortDirection,
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_dir: SortDirection::Desc,
        }
    }
}

impl PaginationRequest {
    pub fn to_wire(&self) -> WirePagination {
        WirePagination {
            page: self.page.saturating_sub(1),
            size: self.size.max(1),
            sort_by: self.sort_by.clone(),
            sort_dir: self.sort_dir,
        }
    }

    /// Rebuilds the view state from a response. Fields the backend does not
    /// echo fall back to defaults rather than to the request that was sent.
    pub fn from_wire<T>(response: &PageResponse<T>) -> Self {
        Self {
            page: response.number.saturating_add(1),
            size: response
                .size
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            sort_by: response
                .sort_by
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SORT_BY.to_string()),
            sort_dir: response.sort_dir.unwrap_or_default(),
        }
    }
}

/// 0-based pagination as the backend expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePagination {
    pub page: u32,
    pub size: u32,
    pub sort_by: String,
    pub sort_dir: SortDirection,
}

impl WirePagination {
    pub fn append_to(&self, query: &mut QueryMap) {
        query.insert("page".to_string(), Value::from(self.page));
        query.insert("size".to_string(), Value::from(self.size));
        query.insert("sortBy".to_string(), Value::from(self.sort_by.clone()));
        query.insert("sortDir".to_string(), Value::from(self.sort_dir.to_string()));
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default, alias = "pageNumber")]
    pub number: u32,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_dir: Option<SortDirection>,
}

impl<T> PageResponse<T> {
    /// Converts the page content while keeping the pagination fields.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<PageResponse<U>, E> {
        let content = self.content.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(PageResponse {
            content,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            first: self.first,
            last: self.last,
            sort_by: self.sort_by,
            sort_dir: self.sort_dir,
        })
    }
}
