pub mod dto;

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;
use crate::lifecycle::InternshipStatus;
use crate::models::{AssignmentCommand, Batch, CreatePositionRequest, InternshipPosition, Mentor, Student};
use crate::query::{PageResponse, QueryMap};
use crate::services::bulk::DEFAULT_BULK_DELAY;

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub bulk_delay: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: None,
            bulk_delay: DEFAULT_BULK_DELAY,
        }
    }

    pub fn new_from_env() -> Result<Self, AppError> {
        let base_url = env::var("INTERNSHIP_API_URL")
            .map_err(|_| AppError::Config("INTERNSHIP_API_URL is not set".to_string()))?;
        let api_token = env::var("INTERNSHIP_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        let bulk_delay = match env::var("BULK_CREATE_DELAY_MS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| AppError::Config(format!("BULK_CREATE_DELAY_MS is invalid: {}", e)))?,
            Err(_) => DEFAULT_BULK_DELAY,
        };

        Ok(Self {
            api_token,
            bulk_delay,
            ..Self::new(base_url)
        })
    }
}

/// Backend operations the internship core depends on.
#[async_trait]
pub trait InternshipApi: Send + Sync {
    /// Paged list of any entity; `query` already holds wire pagination.
    async fn search(&self, resource: &str, query: &QueryMap) -> Result<PageResponse<Value>, AppError>;
    async fn fetch_batch(&self, batch_id: i64) -> Result<Batch, AppError>;
    async fn fetch_active_batches(&self) -> Result<Vec<Batch>, AppError>;
    async fn fetch_position(&self, position_id: i64) -> Result<InternshipPosition, AppError>;
    async fn create_position(&self, request: &CreatePositionRequest) -> Result<InternshipPosition, AppError>;
    async fn update_status(&self, position_id: i64, status: InternshipStatus) -> Result<InternshipPosition, AppError>;
    async fn assign_position(
        &self,
        position_id: i64,
        command: &AssignmentCommand,
    ) -> Result<InternshipPosition, AppError>;
    async fn fetch_mentors(&self, company_id: Option<i64>) -> Result<Vec<Mentor>, AppError>;
    async fn fetch_available_students(&self) -> Result<Vec<Student>, AppError>;
}

pub struct HttpInternshipApi {
    client: Client,
    config: ApiConfig,
}

impl HttpInternshipApi {
    pub fn new(config: ApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn url(&self, path: &str) -> Result<Url, AppError> {
        let raw = format!("{}/{}", self.config.base_url, path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|e| AppError::Config(format!("Invalid API url {}: {}", raw, e)))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.api_token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder, what: &str) -> Result<T, AppError> {
        let response = self.authorize(builder).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = dto::ErrorBody::reason(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request refused").to_string());
            tracing::warn!("Backend refused {}: {} {}", what, status, message);
            return Err(AppError::ExternalRejection {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            tracing::error!("Failed to parse {} response: {}", what, e);
            AppError::Decode(format!("{}: {}", what, e))
        })
    }
}

/// Query string form of a parameter value.
fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl InternshipApi for HttpInternshipApi {
    async fn search(&self, resource: &str, query: &QueryMap) -> Result<PageResponse<Value>, AppError> {
        let mut url = self.url(resource)?;
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), query_value(v))));
        tracing::debug!("GET {}", url);
        self.send(self.client.get(url), resource).await
    }

    async fn fetch_batch(&self, batch_id: i64) -> Result<Batch, AppError> {
        let url = self.url(&format!("batches/{}", batch_id))?;
        self.send(self.client.get(url), "batch").await
    }

    async fn fetch_active_batches(&self) -> Result<Vec<Batch>, AppError> {
        let url = self.url("batches/active")?;
        self.send(self.client.get(url), "active batches").await
    }

    async fn fetch_position(&self, position_id: i64) -> Result<InternshipPosition, AppError> {
        let url = self.url(&format!("internships/{}", position_id))?;
        self.send(self.client.get(url), "internship").await
    }

    async fn create_position(&self, request: &CreatePositionRequest) -> Result<InternshipPosition, AppError> {
        let url = self.url("internships")?;
        self.send(self.client.post(url).json(request), "create internship").await
    }

    async fn update_status(&self, position_id: i64, status: InternshipStatus) -> Result<InternshipPosition, AppError> {
        let builder = match status {
            InternshipStatus::Approved => self
                .client
                .put(self.url(&format!("internships/{}/approve", position_id))?),
            InternshipStatus::Rejected => self
                .client
                .put(self.url(&format!("internships/{}/reject", position_id))?),
            other => self
                .client
                .put(self.url(&format!("internships/{}/status", position_id))?)
                .json(&dto::StatusUpdateRequest { status: other }),
        };
        self.send(builder, "internship status update").await
    }

    async fn assign_position(
        &self,
        position_id: i64,
        command: &AssignmentCommand,
    ) -> Result<InternshipPosition, AppError> {
        let url = self.url(&format!("internships/{}/assign", position_id))?;
        self.send(self.client.put(url).json(command), "internship assignment").await
    }

    async fn fetch_mentors(&self, company_id: Option<i64>) -> Result<Vec<Mentor>, AppError> {
        let mut url = self.url("mentors")?;
        if let Some(company_id) = company_id {
            url.query_pairs_mut()
                .append_pair("companyId", &company_id.to_string());
        }
        self.send(self.client.get(url), "mentors").await
    }

    async fn fetch_available_students(&self) -> Result<Vec<Student>, AppError> {
        let url = self.url("students/available")?;
        self.send(self.client.get(url), "available students").await
    }
}
