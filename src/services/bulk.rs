use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::AppError;
use crate::models::{CreatePositionRequest, InternshipPosition, PositionTemplate};

pub const DEFAULT_BULK_DELAY: Duration = Duration::from_millis(500);

/// Lazily yields `quantity` creation requests titled `"{title} 1"` .. `"{title} N"`.
pub fn generate(
    template: &PositionTemplate,
    quantity: u32,
) -> impl ExactSizeIterator<Item = CreatePositionRequest> + '_ {
    (0..quantity).map(move |offset| template.numbered(offset + 1))
}

/// Submits creation requests one at a time with a fixed pause between them.
#[derive(Debug, Clone, Copy)]
pub struct BulkSubmitter {
    delay: Duration,
}

impl Default for BulkSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_BULK_DELAY)
    }
}

impl BulkSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Awaits each call before issuing the next, in request order. Stops at the
    /// first failure and reports how many were created before it.
    pub async fn submit<I, F, Fut>(&self, requests: I, mut create: F) -> Result<usize, AppError>
    where
        I: IntoIterator<Item = CreatePositionRequest>,
        I::IntoIter: ExactSizeIterator,
        F: FnMut(CreatePositionRequest) -> Fut,
        Fut: Future<Output = Result<InternshipPosition, AppError>>,
    {
        let requests = requests.into_iter();
        let total = requests.len();
        let mut succeeded = 0;

        for request in requests {
            if succeeded > 0 {
                tokio::time::sleep(self.delay).await;
            }

            let title = request.job_title.clone();
            match create(request).await {
                Ok(position) => {
                    succeeded += 1;
                    info!(
                        "Created position {}/{}: {} ({})",
                        succeeded, total, position.job_title, position.internship_code
                    );
                }
                Err(e) => {
                    let remaining = total - succeeded - 1;
                    warn!(
                        "Bulk creation stopped at '{}' after {} of {}: {}",
                        title, succeeded, total, e
                    );
                    return Err(AppError::BulkInterrupted {
                        succeeded,
                        remaining,
                        source: Box::new(e),
                    });
                }
            }
        }

        Ok(succeeded)
    }
}
