use crate::core::classifier::{AttemptFailure, ClassifiedError};
use crate::core::envelope::{self, ResponseEnvelope};
use crate::domain::model::RetryPolicy;
use crate::domain::ports::{ApiRequest, Transport};
use serde::de::DeserializeOwned;

/// 對上游發出請求，依分類結果決定是否以指數退避重試
pub struct RetryingClient<T: Transport> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: Transport> RetryingClient<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub async fn call<P: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<ResponseEnvelope<P>, ClassifiedError> {
        let max_attempts = self.policy.max_attempts();
        let mut attempt = 1;

        loop {
            let error = match self.attempt::<P>(request).await {
                Ok(envelope) => return Ok(envelope),
                Err(failure) => ClassifiedError::from(failure),
            };

            if !error.retryable {
                tracing::debug!(
                    "📡 {} {}: not retrying {:?} ({})",
                    request.method,
                    request.url,
                    error.kind,
                    error.detail
                );
                return Err(error);
            }

            if attempt >= max_attempts {
                tracing::error!(
                    "📡 {} {}: giving up after {} attempts: {}",
                    request.method,
                    request.url,
                    attempt,
                    error.detail
                );
                return Err(error);
            }

            let delay = self.policy.delay_after(attempt);
            tracing::warn!(
                "📡 {} {}: attempt {}/{} failed ({}), retrying in {:?}",
                request.method,
                request.url,
                attempt,
                max_attempts,
                error.detail,
                delay
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn attempt<P: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<ResponseEnvelope<P>, AttemptFailure> {
        tracing::debug!("📡 Making API request: {} {}", request.method, request.url);
        let response = self
            .transport
            .send(request)
            .await
            .map_err(AttemptFailure::Transport)?;
        tracing::debug!("📡 API response status: {}", response.status);

        if !response.is_success() {
            return Err(AttemptFailure::Status {
                status: response.status,
            });
        }
        envelope::decode(&response.body)
    }
}
