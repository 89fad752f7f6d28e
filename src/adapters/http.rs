use crate::domain::model::TransportSettings;
use crate::domain::ports::{ApiRequest, RawResponse, Transport, TransportFailure};
use crate::utils::error::{DirectoryError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// 以 reqwest 實作的 HTTP transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(settings: TransportSettings) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .read_timeout(settings.read_timeout)
            .build()
            .map_err(|e| DirectoryError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }
}

fn transport_failure(error: reqwest::Error) -> TransportFailure {
    TransportFailure {
        message: error.to_string(),
        timeout: error.is_timeout(),
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> std::result::Result<RawResponse, TransportFailure> {
        let mut builder = self.client.request(request.method.clone(), &request.url);

        // reqwest 的 json() 會一併設定 Content-Type
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(transport_failure)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport_failure)?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}
